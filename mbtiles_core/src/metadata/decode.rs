use super::{MetaValue, Metadata};
use serde_json::Value as JsonValue;
use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetadataError {
	#[error("cannot read metadata item '{key}': {value:?} is not an integer")]
	Integer {
		key: String,
		value: String,
		#[source]
		source: ParseIntError,
	},

	#[error("cannot read metadata item '{key}': could not parse {value:?} to floats")]
	Floats {
		key: String,
		value: String,
		#[source]
		source: ParseFloatError,
	},

	#[error("unable to parse JSON metadata item")]
	Json(#[source] serde_json::Error),

	#[error("JSON metadata item must be an object")]
	JsonNotObject,
}

/// Decodes raw `(name, value)` rows of the metadata table.
///
/// Rows are applied in the given order and later rows overwrite earlier ones. The top-level
/// fields of a `json` row are merged into the mapping the same way, so with several `json` rows
/// the result depends on the order the table was scanned in.
///
/// Any malformed `minzoom`, `maxzoom`, `bounds`, `center` or `json` value fails the whole decode.
///
/// ```rust
/// use mbtiles_core::decode_metadata;
///
/// let metadata = decode_metadata([("bounds", "-1.5, 2.25,10,-3"), ("minzoom", "3")]).unwrap();
/// assert_eq!(metadata.floats("bounds"), Some(&[-1.5, 2.25, 10.0, -3.0][..]));
/// assert_eq!(metadata.min_zoom(), Some(3));
/// ```
pub fn decode_metadata<I, K, V>(rows: I) -> Result<Metadata, MetadataError>
where
	I: IntoIterator<Item = (K, V)>,
	K: Into<String>,
	V: AsRef<str>,
{
	let mut metadata = Metadata::new();

	for (key, value) in rows {
		let key: String = key.into();
		let value = value.as_ref();

		match key.as_str() {
			"minzoom" | "maxzoom" => {
				let zoom = parse_integer(&key, value)?;
				metadata.insert(key, zoom);
			}
			"bounds" | "center" => {
				let floats = parse_floats(&key, value)?;
				metadata.insert(key, floats);
			}
			"json" => merge_json(&mut metadata, value)?,
			_ => {
				metadata.insert(key, value);
			}
		}
	}

	Ok(metadata)
}

fn parse_integer(key: &str, value: &str) -> Result<i64, MetadataError> {
	value.parse::<i64>().map_err(|source| MetadataError::Integer {
		key: key.to_owned(),
		value: value.to_owned(),
		source,
	})
}

/// Converts a comma-delimited string of floats, e.g. `"1.5, 2.1"` => `[1.5, 2.1]`.
fn parse_floats(key: &str, value: &str) -> Result<Vec<f64>, MetadataError> {
	value
		.split(',')
		.map(|part| part.trim().parse::<f64>())
		.collect::<Result<Vec<f64>, _>>()
		.map_err(|source| MetadataError::Floats {
			key: key.to_owned(),
			value: value.to_owned(),
			source,
		})
}

fn merge_json(metadata: &mut Metadata, value: &str) -> Result<(), MetadataError> {
	let object = match serde_json::from_str::<JsonValue>(value).map_err(MetadataError::Json)? {
		JsonValue::Object(object) => object,
		_ => return Err(MetadataError::JsonNotObject),
	};

	for (key, value) in object {
		metadata.insert(key, MetaValue::Json(value));
	}

	Ok(())
}
