use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, btree_map};

/// One decoded metadata value.
///
/// Serializes untagged, so a [`Metadata`] renders as a plain TileJSON-like object.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetaValue {
	Text(String),
	Integer(i64),
	Floats(Vec<f64>),
	/// A field merged in from the `json` metadata entry.
	Json(JsonValue),
}

impl MetaValue {
	pub fn as_str(&self) -> Option<&str> {
		match self {
			MetaValue::Text(text) => Some(text),
			_ => None,
		}
	}

	/// Also accepts an integer merged in from the `json` entry.
	pub fn as_integer(&self) -> Option<i64> {
		match self {
			MetaValue::Integer(value) => Some(*value),
			MetaValue::Json(value) => value.as_i64(),
			_ => None,
		}
	}

	pub fn as_floats(&self) -> Option<&[f64]> {
		match self {
			MetaValue::Floats(values) => Some(values),
			_ => None,
		}
	}
}

impl From<&str> for MetaValue {
	fn from(value: &str) -> Self {
		MetaValue::Text(value.to_owned())
	}
}

impl From<String> for MetaValue {
	fn from(value: String) -> Self {
		MetaValue::Text(value)
	}
}

impl From<i64> for MetaValue {
	fn from(value: i64) -> Self {
		MetaValue::Integer(value)
	}
}

impl From<Vec<f64>> for MetaValue {
	fn from(values: Vec<f64>) -> Self {
		MetaValue::Floats(values)
	}
}

impl From<JsonValue> for MetaValue {
	fn from(value: JsonValue) -> Self {
		MetaValue::Json(value)
	}
}

/// Decoded metadata, keyed by metadata name.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, MetaValue>);

impl Metadata {
	#[must_use]
	pub fn new() -> Metadata {
		Metadata(BTreeMap::new())
	}

	/// Inserts a value, returning the one it replaced.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetaValue>) -> Option<MetaValue> {
		self.0.insert(key.into(), value.into())
	}

	pub fn get(&self, key: &str) -> Option<&MetaValue> {
		self.0.get(key)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.0.contains_key(key)
	}

	pub fn text(&self, key: &str) -> Option<&str> {
		self.get(key).and_then(MetaValue::as_str)
	}

	pub fn integer(&self, key: &str) -> Option<i64> {
		self.get(key).and_then(MetaValue::as_integer)
	}

	pub fn floats(&self, key: &str) -> Option<&[f64]> {
		self.get(key).and_then(MetaValue::as_floats)
	}

	pub fn min_zoom(&self) -> Option<i64> {
		self.integer("minzoom")
	}

	pub fn max_zoom(&self) -> Option<i64> {
		self.integer("maxzoom")
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> btree_map::Iter<'_, String, MetaValue> {
		self.0.iter()
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}
}

impl<'a> IntoIterator for &'a Metadata {
	type Item = (&'a String, &'a MetaValue);
	type IntoIter = btree_map::Iter<'a, String, MetaValue>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

impl IntoIterator for Metadata {
	type Item = (String, MetaValue);
	type IntoIter = btree_map::IntoIter<String, MetaValue>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}
