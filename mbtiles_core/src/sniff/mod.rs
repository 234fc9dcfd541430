//! Classify tile payloads purely by their content.
//!
//! [`sniff`] compares the leading bytes of a payload against the magic signatures of the supported
//! encodings, in a fixed order, and for raster formats with a fixed-offset header also extracts the
//! tile width in pixels.
//!
//! | signature                        | format | compression    |
//! |----------------------------------|--------|----------------|
//! | `1f 8b`                          | PBF    | Gzip           |
//! | `78 01`, `78 5e`, `78 9c`, `78 da` | PBF  | Zlib           |
//! | `89 50 4e 47 0d 0a 1a 0a`        | PNG    | Uncompressed   |
//! | `ff d8 ff`                       | JPG    | Uncompressed   |
//! | `RIFF` ... `WEBP`                | WEBP   | Uncompressed   |
//!
//! # Examples
//!
//! ```rust
//! use mbtiles_core::{sniff, TileCompression, TileFormat};
//!
//! let info = sniff(&[0x1f, 0x8b, 0x08, 0x00]).unwrap();
//! assert_eq!(info.format, TileFormat::PBF);
//! assert_eq!(info.compression, TileCompression::Gzip);
//! assert_eq!(info.tile_size, 0);
//! ```

mod png;
mod webp;

use crate::{TileCompression, TileFormat};
use serde::Serialize;
use thiserror::Error;

/// Number of leading bytes kept in [`FormatError::Unrecognized`].
const PREFIX_LEN: usize = 16;

const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];
const ZLIB_CMF: u8 = 0x78;
const ZLIB_FLG: [u8; 4] = [0x01, 0x5e, 0x9c, 0xda];
const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
const JPEG_MAGIC: &[u8] = &[0xff, 0xd8, 0xff];
const RIFF_MAGIC: &[u8] = b"RIFF";
const WEBP_MAGIC: &[u8] = b"WEBP";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
	#[error("no tile data to inspect")]
	Empty,

	#[error("unrecognized tile signature {prefix:02x?}")]
	Unrecognized { prefix: Vec<u8> },

	#[error("malformed {format} header: {reason}")]
	MalformedHeader { format: TileFormat, reason: &'static str },
}

/// Result of sniffing one payload.
///
/// `tile_size` is the embedded pixel width, or `0` for formats that carry no fixed-offset
/// dimension header (JPG, PBF).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TileInfo {
	pub format: TileFormat,
	pub compression: TileCompression,
	pub tile_size: u32,
}

impl TileInfo {
	fn new(format: TileFormat, compression: TileCompression, tile_size: u32) -> TileInfo {
		TileInfo {
			format,
			compression,
			tile_size,
		}
	}
}

/// The raw signature that matched, before compression is folded into the vector format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Magic {
	Gzip,
	Zlib,
	Png,
	Jpeg,
	Webp,
}

impl Magic {
	/// Signatures are checked in priority order; the first match wins.
	fn detect(data: &[u8]) -> Option<Magic> {
		if data.starts_with(GZIP_MAGIC) {
			Some(Magic::Gzip)
		} else if data.len() >= 2 && data[0] == ZLIB_CMF && ZLIB_FLG.contains(&data[1]) {
			Some(Magic::Zlib)
		} else if data.starts_with(PNG_MAGIC) {
			Some(Magic::Png)
		} else if data.starts_with(JPEG_MAGIC) {
			Some(Magic::Jpeg)
		} else if data.starts_with(RIFF_MAGIC) && data.get(8..12) == Some(WEBP_MAGIC) {
			Some(Magic::Webp)
		} else {
			None
		}
	}
}

/// Classifies a tile payload and extracts its pixel size where the format embeds one.
///
/// Gzip and zlib are only ever used for vector tiles in MBTiles, so both classify as
/// [`TileFormat::PBF`]. A payload whose signature matched but whose header ends before the size
/// field (or contradicts itself) is an error, never a silent size of `0`.
pub fn sniff(data: &[u8]) -> Result<TileInfo, FormatError> {
	if data.is_empty() {
		return Err(FormatError::Empty);
	}

	let magic = Magic::detect(data).ok_or_else(|| FormatError::Unrecognized {
		prefix: data[..data.len().min(PREFIX_LEN)].to_vec(),
	})?;

	use TileCompression::*;
	use TileFormat::*;

	let info = match magic {
		Magic::Gzip => TileInfo::new(PBF, Gzip, 0),
		Magic::Zlib => TileInfo::new(PBF, Zlib, 0),
		Magic::Png => TileInfo::new(PNG, Uncompressed, png::width(data)?),
		Magic::Jpeg => TileInfo::new(JPG, Uncompressed, 0),
		Magic::Webp => TileInfo::new(WEBP, Uncompressed, webp::width(data)?),
	};

	log::trace!("sniffed {magic:?} payload of {} bytes as {info:?}", data.len());

	Ok(info)
}

fn malformed(format: TileFormat, reason: &'static str) -> FormatError {
	FormatError::MalformedHeader { format, reason }
}
