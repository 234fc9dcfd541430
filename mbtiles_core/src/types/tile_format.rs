//! This module defines the `TileFormat` enum, the set of payload encodings an MBTiles container
//! can be classified as.
//!
//! The format is always derived from the payload bytes (see [`crate::sniff`]), never from a file
//! extension or the `format` metadata entry. Compressed vector tiles are canonicalized to
//! [`TileFormat::PBF`]; their compression is reported separately as a
//! [`TileCompression`](crate::TileCompression).
//!
//! # Examples
//!
//! ```rust
//! use mbtiles_core::TileFormat;
//!
//! let format = TileFormat::PNG;
//! assert_eq!(format.as_extension(), ".png");
//! assert_eq!(format.as_mime_str(), "image/png");
//! assert_eq!(TileFormat::PBF.as_type_str(), "vector");
//! ```

use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Enum representing the recognized tile encodings.
///
/// # Variants
/// - `JPG` - JPEG image format
/// - `PBF` - Mapbox Vector Tile in Protocol Buffer format, compressed or not
/// - `PNG` - PNG image format
/// - `WEBP` - WEBP image format
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TileFormat {
	JPG,
	PBF,
	PNG,
	WEBP,
}

impl TileFormat {
	/// Returns a lowercase string identifier for this tile format.
	///
	/// These are the values the MBTiles 1.3 `format` metadata entry uses.
	pub fn as_str(&self) -> &str {
		match self {
			TileFormat::JPG => "jpg",
			TileFormat::PBF => "pbf",
			TileFormat::PNG => "png",
			TileFormat::WEBP => "webp",
		}
	}

	/// Returns `"image"` for raster formats and `"vector"` for vector tiles.
	pub fn as_type_str(&self) -> &str {
		match self {
			TileFormat::JPG | TileFormat::PNG | TileFormat::WEBP => "image",
			TileFormat::PBF => "vector",
		}
	}

	pub fn as_mime_str(&self) -> &str {
		match self {
			TileFormat::JPG => "image/jpeg",
			TileFormat::PBF => "application/x-protobuf",
			TileFormat::PNG => "image/png",
			TileFormat::WEBP => "image/webp",
		}
	}

	/// Returns the canonical file extension for this tile format (with a leading dot).
	pub fn as_extension(&self) -> &str {
		match self {
			TileFormat::JPG => ".jpg",
			TileFormat::PBF => ".pbf",
			TileFormat::PNG => ".png",
			TileFormat::WEBP => ".webp",
		}
	}
}

impl Display for TileFormat {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
