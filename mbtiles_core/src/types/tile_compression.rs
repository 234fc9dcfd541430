//! This module defines the `TileCompression` enum: the transport compression of a tile payload.
//!
//! Compression never changes the tile format. A gzip or zlib compressed payload is still a
//! vector tile; the compression only tells a serving layer which `Content-Encoding` to send.
//!
//! # Examples
//!
//! ```
//! use mbtiles_core::TileCompression;
//!
//! assert_eq!(TileCompression::Gzip.as_content_encoding(), Some("gzip"));
//! assert_eq!(TileCompression::Uncompressed.as_content_encoding(), None);
//! ```

use serde::Serialize;
use std::fmt::Display;

/// Enum representing possible payload compressions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TileCompression {
	Uncompressed,
	Gzip,
	Zlib,
}

impl TileCompression {
	pub fn as_str(&self) -> &str {
		match self {
			TileCompression::Uncompressed => "none",
			TileCompression::Gzip => "gzip",
			TileCompression::Zlib => "zlib",
		}
	}

	/// Returns the HTTP `Content-Encoding` token for this compression, if any.
	///
	/// A zlib stream is what HTTP calls `deflate`.
	pub fn as_content_encoding(&self) -> Option<&'static str> {
		match self {
			TileCompression::Uncompressed => None,
			TileCompression::Gzip => Some("gzip"),
			TileCompression::Zlib => Some("deflate"),
		}
	}
}

impl Display for TileCompression {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(TileCompression::Uncompressed, "none", None)]
	#[case(TileCompression::Gzip, "gzip", Some("gzip"))]
	#[case(TileCompression::Zlib, "zlib", Some("deflate"))]
	fn strings(#[case] compression: TileCompression, #[case] display: &str, #[case] encoding: Option<&str>) {
		assert_eq!(compression.to_string(), display);
		assert_eq!(compression.as_content_encoding(), encoding);
	}
}
