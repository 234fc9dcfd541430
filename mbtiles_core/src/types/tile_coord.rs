use serde::Serialize;
use std::fmt;

/// Address of one tile row: `zoom_level`, `tile_column` and `tile_row`.
///
/// Values are passed to SQL exactly as given. The row uses the container's own
/// (TMS) addressing; no flipping and no pyramid-bounds check happens here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TileCoord {
	pub z: u8,
	pub x: u32,
	pub y: u32,
}

impl TileCoord {
	#[must_use]
	pub fn new(z: u8, x: u32, y: u32) -> TileCoord {
		TileCoord { z, x, y }
	}
}

impl fmt::Display for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}/{}", self.z, self.x, self.y)
	}
}
