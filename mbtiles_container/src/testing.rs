//! Test fixtures: builds small MBTiles files on disk.
//!
//! Only compiled for tests and with the `test` feature. Nothing else in the crate writes
//! containers.

use mbtiles_core::TileCoord;
use r2d2_sqlite::rusqlite::{Connection, Result, params, types::Value};
use std::path::Path;

/// Minimal valid PNG: 1x1 pixel, red.
pub const TINY_PNG: &[u8] = &[
	0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // PNG signature
	0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, // IHDR chunk
	0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, // 1x1
	0x08, 0x02, 0x00, 0x00, 0x00, 0x90, 0x77, 0x53, 0xDE, // 8-bit RGB
	0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, // IDAT chunk
	0x08, 0xD7, 0x63, 0xF8, 0xCF, 0xC0, 0x00, 0x00, 0x01, 0x01, 0x01, 0x00, // compressed data
	0x1B, 0xB6, 0xEE, 0x56, // CRC
	0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, // IEND chunk
	0xAE, 0x42, 0x60, 0x82, // CRC
];

/// PNG signature followed by an IHDR chunk declaring a 256x256 image.
pub const PNG_256_HEADER: &[u8] = &[
	0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // PNG signature
	0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, // IHDR chunk
	0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00, // 256x256
	0x08, 0x06, 0x00, 0x00, 0x00, // 8-bit RGBA
];

/// Start of a gzip stream, as found in compressed vector tiles.
pub const GZIP_PBF: &[u8] = &[0x1f, 0x8b, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x01, 0x00];

/// Start of a JPEG stream (SOI + APP0 marker).
pub const JPEG_HEADER: &[u8] = &[0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10, 0x4a, 0x46, 0x49, 0x46, 0x00];

/// Builder for an MBTiles file with chosen tables, tiles and metadata rows.
#[derive(Clone, Debug)]
pub struct MBTilesFixture {
	tiles_table: bool,
	metadata_table: bool,
	tiles: Vec<(TileCoord, Value)>,
	metadata: Vec<(String, Value)>,
}

impl MBTilesFixture {
	#[must_use]
	pub fn new() -> Self {
		MBTilesFixture {
			tiles_table: true,
			metadata_table: true,
			tiles: Vec::new(),
			metadata: Vec::new(),
		}
	}

	#[must_use]
	pub fn tile(mut self, z: u8, x: u32, y: u32, data: &[u8]) -> Self {
		self.tiles.push((TileCoord::new(z, x, y), Value::Blob(data.to_vec())));
		self
	}

	/// Adds a tile row whose `tile_data` is `NULL`.
	#[must_use]
	pub fn null_tile(mut self, z: u8, x: u32, y: u32) -> Self {
		self.tiles.push((TileCoord::new(z, x, y), Value::Null));
		self
	}

	/// Adds a tile row whose `tile_data` has TEXT storage class.
	#[must_use]
	pub fn text_tile(mut self, z: u8, x: u32, y: u32, data: &str) -> Self {
		self.tiles.push((TileCoord::new(z, x, y), Value::Text(data.to_owned())));
		self
	}

	#[must_use]
	pub fn meta(mut self, name: &str, value: &str) -> Self {
		self.metadata.push((name.to_owned(), Value::Text(value.to_owned())));
		self
	}

	/// Adds a metadata row stored with INTEGER storage class.
	#[must_use]
	pub fn meta_integer(mut self, name: &str, value: i64) -> Self {
		self.metadata.push((name.to_owned(), Value::Integer(value)));
		self
	}

	/// Adds a metadata row whose `value` is `NULL`.
	#[must_use]
	pub fn null_meta(mut self, name: &str) -> Self {
		self.metadata.push((name.to_owned(), Value::Null));
		self
	}

	#[must_use]
	pub fn without_tiles_table(mut self) -> Self {
		self.tiles_table = false;
		self
	}

	#[must_use]
	pub fn without_metadata_table(mut self) -> Self {
		self.metadata_table = false;
		self
	}

	/// Writes the container to `path`. The connection is closed before returning, so no
	/// journal file is left behind.
	pub fn write(&self, path: &Path) -> Result<()> {
		let mut conn = Connection::open(path)?;
		let transaction = conn.transaction()?;

		if self.metadata_table {
			transaction.execute_batch("CREATE TABLE metadata (name TEXT, value TEXT);")?;
			for (name, value) in &self.metadata {
				transaction.execute("INSERT INTO metadata (name, value) VALUES (?1, ?2)", params![name, value])?;
			}
		}

		if self.tiles_table {
			transaction.execute_batch(
				"CREATE TABLE tiles (zoom_level INTEGER, tile_column INTEGER, tile_row INTEGER, tile_data BLOB);
				CREATE UNIQUE INDEX tile_index on tiles (zoom_level, tile_column, tile_row);",
			)?;
			for (coord, data) in &self.tiles {
				transaction.execute(
					"INSERT INTO tiles (zoom_level, tile_column, tile_row, tile_data) VALUES (?1, ?2, ?3, ?4)",
					params![coord.z, coord.x, coord.y, data],
				)?;
			}
		}

		transaction.commit()?;
		conn.close().map_err(|(_, err)| err)
	}
}

impl Default for MBTilesFixture {
	fn default() -> Self {
		Self::new()
	}
}
