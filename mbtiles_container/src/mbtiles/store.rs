//! Read tiles and metadata from an MBTiles (SQLite) database.
//!
//! Opening a container runs these checks in order, failing with the first that does not hold:
//!
//! 1. the path exists ([`MBTilesError::NotFound`])
//! 2. there is no `-journal` file next to it ([`MBTilesError::IncompleteContainer`])
//! 3. SQLite can open it read-only ([`MBTilesError::Open`])
//! 4. it has a `tiles` and a `metadata` table or view ([`MBTilesError::InvalidContainer`])
//! 5. one tile payload sniffs as a known format ([`MBTilesError::UnrecognizedFormat`])
//! 6. the tile lookup statement prepares ([`MBTilesError::Open`])
//!
//! Checks 3 to 6 run on a single direct connection, so a broken file fails at once. The connection
//! pool is only built once all of them pass.
//!
//! The format, compression, tile size and timestamp found while opening never change afterwards.
//! Tile coordinates are passed to SQL as given, in the container's TMS row order.

use crate::{MBTilesError, OpenOptions, has_journal};
use mbtiles_core::{Blob, Metadata, TileCompression, TileCoord, TileFormat, TileInfo, decode_metadata, sniff};
use r2d2::Pool;
use r2d2_sqlite::{
	SqliteConnectionManager,
	rusqlite::{self, Connection, OpenFlags, OptionalExtension, params, types::ValueRef},
};
use std::{
	fs, io,
	path::{Path, PathBuf},
	time::{Duration, SystemTime, UNIX_EPOCH},
};

const TABLES_QUERY: &str =
	"SELECT count(*) FROM sqlite_master WHERE type IN ('table', 'view') AND name IN ('tiles', 'metadata')";
const SAMPLE_QUERY: &str = "SELECT tile_data FROM tiles LIMIT 1";
const TILE_QUERY: &str = "SELECT tile_data FROM tiles WHERE zoom_level = ?1 AND tile_column = ?2 AND tile_row = ?3";
const METADATA_QUERY: &str = "SELECT name, value FROM metadata";
const ZOOM_RANGE_QUERY: &str = "SELECT MIN(zoom_level), MAX(zoom_level) FROM tiles";

type SqlitePool = Pool<SqliteConnectionManager>;

/// Read-only handle for one MBTiles container.
///
/// The handle owns a pool of read-only SQLite connections. Lookups take `&self`, so a store can be
/// shared between threads; SQLite itself serializes what needs serializing.
pub struct MBTilesStore {
	filename: PathBuf,
	pool: Option<SqlitePool>,
	info: TileInfo,
	timestamp: SystemTime,
}

impl MBTilesStore {
	/// Opens a container with the default [`OpenOptions`].
	pub fn open(path: impl AsRef<Path>) -> Result<MBTilesStore, MBTilesError> {
		MBTilesStore::open_with(path, &OpenOptions::default())
	}

	/// Opens a container, validates its structure and detects its tile format.
	pub fn open_with(path: impl AsRef<Path>, options: &OpenOptions) -> Result<MBTilesStore, MBTilesError> {
		let path = path.as_ref();
		log::debug!("open {path:?}");

		let stat = match fs::metadata(path) {
			Ok(stat) => stat,
			Err(err) if err.kind() == io::ErrorKind::NotFound => {
				return Err(MBTilesError::NotFound(path.to_path_buf()));
			}
			Err(source) => {
				return Err(MBTilesError::Io {
					path: path.to_path_buf(),
					source,
				});
			}
		};

		if has_journal(path) {
			return Err(MBTilesError::IncompleteContainer(path.to_path_buf()));
		}

		let modified = stat.modified().map_err(|source| MBTilesError::Io {
			path: path.to_path_buf(),
			source,
		})?;

		let info = {
			let conn = Connection::open_with_flags(path, open_flags()).map_err(|err| MBTilesError::open(path, err))?;
			conn.busy_timeout(options.busy_timeout)
				.map_err(|err| MBTilesError::open(path, err))?;

			validate_required_tables(&conn, path)?;
			let info = detect_tile_info(&conn, path)?;

			conn.prepare(TILE_QUERY).map_err(|err| MBTilesError::open(path, err))?;
			info
		};

		let pool = connect(path, options)?;

		Ok(MBTilesStore {
			filename: path.to_path_buf(),
			pool: Some(pool),
			info,
			timestamp: truncate_to_seconds(modified),
		})
	}

	/// Fetches the payload stored at `coord`.
	///
	/// Returns `Ok(None)` when there is no such row (or its `tile_data` is `NULL`). A row holding
	/// zero bytes is returned as an empty [`Blob`]. A payload stored as TEXT is returned as its bytes.
	pub fn read_tile(&self, coord: &TileCoord) -> Result<Option<Blob>, MBTilesError> {
		log::trace!("read tile {coord} from {:?}", self.filename);

		let conn = self.pool()?.get()?;
		let mut stmt = conn.prepare_cached(TILE_QUERY)?;
		let data = stmt
			.query_row(params![coord.z, coord.x, coord.y], |row| Ok(tile_bytes(row.get_ref(0)?)))
			.optional()?;

		Ok(data.flatten().map(Blob::from))
	}

	/// Reads and decodes the whole `metadata` table.
	///
	/// Rows with a `NULL` or empty value are skipped. Decoding happens in two steps:
	///
	/// 1. [`decode_metadata`] turns the rows into typed values; a malformed value fails the call.
	/// 2. If `minzoom` or `maxzoom` is still missing, the zoom range of the `tiles` table fills in
	///    the missing key(s). This step is best effort: metadata is advisory, so a failure here is
	///    logged and the mapping from step 1 is returned as is.
	pub fn read_metadata(&self) -> Result<Metadata, MBTilesError> {
		log::debug!("read metadata from {:?}", self.filename);

		let conn = self.pool()?.get()?;
		let mut metadata = decode_metadata(read_metadata_rows(&conn)?)?;

		if !(metadata.contains_key("minzoom") && metadata.contains_key("maxzoom")) {
			if let Err(err) = infer_zoom_range(&conn, &mut metadata) {
				log::warn!("cannot infer zoom range of {:?}: {err}", self.filename);
			}
		}

		Ok(metadata)
	}

	/// Releases all connections and their prepared statements.
	///
	/// Safe to call any number of times. Every later read fails with [`MBTilesError::ClosedHandle`].
	pub fn close(&mut self) {
		if self.pool.take().is_some() {
			log::debug!("close {:?}", self.filename);
		}
	}

	pub fn is_closed(&self) -> bool {
		self.pool.is_none()
	}

	pub fn filename(&self) -> &Path {
		&self.filename
	}

	pub fn tile_info(&self) -> TileInfo {
		self.info
	}

	pub fn tile_format(&self) -> TileFormat {
		self.info.format
	}

	pub fn tile_compression(&self) -> TileCompression {
		self.info.compression
	}

	/// Tile width in pixels, or `0` if the format carries no size header.
	pub fn tile_size(&self) -> u32 {
		self.info.tile_size
	}

	/// Modification time of the container file, truncated to whole seconds.
	///
	/// Values are truncated, never rounded up. Servers that round the modification time to the
	/// nearest second can report a value one second later for the same file.
	pub fn timestamp(&self) -> SystemTime {
		self.timestamp
	}

	fn pool(&self) -> Result<&SqlitePool, MBTilesError> {
		self.pool.as_ref().ok_or(MBTilesError::ClosedHandle)
	}
}

impl std::fmt::Debug for MBTilesStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MBTilesStore")
			.field("filename", &self.filename)
			.field("info", &self.info)
			.field("closed", &self.is_closed())
			.finish()
	}
}

fn open_flags() -> OpenFlags {
	OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
}

fn connect(path: &Path, options: &OpenOptions) -> Result<SqlitePool, MBTilesError> {
	let busy_timeout = options.busy_timeout;
	let manager = SqliteConnectionManager::file(path)
		.with_flags(open_flags())
		.with_init(move |conn| conn.busy_timeout(busy_timeout));

	Pool::builder()
		.max_size(options.max_connections)
		.connection_timeout(options.connection_timeout)
		.build(manager)
		.map_err(|err| MBTilesError::open(path, err))
}

/// Checks that both `tiles` and `metadata` exist. Columns and indices are not inspected.
fn validate_required_tables(conn: &Connection, path: &Path) -> Result<(), MBTilesError> {
	log::trace!("SQL: {TABLES_QUERY}");

	let count: i64 = conn
		.query_row(TABLES_QUERY, [], |row| row.get(0))
		.map_err(|err| MBTilesError::open(path, err))?;

	if count < 2 {
		return Err(MBTilesError::InvalidContainer(path.to_path_buf()));
	}

	Ok(())
}

/// Sniffs the first tile row the database hands out.
fn detect_tile_info(conn: &Connection, path: &Path) -> Result<TileInfo, MBTilesError> {
	log::trace!("SQL: {SAMPLE_QUERY}");

	let sample = conn
		.query_row(SAMPLE_QUERY, [], |row| Ok(tile_bytes(row.get_ref(0)?)))
		.optional()
		.map_err(|err| MBTilesError::open(path, err))?;

	let data = sample.flatten().unwrap_or_default();
	let info = sniff(&data).map_err(|source| MBTilesError::UnrecognizedFormat {
		path: path.to_path_buf(),
		source,
	})?;

	log::debug!(
		"detected {} tiles ({}, {} px) in {path:?}",
		info.format,
		info.compression,
		info.tile_size
	);

	Ok(info)
}

fn read_metadata_rows(conn: &Connection) -> Result<Vec<(String, String)>, rusqlite::Error> {
	log::trace!("SQL: {METADATA_QUERY}");

	let mut stmt = conn.prepare(METADATA_QUERY)?;
	let rows = stmt.query_map([], |row| {
		Ok((row.get::<_, Option<String>>(0)?, metadata_text(row.get_ref(1)?)))
	})?;

	let mut entries = Vec::new();
	for row in rows {
		if let (Some(name), Some(value)) = row? {
			if !value.is_empty() {
				entries.push((name, value));
			}
		}
	}

	Ok(entries)
}

/// Raw bytes of a `tile_data` value. Numbers are rendered as text.
fn tile_bytes(value: ValueRef<'_>) -> Option<Vec<u8>> {
	match value {
		ValueRef::Null => None,
		ValueRef::Integer(value) => Some(value.to_string().into_bytes()),
		ValueRef::Real(value) => Some(value.to_string().into_bytes()),
		ValueRef::Text(bytes) | ValueRef::Blob(bytes) => Some(bytes.to_vec()),
	}
}

/// Renders a metadata value as text, whatever storage class it was written with.
fn metadata_text(value: ValueRef<'_>) -> Option<String> {
	match value {
		ValueRef::Null => None,
		ValueRef::Integer(value) => Some(value.to_string()),
		ValueRef::Real(value) => Some(value.to_string()),
		ValueRef::Text(bytes) | ValueRef::Blob(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
	}
}

/// Fills in missing `minzoom`/`maxzoom` from the zoom levels actually present in `tiles`.
fn infer_zoom_range(conn: &Connection, metadata: &mut Metadata) -> Result<(), rusqlite::Error> {
	log::trace!("SQL: {ZOOM_RANGE_QUERY}");

	let (min_zoom, max_zoom) = conn.query_row(ZOOM_RANGE_QUERY, [], |row| {
		Ok((row.get::<_, Option<i64>>(0)?, row.get::<_, Option<i64>>(1)?))
	})?;

	let (Some(min_zoom), Some(max_zoom)) = (min_zoom, max_zoom) else {
		return Err(rusqlite::Error::QueryReturnedNoRows);
	};

	if !metadata.contains_key("minzoom") {
		metadata.insert("minzoom", min_zoom);
	}
	if !metadata.contains_key("maxzoom") {
		metadata.insert("maxzoom", max_zoom);
	}

	Ok(())
}

fn truncate_to_seconds(time: SystemTime) -> SystemTime {
	match time.duration_since(UNIX_EPOCH) {
		Ok(since) => UNIX_EPOCH + Duration::from_secs(since.as_secs()),
		Err(before) => UNIX_EPOCH - Duration::from_secs(before.duration().as_secs()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::*;
	use assert_fs::TempDir;
	use mbtiles_core::{FormatError, MetaValue};
	use pretty_assertions::assert_eq;
	use rstest::rstest;
	use std::{
		thread,
		time::{Duration, Instant},
	};

	fn fixture_path(dir: &TempDir, fixture: &MBTilesFixture) -> PathBuf {
		let path = dir.path().join("test.mbtiles");
		fixture.write(&path).unwrap();
		path
	}

	fn open_fixture(fixture: &MBTilesFixture) -> (TempDir, MBTilesStore) {
		let dir = TempDir::new().unwrap();
		let path = fixture_path(&dir, fixture);
		let store = MBTilesStore::open(&path).unwrap();
		(dir, store)
	}

	fn open_err(fixture: &MBTilesFixture) -> MBTilesError {
		let dir = TempDir::new().unwrap();
		let path = fixture_path(&dir, fixture);
		MBTilesStore::open(&path).unwrap_err()
	}

	#[rstest]
	#[case(PNG_256_HEADER, TileFormat::PNG, TileCompression::Uncompressed, 256)]
	#[case(TINY_PNG, TileFormat::PNG, TileCompression::Uncompressed, 1)]
	#[case(JPEG_HEADER, TileFormat::JPG, TileCompression::Uncompressed, 0)]
	#[case(GZIP_PBF, TileFormat::PBF, TileCompression::Gzip, 0)]
	#[case(&[0x78, 0x9c, 0x01, 0x00], TileFormat::PBF, TileCompression::Zlib, 0)]
	fn open_classifies_tiles(
		#[case] payload: &[u8],
		#[case] format: TileFormat,
		#[case] compression: TileCompression,
		#[case] tile_size: u32,
	) {
		let (_dir, store) = open_fixture(&MBTilesFixture::new().tile(0, 0, 0, payload));
		assert_eq!(store.tile_format(), format);
		assert_eq!(store.tile_compression(), compression);
		assert_eq!(store.tile_size(), tile_size);
	}

	#[test]
	fn open_exposes_filename_and_timestamp() {
		let dir = TempDir::new().unwrap();
		let path = fixture_path(&dir, &MBTilesFixture::new().tile(0, 0, 0, GZIP_PBF));
		let store = MBTilesStore::open(&path).unwrap();

		assert_eq!(store.filename(), path.as_path());

		let modified = fs::metadata(&path).unwrap().modified().unwrap();
		let since_epoch = store.timestamp().duration_since(UNIX_EPOCH).unwrap();
		assert_eq!(since_epoch.subsec_nanos(), 0);
		assert!(store.timestamp() <= modified);
		assert!(modified.duration_since(store.timestamp()).unwrap() < Duration::from_secs(1));
	}

	#[test]
	fn open_missing_path() {
		let dir = TempDir::new().unwrap();
		let err = MBTilesStore::open(dir.path().join("missing.mbtiles")).unwrap_err();
		assert!(matches!(err, MBTilesError::NotFound(_)), "{err:?}");
	}

	#[test]
	fn open_refuses_container_with_journal() {
		let dir = TempDir::new().unwrap();
		let path = fixture_path(&dir, &MBTilesFixture::new().tile(0, 0, 0, GZIP_PBF));
		fs::write(crate::journal_path(&path), b"").unwrap();

		let err = MBTilesStore::open(&path).unwrap_err();
		assert!(matches!(err, MBTilesError::IncompleteContainer(_)), "{err:?}");
		assert!(crate::locate(dir.path()).unwrap().is_empty());
	}

	fn assert_fails_fast(path: &Path) {
		let started = Instant::now();
		let err = MBTilesStore::open(path).unwrap_err();
		assert!(matches!(err, MBTilesError::Open { .. }), "{err:?}");
		assert!(started.elapsed() < Duration::from_secs(5), "took {:?}", started.elapsed());
	}

	#[test]
	fn open_rejects_non_database_file() {
		let dir = TempDir::new().unwrap();
		let path = dir.path().join("text.mbtiles");
		fs::write(&path, "this is not a database\n".repeat(300)).unwrap();
		assert_fails_fast(&path);
	}

	#[test]
	fn open_rejects_directory() {
		let dir = TempDir::new().unwrap();
		let path = dir.path().join("folder.mbtiles");
		fs::create_dir(&path).unwrap();
		assert_fails_fast(&path);
	}

	#[rstest]
	#[case(MBTilesFixture::new().tile(0, 0, 0, GZIP_PBF).without_metadata_table())]
	#[case(MBTilesFixture::new().without_tiles_table())]
	#[case(MBTilesFixture::new().without_tiles_table().without_metadata_table())]
	fn open_requires_both_tables(#[case] fixture: MBTilesFixture) {
		let err = open_err(&fixture);
		assert!(matches!(err, MBTilesError::InvalidContainer(_)), "{err:?}");
	}

	#[test]
	fn open_accepts_tiles_view() {
		let dir = TempDir::new().unwrap();
		let path = dir.path().join("view.mbtiles");
		let conn = Connection::open(&path).unwrap();
		conn.execute_batch(
			"CREATE TABLE metadata (name TEXT, value TEXT);
			CREATE TABLE map (zoom_level INTEGER, tile_column INTEGER, tile_row INTEGER, tile_id TEXT);
			CREATE TABLE images (tile_id TEXT, tile_data BLOB);
			CREATE VIEW tiles AS SELECT map.zoom_level AS zoom_level, map.tile_column AS tile_column,
				map.tile_row AS tile_row, images.tile_data AS tile_data
				FROM map JOIN images ON images.tile_id = map.tile_id;
			INSERT INTO map VALUES (2, 1, 3, 'a');
			INSERT INTO images VALUES ('a', X'1f8b0800');",
		)
		.unwrap();
		conn.close().unwrap();

		let store = MBTilesStore::open(&path).unwrap();
		assert_eq!(store.tile_format(), TileFormat::PBF);
		assert_eq!(store.read_tile(&TileCoord::new(2, 1, 3)).unwrap().unwrap().as_slice(), &[0x1f, 0x8b, 0x08, 0x00]);
	}

	#[test]
	fn open_without_tile_rows() {
		let err = open_err(&MBTilesFixture::new().meta("name", "empty"));
		assert!(
			matches!(err, MBTilesError::UnrecognizedFormat { source: FormatError::Empty, .. }),
			"{err:?}"
		);
	}

	#[rstest]
	#[case(b"not a tile")]
	#[case(b"{\"type\":\"Feature\"}")]
	fn open_with_unknown_payload(#[case] payload: &[u8]) {
		let err = open_err(&MBTilesFixture::new().tile(0, 0, 0, payload));
		assert!(
			matches!(err, MBTilesError::UnrecognizedFormat { source: FormatError::Unrecognized { .. }, .. }),
			"{err:?}"
		);
	}

	#[test]
	fn open_with_truncated_png_header() {
		let err = open_err(&MBTilesFixture::new().tile(0, 0, 0, &PNG_256_HEADER[..12]));
		assert!(
			matches!(err, MBTilesError::UnrecognizedFormat { source: FormatError::MalformedHeader { .. }, .. }),
			"{err:?}"
		);
	}

	#[test]
	fn open_with_custom_options() {
		let dir = TempDir::new().unwrap();
		let path = fixture_path(&dir, &MBTilesFixture::new().tile(0, 0, 0, GZIP_PBF));
		let options = OpenOptions::default()
			.max_connections(1)
			.busy_timeout(Duration::from_millis(50));

		let store = MBTilesStore::open_with(&path, &options).unwrap();
		assert!(store.read_tile(&TileCoord::new(0, 0, 0)).unwrap().is_some());
		assert!(store.read_tile(&TileCoord::new(0, 0, 0)).unwrap().is_some());
	}

	#[test]
	fn read_tile_round_trip() {
		let payload = [GZIP_PBF, b"\x1a\x05layer"].concat();
		let (_dir, store) = open_fixture(
			&MBTilesFixture::new()
				.tile(0, 0, 0, GZIP_PBF)
				.tile(14, 8803, 11007, &payload)
				.tile(5, 1, 2, b""),
		);

		let tile = store.read_tile(&TileCoord::new(14, 8803, 11007)).unwrap();
		assert_eq!(tile, Some(Blob::from(&payload)));

		assert_eq!(store.read_tile(&TileCoord::new(14, 8803, 11008)).unwrap(), None);
		assert_eq!(store.read_tile(&TileCoord::new(5, 1, 2)).unwrap(), Some(Blob::new_empty()));
	}

	#[test]
	fn read_tile_does_not_flip_rows() {
		let (_dir, store) = open_fixture(&MBTilesFixture::new().tile(1, 0, 1, GZIP_PBF));
		assert!(store.read_tile(&TileCoord::new(1, 0, 1)).unwrap().is_some());
		assert!(store.read_tile(&TileCoord::new(1, 0, 0)).unwrap().is_none());
	}

	#[test]
	fn read_tile_with_null_data_is_absent() {
		let (_dir, store) = open_fixture(&MBTilesFixture::new().tile(0, 0, 0, GZIP_PBF).null_tile(1, 1, 1));
		assert_eq!(store.read_tile(&TileCoord::new(1, 1, 1)).unwrap(), None);
	}

	#[test]
	fn read_tile_with_text_storage() {
		// lossless WebP header that happens to be plain ASCII, 128 px wide
		let webp = "RIFF\0\0\0\0WEBPVP8L\x05\0\0\0/\x7f\0\0\0";
		let (_dir, store) = open_fixture(&MBTilesFixture::new().text_tile(0, 0, 0, webp).text_tile(1, 0, 0, "abc"));
		assert_eq!(store.tile_format(), TileFormat::WEBP);
		assert_eq!(store.tile_size(), 128);
		assert_eq!(store.read_tile(&TileCoord::new(0, 0, 0)).unwrap(), Some(Blob::from(webp.as_bytes())));
		assert_eq!(store.read_tile(&TileCoord::new(1, 0, 0)).unwrap(), Some(Blob::from(b"abc")));
	}

	#[test]
	fn closed_store_rejects_reads() {
		let (_dir, mut store) = open_fixture(&MBTilesFixture::new().tile(0, 0, 0, GZIP_PBF));
		assert!(!store.is_closed());

		store.close();
		store.close();

		assert!(store.is_closed());
		assert!(matches!(
			store.read_tile(&TileCoord::new(0, 0, 0)),
			Err(MBTilesError::ClosedHandle)
		));
		assert!(matches!(store.read_metadata(), Err(MBTilesError::ClosedHandle)));
		assert_eq!(store.tile_format(), TileFormat::PBF);
	}

	#[test]
	fn read_metadata_decodes_values() {
		let (_dir, store) = open_fixture(
			&MBTilesFixture::new()
				.tile(0, 0, 0, GZIP_PBF)
				.meta("name", "Berlin")
				.meta("minzoom", "0")
				.meta("maxzoom", "14")
				.meta("bounds", "-1.5, 2.25,10,-3")
				.meta("json", r#"{"vector_layers":[{"id":"streets"}]}"#),
		);

		let metadata = store.read_metadata().unwrap();
		assert_eq!(metadata.text("name"), Some("Berlin"));
		assert_eq!(metadata.min_zoom(), Some(0));
		assert_eq!(metadata.max_zoom(), Some(14));
		assert_eq!(metadata.floats("bounds"), Some(&[-1.5, 2.25, 10.0, -3.0][..]));
		assert_eq!(
			metadata.get("vector_layers"),
			Some(&MetaValue::Json(serde_json::json!([{ "id": "streets" }])))
		);
	}

	#[test]
	fn read_metadata_skips_empty_and_null_values() {
		let (_dir, store) = open_fixture(
			&MBTilesFixture::new()
				.tile(0, 0, 0, GZIP_PBF)
				.meta("description", "")
				.meta("bounds", "")
				.null_meta("attribution")
				.meta("name", "x"),
		);

		let metadata = store.read_metadata().unwrap();
		assert_eq!(metadata.keys().collect::<Vec<_>>(), vec!["maxzoom", "minzoom", "name"]);
	}

	#[test]
	fn read_metadata_accepts_integer_storage() {
		let (_dir, store) = open_fixture(
			&MBTilesFixture::new()
				.tile(4, 0, 0, GZIP_PBF)
				.meta_integer("minzoom", 2)
				.meta_integer("maxzoom", 12),
		);

		let metadata = store.read_metadata().unwrap();
		assert_eq!(metadata.min_zoom(), Some(2));
		assert_eq!(metadata.max_zoom(), Some(12));
	}

	#[test]
	fn read_metadata_infers_missing_zoom_levels() {
		let (_dir, store) = open_fixture(
			&MBTilesFixture::new()
				.tile(3, 1, 1, GZIP_PBF)
				.tile(9, 100, 200, GZIP_PBF)
				.tile(5, 2, 7, GZIP_PBF)
				.meta("name", "no zoom"),
		);

		let metadata = store.read_metadata().unwrap();
		assert_eq!(metadata.min_zoom(), Some(3));
		assert_eq!(metadata.max_zoom(), Some(9));
	}

	#[test]
	fn read_metadata_infers_only_the_missing_key() {
		let (_dir, store) = open_fixture(
			&MBTilesFixture::new()
				.tile(3, 1, 1, GZIP_PBF)
				.tile(9, 100, 200, GZIP_PBF)
				.meta("minzoom", "5"),
		);

		let metadata = store.read_metadata().unwrap();
		assert_eq!(metadata.min_zoom(), Some(5));
		assert_eq!(metadata.max_zoom(), Some(9));
	}

	#[test]
	fn read_metadata_reads_zoom_from_json_entry() {
		let (_dir, store) = open_fixture(
			&MBTilesFixture::new()
				.tile(4, 0, 0, GZIP_PBF)
				.tile(9, 0, 0, GZIP_PBF)
				.meta("json", r#"{"minzoom": 2}"#),
		);

		let metadata = store.read_metadata().unwrap();
		assert_eq!(metadata.get("minzoom"), Some(&MetaValue::Json(serde_json::json!(2))));
		assert_eq!(metadata.min_zoom(), Some(2));
		assert_eq!(metadata.max_zoom(), Some(9));
	}

	#[test]
	fn read_metadata_discards_failed_zoom_inference() {
		let dir = TempDir::new().unwrap();
		let path = fixture_path(&dir, &MBTilesFixture::new().tile(3, 0, 0, GZIP_PBF).meta("name", "x"));
		let store = MBTilesStore::open(&path).unwrap();

		let writer = Connection::open(&path).unwrap();
		writer
			.execute_batch("ALTER TABLE tiles RENAME COLUMN zoom_level TO level;")
			.unwrap();
		writer.close().unwrap();

		let metadata = store.read_metadata().unwrap();
		assert_eq!(metadata.text("name"), Some("x"));
		assert!(!metadata.contains_key("minzoom"));
		assert!(!metadata.contains_key("maxzoom"));
	}

	#[test]
	fn read_metadata_fails_on_malformed_value() {
		let (_dir, store) = open_fixture(&MBTilesFixture::new().tile(0, 0, 0, GZIP_PBF).meta("maxzoom", "high"));
		let err = store.read_metadata().unwrap_err();
		assert!(matches!(err, MBTilesError::Decode(_)), "{err:?}");
	}

	#[test]
	fn store_is_shareable_between_threads() {
		fn assert_send_sync<T: Send + Sync>() {}
		assert_send_sync::<MBTilesStore>();

		let mut fixture = MBTilesFixture::new();
		for x in 0..16 {
			fixture = fixture.tile(4, x, x, &[GZIP_PBF, &[x as u8]].concat());
		}
		let (_dir, store) = open_fixture(&fixture);

		thread::scope(|scope| {
			for x in 0..16u32 {
				let store = &store;
				scope.spawn(move || {
					let tile = store.read_tile(&TileCoord::new(4, x, x)).unwrap().unwrap();
					assert_eq!(tile.as_slice().last(), Some(&(x as u8)));
				});
			}
		});
	}

	#[test]
	fn debug_output() {
		let (_dir, store) = open_fixture(&MBTilesFixture::new().tile(0, 0, 0, PNG_256_HEADER));
		let debug = format!("{store:?}");
		assert!(debug.starts_with("MBTilesStore { filename: "));
		assert!(debug.ends_with(
			"info: TileInfo { format: PNG, compression: Uncompressed, tile_size: 256 }, closed: false }"
		));
	}

	#[test]
	fn truncates_sub_second_precision() {
		let time = UNIX_EPOCH + Duration::from_millis(1_700_000_000_999);
		assert_eq!(truncate_to_seconds(time), UNIX_EPOCH + Duration::from_secs(1_700_000_000));
	}
}
