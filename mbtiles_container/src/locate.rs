use crate::MBTilesError;
use std::{
	ffi::OsString,
	path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Suffix of the SQLite rollback journal that marks a container as still being written.
pub const JOURNAL_SUFFIX: &str = "-journal";

const EXTENSION: &str = "mbtiles";

/// Returns the path of the journal file belonging to `path`.
pub fn journal_path(path: &Path) -> PathBuf {
	let mut name = OsString::from(path.as_os_str());
	name.push(JOURNAL_SUFFIX);
	PathBuf::from(name)
}

/// Whether a journal file exists next to `path`.
pub fn has_journal(path: &Path) -> bool {
	journal_path(path).exists()
}

/// Recursively finds all `*.mbtiles` files below `root`.
///
/// Containers with an associated `-journal` file are skipped. Paths are returned in walk order.
/// The first traversal error aborts the walk.
pub fn locate(root: impl AsRef<Path>) -> Result<Vec<PathBuf>, MBTilesError> {
	let root = root.as_ref();
	log::debug!("locate containers below {root:?}");

	let mut paths = Vec::new();
	for entry in WalkDir::new(root) {
		let entry = entry?;
		if entry.file_type().is_dir() {
			continue;
		}

		let path = entry.path();
		if path.extension().is_none_or(|extension| extension != EXTENSION) {
			continue;
		}

		if has_journal(path) {
			log::debug!("skip {path:?}: incomplete tileset");
			continue;
		}

		paths.push(entry.into_path());
	}

	log::trace!("found {} containers", paths.len());

	Ok(paths)
}
