use mbtiles_core::{FormatError, MetadataError};
use r2d2_sqlite::rusqlite;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating, opening or reading MBTiles containers.
#[derive(Debug, Error)]
pub enum MBTilesError {
	#[error("path does not exist: {0:?}")]
	NotFound(PathBuf),

	#[error("refusing to open {0:?}: a -journal file exists (incomplete tileset)")]
	IncompleteContainer(PathBuf),

	#[error("cannot open {path:?}")]
	Open {
		path: PathBuf,
		#[source]
		source: Box<dyn std::error::Error + Send + Sync>,
	},

	#[error("invalid container {0:?}: missing one or more required tables: tiles, metadata")]
	InvalidContainer(PathBuf),

	#[error("cannot detect tile format of {path:?}")]
	UnrecognizedFormat {
		path: PathBuf,
		#[source]
		source: FormatError,
	},

	#[error("cannot read from closed mbtiles container")]
	ClosedHandle,

	#[error("cannot decode metadata")]
	Decode(#[from] MetadataError),

	#[error("query failed")]
	Query(#[from] rusqlite::Error),

	#[error("cannot get a database connection")]
	Pool(#[from] r2d2::Error),

	#[error("cannot access {path:?}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("cannot walk directory")]
	Walk(#[from] walkdir::Error),
}

impl MBTilesError {
	pub(crate) fn open(path: impl Into<PathBuf>, source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
		MBTilesError::Open {
			path: path.into(),
			source: source.into(),
		}
	}
}
