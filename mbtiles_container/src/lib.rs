//! Read-only access to MBTiles containers.
//!
//! - [`locate`] finds the containers below a directory, skipping any that are still being written.
//! - [`MBTilesStore`] opens one container, validates its structure, classifies its tiles once and
//!   then serves tile and metadata lookups.
//!
//! ```rust,no_run
//! use mbtiles_container::{MBTilesStore, locate};
//! use mbtiles_core::TileCoord;
//!
//! # fn main() -> Result<(), mbtiles_container::MBTilesError> {
//! for path in locate("/data/tiles")? {
//!     let mut store = MBTilesStore::open(&path)?;
//!     println!("{}: {} ({} px)", store.filename().display(), store.tile_format(), store.tile_size());
//!     if let Some(blob) = store.read_tile(&TileCoord::new(0, 0, 0))? {
//!         println!("root tile has {} bytes", blob.len());
//!     }
//!     store.close();
//! }
//! # Ok(())
//! # }
//! ```

mod error;
pub use error::*;

mod locate;
pub use locate::*;

mod mbtiles;
pub use mbtiles::*;

mod options;
pub use options::*;

#[cfg(any(test, feature = "test"))]
pub mod testing;
