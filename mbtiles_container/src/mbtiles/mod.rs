//! `SQLite` file `*.mbtiles` as read-only tile container
//!
//! [`MBTilesStore`] validates the container layout, sniffs the tile format once at open time and
//! serves point lookups of tiles and the decoded `metadata` table.

mod store;

pub use store::MBTilesStore;
