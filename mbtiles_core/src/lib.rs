//! Contains the tile types, the byte-level format sniffer and the metadata decoder
//! shared by the MBTiles container crate.

pub mod metadata;
pub use metadata::{MetaValue, Metadata, MetadataError, decode_metadata};

pub mod sniff;
pub use sniff::{FormatError, TileInfo, sniff};

pub mod types;
pub use types::*;
