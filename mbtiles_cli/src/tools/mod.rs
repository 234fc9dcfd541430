pub mod list;
pub mod meta;
pub mod probe;
pub mod tile;
