//! Typed representation of the MBTiles `metadata` table.
//!
//! The table stores every value as text. [`decode_metadata`] turns the raw `(name, value)` rows
//! into a [`Metadata`] mapping of [`MetaValue`]s:
//!
//! | key                  | decoded as                                       |
//! |----------------------|--------------------------------------------------|
//! | `minzoom`, `maxzoom` | [`MetaValue::Integer`]                           |
//! | `bounds`, `center`   | [`MetaValue::Floats`]                            |
//! | `json`               | top-level fields merged as [`MetaValue::Json`]   |
//! | anything else        | [`MetaValue::Text`]                              |

mod decode;
mod value;

pub use decode::*;
pub use value::*;
