use super::{FormatError, malformed};
use crate::TileFormat;
use byteorder::{BigEndian, ByteOrder};

// signature (8) + chunk length (4) + chunk type (4) + width (4) + height (4)
const HEADER_END: usize = 24;

/// Reads the width from the IHDR chunk, which must directly follow the signature.
pub(super) fn width(data: &[u8]) -> Result<u32, FormatError> {
	let header = data
		.get(8..HEADER_END)
		.ok_or_else(|| malformed(TileFormat::PNG, "truncated before end of IHDR"))?;

	if &header[4..8] != b"IHDR" {
		return Err(malformed(TileFormat::PNG, "first chunk is not IHDR"));
	}

	match BigEndian::read_u32(&header[8..12]) {
		0 => Err(malformed(TileFormat::PNG, "zero width")),
		value => Ok(value),
	}
}
