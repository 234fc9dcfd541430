use super::{FormatError, malformed};
use crate::TileFormat;
use byteorder::{ByteOrder, LittleEndian};

const VP8_START_CODE: [u8; 3] = [0x9d, 0x01, 0x2a];
const VP8L_SIGNATURE: u8 = 0x2f;

/// Reads the width from the first chunk after the `RIFF....WEBP` header.
///
/// - `VP8 `: 14 bit width after the frame tag and start code
/// - `VP8L`: 14 bit `width - 1` after the signature byte
/// - `VP8X`: 24 bit `canvas width - 1` after flags and reserved bytes
pub(super) fn width(data: &[u8]) -> Result<u32, FormatError> {
	let chunk = data
		.get(12..16)
		.ok_or_else(|| malformed(TileFormat::WEBP, "truncated before first chunk"))?;

	match chunk {
		b"VP8 " => {
			let frame = data
				.get(23..30)
				.ok_or_else(|| malformed(TileFormat::WEBP, "truncated VP8 frame header"))?;
			if frame[..3] != VP8_START_CODE {
				return Err(malformed(TileFormat::WEBP, "missing VP8 start code"));
			}
			match LittleEndian::read_u16(&frame[3..5]) & 0x3fff {
				0 => Err(malformed(TileFormat::WEBP, "zero width")),
				value => Ok(u32::from(value)),
			}
		}
		b"VP8L" => {
			let header = data
				.get(20..25)
				.ok_or_else(|| malformed(TileFormat::WEBP, "truncated VP8L header"))?;
			if header[0] != VP8L_SIGNATURE {
				return Err(malformed(TileFormat::WEBP, "missing VP8L signature"));
			}
			Ok((LittleEndian::read_u32(&header[1..5]) & 0x3fff) + 1)
		}
		b"VP8X" => {
			let canvas = data
				.get(24..30)
				.ok_or_else(|| malformed(TileFormat::WEBP, "truncated VP8X header"))?;
			Ok(LittleEndian::read_u24(&canvas[0..3]) + 1)
		}
		_ => Err(malformed(TileFormat::WEBP, "unknown first chunk")),
	}
}
