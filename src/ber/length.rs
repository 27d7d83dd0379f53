//! BER length encoding (X.690 Section 8.1.3).
//!
//! Short form is used below 128, long form with the minimal number of
//! length octets otherwise. Indefinite length is never produced and is
//! rejected on decode.

use crate::error::{DecodeErrorKind, EncodeErrorKind, Error, Result};

/// Largest content length that can be encoded (four length octets).
pub const MAX_LENGTH: usize = u32::MAX as usize;

/// Encode a length in BER form.
///
/// Returns a stack-allocated array and the number of valid bytes. The bytes
/// are in REVERSE order, ready to be pushed onto an [`EncodeBuf`](super::EncodeBuf).
pub fn encode_length(len: usize) -> Result<([u8; 5], usize)> {
    if len > MAX_LENGTH {
        return Err(Error::encode(EncodeErrorKind::LengthTooLarge {
            length: len,
            max: MAX_LENGTH,
        }));
    }

    if len < 0x80 {
        return Ok(([len as u8, 0, 0, 0, 0], 1));
    }

    let bytes = (len as u32).to_be_bytes();
    let skip = bytes.iter().take_while(|b| **b == 0).count();
    let octets = 4 - skip;

    let mut out = [0u8; 5];
    for (i, byte) in bytes[skip..].iter().rev().enumerate() {
        out[i] = *byte;
    }
    out[octets] = 0x80 | octets as u8;
    Ok((out, octets + 1))
}

/// Number of bytes the BER length prefix for `len` occupies.
pub fn length_size(len: usize) -> Result<usize> {
    encode_length(len).map(|(_, count)| count)
}

/// Decode a BER length from the start of `data`.
///
/// Returns the decoded length and the number of bytes consumed. `offset` is
/// only used for error reporting.
pub fn decode_length(data: &[u8], offset: usize) -> Result<(usize, usize)> {
    let first = *data
        .first()
        .ok_or_else(|| Error::decode(offset, DecodeErrorKind::TruncatedData))?;

    if first < 0x80 {
        return Ok((first as usize, 1));
    }
    if first == 0x80 {
        return Err(Error::decode(offset, DecodeErrorKind::IndefiniteLength));
    }
    if first == 0xFF {
        // Reserved by X.690 8.1.3.5(c)
        return Err(Error::decode(offset, DecodeErrorKind::InvalidLength));
    }

    let octets = (first & 0x7F) as usize;
    if octets > 4 {
        return Err(Error::decode(
            offset,
            DecodeErrorKind::LengthTooLong { octets },
        ));
    }
    if data.len() < 1 + octets {
        return Err(Error::decode(offset, DecodeErrorKind::TruncatedData));
    }

    let len = data[1..=octets]
        .iter()
        .fold(0usize, |acc, b| (acc << 8) | *b as usize);
    Ok((len, 1 + octets))
}
