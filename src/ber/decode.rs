//! BER decoding.
//!
//! A small zero-copy decoder over [`Bytes`]. Octet strings are returned as
//! slices of the input buffer. Parsing is permissive where net-snmp is
//! (leading zero octets in integers are accepted) and strict where the USM
//! wire format requires it (definite lengths only, no constructed strings).

use super::length::decode_length;
use super::tag;
use crate::error::{DecodeErrorKind, Error, Result};
use bytes::Bytes;

/// BER decoder over a byte buffer.
#[derive(Debug, Clone)]
pub struct Decoder {
    data: Bytes,
    pos: usize,
    /// Absolute offset of `data[0]` within the outermost buffer.
    base: usize,
}

impl Decoder {
    /// Create a decoder over the given bytes.
    pub fn new(data: Bytes) -> Self {
        Self {
            data,
            pos: 0,
            base: 0,
        }
    }

    /// Create a decoder from a byte slice (copies the data).
    pub fn from_slice(data: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(data))
    }

    /// Absolute offset of the next unread byte.
    pub fn offset(&self) -> usize {
        self.base + self.pos
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Check if all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Peek at the next tag without consuming it.
    pub fn peek_tag(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Read a single tag byte.
    pub fn read_tag(&mut self) -> Result<u8> {
        let tag = self
            .peek_tag()
            .ok_or_else(|| Error::decode(self.offset(), DecodeErrorKind::TruncatedData))?;
        self.pos += 1;
        Ok(tag)
    }

    /// Read a BER length.
    pub fn read_length(&mut self) -> Result<usize> {
        let (len, consumed) = decode_length(&self.data[self.pos..], self.offset())?;
        self.pos += consumed;
        Ok(len)
    }

    /// Read a TLV with the expected tag and return its value bytes.
    fn read_tlv(&mut self, expected: u8) -> Result<Bytes> {
        let tag_offset = self.offset();
        let actual = self.read_tag()?;
        if actual != expected {
            let kind = if expected == tag::universal::OCTET_STRING
                && actual == tag::universal::OCTET_STRING_CONSTRUCTED
            {
                DecodeErrorKind::ConstructedOctetString
            } else {
                DecodeErrorKind::UnexpectedTag { expected, actual }
            };
            return Err(Error::decode(tag_offset, kind));
        }

        let len = self.read_length()?;
        if len > self.remaining() {
            return Err(Error::decode(self.offset(), DecodeErrorKind::TlvOverflow));
        }

        let value = self.data.slice(self.pos..self.pos + len);
        self.pos += len;
        Ok(value)
    }

    /// Read a SEQUENCE and return a decoder over its contents.
    pub fn read_sequence(&mut self) -> Result<Decoder> {
        let contents = self.read_tlv(tag::universal::SEQUENCE)?;
        Ok(Decoder {
            base: self.offset() - contents.len(),
            data: contents,
            pos: 0,
        })
    }

    /// Read an OCTET STRING.
    pub fn read_octet_string(&mut self) -> Result<Bytes> {
        self.read_tlv(tag::universal::OCTET_STRING)
    }

    /// Read an INTEGER that must be a non-negative value fitting in 32 bits.
    pub fn read_unsigned32(&mut self) -> Result<u32> {
        let value = self.read_tlv(tag::universal::INTEGER)?;
        let value_offset = self.offset() - value.len();

        let Some(&first) = value.first() else {
            return Err(Error::decode(
                value_offset,
                DecodeErrorKind::ZeroLengthInteger,
            ));
        };
        if first & 0x80 != 0 {
            return Err(Error::decode(
                value_offset,
                DecodeErrorKind::NegativeInteger,
            ));
        }

        let significant: &[u8] = {
            let skip = value.iter().take_while(|b| **b == 0).count();
            &value[skip..]
        };
        if significant.len() > 4 {
            return Err(Error::decode(
                value_offset,
                DecodeErrorKind::IntegerOverflow,
            ));
        }

        Ok(significant
            .iter()
            .fold(0u32, |acc, b| (acc << 8) | *b as u32))
    }

    /// Fail if any bytes remain unread.
    pub fn expect_end(&self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::decode(
                self.offset(),
                DecodeErrorKind::TrailingData {
                    remaining: self.remaining(),
                },
            ))
        }
    }
}
