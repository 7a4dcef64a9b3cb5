//! Minimal DER engine.
//!
//! Length and tag primitives plus the handful of builders (`SEQUENCE`, `INTEGER`, `OCTET STRING`,
//! `BIT STRING`, `OBJECT IDENTIFIER`) the key and signature layers need. Decoding is strict DER:
//! indefinite lengths, non-minimal long-form lengths and lengths running past the end of the
//! input are rejected with [`ErrorKind::Format`](crate::ErrorKind::Format) errors.
//!
//! Object identifiers are handled as their pre-encoded value bytes; arc conversion is out of scope.
use crate::{utilities::strip_leading_zeros, CodecError, CodecResult};
use core::ops::Range;
use std::vec::Vec;

/// `INTEGER` tag.
pub const INTEGER: u8 = 0x02;
/// `BIT STRING` tag.
pub const BIT_STRING: u8 = 0x03;
/// `OCTET STRING` tag.
pub const OCTET_STRING: u8 = 0x04;
/// `OBJECT IDENTIFIER` tag.
pub const OBJECT_IDENTIFIER: u8 = 0x06;
/// Constructed `SEQUENCE` tag.
pub const SEQUENCE: u8 = 0x30;
/// Constructed, context-specific `[0]` tag.
pub const CONTEXT_SPECIFIC_0: u8 = 0xA0;
/// Constructed, context-specific `[1]` tag.
pub const CONTEXT_SPECIFIC_1: u8 = 0xA1;

/// Largest length the engine encodes or accepts.
pub const MAX_LENGTH: usize = 0x7FFF_FFFF;

/// Decodes the length field at `offset` without checking that the content is present.
///
/// Returns the decoded length and the offset of the first content byte.
pub fn decode_length(buf: &[u8], offset: usize) -> CodecResult<(usize, usize)> {
    let first = *buf.get(offset).ok_or(CodecError::Truncated { offset })?;
    let start = offset + 1;

    if first & 0x80 == 0 {
        return Ok((first as usize, start));
    }

    let count = (first & 0x7F) as usize;
    if count == 0 {
        return Err(CodecError::IndefiniteLength { offset });
    }
    if count > 4 {
        return Err(CodecError::LengthOverflow { offset });
    }

    let bytes = buf
        .get(start..start + count)
        .ok_or(CodecError::Truncated { offset: buf.len() })?;
    if bytes[0] == 0 {
        return Err(CodecError::NonMinimalLength { offset });
    }

    let length = bytes
        .iter()
        .fold(0u64, |acc, &byte| (acc << 8) | byte as u64);
    if length > MAX_LENGTH as u64 {
        return Err(CodecError::LengthOverflow { offset });
    }
    if length < 0x80 {
        return Err(CodecError::NonMinimalLength { offset });
    }

    Ok((length as usize, start + count))
}

/// Reads the length field at `offset` and checks that that many content bytes follow it.
///
/// Returns the length and the offset of the first content byte.
pub fn read_length(buf: &[u8], offset: usize) -> CodecResult<(usize, usize)> {
    let (length, start) = decode_length(buf, offset)?;
    if length > buf.len() - start {
        return Err(CodecError::Truncated { offset: buf.len() });
    }
    Ok((length, start))
}

/// Encodes `length` in the shortest DER form.
pub fn encode_length(length: usize) -> CodecResult<Vec<u8>> {
    if length > MAX_LENGTH {
        return Err(CodecError::TooLong {
            what: "DER length",
            max: MAX_LENGTH,
            actual: length,
        });
    }
    if length < 0x80 {
        return Ok(vec![length as u8]);
    }

    let bytes = (length as u32).to_be_bytes();
    let significant = strip_leading_zeros(&bytes);
    let mut out = Vec::with_capacity(1 + significant.len());
    out.push(0x80 | significant.len() as u8);
    out.extend_from_slice(significant);
    Ok(out)
}

/// Reads the TLV at `offset`, requiring `expected_tag`.
///
/// Returns the range of the value within `buf` and the offset just past it.
pub fn read_tlv(buf: &[u8], offset: usize, expected_tag: u8) -> CodecResult<(Range<usize>, usize)> {
    let found = *buf.get(offset).ok_or(CodecError::Truncated { offset })?;
    if found != expected_tag {
        tracing::trace!(offset, expected_tag, found, "unexpected DER tag");
        return Err(CodecError::UnexpectedTag {
            offset,
            expected: expected_tag,
            found,
        });
    }
    let (length, start) = read_length(buf, offset + 1)?;
    Ok((start..start + length, start + length))
}

/// `tag || length || value`.
pub fn encode_tlv(tag: u8, value: &[u8]) -> CodecResult<Vec<u8>> {
    let length = encode_length(value.len())?;
    let mut out = Vec::with_capacity(1 + length.len() + value.len());
    out.push(tag);
    out.extend_from_slice(&length);
    out.extend_from_slice(value);
    Ok(out)
}

/// `SEQUENCE` over the concatenation of already encoded `items`.
pub fn encode_sequence<I, T>(items: I) -> CodecResult<Vec<u8>>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let content = items.into_iter().fold(Vec::new(), |mut acc, item| {
        acc.extend_from_slice(item.as_ref());
        acc
    });
    encode_tlv(SEQUENCE, &content)
}

/// `OBJECT IDENTIFIER` from pre-encoded value bytes.
pub fn encode_oid(oid: &[u8]) -> CodecResult<Vec<u8>> {
    if oid.is_empty() {
        return Err(CodecError::EmptyValue("object identifier"));
    }
    encode_tlv(OBJECT_IDENTIFIER, oid)
}

/// `INTEGER` holding the unsigned big-endian `magnitude`.
///
/// Leading zeroes are stripped and a single `0x00` is prepended when the high bit of the first
/// remaining byte is set, so the value never reads as negative.
pub fn encode_integer(magnitude: &[u8]) -> CodecResult<Vec<u8>> {
    if magnitude.is_empty() {
        return Err(CodecError::EmptyValue("integer"));
    }
    let magnitude = strip_leading_zeros(magnitude);
    if magnitude[0] & 0x80 == 0 {
        return encode_tlv(INTEGER, magnitude);
    }

    let mut guarded = Vec::with_capacity(magnitude.len() + 1);
    guarded.push(0);
    guarded.extend_from_slice(magnitude);
    encode_tlv(INTEGER, &guarded)
}

/// `OCTET STRING`.
pub fn encode_octet_string(value: &[u8]) -> CodecResult<Vec<u8>> {
    encode_tlv(OCTET_STRING, value)
}

/// `BIT STRING` with zero unused bits.
pub fn encode_bit_string(bits: &[u8]) -> CodecResult<Vec<u8>> {
    let mut value = Vec::with_capacity(bits.len() + 1);
    value.push(0);
    value.extend_from_slice(bits);
    encode_tlv(BIT_STRING, &value)
}

/// Cursor over a DER buffer.
///
/// Nested readers created with [`DerReader::read_nested`] report offsets relative to the
/// outermost buffer.
#[derive(Clone, Debug)]
pub struct DerReader<'a> {
    buf: &'a [u8],
    pos: usize,
    base: usize,
}

impl<'a> DerReader<'a> {
    /// Creates a reader at the start of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            base: 0,
        }
    }

    /// Absolute offset of the cursor.
    pub fn offset(&self) -> usize {
        self.base + self.pos
    }

    /// Returns `true` if every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos == self.buf.len()
    }

    /// Tag of the next TLV, if any.
    pub fn peek_tag(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    /// Reads a TLV with tag `tag` and returns its value.
    pub fn read_tlv(&mut self, tag: u8) -> CodecResult<&'a [u8]> {
        let (value, next) = read_tlv(self.buf, self.pos, tag).map_err(|e| self.rebase(e))?;
        self.pos = next;
        Ok(&self.buf[value])
    }

    /// Reads a TLV with tag `tag` and returns a reader over its value.
    pub fn read_nested(&mut self, tag: u8) -> CodecResult<DerReader<'a>> {
        let (value, next) = read_tlv(self.buf, self.pos, tag).map_err(|e| self.rebase(e))?;
        self.pos = next;
        Ok(DerReader {
            base: self.base + value.start,
            buf: &self.buf[value],
            pos: 0,
        })
    }

    /// Reads an `OBJECT IDENTIFIER` and compares its value bytes against `expected`.
    pub fn read_oid(&mut self, expected: &[u8], which: &'static str) -> CodecResult<()> {
        let oid = self.read_tlv(OBJECT_IDENTIFIER)?;
        if oid != expected {
            tracing::debug!(which, "object identifier mismatch");
            return Err(CodecError::OidMismatch(which));
        }
        Ok(())
    }

    /// Reads a single byte `INTEGER` and returns it.
    pub fn read_small_integer(&mut self, what: &'static str) -> CodecResult<u8> {
        match self.read_tlv(INTEGER)? {
            [value] if *value < 0x80 => Ok(*value),
            _ => Err(CodecError::UnsupportedVersion(what)),
        }
    }

    /// Fails if any bytes are left.
    pub fn finish(self) -> CodecResult<()> {
        if !self.is_empty() {
            return Err(CodecError::TrailingData {
                offset: self.offset(),
                count: self.buf.len() - self.pos,
            });
        }
        Ok(())
    }

    fn rebase(&self, err: CodecError) -> CodecError {
        let base = self.base;
        match err {
            CodecError::Truncated { offset } => CodecError::Truncated {
                offset: base + offset,
            },
            CodecError::UnexpectedTag {
                offset,
                expected,
                found,
            } => CodecError::UnexpectedTag {
                offset: base + offset,
                expected,
                found,
            },
            CodecError::IndefiniteLength { offset } => CodecError::IndefiniteLength {
                offset: base + offset,
            },
            CodecError::NonMinimalLength { offset } => CodecError::NonMinimalLength {
                offset: base + offset,
            },
            CodecError::LengthOverflow { offset } => CodecError::LengthOverflow {
                offset: base + offset,
            },
            other => other,
        }
    }
}
