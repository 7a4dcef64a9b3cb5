//! Error taxonomy shared by every conversion in the crate.
//!
//! Each [`CodecError`] maps onto exactly one [`ErrorKind`], which is the stable discriminator
//! callers should match on. The variants themselves carry context for diagnostics and may grow.

/// A codec operation result type.
pub type CodecResult<T> = Result<T, CodecError>;

/// Category of a [`CodecError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// Structural problem: wrong tag, truncated buffer, non-canonical length, trailing bytes.
    Format,
    /// Algorithm or curve identifier does not match the SM2 constants.
    Oid,
    /// Well-formed input carrying an unacceptable value.
    Value,
    /// A fixed-size field has the wrong size.
    Length,
}

/// Codec error type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum CodecError {
    /// Input ended before the structure did.
    #[error("unexpected end of input at offset {offset}")]
    Truncated {
        /// Offset of the first missing byte.
        offset: usize,
    },
    /// A TLV carried a different tag than the structure requires.
    #[error("expected tag {expected:#04x} at offset {offset}, found {found:#04x}")]
    UnexpectedTag {
        /// Offset of the tag byte.
        offset: usize,
        /// Tag required at this position.
        expected: u8,
        /// Tag actually present.
        found: u8,
    },
    /// Length byte `0x80`, allowed in BER but not in DER.
    #[error("indefinite length at offset {offset}")]
    IndefiniteLength {
        /// Offset of the length byte.
        offset: usize,
    },
    /// Long-form length that could have been encoded shorter.
    #[error("non-minimal length encoding at offset {offset}")]
    NonMinimalLength {
        /// Offset of the length byte.
        offset: usize,
    },
    /// Length larger than `0x7FFFFFFF`.
    #[error("length at offset {offset} overflows")]
    LengthOverflow {
        /// Offset of the length byte.
        offset: usize,
    },
    /// Bytes left over after a complete structure.
    #[error("{count} trailing bytes at offset {offset}")]
    TrailingData {
        /// Offset of the first unexpected byte.
        offset: usize,
        /// Number of unexpected bytes.
        count: usize,
    },
    /// A value that must hold at least one byte is empty.
    #[error("empty {0}")]
    EmptyValue(&'static str),
    /// Version field outside of the supported set.
    #[error("unsupported {0} version")]
    UnsupportedVersion(&'static str),
    /// BIT STRING whose unused-bits byte is not zero.
    #[error("bit string declares {0} unused bits")]
    UnusedBits(u8),
    /// Public key point is not in uncompressed form.
    #[error("expected uncompressed point marker 0x04, found {0:#04x}")]
    PointMarker(u8),
    /// Object identifier differs from the expected constant.
    #[error("{0} OID mismatch")]
    OidMismatch(&'static str),
    /// Fixed-size field with the wrong size.
    #[error("{what} must be {expected} bytes, got {actual}")]
    InvalidLength {
        /// Field name.
        what: &'static str,
        /// Required size.
        expected: usize,
        /// Actual size.
        actual: usize,
    },
    /// Variable-size field exceeding its maximum size.
    #[error("{what} exceeds {max} bytes, got {actual}")]
    TooLong {
        /// Field name.
        what: &'static str,
        /// Maximum size.
        max: usize,
        /// Actual size.
        actual: usize,
    },
    /// Coordinate is not below the field prime.
    #[error("coordinate is not less than the field prime")]
    CoordinateOutOfRange,
    /// `(0, 0)`, the encoding of the point at infinity.
    #[error("point at infinity")]
    PointAtInfinity,
    /// Compressed point prefix other than `0x02` or `0x03`.
    #[error("invalid compressed point prefix {0:#04x}")]
    InvalidPrefix(u8),
    /// `x^3 + ax + b` has no square root modulo the field prime.
    #[error("point is not on the curve")]
    NotOnCurve,
    /// Modulus is zero, or not an odd prime where one is required.
    #[error("invalid modulus")]
    InvalidModulus,
    /// Operand not reduced modulo the modulus.
    #[error("operand is not less than the modulus")]
    OperandOutOfRange,
}

impl CodecError {
    /// Returns the category of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Truncated { .. }
            | Self::UnexpectedTag { .. }
            | Self::IndefiniteLength { .. }
            | Self::NonMinimalLength { .. }
            | Self::LengthOverflow { .. }
            | Self::TrailingData { .. }
            | Self::EmptyValue(_)
            | Self::UnsupportedVersion(_)
            | Self::UnusedBits(_)
            | Self::PointMarker(_) => ErrorKind::Format,
            Self::OidMismatch(_) => ErrorKind::Oid,
            Self::InvalidLength { .. } | Self::TooLong { .. } => ErrorKind::Length,
            Self::CoordinateOutOfRange
            | Self::PointAtInfinity
            | Self::InvalidPrefix(_)
            | Self::NotOnCurve
            | Self::InvalidModulus
            | Self::OperandOutOfRange => ErrorKind::Value,
        }
    }

    /// Returns `true` if the error is structural.
    pub const fn is_format(&self) -> bool {
        matches!(self.kind(), ErrorKind::Format)
    }

    /// Shorthand for [`CodecError::InvalidLength`].
    pub const fn invalid_length(what: &'static str, expected: usize, actual: usize) -> Self {
        Self::InvalidLength {
            what,
            expected,
            actual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(CodecError::IndefiniteLength { offset: 1 }.kind(), ErrorKind::Format);
        assert_eq!(CodecError::OidMismatch("curve").kind(), ErrorKind::Oid);
        assert_eq!(CodecError::NotOnCurve.kind(), ErrorKind::Value);
        assert_eq!(CodecError::invalid_length("d", 32, 31).kind(), ErrorKind::Length);
        assert!(CodecError::Truncated { offset: 0 }.is_format());
        assert!(!CodecError::PointAtInfinity.is_format());
    }

    #[test]
    fn display() {
        assert_eq!(
            CodecError::UnexpectedTag {
                offset: 2,
                expected: 0x30,
                found: 0x02
            }
            .to_string(),
            "expected tag 0x30 at offset 2, found 0x02"
        );
        assert_eq!(
            CodecError::invalid_length("private key", 32, 33).to_string(),
            "private key must be 32 bytes, got 33"
        );
    }
}
