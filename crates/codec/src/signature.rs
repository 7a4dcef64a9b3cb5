//! Conversion between raw `r || s` signatures and DER `SEQUENCE { INTEGER r, INTEGER s }`.
use crate::{
    constants::{FIELD_LENGTH, SIGNATURE_LENGTH},
    der::{encode_integer, encode_sequence, DerReader, INTEGER, SEQUENCE},
    utilities::{left_pad, strip_leading_zeros},
    CodecError, CodecResult, RawSignature,
};
use std::vec::Vec;

/// Parses a DER signature into a raw 64-byte `r || s`.
///
/// Leading zero bytes of either integer are tolerated, so non-minimal encodings from other
/// producers still parse. A missing sign byte is read as the unsigned magnitude. Anything
/// after the two integers is rejected. Callers that need the canonical form compare the
/// input against [`signature_to_der`] of the result.
pub fn extract_signature_rs(der: &[u8]) -> CodecResult<RawSignature> {
    let mut outer = DerReader::new(der);
    let mut seq = outer.read_nested(SEQUENCE)?;
    outer.finish()?;

    let r = seq.read_tlv(INTEGER)?;
    let s = seq.read_tlv(INTEGER)?;
    seq.finish()?;

    let mut raw = RawSignature::ZERO;
    raw[..FIELD_LENGTH].copy_from_slice(scalar_from_integer(r, "r")?.as_slice());
    raw[FIELD_LENGTH..].copy_from_slice(scalar_from_integer(s, "s")?.as_slice());
    Ok(raw)
}

/// Encodes a raw 64-byte `r || s` signature as a minimal DER signature.
pub fn signature_to_der(raw: &[u8]) -> CodecResult<Vec<u8>> {
    if raw.len() != SIGNATURE_LENGTH {
        return Err(CodecError::invalid_length(
            "raw signature",
            SIGNATURE_LENGTH,
            raw.len(),
        ));
    }
    let (r, s) = raw.split_at(FIELD_LENGTH);
    encode_sequence([encode_integer(r)?, encode_integer(s)?])
}

/// Unsigned magnitude of an `INTEGER` value, left-padded to a field element.
fn scalar_from_integer(value: &[u8], what: &'static str) -> CodecResult<[u8; FIELD_LENGTH]> {
    if value.is_empty() {
        return Err(CodecError::EmptyValue("integer"));
    }
    let magnitude = strip_leading_zeros(value);
    if magnitude.len() > FIELD_LENGTH {
        return Err(CodecError::TooLong {
            what,
            max: FIELD_LENGTH,
            actual: magnitude.len(),
        });
    }
    Ok(*left_pad::<FIELD_LENGTH>(magnitude))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use alloy_primitives::{b512, hex};
    use rstest::rstest;

    #[rstest]
    #[case::plain(
        b512!("11111111111111111111111111111111111111111111111111111111111111112222222222222222222222222222222222222222222222222222222222222222"),
        &hex!("30440220111111111111111111111111111111111111111111111111111111111111111102202222222222222222222222222222222222222222222222222222222222222222")
    )]
    #[case::high_bit_and_leading_zeros(
        b512!("feeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee00007fababababababababababababababababababababababababababababab"),
        &hex!("3043022100feeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee021e7fababababababababababababababababababababababababababababab")
    )]
    #[case::zero_and_one(
        b512!("00000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000001"),
        &hex!("3006020100020101")
    )]
    fn vectors(#[case] raw: RawSignature, #[case] der: &[u8]) {
        assert_eq!(signature_to_der(raw.as_slice()).unwrap(), der);
        assert_eq!(extract_signature_rs(der).unwrap(), raw);
    }

    #[test]
    fn both_high_bits_set() {
        let raw = RawSignature::repeat_byte(0x80);
        let der = signature_to_der(raw.as_slice()).unwrap();
        assert_eq!(der.len(), 72);
        assert_eq!(&der[..5], &hex!("3046022100"));
        assert_eq!(&der[37..40], &hex!("022100"));
        assert_eq!(extract_signature_rs(&der).unwrap(), raw);
    }

    #[test]
    fn accepts_non_minimal_integers() {
        // 33-byte r with a redundant zero, s padded out to 4 bytes
        let mut der = hex!("3029022100").to_vec();
        der.extend([0x11; 32]);
        der.extend(hex!("020400000005"));
        let raw = extract_signature_rs(&der).unwrap();
        assert_eq!(&raw[..32], &[0x11; 32]);
        assert_eq!(raw[63], 5);
        assert!(raw[32..63].iter().all(|&b| b == 0));
    }

    #[test]
    fn high_bit_integer_reads_as_magnitude() {
        // 0x80 without a sign byte is -128 in strict DER; the parser keeps the magnitude
        let der = hex!("3006020180020101");
        let raw = extract_signature_rs(&der).unwrap();
        assert_eq!(raw[31], 0x80);
        assert_eq!(raw[63], 1);

        // re-encoding restores the sign byte, so the input is not the minimal form
        let minimal = signature_to_der(raw.as_slice()).unwrap();
        assert_eq!(minimal, hex!("300702020080020101"));
        assert_ne!(minimal, der);
    }

    #[rstest]
    #[case::empty(&[], CodecError::Truncated { offset: 0 })]
    #[case::not_a_sequence(&hex!("3106020101020101"), CodecError::UnexpectedTag { offset: 0, expected: SEQUENCE, found: 0x31 })]
    #[case::octet_string_r(&hex!("3006040101020101"), CodecError::UnexpectedTag { offset: 2, expected: INTEGER, found: 0x04 })]
    #[case::missing_s(&hex!("3003020101"), CodecError::Truncated { offset: 5 })]
    #[case::empty_r(&hex!("30050200020101"), CodecError::EmptyValue("integer"))]
    #[case::trailing_inside(&hex!("3008020101020101ffff"), CodecError::TrailingData { offset: 8, count: 2 })]
    #[case::trailing_outside(&hex!("3006020101020101ff"), CodecError::TrailingData { offset: 8, count: 1 })]
    #[case::indefinite(&hex!("3080020101020101"), CodecError::IndefiniteLength { offset: 1 })]
    fn malformed(#[case] der: &[u8], #[case] expected: CodecError) {
        assert_eq!(extract_signature_rs(der), Err(expected));
    }

    #[test]
    fn rejects_oversized_integer() {
        // r is 0x01 followed by 32 bytes
        let mut der = hex!("3026022101").to_vec();
        der.extend([0x11; 32]);
        der.extend(hex!("020101"));
        let err = extract_signature_rs(&der).unwrap_err();
        assert_eq!(
            err,
            CodecError::TooLong {
                what: "r",
                max: 32,
                actual: 33
            }
        );
        assert_eq!(err.kind(), ErrorKind::Length);
    }

    #[rstest]
    #[case::empty(0)]
    #[case::short(63)]
    #[case::long(65)]
    fn to_der_rejects_wrong_length(#[case] len: usize) {
        assert_eq!(
            signature_to_der(&vec![1u8; len]),
            Err(CodecError::invalid_length("raw signature", 64, len))
        );
    }

    #[test]
    fn random_roundtrip() {
        use rand::Rng;

        let mut rng = rand::rng();
        for _ in 0..256 {
            let mut raw = RawSignature::ZERO;
            rng.fill(&mut raw[..]);
            // exercise leading zeros and high bits
            match rng.random_range(0..4) {
                0 => raw[..rng.random_range(1..32)].fill(0),
                1 => raw[32] |= 0x80,
                2 => raw[32..32 + rng.random_range(1..32)].fill(0),
                _ => {}
            }

            let der = signature_to_der(raw.as_slice()).unwrap();
            assert!(der.len() <= 72);
            assert_eq!(extract_signature_rs(&der).unwrap(), raw);
        }
    }
}
