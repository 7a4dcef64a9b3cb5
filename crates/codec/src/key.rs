//! DER encodings of SM2 keys.
//!
//! * Public keys are `SubjectPublicKeyInfo` ([RFC 5480]) with `id-ecPublicKey` and `sm2p256v1`.
//! * Private keys are PKCS#8 `PrivateKeyInfo` wrapping an `ECPrivateKey` ([RFC 5915]) that
//!   always embeds the public key.
//!
//! Encoding concatenates the fixed templates from [`constants`](crate::constants). Decoding walks
//! the structure TLV by TLV and accepts nothing but the SM2 identifiers.
//!
//! [RFC 5480]: https://www.rfc-editor.org/rfc/rfc5480
//! [RFC 5915]: https://www.rfc-editor.org/rfc/rfc5915
use crate::{
    constants::{
        FIELD_LENGTH, OID_EC_PUBLIC_KEY, OID_SM2, PRIVATE_KEY_LENGTH, PUBLIC_KEY_DER_LENGTH,
        PUBLIC_KEY_DER_PREFIX, RAW_PUBLIC_KEY_LENGTH, SECRET_KEY_DER_LENGTH,
        SECRET_KEY_DER_PREFIX, SECRET_KEY_DER_SUFFIX, UNCOMPRESSED_POINT_MARKER,
    },
    der::{
        DerReader, BIT_STRING, CONTEXT_SPECIFIC_0, CONTEXT_SPECIFIC_1, OCTET_STRING, SEQUENCE,
    },
    point::{split_public_key, validate_coordinates},
    CodecError, CodecResult, RawPrivateKey, RawPublicKey,
};
use alloy_primitives::B256;
use std::vec::Vec;

/// Contents of a DER encoded private key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SecretKeyInfo {
    /// Private scalar.
    pub d: RawPrivateKey,
    /// Public key, when the encoding carries one.
    pub public_key: Option<RawPublicKey>,
}

/// Parses a DER `SubjectPublicKeyInfo` into a raw `x || y` public key.
pub fn parse_public_key_der(der: &[u8]) -> CodecResult<RawPublicKey> {
    let mut outer = DerReader::new(der);
    let mut spki = outer.read_nested(SEQUENCE)?;
    outer.finish()?;

    read_algorithm_identifier(&mut spki)?;
    let bits = spki.read_tlv(BIT_STRING)?;
    spki.finish()?;

    point_from_bit_string(bits)
}

/// Parses a DER `SubjectPublicKeyInfo` and returns the `x` and `y` coordinates.
pub fn extract_public_key_coordinates(der: &[u8]) -> CodecResult<(B256, B256)> {
    parse_public_key_der(der).map(|raw| split_public_key(&raw))
}

/// Extracts the private scalar from a DER private key.
///
/// Only the structure up to and including the private key OCTET STRING is examined.
pub fn extract_secret_key_d(der: &[u8]) -> CodecResult<RawPrivateKey> {
    open_secret_key(der).map(|(d, _)| d)
}

/// Parses a DER private key, including the optional curve parameters and public key.
pub fn parse_secret_key_der(der: &[u8]) -> CodecResult<SecretKeyInfo> {
    let (d, mut ec_key) = open_secret_key(der)?;

    if ec_key.peek_tag() == Some(CONTEXT_SPECIFIC_0) {
        let mut parameters = ec_key.read_nested(CONTEXT_SPECIFIC_0)?;
        parameters.read_oid(&OID_SM2, "curve")?;
        parameters.finish()?;
    }

    let public_key = if ec_key.peek_tag() == Some(CONTEXT_SPECIFIC_1) {
        let mut wrapper = ec_key.read_nested(CONTEXT_SPECIFIC_1)?;
        let bits = wrapper.read_tlv(BIT_STRING)?;
        wrapper.finish()?;
        Some(point_from_bit_string(bits)?)
    } else {
        None
    };
    ec_key.finish()?;

    Ok(SecretKeyInfo { d, public_key })
}

/// Encodes `x` and `y` as a DER `SubjectPublicKeyInfo`.
pub fn public_key_to_der(x: &[u8], y: &[u8]) -> CodecResult<Vec<u8>> {
    validate_coordinates(x, y)?;

    let mut der = Vec::with_capacity(PUBLIC_KEY_DER_LENGTH);
    der.extend_from_slice(&PUBLIC_KEY_DER_PREFIX);
    push_point(&mut der, x, y);
    Ok(der)
}

/// Encodes `d` with its public key `x`, `y` as a DER PKCS#8 private key.
pub fn secret_key_to_der(d: &[u8], x: &[u8], y: &[u8]) -> CodecResult<Vec<u8>> {
    if d.len() != PRIVATE_KEY_LENGTH {
        return Err(CodecError::invalid_length(
            "private key",
            PRIVATE_KEY_LENGTH,
            d.len(),
        ));
    }
    validate_coordinates(x, y)?;

    let mut der = Vec::with_capacity(SECRET_KEY_DER_LENGTH);
    der.extend_from_slice(&SECRET_KEY_DER_PREFIX);
    der.extend_from_slice(d);
    der.extend_from_slice(&SECRET_KEY_DER_SUFFIX);
    push_point(&mut der, x, y);
    Ok(der)
}

/// Walks the private key structure up to the scalar.
///
/// Returns the scalar and a reader positioned after it, inside `ECPrivateKey`.
fn open_secret_key(der: &[u8]) -> CodecResult<(RawPrivateKey, DerReader<'_>)> {
    let mut outer = DerReader::new(der);
    let mut info = outer.read_nested(SEQUENCE)?;
    outer.finish()?;

    // PKCS#8 v1 (0) or OneAsymmetricKey v2 (1)
    if info.read_small_integer("private key info")? > 1 {
        return Err(CodecError::UnsupportedVersion("private key info"));
    }
    read_algorithm_identifier(&mut info)?;

    let mut wrapped = info.read_nested(OCTET_STRING)?;
    let mut ec_key = wrapped.read_nested(SEQUENCE)?;
    wrapped.finish()?;

    // ecPrivkeyVer1
    if ec_key.read_small_integer("ec private key")? != 1 {
        return Err(CodecError::UnsupportedVersion("ec private key"));
    }
    let d = ec_key.read_tlv(OCTET_STRING)?;
    if d.len() != PRIVATE_KEY_LENGTH {
        return Err(CodecError::invalid_length(
            "private key",
            PRIVATE_KEY_LENGTH,
            d.len(),
        ));
    }

    Ok((B256::from_slice(d), ec_key))
}

/// `AlgorithmIdentifier { id-ecPublicKey, sm2p256v1 }`.
fn read_algorithm_identifier(reader: &mut DerReader<'_>) -> CodecResult<()> {
    let mut algorithm = reader.read_nested(SEQUENCE)?;
    algorithm.read_oid(&OID_EC_PUBLIC_KEY, "algorithm")?;
    algorithm.read_oid(&OID_SM2, "curve")?;
    algorithm.finish()
}

/// BIT STRING value holding `00 04 || x || y`.
fn point_from_bit_string(bits: &[u8]) -> CodecResult<RawPublicKey> {
    let (&unused_bits, point) = bits
        .split_first()
        .ok_or(CodecError::EmptyValue("bit string"))?;
    if unused_bits != 0 {
        return Err(CodecError::UnusedBits(unused_bits));
    }

    let (&marker, coordinates) = point
        .split_first()
        .ok_or(CodecError::EmptyValue("public key point"))?;
    if marker != UNCOMPRESSED_POINT_MARKER {
        return Err(CodecError::PointMarker(marker));
    }
    if coordinates.len() != RAW_PUBLIC_KEY_LENGTH {
        return Err(CodecError::invalid_length(
            "public key coordinates",
            RAW_PUBLIC_KEY_LENGTH,
            coordinates.len(),
        ));
    }

    let (x, y) = coordinates.split_at(FIELD_LENGTH);
    validate_coordinates(x, y)?;
    Ok(RawPublicKey::from_slice(coordinates))
}

#[inline]
fn push_point(der: &mut Vec<u8>, x: &[u8], y: &[u8]) {
    der.push(UNCOMPRESSED_POINT_MARKER);
    der.extend_from_slice(x);
    der.extend_from_slice(y);
}
