//! Public key coordinate checks and SEC1-style point compression.
use crate::{
    constants::{
        A, B, COMPRESSED_PUBLIC_KEY_LENGTH, EVEN_Y_PREFIX, FIELD_LENGTH, ODD_Y_PREFIX, P,
        RAW_PUBLIC_KEY_LENGTH,
    },
    math::{add_mod, modular_sqrt, mul_mod},
    CodecError, CodecResult, CompressedPublicKey, RawPublicKey,
};
use alloy_primitives::{B256, U256};

/// Checks the shape of a public key: two 32-byte coordinates, not both zero.
///
/// This is deliberately partial. Curve membership and subgroup order are not checked.
pub fn validate_coordinates(x: &[u8], y: &[u8]) -> CodecResult<()> {
    if x.len() != FIELD_LENGTH {
        return Err(CodecError::invalid_length("x coordinate", FIELD_LENGTH, x.len()));
    }
    if y.len() != FIELD_LENGTH {
        return Err(CodecError::invalid_length("y coordinate", FIELD_LENGTH, y.len()));
    }
    if x.iter().chain(y).all(|&b| b == 0) {
        return Err(CodecError::PointAtInfinity);
    }
    Ok(())
}

/// Splits a raw public key into its `x` and `y` coordinates.
#[inline]
pub fn split_public_key(raw: &RawPublicKey) -> (B256, B256) {
    (
        B256::from_slice(&raw[..FIELD_LENGTH]),
        B256::from_slice(&raw[FIELD_LENGTH..]),
    )
}

/// Compresses a 64-byte `x || y` public key into `prefix || x`.
///
/// Both coordinates must be below the field prime.
pub fn compress_public_key(raw: &[u8]) -> CodecResult<CompressedPublicKey> {
    if raw.len() != RAW_PUBLIC_KEY_LENGTH {
        return Err(CodecError::invalid_length(
            "raw public key",
            RAW_PUBLIC_KEY_LENGTH,
            raw.len(),
        ));
    }
    let (x, y) = raw.split_at(FIELD_LENGTH);
    field_element(x)?;
    let y_int = field_element(y)?;

    let mut compressed = CompressedPublicKey::ZERO;
    compressed[0] = if y_int.bit(0) {
        ODD_Y_PREFIX
    } else {
        EVEN_Y_PREFIX
    };
    compressed[1..].copy_from_slice(x);
    Ok(compressed)
}

/// Recovers `x || y` from a 33-byte `prefix || x` public key.
///
/// `y` is the square root of `x^3 + ax + b` whose parity matches the prefix. Fails with
/// [`CodecError::NotOnCurve`] if no such root exists.
pub fn uncompress_public_key(compressed: &[u8]) -> CodecResult<RawPublicKey> {
    if compressed.len() != COMPRESSED_PUBLIC_KEY_LENGTH {
        return Err(CodecError::invalid_length(
            "compressed public key",
            COMPRESSED_PUBLIC_KEY_LENGTH,
            compressed.len(),
        ));
    }
    let (&prefix, x) = compressed
        .split_first()
        .ok_or(CodecError::EmptyValue("compressed public key"))?;
    let odd = match prefix {
        EVEN_Y_PREFIX => false,
        ODD_Y_PREFIX => true,
        _ => return Err(CodecError::InvalidPrefix(prefix)),
    };
    let x_int = field_element(x)?;

    let rhs = curve_rhs(x_int);
    let Some(mut y_int) = modular_sqrt(rhs, P)? else {
        tracing::debug!("compressed public key has no square root");
        return Err(CodecError::NotOnCurve);
    };
    if y_int.bit(0) != odd {
        // y is non-zero here: zero has even parity and is its own negation
        y_int = P - y_int;
    }

    let mut raw = RawPublicKey::ZERO;
    raw[..FIELD_LENGTH].copy_from_slice(x);
    raw[FIELD_LENGTH..].copy_from_slice(&y_int.to_be_bytes::<32>());
    Ok(raw)
}

/// `x^3 + ax + b mod p`.
#[inline]
fn curve_rhs(x: U256) -> U256 {
    let x3 = mul_mod(mul_mod(x, x, P), x, P);
    add_mod(add_mod(x3, mul_mod(A, x, P), P), B, P)
}

/// Parses a 32-byte big-endian coordinate, requiring it to be below the field prime.
#[inline]
fn field_element(bytes: &[u8]) -> CodecResult<U256> {
    let value = U256::try_from_be_slice(bytes)
        .ok_or(CodecError::invalid_length("coordinate", FIELD_LENGTH, bytes.len()))?;
    if value >= P {
        return Err(CodecError::CoordinateOutOfRange);
    }
    Ok(value)
}
