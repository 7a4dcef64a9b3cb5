//! SM2 curve parameters, object identifiers and fixed DER templates.
//!
//! Curve parameters are those of GB/T 32918.5-2017 (`sm2p256v1`).
use alloy_primitives::{hex, uint, U256};

/// Length of a field element or scalar in bytes.
pub const FIELD_LENGTH: usize = 32;

/// Raw public key length in bytes (`x || y`).
pub const RAW_PUBLIC_KEY_LENGTH: usize = 64;

/// Compressed public key length in bytes (`prefix || x`).
pub const COMPRESSED_PUBLIC_KEY_LENGTH: usize = 33;

/// Private key length in bytes.
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// Raw signature length in bytes (`r || s`).
pub const SIGNATURE_LENGTH: usize = 64;

/// SEC1 marker of an uncompressed point.
pub const UNCOMPRESSED_POINT_MARKER: u8 = 0x04;

/// Compressed point prefix for an even `y`.
pub const EVEN_Y_PREFIX: u8 = 0x02;

/// Compressed point prefix for an odd `y`.
pub const ODD_Y_PREFIX: u8 = 0x03;

/// Field prime `p = 2^256 - 2^224 - 2^96 + 2^64 - 1`.
pub const P: U256 =
    uint!(0xFFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF00000000FFFFFFFFFFFFFFFF_U256);

/// Curve coefficient `a = p - 3`.
pub const A: U256 =
    uint!(0xFFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF00000000FFFFFFFFFFFFFFFC_U256);

/// Curve coefficient `b`.
pub const B: U256 =
    uint!(0x28E9FA9E9D9F5E344D5A9E4BCF6509A7F39789F515AB8F92DDBCBD414D940E93_U256);

/// Group order `n`.
pub const N: U256 =
    uint!(0xFFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFF7203DF6B21C6052B53BBF40939D54123_U256);

/// `id-ecPublicKey`, OID 1.2.840.10045.2.1 (value bytes only).
pub const OID_EC_PUBLIC_KEY: [u8; 7] = hex!("2a8648ce3d0201");

/// `sm2p256v1`, OID 1.2.156.10197.1.301 (value bytes only).
pub const OID_SM2: [u8; 8] = hex!("2a811ccf5501822d");

/// `SubjectPublicKeyInfo` up to and including the BIT STRING unused-bits byte.
///
/// ```text
/// 30 59                       SEQUENCE
///    30 13                    SEQUENCE (AlgorithmIdentifier)
///       06 07 2a8648ce3d0201  OID id-ecPublicKey
///       06 08 2a811ccf5501822d OID sm2p256v1
///    03 42 00                 BIT STRING, 0 unused bits
/// ```
///
/// Followed by `04 || x || y`.
pub const PUBLIC_KEY_DER_PREFIX: [u8; 26] = hex!("3059301306072a8648ce3d020106082a811ccf5501822d034200");

/// PKCS#8 `PrivateKeyInfo` up to the private key scalar.
///
/// ```text
/// 30 81 87                    SEQUENCE
///    02 01 00                 INTEGER 0 (PKCS#8 version)
///    30 13 ...                AlgorithmIdentifier, as in the public key
///    04 6d                    OCTET STRING
///       30 6b                 SEQUENCE (ECPrivateKey)
///          02 01 01           INTEGER 1 (ecPrivkeyVer1)
///          04 20              OCTET STRING, 32 bytes
/// ```
///
/// Followed by `d`, [`SECRET_KEY_DER_SUFFIX`] and `04 || x || y`.
pub const SECRET_KEY_DER_PREFIX: [u8; 36] = hex!("308187020100301306072a8648ce3d020106082a811ccf5501822d046d306b0201010420");

/// `[1]` explicit tag and BIT STRING header of the embedded public key.
pub const SECRET_KEY_DER_SUFFIX: [u8; 5] = hex!("a144034200");

/// Length of a DER encoded public key.
pub const PUBLIC_KEY_DER_LENGTH: usize = PUBLIC_KEY_DER_PREFIX.len() + 1 + RAW_PUBLIC_KEY_LENGTH;

/// Length of a DER encoded private key.
pub const SECRET_KEY_DER_LENGTH: usize = SECRET_KEY_DER_PREFIX.len()
    + PRIVATE_KEY_LENGTH
    + SECRET_KEY_DER_SUFFIX.len()
    + 1
    + RAW_PUBLIC_KEY_LENGTH;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_lengths_match_headers() {
        // outer SEQUENCE length covers everything after its two header bytes
        assert_eq!(PUBLIC_KEY_DER_LENGTH, 91);
        assert_eq!(PUBLIC_KEY_DER_PREFIX[1] as usize, PUBLIC_KEY_DER_LENGTH - 2);

        assert_eq!(SECRET_KEY_DER_LENGTH, 138);
        assert_eq!(SECRET_KEY_DER_PREFIX[2] as usize, SECRET_KEY_DER_LENGTH - 3);
    }

    #[test]
    fn a_is_p_minus_three() {
        assert_eq!(A, P - U256::from(3u8));
    }
}
