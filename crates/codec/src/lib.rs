//! # sm2-codec
//!
//! Byte-exact conversions between the encodings of SM2 keys and signatures:
//!
//! * DER `SubjectPublicKeyInfo` ([RFC 5480]) and PKCS#8 `ECPrivateKey` ([RFC 5915]) blobs,
//! * raw fixed-width buffers (`x || y`, `d`, `r || s`),
//! * compressed public keys (`0x02`/`0x03 || x`).
//!
//! Nothing here performs elliptic curve scalar multiplication. Signing and verification are
//! delegated to a [`Crypto`] provider, which only ever sees DER.
//!
//! [RFC 5480]: https://www.rfc-editor.org/rfc/rfc5480
//! [RFC 5915]: https://www.rfc-editor.org/rfc/rfc5915
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(not(feature = "std"), no_std)]

#[macro_use]
#[cfg(not(feature = "std"))]
extern crate alloc as std;

pub mod constants;
pub mod der;
pub mod interface;
pub mod key;
pub mod math;
pub mod point;
pub mod provider;
pub mod signature;
pub mod utilities;

pub use interface::*;
pub use key::{
    extract_public_key_coordinates, extract_secret_key_d, parse_public_key_der,
    parse_secret_key_der, public_key_to_der, secret_key_to_der, SecretKeyInfo,
};
pub use point::{compress_public_key, uncompress_public_key, validate_coordinates};
#[cfg(feature = "sm2")]
pub use provider::{DefaultCrypto, DEFAULT_DISTID};
pub use provider::{Crypto, ProviderError};
pub use signature::{extract_signature_rs, signature_to_der};

pub use alloy_primitives::{self, FixedBytes, B256, B512, U256};

/// Raw public key: 32-byte big-endian `x` followed by 32-byte big-endian `y`.
pub type RawPublicKey = B512;

/// Raw private key: a 32-byte big-endian scalar.
pub type RawPrivateKey = B256;

/// Compressed public key: parity prefix (`0x02` even, `0x03` odd) followed by `x`.
pub type CompressedPublicKey = FixedBytes<33>;

/// Raw signature: 32-byte big-endian `r` followed by 32-byte big-endian `s`.
pub type RawSignature = B512;
