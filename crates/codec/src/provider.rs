//! Seam between the codec and the platform that performs SM2 signing.
//!
//! A provider only speaks DER. The provided methods of [`Crypto`] adapt raw keys and signatures
//! to that interface using the rest of this crate.
use crate::{
    constants::{FIELD_LENGTH, RAW_PUBLIC_KEY_LENGTH},
    extract_signature_rs, public_key_to_der, secret_key_to_der, signature_to_der, CodecError,
    RawSignature,
};
use core::fmt::{self, Debug};
use std::{string::String, vec::Vec};

#[cfg(feature = "sm2")]
pub use default::{DefaultCrypto, DEFAULT_DISTID};

/// SM2 signing operations backed by an external implementation.
pub trait Crypto: Send + Sync + Debug {
    /// Signs `msg` with a DER encoded private key and returns a DER signature.
    fn sign_der(&self, secret_key_der: &[u8], msg: &[u8]) -> Result<Vec<u8>, ProviderError>;

    /// Verifies a DER signature over `msg` against a DER encoded public key.
    fn verify_der(
        &self,
        public_key_der: &[u8],
        msg: &[u8],
        signature_der: &[u8],
    ) -> Result<bool, ProviderError>;

    /// Signs `msg` with the raw private key `d` whose public key is `x`, `y`.
    fn sign_raw(
        &self,
        d: &[u8],
        x: &[u8],
        y: &[u8],
        msg: &[u8],
    ) -> Result<RawSignature, ProviderError> {
        let secret_key_der = secret_key_to_der(d, x, y)?;
        let signature_der = self.sign_der(&secret_key_der, msg)?;
        Ok(extract_signature_rs(&signature_der)?)
    }

    /// Verifies a raw `r || s` signature over `msg` against a raw `x || y` public key.
    fn verify_raw(
        &self,
        public_key: &[u8],
        msg: &[u8],
        signature: &[u8],
    ) -> Result<bool, ProviderError> {
        if public_key.len() != RAW_PUBLIC_KEY_LENGTH {
            return Err(CodecError::invalid_length(
                "raw public key",
                RAW_PUBLIC_KEY_LENGTH,
                public_key.len(),
            )
            .into());
        }
        let (x, y) = public_key.split_at(FIELD_LENGTH);
        let public_key_der = public_key_to_der(x, y)?;
        let signature_der = signature_to_der(signature)?;
        self.verify_der(&public_key_der, msg, &signature_der)
    }
}

/// Provider error type.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// Input or output of the provider could not be converted.
    #[error(transparent)]
    Codec(#[from] CodecError),
    /// Failure reported by the signing backend.
    #[error("backend: {0}")]
    Backend(String),
}

impl ProviderError {
    /// Returns a backend error carrying the message of `err`.
    pub fn backend(err: impl fmt::Display) -> Self {
        use std::string::ToString;
        Self::Backend(err.to_string())
    }

    /// Returns the codec error, if this is one.
    pub fn as_codec(&self) -> Option<&CodecError> {
        match self {
            Self::Codec(err) => Some(err),
            Self::Backend(_) => None,
        }
    }
}

#[cfg(feature = "sm2")]
mod default {
    use super::{Crypto, ProviderError};
    use crate::{
        constants::UNCOMPRESSED_POINT_MARKER, parse_public_key_der, parse_secret_key_der,
        signature::{extract_signature_rs, signature_to_der},
        RawPublicKey,
    };
    use sm2::{
        dsa::{
            signature::{Signer, Verifier},
            Signature, SigningKey, VerifyingKey,
        },
        elliptic_curve::sec1::ToEncodedPoint,
        SecretKey,
    };
    use std::{string::String, vec::Vec};

    /// Distinguishing identifier used when none is configured, as in GB/T 35276.
    pub const DEFAULT_DISTID: &str = "1234567812345678";

    /// Provider backed by the RustCrypto `sm2` crate.
    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    pub struct DefaultCrypto {
        distid: String,
    }

    impl Default for DefaultCrypto {
        fn default() -> Self {
            Self::new(DEFAULT_DISTID)
        }
    }

    impl DefaultCrypto {
        /// Creates a provider signing with the distinguishing identifier `distid`.
        pub fn new(distid: impl Into<String>) -> Self {
            Self {
                distid: distid.into(),
            }
        }

        /// Returns the distinguishing identifier.
        pub fn distid(&self) -> &str {
            &self.distid
        }

        /// Derives the raw public key of the private scalar `d`.
        pub fn public_key(&self, d: &[u8]) -> Result<RawPublicKey, ProviderError> {
            let signing_key = self.signing_key(d)?;
            Ok(raw_public_key(signing_key.verifying_key()))
        }

        fn signing_key(&self, d: &[u8]) -> Result<SigningKey, ProviderError> {
            let secret_key = SecretKey::from_slice(d).map_err(ProviderError::backend)?;
            SigningKey::new(&self.distid, &secret_key).map_err(ProviderError::backend)
        }
    }

    impl Crypto for DefaultCrypto {
        fn sign_der(&self, secret_key_der: &[u8], msg: &[u8]) -> Result<Vec<u8>, ProviderError> {
            let info = parse_secret_key_der(secret_key_der)?;
            let signing_key = self.signing_key(info.d.as_slice())?;
            if let Some(public_key) = info.public_key {
                if public_key != raw_public_key(signing_key.verifying_key()) {
                    return Err(ProviderError::Backend(
                        "embedded public key does not match the private key".into(),
                    ));
                }
            }

            let signature: Signature = signing_key.try_sign(msg).map_err(ProviderError::backend)?;
            Ok(signature_to_der(&signature.to_bytes())?)
        }

        fn verify_der(
            &self,
            public_key_der: &[u8],
            msg: &[u8],
            signature_der: &[u8],
        ) -> Result<bool, ProviderError> {
            let public_key = parse_public_key_der(public_key_der)?;
            let raw_signature = extract_signature_rs(signature_der)?;
            // only the minimal encoding of a signature verifies
            if signature_to_der(raw_signature.as_slice())? != signature_der {
                tracing::debug!("signature is not minimally encoded");
                return Ok(false);
            }

            let mut sec1 = [0u8; 65];
            sec1[0] = UNCOMPRESSED_POINT_MARKER;
            sec1[1..].copy_from_slice(public_key.as_slice());
            let verifying_key = VerifyingKey::from_sec1_bytes(&self.distid, &sec1)
                .map_err(ProviderError::backend)?;

            // r or s zero or not below the group order
            let Ok(signature) = Signature::from_slice(raw_signature.as_slice()) else {
                tracing::debug!("signature scalars out of range");
                return Ok(false);
            };
            Ok(verifying_key.verify(msg, &signature).is_ok())
        }
    }

    fn raw_public_key(verifying_key: &VerifyingKey) -> RawPublicKey {
        let point = verifying_key.to_encoded_point(false);
        RawPublicKey::from_slice(&point.as_bytes()[1..])
    }
}
