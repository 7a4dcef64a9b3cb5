//! Signing and verification through the default provider.
use super::Error;
use crate::input::decode;
use alloy_primitives::hex;
use clap::{Args, Parser};
use codec::{signature_to_der, Crypto, DefaultCrypto, DEFAULT_DISTID};
use std::borrow::Cow;

/// Options shared by signing and verification.
#[derive(Args, Debug)]
pub struct SignerArgs {
    /// Distinguishing identifier of the signer
    #[arg(long, default_value = DEFAULT_DISTID)]
    distid: String,
    /// Treat the message as hex instead of UTF-8 text
    #[arg(long)]
    hex_message: bool,
}

impl SignerArgs {
    fn crypto(&self) -> DefaultCrypto {
        DefaultCrypto::new(self.distid.as_str())
    }

    fn message<'a>(&self, message: &'a str) -> Result<Cow<'a, [u8]>, Error> {
        if self.hex_message {
            Ok(decode(message, "message")?.into())
        } else {
            Ok(message.as_bytes().into())
        }
    }
}

/// Sign command.
#[derive(Parser, Debug)]
pub struct SignCmd {
    /// 32-byte private scalar `d`, hex-encoded
    d: String,
    /// Message to sign
    message: String,
    /// Print the signature as DER instead of raw `r || s`
    #[arg(long)]
    der: bool,
    #[command(flatten)]
    signer: SignerArgs,
}

impl SignCmd {
    /// Runs sign command.
    pub fn run(&self) -> Result<String, Error> {
        let crypto = self.signer.crypto();
        let d = decode(&self.d, "private key")?;
        let message = self.signer.message(&self.message)?;

        let public_key = crypto.public_key(&d)?;
        let (x, y) = public_key.split_at(32);
        tracing::debug!(public_key = %hex::encode(public_key), "derived public key");

        let signature = crypto.sign_raw(&d, x, y, &message)?;
        if self.der {
            return Ok(hex::encode(signature_to_der(signature.as_slice())?));
        }
        Ok(hex::encode(signature))
    }
}

/// Verify command.
#[derive(Parser, Debug)]
pub struct VerifyCmd {
    /// Raw 64-byte `x || y` public key, hex-encoded
    public_key: String,
    /// Signed message
    message: String,
    /// Raw 64-byte `r || s` signature, hex-encoded
    signature: String,
    #[command(flatten)]
    signer: SignerArgs,
}

impl VerifyCmd {
    /// Runs verify command.
    ///
    /// Fails with [`Error::VerificationFailed`] if the signature does not verify.
    pub fn run(&self) -> Result<String, Error> {
        let crypto = self.signer.crypto();
        let public_key = decode(&self.public_key, "public key")?;
        let signature = decode(&self.signature, "signature")?;
        let message = self.signer.message(&self.message)?;

        if !crypto.verify_raw(&public_key, &message, &signature)? {
            return Err(Error::VerificationFailed);
        }
        Ok("ok".into())
    }
}
