//! Subcommands of `sm2me`.
pub mod point;
pub mod public_key;
pub mod secret_key;
pub mod sign;
pub mod signature;

use crate::input::InputError;
use clap::{Parser, Subcommand};
use codec::{CodecError, ProviderError};

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(version, about = "SM2 key and signature encoding tool", infer_subcommands = true)]
pub struct Cli {
    /// Show debug diagnostics on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
    /// Command to run
    #[command(subcommand)]
    pub cmd: MainCmd,
}

/// `sm2me` subcommands.
#[derive(Subcommand, Debug)]
pub enum MainCmd {
    /// Compress a raw `x || y` public key
    Compress(point::CompressCmd),
    /// Recover a raw `x || y` public key from its compressed form
    Uncompress(point::UncompressCmd),
    /// Encode a raw `x || y` public key as DER
    PublicDer(public_key::ToDerCmd),
    /// Decode a DER public key into raw `x || y`
    ParsePublic(public_key::ParseCmd),
    /// Encode a private key and its public key as DER
    SecretDer(secret_key::ToDerCmd),
    /// Decode a DER private key
    ParseSecret(secret_key::ParseCmd),
    /// Encode a raw `r || s` signature as DER
    SigToDer(signature::ToDerCmd),
    /// Decode a DER signature into raw `r || s`
    SigFromDer(signature::FromDerCmd),
    /// Sign a message with a raw private key
    Sign(sign::SignCmd),
    /// Verify a raw signature against a raw public key
    Verify(sign::VerifyCmd),
}

/// Command errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bad command line input.
    #[error(transparent)]
    Input(#[from] InputError),
    /// Conversion failure.
    #[error(transparent)]
    Codec(#[from] CodecError),
    /// Signing backend failure.
    #[error(transparent)]
    Provider(#[from] ProviderError),
    /// Signature did not verify.
    #[error("signature verification failed")]
    VerificationFailed,
}

impl MainCmd {
    /// Runs the command and prints its result to stdout.
    pub fn run(&self) -> Result<(), Error> {
        let output = match self {
            Self::Compress(cmd) => cmd.run()?,
            Self::Uncompress(cmd) => cmd.run()?,
            Self::PublicDer(cmd) => cmd.run()?,
            Self::ParsePublic(cmd) => cmd.run()?,
            Self::SecretDer(cmd) => cmd.run()?,
            Self::ParseSecret(cmd) => cmd.run()?,
            Self::SigToDer(cmd) => cmd.run()?,
            Self::SigFromDer(cmd) => cmd.run()?,
            Self::Sign(cmd) => cmd.run()?,
            Self::Verify(cmd) => cmd.run()?,
        };
        println!("{output}");
        Ok(())
    }
}
