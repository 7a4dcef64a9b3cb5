//! Signature DER subcommands.
use super::Error;
use crate::input::HexInput;
use alloy_primitives::hex;
use clap::Parser;
use codec::{extract_signature_rs, signature_to_der};

/// Signature DER encoding command.
#[derive(Parser, Debug)]
pub struct ToDerCmd {
    /// Raw 64-byte `r || s` signature
    #[command(flatten)]
    signature: HexInput,
}

impl ToDerCmd {
    /// Runs signature DER encoding command.
    pub fn run(&self) -> Result<String, Error> {
        let raw = self.signature.read("signature")?;
        Ok(hex::encode(signature_to_der(&raw)?))
    }
}

/// Signature DER decoding command.
#[derive(Parser, Debug)]
pub struct FromDerCmd {
    /// DER `SEQUENCE { INTEGER r, INTEGER s }`
    #[command(flatten)]
    der: HexInput,
}

impl FromDerCmd {
    /// Runs signature DER decoding command.
    pub fn run(&self) -> Result<String, Error> {
        let der = self.der.read("signature DER")?;
        Ok(hex::encode(extract_signature_rs(&der)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::{Cli, MainCmd};
    use codec::CodecError;

    fn run(args: &[&str]) -> Result<String, Error> {
        let cli = Cli::try_parse_from(["sm2me"].iter().chain(args)).unwrap();
        match cli.cmd {
            MainCmd::SigToDer(cmd) => cmd.run(),
            MainCmd::SigFromDer(cmd) => cmd.run(),
            other => unreachable!("{other:?}"),
        }
    }

    #[test]
    fn encode_and_decode() {
        let raw = format!("{}{}", "00".repeat(31) + "01", "80".repeat(32));
        let der = run(&["sig-to-der", &raw]).unwrap();
        assert_eq!(der, format!("3026020101022100{}", "80".repeat(32)));
        assert_eq!(run(&["sig-from-der", &der]).unwrap(), raw);
    }

    #[test]
    fn rejects_trailing_bytes() {
        let err = run(&["sig-from-der", "3006020101020101ff"]).unwrap_err();
        assert!(matches!(
            err,
            Error::Codec(CodecError::TrailingData { offset: 8, count: 1 })
        ));
    }
}
