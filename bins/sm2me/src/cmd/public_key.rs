//! Public key DER subcommands.
use super::Error;
use crate::input::HexInput;
use alloy_primitives::hex;
use clap::Parser;
use codec::{constants::RAW_PUBLIC_KEY_LENGTH, parse_public_key_der, public_key_to_der, CodecError};

/// Public key DER encoding command.
#[derive(Parser, Debug)]
pub struct ToDerCmd {
    /// Raw 64-byte `x || y` public key
    #[command(flatten)]
    public_key: HexInput,
}

impl ToDerCmd {
    /// Runs public key DER encoding command.
    pub fn run(&self) -> Result<String, Error> {
        let raw = self.public_key.read("public key")?;
        if raw.len() != RAW_PUBLIC_KEY_LENGTH {
            return Err(
                CodecError::invalid_length("raw public key", RAW_PUBLIC_KEY_LENGTH, raw.len()).into(),
            );
        }
        let (x, y) = raw.split_at(RAW_PUBLIC_KEY_LENGTH / 2);
        Ok(hex::encode(public_key_to_der(x, y)?))
    }
}

/// Public key DER decoding command.
#[derive(Parser, Debug)]
pub struct ParseCmd {
    /// DER `SubjectPublicKeyInfo`
    #[command(flatten)]
    der: HexInput,
}

impl ParseCmd {
    /// Runs public key DER decoding command.
    pub fn run(&self) -> Result<String, Error> {
        let der = self.der.read("public key DER")?;
        Ok(hex::encode(parse_public_key_der(&der)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::{Cli, MainCmd};
    use codec::ErrorKind;

    const SAMPLE: &str = "09f9df311e5421a150dd7d161e4bc5c672179fad1833fc076bb08ff356f35020ccea490ce26775a52dc6ea718cc1aa600aed05fbf35e084a6632f6072da9ad13";

    fn run(args: &[&str]) -> Result<String, Error> {
        let cli = Cli::try_parse_from(["sm2me"].iter().chain(args)).unwrap();
        match cli.cmd {
            MainCmd::PublicDer(cmd) => cmd.run(),
            MainCmd::ParsePublic(cmd) => cmd.run(),
            other => unreachable!("{other:?}"),
        }
    }

    #[test]
    fn encode_and_parse() {
        let der = run(&["public-der", SAMPLE]).unwrap();
        assert_eq!(
            der,
            format!("3059301306072a8648ce3d020106082a811ccf5501822d03420004{SAMPLE}")
        );
        assert_eq!(run(&["parse-public", &der]).unwrap(), SAMPLE);
    }

    #[test]
    fn rejects_short_key() {
        let err = run(&["public-der", &SAMPLE[..126]]).unwrap_err();
        assert!(matches!(err, Error::Codec(e) if e.kind() == ErrorKind::Length));
    }
}
