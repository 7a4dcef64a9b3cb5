//! Private key DER subcommands.
use super::Error;
use crate::input::{decode, HexInput};
use alloy_primitives::hex;
use clap::Parser;
use codec::{constants::RAW_PUBLIC_KEY_LENGTH, parse_secret_key_der, secret_key_to_der, CodecError};

/// Private key DER encoding command.
#[derive(Parser, Debug)]
pub struct ToDerCmd {
    /// 32-byte private scalar `d`, hex-encoded
    d: String,
    /// Matching raw 64-byte `x || y` public key, hex-encoded
    public_key: String,
}

impl ToDerCmd {
    /// Runs private key DER encoding command.
    pub fn run(&self) -> Result<String, Error> {
        let d = decode(&self.d, "private key")?;
        let public_key = decode(&self.public_key, "public key")?;
        if public_key.len() != RAW_PUBLIC_KEY_LENGTH {
            return Err(CodecError::invalid_length(
                "raw public key",
                RAW_PUBLIC_KEY_LENGTH,
                public_key.len(),
            )
            .into());
        }
        let (x, y) = public_key.split_at(RAW_PUBLIC_KEY_LENGTH / 2);
        Ok(hex::encode(secret_key_to_der(&d, x, y)?))
    }
}

/// Private key DER decoding command.
#[derive(Parser, Debug)]
pub struct ParseCmd {
    /// DER PKCS#8 private key
    #[command(flatten)]
    der: HexInput,
}

impl ParseCmd {
    /// Runs private key DER decoding command.
    ///
    /// Prints `d`, followed by the public key on a second line when the encoding carries one.
    pub fn run(&self) -> Result<String, Error> {
        let der = self.der.read("private key DER")?;
        let info = parse_secret_key_der(&der)?;
        let mut output = hex::encode(info.d);
        if let Some(public_key) = info.public_key {
            output.push('\n');
            output.push_str(&hex::encode(public_key));
        } else {
            tracing::debug!("private key DER carries no public key");
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::{Cli, MainCmd};
    use rstest::rstest;

    const D: &str = "3945208f7b2144b13f36e38ac6d39f95889393692860b51a42fb81ef4df7c5b8";
    const SAMPLE: &str = "09f9df311e5421a150dd7d161e4bc5c672179fad1833fc076bb08ff356f35020ccea490ce26775a52dc6ea718cc1aa600aed05fbf35e084a6632f6072da9ad13";

    fn run(args: &[&str]) -> Result<String, Error> {
        let cli = Cli::try_parse_from(["sm2me"].iter().chain(args)).unwrap();
        match cli.cmd {
            MainCmd::SecretDer(cmd) => cmd.run(),
            MainCmd::ParseSecret(cmd) => cmd.run(),
            other => unreachable!("{other:?}"),
        }
    }

    #[test]
    fn encode_and_parse() {
        let der = run(&["secret-der", D, SAMPLE]).unwrap();
        assert_eq!(der.len(), 2 * 138);
        assert!(der.starts_with("308187020100"));
        assert_eq!(run(&["parse-secret", &der]).unwrap(), format!("{D}\n{SAMPLE}"));
    }

    #[rstest]
    #[case::short_d(&D[..62], SAMPLE)]
    #[case::short_public_key(D, &SAMPLE[..126])]
    fn rejects_bad_lengths(#[case] d: &str, #[case] public_key: &str) {
        let err = run(&["secret-der", d, public_key]).unwrap_err();
        assert!(matches!(err, Error::Codec(CodecError::InvalidLength { .. })));
    }
}
