//! Hex input from the command line or from a file.
use alloy_primitives::hex;
use clap::Args;
use std::{fs, io, path::PathBuf};

/// Input errors.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// Input is not valid hex.
    #[error("invalid hex in {what}: {source}")]
    Hex {
        /// Argument name.
        what: &'static str,
        /// Decoding error.
        source: hex::FromHexError,
    },
    /// Input file could not be read.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A hex argument that may be read from `--file` instead.
#[derive(Args, Debug)]
pub struct HexInput {
    /// Hex-encoded input, with or without a `0x` prefix
    #[arg(required_unless_present = "file")]
    hex: Option<String>,
    /// Path to a file containing the hex-encoded input
    ///
    /// Overrides the positional argument.
    #[arg(long)]
    file: Option<PathBuf>,
}

impl HexInput {
    /// Reads and decodes the input.
    pub fn read(&self, what: &'static str) -> Result<Vec<u8>, InputError> {
        if let Some(path) = &self.file {
            let contents = fs::read_to_string(path)?;
            return decode(&contents, what);
        }
        decode(self.hex.as_deref().unwrap_or_default(), what)
    }
}

/// Decodes a hex string, ignoring surrounding whitespace and an optional `0x` prefix.
pub fn decode(input: &str, what: &'static str) -> Result<Vec<u8>, InputError> {
    hex::decode(input.trim()).map_err(|source| InputError::Hex { what, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("0a0b", &[0x0a, 0x0b])]
    #[case::prefixed("0x0A0B", &[0x0a, 0x0b])]
    #[case::whitespace(" 0a0b\n", &[0x0a, 0x0b])]
    #[case::empty("", &[])]
    fn decodes(#[case] input: &str, #[case] expected: &[u8]) {
        assert_eq!(decode(input, "test").unwrap(), expected);
    }

    #[rstest]
    #[case::odd("abc")]
    #[case::not_hex("zz")]
    fn rejects(#[case] input: &str) {
        assert!(matches!(
            decode(input, "test"),
            Err(InputError::Hex { what: "test", .. })
        ));
    }

    #[test]
    fn reads_file() {
        let path = std::env::temp_dir().join(format!("sm2me-input-{}.hex", std::process::id()));
        fs::write(&path, "0x3000\n").unwrap();
        let input = HexInput {
            hex: Some("ff".into()),
            file: Some(path.clone()),
        };
        assert_eq!(input.read("test").unwrap(), [0x30, 0x00]);
        fs::remove_file(path).unwrap();
    }
}
