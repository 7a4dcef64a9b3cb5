//! Point compression subcommands.
use super::Error;
use crate::input::HexInput;
use alloy_primitives::hex;
use clap::Parser;
use codec::{compress_public_key, uncompress_public_key};

/// Compress command.
#[derive(Parser, Debug)]
pub struct CompressCmd {
    /// Raw 64-byte `x || y` public key
    #[command(flatten)]
    public_key: HexInput,
}

impl CompressCmd {
    /// Runs compress command.
    pub fn run(&self) -> Result<String, Error> {
        let raw = self.public_key.read("public key")?;
        let compressed = compress_public_key(&raw)?;
        Ok(hex::encode(compressed))
    }
}

/// Uncompress command.
#[derive(Parser, Debug)]
pub struct UncompressCmd {
    /// Compressed 33-byte `prefix || x` public key
    #[command(flatten)]
    public_key: HexInput,
}

impl UncompressCmd {
    /// Runs uncompress command.
    pub fn run(&self) -> Result<String, Error> {
        let compressed = self.public_key.read("compressed public key")?;
        let raw = uncompress_public_key(&compressed)?;
        Ok(hex::encode(raw))
    }
}
