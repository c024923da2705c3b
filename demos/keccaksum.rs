//! Prints the Keccak digest of files, or of the standard input.
//!
//! ```text
//! cargo run --example keccaksum -- [--bits 224|256|384|512] [FILE]...
//! ```
use std::io::Read;

use anyhow::{bail, Context};
use keccak_nist::{hash, BitSequence};

fn digest_of(output_bits: usize, data: &[u8]) -> anyhow::Result<String> {
    let digest = hash(output_bits, BitSequence::from_bytes(data))?;
    Ok(hex::encode(digest))
}

fn main() -> anyhow::Result<()> {
    let mut output_bits = 256;
    let mut files = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--bits" {
            let value = args.next().context("--bits needs a value")?;
            output_bits = value
                .parse()
                .with_context(|| format!("invalid output length {:?}", value))?;
        } else if arg.starts_with("--") {
            bail!("unknown option {}", arg);
        } else {
            files.push(arg);
        }
    }

    if files.is_empty() {
        let mut data = Vec::new();
        std::io::stdin().read_to_end(&mut data)?;
        println!("{}  -", digest_of(output_bits, &data)?);
    }
    for file in files {
        let data = std::fs::read(&file).with_context(|| format!("reading {}", file))?;
        println!("{}  {}", digest_of(output_bits, &data)?, file);
    }
    Ok(())
}
