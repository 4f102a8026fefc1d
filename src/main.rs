//! `bmpro` binary.
//!
//! Given `--input` it processes one bitmap, given `--input-dir` a whole
//! directory. With neither, it asks for the source path and every pipeline
//! setting on the terminal. Any failure becomes a non-zero exit status.

use clap::Parser;

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::CliArgs::parse();
    cli::run(args)
}
