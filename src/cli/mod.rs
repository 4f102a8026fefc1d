//! Terminal front end for the `bmpro` binary.
//!
//! `args` holds the clap flags and `errors` the CLI-only failures. `prompt`
//! asks the same questions on stdin when no source was given, and `runner`
//! merges a config file with the flags before handing off to `bmpro::api`.
pub mod args;
pub mod errors;
pub mod prompt;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
