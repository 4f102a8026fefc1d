//! I/O layer: the 24-bit BMP codec (`bmp`) and the JSON report sidecar
//! (`report`) written next to processed outputs.
pub mod bmp;
pub use bmp::{decode, encode, read_bmp, write_bmp};

pub mod report;
pub use report::{LineSummary, ProcessingReport, write_report};
