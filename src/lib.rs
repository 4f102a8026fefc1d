#![doc = r#"
BMPRO — a small toolkit for analysing uncompressed 24-bit bitmaps.

This crate decodes a 24-bit BMP into an in-memory pixel grid, resamples it
(with an optional inverse tint), applies blur and sepia filters, and runs
three independent analyses on the result: tolerance-based flood fill,
contour extraction with spatial suppression, and straight-line tracing over
the contour mask. It powers the `bmpro` CLI and can be embedded in your own
Rust applications.

Stability
---------
The public library API is experimental in initial releases and may evolve as
the crate stabilizes. Breaking changes can occur.

Add dependency
--------------
```toml
[dependencies]
bmpro = "0.1"
```

Quick start: process a bitmap to files
--------------------------------------
```rust,no_run
use std::path::Path;
use bmpro::{process_bmp_to_path, ContourParams, LineParams, PipelineParams};

fn main() -> bmpro::Result<()> {
    let params = PipelineParams {
        scale: 2.0,
        blur: true,
        contour: Some(ContourParams::default()),
        lines: Some(LineParams::default()),
        report: true,
        ..PipelineParams::default()
    };

    // writes photo-processed.bmp, photo-contour.bmp, photo-lines.bmp and photo-report.json
    let summary = process_bmp_to_path(Path::new("/data/photo.bmp"), Some(Path::new("/out")), &params)?;
    for (kind, path) in summary.artifacts() {
        println!("{kind}: {}", path.display());
    }
    Ok(())
}
```

Process in memory
-----------------
```rust
use bmpro::{process_grid_to_buffer, FloodFillParams, PipelineParams, PixelGrid, Rgb};

fn main() -> bmpro::Result<()> {
    let mut grid = PixelGrid::new(4, 4)?;
    for (r, c) in [(1, 1), (1, 2), (2, 1), (2, 2)] {
        grid.set(r, c, Rgb::WHITE)?;
    }

    let params = PipelineParams {
        scale: 1.0,
        fill: Some(FloodFillParams { tolerance: 0, seed: (1, 1) }),
        ..PipelineParams::default()
    };
    let out = process_grid_to_buffer(&grid, &params)?;
    let fill = out.fill.expect("fill requested");
    assert_eq!(fill.pixels, 4);
    Ok(())
}
```

Low-level building blocks
-------------------------
```rust
use bmpro::core::processing::{contour::extract_contour, filters::apply_sepia, resample::resample};
use bmpro::{PixelGrid, Rgb};

fn main() -> bmpro::Result<()> {
    let grid = PixelGrid::filled(8, 8, Rgb::new(90, 120, 30))?;
    let mut small = resample(&grid, 2.0, false)?;
    apply_sepia(&mut small);
    let edges = extract_contour(&small, 35, 1);
    assert_eq!(edges.dim(), (4, 4));
    Ok(())
}
```

Batch helpers
-------------
```rust,no_run
use std::path::Path;
use bmpro::{process_directory_to_path, PipelineParams};

fn main() -> bmpro::Result<()> {
    let report = process_directory_to_path(
        Path::new("/data/bitmaps"),
        Path::new("/out"),
        &PipelineParams::default(),
        true, // continue_on_error
    )?;

    println!("processed={} skipped={} errors={}", report.processed, report.skipped, report.errors);
    Ok(())
}
```

Error handling
--------------
All public functions return `bmpro::Result<T>`; match on `bmpro::Error` to handle specific
cases.

```rust,no_run
use std::path::Path;
use bmpro::{process_bmp_to_path, Error, PipelineParams};

fn main() {
    match process_bmp_to_path(Path::new("/bad/file.bmp"), None, &PipelineParams::default()) {
        Ok(_) => {}
        Err(Error::Format(msg)) => eprintln!("not a 24-bit bitmap: {msg}"),
        Err(Error::OutOfBounds { row, col, .. }) => eprintln!("seed ({row}, {col}) is outside the image"),
        Err(other) => eprintln!("Other error: {other}"),
    }
}
```

Useful modules
--------------
- [`api`] — high-level, ergonomic entry points.
- [`core`] — pixel grid and the processing stages.
- [`types`] — pixel, curve and artifact types.
- [`io`] — BMP codec and JSON report writer.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use core::grid::{BooleanMask, PixelGrid};
pub use core::params::{ContourParams, FloodFillParams, LineParams, PipelineParams};
pub use error::{Error, Result};
pub use types::{ArtifactKind, Coord, Curve, Rgb};

// Codec and report
pub use io::bmp::{decode, encode, read_bmp, write_bmp};
pub use io::report::{LineSummary, ProcessingReport, write_report};

// High-level API re-exports
pub use api::{
    BatchReport, ProcessedGrids, ProcessingSummary, iterate_bitmaps, output_path_for,
    process_bmp_to_path, process_directory_to_path, process_grid_to_buffer,
};
