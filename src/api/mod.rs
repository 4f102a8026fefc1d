//! High-level, ergonomic library API: process a bitmap to files or in-memory
//! grids, and batch helpers for directories. Prefer these entrypoints over
//! the low-level processing modules when integrating BMPRO.
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::core::grid::PixelGrid;
use crate::core::params::PipelineParams;
use crate::core::processing::contour::{extract_contour, is_edge_pixel};
use crate::core::processing::flood_fill::{FilledRegion, flood_fill_region};
use crate::core::processing::lines::{LineTrace, trace_lines};
use crate::core::processing::pipeline::process_grid;
use crate::error::{Error, Result};
use crate::io::bmp::{read_bmp, write_bmp};
use crate::io::report::{LineSummary, ProcessingReport, write_report};
use crate::types::ArtifactKind;

/// Result of in-memory processing
#[derive(Debug, Clone)]
pub struct ProcessedGrids {
    pub processed: PixelGrid,
    pub fill: Option<FilledRegion>,
    pub contour: Option<PixelGrid>,
    pub lines: Option<LineTrace>,
}

/// Process a decoded grid without touching the filesystem. Any failing
/// analysis fails the whole call.
pub fn process_grid_to_buffer(grid: &PixelGrid, params: &PipelineParams) -> Result<ProcessedGrids> {
    let processed = process_grid(grid, params)?;
    let fill = params
        .fill
        .map(|p| flood_fill_region(&processed, p.tolerance, p.seed))
        .transpose()?;
    let contour = params
        .contour
        .map(|p| extract_contour(&processed, p.tolerance, p.suppress_radius));
    let lines = params
        .lines
        .map(|p| trace_lines(&processed, &p))
        .transpose()?;
    Ok(ProcessedGrids {
        processed,
        fill,
        contour,
        lines,
    })
}

/// Output path for `kind`: `<output_dir or source dir>/<source stem><suffix>`.
pub fn output_path_for(input: &Path, output_dir: Option<&Path>, kind: ArtifactKind) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let dir = output_dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    dir.join(format!("{}{}", stem, kind.suffix()))
}

/// Outcome of [`process_bmp_to_path`]; lists every artifact written.
#[derive(Debug, Clone)]
pub struct ProcessingSummary {
    pub report: ProcessingReport,
}

impl ProcessingSummary {
    pub fn artifacts(&self) -> impl Iterator<Item = (&ArtifactKind, &PathBuf)> {
        self.report.artifacts.iter()
    }
}

/// Tracks branch outcomes so one failing analysis leaves its siblings' files in place.
struct BranchRunner<'a> {
    input: &'a Path,
    output_dir: Option<&'a Path>,
    report: ProcessingReport,
    first_error: Option<Error>,
}

impl BranchRunner<'_> {
    fn run<F>(&mut self, kind: ArtifactKind, branch: F)
    where
        F: FnOnce(&Path, &mut ProcessingReport) -> Result<()>,
    {
        let path = output_path_for(self.input, self.output_dir, kind);
        match branch(&path, &mut self.report) {
            Ok(()) => {
                info!("{} output written: {:?}", kind, path);
                self.report.artifacts.insert(kind, path);
            }
            Err(e) => {
                warn!("{} output for {:?} failed: {}", kind, self.input, e);
                self.report.failures.insert(kind, e.to_string());
                if self.first_error.is_none() {
                    self.first_error = Some(e);
                }
            }
        }
    }
}

/// Decode `input`, resample/filter it, run each requested analysis and write
/// one artifact per branch. Branches run independently: a failing analysis
/// does not remove outputs already written, and its error is returned after
/// the remaining branches finish.
pub fn process_bmp_to_path(
    input: &Path,
    output_dir: Option<&Path>,
    params: &PipelineParams,
) -> Result<ProcessingSummary> {
    params.validate()?;
    if let Some(dir) = output_dir {
        std::fs::create_dir_all(dir)?;
    }

    let source = read_bmp(input)?;
    let processed = process_grid(&source, params)?;

    let report = ProcessingReport::new(
        input,
        (source.width(), source.height()),
        (processed.width(), processed.height()),
        params,
    );
    let mut runner = BranchRunner {
        input,
        output_dir,
        report,
        first_error: None,
    };

    runner.run(ArtifactKind::Processed, |path, _| write_bmp(path, &processed));

    if let Some(fill) = params.fill {
        runner.run(ArtifactKind::Fill, |path, report| {
            let region = flood_fill_region(&processed, fill.tolerance, fill.seed)?;
            report.fill_pixels = Some(region.pixels);
            write_bmp(path, &region.grid)
        });
    }

    if let Some(contour) = params.contour {
        runner.run(ArtifactKind::Contour, |path, report| {
            let mask = extract_contour(&processed, contour.tolerance, contour.suppress_radius);
            report.contour_edges = Some(mask.count_where(is_edge_pixel));
            write_bmp(path, &mask)
        });
    }

    if let Some(lines) = params.lines {
        runner.run(ArtifactKind::Lines, |path, report| {
            let trace = trace_lines(&processed, &lines)?;
            report.lines = Some(trace.curves.iter().map(LineSummary::from).collect());
            write_bmp(path, &trace.grid)
        });
    }

    if params.report {
        let path = output_path_for(input, output_dir, ArtifactKind::Report);
        runner
            .report
            .artifacts
            .insert(ArtifactKind::Report, path.clone());
        if let Err(e) = write_report(&path, &runner.report) {
            runner.report.artifacts.remove(&ArtifactKind::Report);
            warn!("Report for {:?} failed: {}", input, e);
            if runner.first_error.is_none() {
                runner.first_error = Some(e);
            }
        }
    }

    match runner.first_error {
        Some(e) => Err(e),
        None => Ok(ProcessingSummary {
            report: runner.report,
        }),
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

fn is_bmp(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("bmp"))
}

/// Return the `.bmp` files directly inside `input_dir` in name order, plus
/// the number of other entries that were skipped.
pub fn iterate_bitmaps(input_dir: &Path) -> Result<(Vec<PathBuf>, usize)> {
    let mut files = Vec::new();
    let mut skipped = 0;
    for entry in std::fs::read_dir(input_dir)? {
        let path = entry?.path();
        if is_bmp(&path) {
            files.push(path);
        } else {
            info!("Skipping non-bitmap entry: {:?}", path);
            skipped += 1;
        }
    }
    files.sort();
    Ok((files, skipped))
}

/// Process all bitmaps from `input_dir` into `output_dir` using `params`.
/// If `continue_on_error` is true, errors are counted in the report and processing continues; otherwise, the first error is returned.
pub fn process_directory_to_path(
    input_dir: &Path,
    output_dir: &Path,
    params: &PipelineParams,
    continue_on_error: bool,
) -> Result<BatchReport> {
    params.validate()?;
    std::fs::create_dir_all(output_dir)?;

    let (files, skipped) = iterate_bitmaps(input_dir)?;
    let mut report = BatchReport {
        skipped,
        ..BatchReport::default()
    };

    for path in files {
        info!("Processing: {:?} -> {:?}", path, output_dir);
        match process_bmp_to_path(&path, Some(output_dir), params) {
            Ok(_) => report.processed += 1,
            Err(e) => {
                warn!("Error processing {:?}: {}", path, e);
                report.errors += 1;
                if !continue_on_error {
                    return Err(e);
                }
            }
        }
    }

    info!(
        "Batch complete: processed={} skipped={} errors={}",
        report.processed, report.skipped, report.errors
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_names_use_source_stem_and_suffix() {
        let input = Path::new("/data/photos/cat.bmp");
        assert_eq!(
            output_path_for(input, None, ArtifactKind::Processed),
            PathBuf::from("/data/photos/cat-processed.bmp")
        );
        assert_eq!(
            output_path_for(input, Some(Path::new("/out")), ArtifactKind::Lines),
            PathBuf::from("/out/cat-lines.bmp")
        );
        assert_eq!(
            output_path_for(Path::new("cat.bmp"), None, ArtifactKind::Report),
            PathBuf::from("cat-report.json")
        );
    }
}
