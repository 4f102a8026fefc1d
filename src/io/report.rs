use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::params::PipelineParams;
use crate::error::Result;
use crate::types::{ArtifactKind, Coord, Curve};

/// Per-line summary; full point lists stay in memory only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSummary {
    pub length: usize,
    pub points: usize,
    pub start: Option<Coord>,
    pub end: Option<Coord>,
}

impl From<&Curve> for LineSummary {
    fn from(c: &Curve) -> Self {
        Self {
            length: c.length,
            points: c.points.len(),
            start: c.first(),
            end: c.last(),
        }
    }
}

/// JSON sidecar describing one processed source bitmap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingReport {
    pub source: PathBuf,
    pub processed_at: String,
    /// `(width, height)`
    pub input_size: (usize, usize),
    pub output_size: (usize, usize),
    pub params: PipelineParams,
    pub fill_pixels: Option<usize>,
    pub contour_edges: Option<usize>,
    pub lines: Option<Vec<LineSummary>>,
    pub artifacts: BTreeMap<ArtifactKind, PathBuf>,
    pub failures: BTreeMap<ArtifactKind, String>,
}

impl ProcessingReport {
    pub fn new(
        source: &Path,
        input_size: (usize, usize),
        output_size: (usize, usize),
        params: &PipelineParams,
    ) -> Self {
        Self {
            source: source.to_path_buf(),
            processed_at: chrono::Utc::now().to_rfc3339(),
            input_size,
            output_size,
            params: params.clone(),
            fill_pixels: None,
            contour_edges: None,
            lines: None,
            artifacts: BTreeMap::new(),
            failures: BTreeMap::new(),
        }
    }
}

/// Write the report as pretty-printed JSON.
pub fn write_report(path: &Path, report: &ProcessingReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(json.as_bytes())?;
    writer.flush()?;
    info!("Created JSON report: {:?}", path);
    Ok(())
}
