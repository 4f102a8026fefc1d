use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Coord;

/// Region fill settings: per-channel tolerance against the seed color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloodFillParams {
    pub tolerance: u32,
    /// `(row, col)` in the resampled grid
    pub seed: Coord,
}

impl Default for FloodFillParams {
    fn default() -> Self {
        Self {
            tolerance: 10,
            seed: (0, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourParams {
    pub tolerance: u32,
    /// Half-width of the square suppressed around each accepted edge pixel; 0 disables thinning
    pub suppress_radius: usize,
}

impl Default for ContourParams {
    fn default() -> Self {
        Self {
            tolerance: 35,
            suppress_radius: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineParams {
    /// Consecutive misses that end a directional walk
    pub max_gap_run: usize,
    /// Half-width of the window searched around each next position
    pub search_radius: usize,
    /// Minimum summed length of an opposite-direction pair
    pub min_line_length: usize,
}

impl Default for LineParams {
    fn default() -> Self {
        Self {
            max_gap_run: 3,
            search_radius: 1,
            min_line_length: 10,
        }
    }
}

impl LineParams {
    pub fn validate(&self) -> Result<()> {
        if self.max_gap_run == 0 {
            return Err(Error::invalid("max_gap_run", self.max_gap_run));
        }
        if self.min_line_length == 0 {
            return Err(Error::invalid("min_line_length", self.min_line_length));
        }
        Ok(())
    }
}

/// Processing parameters suitable for config files and interactive sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    /// Resample factor: >1 shrinks, <1 enlarges, 1 keeps the size
    pub scale: f64,
    pub tint_inverse: bool,
    pub blur: bool,
    pub sepia: bool,
    pub fill: Option<FloodFillParams>,
    pub contour: Option<ContourParams>,
    pub lines: Option<LineParams>,
    /// Write a JSON report next to the outputs
    pub report: bool,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            scale: 2.0,
            tint_inverse: false,
            blur: false,
            sepia: false,
            fill: None,
            contour: None,
            lines: None,
            report: false,
        }
    }
}

impl PipelineParams {
    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(Error::invalid("scale", self.scale));
        }
        if let Some(lines) = &self.lines {
            lines.validate()?;
        }
        Ok(())
    }

    pub fn from_json_file(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let params: PipelineParams = serde_json::from_str(&text)?;
        params.validate()?;
        Ok(params)
    }
}
