use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "bmpro", version, about = "BMPRO CLI")]
pub struct CliArgs {
    /// Input 24-bit BMP file (single file mode)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Input directory containing BMP files (batch mode)
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Output directory (defaults to the source's directory in single file mode)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// JSON parameter file; flags below override its fields
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Resample scale: > 1 downscales by block averaging, < 1 upscales
    #[arg(short, long)]
    pub scale: Option<f64>,

    /// Apply the inverse tint while downscaling
    #[arg(long, default_value_t = false)]
    pub tint_inverse: bool,

    /// Blur the resampled image
    #[arg(long, default_value_t = false)]
    pub blur: bool,

    /// Apply sepia after resampling (and after blur)
    #[arg(long, default_value_t = false)]
    pub sepia: bool,

    /// Write a flood-filled region grown from the seed pixel
    #[arg(long, default_value_t = false)]
    pub fill: bool,

    /// Per-channel tolerance for flood fill
    #[arg(long)]
    pub fill_tolerance: Option<u32>,

    /// Flood fill seed row
    #[arg(long)]
    pub seed_row: Option<usize>,

    /// Flood fill seed column
    #[arg(long)]
    pub seed_col: Option<usize>,

    /// Write the contour mask
    #[arg(long, default_value_t = false)]
    pub contour: bool,

    /// Per-channel tolerance for edge detection
    #[arg(long)]
    pub contour_tolerance: Option<u32>,

    /// Edge suppression radius (0 disables thinning)
    #[arg(long)]
    pub suppress_radius: Option<usize>,

    /// Write the traced lines image
    #[arg(long, default_value_t = false)]
    pub lines: bool,

    /// Consecutive misses that end a directional walk
    #[arg(long)]
    pub max_gap_run: Option<usize>,

    /// Half-width of the continuation search window
    #[arg(long)]
    pub search_radius: Option<usize>,

    /// Minimum combined walk length for an accepted line
    #[arg(long)]
    pub min_line_length: Option<usize>,

    /// Write a JSON report next to the outputs
    #[arg(long, default_value_t = false)]
    pub report: bool,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,

    /// Batch mode: continue processing other files when one fails
    #[arg(long, default_value_t = false)]
    pub batch: bool,
}

impl CliArgs {
    /// True when no source was given on the command line.
    pub fn needs_prompt(&self) -> bool {
        self.input.is_none() && self.input_dir.is_none()
    }
}
