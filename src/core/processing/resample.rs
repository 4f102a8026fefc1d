use ndarray::{Array2, Zip};
use tracing::{info, warn};

use crate::core::grid::PixelGrid;
use crate::error::{Error, Result};
use crate::types::Rgb;

/// Offset added to the target channel's block sum in the inverse-tint variant.
pub const TINT_OFFSET: u64 = 10;

/// Largest pixel count an output grid may hold.
pub const MAX_CELLS: usize = isize::MAX as usize / std::mem::size_of::<Rgb>();

/// Output dimensions for `scale`: `floor(height/scale) x floor(width/scale)`.
///
/// Rejects non-finite or non-positive scales and scales that would leave
/// no rows or columns.
pub fn calculate_resample_dimensions(
    rows: usize,
    cols: usize,
    scale: f64,
) -> Result<(usize, usize)> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(Error::invalid("scale", scale));
    }
    let new_rows = (rows as f64 / scale).floor();
    let new_cols = (cols as f64 / scale).floor();
    if new_rows < 1.0 || new_cols < 1.0 {
        return Err(Error::invalid(
            "scale",
            format!("{} leaves a {}x{} grid with no pixels", scale, cols, rows),
        ));
    }
    let too_large = || {
        Error::invalid(
            "scale",
            format!("{} upsamples {}x{} beyond addressable size", scale, cols, rows),
        )
    };
    if new_rows > u32::MAX as f64 || new_cols > u32::MAX as f64 {
        return Err(too_large());
    }
    let (new_rows, new_cols) = (new_rows as usize, new_cols as usize);
    match new_rows.checked_mul(new_cols) {
        Some(cells) if cells <= MAX_CELLS => Ok((new_rows, new_cols)),
        _ => Err(too_large()),
    }
}

/// Resample `grid` by `scale`.
///
/// - `scale >= 1`: block averaging over `k x k` blocks with `k = trunc(scale)`,
///   block origin `floor(i * scale)`. With `tint_inverse` each output channel
///   is built from the biased maximum described on [`tinted_block`].
/// - `scale < 1`: nearest-neighbor upsampling.
pub fn resample(grid: &PixelGrid, scale: f64, tint_inverse: bool) -> Result<PixelGrid> {
    let (rows, cols) = grid.dim();
    let (new_rows, new_cols) = calculate_resample_dimensions(rows, cols, scale)?;

    info!(
        "Resampling {}x{} -> {}x{} (scale {}, tint_inverse {})",
        cols, rows, new_cols, new_rows, scale, tint_inverse
    );

    let out = if scale >= 1.0 {
        if scale.fract() != 0.0 {
            warn!(
                "Non-integer scale {} averages over {}x{} blocks",
                scale,
                scale.trunc(),
                scale.trunc()
            );
        }
        downscale(grid, new_rows, new_cols, scale, tint_inverse)
    } else {
        if tint_inverse {
            warn!("Inverse tint only applies when downscaling; ignored for scale {}", scale);
        }
        upscale(grid, new_rows, new_cols, scale)
    };

    Ok(PixelGrid::from_array_unchecked(out))
}

fn downscale(
    grid: &PixelGrid,
    new_rows: usize,
    new_cols: usize,
    scale: f64,
    tint_inverse: bool,
) -> Array2<Rgb> {
    let src = grid.array();
    let (rows, cols) = src.dim();
    let step = (scale.trunc() as usize).clamp(1, rows.min(cols));
    let total = (step * step) as u64;

    let mut out = Array2::<Rgb>::default((new_rows, new_cols));
    Zip::indexed(&mut out).par_for_each(|(i, j), px| {
        let r0 = ((i as f64 * scale).floor() as usize).min(rows - step);
        let c0 = ((j as f64 * scale).floor() as usize).min(cols - step);

        let mut sums = [0u64; 3];
        for row in src.slice(ndarray::s![r0..r0 + step, c0..c0 + step]).rows() {
            for p in row {
                for (s, v) in sums.iter_mut().zip(p.channels()) {
                    *s += v as u64;
                }
            }
        }

        *px = if tint_inverse {
            tinted_block(sums, total)
        } else {
            Rgb::from_channels(sums.map(|s| (s / total) as u8))
        };
    });
    out
}

/// Biased block value: for each target channel, that channel's block sum is
/// raised by [`TINT_OFFSET`] and clamped to `[0, 255]`, then the maximum of it
/// and the other two raw sums is divided by `total`.
pub fn tinted_block(sums: [u64; 3], total: u64) -> Rgb {
    let mut out = [0u8; 3];
    for (t, o) in out.iter_mut().enumerate() {
        let biased = (sums[t] + TINT_OFFSET).min(255);
        let peak = sums
            .iter()
            .enumerate()
            .filter(|&(c, _)| c != t)
            .map(|(_, &s)| s)
            .fold(biased, u64::max);
        *o = (peak / total).min(255) as u8;
    }
    Rgb::from_channels(out)
}

fn upscale(grid: &PixelGrid, new_rows: usize, new_cols: usize, scale: f64) -> Array2<Rgb> {
    let src = grid.array();
    let (rows, cols) = src.dim();

    let mut out = Array2::<Rgb>::default((new_rows, new_cols));
    Zip::indexed(&mut out).par_for_each(|(x, y), px| {
        let sr = ((x as f64 * scale).floor() as usize).min(rows - 1);
        let sc = ((y as f64 * scale).floor() as usize).min(cols - 1);
        *px = src[[sr, sc]];
    });
    out
}
