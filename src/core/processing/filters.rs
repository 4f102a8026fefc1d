use ndarray::{Array2, Zip};
use tracing::debug;

use crate::core::grid::PixelGrid;
use crate::types::Rgb;

/// 3x3 blur weights indexed `[row_offset + 1][col_offset + 1]`.
///
/// The weights sum to 0.8725, not 1. Out-of-bounds neighbors are skipped
/// without redistributing their weight, so border pixels come out darker.
pub const BLUR_KERNEL: [[f64; 3]; 3] = [
    [0.015, 0.125, 0.015],
    [0.25, 0.0625, 0.25],
    [0.015, 0.125, 0.015],
];

/// Sepia matrix. Output channel `t` is `sum_i channel_i * SEPIA_MATRIX[i][t]`
/// with channels in (red, green, blue) order.
pub const SEPIA_MATRIX: [[f64; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Blur into a fresh grid; the source is only read.
pub fn blur(grid: &PixelGrid) -> PixelGrid {
    let (h, w) = grid.dim();
    let mut out = Array2::<Rgb>::default((h, w));

    // Each output cell depends only on the immutable source
    Zip::indexed(&mut out).par_for_each(|(row, col), px| {
        let mut acc = [0.0_f64; 3];
        for (dr, weights) in BLUR_KERNEL.iter().enumerate() {
            for (dc, &weight) in weights.iter().enumerate() {
                let nr = row as isize + dr as isize - 1;
                let nc = col as isize + dc as isize - 1;
                if let Some(n) = grid.get_signed(nr, nc) {
                    for (a, v) in acc.iter_mut().zip(n.channels()) {
                        *a += v as f64 * weight;
                    }
                }
            }
        }
        *px = Rgb::from_channels(acc.map(|v| v as u8));
    });

    PixelGrid::from_array_unchecked(out)
}

/// Replace `grid` with its blurred version.
pub fn apply_blur(grid: &mut PixelGrid) {
    debug!("Applying 3x3 blur to {}x{} grid", grid.width(), grid.height());
    *grid = blur(grid);
}

#[inline]
pub fn sepia_pixel(px: Rgb) -> Rgb {
    let src = px.channels();
    let mut out = [0u8; 3];
    for (t, o) in out.iter_mut().enumerate() {
        let v: f64 = src
            .iter()
            .zip(SEPIA_MATRIX.iter())
            .map(|(&c, row)| c as f64 * row[t])
            .sum();
        *o = v.trunc().clamp(0.0, 255.0) as u8;
    }
    Rgb::from_channels(out)
}

/// Sepia tone in place; each pixel reads only its own original channels.
pub fn apply_sepia(grid: &mut PixelGrid) {
    debug!("Applying sepia to {}x{} grid", grid.width(), grid.height());
    grid.array_mut().par_map_inplace(|px| *px = sepia_pixel(*px));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(h: usize, w: usize, c: u8) -> PixelGrid {
        PixelGrid::filled(h, w, Rgb::new(c, c, c)).unwrap()
    }

    #[test]
    fn blur_uniform_interior_is_flat_and_border_darker() {
        let g = blur(&uniform(5, 6, 200));
        let interior = g.get(2, 2).unwrap();
        assert_eq!(interior, Rgb::new(174, 174, 174));

        for ((row, col), px) in g.indexed_iter() {
            let on_border = row == 0 || col == 0 || row == 4 || col == 5;
            if on_border {
                assert!(px.r < interior.r, "border ({row},{col}) = {:?}", px);
            } else {
                assert_eq!(px, interior);
            }
        }
    }

    #[test]
    fn blur_corner_keeps_only_in_bounds_weights() {
        let g = blur(&uniform(3, 3, 200));
        // center 0.0625 + right 0.25 + below 0.125 + diagonal 0.015
        assert_eq!(g.get(0, 0), Some(Rgb::new(90, 90, 90)));
        // row 0 has full left/right weights and the row below
        assert_eq!(g.get(0, 1), Some(Rgb::new(143, 143, 143)));
    }

    #[test]
    fn blur_does_not_read_partial_output() {
        let mut g = uniform(3, 3, 0);
        g.set(1, 1, Rgb::new(160, 0, 0)).unwrap();
        let b = blur(&g);
        assert_eq!(b.get(1, 1).unwrap().r, 10);
        assert_eq!(b.get(1, 0).unwrap().r, 40);
        assert_eq!(b.get(0, 1).unwrap().r, 20);
        assert_eq!(b.get(0, 0).unwrap().r, 2);
        assert_eq!(b.get(1, 1).unwrap().g, 0);
    }

    #[test]
    fn sepia_uses_column_of_matrix_per_target_channel() {
        assert_eq!(sepia_pixel(Rgb::new(255, 0, 0)), Rgb::new(100, 196, 48));
        assert_eq!(sepia_pixel(Rgb::WHITE), Rgb::new(255, 255, 124));
        assert_eq!(sepia_pixel(Rgb::BLACK), Rgb::BLACK);
    }

    #[test]
    fn sepia_in_place_touches_every_pixel() {
        let mut g = uniform(2, 3, 255);
        apply_sepia(&mut g);
        assert_eq!(g.count_where(|px| px == Rgb::new(255, 255, 124)), 6);
    }
}
