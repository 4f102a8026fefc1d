//! Edge mask extraction by local color differences.
//!
//! The input is blurred, then every pixel is compared with its eight
//! neighbors. A pixel whose difference to any in-bounds neighbor exceeds the
//! tolerance on some channel is an edge. Accepted edges suppress a square
//! zone around themselves so that later edges in row-major order falling
//! inside it are dropped, which thins thick responses to sparse points.
use tracing::debug;

use crate::core::grid::{BooleanMask, PixelGrid};
use crate::core::processing::filters::blur;
use crate::types::Rgb;

/// Orthogonal neighbors first, then diagonals.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Edge test on an already-blurred grid.
#[inline]
pub fn is_edge(blurred: &PixelGrid, row: usize, col: usize, tolerance: u32) -> bool {
    let Some(center) = blurred.get(row, col) else {
        return false;
    };
    NEIGHBOR_OFFSETS.iter().any(|&(dr, dc)| {
        blurred
            .get_signed(row as isize + dr, col as isize + dc)
            .is_some_and(|n| !center.within_tolerance(n, tolerance))
    })
}

/// Binary edge mask: white at accepted edges, black elsewhere.
///
/// The scan must stay sequential and row-major; suppression from earlier
/// pixels decides which later ones survive.
pub fn extract_contour(grid: &PixelGrid, tolerance: u32, suppress_radius: usize) -> PixelGrid {
    let blurred = blur(grid);
    let (h, w) = grid.dim();

    let mut mask = PixelGrid::from_array_unchecked(ndarray::Array2::default((h, w)));
    let mut suppressed = BooleanMask::like(grid);
    let mut edges = 0usize;

    for row in 0..h {
        for col in 0..w {
            if suppressed.get((row, col)) || !is_edge(&blurred, row, col, tolerance) {
                continue;
            }
            mask.array_mut()[[row, col]] = Rgb::WHITE;
            suppressed.set_square((row, col), suppress_radius);
            edges += 1;
        }
    }

    debug!(
        "Contour extraction (tolerance {}, suppress radius {}) found {} edge pixels",
        tolerance, suppress_radius, edges
    );
    mask
}

pub fn is_edge_pixel(px: Rgb) -> bool {
    px == Rgb::WHITE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_grid(h: usize, w: usize, boundary: usize) -> PixelGrid {
        let rows = (0..h)
            .map(|_| {
                (0..w)
                    .map(|c| if c < boundary { Rgb::BLACK } else { Rgb::WHITE })
                    .collect()
            })
            .collect();
        PixelGrid::from_rows(rows).unwrap()
    }

    fn edge_coords(mask: &PixelGrid) -> Vec<(usize, usize)> {
        mask.indexed_iter()
            .filter(|&(_, px)| is_edge_pixel(px))
            .map(|(c, _)| c)
            .collect()
    }

    fn block_grid(size: usize, lo: usize, hi: usize) -> PixelGrid {
        let mut g = PixelGrid::new(size, size).unwrap();
        for r in lo..=hi {
            for c in lo..=hi {
                g.set(r, c, Rgb::WHITE).unwrap();
            }
        }
        g
    }

    #[test]
    fn uniform_black_grid_has_no_edges() {
        let g = PixelGrid::new(7, 9).unwrap();
        for tol in [0, 5, 255] {
            assert_eq!(extract_contour(&g, tol, 0).count_where(is_edge_pixel), 0);
        }
    }

    #[test]
    fn uniform_color_only_reports_blur_border_falloff() {
        let g = PixelGrid::filled(9, 11, Rgb::new(90, 10, 200)).unwrap();
        let mask = extract_contour(&g, 0, 0);
        for ((row, col), px) in mask.indexed_iter() {
            let ring = row.min(col).min(8 - row).min(10 - col);
            if ring >= 2 {
                assert!(!is_edge_pixel(px), "interior edge at ({row},{col})");
            }
        }
        assert_eq!(extract_contour(&g, 255, 0).count_where(is_edge_pixel), 0);
    }

    #[test]
    fn edges_stay_near_the_block() {
        let g = block_grid(12, 4, 7);
        let edges = edge_coords(&extract_contour(&g, 35, 0));
        assert!(!edges.is_empty());
        for &(row, col) in &edges {
            assert!(
                (2..=9).contains(&row) && (2..=9).contains(&col),
                "edge at ({row},{col}) far from the block"
            );
        }
    }

    #[test]
    fn zero_radius_keeps_every_edge() {
        let g = split_grid(6, 8, 4);
        let blurred = blur(&g);
        let mask = extract_contour(&g, 35, 0);
        for ((row, col), px) in mask.indexed_iter() {
            assert_eq!(is_edge_pixel(px), is_edge(&blurred, row, col, 35));
        }
    }

    #[test]
    fn suppression_keeps_accepted_edges_apart() {
        let g = split_grid(12, 12, 6);
        let radius = 2;
        let edges = edge_coords(&extract_contour(&g, 35, radius));
        let dense = edge_coords(&extract_contour(&g, 35, 0));
        assert!(edges.len() < dense.len());
        // first edge in scan order always survives
        assert_eq!(edges.first(), dense.first());
        for (i, a) in edges.iter().enumerate() {
            for b in &edges[i + 1..] {
                let cheb = a.0.abs_diff(b.0).max(a.1.abs_diff(b.1));
                assert!(cheb > radius, "{:?} and {:?} within suppression zone", a, b);
            }
        }
    }

    #[test]
    fn high_tolerance_suppresses_everything() {
        let g = split_grid(5, 5, 2);
        assert_eq!(extract_contour(&g, 255, 0).count_where(is_edge_pixel), 0);
    }
}
