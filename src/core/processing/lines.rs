//! Straight-line tracing over a contour mask.
//!
//! Every unvisited edge pixel seeds eight directional walks. A walk steps
//! along its slope and looks for any edge pixel in a small window around the
//! next position; it ends after `max_gap_run` consecutive misses. Opposite
//! walks are paired, and the pair with the largest combined length becomes a
//! line through the seed when it reaches `min_line_length`.
use tracing::{debug, info};

use crate::core::grid::{BooleanMask, PixelGrid};
use crate::core::params::LineParams;
use crate::core::processing::contour::{extract_contour, is_edge_pixel};
use crate::error::Result;
use crate::types::{Coord, Curve};

/// Contour tolerance used to build the mask that lines are traced on.
pub const LINE_CONTOUR_TOLERANCE: u32 = 35;

/// Unit slopes in `(d_row, d_col)` order with `d_row, d_col` in `-1..=1`, `(0, 0)` skipped.
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Index pairs into [`DIRECTIONS`] pointing in opposite directions.
pub const OPPOSITE_PAIRS: [(usize, usize); 4] = [(0, 7), (1, 6), (2, 5), (3, 4)];

/// Edge mask with accepted line pixels recolored, plus the lines themselves.
#[derive(Debug, Clone)]
pub struct LineTrace {
    pub grid: PixelGrid,
    pub curves: Vec<Curve>,
}

/// State carried by one directional walk.
#[derive(Debug)]
struct Walk {
    pos: (isize, isize),
    slope: (isize, isize),
    gap: usize,
    path: Vec<Coord>,
    length: usize,
}

impl Walk {
    fn new(start: Coord, slope: (isize, isize)) -> Self {
        Self {
            pos: (start.0 as isize, start.1 as isize),
            slope,
            gap: 0,
            path: Vec::new(),
            length: 0,
        }
    }

    /// Step until `max_gap_run` consecutive misses. Positions that found a
    /// continuation are marked visited and appended to the path.
    fn run(mut self, mask: &PixelGrid, visited: &mut BooleanMask, params: &LineParams) -> Curve {
        while self.gap < params.max_gap_run {
            let next = (self.pos.0 + self.slope.0, self.pos.1 + self.slope.1);
            if window_has_edge(mask, next, params.search_radius) {
                self.gap = 0;
                self.length += 1;
                if let Some(coord) = in_bounds(mask, self.pos) {
                    visited.set(coord);
                    self.path.push(coord);
                }
            } else {
                self.gap += 1;
            }
            self.pos = next;
        }
        Curve {
            points: self.path,
            length: self.length,
        }
    }
}

fn in_bounds(mask: &PixelGrid, (row, col): (isize, isize)) -> Option<Coord> {
    if row < 0 || col < 0 {
        return None;
    }
    let coord = (row as usize, col as usize);
    mask.contains(coord).then_some(coord)
}

/// Any edge pixel in the square of half-width `radius` around `center`.
fn window_has_edge(mask: &PixelGrid, center: (isize, isize), radius: usize) -> bool {
    let r = radius as isize;
    let (h, w) = mask.dim();
    let r0 = (center.0 - r).max(0);
    let r1 = (center.0 + r).min(h as isize - 1);
    let c0 = (center.1 - r).max(0);
    let c1 = (center.1 + r).min(w as isize - 1);
    if r0 > r1 || c0 > c1 {
        return false;
    }
    (r0..=r1).any(|row| {
        (c0..=c1).any(|col| is_edge_pixel(mask.array()[[row as usize, col as usize]]))
    })
}

/// Trace lines over an existing edge mask in row-major seed order.
///
/// Length counts confirmed steps, not pixels: a straight run of `L` edge
/// pixels measures `L - 1` from either end, so it is accepted only when
/// `min_line_length <= L - 1`.
pub fn trace_mask(mask: &PixelGrid, params: &LineParams) -> Vec<Curve> {
    let (h, w) = mask.dim();
    let mut visited = BooleanMask::like(mask);
    let mut curves = Vec::new();

    for row in 0..h {
        for col in 0..w {
            if visited.get((row, col)) || !is_edge_pixel(mask.array()[[row, col]]) {
                continue;
            }

            let walks: Vec<Curve> = DIRECTIONS
                .iter()
                .map(|&slope| Walk::new((row, col), slope).run(mask, &mut visited, params))
                .collect();

            let mut best: Option<(usize, usize)> = None;
            let mut best_len = 0usize;
            for &(a, b) in &OPPOSITE_PAIRS {
                let len = walks[a].length + walks[b].length;
                if best.is_none() || len > best_len {
                    best = Some((a, b));
                    best_len = len;
                }
            }

            let Some((a, b)) = best else { continue };
            if best_len >= params.min_line_length {
                let mut points = walks[a].points.clone();
                points.extend_from_slice(&walks[b].points);
                curves.push(Curve {
                    points,
                    length: best_len,
                });
            }
        }
    }

    debug!("Traced {} lines from {}x{} mask", curves.len(), w, h);
    curves
}

/// Mark accepted line pixels: blue and green zeroed, red kept.
pub fn recolor_curves(grid: &mut PixelGrid, curves: &[Curve]) {
    let data = grid.array_mut();
    for &(row, col) in curves.iter().flat_map(|c| c.points.iter()) {
        if let Some(px) = data.get_mut((row, col)) {
            px.g = 0;
            px.b = 0;
        }
    }
}

/// Build the contour mask of `grid` and trace lines over it.
pub fn trace_lines(grid: &PixelGrid, params: &LineParams) -> Result<LineTrace> {
    params.validate()?;
    let mask = extract_contour(grid, LINE_CONTOUR_TOLERANCE, 0);
    let curves = trace_mask(&mask, params);

    info!(
        "Line tracing (gap {}, radius {}, min length {}) accepted {} lines",
        params.max_gap_run,
        params.search_radius,
        params.min_line_length,
        curves.len()
    );

    let mut out = mask;
    recolor_curves(&mut out, &curves);
    Ok(LineTrace { grid: out, curves })
}
