use tracing::debug;

use crate::core::grid::{BooleanMask, PixelGrid};
use crate::error::Result;
use crate::types::Coord;

/// Result of a region fill: the otherwise-black grid and the filled pixel count.
#[derive(Debug, Clone)]
pub struct FilledRegion {
    pub grid: PixelGrid,
    pub pixels: usize,
}

/// Grow the 4-connected region of pixels whose channels all lie within
/// `tolerance` of the seed's color. The output is zeroed except for the
/// region, which keeps its original colors.
pub fn flood_fill(grid: &PixelGrid, tolerance: u32, seed: Coord) -> Result<PixelGrid> {
    flood_fill_region(grid, tolerance, seed).map(|r| r.grid)
}

pub fn flood_fill_region(grid: &PixelGrid, tolerance: u32, seed: Coord) -> Result<FilledRegion> {
    grid.check_coord(seed)?;
    let (h, w) = grid.dim();
    let seed_color = grid.array()[[seed.0, seed.1]];

    let mut out = PixelGrid::new(h, w)?;
    let mut visited = BooleanMask::like(grid);
    let mut pixels = 0usize;

    // Neighbors are pushed unconditionally and validated on pop
    let mut stack: Vec<(isize, isize)> = vec![(seed.0 as isize, seed.1 as isize)];
    while let Some((row, col)) = stack.pop() {
        let Some(px) = grid.get_signed(row, col) else {
            continue;
        };
        let coord = (row as usize, col as usize);
        if visited.get(coord) || !px.within_tolerance(seed_color, tolerance) {
            continue;
        }

        visited.set(coord);
        out.array_mut()[[coord.0, coord.1]] = px;
        pixels += 1;

        stack.push((row - 1, col));
        stack.push((row + 1, col));
        stack.push((row, col - 1));
        stack.push((row, col + 1));
    }

    debug!(
        "Flood fill from {:?} (tolerance {}) covered {} of {} pixels",
        seed,
        tolerance,
        pixels,
        h * w
    );
    Ok(FilledRegion { grid: out, pixels })
}
