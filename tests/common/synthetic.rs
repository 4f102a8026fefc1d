use std::path::{Path, PathBuf};

use bmpro::{PixelGrid, Rgb, write_bmp};

/// `h x w` grid of `background` with a filled `block` rectangle `(row0, col0, rows, cols)`.
pub fn block_grid(
    h: usize,
    w: usize,
    background: Rgb,
    fill: Rgb,
    (row0, col0, rows, cols): (usize, usize, usize, usize),
) -> PixelGrid {
    let mut grid = PixelGrid::filled(h, w, background).unwrap();
    for r in row0..row0 + rows {
        for c in col0..col0 + cols {
            grid.set(r, c, fill).unwrap();
        }
    }
    grid
}

pub fn write_fixture(dir: &Path, name: &str, grid: &PixelGrid) -> PathBuf {
    let path = dir.join(name);
    write_bmp(&path, grid).unwrap();
    path
}
