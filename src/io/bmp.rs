//! Uncompressed 24-bit BMP codec.
//!
//! Layout: 14-byte file header (`BM`, file size, two reserved words, pixel
//! data offset), 40-byte info header, then BGR rows padded to a multiple of
//! four bytes. Rows are stored bottom-up unless the header height is negative.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ndarray::Array2;
use tracing::{debug, info};

use crate::core::grid::PixelGrid;
use crate::error::{Error, Result};
use crate::types::Rgb;

pub const SIGNATURE: [u8; 2] = *b"BM";
pub const FILE_HEADER_LEN: usize = 14;
pub const INFO_HEADER_LEN: usize = 40;
pub const BITS_PER_PIXEL: u16 = 24;

/// Bytes of zero padding after a row of `width` pixels.
#[inline]
pub fn row_padding(width: usize) -> usize {
    (4 - (width * 3) % 4) % 4
}

fn u16_at(data: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([data[at], data[at + 1]])
}

fn u32_at(data: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}

fn i32_at(data: &[u8], at: usize) -> i32 {
    i32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}

/// Decode a BMP byte stream into a grid with row 0 at the top.
pub fn decode(data: &[u8]) -> Result<PixelGrid> {
    if data.len() < 2 || data[..2] != SIGNATURE {
        return Err(Error::format("missing BM signature"));
    }
    if data.len() < FILE_HEADER_LEN + INFO_HEADER_LEN {
        return Err(Error::format(format!(
            "header truncated: {} bytes",
            data.len()
        )));
    }

    let offset = u32_at(data, 10) as usize;
    let info_len = u32_at(data, 14) as usize;
    let width = i32_at(data, 18);
    let height = i32_at(data, 22);
    let bit_count = u16_at(data, 28);
    let compression = u32_at(data, 30);

    if info_len < INFO_HEADER_LEN {
        return Err(Error::format(format!("unsupported info header size {}", info_len)));
    }
    if bit_count != BITS_PER_PIXEL {
        return Err(Error::format(format!(
            "unsupported bit depth {} (only 24 bpp)",
            bit_count
        )));
    }
    if compression != 0 {
        return Err(Error::format(format!("unsupported compression {}", compression)));
    }
    if width <= 0 || height == 0 {
        return Err(Error::format(format!("empty bitmap {}x{}", width, height)));
    }

    let top_down = height < 0;
    let cols = width as usize;
    let rows = height.unsigned_abs() as usize;
    let row_bytes = cols * 3;
    let stride = row_bytes + row_padding(cols);

    // The final row's padding may be missing in some writers
    let needed = stride
        .checked_mul(rows - 1)
        .and_then(|v| v.checked_add(row_bytes))
        .and_then(|v| v.checked_add(offset))
        .ok_or_else(|| Error::format("pixel data size overflows"))?;
    if data.len() < needed {
        return Err(Error::format(format!(
            "pixel data truncated: need {} bytes, have {}",
            needed,
            data.len()
        )));
    }

    let mut grid = Array2::<Rgb>::default((rows, cols));
    for file_row in 0..rows {
        let start = offset + file_row * stride;
        let src = &data[start..start + row_bytes];
        let row = if top_down { file_row } else { rows - 1 - file_row };
        for (px, bgr) in grid.row_mut(row).iter_mut().zip(src.chunks_exact(3)) {
            *px = Rgb::new(bgr[2], bgr[1], bgr[0]);
        }
    }

    debug!(
        "Decoded {}x{} bitmap ({}, data offset {})",
        cols,
        rows,
        if top_down { "top-down" } else { "bottom-up" },
        offset
    );
    PixelGrid::from_array(grid)
}

/// Encode a grid as a bottom-up 24-bit BMP.
pub fn encode(grid: &PixelGrid) -> Vec<u8> {
    let (rows, cols) = grid.dim();
    let padding = row_padding(cols);
    let image_size = (cols * 3 + padding) * rows;
    let offset = FILE_HEADER_LEN + INFO_HEADER_LEN;
    let file_size = offset + image_size;

    let mut out = Vec::with_capacity(file_size);
    // file header
    out.extend_from_slice(&SIGNATURE);
    out.extend_from_slice(&(file_size as u32).to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&(offset as u32).to_le_bytes());
    // info header
    out.extend_from_slice(&(INFO_HEADER_LEN as u32).to_le_bytes());
    out.extend_from_slice(&(cols as i32).to_le_bytes());
    out.extend_from_slice(&(rows as i32).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&BITS_PER_PIXEL.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&(image_size as u32).to_le_bytes());
    out.extend_from_slice(&0i32.to_le_bytes());
    out.extend_from_slice(&0i32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());

    for row in grid.array().outer_iter().rev() {
        for px in row {
            out.extend_from_slice(&[px.b, px.g, px.r]);
        }
        out.extend(std::iter::repeat_n(0u8, padding));
    }

    out
}

pub fn read_bmp(path: &Path) -> Result<PixelGrid> {
    let bytes = std::fs::read(path)?;
    let grid = decode(&bytes)?;
    info!(
        "Read {:?}: {}x{}",
        path,
        grid.width(),
        grid.height()
    );
    Ok(grid)
}

pub fn write_bmp(path: &Path, grid: &PixelGrid) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&encode(grid))?;
    writer.flush()?;
    info!("Wrote {:?}: {}x{}", path, grid.width(), grid.height());
    Ok(())
}
