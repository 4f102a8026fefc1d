//! In-memory pixel data model: a rectangular `PixelGrid` of RGB triples and
//! the call-scoped `BooleanMask` used for visited/suppressed bookkeeping.
use ndarray::Array2;

use crate::error::{Error, Result};
use crate::types::{Coord, Rgb};

/// Rectangular matrix of `height` rows by `width` columns of RGB triples.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    data: Array2<Rgb>,
}

impl PixelGrid {
    /// Zero-filled (black) grid.
    pub fn new(height: usize, width: usize) -> Result<Self> {
        check_dims(height, width)?;
        Ok(Self {
            data: Array2::default((height, width)),
        })
    }

    pub fn filled(height: usize, width: usize, value: Rgb) -> Result<Self> {
        check_dims(height, width)?;
        Ok(Self {
            data: Array2::from_elem((height, width), value),
        })
    }

    /// Build from row vectors; every row must have the same non-zero length.
    pub fn from_rows(rows: Vec<Vec<Rgb>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        check_dims(height, width)?;
        if let Some(bad) = rows.iter().position(|r| r.len() != width) {
            return Err(Error::invalid(
                "row_width",
                format!("row {} has {} columns, expected {}", bad, rows[bad].len(), width),
            ));
        }
        let flat: Vec<Rgb> = rows.into_iter().flatten().collect();
        Self::from_array(
            Array2::from_shape_vec((height, width), flat)
                .map_err(|e| Error::invalid("shape", e))?,
        )
    }

    pub fn from_array(data: Array2<Rgb>) -> Result<Self> {
        let (h, w) = data.dim();
        check_dims(h, w)?;
        Ok(Self { data })
    }

    /// Wrap an array whose dimensions were taken from an existing grid.
    pub(crate) fn from_array_unchecked(data: Array2<Rgb>) -> Self {
        debug_assert!(data.nrows() > 0 && data.ncols() > 0);
        Self { data }
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    /// `(height, width)`
    pub fn dim(&self) -> (usize, usize) {
        self.data.dim()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Rgb> {
        self.data.get((row, col)).copied()
    }

    /// Signed lookup used by neighborhood scans; `None` outside the grid.
    #[inline]
    pub fn get_signed(&self, row: isize, col: isize) -> Option<Rgb> {
        if row < 0 || col < 0 {
            return None;
        }
        self.get(row as usize, col as usize)
    }

    pub fn set(&mut self, row: usize, col: usize, value: Rgb) -> Result<()> {
        let (height, width) = self.dim();
        match self.data.get_mut((row, col)) {
            Some(px) => {
                *px = value;
                Ok(())
            }
            None => Err(Error::OutOfBounds {
                row,
                col,
                height,
                width,
            }),
        }
    }

    pub fn contains(&self, (row, col): Coord) -> bool {
        row < self.height() && col < self.width()
    }

    /// Fails with `OutOfBounds` when `coord` lies outside the grid.
    pub fn check_coord(&self, coord: Coord) -> Result<()> {
        if self.contains(coord) {
            Ok(())
        } else {
            let (height, width) = self.dim();
            Err(Error::OutOfBounds {
                row: coord.0,
                col: coord.1,
                height,
                width,
            })
        }
    }

    pub fn array(&self) -> &Array2<Rgb> {
        &self.data
    }

    pub fn array_mut(&mut self) -> &mut Array2<Rgb> {
        &mut self.data
    }

    /// Iterate pixels in row-major order with their coordinates.
    pub fn indexed_iter(&self) -> impl Iterator<Item = (Coord, Rgb)> + '_ {
        self.data.indexed_iter().map(|(idx, &px)| (idx, px))
    }

    pub fn count_where<F: Fn(Rgb) -> bool>(&self, f: F) -> usize {
        self.data.iter().filter(|&&px| f(px)).count()
    }
}

fn check_dims(height: usize, width: usize) -> Result<()> {
    if height == 0 || width == 0 {
        return Err(Error::invalid("dimensions", format!("{}x{}", width, height)));
    }
    Ok(())
}

/// Dense boolean grid scoped to a single filter call.
#[derive(Debug, Clone)]
pub struct BooleanMask {
    data: Array2<bool>,
}

impl BooleanMask {
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            data: Array2::from_elem((height, width), false),
        }
    }

    pub fn like(grid: &PixelGrid) -> Self {
        let (h, w) = grid.dim();
        Self::new(h, w)
    }

    #[inline]
    pub fn get(&self, (row, col): Coord) -> bool {
        self.data.get((row, col)).copied().unwrap_or(false)
    }

    /// Out-of-range coordinates are ignored.
    #[inline]
    pub fn set(&mut self, (row, col): Coord) {
        if let Some(v) = self.data.get_mut((row, col)) {
            *v = true;
        }
    }

    /// Mark the square of half-width `radius` around `center`, clipped to the mask.
    pub fn set_square(&mut self, (row, col): Coord, radius: usize) {
        let (h, w) = self.data.dim();
        let r0 = row.saturating_sub(radius);
        let c0 = col.saturating_sub(radius);
        let r1 = row.saturating_add(radius).min(h - 1);
        let c1 = col.saturating_add(radius).min(w - 1);
        self.data
            .slice_mut(ndarray::s![r0..=r1, c0..=c1])
            .fill(true);
    }

    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_ragged_rows() {
        assert!(PixelGrid::new(0, 3).is_err());
        assert!(PixelGrid::from_rows(vec![]).is_err());
        let ragged = vec![vec![Rgb::BLACK; 3], vec![Rgb::BLACK; 2]];
        assert!(matches!(
            PixelGrid::from_rows(ragged),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn from_rows_keeps_row_major_layout() {
        let rows = vec![
            vec![Rgb::new(1, 0, 0), Rgb::new(2, 0, 0)],
            vec![Rgb::new(3, 0, 0), Rgb::new(4, 0, 0)],
            vec![Rgb::new(5, 0, 0), Rgb::new(6, 0, 0)],
        ];
        let g = PixelGrid::from_rows(rows).unwrap();
        assert_eq!(g.dim(), (3, 2));
        assert_eq!(g.get(2, 1), Some(Rgb::new(6, 0, 0)));
        assert_eq!(g.get(3, 0), None);
        assert_eq!(g.get_signed(-1, 0), None);
    }

    #[test]
    fn set_out_of_bounds_reports_coordinates() {
        let mut g = PixelGrid::new(2, 2).unwrap();
        match g.set(5, 1, Rgb::WHITE) {
            Err(Error::OutOfBounds { row, col, .. }) => assert_eq!((row, col), (5, 1)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn square_is_clipped_at_edges() {
        let mut m = BooleanMask::new(4, 4);
        m.set_square((0, 0), 1);
        assert_eq!(m.count(), 4);
        assert!(m.get((1, 1)));
        assert!(!m.get((2, 2)));

        let mut m = BooleanMask::new(4, 4);
        m.set_square((2, 2), 0);
        assert_eq!(m.count(), 1);
    }
}
