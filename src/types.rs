//! Shared types and enums used across BMPRO.
//! Includes the `Rgb` pixel triple, `(row, col)` coordinates, traced `Curve`s
//! and the `ArtifactKind` enum naming each output file.
use serde::{Deserialize, Serialize};

/// `(row, col)` position inside a grid.
pub type Coord = (usize, usize);

/// One pixel's three 8-bit color channels.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels in (red, green, blue) order.
    #[inline]
    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    #[inline]
    pub fn from_channels(c: [u8; 3]) -> Self {
        Self {
            r: c[0],
            g: c[1],
            b: c[2],
        }
    }

    /// True when every channel differs from `other` by at most `tolerance`.
    #[inline]
    pub fn within_tolerance(self, other: Rgb, tolerance: u32) -> bool {
        self.channels()
            .iter()
            .zip(other.channels().iter())
            .all(|(&a, &b)| (a as i32 - b as i32).unsigned_abs() <= tolerance)
    }
}

/// An accepted traced line: ordered coordinates plus the number of steps
/// along which contiguity was confirmed.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Curve {
    pub points: Vec<Coord>,
    pub length: usize,
}

impl Curve {
    pub fn first(&self) -> Option<Coord> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Coord> {
        self.points.last().copied()
    }
}

/// Output artifacts produced for a single source bitmap.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum ArtifactKind {
    Processed,
    Fill,
    Contour,
    Lines,
    Report,
}

impl ArtifactKind {
    /// File name suffix appended to the source stem.
    pub fn suffix(self) -> &'static str {
        match self {
            ArtifactKind::Processed => "-processed.bmp",
            ArtifactKind::Fill => "-fill.bmp",
            ArtifactKind::Contour => "-contour.bmp",
            ArtifactKind::Lines => "-lines.bmp",
            ArtifactKind::Report => "-report.json",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactKind::Processed => write!(f, "Processed"),
            ArtifactKind::Fill => write!(f, "Fill"),
            ArtifactKind::Contour => write!(f, "Contour"),
            ArtifactKind::Lines => write!(f, "Lines"),
            ArtifactKind::Report => write!(f, "Report"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerance_is_inclusive_per_channel() {
        let a = Rgb::new(100, 100, 100);
        assert!(a.within_tolerance(Rgb::new(110, 90, 100), 10));
        assert!(!a.within_tolerance(Rgb::new(111, 100, 100), 10));
        assert!(a.within_tolerance(a, 0));
    }

    #[test]
    fn artifact_suffixes_are_distinct() {
        let kinds = [
            ArtifactKind::Processed,
            ArtifactKind::Fill,
            ArtifactKind::Contour,
            ArtifactKind::Lines,
            ArtifactKind::Report,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a.suffix(), b.suffix());
            }
        }
    }
}
