//! Maximum or minimum alpha under a structuring element.

use crate::geometry::Point;
use crate::surface::PixelBuffer;

use super::kernel::StructuringElement;

/// Which extreme the neighbourhood search looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Dilation: largest alpha wins.
    #[default]
    Max,
    /// Erosion: smallest alpha wins.
    Min,
}

impl Mode {
    /// Result when nothing is covered: 0 for `Max`, 255 for `Min`.
    #[inline]
    pub const fn identity(self) -> u8 {
        match self {
            Mode::Max => 0,
            Mode::Min => 255,
        }
    }

    /// Sign convention used by grow/shrink settings: negative radii erode.
    pub const fn from_signed_radius(radius: i32) -> Self {
        if radius < 0 {
            Mode::Min
        } else {
            Mode::Max
        }
    }
}

/// Extreme alpha among the pixels of `buffer` covered by `element` at `center`.
///
/// Kernel rows are clipped to the buffer: pixels outside do not take part,
/// which reads as transparent for `Max` and opaque for `Min` (an image edge
/// never erodes). `Min` is computed as the maximum of inverted alphas and
/// inverted back, so both modes share the early exit once 255 is reached.
///
/// A center outside the buffer yields [`Mode::identity`].
pub fn extreme_alpha<B>(buffer: &B, center: Point, element: &StructuringElement, mode: Mode) -> u8
where
    B: PixelBuffer + ?Sized,
{
    let bounds = buffer.bounds();
    if !bounds.contains(center) {
        return mode.identity();
    }

    let invert = match mode {
        Mode::Max => 0u8,
        Mode::Min => 0xff,
    };
    let r = element.radius() as i32;
    let y0 = (center.y - r).max(bounds.top());
    let y1 = (center.y + r + 1).min(bounds.bottom());

    let mut best = 0u8;
    'rows: for y in y0..y1 {
        let (lo, hi) = element.row_spans()[(y - center.y + r) as usize];
        let x0 = (center.x + lo).max(bounds.left());
        let x1 = (center.x + hi).min(bounds.right());

        for x in x0..x1 {
            best = best.max(buffer.alpha(Point::new(x, y)) ^ invert);
            if best == 255 {
                break 'rows;
            }
        }
    }

    best ^ invert
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::surface::{Bgra, PixelBuffer};
    use std::cell::Cell;

    /// Alpha-only buffer that counts reads.
    struct AlphaGrid {
        width: i32,
        height: i32,
        alpha: Vec<u8>,
        reads: Cell<usize>,
    }

    impl AlphaGrid {
        fn new(width: i32, height: i32, fill: u8) -> Self {
            Self {
                width,
                height,
                alpha: vec![fill; (width * height) as usize],
                reads: Cell::new(0),
            }
        }

        fn set(&mut self, x: i32, y: i32, a: u8) {
            self.alpha[(y * self.width + x) as usize] = a;
        }

        fn inverted(&self) -> Self {
            Self {
                width: self.width,
                height: self.height,
                alpha: self.alpha.iter().map(|a| 255 - a).collect(),
                reads: Cell::new(0),
            }
        }
    }

    impl PixelBuffer for AlphaGrid {
        fn bounds(&self) -> Rect {
            Rect::new(0, 0, self.width, self.height)
        }

        fn pixel(&self, p: Point) -> Bgra {
            Bgra::TRANSPARENT.with_alpha(self.alpha(p))
        }

        fn alpha(&self, p: Point) -> u8 {
            self.reads.set(self.reads.get() + 1);
            self.alpha[(p.y * self.width + p.x) as usize]
        }
    }

    #[test]
    fn test_max_finds_single_pixel() {
        let mut grid = AlphaGrid::new(9, 9, 0);
        grid.set(4, 4, 77);
        let k = StructuringElement::new(2).unwrap();
        assert_eq!(extreme_alpha(&grid, Point::new(2, 4), &k, Mode::Max), 77);
        // (6, 6) is at distance sqrt(8) > 2.5 from (4, 4)
        assert_eq!(extreme_alpha(&grid, Point::new(6, 6), &k, Mode::Max), 0);
        assert_eq!(extreme_alpha(&grid, Point::new(5, 6), &k, Mode::Max), 77);
    }

    #[test]
    fn test_min_finds_single_hole() {
        let mut grid = AlphaGrid::new(9, 9, 255);
        grid.set(4, 4, 30);
        let k = StructuringElement::new(1).unwrap();
        assert_eq!(extreme_alpha(&grid, Point::new(5, 5), &k, Mode::Min), 30);
        assert_eq!(extreme_alpha(&grid, Point::new(6, 4), &k, Mode::Min), 255);
    }

    #[test]
    fn test_out_of_bounds_treatment() {
        // Edges are transparent for Max and opaque for Min
        let grid = AlphaGrid::new(4, 4, 255);
        let k = StructuringElement::new(3).unwrap();
        assert_eq!(extreme_alpha(&grid, Point::new(0, 0), &k, Mode::Min), 255);

        let grid = AlphaGrid::new(4, 4, 0);
        assert_eq!(extreme_alpha(&grid, Point::new(0, 0), &k, Mode::Max), 0);
    }

    #[test]
    fn test_center_outside_yields_identity() {
        let grid = AlphaGrid::new(4, 4, 128);
        let k = StructuringElement::new(5).unwrap();
        assert_eq!(extreme_alpha(&grid, Point::new(-1, 2), &k, Mode::Max), 0);
        assert_eq!(extreme_alpha(&grid, Point::new(2, 4), &k, Mode::Min), 255);
    }

    #[test]
    fn test_short_circuits_on_opaque() {
        let grid = AlphaGrid::new(21, 21, 255);
        let k = StructuringElement::new(10).unwrap();
        assert_eq!(extreme_alpha(&grid, Point::new(10, 10), &k, Mode::Max), 255);
        assert_eq!(grid.reads.get(), 1);

        let grid = AlphaGrid::new(21, 21, 0);
        assert_eq!(extreme_alpha(&grid, Point::new(10, 10), &k, Mode::Min), 0);
        assert_eq!(grid.reads.get(), 1);
    }

    #[test]
    fn test_reads_only_disk_members() {
        let grid = AlphaGrid::new(11, 11, 10);
        let k = StructuringElement::new(4).unwrap();
        extreme_alpha(&grid, Point::new(5, 5), &k, Mode::Max);
        assert_eq!(grid.reads.get(), k.area());
    }

    #[test]
    fn test_min_max_duality() {
        let mut grid = AlphaGrid::new(13, 9, 0);
        let mut seed = 17u32;
        for y in 0..9 {
            for x in 0..13 {
                seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                grid.set(x, y, (seed >> 16) as u8);
            }
        }
        let inverted = grid.inverted();
        for radius in 0..4 {
            let k = StructuringElement::new(radius).unwrap();
            for p in grid.bounds().points() {
                assert_eq!(
                    extreme_alpha(&grid, p, &k, Mode::Min),
                    255 - extreme_alpha(&inverted, p, &k, Mode::Max),
                    "radius {radius} at {p:?}"
                );
            }
        }
    }

    #[test]
    fn test_mode_from_signed_radius() {
        assert_eq!(Mode::from_signed_radius(3), Mode::Max);
        assert_eq!(Mode::from_signed_radius(0), Mode::Max);
        assert_eq!(Mode::from_signed_radius(-1), Mode::Min);
    }
}
