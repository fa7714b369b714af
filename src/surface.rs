//! Pixel buffers borrowed from the host.
//!
//! Images are stored the way the rest of the crate (and numpy callers) lay
//! them out: `(height, width, 4)` arrays of RGBA bytes. The engine reads and
//! writes whole pixels as [`Bgra`] values and addresses them in image
//! coordinates, so a view may carry an origin when it only covers part of
//! an image (one band of a tiled render, for example).

use ndarray::{ArrayView3, ArrayViewMut3};

use crate::error::{Error, Result};
use crate::geometry::{Point, Rect};

/// An 8-bit BGRA pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bgra {
    pub b: u8,
    pub g: u8,
    pub r: u8,
    pub a: u8,
}

impl Bgra {
    pub const TRANSPARENT: Bgra = Bgra::new(0, 0, 0, 0);
    pub const BLACK: Bgra = Bgra::new(0, 0, 0, 255);
    pub const WHITE: Bgra = Bgra::new(255, 255, 255, 255);

    pub const fn new(b: u8, g: u8, r: u8, a: u8) -> Self {
        Self { b, g, r, a }
    }

    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { b, g, r, a }
    }

    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Same color, different alpha.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Read access to a rectangle of pixels.
pub trait PixelBuffer {
    /// Pixels addressable through this buffer.
    fn bounds(&self) -> Rect;

    /// Pixel at `p`. Callers stay within [`bounds`](Self::bounds).
    fn pixel(&self, p: Point) -> Bgra;

    #[inline]
    fn alpha(&self, p: Point) -> u8 {
        self.pixel(p).a
    }
}

/// Write access to a rectangle of pixels.
pub trait PixelBufferMut {
    fn bounds(&self) -> Rect;

    /// Store `color` at `p`. Callers stay within [`bounds`](Self::bounds).
    fn set_pixel(&mut self, p: Point, color: Bgra);

    /// Copy `rect` from `src` unchanged, clipped to both buffers.
    fn copy_rect<S: PixelBuffer + ?Sized>(&mut self, src: &S, rect: Rect) {
        let rect = rect
            .intersect(&PixelBufferMut::bounds(self))
            .intersect(&src.bounds());
        for p in rect.points() {
            self.set_pixel(p, src.pixel(p));
        }
    }
}

fn check_channels(channels: usize) -> Result<()> {
    if channels == 4 {
        Ok(())
    } else {
        Err(Error::UnsupportedChannels(channels))
    }
}

/// Read-only RGBA view.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceRef<'a> {
    data: ArrayView3<'a, u8>,
    origin: Point,
}

impl<'a> SurfaceRef<'a> {
    /// Wrap a `(height, width, 4)` view whose top-left pixel is `(0, 0)`.
    pub fn new(data: ArrayView3<'a, u8>) -> Result<Self> {
        Self::with_origin(data, Point::default())
    }

    /// Wrap a view whose top-left pixel sits at `origin` in image space.
    pub fn with_origin(data: ArrayView3<'a, u8>, origin: Point) -> Result<Self> {
        check_channels(data.dim().2)?;
        Ok(Self { data, origin })
    }
}

impl PixelBuffer for SurfaceRef<'_> {
    fn bounds(&self) -> Rect {
        let (height, width, _) = self.data.dim();
        Rect::from_size(width, height).offset(self.origin)
    }

    #[inline]
    fn pixel(&self, p: Point) -> Bgra {
        let y = (p.y - self.origin.y) as usize;
        let x = (p.x - self.origin.x) as usize;
        Bgra::from_rgba(
            self.data[[y, x, 0]],
            self.data[[y, x, 1]],
            self.data[[y, x, 2]],
            self.data[[y, x, 3]],
        )
    }

    #[inline]
    fn alpha(&self, p: Point) -> u8 {
        self.data[[(p.y - self.origin.y) as usize, (p.x - self.origin.x) as usize, 3]]
    }
}

/// Mutable RGBA view.
#[derive(Debug)]
pub struct SurfaceMut<'a> {
    data: ArrayViewMut3<'a, u8>,
    origin: Point,
}

impl<'a> SurfaceMut<'a> {
    pub fn new(data: ArrayViewMut3<'a, u8>) -> Result<Self> {
        Self::with_origin(data, Point::default())
    }

    pub fn with_origin(data: ArrayViewMut3<'a, u8>, origin: Point) -> Result<Self> {
        check_channels(data.dim().2)?;
        Ok(Self { data, origin })
    }
}

impl PixelBufferMut for SurfaceMut<'_> {
    fn bounds(&self) -> Rect {
        let (height, width, _) = self.data.dim();
        Rect::from_size(width, height).offset(self.origin)
    }

    #[inline]
    fn set_pixel(&mut self, p: Point, color: Bgra) {
        let y = (p.y - self.origin.y) as usize;
        let x = (p.x - self.origin.x) as usize;
        let [r, g, b, a] = color.to_rgba();
        self.data[[y, x, 0]] = r;
        self.data[[y, x, 1]] = g;
        self.data[[y, x, 2]] = b;
        self.data[[y, x, 3]] = a;
    }
}

impl PixelBuffer for SurfaceMut<'_> {
    fn bounds(&self) -> Rect {
        PixelBufferMut::bounds(self)
    }

    #[inline]
    fn pixel(&self, p: Point) -> Bgra {
        let y = (p.y - self.origin.y) as usize;
        let x = (p.x - self.origin.x) as usize;
        Bgra::from_rgba(
            self.data[[y, x, 0]],
            self.data[[y, x, 1]],
            self.data[[y, x, 2]],
            self.data[[y, x, 3]],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn test_rejects_rgb() {
        let img = Array3::<u8>::zeros((2, 2, 3));
        assert_eq!(
            SurfaceRef::new(img.view()).unwrap_err(),
            Error::UnsupportedChannels(3)
        );
    }

    #[test]
    fn test_pixel_channel_order() {
        let mut img = Array3::<u8>::zeros((1, 1, 4));
        img[[0, 0, 0]] = 10; // R
        img[[0, 0, 1]] = 20; // G
        img[[0, 0, 2]] = 30; // B
        img[[0, 0, 3]] = 40; // A
        let surface = SurfaceRef::new(img.view()).unwrap();
        let px = surface.pixel(Point::new(0, 0));
        assert_eq!(px, Bgra::new(30, 20, 10, 40));
        assert_eq!(surface.alpha(Point::new(0, 0)), 40);
    }

    #[test]
    fn test_origin_offsets_addressing() {
        let mut img = Array3::<u8>::zeros((2, 3, 4));
        {
            let mut band = SurfaceMut::with_origin(img.view_mut(), Point::new(5, 7)).unwrap();
            assert_eq!(PixelBufferMut::bounds(&band), Rect::new(5, 7, 3, 2));
            band.set_pixel(Point::new(6, 8), Bgra::WHITE);
        }
        assert_eq!(img[[1, 1, 3]], 255);
        assert_eq!(img[[0, 0, 3]], 0);
    }

    #[test]
    fn test_copy_rect_clips() {
        let mut src = Array3::<u8>::zeros((3, 3, 4));
        src.fill(200);
        let mut dst = Array3::<u8>::zeros((3, 3, 4));
        {
            let s = SurfaceRef::new(src.view()).unwrap();
            let mut d = SurfaceMut::new(dst.view_mut()).unwrap();
            d.copy_rect(&s, Rect::new(1, 1, 10, 10));
        }
        assert_eq!(dst[[0, 0, 0]], 0);
        assert_eq!(dst[[2, 2, 3]], 200);
        assert_eq!(dst[[1, 1, 1]], 200);
    }
}
