//! Packed bitmask marking which pixels of a tile need a neighbourhood search.
//!
//! One bit per pixel, rows padded to whole bytes, most significant bit first.
//! Bits are only ever set: marking is a union, so the order and repetition of
//! [`ActiveRegionMask::mark_rect`] calls never changes the result.

use crate::geometry::{Point, Rect};

/// Accumulate-only bit rectangle over one render tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveRegionMask {
    bounds: Rect,
    stride: usize,
    bits: Vec<u8>,
}

/// Byte with the top `n` bits set (`n` in `0..=8`).
#[inline]
fn top_bits(n: u32) -> u8 {
    if n >= 8 {
        0xff
    } else {
        !(0xffu8 >> n)
    }
}

impl ActiveRegionMask {
    /// All-clear mask covering `bounds`.
    pub fn new(bounds: Rect) -> Self {
        let (width, height) = if bounds.is_empty() {
            (0, 0)
        } else {
            (bounds.width as usize, bounds.height as usize)
        };
        let stride = width.div_ceil(8);
        Self {
            bounds,
            stride,
            bits: vec![0; stride * height],
        }
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Set every bit in `rect ∩ bounds`.
    ///
    /// Works a byte at a time: partial masks at the two ends of each row and a
    /// plain fill for the bytes in between.
    pub fn mark_rect(&mut self, rect: Rect) {
        let clipped = rect.intersect(&self.bounds);
        if clipped.is_empty() {
            return;
        }

        let x0 = (clipped.left() - self.bounds.left()) as usize;
        let x1 = (clipped.right() - self.bounds.left()) as usize;
        let y0 = (clipped.top() - self.bounds.top()) as usize;
        let y1 = (clipped.bottom() - self.bounds.top()) as usize;

        let first = x0 >> 3;
        let last = (x1 - 1) >> 3;
        // Bits from x0 to the end of its byte, and from the start of the last byte to x1
        let head = 0xffu8 >> (x0 & 7);
        let tail = top_bits(((x1 - 1) & 7) as u32 + 1);

        for row in self.bits.chunks_exact_mut(self.stride).take(y1).skip(y0) {
            if first == last {
                row[first] |= head & tail;
            } else {
                row[first] |= head;
                row[first + 1..last].fill(0xff);
                row[last] |= tail;
            }
        }
    }

    /// Whether `p` is marked. Points outside the mask are never marked.
    pub fn get(&self, p: Point) -> bool {
        if !self.bounds.contains(p) {
            return false;
        }
        let x = (p.x - self.bounds.left()) as usize;
        let y = (p.y - self.bounds.top()) as usize;
        self.bits[y * self.stride + (x >> 3)] & (0x80 >> (x & 7)) != 0
    }

    /// Number of marked pixels.
    pub fn count_active(&self) -> usize {
        // Padding bits past the row end are never set
        self.bits.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Whether every pixel is marked.
    pub fn is_full(&self) -> bool {
        self.count_active() == self.bounds.area()
    }

    /// Every `(point, marked)` pair in row-major order.
    ///
    /// The iterator reads the mask lazily; calling `iter` again starts over.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            mask: self,
            x: 0,
            y: 0,
        }
    }
}

impl<'a> IntoIterator for &'a ActiveRegionMask {
    type Item = (Point, bool);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Row-major walk over an [`ActiveRegionMask`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    mask: &'a ActiveRegionMask,
    x: usize,
    y: usize,
}

impl Iterator for Iter<'_> {
    type Item = (Point, bool);

    fn next(&mut self) -> Option<(Point, bool)> {
        let bounds = self.mask.bounds;
        if bounds.is_empty() || self.y >= bounds.height as usize {
            return None;
        }

        let byte = self.mask.bits[self.y * self.mask.stride + (self.x >> 3)];
        let marked = byte & (0x80 >> (self.x & 7)) != 0;
        let point = Point::new(
            bounds.left() + self.x as i32,
            bounds.top() + self.y as i32,
        );

        self.x += 1;
        if self.x == bounds.width as usize {
            self.x = 0;
            self.y += 1;
        }
        Some((point, marked))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let bounds = self.mask.bounds;
        let remaining = if bounds.is_empty() {
            0
        } else {
            bounds.area() - (self.y * bounds.width as usize + self.x).min(bounds.area())
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}
