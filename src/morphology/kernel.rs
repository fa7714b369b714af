//! Disk-shaped structuring element.
//!
//! Offset `(dx, dy)` from the kernel center is a member when
//! `sqrt(dx² + dy²) <= radius + 0.5`, which matches an aliased filled circle
//! drawn on the pixel grid. Every row of such a disk is one contiguous run,
//! so the element is stored as one `[lo, hi)` span per row.

use crate::error::{Error, Result};
use crate::geometry::{Point, Rect};

/// Per-row membership table of a disk of integer radius.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuringElement {
    radius: u32,
    /// `spans[dy + radius] = (lo, hi)`: member offsets `lo <= dx < hi`.
    spans: Vec<(i32, i32)>,
}

impl StructuringElement {
    /// Build the disk for `radius`.
    ///
    /// Negative radii are rejected rather than clamped; choosing between
    /// growing and shrinking by the sign is up to the caller. Radii whose
    /// `2r+1` side does not fit an `i32` rectangle, or whose span table cannot
    /// be allocated, are rejected too.
    pub fn new(radius: i32) -> Result<Self> {
        let invalid = Error::InvalidRadius(radius as i64);
        if radius < 0 {
            return Err(invalid);
        }
        let side = radius
            .checked_mul(2)
            .and_then(|d| d.checked_add(1))
            .ok_or_else(|| invalid.clone())?;

        let r = radius as i64;
        // dx² + dy² <= (r + 0.5)²  <=>  dx² + dy² <= r² + r  over integers
        let limit = r * r + r;

        let mut spans = Vec::new();
        spans.try_reserve_exact(side as usize).map_err(|_| invalid)?;
        spans.extend((-r..=r).map(|dy| {
            let half = isqrt(limit - dy * dy) as i32;
            (-half, half + 1)
        }));

        Ok(Self {
            radius: radius as u32,
            spans,
        })
    }

    #[inline]
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Bounding box centered on the origin: `(-r, -r, 2r+1, 2r+1)`.
    pub fn bounds(&self) -> Rect {
        let r = self.radius as i32;
        let side = self.spans.len() as i32;
        Rect::new(-r, -r, side, side)
    }

    /// Spans from the top row (`dy = -radius`) to the bottom row.
    ///
    /// Each `(lo, hi)` is relative to the kernel center; `lo <= dx < hi`.
    #[inline]
    pub fn row_spans(&self) -> &[(i32, i32)] {
        &self.spans
    }

    /// Span of row `dy`, or `None` outside the bounding box.
    pub fn span(&self, dy: i32) -> Option<(i32, i32)> {
        let idx = dy + self.radius as i32;
        if idx < 0 {
            return None;
        }
        self.spans.get(idx as usize).copied()
    }

    /// Whether offset `d` from the center lies inside the disk.
    pub fn contains(&self, d: Point) -> bool {
        self.span(d.y).is_some_and(|(lo, hi)| d.x >= lo && d.x < hi)
    }

    /// Number of member offsets.
    pub fn area(&self) -> usize {
        self.spans.iter().map(|&(lo, hi)| (hi - lo) as usize).sum()
    }
}

/// Floor of the square root of a non-negative integer.
fn isqrt(n: i64) -> i64 {
    debug_assert!(n >= 0);
    let mut x = (n as f64).sqrt() as i64;
    while x * x > n {
        x -= 1;
    }
    while (x + 1) * (x + 1) <= n {
        x += 1;
    }
    x
}
