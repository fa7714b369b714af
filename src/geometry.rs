//! Integer points and rectangles in image coordinates.
//!
//! Rectangles are half-open: `left <= x < right`, `top <= y < bottom`.
//! Coordinates are signed so kernel bounds can sit around the origin.

/// A pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle of pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle spanning `[left, right) x [top, bottom)`.
    ///
    /// Inverted edges produce an empty rectangle.
    pub fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            x: left,
            y: top,
            width: (right - left).max(0),
            height: (bottom - top).max(0),
        }
    }

    /// Rectangle at the origin covering a `(width, height)` image.
    pub fn from_size(width: usize, height: usize) -> Self {
        Self::new(0, 0, width as i32, height as i32)
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Number of pixels covered.
    pub fn area(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.width as usize * self.height as usize
        }
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }

    /// Overlap of two rectangles; empty (zero-sized) when they are disjoint.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let r = Rect::from_ltrb(
            self.left().max(other.left()),
            self.top().max(other.top()),
            self.right().min(other.right()),
            self.bottom().min(other.bottom()),
        );
        if r.is_empty() {
            Rect::default()
        } else {
            r
        }
    }

    /// Translate by `p`.
    pub fn offset(&self, p: Point) -> Rect {
        Rect::new(self.x + p.x, self.y + p.y, self.width, self.height)
    }

    /// Grow by the margins of a rectangle placed around the origin.
    ///
    /// A kernel bounding box `(-r, -r, 2r+1, 2r+1)` pushes every edge outward
    /// by `r`, giving the set of pixels whose kernel touches `self`.
    pub fn inflate(&self, margins: &Rect) -> Rect {
        Rect::from_ltrb(
            self.left() + margins.left(),
            self.top() + margins.top(),
            self.right() + margins.right() - 1,
            self.bottom() + margins.bottom() - 1,
        )
    }

    /// Row-major iteration over every point.
    pub fn points(self) -> impl Iterator<Item = Point> {
        let (left, right) = (self.left(), self.right());
        (self.top()..self.bottom())
            .flat_map(move |y| (left..right).map(move |x| Point::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersect_disjoint_is_empty() {
        let a = Rect::new(0, 0, 4, 4);
        let b = Rect::new(10, 10, 2, 2);
        let r = a.intersect(&b);
        assert!(r.is_empty());
        assert_eq!(r.area(), 0);
    }

    #[test]
    fn test_intersect_overlap() {
        let a = Rect::new(0, 0, 4, 4);
        let b = Rect::new(2, -1, 5, 3);
        assert_eq!(a.intersect(&b), Rect::new(2, 0, 2, 2));
    }

    #[test]
    fn test_inflate_by_kernel_bounds() {
        let tile = Rect::new(10, 20, 5, 3);
        let kernel = Rect::new(-2, -2, 5, 5);
        assert_eq!(tile.inflate(&kernel), Rect::from_ltrb(8, 18, 17, 25));
    }

    #[test]
    fn test_points_row_major() {
        let pts: Vec<Point> = Rect::new(1, 1, 2, 2).points().collect();
        assert_eq!(
            pts,
            vec![
                Point::new(1, 1),
                Point::new(2, 1),
                Point::new(1, 2),
                Point::new(2, 2)
            ]
        );
    }

    #[test]
    fn test_contains_is_half_open() {
        let r = Rect::new(0, 0, 3, 3);
        assert!(r.contains(Point::new(2, 2)));
        assert!(!r.contains(Point::new(3, 0)));
        assert!(!r.contains(Point::new(-1, 0)));
    }
}
