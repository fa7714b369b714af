//! Outline effect.
//!
//! Paints the outline color behind the layer wherever the layer is not fully
//! opaque but something opaque lies within the kernel radius.

use crate::filters::core::{blend_over, mul_div_255};
use crate::morphology::Influence;
use crate::surface::Bgra;

use super::CompositePolicy;

/// Outline color placed under the source pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outline {
    pub color: Bgra,
}

impl Outline {
    pub const fn new(color: Bgra) -> Self {
        Self { color }
    }
}

impl CompositePolicy for Outline {
    fn composite(&self, src: Bgra, extreme_alpha: u8) -> Bgra {
        if src.a == 255 || extreme_alpha == 0 {
            return src;
        }
        let under = blend_over(src, self.color);
        under.with_alpha(mul_div_255(under.a, extreme_alpha))
    }

    fn influence(&self) -> Influence {
        Influence::Covered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Bgra = Bgra::from_rgba(255, 0, 0, 255);

    #[test]
    fn test_opaque_source_passes_through() {
        let src = Bgra::from_rgba(1, 2, 3, 255);
        assert_eq!(Outline::new(RED).composite(src, 255), src);
    }

    #[test]
    fn test_uncovered_passes_through() {
        let src = Bgra::from_rgba(1, 2, 3, 100);
        assert_eq!(Outline::new(RED).composite(src, 0), src);
    }

    #[test]
    fn test_transparent_source_takes_outline() {
        assert_eq!(Outline::new(RED).composite(Bgra::TRANSPARENT, 255), RED);
        assert_eq!(
            Outline::new(RED).composite(Bgra::TRANSPARENT, 51),
            RED.with_alpha(51)
        );
    }

    #[test]
    fn test_partial_source_drawn_over_outline() {
        let src = Bgra::from_rgba(0, 0, 255, 128);
        let out = Outline::new(RED).composite(src, 255);
        assert_eq!(out.a, 255);
        assert_eq!(out.b, 128);
        assert_eq!(out.r, 127);
    }

    #[test]
    fn test_influence_is_coverage() {
        assert_eq!(Outline::new(RED).influence(), Influence::Covered);
    }
}
