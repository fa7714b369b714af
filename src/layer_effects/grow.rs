//! Grow / erode fill effect.
//!
//! The fill color is drawn over the source with its alpha scaled by the
//! extreme alpha. With `Mode::Max` the fill spreads outward from the layer;
//! with `Mode::Min` it only survives where the whole kernel is covered.

use crate::filters::core::{blend_over, mul_div_255};
use crate::morphology::Influence;
use crate::surface::Bgra;

use super::CompositePolicy;

/// Fill color composited over the source, weighted by neighbourhood coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grow {
    pub color: Bgra,
}

/// The same composite, meant for `Mode::Min`.
pub type Erode = Grow;

impl Grow {
    pub const fn new(color: Bgra) -> Self {
        Self { color }
    }
}

impl CompositePolicy for Grow {
    #[inline]
    fn composite(&self, src: Bgra, extreme_alpha: u8) -> Bgra {
        let fill = self
            .color
            .with_alpha(mul_div_255(self.color.a, extreme_alpha));
        blend_over(fill, src)
    }

    /// The fill vanishes only where the extreme alpha is 0, which in either
    /// mode means no covered pixel lies under the kernel.
    fn influence(&self) -> Influence {
        Influence::Covered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_coverage_paints_fill() {
        let grow = Grow::new(Bgra::WHITE);
        assert_eq!(grow.composite(Bgra::TRANSPARENT, 255), Bgra::WHITE);
        assert_eq!(grow.composite(Bgra::BLACK, 255), Bgra::WHITE);
    }

    #[test]
    fn test_no_coverage_keeps_source() {
        let grow = Grow::new(Bgra::WHITE);
        let src = Bgra::new(3, 4, 5, 6);
        assert_eq!(grow.composite(src, 0), src);
    }

    #[test]
    fn test_fill_alpha_scaled_by_coverage() {
        let grow = Grow::new(Bgra::from_rgba(255, 0, 0, 128));
        let out = grow.composite(Bgra::TRANSPARENT, 128);
        // round(128 * 128 / 255) = 64
        assert_eq!(out, Bgra::from_rgba(255, 0, 0, 64));
    }

    #[test]
    fn test_opaque_source_is_repainted() {
        let grow = Grow::new(Bgra::WHITE);
        let src = Bgra::from_rgba(200, 40, 10, 255);
        assert_eq!(grow.composite(src, 255), Bgra::WHITE);
        assert_eq!(grow.influence(), Influence::Covered);
    }
}
