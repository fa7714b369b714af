//! Shrink effect: erodes the layer's own alpha.
//!
//! Used with `Mode::Min`. Each covered pixel keeps its color and has its
//! alpha multiplied by the smallest alpha within the kernel radius, so edges
//! pull inward while the image border never erodes.

use crate::filters::core::mul_div_255;
use crate::morphology::Influence;
use crate::surface::Bgra;

use super::CompositePolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Shrink;

impl CompositePolicy for Shrink {
    #[inline]
    fn composite(&self, src: Bgra, extreme_alpha: u8) -> Bgra {
        if src.a == 0 {
            return src;
        }
        src.with_alpha(mul_div_255(src.a, extreme_alpha))
    }

    fn influence(&self) -> Influence {
        Influence::Uncovered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scales_alpha_keeps_color() {
        let src = Bgra::from_rgba(9, 8, 7, 200);
        assert_eq!(Shrink.composite(src, 0), src.with_alpha(0));
        assert_eq!(Shrink.composite(src, 255), src);
        assert_eq!(Shrink.composite(src, 128).a, 100);
    }

    #[test]
    fn test_transparent_untouched() {
        let src = Bgra::new(1, 1, 1, 0);
        assert_eq!(Shrink.composite(src, 0), src);
    }
}
