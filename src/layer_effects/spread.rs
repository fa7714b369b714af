//! Shadow spread effect.
//!
//! Replaces every pixel with the shadow color, its alpha scaled by the
//! maximum alpha within the kernel radius. The result is a widened
//! silhouette of the layer, ready to be blurred and placed under it.

use crate::filters::core::mul_div_255;
use crate::morphology::Influence;
use crate::surface::Bgra;

use super::CompositePolicy;

/// Shadow color spread over the dilated layer silhouette. Used with `Mode::Max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spread {
    pub color: Bgra,
}

impl Spread {
    pub const fn new(color: Bgra) -> Self {
        Self { color }
    }
}

impl CompositePolicy for Spread {
    #[inline]
    fn composite(&self, src: Bgra, extreme_alpha: u8) -> Bgra {
        // Nothing covered nearby: the pixel stays as transparent as it was
        if extreme_alpha == 0 {
            return src;
        }
        self.color.with_alpha(mul_div_255(self.color.a, extreme_alpha))
    }

    fn influence(&self) -> Influence {
        Influence::Covered
    }
}
