//! Layer effects built on the morphology engine.
//!
//! Each effect is a [`CompositePolicy`]: given a source pixel and the extreme
//! alpha found under the kernel, it produces the output pixel.
//!
//! ## Effects
//! - **Grow** - Fill color spread outward (`Max`) or kept inside (`Min`) (`grow.rs`)
//! - **Outline** - Color drawn behind the layer around its edges (`outline.rs`)
//! - **Shrink** - Alpha eroded toward the layer interior (`shrink.rs`)
//! - **Spread** - Widened shadow silhouette in a single color (`spread.rs`)
//!
//! Policies also say which source pixels can change their neighbourhood
//! ([`Influence`]), which decides how much of a tile gets searched.

pub mod grow;
pub mod outline;
pub mod shrink;
pub mod spread;

pub use grow::{Erode, Grow};
pub use outline::Outline;
pub use shrink::Shrink;
pub use spread::Spread;

use crate::morphology::Influence;
use crate::surface::Bgra;

/// Output pixel from a source pixel and its neighbourhood extreme alpha.
pub trait CompositePolicy {
    fn composite(&self, src: Bgra, extreme_alpha: u8) -> Bgra;

    /// Seeds for the active-region mask.
    ///
    /// Every pixel left unmarked must satisfy `composite(src, extreme) == src`.
    fn influence(&self) -> Influence {
        Influence::Edges
    }
}

impl<F> CompositePolicy for F
where
    F: Fn(Bgra, u8) -> Bgra,
{
    #[inline]
    fn composite(&self, src: Bgra, extreme_alpha: u8) -> Bgra {
        self(src, extreme_alpha)
    }
}
