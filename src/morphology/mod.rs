//! Disk morphology over the alpha channel.
//!
//! - [`kernel`]: the disk structuring element as per-row spans
//! - [`mask`]: packed bitmask of pixels that need a neighbourhood search
//! - [`extremum`]: max/min alpha under the kernel, with early exit
//! - [`engine`]: per-tile orchestration and cancellation
//!
//! The result alpha is handed to a [`CompositePolicy`](crate::layer_effects::CompositePolicy)
//! which decides the output pixel.

pub mod engine;
pub mod extremum;
pub mod kernel;
pub mod mask;

pub use engine::{
    render, Cancellation, Influence, Method, MorphologyEngine, NeverCancel, RenderOutcome,
};
pub use extremum::{extreme_alpha, Mode};
pub use kernel::StructuringElement;
pub use mask::ActiveRegionMask;
