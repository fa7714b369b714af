//! Whole-image filters and shared pixel arithmetic.
//!
//! ## Supported Formats
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | RGBA8 | (H, W, 4) | u8 | RGB + straight alpha, 0-255 |
//!
//! The morphology filters read and write alpha, so RGB and grayscale inputs
//! are rejected rather than guessed at.
//!
//! ## Filter Categories
//!
//! - **Morphology**: grow, shrink, outline (`morphology.rs`)
//! - **Pixel arithmetic**: alpha scaling, "over" compositing (`core.rs`)

pub mod core;
pub mod morphology;
