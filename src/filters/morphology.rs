//! Morphology filters on whole RGBA images: Grow, Shrink, Outline, Spread.
//!
//! These wrap the tile engine for callers holding a complete image. The
//! output is split into horizontal bands that render in parallel with Rayon;
//! every band reads the full source and writes only its own rows.
//!
//! ## Supported Formats
//!
//! RGBA u8 only: (height, width, 4). The filters work on the alpha channel
//! and need it present.

use std::sync::atomic::AtomicBool;

use ndarray::{Array3, ArrayView3, ArrayViewMut3, Axis};
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::geometry::{Point, Rect};
use crate::layer_effects::{CompositePolicy, Grow, Outline, Shrink, Spread};
use crate::morphology::{Cancellation, Method, Mode, MorphologyEngine, NeverCancel, RenderOutcome};
use crate::surface::{Bgra, SurfaceMut, SurfaceRef};

/// Default band height for parallel rendering.
pub const DEFAULT_TILE_ROWS: usize = 64;

/// Settings for [`grow_rgba`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowParams {
    /// Positive grows, negative erodes, zero leaves the image unchanged.
    pub radius: i32,
    pub color: Bgra,
    pub method: Method,
    pub tile_rows: usize,
}

impl Default for GrowParams {
    fn default() -> Self {
        Self {
            radius: 1,
            color: Bgra::BLACK,
            method: Method::EdgeDetection,
            tile_rows: DEFAULT_TILE_ROWS,
        }
    }
}

/// Settings for [`shrink_rgba`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShrinkParams {
    pub radius: u32,
    pub method: Method,
    pub tile_rows: usize,
}

impl Default for ShrinkParams {
    fn default() -> Self {
        Self {
            radius: 1,
            method: Method::EdgeDetection,
            tile_rows: DEFAULT_TILE_ROWS,
        }
    }
}

/// Settings for [`outline_rgba`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineParams {
    pub radius: u32,
    pub color: Bgra,
    pub method: Method,
    pub tile_rows: usize,
}

impl Default for OutlineParams {
    fn default() -> Self {
        Self {
            radius: 1,
            color: Bgra::BLACK,
            method: Method::EdgeDetection,
            tile_rows: DEFAULT_TILE_ROWS,
        }
    }
}

/// Settings for [`spread_rgba`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpreadParams {
    pub radius: u32,
    pub color: Bgra,
    pub method: Method,
    pub tile_rows: usize,
}

impl Default for SpreadParams {
    fn default() -> Self {
        Self {
            radius: 1,
            color: Bgra::BLACK,
            method: Method::EdgeDetection,
            tile_rows: DEFAULT_TILE_ROWS,
        }
    }
}

fn signed_radius(radius: u32) -> Result<i32> {
    i32::try_from(radius).map_err(|_| Error::InvalidRadius(radius as i64))
}

/// Render a whole image with `engine` and `policy`.
///
/// Bands of `tile_rows` rows render in parallel. Returns the output image and
/// `Cancelled` if any band observed `cancel`.
pub fn apply_policy<P, C>(
    input: ArrayView3<u8>,
    engine: &MorphologyEngine,
    policy: &P,
    tile_rows: usize,
    cancel: &C,
) -> Result<(Array3<u8>, RenderOutcome)>
where
    P: CompositePolicy + Sync + ?Sized,
    C: Cancellation + Sync + ?Sized,
{
    let (height, width, channels) = input.dim();
    let src = SurfaceRef::new(input)?;
    let band = tile_rows.max(1);

    let mut output = Array3::<u8>::zeros((height, width, channels));
    let bands: Vec<(usize, ArrayViewMut3<u8>)> = output
        .axis_chunks_iter_mut(Axis(0), band)
        .enumerate()
        .collect();

    let outcomes = bands
        .into_par_iter()
        .map(|(i, rows)| -> Result<RenderOutcome> {
            let y0 = (i * band) as i32;
            let tile = Rect::new(0, y0, width as i32, rows.dim().0 as i32);
            let mut dst = SurfaceMut::with_origin(rows, Point::new(0, y0))?;
            Ok(engine.render_tile(&mut dst, &src, tile, policy, cancel))
        })
        .collect::<Result<Vec<RenderOutcome>>>()?;

    let outcome = if outcomes.contains(&RenderOutcome::Cancelled) {
        RenderOutcome::Cancelled
    } else {
        RenderOutcome::Completed
    };
    Ok((output, outcome))
}

/// Grow (or, with a negative radius, erode) an RGBA u8 image with a fill color.
///
/// # Arguments
/// * `input` - RGBA image (height, width, 4)
/// * `params` - Signed radius, fill color, method and band height
///
/// # Returns
/// New image of the same size
pub fn grow_rgba(input: ArrayView3<u8>, params: &GrowParams) -> Result<Array3<u8>> {
    let engine = MorphologyEngine::new(params.radius, Mode::from_signed_radius(params.radius))?
        .with_method(params.method);
    let (output, _) = apply_policy(
        input,
        &engine,
        &Grow::new(params.color),
        params.tile_rows,
        &NeverCancel,
    )?;
    Ok(output)
}

/// Grow with a cancel flag polled once per row of every band.
pub fn grow_rgba_cancellable(
    input: ArrayView3<u8>,
    params: &GrowParams,
    cancel: &AtomicBool,
) -> Result<(Array3<u8>, RenderOutcome)> {
    let engine = MorphologyEngine::new(params.radius, Mode::from_signed_radius(params.radius))?
        .with_method(params.method);
    apply_policy(input, &engine, &Grow::new(params.color), params.tile_rows, cancel)
}

/// Erode the alpha channel of an RGBA u8 image.
///
/// Colors are kept; alpha is multiplied by the minimum alpha within `radius`.
/// The image border counts as opaque, so a fully opaque image is unchanged.
pub fn shrink_rgba(input: ArrayView3<u8>, params: &ShrinkParams) -> Result<Array3<u8>> {
    let engine =
        MorphologyEngine::new(signed_radius(params.radius)?, Mode::Min)?.with_method(params.method);
    let (output, _) = apply_policy(input, &engine, &Shrink, params.tile_rows, &NeverCancel)?;
    Ok(output)
}

/// Draw an outline of `radius` pixels around the covered parts of an image.
pub fn outline_rgba(input: ArrayView3<u8>, params: &OutlineParams) -> Result<Array3<u8>> {
    let engine =
        MorphologyEngine::new(signed_radius(params.radius)?, Mode::Max)?.with_method(params.method);
    let (output, _) = apply_policy(
        input,
        &engine,
        &Outline::new(params.color),
        params.tile_rows,
        &NeverCancel,
    )?;
    Ok(output)
}

/// Spread a shadow silhouette: every covered neighbourhood becomes the
/// shadow color, alpha scaled by the largest alpha within `radius`.
///
/// The source colors are discarded; only its coverage shapes the result.
pub fn spread_rgba(input: ArrayView3<u8>, params: &SpreadParams) -> Result<Array3<u8>> {
    let engine =
        MorphologyEngine::new(signed_radius(params.radius)?, Mode::Max)?.with_method(params.method);
    let (output, _) = apply_policy(
        input,
        &engine,
        &Spread::new(params.color),
        params.tile_rows,
        &NeverCancel,
    )?;
    Ok(output)
}
