//! WebAssembly exports for the morphology filters.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images cross
//! the boundary as flat RGBA byte arrays (length = width * height * 4), the
//! layout of `ImageData.data`.

use ndarray::{Array3, ArrayView3};
use wasm_bindgen::prelude::*;

use crate::error::{Error, Result};
use crate::filters::morphology::{
    grow_rgba, outline_rgba, shrink_rgba, spread_rgba, GrowParams, OutlineParams, ShrinkParams,
    SpreadParams,
};
use crate::surface::Bgra;

fn view(data: &[u8], width: usize, height: usize) -> Result<ArrayView3<'_, u8>> {
    ArrayView3::from_shape((height, width, 4), data).map_err(|_| Error::InvalidDimensions {
        width,
        height,
        len: data.len(),
    })
}

fn finish(result: Result<Array3<u8>>) -> std::result::Result<Vec<u8>, JsValue> {
    result
        .map(|image| image.into_raw_vec_and_offset().0)
        .map_err(|err| JsValue::from_str(&err.to_string()))
}

// ============================================================================
// Grow / Erode
// ============================================================================

/// Grow (positive radius) or erode (negative radius) with a fill color.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `radius` - Signed kernel radius
/// * `r`, `g`, `b`, `a` - Fill color
///
/// # Returns
/// Flat array of RGBA bytes
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn grow_rgba_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    radius: i32,
    r: u8,
    g: u8,
    b: u8,
    a: u8,
) -> std::result::Result<Vec<u8>, JsValue> {
    let params = GrowParams {
        radius,
        color: Bgra::from_rgba(r, g, b, a),
        ..Default::default()
    };
    finish(view(data, width, height).and_then(|input| grow_rgba(input, &params)))
}

// ============================================================================
// Shrink
// ============================================================================

/// Erode alpha by `radius` pixels, keeping colors.
#[wasm_bindgen]
pub fn shrink_rgba_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    radius: u32,
) -> std::result::Result<Vec<u8>, JsValue> {
    let params = ShrinkParams {
        radius,
        ..Default::default()
    };
    finish(view(data, width, height).and_then(|input| shrink_rgba(input, &params)))
}

// ============================================================================
// Outline
// ============================================================================

/// Draw an outline of `radius` pixels behind the layer.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn outline_rgba_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    radius: u32,
    r: u8,
    g: u8,
    b: u8,
    a: u8,
) -> std::result::Result<Vec<u8>, JsValue> {
    let params = OutlineParams {
        radius,
        color: Bgra::from_rgba(r, g, b, a),
        ..Default::default()
    };
    finish(view(data, width, height).and_then(|input| outline_rgba(input, &params)))
}

// ============================================================================
// Spread
// ============================================================================

/// Spread a drop-shadow silhouette by `radius` pixels in a single color.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn spread_rgba_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    radius: u32,
    r: u8,
    g: u8,
    b: u8,
    a: u8,
) -> std::result::Result<Vec<u8>, JsValue> {
    let params = SpreadParams {
        radius,
        color: Bgra::from_rgba(r, g, b, a),
        ..Default::default()
    };
    finish(view(data, width, height).and_then(|input| spread_rgba(input, &params)))
}
