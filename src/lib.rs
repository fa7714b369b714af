//! Disk morphology for layer alpha.
//!
//! Grows, shrinks, outlines and spreads the covered area of an RGBA layer by
//! taking the maximum or minimum alpha under a circular kernel around every
//! pixel, with Python bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Engine
//! - [`morphology::StructuringElement`] - disk kernel stored as per-row spans
//! - [`morphology::ActiveRegionMask`] - packed bits marking pixels to search
//! - [`morphology::extreme_alpha`] - neighbourhood max/min with early exit
//! - [`morphology::MorphologyEngine`] - per-tile rendering with cancellation
//!
//! Hosts that tile their own renders call the engine directly with their
//! pixel buffers ([`surface::PixelBuffer`], [`surface::PixelBufferMut`]).
//! Callers holding a whole image use the [`filters::morphology`] functions,
//! which split the image into bands and render them in parallel.
//!
//! ## Image Format
//! - **RGBA**: (height, width, 4) u8, straight (non-premultiplied) alpha

pub mod error;
pub mod filters;
pub mod geometry;
pub mod layer_effects;
pub mod morphology;
pub mod surface;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{Error, Result};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::filters::morphology::{
        grow_rgba, outline_rgba, shrink_rgba, spread_rgba, GrowParams, OutlineParams,
        ShrinkParams, SpreadParams,
    };
    use crate::morphology::Method;
    use crate::surface::Bgra;

    fn to_py_err(err: crate::Error) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    fn method(neighborhood: bool) -> Method {
        if neighborhood {
            Method::Neighborhood
        } else {
            Method::EdgeDetection
        }
    }

    // ========================================================================
    // Morphology Filters
    // ========================================================================

    /// Grow (positive radius) or erode (negative radius) the layer with a fill color.
    ///
    /// # Arguments
    /// * `image` - RGBA image (height, width, 4) as u8
    /// * `radius` - Signed kernel radius in pixels
    /// * `color` - Fill color as (R, G, B, A) tuple (0-255)
    /// * `neighborhood` - Search every pixel instead of only around edges
    #[pyfunction]
    #[pyo3(signature = (image, radius=1, color=(0, 0, 0, 255), neighborhood=false, tile_rows=64))]
    pub fn grow<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        radius: i32,
        color: (u8, u8, u8, u8),
        neighborhood: bool,
        tile_rows: usize,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let params = GrowParams {
            radius,
            color: Bgra::from_rgba(color.0, color.1, color.2, color.3),
            method: method(neighborhood),
            tile_rows,
        };
        let input = image.as_array();
        let result = py
            .allow_threads(|| grow_rgba(input, &params))
            .map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Erode the layer's alpha by `radius` pixels, keeping colors.
    #[pyfunction]
    #[pyo3(signature = (image, radius=1, neighborhood=false, tile_rows=64))]
    pub fn shrink<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        radius: u32,
        neighborhood: bool,
        tile_rows: usize,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let params = ShrinkParams {
            radius,
            method: method(neighborhood),
            tile_rows,
        };
        let input = image.as_array();
        let result = py
            .allow_threads(|| shrink_rgba(input, &params))
            .map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Draw an outline of `radius` pixels behind the layer.
    #[pyfunction]
    #[pyo3(signature = (image, radius=1, color=(0, 0, 0, 255), neighborhood=false, tile_rows=64))]
    pub fn outline<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        radius: u32,
        color: (u8, u8, u8, u8),
        neighborhood: bool,
        tile_rows: usize,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let params = OutlineParams {
            radius,
            color: Bgra::from_rgba(color.0, color.1, color.2, color.3),
            method: method(neighborhood),
            tile_rows,
        };
        let input = image.as_array();
        let result = py
            .allow_threads(|| outline_rgba(input, &params))
            .map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Spread a drop-shadow silhouette of the layer by `radius` pixels.
    #[pyfunction]
    #[pyo3(signature = (image, radius=1, color=(0, 0, 0, 255), neighborhood=false, tile_rows=64))]
    pub fn spread<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        radius: u32,
        color: (u8, u8, u8, u8),
        neighborhood: bool,
        tile_rows: usize,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let params = SpreadParams {
            radius,
            color: Bgra::from_rgba(color.0, color.1, color.2, color.3),
            method: method(neighborhood),
            tile_rows,
        };
        let input = image.as_array();
        let result = py
            .allow_threads(|| spread_rgba(input, &params))
            .map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Disk morphology extension module
    #[pymodule]
    pub fn disk_morph(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(grow, m)?)?;
        m.add_function(wrap_pyfunction!(shrink, m)?)?;
        m.add_function(wrap_pyfunction!(outline, m)?)?;
        m.add_function(wrap_pyfunction!(spread, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::disk_morph;
