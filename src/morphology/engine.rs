//! Tile renderer tying the kernel, the active mask and the extremum search
//! together.
//!
//! A render pass builds one [`MorphologyEngine`] and calls
//! [`MorphologyEngine::render_tile`] once per tile, possibly from several
//! threads at once. Each call only reads `src` and only writes the pixels of
//! its own tile in `dst`, so tiles need no synchronization.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, log_enabled, trace, Level};

use crate::error::{Error, Result};
use crate::geometry::{Point, Rect};
use crate::layer_effects::CompositePolicy;
use crate::surface::{PixelBuffer, PixelBufferMut};

use super::extremum::{extreme_alpha, Mode};
use super::kernel::StructuringElement;
use super::mask::ActiveRegionMask;

/// Which source pixels can change the result around them.
///
/// Every pixel whose kernel box contains a seed is marked active; all other
/// pixels are copied through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Influence {
    /// Partially transparent pixels and pixels whose alpha differs from a
    /// 4-connected neighbour.
    ///
    /// Only sound for policies that return `src` unchanged wherever the
    /// kernel covers a uniform 0 or 255 region; the fallback for policies
    /// that do not name a tighter rule.
    #[default]
    Edges,
    /// Pixels with any coverage (`alpha > 0`).
    Covered,
    /// Pixels that are not fully opaque (`alpha < 255`).
    Uncovered,
    /// Every pixel of the tile is active.
    Everywhere,
}

impl Influence {
    fn seeds<S>(self, src: &S, p: Point) -> bool
    where
        S: PixelBuffer + ?Sized,
    {
        let a = src.alpha(p);
        match self {
            Influence::Edges => {
                if a != 0 && a != 255 {
                    return true;
                }
                let bounds = src.bounds();
                [(1, 0), (-1, 0), (0, 1), (0, -1)].iter().any(|&(dx, dy)| {
                    let q = Point::new(p.x + dx, p.y + dy);
                    bounds.contains(q) && src.alpha(q) != a
                })
            }
            Influence::Covered => a > 0,
            Influence::Uncovered => a < 255,
            Influence::Everywhere => true,
        }
    }
}

/// User-facing choice between the mask-accelerated path and brute force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Method {
    /// Search only around pixels picked by the policy's [`Influence`].
    #[default]
    EdgeDetection,
    /// Search around every pixel.
    Neighborhood,
}

/// Cooperative cancellation, polled once per scanned row.
pub trait Cancellation {
    fn is_cancelled(&self) -> bool;
}

impl Cancellation for AtomicBool {
    #[inline]
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<F> Cancellation for F
where
    F: Fn() -> bool,
{
    #[inline]
    fn is_cancelled(&self) -> bool {
        self()
    }
}

/// A cancellation source that never fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl Cancellation for NeverCancel {
    #[inline]
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// How a tile render ended. Cancellation is an expected outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Completed,
    /// Stopped early; the tile's destination pixels are partially written.
    Cancelled,
}

/// Immutable per-pass renderer: one disk kernel, one mode.
#[derive(Debug, Clone)]
pub struct MorphologyEngine {
    element: Arc<StructuringElement>,
    mode: Mode,
    method: Method,
}

impl MorphologyEngine {
    /// Engine for a disk of radius `|radius|`.
    pub fn new(radius: i32, mode: Mode) -> Result<Self> {
        let abs = radius
            .checked_abs()
            .ok_or(Error::InvalidRadius(radius as i64))?;
        let element = StructuringElement::new(abs)?;
        debug!(
            "disk kernel radius {} ({} members), mode {:?}",
            abs,
            element.area(),
            mode
        );
        Ok(Self::with_element(Arc::new(element), mode))
    }

    /// Engine sharing an already built kernel.
    pub fn with_element(element: Arc<StructuringElement>, mode: Mode) -> Self {
        Self {
            element,
            mode,
            method: Method::default(),
        }
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn element(&self) -> &Arc<StructuringElement> {
        &self.element
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Mark every pixel of `tile` whose kernel box holds a seed of `influence`.
    ///
    /// Returns `None` when cancelled during the scan.
    pub fn influence_mask<S, C>(
        &self,
        src: &S,
        tile: Rect,
        influence: Influence,
        cancel: &C,
    ) -> Option<ActiveRegionMask>
    where
        S: PixelBuffer + ?Sized,
        C: Cancellation + ?Sized,
    {
        let mut mask = ActiveRegionMask::new(tile);
        if influence == Influence::Everywhere {
            mask.mark_rect(tile);
            return Some(mask);
        }

        let kernel = self.element.bounds();
        let region = tile.inflate(&kernel).intersect(&src.bounds());

        for y in region.top()..region.bottom() {
            if cancel.is_cancelled() {
                return None;
            }
            for x in region.left()..region.right() {
                let p = Point::new(x, y);
                if influence.seeds(src, p) {
                    mask.mark_rect(kernel.offset(p));
                }
            }
        }
        Some(mask)
    }

    /// Render `tile` of `dst` from `src`.
    ///
    /// The tile is clipped to both buffers. Active pixels get
    /// `policy.composite(src, extreme_alpha)`, inactive ones a plain copy.
    /// A zero radius copies the tile verbatim.
    pub fn render_tile<D, S, P, C>(
        &self,
        dst: &mut D,
        src: &S,
        tile: Rect,
        policy: &P,
        cancel: &C,
    ) -> RenderOutcome
    where
        D: PixelBufferMut + ?Sized,
        S: PixelBuffer + ?Sized,
        P: CompositePolicy + ?Sized,
        C: Cancellation + ?Sized,
    {
        let tile = tile.intersect(&dst.bounds()).intersect(&src.bounds());
        if tile.is_empty() {
            return RenderOutcome::Completed;
        }

        if self.element.radius() == 0 {
            dst.copy_rect(src, tile);
            return RenderOutcome::Completed;
        }

        let influence = match self.method {
            Method::EdgeDetection => policy.influence(),
            Method::Neighborhood => Influence::Everywhere,
        };

        let Some(mask) = self.influence_mask(src, tile, influence, cancel) else {
            debug!("tile {:?} cancelled while scanning influence region", tile);
            return RenderOutcome::Cancelled;
        };

        if log_enabled!(Level::Trace) {
            trace!(
                "tile {:?}: {} of {} pixels active ({:?})",
                tile,
                mask.count_active(),
                tile.area(),
                influence
            );
        }

        let mut row = tile.top() - 1;
        for (p, active) in &mask {
            if p.y != row {
                row = p.y;
                if cancel.is_cancelled() {
                    debug!("tile {:?} cancelled at row {}", tile, row);
                    return RenderOutcome::Cancelled;
                }
            }

            let color = src.pixel(p);
            if active {
                let alpha = extreme_alpha(src, p, &self.element, self.mode);
                dst.set_pixel(p, policy.composite(color, alpha));
            } else {
                dst.set_pixel(p, color);
            }
        }

        RenderOutcome::Completed
    }
}

/// Render one tile with a freshly built kernel.
///
/// The kernel radius is `|radius|`; `mode` picks dilation or erosion. Fails
/// before touching `dst` when the radius cannot be represented.
pub fn render<D, S, P, C>(
    dst: &mut D,
    src: &S,
    tile: Rect,
    radius: i32,
    mode: Mode,
    policy: &P,
    cancel: &C,
) -> Result<RenderOutcome>
where
    D: PixelBufferMut + ?Sized,
    S: PixelBuffer + ?Sized,
    P: CompositePolicy + ?Sized,
    C: Cancellation + ?Sized,
{
    let engine = MorphologyEngine::new(radius, mode)?;
    Ok(engine.render_tile(dst, src, tile, policy, cancel))
}
