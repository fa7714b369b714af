//! Core pixel arithmetic shared by the compositing policies.
//!
//! - Exact 8-bit alpha scaling
//! - Porter-Duff "over" compositing of straight (non-premultiplied) colors

use crate::surface::Bgra;

/// `round(a * b / 255)` without division.
#[inline]
pub fn mul_div_255(a: u8, b: u8) -> u8 {
    let r = a as u32 * b as u32 + 0x80;
    (((r >> 8) + r) >> 8) as u8
}

/// Blend `fg` over `bg`.
///
/// A transparent foreground leaves `bg` untouched and an opaque one replaces
/// it, both bit-exact.
#[inline]
pub fn blend_over(fg: Bgra, bg: Bgra) -> Bgra {
    if fg.a == 0 {
        return bg;
    }
    if fg.a == 255 {
        return fg;
    }

    let fg_a = fg.a as u32;
    let bg_a = mul_div_255(bg.a, 255 - fg.a) as u32;
    let out_a = fg_a + bg_a;
    if out_a == 0 {
        return Bgra::TRANSPARENT;
    }

    let channel = |f: u8, b: u8| ((f as u32 * fg_a + b as u32 * bg_a + out_a / 2) / out_a) as u8;
    Bgra::new(
        channel(fg.b, bg.b),
        channel(fg.g, bg.g),
        channel(fg.r, bg.r),
        out_a as u8,
    )
}
