//! Line split painting over [`rgb`] crate pixel types via bytemuck.
//!
//! Zero-copy: the typed slice is reinterpreted as bytes and handed to the
//! SIMD core in [`crate::bytes`].
//!
//! ```rust
//! use rgb::Rgba;
//! use sprite_cutter::{Line, typed_rgb};
//!
//! let mut pixels = vec![Rgba::new(255u8, 255, 255, 255); 4 * 4];
//! let line = Line::from_coords(0.0, 0.0, 4.0, 4.0).unwrap();
//! typed_rgb::tint_by_line(&mut pixels, 4, 4, &line).unwrap();
//! assert_eq!(pixels[0], Rgba::new(0, 0, 255, 255));
//! assert_eq!(pixels[4], Rgba::new(255, 0, 0, 255));
//! ```

use rgb::Rgba;

use crate::{Line, Side, SizeError, Tint};

/// Typed form of [`crate::bytes::paint_by_line`]. `pixels.len()` must be `width * height`.
pub fn paint_by_line(
    pixels: &mut [Rgba<u8>],
    width: usize,
    height: usize,
    line: &Line,
    tint: Tint,
) -> Result<(), SizeError> {
    let bytes: &mut [u8] = bytemuck::cast_slice_mut(pixels);
    crate::bytes::paint_by_line(bytes, width, height, line, tint)
}

/// Typed form of [`crate::bytes::tint_by_line`].
pub fn tint_by_line(
    pixels: &mut [Rgba<u8>],
    width: usize,
    height: usize,
    line: &Line,
) -> Result<(), SizeError> {
    paint_by_line(pixels, width, height, line, Tint::SPLIT)
}

/// Typed form of [`crate::bytes::fade_by_line`].
pub fn fade_by_line(
    pixels: &mut [Rgba<u8>],
    width: usize,
    height: usize,
    line: &Line,
    side: Side,
) -> Result<(), SizeError> {
    paint_by_line(pixels, width, height, line, Tint::fade(side))
}
