//! Line split painting on [`imgref`] image views.
//!
//! Strided images are handled natively: padding pixels between rows are
//! never read or written. No allocation, the caller owns the buffer.
//!
//! ```rust
//! use rgb::Rgba;
//! use ::imgref::ImgRefMut;
//! use sprite_cutter::{Line, imgref};
//!
//! let mut buf = vec![Rgba::new(255u8, 255, 255, 255); 8 * 4];
//! // 6×4 image inside rows of 8 pixels.
//! let img = ImgRefMut::new_stride(&mut buf, 6, 4, 8);
//! let line = Line::from_coords(3.0, 0.0, 3.0, 4.0).unwrap();
//! imgref::tint_by_line(img, &line).unwrap();
//! assert_eq!(buf[0], Rgba::new(255, 0, 0, 255));
//! assert_eq!(buf[5], Rgba::new(0, 0, 255, 255));
//! assert_eq!(buf[7], Rgba::new(255, 255, 255, 255));
//! ```

use ::imgref::ImgRefMut;
use rgb::Rgba;

use crate::{Line, Side, SizeError, Tint};

/// Paint both sides of `line` across the image with `tint`.
pub fn paint_by_line(
    img: ImgRefMut<'_, Rgba<u8>>,
    line: &Line,
    tint: Tint,
) -> Result<(), SizeError> {
    let (width, height, stride) = (img.width(), img.height(), img.stride());
    let stride_bytes = stride.checked_mul(4).ok_or(SizeError::Overflow)?;
    let pixels: &mut [Rgba<u8>] = img.into_buf();
    let bytes: &mut [u8] = bytemuck::cast_slice_mut(pixels);
    crate::bytes::paint_by_line_strided(bytes, width, height, stride_bytes, line, tint)
}

/// Apply [`Tint::SPLIT`] across the image.
pub fn tint_by_line(img: ImgRefMut<'_, Rgba<u8>>, line: &Line) -> Result<(), SizeError> {
    paint_by_line(img, line, Tint::SPLIT)
}

/// Zero the alpha of every pixel on `side` of `line`.
pub fn fade_by_line(
    img: ImgRefMut<'_, Rgba<u8>>,
    line: &Line,
    side: Side,
) -> Result<(), SizeError> {
    paint_by_line(img, line, Tint::fade(side))
}
