// ---------------------------------------------------------------------------
// Row-level line split painting with SIMD dispatch.
//
// Architecture: each row is split at the boundary's split index; the two
// spans are ANDed with a per-side keep mask. #[rite] row functions contain
// the SIMD loops. #[arcane] strided wrappers walk the rows and are
// dispatched once per call via incant!.
// ---------------------------------------------------------------------------

use archmage::incant;

use crate::{Boundary, Line, Side, SizeError, Tint};

mod scalar;
use scalar::*;

#[cfg(target_arch = "x86_64")]
mod avx2;
#[cfg(target_arch = "x86_64")]
use avx2::*;

#[cfg(target_arch = "aarch64")]
mod neon;
#[cfg(target_arch = "aarch64")]
use neon::*;

#[cfg(target_arch = "wasm32")]
mod wasm;
#[cfg(target_arch = "wasm32")]
use wasm::*;

#[cfg(test)]
mod tests;

// ===========================================================================
// Validation helpers
// ===========================================================================

/// Returns the row length in bytes, which is also the stride.
#[inline]
fn check_contiguous(len: usize, width: usize, height: usize) -> Result<usize, SizeError> {
    if width == 0 || height == 0 {
        return Err(SizeError::InvalidDimensions);
    }
    let row_bytes = width.checked_mul(4).ok_or(SizeError::Overflow)?;
    let expected = row_bytes.checked_mul(height).ok_or(SizeError::Overflow)?;
    if len != expected {
        return Err(SizeError::LengthMismatch {
            expected,
            actual: len,
        });
    }
    Ok(row_bytes)
}

#[inline]
fn check_strided(len: usize, width: usize, height: usize, stride: usize) -> Result<(), SizeError> {
    if width == 0 || height == 0 {
        return Err(SizeError::InvalidDimensions);
    }
    let row_bytes = width.checked_mul(4).ok_or(SizeError::Overflow)?;
    if row_bytes > stride {
        return Err(SizeError::InvalidStride);
    }
    let total = (height - 1)
        .checked_mul(stride)
        .ok_or(SizeError::Overflow)?
        .checked_add(row_bytes)
        .ok_or(SizeError::Overflow)?;
    if len < total {
        return Err(SizeError::InvalidStride);
    }
    Ok(())
}

// ===========================================================================
// Utility
// ===========================================================================

/// Everything a row kernel needs, computed once per call.
#[derive(Debug, Clone, Copy)]
struct SplitPlan {
    boundary: Boundary,
    above: u32,
    below: u32,
}

impl SplitPlan {
    fn new(line: &Line, tint: Tint) -> Self {
        Self {
            boundary: line.boundary(),
            above: tint.above.keep_word(),
            below: tint.below.keep_word(),
        }
    }
}

/// Scalar AND over whole pixels; the remainder loop of every tier.
#[inline(always)]
fn and_pixels(bytes: &mut [u8], keep: u32) {
    for px in bytes.chunks_exact_mut(4) {
        let v = u32::from_ne_bytes([px[0], px[1], px[2], px[3]]);
        px.copy_from_slice(&(v & keep).to_ne_bytes());
    }
}

fn paint(buf: &mut [u8], width: usize, height: usize, stride: usize, plan: SplitPlan) {
    tracing::debug!(
        width,
        height,
        stride,
        boundary = ?plan.boundary,
        "painting line split"
    );
    incant!(
        paint_strided(buf, width, height, stride, plan),
        [v3, neon, wasm128, scalar]
    );
}

// ===========================================================================
// Public API: contiguous
// ===========================================================================

/// Split a tightly packed RGBA image along `line` and apply `tint` to each side.
///
/// `buf` must hold exactly `width * height * 4` bytes. Pixels with
/// `x < expected_x(y)` are [`Side::Above`]; every other pixel is
/// [`Side::Below`].
pub fn paint_by_line(
    buf: &mut [u8],
    width: usize,
    height: usize,
    line: &Line,
    tint: Tint,
) -> Result<(), SizeError> {
    let stride = check_contiguous(buf.len(), width, height)?;
    paint(buf, width, height, stride, SplitPlan::new(line, tint));
    Ok(())
}

/// Apply the texture split tint ([`Tint::SPLIT`]).
///
/// Above the line green and blue become 0; below it red and green become 0.
/// Alpha is never written.
pub fn tint_by_line(
    buf: &mut [u8],
    width: usize,
    height: usize,
    line: &Line,
) -> Result<(), SizeError> {
    paint_by_line(buf, width, height, line, Tint::SPLIT)
}

/// Zero the alpha of every pixel on `side` of `line`; the other side is not written.
pub fn fade_by_line(
    buf: &mut [u8],
    width: usize,
    height: usize,
    line: &Line,
    side: Side,
) -> Result<(), SizeError> {
    paint_by_line(buf, width, height, line, Tint::fade(side))
}

// ===========================================================================
// Public API: strided
// ===========================================================================

/// Strided form of [`paint_by_line`].
///
/// `stride` is the distance in bytes between the start of consecutive rows.
/// Must be ≥ `width × 4`. Padding bytes between rows are never read or written.
/// The buffer must be at least `(height - 1) * stride + width * 4` bytes.
pub fn paint_by_line_strided(
    buf: &mut [u8],
    width: usize,
    height: usize,
    stride: usize,
    line: &Line,
    tint: Tint,
) -> Result<(), SizeError> {
    check_strided(buf.len(), width, height, stride)?;
    paint(buf, width, height, stride, SplitPlan::new(line, tint));
    Ok(())
}

/// Strided form of [`tint_by_line`].
pub fn tint_by_line_strided(
    buf: &mut [u8],
    width: usize,
    height: usize,
    stride: usize,
    line: &Line,
) -> Result<(), SizeError> {
    paint_by_line_strided(buf, width, height, stride, line, Tint::SPLIT)
}

/// Strided form of [`fade_by_line`].
pub fn fade_by_line_strided(
    buf: &mut [u8],
    width: usize,
    height: usize,
    stride: usize,
    line: &Line,
    side: Side,
) -> Result<(), SizeError> {
    paint_by_line_strided(buf, width, height, stride, line, Tint::fade(side))
}
