use core::arch::aarch64::vandq_u8;

use archmage::prelude::*;
use safe_unaligned_simd::aarch64::{vld1q_u8, vst1q_u8};

use super::{SplitPlan, and_pixels};

// ===========================================================================
// ARM NEON: rite row implementations
// ===========================================================================

#[rite]
pub(super) fn and_row_neon(_token: NeonToken, row: &mut [u8], keep: u32) {
    let mut mask_bytes = [0u8; 16];
    for px in mask_bytes.chunks_exact_mut(4) {
        px.copy_from_slice(&keep.to_ne_bytes());
    }
    let mask = vld1q_u8(&mask_bytes);
    let n = row.len();
    let mut i = 0;
    while i + 16 <= n {
        let arr: &[u8; 16] = row[i..i + 16].try_into().unwrap();
        let v = vld1q_u8(arr);
        let out: &mut [u8; 16] = (&mut row[i..i + 16]).try_into().unwrap();
        vst1q_u8(out, vandq_u8(v, mask));
        i += 16;
    }
    and_pixels(&mut row[i..], keep);
}

// ===========================================================================
// ARM NEON arcane strided wrappers
// ===========================================================================

#[arcane]
pub(super) fn paint_strided_neon(
    t: NeonToken,
    buf: &mut [u8],
    w: usize,
    h: usize,
    stride: usize,
    plan: SplitPlan,
) {
    for y in 0..h {
        let row = &mut buf[y * stride..][..w * 4];
        let (above, below) = row.split_at_mut(plan.boundary.split(y, w) * 4);
        if plan.above != u32::MAX {
            and_row_neon(t, above, plan.above);
        }
        if plan.below != u32::MAX {
            and_row_neon(t, below, plan.below);
        }
    }
}
