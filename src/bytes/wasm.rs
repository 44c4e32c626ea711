use core::arch::wasm32::{u32x4_splat, v128_and};

use archmage::prelude::*;
use safe_unaligned_simd::wasm32::{v128_load, v128_store};

use super::{SplitPlan, and_pixels};

// ===========================================================================
// WASM SIMD128: rite row implementations
// ===========================================================================

#[rite]
pub(super) fn and_row_wasm128(_token: Wasm128Token, row: &mut [u8], keep: u32) {
    let mask = u32x4_splat(keep);
    let n = row.len();
    let mut i = 0;
    while i + 16 <= n {
        let arr: &[u8; 16] = row[i..i + 16].try_into().unwrap();
        let v = v128_load(arr);
        let out: &mut [u8; 16] = (&mut row[i..i + 16]).try_into().unwrap();
        v128_store(out, v128_and(v, mask));
        i += 16;
    }
    and_pixels(&mut row[i..], keep);
}

// ===========================================================================
// WASM arcane strided wrappers
// ===========================================================================

#[arcane]
pub(super) fn paint_strided_wasm128(
    t: Wasm128Token,
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
            and_row_wasm128(t, above, plan.above);
        }
        if plan.below != u32::MAX {
            and_row_wasm128(t, below, plan.below);
        }
    }
}
