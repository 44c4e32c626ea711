use archmage::prelude::*;
use safe_unaligned_simd::x86_64::{_mm256_loadu_si256, _mm256_storeu_si256};

use super::{SplitPlan, and_pixels};

// ===========================================================================
// x86-64 AVX2: rite row implementations
// ===========================================================================

#[rite]
pub(super) fn and_row_v3(_token: X64V3Token, row: &mut [u8], keep: u32) {
    let mask = _mm256_set1_epi32(keep as i32);
    let n = row.len();
    let mut i = 0;
    while i + 32 <= n {
        let arr: &[u8; 32] = row[i..i + 32].try_into().unwrap();
        let v = _mm256_loadu_si256(arr);
        let out: &mut [u8; 32] = (&mut row[i..i + 32]).try_into().unwrap();
        _mm256_storeu_si256(out, _mm256_and_si256(v, mask));
        i += 32;
    }
    and_pixels(&mut row[i..], keep);
}

// ===========================================================================
// x86-64 arcane strided wrappers
// ===========================================================================

#[arcane]
pub(super) fn paint_strided_v3(
    t: X64V3Token,
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
            and_row_v3(t, above, plan.above);
        }
        if plan.below != u32::MAX {
            and_row_v3(t, below, plan.below);
        }
    }
}
