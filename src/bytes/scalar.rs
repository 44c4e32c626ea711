use archmage::prelude::*;

use super::{SplitPlan, and_pixels};

// ===========================================================================
// Scalar row implementations
// ===========================================================================

pub(super) fn and_row_scalar(_token: ScalarToken, row: &mut [u8], keep: u32) {
    and_pixels(row, keep);
}

// ===========================================================================
// Scalar strided wrappers (dispatch targets for incant!)
// ===========================================================================

pub(super) fn paint_strided_scalar(
    t: ScalarToken,
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
            and_row_scalar(t, above, plan.above);
        }
        if plan.below != u32::MAX {
            and_row_scalar(t, below, plan.below);
        }
    }
}
