use super::*;
use crate::ChannelMask;
use archmage::testing::{CompileTimePolicy, for_each_token_permutation};

fn policy() -> CompileTimePolicy {
    if std::env::var_os("CI").is_some() {
        CompileTimePolicy::Fail
    } else {
        CompileTimePolicy::WarnStderr
    }
}

// --- Helpers to generate test data ---

fn make_4bpp(n_pixels: usize) -> Vec<u8> {
    (0..n_pixels * 4).map(|i| (i % 251) as u8 | 1).collect()
}

fn line(x1: f32, y1: f32, x2: f32, y2: f32) -> Line {
    Line::from_coords(x1, y1, x2, y2).unwrap()
}

// --- Reference implementation: per-pixel classification, no row splitting ---

fn ref_paint(data: &[u8], width: usize, line: &Line, tint: Tint) -> Vec<u8> {
    let boundary = line.boundary();
    let mut out = data.to_vec();
    for (i, px) in out.chunks_exact_mut(4).enumerate() {
        let (x, y) = (i % width, i / width);
        let keep = tint
            .clears(boundary.classify(x as f32, y as f32))
            .keep_bytes();
        for (c, k) in px.iter_mut().zip(keep) {
            *c &= k;
        }
    }
    out
}

fn test_lines() -> Vec<Line> {
    vec![
        line(0.0, 0.0, 4.0, 4.0),
        line(0.0, 16.0, 70.0, 48.0),
        line(3.0, -5.0, 9.5, 40.0),
        line(65.0, 0.0, 0.0, 20.0),
        line(12.0, 0.0, 12.0, 9.0),
        line(0.0, 3.0, 50.0, 3.0),
        line(-100.0, -100.0, -50.0, -60.0),
    ]
}

// Widths: remainder only, one SIMD chunk, several chunks plus remainder
const TEST_WIDTHS: &[usize] = &[1, 2, 3, 7, 8, 9, 15, 16, 17, 33, 65];
const TEST_HEIGHT: usize = 6;

// -----------------------------------------------------------------------
// SIMD-dispatched operations: tested at every capability tier
// -----------------------------------------------------------------------

#[test]
fn permutation_tint_matches_reference() {
    let report = for_each_token_permutation(policy(), |perm| {
        for line in &test_lines() {
            for &w in TEST_WIDTHS {
                let mut data = make_4bpp(w * TEST_HEIGHT);
                let expected = ref_paint(&data, w, line, Tint::SPLIT);
                tint_by_line(&mut data, w, TEST_HEIGHT, line).unwrap();
                assert_eq!(data, expected, "tint w={w} line={line:?} tier={perm}");
            }
        }
    });
    std::eprintln!("tint_by_line: {report}");
}

#[test]
fn permutation_fade_matches_reference() {
    let report = for_each_token_permutation(policy(), |perm| {
        for line in &test_lines() {
            for side in [Side::Above, Side::Below] {
                for &w in TEST_WIDTHS {
                    let mut data = make_4bpp(w * TEST_HEIGHT);
                    let expected = ref_paint(&data, w, line, Tint::fade(side));
                    fade_by_line(&mut data, w, TEST_HEIGHT, line, side).unwrap();
                    assert_eq!(
                        data, expected,
                        "fade {side:?} w={w} line={line:?} tier={perm}"
                    );
                }
            }
        }
    });
    std::eprintln!("fade_by_line: {report}");
}

#[test]
fn permutation_custom_tint() {
    let tint = Tint {
        above: ChannelMask::RED | ChannelMask::ALPHA,
        below: ChannelMask::BLUE,
    };
    let report = for_each_token_permutation(policy(), |perm| {
        let l = line(0.0, 0.0, 40.0, 10.0);
        let mut data = make_4bpp(40 * 10);
        let expected = ref_paint(&data, 40, &l, tint);
        paint_by_line(&mut data, 40, 10, &l, tint).unwrap();
        assert_eq!(data, expected, "custom tint tier={perm}");
    });
    std::eprintln!("paint_by_line: {report}");
}

#[test]
fn permutation_strided_tint() {
    let report = for_each_token_permutation(policy(), |perm| {
        let w = 37;
        let h = 5;
        let stride = w * 4 + 12;
        let l = line(0.0, 0.0, 30.0, 4.0);
        let mut buf = vec![0xCCu8; stride * h];
        for y in 0..h {
            for x in 0..w {
                buf[y * stride + x * 4..][..4].copy_from_slice(&[200, 150, 100, 50]);
            }
        }
        tint_by_line_strided(&mut buf, w, h, stride, &l).unwrap();
        let boundary = l.boundary();
        for y in 0..h {
            for x in 0..w {
                let i = y * stride + x * 4;
                let expected = match boundary.classify(x as f32, y as f32) {
                    Side::Above => [200, 0, 0, 50],
                    Side::Below => [0, 0, 100, 50],
                };
                assert_eq!(
                    buf[i..i + 4],
                    expected,
                    "strided tint y={y} x={x} tier={perm}"
                );
            }
            for i in y * stride + w * 4..(y + 1) * stride {
                assert_eq!(buf[i], 0xCC, "padding corrupted y={y} i={i} tier={perm}");
            }
        }
    });
    std::eprintln!("strided_tint: {report}");
}

#[test]
fn permutation_strided_fade_short_last_row() {
    let report = for_each_token_permutation(policy(), |perm| {
        let w = 20;
        let h = 3;
        let stride = w * 4 + 4;
        // Last row carries no padding.
        let mut buf = vec![255u8; stride * (h - 1) + w * 4];
        let l = line(10.0, 0.0, 10.0, 3.0);
        fade_by_line_strided(&mut buf, w, h, stride, &l, Side::Below).unwrap();
        for y in 0..h {
            for x in 0..w {
                let alpha = buf[y * stride + x * 4 + 3];
                assert_eq!(alpha, if x < 10 { 255 } else { 0 }, "y={y} x={x} tier={perm}");
            }
        }
    });
    std::eprintln!("strided_fade: {report}");
}

// -----------------------------------------------------------------------
// Behavioural properties of the split tint
// -----------------------------------------------------------------------

#[test]
fn green_zero_alpha_kept_everywhere() {
    for line in &test_lines() {
        let mut data = make_4bpp(33 * 7);
        let before = data.clone();
        tint_by_line(&mut data, 33, 7, line).unwrap();
        for (px, orig) in data.chunks_exact(4).zip(before.chunks_exact(4)) {
            assert_eq!(px[1], 0);
            assert_eq!(px[3], orig[3]);
            // Exactly one of red/blue survives.
            assert!((px[0] == orig[0] && px[2] == 0) || (px[0] == 0 && px[2] == orig[2]));
        }
    }
}

#[test]
fn tint_is_idempotent() {
    for line in &test_lines() {
        let mut once = make_4bpp(17 * 9);
        tint_by_line(&mut once, 17, 9, line).unwrap();
        let mut twice = once.clone();
        tint_by_line(&mut twice, 17, 9, line).unwrap();
        assert_eq!(once, twice);
    }
}

#[test]
fn diagonal_four_by_four() {
    // m = 1, b = 0: expected_x = y, so a pixel is above iff x < y.
    let mut buf = vec![255u8; 4 * 4 * 4];
    tint_by_line(&mut buf, 4, 4, &line(0.0, 0.0, 4.0, 4.0)).unwrap();
    for y in 0..4 {
        for x in 0..4 {
            let px = &buf[(y * 4 + x) * 4..][..4];
            if x < y {
                assert_eq!(px, [255, 0, 0, 255], "above x={x} y={y}");
            } else {
                assert_eq!(px, [0, 0, 255, 255], "below x={x} y={y}");
            }
        }
    }
}

#[test]
fn vertical_line_two_by_two() {
    let mut buf = vec![255u8; 2 * 2 * 4];
    tint_by_line(&mut buf, 2, 2, &line(1.0, 0.0, 1.0, 2.0)).unwrap();
    assert_eq!(
        buf,
        [
            255, 0, 0, 255, 0, 0, 255, 255, //
            255, 0, 0, 255, 0, 0, 255, 255,
        ]
    );
}

// -----------------------------------------------------------------------
// Size validation
// -----------------------------------------------------------------------

#[test]
fn test_size_errors() {
    let l = line(0.0, 0.0, 1.0, 1.0);
    assert_eq!(
        tint_by_line(&mut [0; 12], 2, 2, &l),
        Err(SizeError::LengthMismatch {
            expected: 16,
            actual: 12
        })
    );
    assert_eq!(
        tint_by_line(&mut [0; 20], 2, 2, &l),
        Err(SizeError::LengthMismatch {
            expected: 16,
            actual: 20
        })
    );
    assert_eq!(
        tint_by_line(&mut [0; 0], 0, 2, &l),
        Err(SizeError::InvalidDimensions)
    );
    assert_eq!(
        tint_by_line(&mut [0; 16], usize::MAX / 2, 4, &l),
        Err(SizeError::Overflow)
    );
}

#[test]
fn rejected_buffer_is_untouched() {
    let mut buf = vec![7u8; 15];
    let _ = tint_by_line(&mut buf, 2, 2, &line(0.0, 0.0, 1.0, 1.0));
    assert!(buf.iter().all(|&b| b == 7));
}

#[test]
fn test_strided_size_errors() {
    let l = line(0.0, 0.0, 1.0, 1.0);
    // stride < width * 4
    assert_eq!(
        tint_by_line_strided(&mut [0; 32], 2, 2, 4, &l),
        Err(SizeError::InvalidStride)
    );
    // buffer too small
    assert_eq!(
        tint_by_line_strided(&mut [0; 10], 2, 2, 8, &l),
        Err(SizeError::InvalidStride)
    );
    // zero width
    assert_eq!(
        tint_by_line_strided(&mut [0; 8], 0, 1, 8, &l),
        Err(SizeError::InvalidDimensions)
    );
    // zero height
    assert_eq!(
        tint_by_line_strided(&mut [0; 8], 2, 0, 8, &l),
        Err(SizeError::InvalidDimensions)
    );
}
