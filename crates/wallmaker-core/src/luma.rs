//! Luma calculation using ITU-R BT.601 coefficients.
//!
//! Luma is the desaturation basis of the saturation adjustment. The weighted
//! sum is evaluated in `f64` and truncated toward zero, so a neutral gray can
//! come out one level below its channel value.

/// ITU-R BT.601 coefficient for red channel in luma calculation.
pub const LUMA_R: f64 = 0.299;

/// ITU-R BT.601 coefficient for green channel in luma calculation.
pub const LUMA_G: f64 = 0.587;

/// ITU-R BT.601 coefficient for blue channel in luma calculation.
pub const LUMA_B: f64 = 0.114;

/// Calculate luma from 8-bit RGB channel values.
///
/// # Returns
/// Truncated luma in 0-255.
#[inline]
pub fn luma(r: i32, g: i32, b: i32) -> i32 {
    (LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficients_sum_to_one() {
        let sum = LUMA_R + LUMA_G + LUMA_B;
        assert!((sum - 1.0).abs() < 1e-12, "Coefficients should sum to 1.0");
    }

    #[test]
    fn test_luma_pure_black() {
        assert_eq!(luma(0, 0, 0), 0);
    }

    #[test]
    fn test_luma_gray_within_one_level() {
        for v in [0, 1, 64, 128, 192, 254, 255] {
            let l = luma(v, v, v);
            assert!(l == v || l == v - 1, "gray {v} produced luma {l}");
        }
    }

    #[test]
    fn test_luma_primaries() {
        // 0.299 * 255 = 76.245
        assert_eq!(luma(255, 0, 0), 76);
        // 0.587 * 255 = 149.685
        assert_eq!(luma(0, 255, 0), 149);
        // 0.114 * 255 = 29.07
        assert_eq!(luma(0, 0, 255), 29);
    }

    #[test]
    fn test_luma_truncates() {
        // 0.299*200 + 0.587*128 + 0.114*100 = 59.8 + 75.136 + 11.4 = 146.336
        assert_eq!(luma(200, 128, 100), 146);
    }

    #[test]
    fn test_luma_stays_in_range() {
        for r in (0..=255).step_by(51) {
            for g in (0..=255).step_by(51) {
                for b in (0..=255).step_by(51) {
                    let l = luma(r, g, b);
                    assert!((0..=255).contains(&l), "luma({r}, {g}, {b}) = {l}");
                }
            }
        }
    }
}
