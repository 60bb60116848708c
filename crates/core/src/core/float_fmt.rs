//! Number formatting for display in the browser.
//!
//! Finite values below the `i64` range are printed from integers: the integer
//! part directly, the fraction scaled + rounded into a `u64`. No `format!` on
//! floats there (wasm float-to-decimal formatting has panicked on some
//! toolchain/browser combinations). Integral values beyond `i64` fall back to
//! `format!("{:e}")`.

const I64_LIMIT: f64 = 9_223_372_036_854_775_807.0;

/// Formats `v` the way a JS number reads to a user: integers without a
/// fraction, other values with up to six decimals (fewer for large magnitudes)
/// and trailing zeros trimmed.
pub fn fmt_number(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };
    }

    if v.fract() == 0.0 {
        if v.abs() < I64_LIMIT {
            // -0 prints as "0", like JS.
            return (v as i64).to_string();
        }
        return format!("{v:e}");
    }

    // Non-integral values are below 2^53, and `abs - trunc` is exact.
    let abs = v.abs();
    let mut int_part = abs.trunc() as u64;
    let int_digits = int_part.to_string().len();
    // Keep the printed digits within f64 precision (about 15).
    let decimals = 15usize.saturating_sub(int_digits).clamp(1, 6);
    let scale = 10_u64.pow(decimals as u32);
    let mut frac_part = ((abs - abs.trunc()) * scale as f64).round() as u64;
    if frac_part >= scale {
        int_part += 1;
        frac_part -= scale;
    }

    let mut out = String::new();
    if v < 0.0 && (int_part > 0 || frac_part > 0) {
        out.push('-');
    }
    out.push_str(&int_part.to_string());
    if frac_part > 0 {
        let digits = frac_part.to_string();
        out.push('.');
        for _ in digits.len()..decimals {
            out.push('0');
        }
        out.push_str(digits.trim_end_matches('0'));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_print_without_fraction() {
        assert_eq!(fmt_number(5.0), "5");
        assert_eq!(fmt_number(-2_147_483_648.0), "-2147483648");
        assert_eq!(fmt_number(-0.0), "0");
        assert_eq!(fmt_number(9_007_199_254_740_992.0), "9007199254740992");
        assert_eq!(fmt_number(1.0e20), "1e20");
    }

    #[test]
    fn fractions_are_trimmed() {
        assert_eq!(fmt_number(2.5), "2.5");
        assert_eq!(fmt_number(-0.125), "-0.125");
        assert_eq!(fmt_number(1.0 / 3.0), "0.333333");
        assert_eq!(fmt_number(-0.0000001), "0");
        assert_eq!(fmt_number(1.0e13 + 0.5), "10000000000000.5");
        assert_eq!(fmt_number(-1_234_567_890.125), "-1234567890.125");
        assert_eq!(fmt_number(4_503_599_627_370_495.5), "4503599627370495.5");
        assert_eq!(fmt_number(0.000_000_1), "0");
        assert_eq!(fmt_number(0.999_999_9), "1");
        assert_eq!(fmt_number(0.05), "0.05");
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(fmt_number(f64::NAN), "NaN");
        assert_eq!(fmt_number(f64::INFINITY), "Infinity");
        assert_eq!(fmt_number(f64::NEG_INFINITY), "-Infinity");
    }
}
