use alloy::primitives::U256;

/// Scales a raw token amount by `10^-decimals` and renders it as an exact
/// decimal string with no trailing zeros.
///
/// Works on the base-10 digits directly: no floating point anywhere, since
/// token amounts routinely exceed what an `f64` can represent exactly.
/// `decimals = 0` yields the raw integer with no decimal point.
pub fn format_balance(raw: U256, decimals: u8) -> String {
    let digits = raw.to_string();
    if decimals == 0 {
        return digits;
    }

    let decimals = decimals as usize;
    let (int_part, frac_part) = if digits.len() > decimals {
        let split = digits.len() - decimals;
        (&digits[..split], digits[split..].to_string())
    } else {
        ("0", format!("{digits:0>decimals$}"))
    };

    let frac_part = frac_part.trim_end_matches('0');
    if frac_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{int_part}.{frac_part}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(raw: u128, decimals: u8) -> String {
        format_balance(U256::from(raw), decimals)
    }

    #[test]
    fn test_trims_trailing_zeros() {
        assert_eq!(fmt(1_500_000, 6), "1.5");
        assert_eq!(fmt(2_500_000, 6), "2.5");
    }

    #[test]
    fn test_whole_amounts_have_no_point() {
        assert_eq!(fmt(1_000_000_000_000_000_000, 18), "1");
        assert_eq!(fmt(3_000_000, 6), "3");
    }

    #[test]
    fn test_zero() {
        assert_eq!(fmt(0, 18), "0");
        assert_eq!(fmt(0, 0), "0");
    }

    #[test]
    fn test_zero_decimals_is_raw_integer() {
        assert_eq!(fmt(123_456, 0), "123456");
    }

    #[test]
    fn test_amounts_below_one() {
        assert_eq!(fmt(123, 6), "0.000123");
        assert_eq!(fmt(1, 18), "0.000000000000000001");
    }

    #[test]
    fn test_exact_beyond_f64_precision() {
        // 2^64 + 1 wei cannot be represented exactly as an f64
        let raw = U256::from(u128::from(u64::MAX) + 2);
        assert_eq!(format_balance(raw, 0), "18446744073709551617");
        assert_eq!(format_balance(raw, 18), "18.446744073709551617");
    }

    #[test]
    fn test_max_uint8_decimals() {
        let s = format_balance(U256::from(1u8), 255);
        assert_eq!(s.len(), 2 + 255);
        assert!(s.starts_with("0.0"));
        assert!(s.ends_with('1'));
    }
}
