use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Largest number of fractional digits a `Decimal` can carry.
const DECIMAL_MAX_SCALE: u32 = 28;

/// Splits `x` into `mantissa * base^exponent` with `mantissa` in `[1, base)`.
///
/// Non-positive or non-finite input yields `(1.0, 0)` so callers never see
/// a NaN mantissa.
#[must_use]
pub fn frexpb(x: f64, base: f64) -> (f64, i32) {
    if !x.is_finite() || x <= 0.0 || !base.is_finite() || base <= 1.0 {
        return (1.0, 0);
    }

    let mut exponent = x.log(base).trunc() as i32;
    let mut mantissa = x / base.powi(exponent);
    if mantissa < 1.0 {
        mantissa *= base;
        exponent -= 1;
    }
    (mantissa, exponent)
}

/// Rounds `value` to `places` decimal digits using exact decimal arithmetic
/// (ties to even), so repeated stepping does not accumulate binary drift.
#[must_use]
pub fn round_to_places(value: f64, places: u32) -> f64 {
    if !value.is_finite() || places > DECIMAL_MAX_SCALE {
        return value;
    }

    Decimal::from_f64(value)
        .map(|decimal| decimal.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven))
        .and_then(|rounded| rounded.to_f64())
        .unwrap_or_else(|| {
            let factor = 10f64.powi(places as i32);
            (value * factor).round() / factor
        })
}

/// Formats with a fixed number of fractional digits; negative counts mean none.
#[must_use]
pub fn format_fixed(value: f64, places: i32) -> String {
    let places = usize::try_from(places).unwrap_or(0);
    format!("{value:.places$}")
}

#[cfg(test)]
mod tests {
    use super::{format_fixed, frexpb, round_to_places};

    #[test]
    fn frexpb_splits_decimal_values() {
        let (mantissa, exponent) = frexpb(97.0 / 8.0, 10.0);
        assert!((mantissa - 1.2125).abs() <= 1e-12);
        assert_eq!(exponent, 1);

        let (mantissa, exponent) = frexpb(0.03, 10.0);
        assert!((mantissa - 3.0).abs() <= 1e-9);
        assert_eq!(exponent, -2);
    }

    #[test]
    fn frexpb_handles_binary_base_and_degenerate_input() {
        let (mantissa, exponent) = frexpb(1024.0, 16.0);
        assert!((mantissa - 4.0).abs() <= 1e-12);
        assert_eq!(exponent, 2);
        assert_eq!(frexpb(0.0, 10.0), (1.0, 0));
        assert_eq!(frexpb(f64::NAN, 10.0), (1.0, 0));
    }

    #[test]
    fn rounding_removes_binary_drift() {
        assert_eq!(round_to_places(0.1 + 0.2, 3), 0.3);
        assert_eq!(round_to_places(-2.0000000001, 2), -2.0);
        assert_eq!(round_to_places(1e40, 0), 1e40);
    }

    #[test]
    fn fixed_format_clamps_negative_places() {
        assert_eq!(format_fixed(4.56, 1), "4.6");
        assert_eq!(format_fixed(4.56, -2), "5");
    }
}
