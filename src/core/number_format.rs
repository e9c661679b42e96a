//! Human readable number rendering used by the built-in units.

use crate::core::primitives::{format_fixed, frexpb};

/// Prefix family used when scaling a value for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitPrefixes {
    /// Powers of 1000: `k`, `M`, `G`, ...
    Si,
    /// Powers of 1024: `Ki`, `Mi`, `Gi`, ...
    Iec,
}

impl UnitPrefixes {
    fn base(self) -> f64 {
        match self {
            Self::Si => 1000.0,
            Self::Iec => 1024.0,
        }
    }

    fn prefixes(self) -> &'static [&'static str] {
        match self {
            Self::Si => &["", "k", "M", "G", "T", "P", "E", "Z", "Y"],
            Self::Iec => &["", "Ki", "Mi", "Gi", "Ti", "Pi", "Ei", "Zi", "Yi"],
        }
    }

    /// Returns the factor to divide `value` by and the matching prefix.
    #[must_use]
    pub fn scale_factor_and_prefix(self, value: f64) -> (f64, &'static str) {
        let base = self.base();
        let prefixes = self.prefixes();
        let mut factor = base;
        for prefix in &prefixes[..prefixes.len() - 1] {
            if value.abs() < factor {
                return (factor / base, prefix);
            }
            factor *= base;
        }
        (factor / base, prefixes[prefixes.len() - 1])
    }
}

/// Renders `value` in E-notation unless its exponent is within `-3..=4`.
#[must_use]
pub fn scientific(value: f64, precision: i32) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    if value < 0.0 {
        return format!("-{}", scientific(-value, precision));
    }

    let (mantissa, exponent) = frexpb(value, 10.0);
    if (-3..=4).contains(&exponent) {
        return format_fixed(value, precision.min((precision - exponent).max(0)));
    }
    format!("{}e{exponent:+}", format_fixed(mantissa, precision))
}

/// Fixed-point rendering without trailing zeros or a dangling dot.
#[must_use]
pub fn drop_dotzero(value: f64, digits: i32) -> String {
    let text = format_fixed(value, digits);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_owned()
    } else {
        text
    }
}

/// Scales `value` with the given prefix family and appends `unit`.
#[must_use]
pub fn fmt_number_with_precision(
    value: f64,
    precision: i32,
    drop_zeroes: bool,
    prefixes: UnitPrefixes,
    unit: &str,
) -> String {
    let (factor, prefix) = prefixes.scale_factor_and_prefix(value);
    let scaled = value / factor;
    let number = if drop_zeroes {
        drop_dotzero(scaled, precision)
    } else {
        format_fixed(scaled, precision)
    };
    format!("{number} {prefix}{unit}")
}

/// Byte counts scaled to `KiB`, `MiB`, ... with two decimals.
#[must_use]
pub fn fmt_bytes(bytes: f64) -> String {
    fmt_number_with_precision(bytes, 2, false, UnitPrefixes::Iec, "B")
}

/// Picks the SI scale symbol, fractional digits and scale factor that
/// render `value` with `precision` significant digits.
#[must_use]
pub fn calculate_physical_precision(value: f64, precision: i32) -> (&'static str, i32, f64) {
    const SCALE_SYMBOLS: [&str; 11] = ["f", "p", "n", "µ", "m", "", "k", "M", "G", "T", "P"];

    if value == 0.0 {
        return ("", precision - 1, 1.0);
    }

    let (_, mut exponent) = frexpb(value.abs(), 10.0);
    let mut scale: i32 = 0;
    while exponent < 0 && scale > -5 {
        scale -= 1;
        exponent += 3;
    }

    let mut places_after_comma = precision - (exponent + 1);
    while places_after_comma < 0 && scale < 5 {
        scale += 1;
        exponent -= 3;
        places_after_comma = precision - (exponent + 1);
    }

    let symbol = SCALE_SYMBOLS[usize::try_from(scale + 5).unwrap_or(5)];
    (symbol, places_after_comma, 1000f64.powi(scale))
}

/// Renders a physical quantity with `precision` significant digits and an
/// SI prefix, e.g. `4500000 -> "4.50 M"`.
#[must_use]
pub fn physical_precision(value: f64, precision: i32, unit_symbol: &str) -> String {
    if value < 0.0 {
        return format!("-{}", physical_precision(-value, precision, unit_symbol));
    }

    let (symbol, places_after_comma, factor) = calculate_physical_precision(value, precision);
    format!(
        "{} {symbol}{unit_symbol}",
        format_fixed(value / factor, places_after_comma)
    )
}

/// Approximate human readable age of a duration in seconds.
#[must_use]
pub fn approx_age(secs: f64) -> String {
    if secs < 0.0 {
        return format!("-{}", approx_age(-secs));
    }
    if secs > 0.0 && secs < 1.0 {
        return physical_precision(secs, 3, "s");
    }
    if secs < 10.0 {
        return format!("{secs:.2} s");
    }
    if secs < 60.0 {
        return format!("{secs:.1} s");
    }
    if secs < 240.0 {
        return format!("{} s", secs.trunc());
    }

    let mins = (secs / 60.0).trunc();
    if mins < 360.0 {
        return format!("{mins} m");
    }

    let hours = (mins / 60.0).trunc();
    if hours < 48.0 {
        return format!("{hours} h");
    }

    let days = hours / 24.0;
    if days < 6.0 {
        return format!("{} d", drop_dotzero(days, 1));
    }
    if days < 999.0 {
        return format!("{days:.0} d");
    }

    let years = days / 365.0;
    if years < 10.0 {
        format!("{years:.1} y")
    } else {
        format!("{years:.0} y")
    }
}

/// Percentage rendering; very large values switch to E-notation.
#[must_use]
pub fn percent(perc: f64) -> String {
    if perc == 0.0 {
        return "0%".to_owned();
    }

    let abs = perc.abs();
    let mut text = if abs >= 100_000.0 {
        scientific(perc, 1)
    } else if abs >= 100.0 {
        format!("{}", perc.trunc())
    } else if abs < 0.01 {
        let digits = -(abs.log10().floor() as i32);
        let factor = 10f64.powi(digits);
        let rounded = format!("{:.7}", (perc * factor).round() / factor);
        if rounded.parse::<f64>().unwrap_or(0.0) == 0.0 {
            return "0%".to_owned();
        }
        if perc < 0.0001 {
            scientific(perc, 1)
        } else {
            rounded.trim_end_matches('0').to_owned()
        }
    } else {
        drop_dotzero(perc, 2)
    };

    if let Ok(parsed) = text.parse::<f64>() {
        if parsed.fract() == 0.0 && parsed < 100.0 {
            text.push_str(".0");
        }
    }
    text.push('%');
    text
}

/// Renders all `values` against one shared SI scale derived from the
/// smallest magnitude; returns the scaled unit and the numbers.
#[must_use]
pub fn physical_precision_list(
    values: &[f64],
    precision: i32,
    unit_symbol: &str,
) -> (String, Vec<String>) {
    let reference = values
        .iter()
        .map(|value| value.abs())
        .reduce(f64::min)
        .unwrap_or(0.0);
    let (symbol, places_after_comma, factor) = calculate_physical_precision(reference, precision);

    let scaled = values
        .iter()
        .map(|value| format_fixed(value / factor, places_after_comma))
        .collect();
    (format!("{symbol}{unit_symbol}"), scaled)
}

/// Renders all `values` against one shared IEC prefix derived from the
/// smallest magnitude.
#[must_use]
pub fn bytes_human_readable_list(
    values: &[f64],
    precision: i32,
    unit: &str,
) -> (String, Vec<String>) {
    let reference = values
        .iter()
        .map(|value| value.abs())
        .reduce(f64::min)
        .unwrap_or(0.0);
    let (factor, prefix) = UnitPrefixes::Iec.scale_factor_and_prefix(reference);

    let scaled = values
        .iter()
        .map(|value| format_fixed(value / factor, precision))
        .collect();
    (format!("{prefix}{unit}"), scaled)
}
