use serde::{Deserialize, Serialize};

use crate::core::curve::Curve;
use crate::core::types::{TimeSeries, Timestamp};
use crate::core::units::UnitInfo;

/// Text shown for statistics without a value.
pub const MISSING_SCALAR_TEXT: &str = "n/a";

/// A statistic together with its unit-rendered text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedScalar {
    pub value: Option<f64>,
    pub text: String,
}

impl RenderedScalar {
    #[must_use]
    pub fn render(value: Option<f64>, unit: &UnitInfo) -> Self {
        match value {
            Some(value) => Self {
                value: Some(value),
                text: unit.render(value),
            },
            None => Self::missing(),
        }
    }

    #[must_use]
    pub fn missing() -> Self {
        Self {
            value: None,
            text: MISSING_SCALAR_TEXT.to_owned(),
        }
    }
}

impl Default for RenderedScalar {
    fn default() -> Self {
        Self::missing()
    }
}

/// Legend statistics of one curve.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CurveScalars {
    pub pin: RenderedScalar,
    pub first: RenderedScalar,
    pub last: RenderedScalar,
    pub max: RenderedScalar,
    pub min: RenderedScalar,
    pub average: RenderedScalar,
}

/// Reads the sample at `timestamp`; see [`TimeSeries::value_at`].
#[must_use]
pub fn value_at(timestamp: Timestamp, series: &TimeSeries) -> Option<f64> {
    series.value_at(timestamp)
}

/// Computes the statistics of one series over its present samples.
///
/// A series without any present sample gets `n/a` everywhere, the pin
/// included.
#[must_use]
pub fn compute_curve_scalars(
    series: &TimeSeries,
    unit: &UnitInfo,
    pin_time: Option<Timestamp>,
) -> CurveScalars {
    let mut present = series.present_values();
    let Some(first) = present.next() else {
        return CurveScalars::default();
    };

    let mut last = first;
    let mut min = first;
    let mut max = first;
    let mut sum = first;
    let mut count = 1_usize;
    for value in present {
        last = value;
        min = min.min(value);
        max = max.max(value);
        sum += value;
        count += 1;
    }

    let pin = pin_time.and_then(|timestamp| value_at(timestamp, series));
    CurveScalars {
        pin: RenderedScalar::render(pin, unit),
        first: RenderedScalar::render(Some(first), unit),
        last: RenderedScalar::render(Some(last), unit),
        max: RenderedScalar::render(Some(max), unit),
        min: RenderedScalar::render(Some(min), unit),
        average: RenderedScalar::render(Some(sum / count as f64), unit),
    }
}

/// Stores freshly computed statistics on every paintable curve.
pub fn compute_scalars(curves: &mut [Curve], unit: &UnitInfo, pin_time: Option<Timestamp>) {
    for curve in curves.iter_mut().filter(|curve| !curve.dont_paint) {
        curve.scalars = compute_curve_scalars(&curve.series, unit, pin_time);
    }
}

/// Value of one curve at a hovered point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveValue {
    pub title: String,
    pub color: String,
    pub rendered_value: RenderedScalar,
}

/// Values of all paintable curves at `timestamp`, top-most curve first.
#[must_use]
pub fn curve_values_at_timestamp(
    curves: &[Curve],
    unit: &UnitInfo,
    timestamp: Timestamp,
) -> Vec<CurveValue> {
    curves
        .iter()
        .rev()
        .filter(|curve| !curve.dont_paint)
        .map(|curve| CurveValue {
            title: curve.title.clone(),
            color: curve.color.clone(),
            rendered_value: RenderedScalar::render(value_at(timestamp, &curve.series), unit),
        })
        .collect()
}
