use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::curve::LayoutedCurve;
use crate::core::primitives::{frexpb, round_to_places};
use crate::core::units::{Stepping, UnitInfo};

/// Hard cap on emitted axis labels; reaching it truncates the axis.
pub const MAX_AXIS_LABELS: usize = 1000;

/// Line width of a labelled (major) tick.
pub const MAJOR_TICK_WIDTH: u8 = 2;

/// Line width of an unlabelled (minor) gridline.
pub const MINOR_TICK_WIDTH: u8 = 0;

const MAJOR_TICK_TOLERANCE: f64 = 1e-11;

/// A tick on the vertical axis. `text` is `None` for minor gridlines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLabel {
    pub position: f64,
    pub text: Option<String>,
    pub line_width: u8,
}

/// Resolved vertical scale of a graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerticalAxis {
    /// Displayed range including margin or zoom.
    pub range: (f64, f64),
    /// Data range after explicit overrides, without margin or zoom.
    pub real_range: (f64, f64),
    pub label_distance: f64,
    pub sub_distance: f64,
    /// Graph-wide unit shown once when the unit rescales labels together.
    pub axis_label: Option<String>,
    pub labels: Vec<AxisLabel>,
    /// Length in characters of the longest label text.
    pub max_label_length: usize,
    /// Label emission stopped at [`MAX_AXIS_LABELS`].
    #[serde(default)]
    pub truncated: bool,
}

/// Range constraints coming from the graph definition and the user.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VerticalRangeRequest {
    /// Fixed lower and upper bounds from the graph definition.
    pub explicit: (Option<f64>, Option<f64>),
    /// Range selected by zooming; replaces everything else.
    pub zoom: Option<(f64, f64)>,
}

/// Output of range resolution, before step selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalRange {
    pub real_range: (f64, f64),
    /// Width of the range before the margin was added.
    pub span: f64,
    pub min: f64,
    pub max: f64,
}

/// Distance between labelled ticks and between gridlines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelStep {
    pub label_distance: f64,
    pub sub_distance: f64,
}

/// Smallest and largest present value over all layouted points.
#[must_use]
pub fn discover_value_range(curves: &[LayoutedCurve]) -> (Option<f64>, Option<f64>) {
    let mut min: Option<f64> = None;
    let mut max: Option<f64> = None;

    for point in curves.iter().flat_map(|curve| curve.points.iter()) {
        let (lower, upper) = point.bounds();
        if let Some(lower) = lower.filter(|value| value.is_finite()) {
            min = Some(min.map_or(lower, |current| current.min(lower)));
        }
        if let Some(upper) = upper.filter(|value| value.is_finite()) {
            max = Some(max.map_or(upper, |current| current.max(upper)));
        }
    }

    (min, max)
}

/// Fills in missing extrema so a usable range always exists.
#[must_use]
pub fn purge_min_max(min: Option<f64>, max: Option<f64>, mirrored: bool) -> (f64, f64) {
    match (min, max) {
        (Some(min), Some(max)) => (min, max),
        (None, None) => (if mirrored { -1.0 } else { 0.0 }, 1.0),
        (None, Some(max)) => {
            let min = if mirrored {
                -max
            } else if max > 0.0 {
                0.0
            } else {
                max - 1.0
            };
            (min, max)
        }
        (Some(min), None) => (min, if min < 0.0 { 1.0 } else { min + 1.0 }),
    }
}

/// Resolves the displayed range from curve data, overrides, zoom and
/// mirroring, adding half a text line of margin unless zoomed.
#[must_use]
pub fn compute_v_axis_min_max(
    request: VerticalRangeRequest,
    height: f64,
    curves: &[LayoutedCurve],
    mirrored: bool,
) -> VerticalRange {
    let (discovered_min, discovered_max) = discover_value_range(curves);
    let (mut min, mut max) = purge_min_max(discovered_min, discovered_max, mirrored);

    let explicit_min = request.explicit.0.filter(|value| value.is_finite());
    let explicit_max = request.explicit.1.filter(|value| value.is_finite());
    if let Some(explicit_min) = explicit_min {
        min = explicit_min;
    }
    if let Some(explicit_max) = explicit_max {
        max = explicit_max;
    }
    // A single override may cross the discovered data; keep the other bound above or below it.
    if min > max {
        match (explicit_min, explicit_max) {
            (Some(_), None) => max = min + 1.0,
            (None, Some(_)) => min = max - 1.0,
            _ => std::mem::swap(&mut min, &mut max),
        }
    }
    let real_range = (min, max);

    let zoom = request
        .zoom
        .filter(|(low, high)| low.is_finite() && high.is_finite());
    if let Some((low, high)) = zoom {
        min = low.min(high);
        max = low.max(high);
    }

    if mirrored {
        let abs_limit = min.abs().max(max);
        min = -abs_limit;
        max = abs_limit;
    }

    if min == max {
        if mirrored {
            min -= 1.0;
            max += 1.0;
        } else {
            max = min + 1.0;
        }
    }

    let span = max - min;
    if zoom.is_none() {
        let span_per_line = span / height.max(1.0);
        if min != 0.0 {
            min -= 0.5 * span_per_line;
        }
        if max != 0.0 {
            max += 0.5 * span_per_line;
        }
    }

    VerticalRange {
        real_range,
        span,
        min,
        max,
    }
}

/// Number of labels that comfortably fit into `height` text lines.
#[must_use]
pub fn vertical_label_count(height: f64) -> f64 {
    ((height - 2.0) / height.ln() * 1.6).max(2.0)
}

struct StepTable {
    base: f64,
    divide_by: f64,
    steps: &'static [(f64, f64)],
}

fn step_table(stepping: Stepping, max_value: f64) -> StepTable {
    const TENS: &[(f64, f64)] = &[(2.0, 0.5), (5.0, 1.0), (10.0, 2.0)];

    match stepping {
        Stepping::Binary => StepTable {
            base: 16.0,
            divide_by: 1.0,
            steps: &[(2.0, 0.5), (4.0, 1.0), (8.0, 2.0), (16.0, 4.0)],
        },
        Stepping::Time if max_value > 86_400.0 => StepTable {
            base: 10.0,
            divide_by: 86_400.0,
            steps: TENS,
        },
        Stepping::Time if max_value >= 10.0 => StepTable {
            base: 60.0,
            divide_by: 1.0,
            steps: &[
                (2.0, 0.5),
                (3.0, 0.5),
                (5.0, 1.0),
                (10.0, 2.0),
                (20.0, 5.0),
                (30.0, 5.0),
                (60.0, 10.0),
            ],
        },
        Stepping::Time | Stepping::Integer => StepTable {
            base: 10.0,
            divide_by: 1.0,
            steps: TENS,
        },
        Stepping::Decimal => StepTable {
            base: 10.0,
            divide_by: 1.0,
            steps: &[(2.0, 0.5), (2.5, 0.5), (5.0, 1.0), (10.0, 2.0)],
        },
    }
}

/// Picks a "nice" label distance of at least `desired_distance`.
#[must_use]
pub fn select_label_step(desired_distance: f64, max_value: f64, stepping: Stepping) -> LabelStep {
    let desired_distance = if stepping == Stepping::Integer {
        desired_distance.max(1.0)
    } else {
        desired_distance
    };

    let table = step_table(stepping, max_value);
    let (mantissa, exponent) = frexpb(desired_distance / table.divide_by, table.base);
    let (major, minor) = table
        .steps
        .iter()
        .copied()
        .find(|(major, _)| mantissa <= *major)
        .unwrap_or(table.steps[table.steps.len() - 1]);

    let scale = table.base.powi(exponent) * table.divide_by;
    trace!(?stepping, mantissa, exponent, major, minor, "selected vertical label step");
    LabelStep {
        label_distance: major * scale,
        sub_distance: minor * scale,
    }
}

/// Ticks plus the text derived from the unit.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedAxisLabels {
    pub labels: Vec<AxisLabel>,
    pub max_label_length: usize,
    pub graph_unit: Option<String>,
    pub truncated: bool,
}

#[derive(Debug, Clone, Copy)]
struct LabelSpec {
    position: f64,
    value: Option<f64>,
    line_width: u8,
}

/// Emits gridlines every `sub_distance` and labels every `label_distance`
/// between `min` and `max`.
#[must_use]
pub fn create_vertical_axis_labels(
    min: f64,
    max: f64,
    unit: &UnitInfo,
    step: LabelStep,
    mirrored: bool,
) -> RenderedAxisLabels {
    let round_to = label_round_places(min, max);
    let min_increment = 10f64.powi(-(round_to as i32));
    let LabelStep {
        label_distance,
        sub_distance,
    } = step;

    let ratio = min / sub_distance;
    let mut full = ratio.trunc();
    if min < 0.0 && ratio.fract() != 0.0 {
        full -= 1.0;
    }
    let mut position = full * sub_distance;

    let mut specs: Vec<LabelSpec> = Vec::new();
    let mut truncated = false;
    while position <= max {
        position = round_to_places(position, round_to);

        let advances = specs.last().is_none_or(|last| position > last.position);
        if position >= min && advances {
            let fraction = (position / label_distance).fract().abs();
            let is_major =
                fraction <= MAJOR_TICK_TOLERANCE || fraction >= 1.0 - MAJOR_TICK_TOLERANCE;
            specs.push(if is_major {
                LabelSpec {
                    position,
                    value: Some(if mirrored { position.abs() } else { position }),
                    line_width: MAJOR_TICK_WIDTH,
                }
            } else {
                LabelSpec {
                    position,
                    value: None,
                    line_width: MINOR_TICK_WIDTH,
                }
            });

            if specs.len() >= MAX_AXIS_LABELS {
                warn!(
                    min,
                    max, label_distance, sub_distance, "vertical axis label limit reached"
                );
                truncated = true;
                break;
            }
        }

        let next = position + sub_distance.max(min_increment);
        if next <= position {
            break;
        }
        position = next;
    }

    let (labels, max_label_length, graph_unit) = match unit.graph_unit {
        Some(graph_unit) => render_labels_with_graph_unit(&specs, graph_unit),
        None => render_labels_with_individual_units(&specs, unit),
    };

    RenderedAxisLabels {
        labels,
        max_label_length,
        graph_unit,
        truncated,
    }
}

fn label_round_places(min: f64, max: f64) -> u32 {
    let magnitude = min.abs().max(max.abs());
    if !magnitude.is_finite() || magnitude <= 0.0 {
        return 3;
    }
    let places = 3 - magnitude.log10().trunc() as i32;
    u32::try_from(places).unwrap_or(0)
}

fn render_labels_with_individual_units(
    specs: &[LabelSpec],
    unit: &UnitInfo,
) -> (Vec<AxisLabel>, usize, Option<String>) {
    let (labels, max_label_length) = collect_labels(specs, |value| {
        if value == 0.0 {
            "0".to_owned()
        } else {
            remove_useless_zeroes(&unit.render(value))
        }
    });
    (labels, max_label_length, None)
}

fn render_labels_with_graph_unit(
    specs: &[LabelSpec],
    graph_unit: fn(&[f64]) -> (String, Vec<String>),
) -> (Vec<AxisLabel>, usize, Option<String>) {
    let values: Vec<f64> = specs
        .iter()
        .filter_map(|spec| spec.value)
        .filter(|value| *value != 0.0)
        .collect();
    let (axis_unit, scaled) = graph_unit(&values);

    let mut scaled = scaled.into_iter();
    let (labels, max_label_length) = collect_labels(specs, |value| {
        if value == 0.0 {
            return "0".to_owned();
        }
        match scaled.next() {
            Some(text) => remove_useless_zeroes(&text),
            None => value.to_string(),
        }
    });
    (labels, max_label_length, Some(axis_unit))
}

fn collect_labels(
    specs: &[LabelSpec],
    mut render: impl FnMut(f64) -> String,
) -> (Vec<AxisLabel>, usize) {
    let mut max_label_length = 0;
    let labels = specs
        .iter()
        .map(|spec| {
            let text = spec.value.map(&mut render);
            if let Some(text) = &text {
                max_label_length = max_label_length.max(text.chars().count());
            }
            AxisLabel {
                position: spec.position,
                text,
                line_width: spec.line_width,
            }
        })
        .collect();
    (labels, max_label_length)
}

/// Collapses `.0`/`.00` fractions in front of a unit suffix or at the end,
/// e.g. `"5.00 MiB"` -> `"5 MiB"`, `"20.0"` -> `"20"`.
#[must_use]
pub fn remove_useless_zeroes(label: &str) -> String {
    if !label.contains('.') {
        return label.to_owned();
    }
    let label = label.replace(".00 ", " ").replace(".0 ", " ");
    for zeroes in [".00", ".0"] {
        if let Some(stripped) = label.strip_suffix(zeroes) {
            return stripped.to_owned();
        }
    }
    label
}

/// Computes the vertical axis: range, step and rendered labels.
///
/// `height` is the graph height in text lines. When `mirrored`, values below
/// zero are labelled with their magnitude.
#[must_use]
pub fn compute_graph_v_axis(
    request: VerticalRangeRequest,
    height: f64,
    curves: &[LayoutedCurve],
    mirrored: bool,
    unit: &UnitInfo,
) -> VerticalAxis {
    let range = compute_v_axis_min_max(request, height, curves, mirrored);
    let desired_distance = range.span / vertical_label_count(height).max(1.0);
    let step = select_label_step(desired_distance, range.max, unit.stepping);
    let rendered = create_vertical_axis_labels(range.min, range.max, unit, step, mirrored);

    VerticalAxis {
        range: (range.min, range.max),
        real_range: range.real_range,
        label_distance: step.label_distance,
        sub_distance: step.sub_distance,
        axis_label: rendered.graph_unit,
        labels: rendered.labels,
        max_label_length: rendered.max_label_length,
        truncated: rendered.truncated,
    }
}

#[cfg(test)]
mod tests {
    use super::{label_round_places, remove_useless_zeroes, step_table};
    use crate::core::units::Stepping;

    #[test]
    fn round_places_follow_magnitude() {
        assert_eq!(label_round_places(0.0, 97.0), 2);
        assert_eq!(label_round_places(-0.5, 0.2), 3);
        assert_eq!(label_round_places(0.0, 123_456.0), 0);
        assert_eq!(label_round_places(0.0, 0.0), 3);
    }

    #[test]
    fn time_stepping_switches_tables_on_maximum() {
        assert_eq!(step_table(Stepping::Time, 200_000.0).divide_by, 86_400.0);
        assert_eq!(step_table(Stepping::Time, 600.0).base, 60.0);
        assert_eq!(step_table(Stepping::Time, 5.0).base, 10.0);
    }

    #[test]
    fn useless_zeroes_are_removed_before_unit() {
        assert_eq!(remove_useless_zeroes("5.00 MiB"), "5 MiB");
        assert_eq!(remove_useless_zeroes("2.0 s"), "2 s");
        assert_eq!(remove_useless_zeroes("2.50 s"), "2.50 s");
        assert_eq!(remove_useless_zeroes("20"), "20");
        assert_eq!(remove_useless_zeroes("20.0"), "20");
        assert_eq!(remove_useless_zeroes("1.00"), "1");
        assert_eq!(remove_useless_zeroes("0.50"), "0.50");
        assert_eq!(remove_useless_zeroes("100"), "100");
    }
}
