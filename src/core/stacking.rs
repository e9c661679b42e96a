use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::curve::{Curve, LayoutedCurve, LineShape};
use crate::core::interpolation::interpolate;

/// Result of laying out a graph's curves.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CurveLayout {
    pub curves: Vec<LayoutedCurve>,
    /// At least one curve is drawn on the negative side of the axis.
    pub mirrored: bool,
}

/// Running stacks threaded through [`layout_graph_curves`].
///
/// `positive_stack` is the upper edge of the last band drawn above the
/// axis (or a reference baseline); `mirrored_stack` is the lower edge of the
/// last band drawn below it.
#[derive(Debug, Clone, Default)]
struct StackContext {
    positive_stack: Option<Vec<Option<f64>>>,
    mirrored_stack: Option<Vec<Option<f64>>>,
}

impl StackContext {
    fn side(&self, mirrored: bool) -> Option<&[Option<f64>]> {
        if mirrored {
            self.mirrored_stack.as_deref()
        } else {
            self.positive_stack.as_deref()
        }
    }

    fn set_side(&mut self, mirrored: bool, stack: Vec<Option<f64>>) {
        if mirrored {
            self.mirrored_stack = Some(stack);
        } else {
            self.positive_stack = Some(stack);
        }
    }
}

/// Interpolates every paintable curve and applies stacking and mirroring.
///
/// Values stay in the curve's unit; only the vertical axis maps them onto
/// the drawing area later.
#[must_use]
pub fn layout_graph_curves(curves: &[Curve]) -> CurveLayout {
    let mut context = StackContext::default();
    let mut layout = CurveLayout::default();

    for curve in curves.iter().filter(|curve| !curve.dont_paint) {
        let mut points = interpolate(curve.series.values());
        let line_type = curve.line_type;

        if line_type.shape == LineShape::Reference {
            trace!(title = %curve.title, "reference curve becomes stack baseline");
            context.positive_stack = Some(points);
            continue;
        }

        if line_type.mirrored {
            for value in points.iter_mut().flatten() {
                *value = -*value;
            }
            layout.mirrored = true;
        }

        let layouted = match line_type.shape {
            LineShape::Area { stacked } => {
                let base: &[Option<f64>] = if stacked {
                    context.side(line_type.mirrored).unwrap_or_default()
                } else {
                    &[]
                };
                let bands = areastack(&points, base);
                let outer_edge = bands
                    .iter()
                    .map(|&(lower, upper)| if line_type.mirrored { lower } else { upper })
                    .collect();
                context.set_side(line_type.mirrored, outer_edge);
                LayoutedCurve::area(curve, bands)
            }
            LineShape::Line | LineShape::Reference => LayoutedCurve::line(curve, points),
        };
        layout.curves.push(layouted);
    }

    layout
}

/// Stacks `points` onto `base`, returning `(lower, upper)` bands.
///
/// The shorter input is padded with gaps. A gap counts as zero unless both
/// inputs are gaps at that index, in which case the band is `(None, None)`.
/// Bands are ordered so that `lower <= upper` even for negative deltas.
#[must_use]
pub fn areastack(points: &[Option<f64>], base: &[Option<f64>]) -> Vec<(Option<f64>, Option<f64>)> {
    let len = points.len().max(base.len());
    (0..len)
        .map(|index| {
            let below = base.get(index).copied().flatten();
            let delta = points.get(index).copied().flatten();
            let edge = match (below, delta) {
                (None, None) => None,
                (below, delta) => Some(below.unwrap_or(0.0) + delta.unwrap_or(0.0)),
            };
            order_band(below, edge)
        })
        .collect()
}

fn order_band(lower: Option<f64>, upper: Option<f64>) -> (Option<f64>, Option<f64>) {
    if lower.is_none() && upper.is_none() {
        return (None, None);
    }
    let lower = lower.unwrap_or(0.0);
    let upper = upper.unwrap_or(0.0);
    if lower <= upper {
        (Some(lower), Some(upper))
    } else {
        (Some(upper), Some(lower))
    }
}

#[cfg(test)]
mod tests {
    use super::{areastack, order_band};

    #[test]
    fn band_with_single_gap_counts_gap_as_zero() {
        assert_eq!(order_band(None, Some(-2.0)), (Some(-2.0), Some(0.0)));
        assert_eq!(order_band(None, None), (None, None));
    }

    #[test]
    fn areastack_pads_shorter_base_with_gaps() {
        let bands = areastack(&[Some(1.0), Some(2.0), None], &[Some(5.0)]);
        assert_eq!(
            bands,
            vec![(Some(5.0), Some(6.0)), (Some(0.0), Some(2.0)), (None, None)]
        );
    }
}
