use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    Curve, CurveValue, LayoutedCurve, Seconds, TimeAxis, Timestamp, VerticalAxis,
    compute_graph_t_axis, compute_graph_v_axis, compute_scalars, curve_values_at_timestamp,
    layout_graph_curves,
};
use crate::error::ArtworkResult;

use super::{
    ArtworkCollaborators, GraphDataRange, GraphRecipe, GraphRenderOptions, HorizontalRule,
    MetricResolver,
};

/// Fully laid out graph, independent of the output device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphArtwork {
    pub title: Option<String>,
    /// Width in widths of a lower case `x`.
    pub width: u32,
    /// Height in text lines.
    pub height: u32,
    pub mirrored: bool,

    pub curves: Vec<LayoutedCurve>,
    pub horizontal_rules: Vec<HorizontalRule>,
    pub vertical_axis: VerticalAxis,
    pub time_axis: TimeAxis,

    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub step: Seconds,
    pub explicit_vertical_range: (Option<f64>, Option<f64>),
    pub requested_vrange: Option<(f64, f64)>,
    pub requested_start_time: Timestamp,
    pub requested_end_time: Timestamp,
    pub requested_step: Seconds,
    pub pin_time: Option<Timestamp>,

    /// Recipe the artwork was computed from.
    pub definition: GraphRecipe,
}

/// Resolves the recipe's curves, dropping all-zero ones when the recipe
/// asks for it.
pub fn compute_graph_artwork_curves(
    recipe: &GraphRecipe,
    data_range: &GraphDataRange,
    metric_resolver: &dyn MetricResolver,
) -> ArtworkResult<Vec<Curve>> {
    let mut curves = metric_resolver.resolve_curves(recipe, data_range)?;
    if recipe.omit_zero_metrics {
        let before = curves.len();
        curves.retain(|curve| {
            curve
                .series
                .present_values()
                .any(|value| value != 0.0)
        });
        debug!(omitted = before - curves.len(), "omitted zero metrics");
    }
    Ok(curves)
}

/// Computes the artwork of a graph: curves with statistics, stacking and
/// mirroring, plus both axes.
///
/// Start, end and step come from the first curve's window; a graph without
/// curves uses the requested range and step.
pub fn compute_graph_artwork(
    recipe: &GraphRecipe,
    data_range: &GraphDataRange,
    render_options: &GraphRenderOptions,
    collaborators: ArtworkCollaborators<'_>,
) -> ArtworkResult<GraphArtwork> {
    let size = render_options.resolved_size()?;
    let mut curves =
        compute_graph_artwork_curves(recipe, data_range, collaborators.metric_resolver)?;

    let pin_time = collaborators.pin_store.pin_time();
    compute_scalars(&mut curves, collaborators.unit, pin_time);

    let layout = layout_graph_curves(&curves);

    let (start_time, end_time, step) = match curves.first() {
        Some(curve) => {
            let window = curve.series.window();
            (window.start(), window.end(), window.step())
        }
        None => (data_range.time_range.0, data_range.time_range.1, data_range.step),
    };

    let vertical_axis = compute_graph_v_axis(
        data_range.vertical_range_request(recipe),
        f64::from(size.height),
        &layout.curves,
        layout.mirrored,
        collaborators.unit,
    );
    let time_axis = compute_graph_t_axis(
        start_time,
        end_time,
        size.width,
        step,
        render_options.time_zone,
    );

    debug!(
        curves = layout.curves.len(),
        mirrored = layout.mirrored,
        start_time,
        end_time,
        step,
        v_labels = vertical_axis.labels.len(),
        t_labels = time_axis.labels.len(),
        "computed graph artwork"
    );

    Ok(GraphArtwork {
        title: recipe.title.clone(),
        width: size.width,
        height: size.height,
        mirrored: layout.mirrored,
        curves: layout.curves,
        horizontal_rules: recipe.horizontal_rules.clone(),
        vertical_axis,
        time_axis,
        start_time,
        end_time,
        step,
        explicit_vertical_range: recipe.explicit_vertical_range,
        requested_vrange: data_range.vertical_range,
        requested_start_time: data_range.time_range.0,
        requested_end_time: data_range.time_range.1,
        requested_step: data_range.step,
        pin_time,
        definition: recipe.clone(),
    })
}

/// Rendered value of every painted curve at `hover_time`, top-most curve
/// first.
pub fn compute_graph_hover_values(
    recipe: &GraphRecipe,
    data_range: &GraphDataRange,
    collaborators: ArtworkCollaborators<'_>,
    hover_time: Timestamp,
) -> ArtworkResult<Vec<CurveValue>> {
    let curves = compute_graph_artwork_curves(recipe, data_range, collaborators.metric_resolver)?;
    Ok(curve_values_at_timestamp(
        &curves,
        collaborators.unit,
        hover_time,
    ))
}
