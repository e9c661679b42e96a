pub mod curve;
pub mod interpolation;
pub mod number_format;
pub mod primitives;
pub mod scalars;
pub mod stacking;
pub mod time_axis;
pub mod types;
pub mod units;
pub mod vertical_axis;

pub use curve::{Curve, CurveKind, LayoutedCurve, LineShape, LineType, VisualPoint};
pub use interpolation::interpolate;
pub use scalars::{
    CurveScalars, CurveValue, RenderedScalar, compute_curve_scalars, compute_scalars,
    curve_values_at_timestamp, value_at,
};
pub use stacking::{CurveLayout, areastack, layout_graph_curves};
pub use time_axis::{TimeAxis, TimeAxisLabel, TimeAxisTimeZone, compute_graph_t_axis, step_label};
pub use types::{GraphSize, Seconds, TimeSeries, TimeWindow, Timestamp};
pub use units::{GraphUnitFn, Stepping, UnitCatalog, UnitInfo, UnitRenderFn};
pub use vertical_axis::{
    AxisLabel, VerticalAxis, VerticalRangeRequest, compute_graph_v_axis, compute_v_axis_min_max,
};
