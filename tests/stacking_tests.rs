use graph_artwork::core::{
    Curve, CurveKind, LineType, TimeSeries, TimeWindow, VisualPoint, areastack,
    layout_graph_curves,
};

fn window() -> TimeWindow {
    TimeWindow::new(0, 30, 10).expect("valid window")
}

fn curve(line_type: &str, values: &[Option<f64>]) -> Curve {
    let series = TimeSeries::new(window(), values.to_vec()).expect("valid series");
    let line_type: LineType = line_type.parse().expect("valid line type");
    Curve::new(series, line_type, "#336699", line_type.to_string())
}

fn constant(line_type: &str, value: f64) -> Curve {
    curve(line_type, &[Some(value); 3])
}

fn bands(points: &[VisualPoint]) -> Vec<(Option<f64>, Option<f64>)> {
    points
        .iter()
        .map(|point| match *point {
            VisualPoint::Area(lower, upper) => (lower, upper),
            VisualPoint::Line(value) => panic!("expected area point, got line {value:?}"),
        })
        .collect()
}

#[test]
fn areastack_adds_points_onto_base() {
    let stacked = areastack(&[Some(3.0); 3], &[Some(2.0); 3]);
    assert_eq!(stacked, vec![(Some(2.0), Some(5.0)); 3]);
}

#[test]
fn areastack_orders_negative_deltas() {
    let stacked = areastack(&[Some(-3.0)], &[Some(1.0)]);
    assert_eq!(stacked, vec![(Some(-2.0), Some(1.0))]);
}

#[test]
fn stack_continues_the_previous_area() {
    let layout = layout_graph_curves(&[constant("area", 2.0), constant("stack", 3.0)]);

    assert!(!layout.mirrored);
    assert_eq!(layout.curves.len(), 2);
    assert_eq!(bands(&layout.curves[0].points), vec![(Some(0.0), Some(2.0)); 7]);
    assert_eq!(bands(&layout.curves[1].points), vec![(Some(2.0), Some(5.0)); 7]);
}

#[test]
fn plain_area_starts_at_zero_again() {
    let layout = layout_graph_curves(&[constant("area", 2.0), constant("area", 3.0)]);
    assert_eq!(bands(&layout.curves[1].points), vec![(Some(0.0), Some(3.0)); 7]);
}

#[test]
fn stack_without_predecessor_starts_at_zero() {
    let layout = layout_graph_curves(&[constant("stack", 4.0)]);
    assert_eq!(bands(&layout.curves[0].points), vec![(Some(0.0), Some(4.0)); 7]);
}

#[test]
fn lines_neither_stack_nor_feed_the_stack() {
    let layout = layout_graph_curves(&[
        constant("area", 2.0),
        constant("line", 7.0),
        constant("stack", 1.0),
    ]);

    assert_eq!(layout.curves[1].kind, CurveKind::Line);
    assert!(
        layout.curves[1]
            .points
            .iter()
            .all(|point| *point == VisualPoint::Line(Some(7.0)))
    );
    assert_eq!(bands(&layout.curves[2].points), vec![(Some(2.0), Some(3.0)); 7]);
}

#[test]
fn mirrored_curves_are_negated_and_stack_downwards() {
    let layout = layout_graph_curves(&[
        constant("area", 1.0),
        constant("-area", 2.0),
        constant("-stack", 3.0),
        constant("stack", 4.0),
    ]);

    assert!(layout.mirrored);
    assert_eq!(bands(&layout.curves[1].points), vec![(Some(-2.0), Some(0.0)); 7]);
    assert_eq!(bands(&layout.curves[2].points), vec![(Some(-5.0), Some(-2.0)); 7]);
    assert_eq!(bands(&layout.curves[3].points), vec![(Some(1.0), Some(5.0)); 7]);
}

#[test]
fn reference_curve_becomes_baseline_and_is_not_drawn() {
    let layout = layout_graph_curves(&[constant("ref", 10.0), constant("stack", 1.0)]);

    assert_eq!(layout.curves.len(), 1);
    assert_eq!(bands(&layout.curves[0].points), vec![(Some(10.0), Some(11.0)); 7]);
}

#[test]
fn hidden_curves_are_skipped() {
    let layout = layout_graph_curves(&[
        constant("area", 2.0).with_dont_paint(true),
        constant("stack", 3.0),
    ]);

    assert_eq!(layout.curves.len(), 1);
    assert_eq!(bands(&layout.curves[0].points), vec![(Some(0.0), Some(3.0)); 7]);
}

#[test]
fn gaps_in_both_layers_stay_gaps() {
    let layout = layout_graph_curves(&[
        curve("area", &[Some(2.0), Some(2.0), None]),
        curve("stack", &[Some(1.0), Some(1.0), None]),
    ]);

    let upper = bands(&layout.curves[1].points);
    assert_eq!(upper[..6], vec![(Some(2.0), Some(3.0)); 6][..]);
    assert_eq!(upper[6], (None, None));
}
