use graph_artwork::core::scalars::MISSING_SCALAR_TEXT;
use graph_artwork::core::{
    Curve, LineType, TimeSeries, TimeWindow, UnitInfo, compute_curve_scalars, compute_scalars,
    curve_values_at_timestamp, value_at,
};

fn series(values: &[Option<f64>]) -> TimeSeries {
    let window = TimeWindow::new(100, 100 + 10 * values.len() as i64, 10).expect("valid window");
    TimeSeries::new(window, values.to_vec()).expect("valid series")
}

#[test]
fn scalars_ignore_gaps() {
    let unit = UnitInfo::number();
    let scalars = compute_curve_scalars(
        &series(&[Some(1.0), None, Some(5.0), Some(3.0)]),
        &unit,
        None,
    );

    assert_eq!(scalars.first.value, Some(1.0));
    assert_eq!(scalars.last.value, Some(3.0));
    assert_eq!(scalars.max.value, Some(5.0));
    assert_eq!(scalars.min.value, Some(1.0));
    assert_eq!(scalars.average.value, Some(3.0));
    assert_eq!(scalars.average.text, "3.00");
    assert_eq!(scalars.pin.value, None);
    assert_eq!(scalars.pin.text, MISSING_SCALAR_TEXT);
}

#[test]
fn pin_reads_the_covering_sample() {
    let unit = UnitInfo::number();
    let data = series(&[Some(1.0), None, Some(5.0), Some(3.0)]);

    assert_eq!(compute_curve_scalars(&data, &unit, Some(125)).pin.value, Some(5.0));
    assert_eq!(compute_curve_scalars(&data, &unit, Some(110)).pin.value, None);
    assert_eq!(compute_curve_scalars(&data, &unit, Some(99)).pin.value, None);
    assert_eq!(compute_curve_scalars(&data, &unit, Some(140)).pin.value, None);
}

#[test]
fn extreme_timestamps_and_windows_do_not_overflow() {
    let data = series(&[Some(1.0), Some(2.0)]);
    assert_eq!(value_at(i64::MAX, &data), None);
    assert_eq!(value_at(i64::MIN, &data), None);

    let wide = TimeWindow::new(-(1 << 62), 1 << 62, 3).expect("valid window");
    assert!(TimeSeries::new(wide, Vec::new()).is_err());

    let widest = TimeWindow::new(i64::MIN, i64::MAX, 1).expect("valid window");
    assert!(TimeSeries::new(widest, Vec::new()).is_err());
}

#[test]
fn all_gap_series_has_no_statistics() {
    let unit = UnitInfo::number();
    let scalars = compute_curve_scalars(&series(&[None, None]), &unit, Some(100));

    for scalar in [
        &scalars.pin,
        &scalars.first,
        &scalars.last,
        &scalars.max,
        &scalars.min,
        &scalars.average,
    ] {
        assert_eq!(scalar.value, None);
        assert_eq!(scalar.text, "n/a");
    }
}

#[test]
fn scalars_are_stored_on_painted_curves_only() {
    let unit = UnitInfo::bytes();
    let mut curves = vec![
        Curve::new(series(&[Some(1024.0)]), LineType::AREA, "#111111", "shown"),
        Curve::new(series(&[Some(2048.0)]), LineType::STACK, "#222222", "hidden")
            .with_dont_paint(true),
    ];

    compute_scalars(&mut curves, &unit, None);

    assert_eq!(curves[0].scalars.last.text, "1.00 KiB");
    assert_eq!(curves[1].scalars.last.value, None);
}

#[test]
fn hover_values_list_topmost_curve_first() {
    let unit = UnitInfo::number();
    let curves = vec![
        Curve::new(series(&[Some(1.0), Some(2.0)]), LineType::AREA, "#111111", "bottom"),
        Curve::new(series(&[Some(3.0), None]), LineType::STACK, "#222222", "middle"),
        Curve::new(series(&[Some(5.0), Some(6.0)]), LineType::STACK, "#333333", "hidden")
            .with_dont_paint(true),
        Curve::new(series(&[Some(7.0), Some(8.0)]), LineType::LINE, "#444444", "top"),
    ];

    let values = curve_values_at_timestamp(&curves, &unit, 115);
    let titles: Vec<&str> = values.iter().map(|value| value.title.as_str()).collect();
    assert_eq!(titles, vec!["top", "middle", "bottom"]);
    assert_eq!(values[0].rendered_value.value, Some(8.0));
    assert_eq!(values[1].rendered_value.text, "n/a");
    assert_eq!(values[2].color, "#111111");
}
