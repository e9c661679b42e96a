use criterion::{Criterion, criterion_group, criterion_main};
use graph_artwork::core::{
    Curve, LineType, TimeAxisTimeZone, TimeSeries, TimeWindow, UnitInfo, VerticalRangeRequest,
    compute_graph_t_axis, compute_graph_v_axis, layout_graph_curves,
};
use graph_artwork::{
    ArtworkCollaborators, ArtworkResult, GraphDataRange, GraphRecipe, GraphRenderOptions,
    compute_graph_artwork,
};
use std::hint::black_box;

const START: i64 = 1_700_000_000;
const SAMPLES: i64 = 10_000;

fn generated_curves() -> Vec<Curve> {
    let window = TimeWindow::new(START, START + SAMPLES * 60, 60).expect("valid window");
    ["area", "stack", "stack", "-area", "-stack", "line"]
        .iter()
        .enumerate()
        .map(|(index, line_type)| {
            let values: Vec<Option<f64>> = (0..SAMPLES)
                .map(|i| {
                    if i % 97 == 0 {
                        None
                    } else {
                        Some(100.0 + (i as f64 * 0.01 + index as f64).sin() * 50.0)
                    }
                })
                .collect();
            let series = TimeSeries::new(window, values).expect("valid series");
            let line_type: LineType = line_type.parse().expect("valid line type");
            Curve::new(series, line_type, "#336699", format!("curve {index}"))
        })
        .collect()
}

fn bench_layout_10k(c: &mut Criterion) {
    let curves = generated_curves();

    c.bench_function("layout_graph_curves_6x10k", |b| {
        b.iter(|| {
            let _ = layout_graph_curves(black_box(&curves));
        })
    });
}

fn bench_axes(c: &mut Criterion) {
    let layout = layout_graph_curves(&generated_curves());
    let unit = UnitInfo::bytes();

    c.bench_function("compute_graph_v_axis", |b| {
        b.iter(|| {
            let _ = compute_graph_v_axis(
                VerticalRangeRequest::default(),
                black_box(16.0),
                black_box(&layout.curves),
                layout.mirrored,
                &unit,
            );
        })
    });

    c.bench_function("compute_graph_t_axis_week", |b| {
        b.iter(|| {
            let _ = compute_graph_t_axis(
                black_box(START),
                black_box(START + 7 * 86_400),
                black_box(120),
                60,
                TimeAxisTimeZone::Utc,
            );
        })
    });
}

fn bench_full_artwork(c: &mut Criterion) {
    let curves = generated_curves();
    let resolve = move |_: &GraphRecipe, _: &GraphDataRange| -> ArtworkResult<Vec<Curve>> {
        Ok(curves.clone())
    };
    let unit = UnitInfo::bytes_per_second();
    let recipe = GraphRecipe::new("Traffic", "bytes/s");
    let data_range =
        GraphDataRange::new(START, START + SAMPLES * 60, 60).expect("valid data range");
    let options = GraphRenderOptions::default();

    c.bench_function("compute_graph_artwork_6x10k", |b| {
        b.iter(|| {
            compute_graph_artwork(
                black_box(&recipe),
                black_box(&data_range),
                &options,
                ArtworkCollaborators::new(&resolve, &unit),
            )
            .expect("artwork should succeed")
        })
    });
}

criterion_group!(benches, bench_layout_10k, bench_axes, bench_full_artwork);
criterion_main!(benches);
