//! Benchmark to measure (and then optimize) the per-pixel Newton iteration and
//! classification, swept over a small frame of the rotating-roots animation.
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use newton_basins::{
    core::image_utils::NormalizedGrid,
    fractals::{
        newtons_method::{render_frame_on_points, NewtonsMethodParams},
        newtons_method_core::{iterate, CRITICAL_DISTANCE, MAX_ITERATIONS},
        rotating_roots::{AngleSpecification, RotatingRootsParams},
    },
};

fn benchmark_params() -> NewtonsMethodParams {
    NewtonsMethodParams {
        grid: NormalizedGrid {
            resolution: nalgebra::Vector2::new(96, 96),
            x_limits: [-2.4, 2.4],
            y_limits: [-2.4, 2.4],
        },
        angles: AngleSpecification::Snapshot(0.3),
        configuration: RotatingRootsParams {
            symmetry_order: 7,
            root_angle_multiplier: 12.0,
            amplitude_modulation: 0.5,
            root_colors_rgb: vec![[200, 40, 40]; 14],
            no_match_color_rgb: [0, 0, 0],
        },
        max_iterations: MAX_ITERATIONS,
        critical_distance: CRITICAL_DISTANCE,
        tolerance: Default::default(),
        failure_policy: Default::default(),
    }
}

fn benchmark(c: &mut Criterion) {
    let params = benchmark_params();
    let frame = params.configuration.frame_configuration(0.3, &params.grid);
    let points = params.grid.points();
    let classifier = params.classifier();

    c.bench_function("iterate_single_row", |b| {
        b.iter(|| {
            for z in &points[..96] {
                black_box(iterate(
                    MAX_ITERATIONS,
                    *z,
                    &frame.roots,
                    &frame.poles,
                    CRITICAL_DISTANCE,
                ));
            }
        });
    });

    c.bench_function("render_frame_96x96", |b| {
        b.iter(|| black_box(render_frame_on_points(&params, &classifier, &frame, &points)));
    });
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
