extern crate curvedit;
#[macro_use]
extern crate bencher;

use bencher::Bencher;

use curvedit::editor::{Curve, Side};
use curvedit::geom::solve::{find_parameter_for, find_parameter_with};
use curvedit::geom::{bernstein, SolveOptions};
use curvedit::math::*;

const N: usize = 100;

fn segments() -> Vec<CubicSegment> {
    vec![
        CubicSegment::default(),
        CubicSegment {
            from: point(0.0, 0.0),
            ctrl1: point(0.05, 0.9),
            ctrl2: point(0.1, 1.0),
            to: point(1.0, 1.0),
        },
        CubicSegment {
            from: point(-10.0, 3.0),
            ctrl1: point(-2.0, -5.0),
            ctrl2: point(8.0, 12.0),
            to: point(10.0, 0.0),
        },
    ]
}

fn find_parameter(bench: &mut Bencher) {
    let segments = segments();
    bench.iter(|| {
        let mut sum = 0.0;
        for segment in &segments {
            let (min, max) = (segment.from.x, segment.to.x);
            for i in 0..N {
                let x = min + (max - min) * (i as f64 / N as f64);
                sum += find_parameter_for(x, segment);
            }
        }
        sum
    });
}

fn find_parameter_bisection_only(bench: &mut Bencher) {
    let segments = segments();
    let options = SolveOptions {
        bisection_steps: 40,
        max_iterations: 0,
        ..SolveOptions::default()
    };
    bench.iter(|| {
        let mut sum = 0.0;
        for segment in &segments {
            let (min, max) = (segment.from.x, segment.to.x);
            for i in 0..N {
                let x = min + (max - min) * (i as f64 / N as f64);
                sum += find_parameter_with(x, segment, &options).t;
            }
        }
        sum
    });
}

fn horner_sample(bench: &mut Bencher) {
    let segment = segments()[2];
    bench.iter(|| {
        let mut p = point(0.0, 0.0);
        for i in 0..N {
            p += segment.sample(i as f64 / N as f64).to_vector();
        }
        p
    });
}

fn bernstein_sample(bench: &mut Bencher) {
    let s = segments()[2];
    let points = [s.from, s.ctrl1, s.ctrl2, s.to];
    bench.iter(|| {
        let mut p = point(0.0, 0.0);
        for i in 0..N {
            if let Ok(sample) = bernstein::sample(i as f64 / N as f64, &points) {
                p += sample.to_vector();
            }
        }
        p
    });
}

fn curve_value_at(bench: &mut Bencher) {
    let mut curve = Curve::new();
    for i in 1..20 {
        let x = i as f64 / 20.0;
        let id = curve.add_point(point(x, (x * 7.0).sin())).unwrap();
        curve.set_symmetric(id, true).unwrap();
        curve.set_handle(id, Side::Right, vector(0.01, 0.02)).unwrap();
    }

    bench.iter(|| {
        let mut sum = 0.0;
        for i in 0..N {
            sum += curve.value_at(i as f64 / N as f64).unwrap();
        }
        sum
    });
}

benchmark_group!(
    locator,
    find_parameter,
    find_parameter_bisection_only
);
benchmark_group!(evaluation, horner_sample, bernstein_sample, curve_value_at);

benchmark_main!(locator, evaluation);
