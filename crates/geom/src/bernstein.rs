//! Weighted sums in the Bernstein basis, for any number of control points.
//!
//! The curve editor only ever evaluates cubic segments (see [`CubicSegment`](crate::CubicSegment)),
//! the functions here evaluate the curve defined by an arbitrary number of control points
//! as a single polynomial of degree `n - 1`:
//!
//! ```text
//! P(t) = Σ C(n - 1, i) * (1 - t)^(n - 1 - i) * t^i * points[i]
//! ```

use crate::binomial::row_unchecked;
use crate::scalar::Scalar;
use crate::{GeomError, Point};

/// Sample the curve defined by `points` at `t`.
///
/// `t <= 0` returns the first point and `t >= 1` the last one without evaluating the
/// polynomial, so the endpoints are reproduced exactly.
///
/// Fails with `InvalidState` if `points` is empty.
pub fn sample<S: Scalar>(t: S, points: &[Point<S>]) -> Result<Point<S>, GeomError> {
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => {
            return Err(GeomError::InvalidState("no control points to evaluate"));
        }
    };

    if t <= S::ZERO {
        return Ok(first);
    }
    if t >= S::ONE {
        return Ok(last);
    }

    let x = weighted_sum(t, points.len(), |i| points[i].x);
    let y = weighted_sum(t, points.len(), |i| points[i].y);

    Ok(Point::new(x, y))
}

/// Sample a single coordinate of the curve, given its per-point weights.
///
/// Same boundary policy as [`sample`].
pub fn sample_scalar<S: Scalar>(t: S, weights: &[S]) -> Result<S, GeomError> {
    let (first, last) = match (weights.first(), weights.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => {
            return Err(GeomError::InvalidState("no control points to evaluate"));
        }
    };

    if t <= S::ZERO {
        return Ok(first);
    }
    if t >= S::ONE {
        return Ok(last);
    }

    Ok(weighted_sum(t, weights.len(), |i| weights[i]))
}

fn weighted_sum<S: Scalar>(t: S, count: usize, weight: impl Fn(usize) -> S) -> S {
    let degree = count - 1;
    let coefficients = row_unchecked::<S>(degree);
    let one_t = S::ONE - t;

    let mut sum = S::ZERO;
    for (i, c) in coefficients.iter().enumerate() {
        let basis = *c * one_t.powi((degree - i) as i32) * t.powi(i as i32);
        sum += basis * weight(i);
    }

    sum
}

#[cfg(test)]
use crate::scalar::Float;
#[cfg(test)]
use crate::{point, CubicSegment};

#[test]
fn empty_points() {
    assert_eq!(
        sample::<f64>(0.5, &[]),
        Err(GeomError::InvalidState("no control points to evaluate"))
    );
    assert!(sample_scalar::<f32>(0.5, &[]).is_err());
}

#[test]
fn endpoints_are_exact() {
    let points = [
        point(0.1, 0.3),
        point(7.0, -2.0),
        point(3.3, 9.0),
        point(0.7, 0.9),
    ];

    assert_eq!(sample(0.0, &points).unwrap(), points[0]);
    assert_eq!(sample(-3.0, &points).unwrap(), points[0]);
    assert_eq!(sample(1.0, &points).unwrap(), points[3]);
    assert_eq!(sample(12.0, &points).unwrap(), points[3]);
}

#[test]
fn single_point() {
    let points = [point(2.0, 3.0)];
    assert_eq!(sample(0.25, &points).unwrap(), points[0]);
    assert_eq!(sample_scalar(0.25, &[4.0]).unwrap(), 4.0);
}

#[test]
fn linear() {
    let points = [point(0.0, 0.0), point(4.0, 2.0)];
    let p = sample(0.25, &points).unwrap();
    assert!((p.x - 1.0f64).abs() < 1e-12);
    assert!((p.y - 0.5f64).abs() < 1e-12);
}

#[test]
fn four_points_match_cubic_segment() {
    let segment = CubicSegment {
        from: point(0.0, 0.0),
        ctrl1: point(1.0, 3.0),
        ctrl2: point(2.0, -1.0),
        to: point(4.0, 1.0),
    };
    let points = [segment.from, segment.ctrl1, segment.ctrl2, segment.to];

    for i in 1..20 {
        let t = i as f64 / 20.0;
        let a = sample(t, &points).unwrap();
        let b = segment.sample(t);
        assert!((a - b).length() < 1e-12, "t = {t}: {a:?} != {b:?}");
        assert!((sample_scalar(t, &[0.0, 3.0, -1.0, 1.0]).unwrap() - b.y).abs() < 1e-12);
    }
}

#[test]
fn higher_degree_stays_in_hull() {
    let weights = [0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0];
    for i in 1..10 {
        let v = sample_scalar(i as f32 / 10.0, &weights).unwrap();
        assert!(v > 0.0 && v < 1.0);
    }
}
