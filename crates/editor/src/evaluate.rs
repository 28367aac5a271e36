//! Queries over a sorted slice of control points.
//!
//! These are shared by [`Curve`](crate::Curve) and [`CurveSnapshot`](crate::CurveSnapshot),
//! and can be used directly on any slice of points that is sorted along x.

use crate::geom::{solve::find_parameter_with, SolveOptions};
use crate::math::{point, Box2D, CubicSegment};
use crate::{ControlPoint, EditError};

use log::{debug, log_enabled, trace, warn, Level};

/// The cubic segment going from `from` to `to`.
///
/// Its control points are the end of `from`'s right handle and the end of `to`'s left
/// handle.
#[inline]
pub fn segment_between(from: &ControlPoint, to: &ControlPoint) -> CubicSegment {
    CubicSegment::from_handles(from.position(), from.right_handle(), to.left_handle(), to.position())
}

/// Evaluate the curve defined by `points` at `x`.
///
/// - Before the first point, returns the first point's y.
/// - After the last point, returns the last point's y.
/// - At a point's x, returns that point's y. If several points share this x, the first
///   one wins.
/// - Otherwise, solves for the parameter of the segment that spans `x` and samples y.
///
/// Fails with `InvalidState` if `points` is empty and with `InvalidArgument` if `x` is NaN.
/// Unsorted points still produce a deterministic value, taken from the first pair of
/// consecutive points that spans `x`.
pub fn value_at<P: AsRef<ControlPoint>>(
    points: &[P],
    x: f64,
    options: &SolveOptions<f64>,
) -> Result<f64, EditError> {
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (first.as_ref(), last.as_ref()),
        _ => {
            return Err(EditError::InvalidState("cannot evaluate a curve without points"));
        }
    };

    if x.is_nan() {
        return Err(EditError::InvalidArgument("cannot evaluate the curve at NaN"));
    }

    if x <= first.x() {
        return Ok(first.y());
    }
    if x >= last.x() {
        return Ok(last.y());
    }

    for pair in points.windows(2) {
        let from = pair[0].as_ref();
        let to = pair[1].as_ref();

        if x < from.x() || x > to.x() {
            continue;
        }

        if x == from.x() {
            return Ok(from.y());
        }
        if x == to.x() {
            return Ok(to.y());
        }

        let segment = segment_between(from, to);
        let solution = find_parameter_with(x, &segment, options);
        let y = segment.y(solution.t);

        trace!("value_at({}) between {:?} and {:?}: {:?}", x, from.id(), to.id(), solution);

        if solution.status.is_degenerate() {
            warn!(
                "Degenerate segment between {:?} and {:?} at x = {}: {:?}",
                from.id(),
                to.id(),
                x,
                solution.status
            );
        }

        if log_enabled!(Level::Debug) && !segment.is_x_monotonic() {
            debug!(
                "Segment between {:?} and {:?} folds back along x, value at {} is ambiguous",
                from.id(),
                to.id(),
                x
            );
        }

        return Ok(y);
    }

    Err(EditError::InvalidState("no segment spans x"))
}

/// The smallest rectangle containing the positions of all points (handles excluded).
pub fn bounding_range<P: AsRef<ControlPoint>>(points: &[P]) -> Option<Box2D> {
    let mut iter = points.iter().map(|p| p.as_ref().position());
    let first = iter.next()?;

    let mut min = first;
    let mut max = first;
    for p in iter {
        min = point(min.x.min(p.x), min.y.min(p.y));
        max = point(max.x.max(p.x), max.y.max(p.y));
    }

    Some(Box2D::new(min, max))
}

/// Iterator over the cubic segments between consecutive points.
pub struct Segments<'l, P> {
    points: &'l [P],
    index: usize,
}

impl<'l, P: AsRef<ControlPoint>> Segments<'l, P> {
    pub fn new(points: &'l [P]) -> Self {
        Segments { points, index: 0 }
    }
}

impl<'l, P: AsRef<ControlPoint>> Iterator for Segments<'l, P> {
    type Item = CubicSegment;

    fn next(&mut self) -> Option<CubicSegment> {
        let from = self.points.get(self.index)?;
        let to = self.points.get(self.index + 1)?;
        self.index += 1;

        Some(segment_between(from.as_ref(), to.as_ref()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.points.len().saturating_sub(self.index + 1);
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
use crate::{math::vector, PointId, Side};

#[cfg(test)]
fn points(positions: &[(f64, f64)]) -> Vec<ControlPoint> {
    positions
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| ControlPoint::new(PointId::from_usize(i), point(x, y)))
        .collect()
}

#[test]
fn empty() {
    let empty: Vec<ControlPoint> = Vec::new();
    assert_eq!(
        value_at(&empty, 0.0, &SolveOptions::default()),
        Err(EditError::InvalidState("cannot evaluate a curve without points"))
    );
    assert_eq!(bounding_range(&empty), None);
    assert_eq!(Segments::new(&empty).count(), 0);
}

#[test]
fn default_curve_midpoint() {
    let pts = points(&[(0.0, 0.0), (1.0, 1.0)]);
    let expected = CubicSegment {
        from: point(0.0, 0.0),
        ctrl1: point(0.5, 0.0),
        ctrl2: point(0.5, 1.0),
        to: point(1.0, 1.0),
    };
    assert_eq!(segment_between(&pts[0], &pts[1]), expected);
    assert_eq!(value_at(&pts, 0.5, &SolveOptions::default()).unwrap(), 0.5);
}

#[test]
fn boundaries() {
    let pts = points(&[(-1.0, 3.0), (0.2, 0.1), (2.0, -4.0)]);
    let options = SolveOptions::default();

    assert_eq!(value_at(&pts, -1.0, &options).unwrap(), 3.0);
    assert_eq!(value_at(&pts, -100.0, &options).unwrap(), 3.0);
    assert_eq!(value_at(&pts, 2.0, &options).unwrap(), -4.0);
    assert_eq!(value_at(&pts, f64::INFINITY, &options).unwrap(), -4.0);
    assert_eq!(value_at(&pts, 0.2, &options).unwrap(), 0.1);
    assert!(value_at(&pts, f64::NAN, &options).is_err());
}

#[test]
fn follows_the_segments() {
    let mut pts = points(&[(0.0, 0.0), (1.0, 2.0), (3.0, 1.0)]);
    pts[1].set_handle(Side::Left, vector(-0.25, -0.5)).unwrap();
    pts[1].set_handle(Side::Right, vector(0.5, 0.25)).unwrap();
    let options = SolveOptions::default();

    let segments: Vec<CubicSegment> = Segments::new(&pts).collect();
    assert_eq!(segments.len(), 2);

    for segment in &segments {
        for i in 1..50 {
            let t = i as f64 / 50.0;
            let p = segment.sample(t);
            let y = value_at(&pts, p.x, &options).unwrap();
            assert!((y - p.y).abs() < 1e-7, "x = {}: {} != {}", p.x, y, p.y);
        }
    }
}

#[test]
fn equal_x_neighbors() {
    let pts = points(&[(0.0, 0.0), (0.5, 0.2), (0.5, 0.8), (1.0, 1.0)]);
    let options = SolveOptions::default();

    // The first point at this x wins.
    assert_eq!(value_at(&pts, 0.5, &options).unwrap(), 0.2);

    let before = value_at(&pts, 0.499, &options).unwrap();
    let after = value_at(&pts, 0.501, &options).unwrap();
    assert!((before - 0.2).abs() < 0.01);
    assert!((after - 0.8).abs() < 0.01);
}

#[test]
fn unsorted_points() {
    let pts = points(&[(0.0, 0.0), (2.0, 1.0), (1.0, 0.5), (3.0, 1.0)]);
    let options = SolveOptions::default();

    // Some pair always spans x, the answer is deterministic even if meaningless.
    let a = value_at(&pts, 1.5, &options).unwrap();
    let b = value_at(&pts, 1.5, &options).unwrap();
    assert_eq!(a, b);
}

#[test]
fn bounds() {
    let pts = points(&[(0.0, 0.5), (0.3, -2.0), (4.0, 1.0)]);
    let b = bounding_range(&pts).unwrap();
    assert_eq!(b.min, point(0.0, -2.0));
    assert_eq!(b.max, point(4.0, 1.0));
}
