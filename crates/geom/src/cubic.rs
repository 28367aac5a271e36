use crate::scalar::Scalar;
use crate::solve::{find_parameter_with, Solution, SolveOptions};
use crate::{point, Point, Transform, Vector};

use arrayvec::ArrayVec;

/// A 2d curve segment defined by four points: the beginning of the segment, two control
/// points and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)³ * from + 3 * (1 - t)² * t * ctrl1 + 3 * t² * (1 - t) * ctrl2 + t³ * to```
///
/// Sampling outside of `]0..1[` does not extrapolate: `t <= 0` yields `from` and `t >= 1`
/// yields `to`, exactly.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CubicSegment<S> {
    pub from: Point<S>,
    pub ctrl1: Point<S>,
    pub ctrl2: Point<S>,
    pub to: Point<S>,
}

/// The monomial form `((a * t + b) * t + c) * t + d` of a cubic segment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CubicPolynomial<S> {
    pub a: Vector<S>,
    pub b: Vector<S>,
    pub c: Vector<S>,
    pub d: Vector<S>,
}

impl<S: Scalar> CubicPolynomial<S> {
    #[inline]
    pub fn sample(&self, t: S) -> Point<S> {
        (((self.a * t + self.b) * t + self.c) * t + self.d).to_point()
    }

    #[inline]
    pub fn x(&self, t: S) -> S {
        ((self.a.x * t + self.b.x) * t + self.c.x) * t + self.d.x
    }

    #[inline]
    pub fn y(&self, t: S) -> S {
        ((self.a.y * t + self.b.y) * t + self.c.y) * t + self.d.y
    }

    #[inline]
    pub fn dx(&self, t: S) -> S {
        (S::THREE * self.a.x * t + S::TWO * self.b.x) * t + self.c.x
    }

    #[inline]
    pub fn dy(&self, t: S) -> S {
        (S::THREE * self.a.y * t + S::TWO * self.b.y) * t + self.c.y
    }
}

impl<S: Scalar> CubicSegment<S> {
    /// Build the segment between two anchors from their handles, expressed relative to
    /// their anchor.
    ///
    /// `out_handle` leaves `from` and `in_handle` arrives at `to`.
    pub fn from_handles(from: Point<S>, out_handle: Vector<S>, in_handle: Vector<S>, to: Point<S>) -> Self {
        CubicSegment {
            from,
            ctrl1: from + out_handle,
            ctrl2: to + in_handle,
            to,
        }
    }

    /// Expand the segment into its monomial coefficients.
    ///
    /// ```text
    /// a = -from + 3 * ctrl1 - 3 * ctrl2 + to
    /// b = 3 * from - 6 * ctrl1 + 3 * ctrl2
    /// c = -3 * from + 3 * ctrl1
    /// d = from
    /// ```
    pub fn polynomial(&self) -> CubicPolynomial<S> {
        let p0 = self.from.to_vector();
        let p1 = self.ctrl1.to_vector();
        let p2 = self.ctrl2.to_vector();
        let p3 = self.to.to_vector();

        CubicPolynomial {
            a: p3 - p0 + (p1 - p2) * S::THREE,
            b: (p0 + p2) * S::THREE - p1 * S::SIX,
            c: (p1 - p0) * S::THREE,
            d: p0,
        }
    }

    /// Sample the curve at t.
    pub fn sample(&self, t: S) -> Point<S> {
        if t <= S::ZERO {
            return self.from;
        }
        if t >= S::ONE {
            return self.to;
        }

        self.polynomial().sample(t)
    }

    /// Sample the x coordinate of the curve at t.
    pub fn x(&self, t: S) -> S {
        if t <= S::ZERO {
            return self.from.x;
        }
        if t >= S::ONE {
            return self.to.x;
        }

        let (a, b, c, d) = monomial(self.from.x, self.ctrl1.x, self.ctrl2.x, self.to.x);
        ((a * t + b) * t + c) * t + d
    }

    /// Sample the y coordinate of the curve at t.
    pub fn y(&self, t: S) -> S {
        if t <= S::ZERO {
            return self.from.y;
        }
        if t >= S::ONE {
            return self.to.y;
        }

        let (a, b, c, d) = monomial(self.from.y, self.ctrl1.y, self.ctrl2.y, self.to.y);
        ((a * t + b) * t + c) * t + d
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: S) -> Vector<S> {
        Vector::new(self.dx(t), self.dy(t))
    }

    /// Sample the x coordinate of the curve's derivative at t (expecting t between 0 and 1).
    pub fn dx(&self, t: S) -> S {
        let (a, b, c, _) = monomial(self.from.x, self.ctrl1.x, self.ctrl2.x, self.to.x);
        (S::THREE * a * t + S::TWO * b) * t + c
    }

    /// Sample the y coordinate of the curve's derivative at t (expecting t between 0 and 1).
    pub fn dy(&self, t: S) -> S {
        let (a, b, c, _) = monomial(self.from.y, self.ctrl1.y, self.ctrl2.y, self.to.y);
        (S::THREE * a * t + S::TWO * b) * t + c
    }

    /// Find the parameter at which the curve's x coordinate is `x`, using the default
    /// [`SolveOptions`].
    ///
    /// The segment is expected to be monotonic along the x axis, see [`crate::solve`].
    pub fn solve_t_for_x(&self, x: S) -> Solution<S> {
        find_parameter_with(x, self, &SolveOptions::default())
    }

    /// Returns a conservative range of x that contains this curve.
    pub fn fast_bounding_range_x(&self) -> (S, S) {
        let min_x = self.from.x.min(self.ctrl1.x).min(self.ctrl2.x).min(self.to.x);
        let max_x = self.from.x.max(self.ctrl1.x).max(self.ctrl2.x).max(self.to.x);

        (min_x, max_x)
    }

    /// Returns a conservative range of y that contains this curve.
    pub fn fast_bounding_range_y(&self) -> (S, S) {
        let min_y = self.from.y.min(self.ctrl1.y).min(self.ctrl2.y).min(self.to.y);
        let max_y = self.from.y.max(self.ctrl1.y).max(self.ctrl2.y).max(self.to.y);

        (min_y, max_y)
    }

    /// Parameters in `]0..1[` where the x derivative changes sign.
    pub fn local_x_extrema_t(&self) -> ArrayVec<S, 2> {
        let mut result = ArrayVec::new();

        // dx/dt = 3a * t² + 2b * t + c
        let (a, b, c, _) = monomial(self.from.x, self.ctrl1.x, self.ctrl2.x, self.to.x);
        let qa = S::THREE * a;
        let qb = S::TWO * b;
        let qc = c;

        let mut push = |t: S| {
            if t > S::ZERO && t < S::ONE && !result.is_full() {
                result.push(t);
            }
        };

        if qa.abs() < S::EPSILON {
            if qb.abs() >= S::EPSILON {
                push(-qc / qb);
            }
            return result;
        }

        let discriminant = qb * qb - S::value(4.0) * qa * qc;
        // A double root touches zero without changing sign.
        if discriminant <= S::ZERO {
            return result;
        }

        let sqrt_delta = discriminant.sqrt();
        let (t1, t2) = ((-qb - sqrt_delta) / (S::TWO * qa), (-qb + sqrt_delta) / (S::TWO * qa));
        push(t1.min(t2));
        push(t1.max(t2));

        result
    }

    /// Whether x never folds back along the segment.
    pub fn is_x_monotonic(&self) -> bool {
        self.local_x_extrema_t().is_empty()
    }

    /// Applies the transform to this curve and returns the results.
    pub fn transformed(&self, transform: &Transform<S>) -> Self {
        CubicSegment {
            from: transform.transform_point(self.from),
            ctrl1: transform.transform_point(self.ctrl1),
            ctrl2: transform.transform_point(self.ctrl2),
            to: transform.transform_point(self.to),
        }
    }

    /// Swap the beginning and the end of the segment.
    pub fn flip(&self) -> Self {
        CubicSegment {
            from: self.to,
            ctrl1: self.ctrl2,
            ctrl2: self.ctrl1,
            to: self.from,
        }
    }
}

impl<S: Scalar> Default for CubicSegment<S> {
    fn default() -> Self {
        CubicSegment {
            from: point(S::ZERO, S::ZERO),
            ctrl1: point(S::HALF, S::ZERO),
            ctrl2: point(S::HALF, S::ONE),
            to: point(S::ONE, S::ONE),
        }
    }
}

/// Monomial coefficients of one coordinate of a cubic segment.
#[inline]
pub(crate) fn monomial<S: Scalar>(p0: S, p1: S, p2: S, p3: S) -> (S, S, S, S) {
    (
        -p0 + S::THREE * p1 - S::THREE * p2 + p3,
        S::THREE * p0 - S::SIX * p1 + S::THREE * p2,
        -S::THREE * p0 + S::THREE * p1,
        p0,
    )
}

#[cfg(test)]
use crate::scalar::Float;

#[cfg(test)]
fn bernstein_sample(c: &CubicSegment<f64>, t: f64) -> Point<f64> {
    let one_t = 1.0 - t;
    (c.from.to_vector() * one_t * one_t * one_t
        + c.ctrl1.to_vector() * 3.0 * one_t * one_t * t
        + c.ctrl2.to_vector() * 3.0 * one_t * t * t
        + c.to.to_vector() * t * t * t)
        .to_point()
}

#[test]
fn monomial_matches_bernstein_form() {
    let c = CubicSegment {
        from: point(1.0, 1.0),
        ctrl1: point(3.0, 2.0),
        ctrl2: point(4.0, -2.0),
        to: point(6.0, 1.5),
    };
    let polynomial = c.polynomial();

    for i in 1..32 {
        let t = i as f64 / 32.0;
        let expected = bernstein_sample(&c, t);
        assert!((c.sample(t) - expected).length() < 1e-12);
        assert!((polynomial.sample(t) - expected).length() < 1e-12);
        assert!((c.x(t) - expected.x).abs() < 1e-12);
        assert!((c.y(t) - expected.y).abs() < 1e-12);
        assert!((polynomial.x(t) - c.x(t)).abs() < 1e-12);
        assert!((polynomial.y(t) - c.y(t)).abs() < 1e-12);
    }
}

#[test]
fn boundaries_are_exact() {
    let c = CubicSegment {
        from: point(0.1, 0.7),
        ctrl1: point(0.3, 0.0),
        ctrl2: point(0.9, 0.2),
        to: point(1.3, 0.9),
    };

    assert_eq!(c.sample(0.0), c.from);
    assert_eq!(c.sample(-1.0), c.from);
    assert_eq!(c.sample(1.0), c.to);
    assert_eq!(c.sample(2.0), c.to);
    assert_eq!(c.x(0.0), 0.1);
    assert_eq!(c.x(1.0), 1.3);
    assert_eq!(c.y(0.0), 0.7);
    assert_eq!(c.y(1.0), 0.9);
}

#[test]
fn from_handles() {
    let c = CubicSegment::from_handles(point(0.0, 0.0), Vector::new(0.5, 0.0), Vector::new(-0.5, 0.0), point(1.0, 1.0));
    assert_eq!(c, CubicSegment::default());
}

#[test]
fn derivatives() {
    let c = CubicSegment {
        from: point(1.0, 1.0),
        ctrl1: point(2.0, 2.0),
        ctrl2: point(3.0, 1.0),
        to: point(4.0, 0.0),
    };

    assert_eq!(c.dx(0.0), 3.0);
    assert_eq!(c.dx(1.0), 3.0);
    assert_eq!(c.dy(0.0), 3.0);
    assert_eq!(c.dy(1.0), -3.0);

    let h = 1e-6;
    for i in 1..10 {
        let t = i as f64 / 10.0;
        let numeric = (c.sample(t + h) - c.sample(t - h)) / (2.0 * h);
        assert!((c.derivative(t) - numeric).length() < 1e-6);
        assert!((c.polynomial().dx(t) - c.dx(t)).abs() < 1e-12);
        assert!((c.polynomial().dy(t) - c.dy(t)).abs() < 1e-12);
    }
}

#[test]
fn x_monotonic() {
    assert!(CubicSegment::<f64>::default().is_x_monotonic());

    // Handles reaching past the opposite anchor make x fold back.
    let folded = CubicSegment {
        from: point(0.0, 0.0),
        ctrl1: point(2.0, 0.0),
        ctrl2: point(-1.0, 1.0),
        to: point(1.0, 1.0),
    };
    assert!(!folded.is_x_monotonic());
    assert_eq!(folded.local_x_extrema_t().len(), 2);

    // Straight vertical handles: the derivative only touches zero at the endpoints.
    let vertical = CubicSegment {
        from: point(0.0, 0.0),
        ctrl1: point(0.0, 1.0),
        ctrl2: point(1.0, 0.0),
        to: point(1.0, 1.0),
    };
    assert!(vertical.is_x_monotonic());
}

#[test]
fn bounding_ranges() {
    let c = CubicSegment {
        from: point(0.0, 0.0),
        ctrl1: point(2.0, -1.0),
        ctrl2: point(-1.0, 3.0),
        to: point(1.0, 1.0),
    };
    assert_eq!(c.fast_bounding_range_x(), (-1.0, 2.0));
    assert_eq!(c.fast_bounding_range_y(), (-1.0, 3.0));
}

#[test]
fn flip_and_transform() {
    let c = CubicSegment::<f64>::default();
    let flipped = c.flip();
    for i in 0..=10 {
        let t = i as f64 / 10.0;
        assert!((flipped.sample(1.0 - t) - c.sample(t)).length() < 1e-12);
    }

    let transform = Transform::scale(2.0, 3.0).then_translate(Vector::new(1.0, 1.0));
    let moved = c.transformed(&transform);
    assert_eq!(moved.from, point(1.0, 1.0));
    assert_eq!(moved.to, point(3.0, 4.0));
    assert!((moved.sample(0.5) - transform.transform_point(c.sample(0.5))).length() < 1e-12);
}
