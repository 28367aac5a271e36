//! Inverse lookup: find the parameter at which a cubic segment reaches a given x.
//!
//! The search runs in two phases. A few bisection steps first narrow `[0..1]` down to a
//! small bracket around the answer, then Newton-Raphson iterations refine the midpoint of
//! that bracket, clamping every step to `[0..1]`.
//!
//! # Monotonicity
//!
//! The segment is expected to be monotonic along the x axis over `[0..1]`, which is the
//! case when neither handle reaches past the opposite anchor. This is not checked here:
//! when the segment folds back, the returned parameter is deterministic but may belong to
//! any of the branches that cross `x`. [`CubicSegment::is_x_monotonic`] can be used to
//! detect this situation.

use crate::cubic::CubicSegment;
use crate::scalar::Scalar;

/// Parameters of the inverse lookup.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct SolveOptions<S> {
    /// Maximum number of Newton-Raphson iterations.
    pub max_iterations: u32,
    /// The search stops when `|x(t) - x|` (bisection) or the Newton step falls below this.
    pub tolerance: S,
    /// Number of bisection steps performed before switching to Newton-Raphson.
    pub bisection_steps: u32,
    /// Derivatives smaller than this in magnitude stop the Newton-Raphson refinement.
    pub flat_derivative: S,
}

impl<S: Scalar> Default for SolveOptions<S> {
    fn default() -> Self {
        SolveOptions {
            max_iterations: 20,
            tolerance: S::SOLVE_TOLERANCE,
            bisection_steps: 10,
            flat_derivative: S::FLAT_DERIVATIVE,
        }
    }
}

impl<S: Scalar> SolveOptions<S> {
    pub fn with_tolerance(mut self, tolerance: S) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// How the inverse lookup ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum SolveStatus {
    /// A bisection midpoint was within tolerance.
    Bisection,
    /// A Newton-Raphson step fell below the tolerance.
    Converged,
    /// Ran out of Newton-Raphson iterations.
    MaxIterations,
    /// The derivative was too flat to divide by, the last estimate stands.
    FlatDerivative,
    /// The segment has no extent along x, the parameter is 0.
    ZeroWidth,
}

impl SolveStatus {
    /// Whether the result is a fallback rather than a converged answer.
    pub fn is_degenerate(self) -> bool {
        match self {
            SolveStatus::FlatDerivative | SolveStatus::ZeroWidth => true,
            _ => false,
        }
    }
}

/// Result of the inverse lookup.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Solution<S> {
    pub t: S,
    pub status: SolveStatus,
    /// Number of Newton-Raphson iterations performed.
    pub iterations: u32,
}

/// Find the parameter at which `segment` reaches `x`, using the default options.
#[inline]
pub fn find_parameter_for<S: Scalar>(x: S, segment: &CubicSegment<S>) -> S {
    find_parameter_with(x, segment, &SolveOptions::default()).t
}

/// Find the parameter at which `segment` reaches `x`.
///
/// The result is always within `[0..1]`, including when `x` is outside of the segment's
/// range along the x axis, in which case the closest endpoint's parameter is approached.
pub fn find_parameter_with<S: Scalar>(
    x: S,
    segment: &CubicSegment<S>,
    options: &SolveOptions<S>,
) -> Solution<S> {
    if segment.to.x == segment.from.x {
        return Solution {
            t: S::ZERO,
            status: SolveStatus::ZeroWidth,
            iterations: 0,
        };
    }

    let increasing = segment.to.x > segment.from.x;

    let mut min = S::ZERO;
    let mut max = S::ONE;
    for _ in 0..options.bisection_steps {
        let mid = (min + max) * S::HALF;
        let mid_x = segment.x(mid);
        if (mid_x - x).abs() < options.tolerance {
            return Solution {
                t: mid,
                status: SolveStatus::Bisection,
                iterations: 0,
            };
        }

        if (mid_x < x) == increasing {
            min = mid;
        } else {
            max = mid;
        }
    }

    let mut t = (min + max) * S::HALF;
    let mut status = SolveStatus::MaxIterations;
    let mut iterations = 0;
    while iterations < options.max_iterations {
        let dx = segment.dx(t);
        if dx.abs() < options.flat_derivative {
            status = SolveStatus::FlatDerivative;
            break;
        }

        iterations += 1;

        let step = (segment.x(t) - x) / dx;
        t = (t - step).max(S::ZERO).min(S::ONE);

        if step.abs() < options.tolerance {
            status = SolveStatus::Converged;
            break;
        }
    }

    Solution {
        t,
        status,
        iterations,
    }
}

#[cfg(test)]
use crate::point;
#[cfg(test)]
use crate::scalar::Float;

#[test]
fn default_options() {
    let options = SolveOptions::<f64>::default();
    assert_eq!(options.tolerance, 1e-10);
    assert_eq!(options.flat_derivative, 1e-15);
    assert_eq!(options.max_iterations, 20);
    assert_eq!(options.bisection_steps, 10);
}

#[test]
fn symmetric_segment() {
    let segment = CubicSegment::<f64>::default();
    let solution = segment.solve_t_for_x(0.5);
    assert_eq!(solution.t, 0.5);
    assert_eq!(solution.status, SolveStatus::Bisection);
    assert_eq!(segment.y(solution.t), 0.5);
}

#[test]
fn converges_on_monotonic_segments() {
    let segments = [
        CubicSegment::default(),
        CubicSegment {
            from: point(0.0, 0.0),
            ctrl1: point(0.0, 1.0),
            ctrl2: point(1.0, 0.0),
            to: point(1.0, 1.0),
        },
        CubicSegment {
            from: point(-3.0, 2.0),
            ctrl1: point(-2.9, 10.0),
            ctrl2: point(7.5, -4.0),
            to: point(8.0, 1.0),
        },
        CubicSegment {
            from: point(10.0, 0.0),
            ctrl1: point(11.0, 0.0),
            ctrl2: point(11.0, 5.0),
            to: point(250.0, 5.0),
        },
        // x = 0.5 + 4 * (t - 0.5)³, flat in the middle.
        CubicSegment {
            from: point(0.0, 0.0),
            ctrl1: point(1.0, 0.0),
            ctrl2: point(0.0, 1.0),
            to: point(1.0, 1.0),
        },
    ];

    for segment in &segments {
        assert!(segment.is_x_monotonic());
        let width = segment.to.x - segment.from.x;
        for i in 1..100 {
            let x = segment.from.x + width * (i as f64 / 100.0);
            let solution = segment.solve_t_for_x(x);
            assert!(solution.t >= 0.0 && solution.t <= 1.0);
            assert!(
                (segment.x(solution.t) - x).abs() < 1e-8,
                "{segment:?} x = {x} -> {solution:?}"
            );
        }
    }
}

#[test]
fn decreasing_segment() {
    let segment = CubicSegment::<f64>::default().flip();
    for i in 1..10 {
        let x = i as f64 / 10.0;
        let t = find_parameter_for(x, &segment);
        assert!((segment.x(t) - x).abs() < 1e-8);
    }
}

#[test]
fn out_of_range_targets_clamp() {
    let segment = CubicSegment::<f64>::default();
    let below = segment.solve_t_for_x(-5.0);
    let above = segment.solve_t_for_x(5.0);
    assert_eq!(below.t, 0.0);
    assert_eq!(above.t, 1.0);
}

#[test]
fn zero_width_segment() {
    let segment = CubicSegment {
        from: point(2.0, 0.0),
        ctrl1: point(2.5, 0.0),
        ctrl2: point(1.5, 1.0),
        to: point(2.0, 1.0),
    };

    let solution = segment.solve_t_for_x(2.0);
    assert_eq!(solution.t, 0.0);
    assert_eq!(solution.status, SolveStatus::ZeroWidth);
    assert!(solution.status.is_degenerate());
}

#[test]
fn flat_derivative_keeps_bisection_result() {
    let segment = CubicSegment::<f64>::default();
    let options = SolveOptions {
        flat_derivative: 1e9,
        ..SolveOptions::default()
    };

    let solution = find_parameter_with(0.3, &segment, &options);
    assert_eq!(solution.status, SolveStatus::FlatDerivative);
    assert_eq!(solution.iterations, 0);
    // Ten bisection steps leave a bracket of width 1/1024.
    assert!((segment.x(solution.t) - 0.3).abs() < 1e-3);
}

#[test]
fn iteration_cap() {
    let segment = CubicSegment {
        from: point(0.0, 0.0),
        ctrl1: point(0.0, 1.0),
        ctrl2: point(1.0, 0.0),
        to: point(1.0, 1.0),
    };
    let options = SolveOptions::default().with_max_iterations(1).with_tolerance(1e-300);

    let solution = find_parameter_with(0.37, &segment, &options);
    assert_eq!(solution.iterations, 1);
    assert_eq!(solution.status, SolveStatus::MaxIterations);
}

#[test]
fn single_precision() {
    let segment = CubicSegment::<f32>::default();
    let t = find_parameter_for(0.25f32, &segment);
    assert!((segment.x(t) - 0.25).abs() < 1e-5);
}
