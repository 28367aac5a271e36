#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::many_single_char_names)]
#![no_std]

//! Curve math for interactive editing on top of euclid.
//!
//! This crate is reexported in [curvedit](https://docs.rs/curvedit/).
//!
//! # Overview.
//!
//! This crate implements the maths behind a piecewise cubic curve editor:
//!
//! - rows of Pascal's triangle used as Bernstein weights ([`binomial`]),
//! - evaluation of n-point weighted sums and of cubic segments ([`bernstein`], [`cubic`]),
//! - finding the curve parameter that produces a given x coordinate ([`solve`]),
//! - the translate + scale transform mapping curve space to display space ([`view`]).
//!
//! # Parameters versus coordinates
//!
//! A cubic segment is parametrized by `t ∈ [0..1]`. The editor however is queried with
//! an x coordinate, and the relation between the two is only linear when the handles are
//! evenly spread along the x axis. Answering `y = f(x)` therefore goes through two
//! steps: solve `x(t) = x` for `t`, then sample `y(t)`.
//!
//! ```
//! use curvedit_geom::{point, CubicSegment};
//!
//! let segment: CubicSegment<f64> = CubicSegment {
//!     from: point(0.0, 0.0),
//!     ctrl1: point(0.5, 0.0),
//!     ctrl2: point(0.5, 1.0),
//!     to: point(1.0, 1.0),
//! };
//!
//! let t = segment.solve_t_for_x(0.5).t;
//! assert!((segment.y(t) - 0.5).abs() < 1e-9);
//! ```

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

// Reexport dependencies.
pub use arrayvec;
pub use euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod bernstein;
pub mod binomial;
pub mod cubic;
mod error;
pub mod solve;
pub mod view;

#[doc(inline)]
pub use crate::cubic::{CubicPolynomial, CubicSegment};
#[doc(inline)]
pub use crate::error::GeomError;
#[doc(inline)]
pub use crate::solve::{Solution, SolveOptions, SolveStatus};
#[doc(inline)]
pub use crate::view::ViewTransform;

pub use crate::scalar::Scalar;

mod scalar {
    pub(crate) use num_traits::cast::cast;
    pub(crate) use num_traits::{Float, NumCast};

    use core::fmt::{Debug, Display};
    use core::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

    pub trait Scalar:
        Float + NumCast + Sized + Display + Debug + AddAssign + SubAssign + MulAssign + DivAssign
    {
        const HALF: Self;
        const ZERO: Self;
        const ONE: Self;
        const TWO: Self;
        const THREE: Self;
        const SIX: Self;

        const MAX: Self;

        const EPSILON: Self;

        /// Smallest derivative magnitude the inverse lookup is willing to divide by.
        const FLAT_DERIVATIVE: Self;

        /// Default convergence threshold of the inverse lookup.
        const SOLVE_TOLERANCE: Self;

        fn value(v: f32) -> Self;
    }

    impl Scalar for f32 {
        const HALF: Self = 0.5;
        const ZERO: Self = 0.0;
        const ONE: Self = 1.0;
        const TWO: Self = 2.0;
        const THREE: Self = 3.0;
        const SIX: Self = 6.0;

        const MAX: Self = f32::MAX;

        const EPSILON: Self = 1e-4;
        const FLAT_DERIVATIVE: Self = 1e-7;
        const SOLVE_TOLERANCE: Self = 1e-10;

        #[inline]
        fn value(v: f32) -> Self {
            v
        }
    }

    impl Scalar for f64 {
        const HALF: Self = 0.5;
        const ZERO: Self = 0.0;
        const ONE: Self = 1.0;
        const TWO: Self = 2.0;
        const THREE: Self = 3.0;
        const SIX: Self = 6.0;

        const MAX: Self = f64::MAX;

        const EPSILON: Self = 1e-8;
        const FLAT_DERIVATIVE: Self = 1e-15;
        const SOLVE_TOLERANCE: Self = 1e-10;

        #[inline]
        fn value(v: f32) -> Self {
            v as f64
        }
    }
}

/// Alias for `euclid::default::Point2D`.
pub use euclid::default::Point2D as Point;

/// Alias for `euclid::default::Vector2D`.
pub use euclid::default::Vector2D as Vector;

/// Alias for `euclid::default::Box2D`
pub use euclid::default::Box2D;

/// Alias for `euclid::default::Transform2D`
pub type Transform<S> = euclid::default::Transform2D<S>;

/// Shorthand for `Vector::new(x, y)`.
#[inline]
pub fn vector<S>(x: S, y: S) -> Vector<S> {
    Vector::new(x, y)
}

/// Shorthand for `Point::new(x, y)`.
#[inline]
pub fn point<S>(x: S, y: S) -> Point<S> {
    Point::new(x, y)
}
