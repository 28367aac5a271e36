#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]

//! Editable piecewise cubic curves.
//!
//! A [`Curve`] is an ordered list of control points, sorted along the x axis. Each point
//! carries two tangent handles, and consecutive points define a cubic segment. The
//! curve is queried as a function: [`Curve::value_at`] returns the y coordinate of the
//! curve at a given x.
//!
//! This crate is reexported in [curvedit](https://docs.rs/curvedit/).
//!
//! # Examples
//!
//! ```
//! use curvedit_editor::{Curve, Side};
//! use curvedit_editor::math::{point, vector};
//!
//! // A new curve goes from (0, 0) to (1, 1).
//! let mut curve = Curve::new();
//! assert_eq!(curve.value_at(0.5).unwrap(), 0.5);
//!
//! let (index, id) = curve.insert(point(0.5, 0.2)).unwrap();
//! assert_eq!(index, 1);
//!
//! curve.set_handle(id, Side::Right, vector(0.1, 0.0)).unwrap();
//! curve.set_position(id, 0.25, 0.2).unwrap();
//! curve.sort();
//!
//! assert_eq!(curve.value_at(0.25).unwrap(), 0.2);
//! ```
//!
//! # Mutations and ordering
//!
//! Inserting and deleting points keeps the list sorted. Moving a point does not: during an
//! interactive drag the point may temporarily cross its neighbours, and [`Curve::sort`]
//! is expected to be called once the drag settles (or right after a programmatic
//! [`Curve::set_position`]). [`Curve::move_point`] moves and sorts in one go.
//!
//! The curve never holds fewer than two points, deleting from a two-point curve is
//! refused.
//!
//! # Observing changes
//!
//! Presentation layers can either poll [`Curve::revision`], which increases with every
//! mutation, or register a callback with [`Curve::set_observer`] to receive a
//! [`CurveChange`] per mutation.

pub use curvedit_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod change;
mod curve;
mod error;
mod evaluate;
mod point;
mod snapshot;

#[doc(inline)]
pub use crate::change::CurveChange;
#[doc(inline)]
pub use crate::curve::{Curve, PointFactory};
#[doc(inline)]
pub use crate::error::EditError;
#[doc(inline)]
pub use crate::evaluate::{bounding_range, segment_between, value_at, Segments};
#[doc(inline)]
pub use crate::point::{ControlPoint, CurvePoint, PointId, Side};
#[doc(inline)]
pub use crate::snapshot::CurveSnapshot;

pub mod math {
    //! f64 versions of the curvedit_geom types used by the editor.

    use crate::geom::euclid;

    /// Alias for ```euclid::default::Point2D<f64>```.
    pub type Point = euclid::default::Point2D<f64>;

    /// Alias for ```euclid::default::Vector2D<f64>```.
    pub type Vector = euclid::default::Vector2D<f64>;

    /// Alias for ```euclid::default::Box2D<f64>```.
    pub type Box2D = euclid::default::Box2D<f64>;

    /// Alias for ```euclid::default::Transform2D<f64>```
    pub type Transform = euclid::default::Transform2D<f64>;

    /// The curve space to display space transform (f64).
    pub type ViewTransform = crate::geom::ViewTransform<f64>;

    /// A cubic segment between two control points (f64).
    pub type CubicSegment = crate::geom::CubicSegment<f64>;

    /// Shorthand for `Vector::new(x, y)`.
    #[inline]
    pub fn vector(x: f64, y: f64) -> Vector {
        Vector::new(x, y)
    }

    /// Shorthand for `Point::new(x, y)`.
    #[inline]
    pub fn point(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }
}
