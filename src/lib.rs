#![deny(bare_trait_objects)]

//! Editable piecewise cubic curves, queried as functions of x.
//!
//! # Crates
//!
//! This meta-crate (`curvedit`) reexports the following sub-crates for convenience:
//!
//! * **curvedit_geom** - Bernstein evaluation, cubic segments, the x to parameter
//!   locator and the view transform. `no_std` compatible and generic over f32 and f64.
//! * **curvedit_editor** - Control points with tangent handles, the editable `Curve`
//!   and its `value_at` query.
//!
//! Each `curvedit_<name>` crate is reexported as a `<name>` module in `curvedit`. For example:
//!
//! ```ignore
//! extern crate curvedit_editor;
//! use curvedit_editor::Curve;
//! ```
//!
//! Is equivalent to:
//!
//! ```ignore
//! extern crate curvedit;
//! use curvedit::editor::Curve;
//! ```
//!
//! # Feature flags
//!
//! serialization using serde can be enabled on each crate using the
//! `serialization` feature flag (disabled by default).
//!
//! # Examples
//!
//! ## Evaluating an eased curve
//!
//! ```
//! use curvedit::editor::{Curve, Side};
//! use curvedit::math::{point, vector};
//!
//! fn main() {
//!     let mut curve = Curve::new();
//!
//!     // Flatten the tangent at both ends for an ease-in-out.
//!     let first = curve.points()[0].id();
//!     let last = curve.points()[1].id();
//!     curve.set_handle(first, Side::Right, vector(0.4, 0.0)).unwrap();
//!     curve.set_handle(last, Side::Left, vector(-0.4, 0.0)).unwrap();
//!
//!     // A plateau in the middle.
//!     let mid = curve.add_point(point(0.5, 0.6)).unwrap();
//!     curve.set_symmetric(mid, true).unwrap();
//!     curve.set_handle(mid, Side::Right, vector(0.1, 0.0)).unwrap();
//!
//!     for sample in curve.sample(11).unwrap() {
//!         println!("{:.2} -> {:.4}", sample.x, sample.y);
//!     }
//!
//!     assert_eq!(curve.value_at(0.5).unwrap(), 0.6);
//! }
//! ```
//!
//! ## Mapping to display coordinates
//!
//! ```
//! use curvedit::editor::Curve;
//! use curvedit::math::{point, Box2D, ViewTransform};
//!
//! let curve = Curve::new();
//! let view = ViewTransform::fit_range(
//!     &curve.bounding_range(),
//!     &Box2D::new(point(0.0, 0.0), point(200.0, 100.0)),
//! );
//!
//! let display = view.to_display_point(point(0.5, curve.value_at(0.5).unwrap()));
//! assert_eq!(display, point(100.0, 50.0));
//! ```

pub extern crate curvedit_editor;
pub extern crate curvedit_geom;

pub use curvedit_editor as editor;
pub use curvedit_geom as geom;

pub use editor::math;
