//! Mapping between a curve's own coordinate space and a display space.
//!
//! The mapping is a per-axis scale followed by a translation:
//!
//! ```text
//! display = local * scale + translation
//! ```
//!
//! The matrix and its inverse are recomputed by every mutator, so reading them never
//! observes a stale state.

use crate::scalar::Scalar;
use crate::{vector, Box2D, Point, Transform, Vector};

/// Translate + scale transform from curve space to display space.
///
/// Scale components are expected to be non-zero. A zero scale is tolerated: the forward
/// mapping collapses that axis onto the translation, [`is_invertible`](Self::is_invertible)
/// returns false and [`to_local`](Self::to_local) maps that axis to zero.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ViewTransform<S: Scalar> {
    translation: Vector<S>,
    scale: Vector<S>,
    matrix: Transform<S>,
    inverse: Option<Transform<S>>,
}

impl<S: Scalar> ViewTransform<S> {
    /// The identity mapping.
    pub fn identity() -> Self {
        ViewTransform::new(vector(S::ZERO, S::ZERO), vector(S::ONE, S::ONE))
    }

    pub fn new(translation: Vector<S>, scale: Vector<S>) -> Self {
        let mut view = ViewTransform {
            translation,
            scale,
            matrix: Transform::identity(),
            inverse: Some(Transform::identity()),
        };
        view.update();

        view
    }

    /// A transform mapping the `local` rectangle onto the `display` rectangle.
    ///
    /// Passing a display rectangle with `min.y > max.y` flips the y axis, which is the
    /// usual way to get y pointing up on a screen where it points down.
    pub fn fit_range(local: &Box2D<S>, display: &Box2D<S>) -> Self {
        let local_size = local.max - local.min;
        let display_size = display.max - display.min;

        let sx = if local_size.x == S::ZERO { S::ONE } else { display_size.x / local_size.x };
        let sy = if local_size.y == S::ZERO { S::ONE } else { display_size.y / local_size.y };

        let translation = vector(display.min.x - local.min.x * sx, display.min.y - local.min.y * sy);

        ViewTransform::new(translation, vector(sx, sy))
    }

    #[inline]
    pub fn translation(&self) -> Vector<S> {
        self.translation
    }

    #[inline]
    pub fn scale(&self) -> Vector<S> {
        self.scale
    }

    /// The local to display matrix (scale, then translation).
    #[inline]
    pub fn current_matrix(&self) -> &Transform<S> {
        &self.matrix
    }

    /// The display to local matrix, if the scale has no zero component.
    #[inline]
    pub fn inverse_matrix(&self) -> Option<&Transform<S>> {
        self.inverse.as_ref()
    }

    #[inline]
    pub fn is_invertible(&self) -> bool {
        self.inverse.is_some()
    }

    /// Offset the translation.
    pub fn move_by(&mut self, dx: S, dy: S) {
        self.translation += vector(dx, dy);
        self.update();
    }

    /// Replace the translation.
    pub fn set_position(&mut self, x: S, y: S) {
        self.translation = vector(x, y);
        self.update();
    }

    /// Replace the scale.
    pub fn set_scale(&mut self, sx: S, sy: S) {
        self.scale = vector(sx, sy);
        self.update();
    }

    /// Map a display position into curve space.
    pub fn to_local(&self, display: Point<S>) -> Vector<S> {
        match self.inverse {
            Some(ref inverse) => inverse.transform_point(display).to_vector(),
            None => {
                let offset = display - self.translation;
                vector(
                    if self.scale.x == S::ZERO { S::ZERO } else { offset.x / self.scale.x },
                    if self.scale.y == S::ZERO { S::ZERO } else { offset.y / self.scale.y },
                )
            }
        }
    }

    /// Map a curve space position into display space.
    pub fn to_display(&self, local: Vector<S>) -> Point<S> {
        self.matrix.transform_point(local.to_point())
    }

    #[inline]
    pub fn to_display_point(&self, local: Point<S>) -> Point<S> {
        self.matrix.transform_point(local)
    }

    /// Map a curve space offset (a handle for example) into display space, ignoring
    /// the translation.
    #[inline]
    pub fn to_display_vector(&self, local: Vector<S>) -> Vector<S> {
        self.matrix.transform_vector(local)
    }

    fn update(&mut self) {
        self.matrix = Transform::scale(self.scale.x, self.scale.y).then_translate(self.translation);
        self.inverse = if self.scale.x == S::ZERO || self.scale.y == S::ZERO {
            None
        } else {
            self.matrix.inverse()
        };
    }
}

impl<S: Scalar> Default for ViewTransform<S> {
    fn default() -> Self {
        ViewTransform::identity()
    }
}

#[cfg(test)]
use crate::point;
#[cfg(test)]
use crate::scalar::Float;

#[test]
fn identity() {
    let view = ViewTransform::<f64>::identity();
    assert_eq!(view.to_display(vector(3.0, -2.0)), point(3.0, -2.0));
    assert_eq!(view.to_local(point(3.0, -2.0)), vector(3.0, -2.0));
    assert!(view.is_invertible());
}

#[test]
fn scale_then_translate() {
    let mut view = ViewTransform::identity();
    view.set_scale(200.0, -100.0);
    view.set_position(10.0, 300.0);

    assert_eq!(view.to_display(vector(0.0, 0.0)), point(10.0, 300.0));
    assert_eq!(view.to_display(vector(1.0, 1.0)), point(210.0, 200.0));
    assert_eq!(view.to_display_vector(vector(0.5, 0.5)), vector(100.0, -50.0));

    let local = view.to_local(point(110.0, 250.0));
    assert!((local - vector(0.5, 0.5)).length() < 1e-12);
}

#[test]
fn move_by_accumulates() {
    let mut view = ViewTransform::new(vector(1.0, 2.0), vector(2.0, 2.0));
    view.move_by(3.0, -1.0);
    view.move_by(1.0, 1.0);
    assert_eq!(view.translation(), vector(5.0, 2.0));
    assert_eq!(view.to_display_point(point(0.0, 0.0)), point(5.0, 2.0));
    assert_eq!(*view.current_matrix(), Transform::scale(2.0, 2.0).then_translate(vector(5.0, 2.0)));
}

#[test]
fn round_trip() {
    let scales = [(1.0, 1.0), (250.0, -250.0), (0.001, 3.0), (-7.5, 0.25)];
    let translations = [(0.0, 0.0), (12.5, -80.0), (-1000.0, 1e4)];
    let points = [point(0.0, 0.0), point(1.0, 1.0), point(-33.0, 0.125), point(640.0, 480.0)];

    for &(sx, sy) in &scales {
        for &(tx, ty) in &translations {
            let view = ViewTransform::new(vector(tx, ty), vector(sx, sy));
            for p in &points {
                let back = view.to_display(view.to_local(*p));
                let tolerance = 1e-9 * (1.0 + p.to_vector().length() + vector(tx, ty).length());
                assert!((back - *p).length() < tolerance, "{p:?} -> {back:?}");
            }
        }
    }
}

#[test]
fn zero_scale_is_not_invertible() {
    let mut view = ViewTransform::new(vector(10.0, 20.0), vector(2.0, 4.0));
    view.set_scale(0.0, 4.0);

    assert!(!view.is_invertible());
    assert!(view.inverse_matrix().is_none());
    assert_eq!(view.to_display(vector(5.0, 1.0)), point(10.0, 24.0));
    assert_eq!(view.to_local(point(99.0, 24.0)), vector(0.0, 1.0));

    view.set_scale(1.0, 4.0);
    assert!(view.is_invertible());
}

#[test]
fn fit_range() {
    let local = Box2D::new(point(0.0, 0.0), point(1.0, 1.0));
    let display = Box2D::new(point(0.0, 400.0), point(400.0, 0.0));
    let view = ViewTransform::fit_range(&local, &display);

    assert_eq!(view.to_display(vector(0.0, 0.0)), point(0.0, 400.0));
    assert_eq!(view.to_display(vector(1.0, 1.0)), point(400.0, 0.0));
    assert_eq!(view.to_display(vector(0.5, 0.25)), point(200.0, 300.0));
}
