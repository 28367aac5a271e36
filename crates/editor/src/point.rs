use crate::math::{Point, Vector};
use crate::EditError;

use std::fmt;

/// ID of a control point in a curve.
///
/// Stays attached to the point when it moves or gets reordered, and is never reused
/// by the curve after the point is deleted.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct PointId(pub u32);

impl PointId {
    pub const INVALID: Self = PointId(u32::MAX);
    pub fn to_usize(self) -> usize {
        self.0 as usize
    }
    pub fn from_usize(val: usize) -> Self {
        PointId(val as u32)
    }
}

impl fmt::Debug for PointId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Selects one of the two handles of a control point.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Side {
    /// The incoming tangent, shaping the segment that ends at the point.
    Left,
    /// The outgoing tangent, shaping the segment that starts at the point.
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// An anchor of the curve and its two tangent handles.
///
/// Handles are stored relative to the position, so moving a point carries its handles
/// along. When the point is symmetric, the two handles are kept as exact negations of
/// each other and the tangent goes straight through the anchor.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ControlPoint {
    id: PointId,
    position: Point,
    left: Vector,
    right: Vector,
    symmetric: bool,
}

impl ControlPoint {
    pub const DEFAULT_LEFT_HANDLE: Vector = Vector::new(-0.5, 0.0);
    pub const DEFAULT_RIGHT_HANDLE: Vector = Vector::new(0.5, 0.0);

    /// A point with the default handles, `(-0.5, 0)` and `(0.5, 0)`.
    pub fn new(id: PointId, position: Point) -> Self {
        ControlPoint {
            id,
            position,
            left: ControlPoint::DEFAULT_LEFT_HANDLE,
            right: ControlPoint::DEFAULT_RIGHT_HANDLE,
            symmetric: false,
        }
    }

    #[inline]
    pub fn id(&self) -> PointId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.position.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.position.y
    }

    #[inline]
    pub fn left_handle(&self) -> Vector {
        self.left
    }

    #[inline]
    pub fn right_handle(&self) -> Vector {
        self.right
    }

    #[inline]
    pub fn handle(&self, side: Side) -> Vector {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Absolute position of the end of a handle.
    #[inline]
    pub fn handle_position(&self, side: Side) -> Point {
        self.position + self.handle(side)
    }

    #[inline]
    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    /// Move the point, handles included.
    ///
    /// This does not restore the ordering of the curve that owns the point.
    pub fn set_position(&mut self, position: Point) -> Result<(), EditError> {
        if !is_finite(position.to_vector()) {
            return Err(EditError::InvalidArgument("control point position must be finite"));
        }

        self.position = position;

        Ok(())
    }

    /// Set one of the handles, relative to the point's position.
    ///
    /// If the point is symmetric the other handle is set to the negation of `handle`.
    pub fn set_handle(&mut self, side: Side, handle: Vector) -> Result<(), EditError> {
        if !is_finite(handle) {
            return Err(EditError::InvalidArgument("handle must be finite"));
        }

        match side {
            Side::Left => self.left = handle,
            Side::Right => self.right = handle,
        }

        if self.symmetric {
            match side {
                Side::Left => self.right = -handle,
                Side::Right => self.left = -handle,
            }
        }

        Ok(())
    }

    /// Set the absolute position of the end of a handle.
    pub fn set_handle_position(&mut self, side: Side, position: Point) -> Result<(), EditError> {
        self.set_handle(side, position - self.position)
    }

    /// Turning symmetry on straightens the handles with [`reset_handles`](Self::reset_handles).
    pub fn set_symmetric(&mut self, symmetric: bool) {
        let was_symmetric = self.symmetric;
        self.symmetric = symmetric;

        if symmetric && !was_symmetric {
            self.reset_handles();
        }
    }

    /// Make the handles symmetric.
    ///
    /// Both handles get the average of their lengths. The left handle keeps its direction
    /// and the right handle becomes its exact negation. If both handles have a zero length,
    /// or if the average length is not representable, the default handles are restored.
    pub fn reset_handles(&mut self) {
        // hypot does not overflow for large finite handles.
        let left_length = self.left.x.hypot(self.left.y);
        let right_length = self.right.x.hypot(self.right.y);
        let length = left_length * 0.5 + right_length * 0.5;

        if length == 0.0 || !length.is_finite() {
            self.left = ControlPoint::DEFAULT_LEFT_HANDLE;
            self.right = ControlPoint::DEFAULT_RIGHT_HANDLE;
            return;
        }

        let direction = if left_length > 0.0 {
            self.left / left_length
        } else {
            -self.right / right_length
        };

        self.left = direction * length;
        self.right = -self.left;
    }
}

impl AsRef<ControlPoint> for ControlPoint {
    fn as_ref(&self) -> &ControlPoint {
        self
    }
}

impl AsMut<ControlPoint> for ControlPoint {
    fn as_mut(&mut self) -> &mut ControlPoint {
        self
    }
}

/// Values a [`Curve`](crate::Curve) can store as its points.
///
/// Anything exposing a [`ControlPoint`] through `AsRef` and `AsMut` qualifies, which lets a presentation
/// layer keep its own state (selection, hover, cached shapes) next to each point. The
/// curve only ever reads and writes the `ControlPoint` part.
pub trait CurvePoint: AsRef<ControlPoint> + AsMut<ControlPoint> {}

impl<T: AsRef<ControlPoint> + AsMut<ControlPoint>> CurvePoint for T {}

pub(crate) fn is_finite(v: Vector) -> bool {
    v.x.is_finite() && v.y.is_finite()
}

#[cfg(test)]
use crate::math::{point, vector};

#[cfg(test)]
fn default_handles() -> (Vector, Vector) {
    (vector(-0.5, 0.0), vector(0.5, 0.0))
}

#[test]
fn default_point() {
    let p = ControlPoint::new(PointId(3), point(1.0, 2.0));
    assert_eq!(p.id(), PointId(3));
    assert_eq!(p.position(), point(1.0, 2.0));
    assert_eq!((p.left_handle(), p.right_handle()), default_handles());
    assert!(!p.is_symmetric());
    assert_eq!(p.handle_position(Side::Left), point(0.5, 2.0));
    assert_eq!(p.handle_position(Side::Right), point(1.5, 2.0));
}

#[test]
fn handles_are_independent_by_default() {
    let mut p = ControlPoint::new(PointId(0), point(0.0, 0.0));
    p.set_handle(Side::Left, vector(-1.0, -2.0)).unwrap();
    assert_eq!(p.left_handle(), vector(-1.0, -2.0));
    assert_eq!(p.right_handle(), vector(0.5, 0.0));

    p.set_handle_position(Side::Right, point(3.0, 1.0)).unwrap();
    assert_eq!(p.right_handle(), vector(3.0, 1.0));
    assert_eq!(p.left_handle(), vector(-1.0, -2.0));
}

#[test]
fn symmetric_handles_mirror() {
    let mut p = ControlPoint::new(PointId(0), point(2.0, 2.0));
    p.set_symmetric(true);

    p.set_handle(Side::Right, vector(0.3, 0.7)).unwrap();
    assert_eq!(p.left_handle(), vector(-0.3, -0.7));

    p.set_handle(Side::Left, vector(-1.5, 0.25)).unwrap();
    assert_eq!(p.right_handle(), vector(1.5, -0.25));

    p.set_symmetric(false);
    p.set_handle(Side::Left, vector(-1.0, 0.0)).unwrap();
    assert_eq!(p.right_handle(), vector(1.5, -0.25));
}

#[test]
fn reset_handles_averages_lengths() {
    let mut p = ControlPoint::new(PointId(0), point(0.0, 0.0));
    p.set_handle(Side::Left, vector(0.0, 1.0)).unwrap();
    p.set_handle(Side::Right, vector(3.0, 0.0)).unwrap();

    p.set_symmetric(true);
    assert_eq!(p.left_handle(), vector(0.0, 2.0));
    assert_eq!(p.right_handle(), -p.left_handle());
}

#[test]
fn reset_handles_right_is_exact_negation() {
    let lefts = [vector(-0.3, 0.1), vector(-7.0, 3.3), vector(1e-3, -2.0), vector(0.0, 0.0)];
    let rights = [vector(0.9, 0.2), vector(0.0, 0.0), vector(0.123, 4.56)];

    for &left in &lefts {
        for &right in &rights {
            let mut p = ControlPoint::new(PointId(0), point(0.5, 0.5));
            p.set_handle(Side::Left, left).unwrap();
            p.set_handle(Side::Right, right).unwrap();
            p.set_symmetric(true);
            p.reset_handles();

            assert_eq!(p.right_handle(), -p.left_handle());
            let expected = match (left.length() + right.length()) * 0.5 {
                l if l == 0.0 => 0.5,
                l => l,
            };
            assert!((p.left_handle().length() - expected).abs() < 1e-12);
        }
    }
}

#[test]
fn zero_handles_reset_to_defaults() {
    let mut p = ControlPoint::new(PointId(0), point(0.0, 0.0));
    p.set_handle(Side::Left, vector(0.0, 0.0)).unwrap();
    p.set_handle(Side::Right, vector(0.0, 0.0)).unwrap();
    p.reset_handles();

    assert_eq!((p.left_handle(), p.right_handle()), default_handles());
}

#[test]
fn reset_huge_handles() {
    let mut p = ControlPoint::new(PointId(0), point(0.0, 0.0));
    p.set_handle(Side::Left, vector(-1e200, 0.0)).unwrap();
    p.set_handle(Side::Right, vector(1e200, 0.0)).unwrap();
    p.reset_handles();

    assert!(is_finite(p.left_handle()));
    assert!(is_finite(p.right_handle()));
    assert_eq!(p.left_handle(), vector(-1e200, 0.0));
    assert_eq!(p.right_handle(), -p.left_handle());

    p.set_symmetric(false);
    p.set_handle(Side::Left, vector(-f64::MAX, f64::MAX)).unwrap();
    p.set_handle(Side::Right, vector(f64::MAX, 0.0)).unwrap();
    p.set_symmetric(true);

    assert!(is_finite(p.left_handle()));
    assert_eq!(p.right_handle(), -p.left_handle());
}

#[test]
fn non_finite_values_are_rejected() {
    let mut p = ControlPoint::new(PointId(0), point(0.0, 0.0));
    let before = p;

    assert!(p.set_handle(Side::Left, vector(f64::NAN, 0.0)).is_err());
    assert!(p.set_handle(Side::Right, vector(0.0, f64::INFINITY)).is_err());
    assert!(p.set_position(point(f64::NEG_INFINITY, 0.0)).is_err());
    assert!(p.set_handle_position(Side::Left, point(f64::NAN, f64::NAN)).is_err());

    assert_eq!(p, before);
}

#[test]
fn point_id_debug() {
    assert_eq!(format!("{:?}", PointId(12)), "#12");
}
