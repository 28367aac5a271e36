use crate::geom::SolveOptions;
use crate::math::{point, Box2D, CubicSegment, Point, Vector};
use crate::point::is_finite;
use crate::{
    bounding_range, segment_between, value_at, ControlPoint, CurveChange, CurvePoint,
    CurveSnapshot, EditError, PointId, Segments, Side,
};

use log::debug;

use std::cmp::Ordering;
use std::fmt;

/// Builds the points stored in a [`Curve`].
///
/// Implemented for any `FnMut(PointId, Point) -> P` closure. The default factory is
/// [`ControlPoint::new`].
pub trait PointFactory<P> {
    fn create_point(&mut self, id: PointId, position: Point) -> P;
}

impl<P, F> PointFactory<P> for F
where
    F: FnMut(PointId, Point) -> P,
{
    fn create_point(&mut self, id: PointId, position: Point) -> P {
        self(id, position)
    }
}

/// An editable piecewise cubic curve.
///
/// The points are sorted along the x axis, and there are always at least two of them.
/// See the [crate documentation](crate) for an overview.
///
/// `P` is the type of the stored points. It is [`ControlPoint`] unless the curve is
/// created with [`Curve::with_factory`].
pub struct Curve<P = ControlPoint> {
    points: Vec<P>,
    factory: Box<dyn PointFactory<P>>,
    next_id: u32,
    revision: u64,
    observer: Option<Box<dyn FnMut(&CurveChange)>>,
    solve_options: SolveOptions<f64>,
}

impl Curve<ControlPoint> {
    /// A curve going from `(0, 0)` to `(1, 1)` with default handles.
    pub fn new() -> Self {
        Curve::with_factory(ControlPoint::new)
    }

    /// A curve through the given positions, which do not need to be sorted.
    ///
    /// The point built from `positions[i]` gets the id `PointId(i)`.
    ///
    /// Fails with `InvalidArgument` if there are fewer than two positions or if one of
    /// them is not finite.
    pub fn from_positions(positions: &[Point]) -> Result<Self, EditError> {
        Curve::from_positions_with_factory(positions, ControlPoint::new)
    }
}

impl Default for Curve<ControlPoint> {
    fn default() -> Self {
        Curve::new()
    }
}

impl<P: CurvePoint> Curve<P> {
    /// A curve going from `(0, 0)` to `(1, 1)`, whose points are built by `factory`.
    pub fn with_factory<F>(factory: F) -> Self
    where
        F: PointFactory<P> + 'static,
    {
        let mut curve = Curve::empty(Box::new(factory));
        curve.push_point(point(0.0, 0.0));
        curve.push_point(point(1.0, 1.0));

        curve
    }

    /// Same as [`Curve::from_positions`] with a custom point factory.
    ///
    /// The point built from `positions[i]` gets the id `PointId(i)`.
    pub fn from_positions_with_factory<F>(positions: &[Point], factory: F) -> Result<Self, EditError>
    where
        F: PointFactory<P> + 'static,
    {
        if positions.len() < 2 {
            return Err(EditError::InvalidArgument("a curve needs at least two points"));
        }
        if !positions.iter().all(|p| is_finite(p.to_vector())) {
            return Err(EditError::InvalidArgument("control point position must be finite"));
        }

        let mut curve = Curve::empty(Box::new(factory));
        for position in positions {
            curve.push_point(*position);
        }
        curve.sort_points();

        Ok(curve)
    }

    fn empty(factory: Box<dyn PointFactory<P>>) -> Self {
        Curve {
            points: Vec::new(),
            factory,
            next_id: 0,
            revision: 0,
            observer: None,
            solve_options: SolveOptions::default(),
        }
    }

    fn push_point(&mut self, position: Point) {
        let id = self.allocate_id();
        let point = self.factory.create_point(id, position);
        self.points.push(point);
    }

    fn allocate_id(&mut self) -> PointId {
        let id = PointId(self.next_id);
        self.next_id += 1;
        id
    }

    /// The points, sorted along x unless a point was moved since the last [`sort`](Self::sort).
    #[inline]
    pub fn points(&self) -> &[P] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false, a curve has at least two points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn index_of(&self, id: PointId) -> Option<usize> {
        self.points.iter().position(|p| p.as_ref().id() == id)
    }

    pub fn point(&self, id: PointId) -> Option<&P> {
        self.points.iter().find(|p| p.as_ref().id() == id)
    }

    /// Direct access to a point, for example to update presentation state kept in it.
    ///
    /// This counts as a modification of the point. Changing its position through the
    /// returned reference requires a call to [`sort`](Self::sort) afterwards.
    pub fn point_mut(&mut self, id: PointId) -> Option<&mut P> {
        let index = self.index_of(id)?;
        self.notify(CurveChange::Modified { id });

        Some(&mut self.points[index])
    }

    /// Insert a point with default handles.
    ///
    /// The point is placed after all points with a smaller or equal x, which keeps the
    /// curve sorted and keeps points sharing an x in insertion order.
    ///
    /// Returns the index and the id of the new point. Fails with `InvalidArgument`,
    /// leaving the curve untouched, if the position is not finite.
    pub fn insert(&mut self, position: Point) -> Result<(usize, PointId), EditError> {
        if !is_finite(position.to_vector()) {
            return Err(EditError::InvalidArgument("control point position must be finite"));
        }

        let index = self
            .points
            .iter()
            .filter(|p| p.as_ref().x() <= position.x)
            .count();

        let id = self.allocate_id();
        let new_point = self.factory.create_point(id, position);
        self.points.insert(index, new_point);

        debug!("Inserted control point {:?} at index {} ({:?})", id, index, position);
        self.notify(CurveChange::Inserted { id, index });

        Ok((index, id))
    }

    /// Insert a point, see [`insert`](Self::insert).
    pub fn add_point(&mut self, position: Point) -> Result<PointId, EditError> {
        self.insert(position).map(|(_, id)| id)
    }

    /// Remove a point.
    ///
    /// Returns false and does nothing if the point does not exist or if the curve only
    /// has two points left.
    pub fn delete(&mut self, id: PointId) -> bool {
        if self.points.len() <= 2 {
            debug!("Refusing to delete {:?}, the curve needs at least two points", id);
            return false;
        }

        let index = match self.index_of(id) {
            Some(index) => index,
            None => {
                return false;
            }
        };

        self.points.remove(index);

        debug!("Deleted control point {:?} from index {}", id, index);
        self.notify(CurveChange::Removed { id, index });

        true
    }

    /// Restore the ordering along x after points were moved.
    ///
    /// The sort is stable: points sharing an x keep their relative order.
    pub fn sort(&mut self) {
        if self.sort_points() {
            debug!("Sorted {} control points", self.points.len());
            self.notify(CurveChange::Sorted);
        }
    }

    fn sort_points(&mut self) -> bool {
        let sorted = self
            .points
            .windows(2)
            .all(|pair| pair[0].as_ref().x() <= pair[1].as_ref().x());
        if sorted {
            return false;
        }

        self.points.sort_by(|a, b| {
            a.as_ref()
                .x()
                .partial_cmp(&b.as_ref().x())
                .unwrap_or(Ordering::Equal)
        });

        true
    }

    /// Move a point, handles included.
    ///
    /// The curve is not re-sorted, call [`sort`](Self::sort) once done moving points,
    /// or use [`move_point`](Self::move_point).
    pub fn set_position(&mut self, id: PointId, x: f64, y: f64) -> Result<(), EditError> {
        self.control_point_mut(id)?.set_position(point(x, y))?;
        self.notify(CurveChange::Moved { id });

        Ok(())
    }

    /// Move a point and restore the ordering. Returns the new index of the point.
    pub fn move_point(&mut self, id: PointId, x: f64, y: f64) -> Result<usize, EditError> {
        self.set_position(id, x, y)?;
        self.sort();

        self.index_of(id).ok_or(EditError::UnknownPoint(id))
    }

    /// Set one of a point's handles, relative to its position.
    ///
    /// If the point is symmetric, the other handle becomes the negation of `handle`.
    pub fn set_handle(&mut self, id: PointId, side: Side, handle: Vector) -> Result<(), EditError> {
        self.control_point_mut(id)?.set_handle(side, handle)?;
        self.notify(CurveChange::HandlesChanged { id });

        Ok(())
    }

    /// Set the absolute position of the end of one of a point's handles.
    pub fn set_handle_position(&mut self, id: PointId, side: Side, position: Point) -> Result<(), EditError> {
        self.control_point_mut(id)?.set_handle_position(side, position)?;
        self.notify(CurveChange::HandlesChanged { id });

        Ok(())
    }

    /// Turn the handle symmetry of a point on or off.
    ///
    /// Turning it on resets the handles, see [`ControlPoint::reset_handles`].
    pub fn set_symmetric(&mut self, id: PointId, symmetric: bool) -> Result<(), EditError> {
        self.control_point_mut(id)?.set_symmetric(symmetric);
        self.notify(CurveChange::HandlesChanged { id });

        Ok(())
    }

    /// See [`ControlPoint::reset_handles`].
    pub fn reset_handles(&mut self, id: PointId) -> Result<(), EditError> {
        self.control_point_mut(id)?.reset_handles();
        self.notify(CurveChange::HandlesChanged { id });

        Ok(())
    }

    fn control_point_mut(&mut self, id: PointId) -> Result<&mut ControlPoint, EditError> {
        self.points
            .iter_mut()
            .map(|p| p.as_mut())
            .find(|p| p.id() == id)
            .ok_or(EditError::UnknownPoint(id))
    }

    /// The y coordinate of the curve at `x`.
    ///
    /// Before the first point and after the last one, the curve is flat. See
    /// [`value_at`](crate::value_at) for the details.
    pub fn value_at(&self, x: f64) -> Result<f64, EditError> {
        value_at(&self.points, x, &self.solve_options)
    }

    /// Evaluate the curve at `count` evenly spaced x coordinates between the first and the
    /// last point.
    pub fn sample(&self, count: usize) -> Result<Vec<Point>, EditError> {
        let range = self.bounding_range();
        let (min_x, max_x) = (range.min.x, range.max.x);

        let mut result = Vec::with_capacity(count);
        for i in 0..count {
            let x = if count == 1 {
                min_x
            } else {
                min_x + (max_x - min_x) * (i as f64 / (count - 1) as f64)
            };
            result.push(point(x, self.value_at(x)?));
        }

        Ok(result)
    }

    /// The smallest rectangle containing all points (handles excluded).
    pub fn bounding_range(&self) -> Box2D {
        bounding_range(&self.points).unwrap_or_else(Box2D::zero)
    }

    /// The cubic segments between consecutive points.
    pub fn segments(&self) -> Segments<P> {
        Segments::new(&self.points)
    }

    /// The cubic segment going from the point at `index` to the next one.
    pub fn segment(&self, index: usize) -> Option<CubicSegment> {
        let from = self.points.get(index)?;
        let to = self.points.get(index + 1)?;

        Some(segment_between(from.as_ref(), to.as_ref()))
    }

    /// Copy the points into an immutable snapshot.
    pub fn snapshot(&self) -> CurveSnapshot {
        let points = self.points.iter().map(|p| *p.as_ref()).collect();
        CurveSnapshot::new(points, self.revision, self.solve_options)
    }

    /// A counter that increases with every mutation of the curve.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Register a callback invoked after every mutation, replacing the previous one.
    pub fn set_observer<F>(&mut self, observer: F)
    where
        F: FnMut(&CurveChange) + 'static,
    {
        self.observer = Some(Box::new(observer));
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    pub fn solve_options(&self) -> &SolveOptions<f64> {
        &self.solve_options
    }

    /// Options of the x to parameter lookup used by [`value_at`](Self::value_at).
    pub fn set_solve_options(&mut self, options: SolveOptions<f64>) {
        self.solve_options = options;
    }

    fn notify(&mut self, change: CurveChange) {
        self.revision += 1;
        if let Some(observer) = &mut self.observer {
            observer(&change);
        }
    }
}

impl<P: fmt::Debug> fmt::Debug for Curve<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Curve")
            .field("points", &self.points)
            .field("revision", &self.revision)
            .finish()
    }
}

#[cfg(test)]
use crate::math::vector;
#[cfg(test)]
use std::{cell::RefCell, rc::Rc};

#[cfg(test)]
fn xs<P: CurvePoint>(curve: &Curve<P>) -> Vec<f64> {
    curve.points().iter().map(|p| p.as_ref().x()).collect()
}

#[test]
fn new_curve() {
    let curve = Curve::new();
    assert_eq!(curve.len(), 2);
    assert!(!curve.is_empty());
    assert_eq!(curve.points()[0].position(), point(0.0, 0.0));
    assert_eq!(curve.points()[1].position(), point(1.0, 1.0));
    assert_eq!(curve.points()[0].left_handle(), vector(-0.5, 0.0));
    assert_eq!(curve.points()[0].right_handle(), vector(0.5, 0.0));
    assert_eq!(curve.revision(), 0);
}

#[test]
fn insert_between() {
    let mut curve = Curve::new();
    let (index, id) = curve.insert(point(0.5, 0.2)).unwrap();

    assert_eq!(index, 1);
    assert_eq!(xs(&curve), [0.0, 0.5, 1.0]);
    assert_eq!(curve.index_of(id), Some(1));
    assert_eq!(curve.point(id).unwrap().position(), point(0.5, 0.2));
}

#[test]
fn insert_equal_x_goes_last() {
    let mut curve = Curve::new();
    let a = curve.add_point(point(0.5, 0.1)).unwrap();
    let b = curve.add_point(point(0.5, 0.2)).unwrap();
    let (index, c) = curve.insert(point(0.5, 0.3)).unwrap();

    assert_eq!(index, 3);
    let ids: Vec<PointId> = curve.points().iter().map(|p| p.id()).collect();
    assert_eq!(ids[1..4], [a, b, c]);

    let (index, _) = curve.insert(point(0.0, 5.0)).unwrap();
    assert_eq!(index, 1);
    let (index, _) = curve.insert(point(-1.0, 5.0)).unwrap();
    assert_eq!(index, 0);
    let (index, _) = curve.insert(point(7.0, 5.0)).unwrap();
    assert_eq!(index, curve.len() - 1);
}

#[test]
fn insert_non_finite_fails() {
    let mut curve = Curve::new();
    let positions = [
        point(f64::NAN, 0.5),
        point(0.5, f64::NAN),
        point(f64::INFINITY, 0.0),
        point(0.0, f64::NEG_INFINITY),
    ];

    for position in &positions {
        assert!(matches!(curve.insert(*position), Err(EditError::InvalidArgument(_))));
    }

    assert_eq!(curve.len(), 2);
    assert_eq!(curve.revision(), 0);
}

#[test]
fn delete_keeps_two_points() {
    let mut curve = Curve::new();
    let first = curve.points()[0].id();
    let last = curve.points()[1].id();

    assert!(!curve.delete(first));
    assert!(!curve.delete(last));
    assert_eq!(curve.len(), 2);
    assert_eq!(curve.revision(), 0);

    let id = curve.add_point(point(0.5, 0.5)).unwrap();
    assert!(!curve.delete(PointId(1000)));
    assert!(curve.delete(first));
    assert_eq!(curve.len(), 2);
    assert!(!curve.delete(id));
    assert_eq!(curve.points()[0].id(), id);
}

#[test]
fn sort_after_moves() {
    let mut curve = Curve::new();
    let mut ids = Vec::new();
    let mut seed: u32 = 12345;
    let mut next = || {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12345);
        (seed >> 8) as f64 / (1u32 << 24) as f64
    };

    for _ in 0..50 {
        ids.push(curve.add_point(point(next(), next())).unwrap());
    }
    for id in &ids {
        let (x, y) = (next() * 4.0 - 2.0, next());
        curve.set_position(*id, x, y).unwrap();
    }

    curve.sort();
    let sorted = xs(&curve);
    assert!(sorted.windows(2).all(|w| w[0] <= w[1]));

    // Ids survive the reordering.
    for id in &ids {
        let index = curve.index_of(*id).unwrap();
        assert_eq!(curve.points()[index].id(), *id);
    }
}

#[test]
fn sort_is_stable() {
    let mut curve = Curve::new();
    let a = curve.add_point(point(0.9, 0.0)).unwrap();
    let b = curve.add_point(point(0.8, 0.0)).unwrap();
    let c = curve.add_point(point(0.7, 0.0)).unwrap();

    // [c, b, a] -> [a, c, b]
    curve.set_position(c, 0.95, 0.0).unwrap();
    curve.set_position(b, 0.95, 0.5).unwrap();
    curve.sort();

    let ids: Vec<PointId> = curve.points().iter().map(|p| p.id()).collect();
    assert_eq!(ids[1..4], [a, c, b]);
}

#[test]
fn move_point_sorts() {
    let mut curve = Curve::new();
    let id = curve.add_point(point(0.25, 0.25)).unwrap();
    curve.add_point(point(0.75, 0.75)).unwrap();

    assert_eq!(curve.move_point(id, 0.9, 0.1).unwrap(), 2);
    assert_eq!(xs(&curve), [0.0, 0.75, 0.9, 1.0]);
    assert_eq!(curve.move_point(PointId(99), 0.0, 0.0), Err(EditError::UnknownPoint(PointId(99))));
}

#[test]
fn set_position_does_not_sort() {
    let mut curve = Curve::new();
    let id = curve.add_point(point(0.25, 0.25)).unwrap();
    curve.set_position(id, 2.0, 0.0).unwrap();
    assert_eq!(xs(&curve), [0.0, 2.0, 1.0]);
    assert!(curve.set_position(id, f64::NAN, 0.0).is_err());
    assert_eq!(curve.point(id).unwrap().position(), point(2.0, 0.0));
}

#[test]
fn handles() {
    let mut curve = Curve::new();
    let id = curve.add_point(point(0.5, 0.5)).unwrap();

    curve.set_handle(id, Side::Left, vector(-0.1, -0.3)).unwrap();
    curve.set_handle(id, Side::Right, vector(0.2, 0.1)).unwrap();
    assert_eq!(curve.point(id).unwrap().left_handle(), vector(-0.1, -0.3));

    curve.set_symmetric(id, true).unwrap();
    curve.reset_handles(id).unwrap();
    let p = curve.point(id).unwrap();
    assert!(p.is_symmetric());
    assert_eq!(p.right_handle(), -p.left_handle());

    curve.set_handle_position(id, Side::Right, point(0.75, 0.5)).unwrap();
    let p = curve.point(id).unwrap();
    assert_eq!(p.right_handle(), vector(0.25, 0.0));
    assert_eq!(p.left_handle(), vector(-0.25, 0.0));

    assert!(curve.set_handle(id, Side::Left, vector(f64::NAN, 0.0)).is_err());
    assert_eq!(
        curve.set_symmetric(PointId(42), true),
        Err(EditError::UnknownPoint(PointId(42)))
    );
}

#[test]
fn values() {
    let mut curve = Curve::new();
    assert_eq!(curve.value_at(0.5).unwrap(), 0.5);
    assert_eq!(curve.value_at(0.0).unwrap(), 0.0);
    assert_eq!(curve.value_at(1.0).unwrap(), 1.0);

    let id = curve.add_point(point(-2.0, 4.0)).unwrap();
    curve.add_point(point(3.0, -1.0)).unwrap();
    assert_eq!(curve.value_at(-2.0).unwrap(), 4.0);
    assert_eq!(curve.value_at(-10.0).unwrap(), 4.0);
    assert_eq!(curve.value_at(3.0).unwrap(), -1.0);
    assert_eq!(curve.value_at(30.0).unwrap(), -1.0);

    let range = curve.bounding_range();
    assert_eq!(range, Box2D::new(point(-2.0, -1.0), point(3.0, 4.0)));

    curve.move_point(id, -3.0, 2.0).unwrap();
    assert_eq!(curve.value_at(-3.0).unwrap(), 2.0);
}

#[test]
fn samples() {
    let curve = Curve::from_positions(&[point(2.0, 1.0), point(0.0, 0.0), point(1.0, 3.0)]).unwrap();
    assert_eq!(xs(&curve), [0.0, 1.0, 2.0]);

    let samples = curve.sample(5).unwrap();
    assert_eq!(samples.len(), 5);
    assert_eq!(samples[0], point(0.0, 0.0));
    assert_eq!(samples[2], point(1.0, 3.0));
    assert_eq!(samples[4], point(2.0, 1.0));

    assert_eq!(curve.sample(1).unwrap(), [point(0.0, 0.0)]);
    assert!(curve.sample(0).unwrap().is_empty());
    assert_eq!(curve.segments().count(), 2);
    assert_eq!(curve.segment(1).unwrap().to, point(2.0, 1.0));
    assert!(curve.segment(2).is_none());

    assert!(Curve::from_positions(&[point(0.0, 0.0)]).is_err());
    assert!(Curve::from_positions(&[point(0.0, 0.0), point(f64::NAN, 0.0)]).is_err());
}

#[test]
fn from_positions_ids() {
    let positions = [point(3.0, 0.0), point(-1.0, 1.0), point(2.0, 2.0), point(-1.0, 3.0)];
    let curve = Curve::from_positions(&positions).unwrap();

    assert_eq!(xs(&curve), [-1.0, -1.0, 2.0, 3.0]);
    for (idx, position) in positions.iter().enumerate() {
        let p = curve.point(PointId::from_usize(idx)).unwrap();
        assert_eq!(p.position(), *position);
    }

    // Ids handed out later don't collide with the initial ones.
    let mut curve = curve;
    let id = curve.add_point(point(0.0, 0.0)).unwrap();
    assert_eq!(id, PointId(4));
}

#[test]
fn observer() {
    let changes = Rc::new(RefCell::new(Vec::new()));
    let mut curve = Curve::new();
    {
        let changes = changes.clone();
        curve.set_observer(move |change| changes.borrow_mut().push(*change));
    }

    let (index, id) = curve.insert(point(0.5, 0.5)).unwrap();
    curve.set_position(id, 2.0, 0.5).unwrap();
    curve.sort();
    curve.sort();
    curve.set_handle(id, Side::Left, vector(-0.1, 0.0)).unwrap();
    curve.delete(id);
    curve.insert(point(f64::NAN, 0.0)).unwrap_err();

    assert_eq!(
        *changes.borrow(),
        [
            CurveChange::Inserted { id, index },
            CurveChange::Moved { id },
            CurveChange::Sorted,
            CurveChange::HandlesChanged { id },
            CurveChange::Removed { id, index: 2 },
        ]
    );
    assert_eq!(curve.revision(), 5);

    curve.clear_observer();
    curve.add_point(point(0.1, 0.1)).unwrap();
    assert_eq!(changes.borrow().len(), 5);
    assert_eq!(curve.revision(), 6);
}

#[cfg(test)]
#[derive(Debug)]
struct Decorated {
    point: ControlPoint,
    selected: bool,
}

#[cfg(test)]
impl AsRef<ControlPoint> for Decorated {
    fn as_ref(&self) -> &ControlPoint {
        &self.point
    }
}

#[cfg(test)]
impl AsMut<ControlPoint> for Decorated {
    fn as_mut(&mut self) -> &mut ControlPoint {
        &mut self.point
    }
}

#[test]
fn custom_factory() {
    let mut created = 0;
    let mut curve = Curve::with_factory(move |id, position| {
        created += 1;
        Decorated {
            point: ControlPoint::new(id, position),
            selected: created > 2,
        }
    });

    assert!(curve.points().iter().all(|p| !p.selected));

    let id = curve.add_point(point(0.5, 0.25)).unwrap();
    assert!(curve.point(id).unwrap().selected);
    assert_eq!(curve.value_at(0.5).unwrap(), 0.25);

    let revision = curve.revision();
    curve.point_mut(id).unwrap().selected = false;
    assert!(curve.revision() > revision);
    assert!(curve.points().iter().all(|p| !p.selected));

    assert!(curve.delete(id));
    assert_eq!(curve.snapshot().points().len(), 2);
}
