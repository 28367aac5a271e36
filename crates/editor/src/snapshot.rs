use crate::geom::SolveOptions;
use crate::math::Box2D;
use crate::{bounding_range, value_at, ControlPoint, EditError, Segments};

use std::sync::Arc;

/// An immutable copy of a curve's points at a given revision.
///
/// Snapshots are cheap to clone and can be sent to other threads, which lets readers
/// keep evaluating a consistent curve while the original is being edited.
#[derive(Clone, Debug, PartialEq)]
pub struct CurveSnapshot {
    points: Arc<[ControlPoint]>,
    revision: u64,
    options: SolveOptions<f64>,
}

impl CurveSnapshot {
    pub(crate) fn new(points: Vec<ControlPoint>, revision: u64, options: SolveOptions<f64>) -> Self {
        CurveSnapshot {
            points: points.into(),
            revision,
            options,
        }
    }

    #[inline]
    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// The revision of the curve this snapshot was taken from.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn value_at(&self, x: f64) -> Result<f64, EditError> {
        value_at(self.points(), x, &self.options)
    }

    pub fn bounding_range(&self) -> Box2D {
        bounding_range(self.points()).unwrap_or_else(Box2D::zero)
    }

    pub fn segments(&self) -> Segments<ControlPoint> {
        Segments::new(self.points())
    }
}

#[cfg(test)]
use crate::{math::point, Curve};

#[test]
fn snapshot_is_isolated_from_edits() {
    let mut curve = Curve::new();
    let id = curve.add_point(point(0.5, 0.9)).unwrap();
    let snapshot = curve.snapshot();

    curve.set_position(id, 0.5, 0.1).unwrap();
    curve.delete(id);

    assert_eq!(snapshot.points().len(), 3);
    assert_eq!(snapshot.value_at(0.5).unwrap(), 0.9);
    assert_eq!(curve.value_at(0.5).unwrap(), 0.5);
    assert!(snapshot.revision() < curve.revision());
    assert_eq!(snapshot.segments().count(), 2);
    assert_eq!(snapshot.bounding_range(), Box2D::new(point(0.0, 0.0), point(1.0, 1.0)));
}

#[test]
fn snapshot_can_be_read_from_another_thread() {
    let curve = Curve::new();
    let snapshot = curve.snapshot();

    let handle = std::thread::spawn(move || snapshot.value_at(0.5).unwrap());
    assert_eq!(handle.join().unwrap(), 0.5);
}
