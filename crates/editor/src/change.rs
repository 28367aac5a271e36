use crate::PointId;

/// A mutation applied to a [`Curve`](crate::Curve), as reported to its observer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum CurveChange {
    Inserted { id: PointId, index: usize },
    Removed { id: PointId, index: usize },
    Moved { id: PointId },
    HandlesChanged { id: PointId },
    /// The points were reordered along the x axis.
    Sorted,
    /// A point was handed out for direct modification.
    Modified { id: PointId },
}

impl CurveChange {
    /// The point affected by this change, if it is about a single point.
    pub fn point(&self) -> Option<PointId> {
        match *self {
            CurveChange::Inserted { id, .. }
            | CurveChange::Removed { id, .. }
            | CurveChange::Moved { id }
            | CurveChange::HandlesChanged { id }
            | CurveChange::Modified { id } => Some(id),
            CurveChange::Sorted => None,
        }
    }
}
