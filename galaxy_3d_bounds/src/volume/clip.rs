/// Classification results shared by every volume test.

/// Result of a 3-way volume classification.
///
/// `container.clip_xxx(&volume)` describes where `volume` lies with respect
/// to `container`:
/// - `Outside` → no common point, the volume can be skipped
/// - `Inside` → fully contained, no further testing needed
/// - `Intersect` → partial overlap, finer tests may be needed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipResult {
    /// Volume is entirely inside the container
    Inside,
    /// Volume is entirely outside the container
    Outside,
    /// Volume straddles the container boundary
    Intersect,
}

impl ClipResult {
    /// Combine the per-plane results of a convex container: any `Outside`
    /// wins, then any `Intersect`.
    pub fn merge(self, other: ClipResult) -> ClipResult {
        match (self, other) {
            (ClipResult::Outside, _) | (_, ClipResult::Outside) => ClipResult::Outside,
            (ClipResult::Intersect, _) | (_, ClipResult::Intersect) => ClipResult::Intersect,
            _ => ClipResult::Inside,
        }
    }

    /// `true` unless the volume is entirely outside.
    pub fn is_visible(self) -> bool {
        self != ClipResult::Outside
    }
}

/// Side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaneSide {
    /// Positive half-space (beyond `EPSILON`)
    Front,
    /// Negative half-space (beyond `EPSILON`)
    Back,
    /// Within `EPSILON` of the plane
    On,
}
