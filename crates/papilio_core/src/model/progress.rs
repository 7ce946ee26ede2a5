//! Transformation milestones derived from completed tasks.
//!
//! Stages follow the product journey: awareness (caterpillar), planning
//! (chrysalis), momentum (butterfly). Nothing here is persisted.

use serde::Serialize;

/// Points at which the chrysalis stage begins.
pub const CHRYSALIS_THRESHOLD: usize = 5;
/// Points at which the butterfly stage begins.
pub const BUTTERFLY_THRESHOLD: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformationStage {
    Caterpillar,
    Chrysalis,
    Butterfly,
}

impl TransformationStage {
    pub fn from_points(points: usize) -> Self {
        if points >= BUTTERFLY_THRESHOLD {
            Self::Butterfly
        } else if points >= CHRYSALIS_THRESHOLD {
            Self::Chrysalis
        } else {
            Self::Caterpillar
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Caterpillar => "caterpillar",
            Self::Chrysalis => "chrysalis",
            Self::Butterfly => "butterfly",
        }
    }

    /// Points still missing before the next stage; `None` at the last stage.
    pub fn points_to_next(points: usize) -> Option<usize> {
        match Self::from_points(points) {
            Self::Caterpillar => Some(CHRYSALIS_THRESHOLD - points),
            Self::Chrysalis => Some(BUTTERFLY_THRESHOLD - points),
            Self::Butterfly => None,
        }
    }
}
