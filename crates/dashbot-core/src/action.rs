//! The closed set of avoidance gestures.
//!
//! Every action the bot can take is enumerated here and mapped to a swipe
//! whose coordinates are derived from the configured capture region, so an
//! unknown action name in the configuration is rejected at startup instead
//! of at first dispatch.

use crate::geometry::{Point, Region};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// Swipe anchors as fractions of the capture region.
const SWIPE_LOW_Y: f32 = 0.70;
const SWIPE_HIGH_Y: f32 = 0.47;
const LATERAL_Y: f32 = 0.70;
const LATERAL_NEAR_X: f32 = 0.28;
const LATERAL_FAR_X: f32 = 0.69;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Jump,
    Slide,
    MoveLeft,
    MoveRight,
}

impl ActionKind {
    /// Derive the concrete gesture for this action within `region`.
    ///
    /// Jump and slide are vertical swipes centered horizontally; the
    /// lateral moves are horizontal swipes at a fixed height.
    pub fn swipe(self, region: &Region, duration: Duration) -> Swipe {
        let (start, end) = match self {
            ActionKind::Jump => (
                region.at(0.5, SWIPE_LOW_Y),
                region.at(0.5, SWIPE_HIGH_Y),
            ),
            ActionKind::Slide => (
                region.at(0.5, SWIPE_HIGH_Y),
                region.at(0.5, SWIPE_LOW_Y),
            ),
            ActionKind::MoveLeft => (
                region.at(LATERAL_FAR_X, LATERAL_Y),
                region.at(LATERAL_NEAR_X, LATERAL_Y),
            ),
            ActionKind::MoveRight => (
                region.at(LATERAL_NEAR_X, LATERAL_Y),
                region.at(LATERAL_FAR_X, LATERAL_Y),
            ),
        };

        Swipe {
            start,
            end,
            duration,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ActionKind::Jump => "jump",
            ActionKind::Slide => "slide",
            ActionKind::MoveLeft => "move_left",
            ActionKind::MoveRight => "move_right",
        }
    }
}

/// A drag gesture from `start` to `end` over `duration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swipe {
    pub start: Point,
    pub end: Point,
    pub duration: Duration,
}
