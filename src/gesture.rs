//! Input injection boundary.

use dashbot_core::{ActionKind, Region, Swipe};
use enigo::{Button, Coordinate, Direction, Enigo, Mouse, Settings};
use std::thread;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GestureError {
    #[error("input backend unavailable: {0}")]
    Backend(String),
    #[error("gesture injection failed: {0}")]
    Injection(#[from] enigo::InputError),
}

/// Performs the physical gesture bound to an action.
///
/// Blocking until the gesture completes; safe to call repeatedly. An
/// injection failure is recoverable for the loop (the cycle is abandoned,
/// the run continues).
pub trait ActionExecutor {
    fn execute(&mut self, action: ActionKind) -> Result<(), GestureError>;
}

/// Intermediate mouse positions per swipe.
const SWIPE_STEPS: u32 = 10;

/// enigo-backed swipe executor.
///
/// Derives each swipe from the configured capture region and drives it as
/// press, interpolated drag, release.
pub struct SwipeExecutor {
    enigo: Enigo,
    region: Region,
    duration: Duration,
}

impl SwipeExecutor {
    pub fn new(region: Region, duration: Duration) -> Result<Self, GestureError> {
        let enigo =
            Enigo::new(&Settings::default()).map_err(|e| GestureError::Backend(e.to_string()))?;

        Ok(Self {
            enigo,
            region,
            duration,
        })
    }

    fn drag(&mut self, swipe: Swipe) -> Result<(), GestureError> {
        self.enigo
            .move_mouse(swipe.start.x, swipe.start.y, Coordinate::Abs)?;
        self.enigo.button(Button::Left, Direction::Press)?;

        let dragged = self.drag_to(swipe);
        // Release even if the drag failed, otherwise the button stays held.
        let released = self.enigo.button(Button::Left, Direction::Release);

        dragged?;
        released?;
        Ok(())
    }

    fn drag_to(&mut self, swipe: Swipe) -> Result<(), GestureError> {
        let pause = swipe.duration / SWIPE_STEPS;

        for step in 1..=SWIPE_STEPS {
            thread::sleep(pause);
            let t = step as f32 / SWIPE_STEPS as f32;
            let x = swipe.start.x + ((swipe.end.x - swipe.start.x) as f32 * t).round() as i32;
            let y = swipe.start.y + ((swipe.end.y - swipe.start.y) as f32 * t).round() as i32;
            self.enigo.move_mouse(x, y, Coordinate::Abs)?;
        }

        Ok(())
    }
}

impl ActionExecutor for SwipeExecutor {
    fn execute(&mut self, action: ActionKind) -> Result<(), GestureError> {
        self.drag(action.swipe(&self.region, self.duration))
    }
}
