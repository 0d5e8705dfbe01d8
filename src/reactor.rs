//! The detect-and-dispatch loop.

use crate::cancel::CancelToken;
use crate::detect::PatternDetector;
use crate::gesture::ActionExecutor;
use crate::source::FrameSource;
use anyhow::{Context, Result};
use dashbot_core::PatternBinding;
use image::GrayImage;
use std::time::Duration;
use tracing::{info, warn};

/// Why the loop left its running state cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// External interruption observed at a checkpoint.
    Cancelled,
}

/// Polls frames and dispatches at most one avoidance gesture per cycle.
///
/// Bindings are evaluated in configured order and the first match wins;
/// the remaining bindings are skipped for that cycle. Reacting to a single
/// obstacle at a time keeps the dispatch deterministic and avoids
/// conflicting simultaneous gestures when several obstacles are visible.
pub struct ReactionLoop<S, D, E> {
    source: S,
    detector: D,
    executor: E,
    bindings: Vec<PatternBinding>,
    interval: Duration,
    cancel: CancelToken,
}

impl<S, D, E> ReactionLoop<S, D, E>
where
    S: FrameSource,
    D: PatternDetector,
    E: ActionExecutor,
{
    pub fn new(
        source: S,
        detector: D,
        executor: E,
        bindings: Vec<PatternBinding>,
        interval: Duration,
        cancel: CancelToken,
    ) -> Self {
        Self {
            source,
            detector,
            executor,
            bindings,
            interval,
            cancel,
        }
    }

    /// Run until cancelled or until capture fails.
    ///
    /// Capture failure is the only fatal condition and propagates; a
    /// missing template or a failed gesture stays contained within its
    /// cycle. Cancellation is observed before each capture and during the
    /// pacing sleep, so no partially started gesture is ever abandoned.
    pub fn run(&mut self) -> Result<StopReason> {
        loop {
            if self.cancel.is_cancelled() {
                return Ok(StopReason::Cancelled);
            }

            let frame = self
                .source
                .capture()
                .context("screen capture failed, stopping")?;

            self.react(&frame);

            if self.cancel.wait_for(self.interval) {
                return Ok(StopReason::Cancelled);
            }
        }
    }

    /// One detection pass over the frame: first matching binding fires.
    fn react(&mut self, frame: &GrayImage) {
        let Self {
            bindings,
            detector,
            executor,
            ..
        } = self;

        for binding in bindings.iter() {
            let outcome = detector.detect(frame, &binding.pattern);
            if !outcome.matched {
                continue;
            }

            info!(
                pattern = %binding.pattern,
                action = binding.action.name(),
                location = ?outcome.location,
                score = outcome.score,
                "obstacle detected"
            );

            if let Err(e) = executor.execute(binding.action) {
                warn!(
                    action = binding.action.name(),
                    error = %e,
                    "gesture failed, abandoning cycle"
                );
            }
            return;
        }
    }
}
