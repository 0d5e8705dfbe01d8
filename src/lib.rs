//! dashbot: a visual-reaction bot for an endless runner.
//!
//! The bot polls a fixed screen region, matches each frame against an
//! ordered set of obstacle templates, and performs the swipe gesture bound
//! to the first obstacle found. Capture, matching and input injection sit
//! behind the [`source::FrameSource`], [`detect::PatternDetector`] and
//! [`gesture::ActionExecutor`] seams so the loop can be driven by fakes in
//! tests.

pub mod cancel;
pub mod detect;
pub mod gesture;
pub mod reactor;
pub mod source;

pub use cancel::CancelToken;
pub use reactor::{ReactionLoop, StopReason};
