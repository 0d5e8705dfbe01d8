//! Obstacle detection primitives for dashbot.
//!
//! Template storage and normalized cross-correlation matching over
//! grayscale frames. Matching is a pure function of the frame and the
//! reference image, so everything here is unit-testable with synthetic
//! images.

pub mod template;

pub use template::{MatchOutcome, Template, TemplateCache, TemplateMatcher};

pub type Result<T> = anyhow::Result<T>;
