//! Obstacle templates and match outcomes.

pub mod cache;
pub mod matcher;

pub use cache::TemplateCache;
pub use matcher::TemplateMatcher;

use image::GrayImage;

/// A reference obstacle image, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Template {
    pub name: String,
    pub image: GrayImage,
}

impl Template {
    pub fn new(name: impl Into<String>, image: GrayImage) -> Self {
        Self {
            name: name.into(),
            image,
        }
    }
}

/// Result of evaluating one template against one frame.
///
/// Ephemeral: produced per (frame, pattern) evaluation and discarded with
/// the cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOutcome {
    pub matched: bool,
    /// Top-left corner of the best alignment, only present on a match.
    pub location: Option<(u32, u32)>,
    /// Best normalized correlation score over all alignments.
    pub score: f32,
}

impl MatchOutcome {
    /// Threshold decision. A score exactly at the threshold matches.
    pub fn from_score(score: f32, location: (u32, u32), threshold: f32) -> Self {
        if score >= threshold {
            Self {
                matched: true,
                location: Some(location),
                score,
            }
        } else {
            Self {
                matched: false,
                location: None,
                score,
            }
        }
    }

    /// Outcome for a pattern that could not be evaluated this cycle.
    pub fn no_match() -> Self {
        Self {
            matched: false,
            location: None,
            score: 0.0,
        }
    }
}
