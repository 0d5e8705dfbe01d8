//! Pattern detection seam between the loop and the cv crate.

use dashbot_cv::{MatchOutcome, TemplateCache, TemplateMatcher};
use image::GrayImage;
use tracing::debug;

/// Evaluates one pattern against one frame.
pub trait PatternDetector {
    fn detect(&mut self, frame: &GrayImage, pattern: &str) -> MatchOutcome;
}

/// Cache-backed detector.
///
/// A pattern missing from the cache is a no-match for that cycle, never an
/// error; the remaining bindings still get evaluated.
pub struct TemplateDetector {
    cache: TemplateCache,
    matcher: TemplateMatcher,
}

impl TemplateDetector {
    pub fn new(cache: TemplateCache, matcher: TemplateMatcher) -> Self {
        Self { cache, matcher }
    }
}

impl PatternDetector for TemplateDetector {
    fn detect(&mut self, frame: &GrayImage, pattern: &str) -> MatchOutcome {
        match self.cache.get(pattern) {
            Some(template) => self.matcher.find(frame, template),
            None => {
                debug!(pattern, "template not loaded, treated as no match");
                MatchOutcome::no_match()
            }
        }
    }
}
