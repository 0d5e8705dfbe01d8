//! Normalized cross-correlation template matching.

use super::{MatchOutcome, Template};
use image::GrayImage;
use imageproc::template_matching::{find_extremes, match_template, MatchTemplateMethod};

/// Correlation-based matcher with a fixed confidence threshold.
///
/// The best normalized cross-correlation score over all alignments decides
/// the outcome; scores are in [0, 1] and the threshold comparison is
/// inclusive. No state is kept between calls.
#[derive(Debug, Clone, Copy)]
pub struct TemplateMatcher {
    threshold: f32,
}

impl TemplateMatcher {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Evaluate `template` against `frame`.
    ///
    /// A template larger than the frame in either dimension cannot be
    /// present in it and is reported as a no-match.
    pub fn find(&self, frame: &GrayImage, template: &Template) -> MatchOutcome {
        if template.image.width() > frame.width() || template.image.height() > frame.height() {
            return MatchOutcome::no_match();
        }

        let scores = match_template(
            frame,
            &template.image,
            MatchTemplateMethod::CrossCorrelationNormalized,
        );
        let extremes = find_extremes(&scores);

        MatchOutcome::from_score(extremes.max_value, extremes.max_value_location, self.threshold)
    }
}
