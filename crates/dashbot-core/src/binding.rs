//! Pattern-to-action bindings.

use crate::action::ActionKind;
use serde::{Deserialize, Serialize};

/// An ordered (pattern, action) pair.
///
/// Position in the configured list is priority: earlier bindings are
/// checked first each cycle, and only the first match fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternBinding {
    /// Name of the template image, without extension.
    pub pattern: String,
    pub action: ActionKind,
}

impl PatternBinding {
    pub fn new(pattern: impl Into<String>, action: ActionKind) -> Self {
        Self {
            pattern: pattern.into(),
            action,
        }
    }
}
