//! Startup configuration.
//!
//! Read once before the loop starts and immutable for the run. The
//! defaults reproduce the constants the bot was originally tuned with.

use crate::action::ActionKind;
use crate::binding::PatternBinding;
use crate::geometry::Region;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Screen region the game occupies, in absolute screen coordinates.
    pub region: Region,
    /// Seconds between polling cycles.
    pub interval_secs: f64,
    /// Minimum normalized correlation score that counts as a match.
    pub threshold: f32,
    /// Seconds a swipe gesture takes from start to end.
    pub swipe_duration_secs: f64,
    /// Directory holding the obstacle template images.
    pub template_dir: PathBuf,
    /// Obstacle bindings in priority order.
    pub bindings: Vec<PatternBinding>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            region: Region::new(100, 100, 720, 1280),
            interval_secs: 0.3,
            threshold: 0.7,
            swipe_duration_secs: 0.2,
            template_dir: PathBuf::from("templates"),
            bindings: vec![
                PatternBinding::new("obstacle", ActionKind::Jump),
                PatternBinding::new("obstacle2", ActionKind::Slide),
                PatternBinding::new("obstacle3", ActionKind::Slide),
                PatternBinding::new("obstacle4", ActionKind::MoveRight),
            ],
        }
    }
}

impl BotConfig {
    /// Load and validate a configuration from a JSON file.
    ///
    /// Fields omitted from the file keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("invalid config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.region.width == 0 || self.region.height == 0 {
            bail!("capture region must have non-zero width and height");
        }
        if self.interval_secs <= 0.0 {
            bail!("polling interval must be positive, got {}", self.interval_secs);
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            bail!("match threshold must be within [0, 1], got {}", self.threshold);
        }
        if self.swipe_duration_secs <= 0.0 {
            bail!("swipe duration must be positive, got {}", self.swipe_duration_secs);
        }
        if self.bindings.is_empty() {
            bail!("at least one pattern binding is required");
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs_f64(self.interval_secs)
    }

    pub fn swipe_duration(&self) -> Duration {
        Duration::from_secs_f64(self.swipe_duration_secs)
    }
}
