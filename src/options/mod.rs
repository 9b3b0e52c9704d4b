//! Visualizer options with TOML preset support.
//!
//! Nothing here is required: [`VisualizerOptions::default`] reproduces the
//! classic board (15 bars, 100 ms per step, 20 px bars with 2 px gaps,
//! 830 Hz / 230 Hz cues). Presets serialize to/from TOML and every section
//! uses `#[serde(default)]`, so a file overriding only `[tones]` works.

mod layout;
mod tones;

use std::path::Path;

pub use layout::LayoutOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use tones::ToneOptions;
use web_time::Duration;

use crate::error::VisualizerError;
use crate::util::easing::EasingFunction;

/// Largest board accepted by [`VisualizerOptions::validate`].
pub const MAX_SIZE: usize = 4096;
/// Longest per-step animation accepted by [`VisualizerOptions::validate`].
pub const MAX_STEP_DURATION_MS: u64 = 60_000;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct VisualizerOptions {
    /// Number of bars; values are a permutation of `1..=size`.
    #[schemars(title = "Bars", range(min = 0, max = 4096))]
    pub size: usize,
    /// Duration of every individual tween (swap, cursor move).
    #[schemars(title = "Step (ms)", range(min = 0, max = 60000))]
    pub step_duration_ms: u64,
    /// Curve applied to every tween.
    #[schemars(title = "Easing")]
    pub easing: EasingFunction,
    /// Bar geometry.
    pub layout: LayoutOptions,
    /// Audio cues.
    pub tones: ToneOptions,
}

impl Default for VisualizerOptions {
    fn default() -> Self {
        Self {
            size: 15,
            step_duration_ms: 100,
            easing: EasingFunction::Linear,
            layout: LayoutOptions::default(),
            tones: ToneOptions::default(),
        }
    }
}

impl VisualizerOptions {
    /// Per-tween duration.
    pub fn step_duration(&self) -> Duration {
        Duration::from_millis(self.step_duration_ms)
    }

    /// Reject values no host can render sensibly.
    pub fn validate(&self) -> Result<(), VisualizerError> {
        if self.size > MAX_SIZE {
            return Err(VisualizerError::InvalidOptions(format!(
                "size {} exceeds {MAX_SIZE}",
                self.size
            )));
        }
        if self.step_duration_ms > MAX_STEP_DURATION_MS {
            return Err(VisualizerError::InvalidOptions(format!(
                "step_duration_ms {} exceeds {MAX_STEP_DURATION_MS}",
                self.step_duration_ms
            )));
        }
        let layout = &self.layout;
        if !(layout.bar_width.is_finite() && layout.bar_width > 0.0) {
            return Err(VisualizerError::InvalidOptions(format!(
                "bar_width must be positive, got {}",
                layout.bar_width
            )));
        }
        if !(layout.bar_margin.is_finite() && layout.bar_margin >= 0.0) {
            return Err(VisualizerError::InvalidOptions(format!(
                "bar_margin must be non-negative, got {}",
                layout.bar_margin
            )));
        }
        if !(0.0..=1.0).contains(&self.tones.gain) {
            return Err(VisualizerError::InvalidOptions(format!(
                "tone gain must be within 0..=1, got {}",
                self.tones.gain
            )));
        }
        Ok(())
    }

    /// Generate JSON Schema describing the options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(VisualizerOptions)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, VisualizerError> {
        let options: Self = toml::from_str(content)
            .map_err(|e| VisualizerError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, VisualizerError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), VisualizerError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| VisualizerError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}
