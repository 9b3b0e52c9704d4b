use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::audio::Tone;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Tones", inline)]
#[serde(default)]
/// Audio cue settings used by hosts that can make sound.
pub struct ToneOptions {
    /// Whether cues are played at all.
    #[schemars(title = "Enabled")]
    pub enabled: bool,
    /// Pitch of the cue played before each swap.
    #[schemars(title = "Compare Pitch (Hz)", range(min = 20.0, max = 4000.0))]
    pub compare_hz: f64,
    /// Pitch of the cue played after each pass.
    #[schemars(title = "Pass Pitch (Hz)", range(min = 20.0, max = 4000.0))]
    pub pass_done_hz: f64,
    /// Length of one beep.
    #[schemars(title = "Beep Length (ms)", range(min = 10, max = 1000))]
    pub duration_ms: u64,
    /// Output gain, 0..1.
    #[schemars(title = "Volume", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub gain: f64,
}

impl ToneOptions {
    /// Frequency for `tone`.
    pub fn frequency(&self, tone: Tone) -> f64 {
        match tone {
            Tone::Compare => self.compare_hz,
            Tone::PassDone => self.pass_done_hz,
        }
    }
}

impl Default for ToneOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            compare_hz: 830.0,
            pass_done_hz: 230.0,
            duration_ms: 100,
            gain: 0.1,
        }
    }
}
