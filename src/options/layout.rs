use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Layout", inline)]
#[serde(default)]
/// Bar geometry. Slot `k` sits at `k * (bar_width + bar_margin)`.
pub struct LayoutOptions {
    /// Width of one bar, in host units (pixels on the web).
    #[schemars(title = "Bar Width", range(min = 1.0, max = 200.0), extend("step" = 1.0))]
    pub bar_width: f64,
    /// Gap between neighbouring bars.
    #[schemars(title = "Bar Margin", range(min = 0.0, max = 50.0), extend("step" = 1.0))]
    pub bar_margin: f64,
    /// Bar height per unit of value.
    #[schemars(title = "Height Scale", range(min = 1.0, max = 50.0), extend("step" = 1.0))]
    pub bar_height_scale: f64,
}

impl LayoutOptions {
    /// Distance between the left edges of neighbouring slots.
    pub fn pitch(&self) -> f64 {
        self.bar_width + self.bar_margin
    }

    /// X coordinate of `slot`.
    pub fn slot_x(&self, slot: usize) -> f64 {
        slot as f64 * self.pitch()
    }

    /// Height of a bar holding `value`.
    pub fn bar_height(&self, value: u32) -> f64 {
        f64::from(value) * self.bar_height_scale
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            bar_width: 20.0,
            bar_margin: 2.0,
            bar_height_scale: 10.0,
        }
    }
}
