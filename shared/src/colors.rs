use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Format as a CSS `rgba(...)` string.
    pub fn rgba_css(self, alpha: f64) -> String {
        let Self(r, g, b) = self;
        format!("rgba({r}, {g}, {b}, {alpha})")
    }
}

/// Which of the four dashboard charts a color is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartSlot {
    Cost,
    Co2,
    Suitability,
    Usage,
}

/// Chart palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// One distinct color per chart.
    #[default]
    Vivid,
    /// Every chart in the same blue.
    Uniform,
}

const BLUE: Rgb = Rgb(54, 162, 235);

impl Theme {
    pub fn color(self, slot: ChartSlot) -> Rgb {
        match self {
            Self::Uniform => BLUE,
            Self::Vivid => match slot {
                ChartSlot::Cost => Rgb(255, 99, 132),
                ChartSlot::Co2 => BLUE,
                ChartSlot::Suitability => Rgb(75, 192, 192),
                ChartSlot::Usage => Rgb(153, 102, 255),
            },
        }
    }
}
