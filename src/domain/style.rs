// Display modes and their stroke/theme lookup tables
use std::fmt;
use std::str::FromStr;

use super::energy::SeriesKind;

/// How the target display reproduces color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Color,
    Grayscale,
    Monochrome,
}

impl DisplayMode {
    pub fn as_str(self) -> &'static str {
        match self {
            DisplayMode::Color => "color",
            DisplayMode::Grayscale => "grayscale",
            DisplayMode::Monochrome => "monochrome",
        }
    }

    /// Stroke used for one series' line and legend swatch.
    pub fn stroke(self, kind: SeriesKind) -> StrokeStyle {
        STROKES[self.index()][kind_index(kind)]
    }

    pub fn theme(self) -> &'static Theme {
        &THEMES[self.index()]
    }

    /// Color for a metrics-bar value; only the color mode keeps its hue.
    pub fn metric_color(self, color: &'static str) -> &'static str {
        match self {
            DisplayMode::Color => color,
            DisplayMode::Grayscale | DisplayMode::Monochrome => "#000000",
        }
    }

    fn index(self) -> usize {
        match self {
            DisplayMode::Color => 0,
            DisplayMode::Grayscale => 1,
            DisplayMode::Monochrome => 2,
        }
    }
}

fn kind_index(kind: SeriesKind) -> usize {
    match kind {
        SeriesKind::Solar => 0,
        SeriesKind::House => 1,
        SeriesKind::Grid => 2,
        SeriesKind::CarCharger => 3,
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown display mode '{0}' (expected color, grayscale or monochrome)")]
pub struct UnknownDisplayMode(pub String);

impl FromStr for DisplayMode {
    type Err = UnknownDisplayMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "color" | "colour" => Ok(DisplayMode::Color),
            "grayscale" | "greyscale" => Ok(DisplayMode::Grayscale),
            "monochrome" | "mono" => Ok(DisplayMode::Monochrome),
            _ => Err(UnknownDisplayMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeStyle {
    pub color: &'static str,
    /// Tenths of a pixel, so the table stays `Eq`.
    pub width_tenths: u16,
    pub dash_array: Option<&'static str>,
}

impl StrokeStyle {
    const fn new(color: &'static str, width_tenths: u16, dash_array: Option<&'static str>) -> Self {
        Self {
            color,
            width_tenths,
            dash_array,
        }
    }

    pub fn width(&self) -> f64 {
        self.width_tenths as f64 / 10.0
    }
}

/// Colors for the non-data parts of the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub background: &'static str,
    pub grid: StrokeStyle,
    pub zero_line: StrokeStyle,
    pub axis: StrokeStyle,
    pub label: &'static str,
    pub legend_text: &'static str,
}

// Indexed by [mode][series] in SeriesKind::ALL order
const STROKES: [[StrokeStyle; 4]; 3] = [
    [
        StrokeStyle::new("#f59e0b", 25, None),
        StrokeStyle::new("#3b82f6", 25, None),
        StrokeStyle::new("#10b981", 25, None),
        StrokeStyle::new("#8b5cf6", 25, None),
    ],
    [
        StrokeStyle::new("#000000", 25, None),
        StrokeStyle::new("#555555", 25, Some("8 4")),
        StrokeStyle::new("#888888", 25, Some("2 3")),
        StrokeStyle::new("#333333", 25, Some("10 3 2 3")),
    ],
    [
        StrokeStyle::new("#000000", 30, None),
        StrokeStyle::new("#000000", 25, Some("8 4")),
        StrokeStyle::new("#000000", 20, Some("2 3")),
        StrokeStyle::new("#000000", 25, Some("10 3 2 3")),
    ],
];

const THEMES: [Theme; 3] = [
    Theme {
        background: "#ffffff",
        grid: StrokeStyle::new("#e5e5e5", 10, None),
        zero_line: StrokeStyle::new("#999999", 20, None),
        axis: StrokeStyle::new("#333333", 20, None),
        label: "#666666",
        legend_text: "#333333",
    },
    Theme {
        background: "#ffffff",
        grid: StrokeStyle::new("#dddddd", 10, None),
        zero_line: StrokeStyle::new("#888888", 20, None),
        axis: StrokeStyle::new("#333333", 20, None),
        label: "#555555",
        legend_text: "#333333",
    },
    Theme {
        background: "#ffffff",
        grid: StrokeStyle::new("#000000", 5, Some("1 4")),
        zero_line: StrokeStyle::new("#000000", 20, None),
        axis: StrokeStyle::new("#000000", 20, None),
        label: "#000000",
        legend_text: "#000000",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_display_mode() {
        assert_eq!("color".parse::<DisplayMode>(), Ok(DisplayMode::Color));
        assert_eq!(" Grayscale ".parse::<DisplayMode>(), Ok(DisplayMode::Grayscale));
        assert_eq!("monochrome".parse::<DisplayMode>(), Ok(DisplayMode::Monochrome));
        assert!("sepia".parse::<DisplayMode>().is_err());
    }

    #[test]
    fn test_series_strokes_are_distinguishable_in_every_mode() {
        for mode in [DisplayMode::Color, DisplayMode::Grayscale, DisplayMode::Monochrome] {
            let strokes: Vec<StrokeStyle> = SeriesKind::ALL.iter().map(|k| mode.stroke(*k)).collect();
            for (i, a) in strokes.iter().enumerate() {
                for b in &strokes[i + 1..] {
                    assert_ne!((a.color, a.dash_array), (b.color, b.dash_array), "{mode}");
                }
            }
        }
    }

    #[test]
    fn test_zero_line_heavier_than_grid() {
        for mode in [DisplayMode::Color, DisplayMode::Grayscale, DisplayMode::Monochrome] {
            let theme = mode.theme();
            assert!(theme.zero_line.width() > theme.grid.width(), "{mode}");
        }
    }

    #[test]
    fn test_metric_color_only_in_color_mode() {
        assert_eq!(DisplayMode::Color.metric_color("#22c55e"), "#22c55e");
        assert_eq!(DisplayMode::Monochrome.metric_color("#22c55e"), "#000000");
    }
}
