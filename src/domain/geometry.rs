// Pixel-space geometry: plot rectangle, coordinate mapping and series paths
use chrono::{DateTime, Duration, Utc};

use super::energy::SamplePoint;
use super::range::ValueRange;

/// Length of the visible history window.
pub const HISTORY_WINDOW_HOURS: i64 = 24;

/// Visible time domain shared by every series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// The standard 24-hour window ending at `now`.
    pub fn ending_at(now: DateTime<Utc>) -> Self {
        Self {
            start: now - Duration::hours(HISTORY_WINDOW_HOURS),
            end: now,
        }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        t >= self.start && t <= self.end
    }
}

/// Space between the canvas edge and the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 50.0,
            left: 60.0,
        }
    }
}

/// Graph canvas size plus the padding that frames its plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotRect {
    pub width: f64,
    pub height: f64,
    pub padding: Padding,
}

impl PlotRect {
    pub fn new(width: f64, height: f64, padding: Padding) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }

    /// Graph canvas for a display of the given size, leaving room for the
    /// metrics bar above it.
    pub fn for_display(display_width: u32, display_height: u32) -> Self {
        Self::new(
            display_width as f64 - 40.0,
            display_height as f64 - 100.0,
            Padding::default(),
        )
    }

    pub fn plot_width(&self) -> f64 {
        self.width - self.padding.left - self.padding.right
    }

    pub fn plot_height(&self) -> f64 {
        self.height - self.padding.top - self.padding.bottom
    }

    pub fn left(&self) -> f64 {
        self.padding.left
    }

    pub fn right(&self) -> f64 {
        self.width - self.padding.right
    }

    pub fn top(&self) -> f64 {
        self.padding.top
    }

    pub fn bottom(&self) -> f64 {
        self.height - self.padding.bottom
    }

    /// Horizontal pixel for `t`. Not clamped to the window.
    pub fn x_of(&self, t: DateTime<Utc>, window: &TimeWindow) -> f64 {
        let total_ms = window.duration().num_milliseconds() as f64;
        let offset_ms = (t - window.start).num_milliseconds() as f64;
        self.padding.left + (offset_ms / total_ms) * self.plot_width()
    }

    /// Vertical pixel for `v`; screen Y grows downward.
    pub fn y_of(&self, v: f64, range: &ValueRange) -> f64 {
        let normalized = (v - range.min()) / range.span();
        self.padding.top + self.plot_height() * (1.0 - normalized)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

/// Ordered pixel positions of one series, drawn as a single polyline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathGeometry {
    pub points: Vec<PixelPoint>,
}

impl PathGeometry {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// SVG path data: a move to the first point, straight lines after.
    pub fn to_path_data(&self) -> String {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| format!("{} {:.1} {:.1}", if i == 0 { "M" } else { "L" }, p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Map the in-window points of one series into pixel space.
pub fn build_path(
    points: &[SamplePoint],
    window: &TimeWindow,
    range: &ValueRange,
    rect: &PlotRect,
) -> PathGeometry {
    let points = points
        .iter()
        .filter(|p| window.contains(p.timestamp))
        .map(|p| PixelPoint {
            x: rect.x_of(p.timestamp, window),
            y: rect.y_of(p.value.clamp(range.min(), range.max()), range),
        })
        .collect();

    PathGeometry { points }
}
