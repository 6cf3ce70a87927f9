// Gridlines, axis frame and tick labels for the power graph
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use super::geometry::{PlotRect, TimeWindow};
use super::range::ValueRange;
use super::units::format_watts;

/// Vertical gridlines: window start, end and five evenly spaced in between.
pub const TIME_GRIDLINES: usize = 7;
/// Horizontal gridlines: five steps plus the baseline.
pub const VALUE_GRIDLINES: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub anchor: TextAnchor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridLine {
    pub line: Line,
    pub label: Label,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    pub vertical: Vec<GridLine>,
    pub horizontal: Vec<GridLine>,
    /// Drawn with a heavier stroke than the other gridlines.
    pub zero_line: Line,
    pub x_axis: Line,
    pub y_axis: Line,
}

/// Short hour label for the time axis, e.g. `2PM`.
pub fn format_short_time(t: DateTime<Utc>, tz: &Tz) -> String {
    t.with_timezone(tz).format("%-I%p").to_string()
}

pub fn build_axes(window: &TimeWindow, range: &ValueRange, rect: &PlotRect, tz: &Tz) -> Axes {
    let interval = window.duration() / (TIME_GRIDLINES as i32 - 1);
    let vertical = (0..TIME_GRIDLINES)
        .map(|i| {
            let time = window.start + interval * i as i32;
            let x = rect.x_of(time, window);
            GridLine {
                line: Line {
                    x1: x,
                    y1: rect.top(),
                    x2: x,
                    y2: rect.bottom(),
                },
                label: Label {
                    x,
                    y: rect.bottom() + 25.0,
                    text: format_short_time(time, tz),
                    anchor: TextAnchor::Middle,
                },
            }
        })
        .collect();

    let steps = VALUE_GRIDLINES - 1;
    let horizontal = (0..VALUE_GRIDLINES)
        .map(|k| {
            let value = range.min() + range.span() * k as f64 / steps as f64;
            let y = rect.y_of(value, range);
            GridLine {
                line: Line {
                    x1: rect.left(),
                    y1: y,
                    x2: rect.right(),
                    y2: y,
                },
                label: Label {
                    x: rect.left() - 8.0,
                    y: y + 4.0,
                    text: format_watts(value),
                    anchor: TextAnchor::End,
                },
            }
        })
        .collect();

    let zero_y = rect.y_of(0.0, range);

    Axes {
        vertical,
        horizontal,
        zero_line: Line {
            x1: rect.left(),
            y1: zero_y,
            x2: rect.right(),
            y2: zero_y,
        },
        x_axis: Line {
            x1: rect.left(),
            y1: rect.bottom(),
            x2: rect.right(),
            y2: rect.bottom(),
        },
        y_axis: Line {
            x1: rect.left(),
            y1: rect.top(),
            x2: rect.left(),
            y2: rect.bottom(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn window() -> TimeWindow {
        TimeWindow::ending_at(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_seven_time_gridlines_every_four_hours() {
        let rect = PlotRect::for_display(800, 480);
        let axes = build_axes(&window(), &ValueRange::default(), &rect, &Tz::UTC);

        assert_eq!(axes.vertical.len(), 7);
        let labels: Vec<&str> = axes.vertical.iter().map(|g| g.label.text.as_str()).collect();
        assert_eq!(labels, vec!["12PM", "4PM", "8PM", "12AM", "4AM", "8AM", "12PM"]);
        assert_eq!(axes.vertical[0].line.x1, rect.left());
        assert_eq!(axes.vertical[6].line.x1, rect.right());
        assert_eq!(axes.vertical[3].line.x1, rect.left() + rect.plot_width() / 2.0);
    }

    #[test]
    fn test_time_labels_follow_time_zone() {
        let rect = PlotRect::for_display(800, 480);
        let axes = build_axes(&window(), &ValueRange::default(), &rect, &chrono_tz::Europe::Berlin);
        assert_eq!(axes.vertical[0].label.text, "2PM");
    }

    #[test]
    fn test_six_value_gridlines_with_power_labels() {
        let rect = PlotRect::for_display(800, 480);
        let range = ValueRange::new(-500.0, 2000.0);
        let axes = build_axes(&window(), &range, &rect, &Tz::UTC);

        assert_eq!(axes.horizontal.len(), 6);
        let labels: Vec<&str> = axes.horizontal.iter().map(|g| g.label.text.as_str()).collect();
        assert_eq!(labels, vec!["-500W", "0W", "500W", "1.0kW", "1.5kW", "2.0kW"]);
        assert_eq!(axes.horizontal[0].line.y1, rect.bottom());
        assert_eq!(axes.horizontal[5].line.y1, rect.top());
        assert_eq!(axes.zero_line.y1, axes.horizontal[1].line.y1);
    }

    #[test]
    fn test_zero_line_between_gridlines() {
        let rect = PlotRect::for_display(800, 480);
        let range = ValueRange::new(-3000.0, 1500.0);
        let axes = build_axes(&window(), &range, &rect, &Tz::UTC);

        let zero_y = axes.zero_line.y1;
        assert!(zero_y > rect.top() && zero_y < rect.bottom());
        assert!(axes.horizontal.iter().all(|g| g.line.y1 != zero_y));
    }

    #[test]
    fn test_axes_ignore_data_and_are_finite() {
        let rect = PlotRect::for_display(1024, 600);
        let axes = build_axes(&window(), &ValueRange::new(-8000.0, 14000.0), &rect, &Tz::UTC);
        let lines = axes
            .vertical
            .iter()
            .chain(axes.horizontal.iter())
            .map(|g| g.line)
            .chain([axes.zero_line, axes.x_axis, axes.y_axis]);
        for line in lines {
            assert!([line.x1, line.y1, line.x2, line.y2].iter().all(|v| v.is_finite()));
        }
    }
}
