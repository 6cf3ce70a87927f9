// Drawing descriptor for the 24-hour power graph
use chrono_tz::Tz;

use super::axes::{build_axes, Axes, Label, Line, TextAnchor};
use super::energy::{EnergyHistory, SeriesKind};
use super::geometry::{build_path, PathGeometry, PlotRect, TimeWindow};
use super::range::{calculate_range, ValueRange};
use super::style::{DisplayMode, StrokeStyle};

const LEGEND_ITEM_WIDTH: f64 = 100.0;
const LEGEND_SWATCH_LENGTH: f64 = 24.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Background {
    pub width: f64,
    pub height: f64,
    pub fill: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesLine {
    pub kind: SeriesKind,
    pub geometry: PathGeometry,
    pub stroke: StrokeStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendItem {
    pub kind: SeriesKind,
    pub swatch: Line,
    pub stroke: StrokeStyle,
    pub label: Label,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    pub width: f64,
    pub height: f64,
    pub mode: DisplayMode,
    pub range: ValueRange,
    pub background: Background,
    pub axes: Axes,
    /// Only series with at least one in-window point.
    pub series: Vec<SeriesLine>,
    pub legend: Vec<LegendItem>,
}

pub fn build_chart(
    history: &EnergyHistory,
    window: &TimeWindow,
    rect: &PlotRect,
    mode: DisplayMode,
    tz: &Tz,
) -> Drawing {
    let range = calculate_range(history.all_series());
    let axes = build_axes(window, &range, rect, tz);

    let series = SeriesKind::ALL
        .iter()
        .filter_map(|&kind| {
            let geometry = build_path(history.series(kind), window, &range, rect);
            if geometry.is_empty() {
                return None;
            }
            Some(SeriesLine {
                kind,
                geometry,
                stroke: mode.stroke(kind),
            })
        })
        .collect();

    Drawing {
        width: rect.width,
        height: rect.height,
        mode,
        range,
        background: Background {
            width: rect.width,
            height: rect.height,
            fill: mode.theme().background,
        },
        axes,
        series,
        legend: build_legend(rect, mode),
    }
}

fn build_legend(rect: &PlotRect, mode: DisplayMode) -> Vec<LegendItem> {
    let start_x = rect.width / 2.0 - (SeriesKind::ALL.len() as f64 * LEGEND_ITEM_WIDTH) / 2.0;
    let y = rect.height - 15.0;

    SeriesKind::ALL
        .iter()
        .enumerate()
        .map(|(i, &kind)| {
            let x = start_x + i as f64 * LEGEND_ITEM_WIDTH;
            LegendItem {
                kind,
                swatch: Line {
                    x1: x,
                    y1: y,
                    x2: x + LEGEND_SWATCH_LENGTH,
                    y2: y,
                },
                stroke: mode.stroke(kind),
                label: Label {
                    x: x + LEGEND_SWATCH_LENGTH + 8.0,
                    y: y + 4.0,
                    text: kind.label().to_string(),
                    anchor: TextAnchor::Start,
                },
            }
        })
        .collect()
}
