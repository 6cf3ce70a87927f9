// HTML page assembly: dashboard, metrics bar and error screen
use crate::application::energy_repository::{FetchError, FetchErrorKind};
use crate::domain::energy::{DashboardData, EnergyMetrics};
use crate::domain::style::DisplayMode;
use crate::domain::units::{format_percent, format_power};
use crate::infrastructure::config::DisplayConfig;
use crate::infrastructure::svg_writer::escape_text;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

const NEUTRAL: &str = "#666666";
const GREEN: &str = "#22c55e";
const ORANGE: &str = "#f59e0b";
const RED: &str = "#ef4444";

#[derive(Debug, Clone, PartialEq)]
pub struct MetricItem {
    pub emoji: &'static str,
    pub label: &'static str,
    pub value: String,
    pub color: &'static str,
}

pub fn metric_items(metrics: &EnergyMetrics, mode: DisplayMode) -> Vec<MetricItem> {
    let items = [
        ("🔋", "Battery", format_percent(metrics.battery_soc), battery_color(metrics.battery_soc)),
        (
            "☀️",
            "Solar",
            format_power(metrics.pv_power),
            if metrics.pv_power.is_some_and(|p| p > 0.0) { ORANGE } else { NEUTRAL },
        ),
        ("🏠", "House", format_power(metrics.house_consumption), "#3b82f6"),
        ("⚡", "Grid", format_power(metrics.grid_power), grid_color(metrics.grid_power)),
        (
            "🚗",
            "Car",
            format_power(metrics.car_charger_power),
            car_color(metrics.car_charger_switch),
        ),
    ];

    items
        .into_iter()
        .map(|(emoji, label, value, color)| MetricItem {
            emoji,
            label,
            value,
            color: mode.metric_color(color),
        })
        .collect()
}

fn grid_color(power: Option<f64>) -> &'static str {
    match power {
        Some(p) if p > 0.0 => "#10b981",
        Some(p) if p < 0.0 => RED,
        _ => NEUTRAL,
    }
}

fn battery_color(soc: Option<f64>) -> &'static str {
    match soc {
        Some(s) if s >= 60.0 => GREEN,
        Some(s) if s >= 30.0 => ORANGE,
        Some(_) => RED,
        None => NEUTRAL,
    }
}

fn car_color(switch_on: Option<bool>) -> &'static str {
    match switch_on {
        Some(true) => GREEN,
        Some(false) => RED,
        None => NEUTRAL,
    }
}

/// `14:05`, 24-hour clock
pub fn format_time(t: DateTime<Utc>, tz: &Tz) -> String {
    t.with_timezone(tz).format("%H:%M").to_string()
}

pub fn render_metrics_bar(metrics: &EnergyMetrics, mode: DisplayMode, tz: &Tz) -> String {
    let items: String = metric_items(metrics, mode)
        .iter()
        .map(|item| {
            format!(
                r#"
      <div class="metric-item" title="{label}">
        <span class="metric-emoji">{emoji}</span>
        <span class="metric-value" style="color: {color}">{value}</span>
      </div>"#,
                label = item.label,
                emoji = item.emoji,
                color = item.color,
                value = escape_text(&item.value)
            )
        })
        .collect();

    format!(
        r#"
    <div class="metrics-bar">
      <div class="metrics-left">{items}
      </div>
      <div class="metrics-time">{time}</div>
    </div>"#,
        items = items,
        time = format_time(metrics.timestamp, tz)
    )
}

fn page_shell(title: &str, display: &DisplayConfig, styles: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width={w}, height={h}, initial-scale=1.0">
  <title>{title}</title>
  <style>
    * {{ margin: 0; padding: 0; box-sizing: border-box; }}
    html, body {{
      width: {w}px;
      height: {h}px;
      overflow: hidden;
      font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
      background: #ffffff;
      color: #000000;
    }}
    .container {{ width: {w}px; height: {h}px; display: flex; flex-direction: column; }}
{styles}
  </style>
</head>
<body>
{body}
</body>
</html>
"#,
        w = display.width,
        h = display.height,
        title = escape_text(title),
        styles = styles,
        body = body
    )
}

const DASHBOARD_STYLES: &str = r#"    .metrics-bar { display: flex; justify-content: space-between; align-items: center; padding: 16px 24px; background: #f8f8f8; border-bottom: 3px solid #000000; }
    .metrics-left { display: flex; gap: 20px; }
    .metric-item { display: flex; align-items: center; gap: 6px; }
    .metric-emoji { font-size: 24px; }
    .metric-value { font-size: 24px; font-weight: 700; }
    .metrics-time { font-size: 24px; font-weight: 600; color: #333333; }
    .graph-container { flex: 1; display: flex; justify-content: center; align-items: center; padding: 16px; }
    .graph-container svg { max-width: 100%; height: auto; }"#;

pub fn render_dashboard_page(
    data: &DashboardData,
    graph_svg: &str,
    display: &DisplayConfig,
    tz: &Tz,
) -> String {
    let body = format!(
        r#"  <div class="container">{metrics}
    <div class="graph-container">
{graph}    </div>
  </div>"#,
        metrics = render_metrics_bar(&data.metrics, display.mode, tz),
        graph = graph_svg
    );
    page_shell("Power Terminal", display, DASHBOARD_STYLES, &body)
}

/// Title and detail text shown for each fetch failure category
pub fn error_message(error: &FetchError) -> (&'static str, String) {
    match error.kind {
        FetchErrorKind::Network => (
            "Connection Failed",
            "Unable to connect to Home Assistant".to_string(),
        ),
        FetchErrorKind::Auth => (
            "Authentication Failed",
            "Check your HA_TOKEN configuration".to_string(),
        ),
        FetchErrorKind::NotFound => ("Entity Not Found", error.message.clone()),
        FetchErrorKind::Unavailable => (
            "Data Unavailable",
            "Home Assistant data is currently unavailable".to_string(),
        ),
        FetchErrorKind::Timeout => (
            "Request Timeout",
            "Home Assistant is not responding".to_string(),
        ),
        FetchErrorKind::Unknown => ("Error", error.message.clone()),
    }
}

const ERROR_STYLES: &str = r#"    .container { padding: 32px; justify-content: center; align-items: center; text-align: center; }
    .error-icon { font-size: 80px; margin-bottom: 24px; }
    .error-title { font-size: 48px; font-weight: 700; margin-bottom: 16px; color: #dc2626; }
    .error-detail { font-size: 24px; color: #666666; margin-bottom: 32px; max-width: 600px; }
    .error-time { font-size: 18px; color: #999999; }"#;

pub fn render_error_page(
    error: &FetchError,
    now: DateTime<Utc>,
    display: &DisplayConfig,
    tz: &Tz,
) -> String {
    let (title, detail) = error_message(error);
    let body = format!(
        r#"  <div class="container">
    <div class="error-icon">⚠️</div>
    <h1 class="error-title">{title}</h1>
    <p class="error-detail">{detail}</p>
    <p class="error-time">{time}</p>
  </div>"#,
        title = title,
        detail = escape_text(&detail),
        time = format_time(now, tz)
    );
    page_shell("Power Terminal - Error", display, ERROR_STYLES, &body)
}
