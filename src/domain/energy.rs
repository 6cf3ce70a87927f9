// Energy data domain models
use chrono::{DateTime, Utc};

/// One observed or aggregated reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl SamplePoint {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// A reading as delivered by the backend, before its state is parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct RawReading {
    pub timestamp: DateTime<Utc>,
    pub state: String,
}

impl RawReading {
    pub fn new(timestamp: DateTime<Utc>, state: impl Into<String>) -> Self {
        Self {
            timestamp,
            state: state.into(),
        }
    }
}

/// Parse a backend state string into a finite number.
///
/// `unavailable`, `unknown`, empty strings and anything that does not parse to a
/// finite `f64` yield `None`.
pub fn parse_state_value(state: &str) -> Option<f64> {
    let state = state.trim();
    if state.is_empty() || state == "unavailable" || state == "unknown" {
        return None;
    }
    state.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// The physical quantities plotted on the power graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesKind {
    Solar,
    House,
    Grid,
    CarCharger,
}

impl SeriesKind {
    /// Drawing order; later series paint over earlier ones.
    pub const ALL: [SeriesKind; 4] = [
        SeriesKind::Solar,
        SeriesKind::House,
        SeriesKind::Grid,
        SeriesKind::CarCharger,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SeriesKind::Solar => "Solar",
            SeriesKind::House => "House",
            SeriesKind::Grid => "Grid",
            SeriesKind::CarCharger => "Car",
        }
    }
}

/// Downsampled 24-hour history for every plotted series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnergyHistory {
    pub solar: Vec<SamplePoint>,
    pub house: Vec<SamplePoint>,
    pub grid: Vec<SamplePoint>,
    pub car_charger: Vec<SamplePoint>,
}

impl EnergyHistory {
    pub fn series(&self, kind: SeriesKind) -> &[SamplePoint] {
        match kind {
            SeriesKind::Solar => &self.solar,
            SeriesKind::House => &self.house,
            SeriesKind::Grid => &self.grid,
            SeriesKind::CarCharger => &self.car_charger,
        }
    }

    pub fn all_series(&self) -> [&[SamplePoint]; 4] {
        SeriesKind::ALL.map(|kind| self.series(kind))
    }
}

/// Current values shown in the metrics bar. Grid power is positive when
/// importing and negative when exporting.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyMetrics {
    pub pv_power: Option<f64>,
    pub battery_soc: Option<f64>,
    pub grid_power: Option<f64>,
    pub house_consumption: Option<f64>,
    pub car_charger_power: Option<f64>,
    pub car_charger_switch: Option<bool>,
    pub timestamp: DateTime<Utc>,
}

/// Parse an `on`/`off` switch state.
pub fn parse_switch_state(state: &str) -> Option<bool> {
    match state {
        "on" => Some(true),
        "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub metrics: EnergyMetrics,
    pub history: EnergyHistory,
}
