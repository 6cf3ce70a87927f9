// Power and percentage formatting shared by axis labels and the metrics bar

/// Placeholder shown when a value is unavailable.
pub const MISSING: &str = "—";

/// `3.2kW` at or above 1000 W in magnitude, whole watts (`850W`) below;
/// negative values keep a leading `-`.
pub fn format_watts(watts: f64) -> String {
    let abs_watts = watts.abs();
    let sign = if watts < 0.0 { "-" } else { "" };

    if abs_watts >= 1000.0 {
        format!("{}{:.1}kW", sign, abs_watts / 1000.0)
    } else {
        format!("{}{}W", sign, abs_watts.round())
    }
}

pub fn format_power(watts: Option<f64>) -> String {
    watts.map(format_watts).unwrap_or_else(|| MISSING.to_string())
}

pub fn format_percent(value: Option<f64>) -> String {
    value
        .map(|v| format!("{}%", v.round()))
        .unwrap_or_else(|| MISSING.to_string())
}
