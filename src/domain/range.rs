// Value-axis range selection
use super::energy::SamplePoint;

/// Smallest upper bound the value axis will use, in watts.
pub const MIN_RANGE_MAX: f64 = 1000.0;

/// Largest magnitude either bound may take, so that the span stays finite.
pub const MAX_RANGE_MAGNITUDE: f64 = f64::MAX / 8.0;

/// Inclusive value domain of the power graph.
///
/// Always satisfies `min <= 0 <= max` and `max > min`; constructing a range
/// that violates this panics, because every consumer divides by the span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    min: f64,
    max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        assert!(
            min.is_finite() && max.is_finite() && max > min && (max - min).is_finite(),
            "degenerate value range [{min}, {max}]"
        );
        Self { min, max }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    #[cfg(test)]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::new(0.0, MIN_RANGE_MAX)
    }
}

/// Derive the shared value range for every series on the graph.
pub fn calculate_range<'a, I>(series_list: I) -> ValueRange
where
    I: IntoIterator<Item = &'a [SamplePoint]>,
{
    let mut raw_min = 0.0_f64;
    let mut raw_max = 0.0_f64;
    let mut any = false;

    for point in series_list.into_iter().flatten() {
        any = true;
        raw_min = raw_min.min(point.value);
        raw_max = raw_max.max(point.value);
    }

    if !any {
        return ValueRange::default();
    }

    let raw_max = raw_max.clamp(MIN_RANGE_MAX, MAX_RANGE_MAGNITUDE);
    let raw_min = raw_min.max(-MAX_RANGE_MAGNITUDE);

    let max = nice_bound(raw_max);
    let min = if raw_min < 0.0 { nice_bound(raw_min) } else { 0.0 };

    ValueRange::new(min, max)
}

/// Round away from zero to a readable step chosen by magnitude.
pub fn nice_bound(value: f64) -> f64 {
    let magnitude = value.abs();
    let step = if magnitude <= 2000.0 {
        500.0
    } else if magnitude <= 5000.0 {
        1000.0
    } else {
        2000.0
    };
    (magnitude / step).ceil() * step * value.signum()
}
