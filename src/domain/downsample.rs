// Bucket-averaging downsampler for raw sensor history
use super::energy::{parse_state_value, RawReading, SamplePoint};

/// One sample every 5 minutes over 24 hours.
pub const DEFAULT_MAX_POINTS: usize = 288;

/// Parse raw readings and reduce them to at most `max_points` samples.
///
/// Readings whose state is not a finite number are dropped. When the remaining
/// sequence already fits it is returned as-is; otherwise it is split into
/// consecutive buckets of `ceil(len / max_points)` readings, each collapsed to
/// its mean value stamped with the bucket's middle reading.
pub fn downsample(entries: &[RawReading], max_points: usize) -> Vec<SamplePoint> {
    let points: Vec<SamplePoint> = entries
        .iter()
        .filter_map(|entry| {
            parse_state_value(&entry.state).map(|value| SamplePoint::new(entry.timestamp, value))
        })
        .collect();

    downsample_points(points, max_points)
}

/// Downsample already-parsed points using bucket averaging.
pub fn downsample_points(points: Vec<SamplePoint>, max_points: usize) -> Vec<SamplePoint> {
    if max_points == 0 {
        return Vec::new();
    }
    if points.len() <= max_points {
        return points;
    }

    let bucket_size = points.len().div_ceil(max_points);
    let mut downsampled = Vec::with_capacity(max_points);

    for chunk in points.chunks(bucket_size) {
        // Middle element; the later of the two for even-sized buckets
        let mid_idx = chunk.len() / 2;
        let count = chunk.len() as f64;
        let sum = chunk.iter().map(|p| p.value).sum::<f64>();
        // Summing near-limit readings can overflow; fall back to scaled terms
        let avg_value = if sum.is_finite() {
            sum / count
        } else {
            chunk.iter().map(|p| p.value / count).sum::<f64>()
        };

        downsampled.push(SamplePoint::new(chunk[mid_idx].timestamp, avg_value));
    }

    downsampled
}
