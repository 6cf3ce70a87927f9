// Domain layer - Energy data and the chart geometry pipeline
pub mod axes;
pub mod chart;
pub mod downsample;
pub mod energy;
pub mod geometry;
pub mod range;
pub mod style;
pub mod units;
