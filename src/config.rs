//! Compile-time settings for the dashboard.

/// File loaded at startup, relative to the working directory.
pub const DEFAULT_DATASET: &str = "HR_Analytics.csv";

pub const WINDOW_SIZE: [f32; 2] = [1400.0, 900.0];
pub const MIN_WINDOW_SIZE: [f32; 2] = [800.0, 500.0];
pub const FILTER_PANEL_WIDTH: f32 = 240.0;

/// Number of bins in the age histogram.
pub const AGE_BINS: usize = 30;

pub const CHART_HEIGHT: f32 = 320.0;

/// Upper bound of the satisfaction scales, used for the radar axis.
pub const SATISFACTION_SCALE_MAX: f64 = 4.0;
