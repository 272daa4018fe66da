//! Default edge style values (canvas pixels)

/// Key path stroke when neither `stroke` nor `color` is set
pub const EDGE_COLOR: &str = "#99ADD1";
pub const LINE_WIDTH: f64 = 1.0;
pub const OPACITY: f64 = 1.0;

pub const LABEL_FONT_SIZE: f64 = 12.0;
pub const LABEL_FILL: &str = "#1D2129";
pub const LABEL_BACKGROUND_FILL: &str = "#FFFFFF";
pub const LABEL_OFFSET_X: f64 = 4.0;
pub const LABEL_OFFSET_Y: f64 = 0.0;
pub const LABEL_MAX_WIDTH_PERCENT: f64 = 80.0;
pub const LABEL_TEXT_BASELINE: &str = "middle";
/// Ratio used for `end` placement, so the tangent sample stays on the path
pub const LABEL_END_RATIO: f64 = 0.99;
/// Distance (as a path ratio) between the anchor and its tangent sample
pub const LABEL_TANGENT_STEP: f64 = 0.01;

pub const HALO_Z_INDEX: f64 = -1.0;
pub const HALO_LINE_WIDTH: f64 = 12.0;
pub const HALO_OPACITY: f64 = 0.25;

pub const ARROW_SIZE: f64 = 10.0;
pub const ARROW_LINE_WIDTH: f64 = 1.0;

pub const QUADRATIC_CURVE_OFFSET: f64 = 30.0;
pub const CUBIC_CURVE_OFFSET: f64 = 20.0;
pub const CURVE_POSITION: f64 = 0.5;

/// Line pieces per curve when measuring or sampling a path
pub const CURVE_SAMPLES: usize = 32;
