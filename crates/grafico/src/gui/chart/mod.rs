pub mod model;
pub mod view;

pub use model::{ChartGeometry, ChartState, CursorAction};
pub use view::draw;

// The chart is laid out against this reference canvas and scaled uniformly
// to the actual widget size.
pub const REFERENCE_WIDTH: f64 = 1000.0;
pub const REFERENCE_HEIGHT: f64 = 600.0;

pub const WHEEL_CX: f64 = 300.0;
pub const WHEEL_CY: f64 = 300.0;
pub const WHEEL_RADIUS: f64 = 250.0;
pub const HOLE_RADIUS_FACTOR: f64 = 0.25; // donut hole, relative to the wheel

// Legend column to the right of the wheel.
pub const LEGEND_BLOCK_X: f64 = WHEEL_CX + WHEEL_RADIUS + 50.0;
pub const LEGEND_BLOCK_SIZE: f64 = 30.0;
pub const LEGEND_ROW_PITCH: f64 = 50.0;
pub const LEGEND_TOP_Y: f64 = 20.0;
pub const LEGEND_TEXT_X: f64 = LEGEND_BLOCK_X + 50.0;
pub const LEGEND_TEXT_WIDTH: f64 = 350.0;
pub const LEGEND_TEXT_BASELINE: f64 = 40.0;
pub const LEGEND_FONT_SIZE: f64 = 20.0;

// Detail panel shown below the legend while a slice is hovered.
pub const INFO_X: f64 = LEGEND_BLOCK_X;
pub const INFO_Y: f64 = WHEEL_CY + 50.0;
pub const INFO_WIDTH: f64 = 400.0;
pub const INFO_HEIGHT: f64 = 200.0;
pub const INFO_LINE_HEIGHT: f64 = 30.0;

pub const HIGHLIGHT_LINE_WIDTH: f64 = 3.0;
