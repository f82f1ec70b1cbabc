// Fixed engine tuning. Anything a user may want to change lives in
// `BlobControls` instead.

pub const BLOB_COUNT: usize = 3;

// Clock
pub const SIM_STEP: f64 = 0.01; // simulated time per motion tick at speed 1.0
pub const MOTION_TICK_MS: i32 = 50; // wall-clock motion tick (20 Hz)

// Motion profile ranges
pub const SPEED_XY_MIN: f32 = 0.3;
pub const SPEED_XY_MAX: f32 = 0.7;
pub const SPEED_SIZE_MIN: f32 = 0.2;
pub const SPEED_SIZE_MAX: f32 = 0.5;
pub const INPUT_MULTIPLIER_MAX: f32 = 1.5;
pub const INPUT_SIZE_MULTIPLIER_MAX: f32 = 1.0;

// Classic variant: one shared input multiplier per blob (red, green, blue)
pub const CLASSIC_INPUT_MULTIPLIERS: [f32; BLOB_COUNT] = [1.0, 0.85, 0.92];

// Input fusion
pub const PAUSE_THRESHOLD_SEC: f64 = 0.2;
pub const SIGNIFICANT_MOVE: f32 = 0.05; // normalized units
pub const TILT_FULL_SCALE_DEG: f32 = 45.0;

// Transform
pub const INPUT_SIZE_GAIN: f32 = 20.0;
pub const ROTATION_RATES: [f32; BLOB_COUNT] = [1.0, 1.3, 0.8];
pub const ROTATION_DEGREES_PER_UNIT: f32 = 20.0;
pub const ASPECT_FREQ_X: f32 = 0.23;
pub const ASPECT_FREQ_Y: f32 = 0.17;

// Release decay and idle snap
pub const RELEASE_RETAIN: f32 = 0.85; // new = 0.85 * current + 0.15 * identity
pub const IDLE_SCALE_EPSILON: f32 = 0.01;
pub const IDLE_OFFSET_EPSILON: f32 = 0.5;

// Organic outline
pub const SHAPE_SEEDS: [f32; BLOB_COUNT] = [1.23, 2.47, 3.71];
pub const SHAPE_VARIATION: f32 = 10.0;
pub const SHAPE_BASE: [f32; 8] = [45.0, 55.0, 50.0, 50.0, 50.0, 50.0, 55.0, 45.0];
pub const SHAPE_COEFFS: [f32; 8] = [1.0, 1.3, 0.7, 1.7, 1.1, 0.9, 1.5, 1.9];

// Responsive sizing in portrait viewports
pub const PORTRAIT_SIZE_FACTOR: f32 = 0.6;
pub const PORTRAIT_BLUR_FACTOR: f32 = 0.7;

// Default palette (red, green, blue)
pub const BLOB_COLORS: [[u8; 3]; BLOB_COUNT] = [[255, 0, 0], [0, 255, 0], [0, 0, 255]];

// CSS transition for visual settings only. Transforms are written every
// display frame and must land immediately.
pub const BLOB_TRANSITION: &str =
    "width 2000ms ease-out, height 2000ms ease-out, filter 2000ms ease-out, background 2000ms ease-out";
