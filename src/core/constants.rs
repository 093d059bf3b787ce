//! Curve constants and engine-wide defaults.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Overshoot amount for the back family (about 10% past the target).
pub const BACK_OVERSHOOT: f64 = 1.70158;

/// Extra scale applied to [`BACK_OVERSHOOT`] by the in-out back curve.
pub const BACK_IN_OUT_SCALE: f64 = 1.525;

/// Bounce parabola coefficient.
pub const BOUNCE_N1: f64 = 7.5625;

/// Bounce segment divisor; splits [0, 1] into four arcs.
pub const BOUNCE_D1: f64 = 2.75;

/// Angular frequency of the in/out elastic curves (2π / 3).
pub const ELASTIC_C4: f64 = std::f64::consts::TAU / 3.0;

/// Angular frequency of the in-out elastic curve (2π / 4.5).
pub const ELASTIC_C5: f64 = std::f64::consts::TAU / 4.5;

/// Duration used by convenience constructors when none is configured, in seconds.
pub const DEFAULT_TWEEN_DURATION: f64 = 1.0;

/// Time scale applied to every tick delta unless configured otherwise.
pub const DEFAULT_TIME_SCALE: f64 = 1.0;
