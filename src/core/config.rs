/// Tolerance used by the `almost_eq()` family of comparisons.
pub const EPSILON: f32 = 1e-5;
/// Default per-axis tolerance for `is_zero()` checks on 3D positions.
pub const IS_ZERO_TOLERANCE: f32 = 0.01;

pub const FULL_TURN_DEGREES: f32 = 360.0;
pub const HALF_TURN_DEGREES: f32 = 180.0;
/// Start (inclusive) of the range that pitch and yaw are wrapped into.
pub const ANGLE_RANGE_START: f32 = -180.0;
/// End (exclusive) of the range that pitch and yaw are wrapped into.
pub const ANGLE_RANGE_END: f32 = 180.0;
/// Roll outside of `(-ROLL_LIMIT, ROLL_LIMIT)` is discarded when normalising an angle.
pub const ROLL_LIMIT: f32 = 50.0;
