//! Stateless conversions between degrees, radians, direction vectors and view angles.
//!
//! Angles are in degrees unless a name says otherwise.
#[allow(unused_imports)]
use crate::core::prelude::*;

use crate::util::angle::Angle;
use crate::util::linalg::Vec3;
use crate::util::matrix::Matrix3x4;
use crate::warn_every_seconds;
use std::f32::consts::PI;

#[must_use]
pub fn rad2deg(x: f32) -> f32 {
    x * (180.0 / PI)
}

#[must_use]
pub fn deg2rad(x: f32) -> f32 {
    x * (PI / 180.0)
}

/// Returns `(sine, cosine)` of an angle given in radians.
#[must_use]
pub fn sin_cos(radians: f32) -> (f32, f32) {
    radians.sin_cos()
}

/// Wraps `angle` into `[-180, 180)`.
///
/// # Examples
///
/// ```
/// use viewgeom::util::trig::normalize_angle;
///
/// assert_eq!(normalize_angle(-190.0), 170.0);
/// assert_eq!(normalize_angle(190.0), -170.0);
/// assert_eq!(normalize_angle(180.0), -180.0);
/// ```
#[must_use]
pub fn normalize_angle(angle: f32) -> f32 {
    normalize_angle_between(angle, ANGLE_RANGE_START, ANGLE_RANGE_END)
}

/// Wraps `angle` into the half-open range `[start, end)` with a floored modulo, so negative
/// input and input many periods away from the range both land correctly.
///
/// NaN and infinite input give NaN, as does an empty range (`start == end`). An inverted
/// range (`start > end`) wraps into `(end, start]`.
#[must_use]
pub fn normalize_angle_between(angle: f32, start: f32, end: f32) -> f32 {
    // f64 keeps `floor()` exact for every f32 input.
    let (start64, width) = (f64::from(start), f64::from(end) - f64::from(start));
    let offset = f64::from(angle) - start64;
    #[allow(clippy::cast_possible_truncation)]
    let wrapped = (offset - (offset / width).floor() * width + start64) as f32;
    // Rounding back to f32 can land exactly on `end`.
    if start < end && wrapped >= end { start } else { wrapped }
}

/// The view angle `(pitch, yaw, 0)` that looks along `vec`:
/// `pitch = asin(z / |vec|)` and `yaw = atan2(y, x)`, both in degrees.
///
/// The zero vector has no direction and gives a NaN pitch. This is logged, but callers are
/// expected to check for it themselves.
#[must_use]
pub fn calculate_angle(vec: Vec3) -> Angle {
    let length = vec.length();
    if length == 0.0 {
        warn_every_seconds!(5, "calculate_angle(): zero-length direction: {}", vec);
    }
    Angle {
        x: rad2deg((vec.z / length).asin()),
        y: rad2deg(vec.y.atan2(vec.x)),
        z: 0.0,
    }
}

/// The aim angle from `destination` towards `source`, relative to `viewangles`.
///
/// Converts `source - destination` with [`calculate_angle`], subtracts `viewangles`, and then
/// adds 180° to the yaw whenever the x-component of `source - destination` is non-negative.
/// The correction is applied after the subtraction and the result is not normalised.
///
/// # Examples
///
/// ```
/// use viewgeom::util::angle::Angle;
/// use viewgeom::util::linalg::Vec3;
/// use viewgeom::util::trig::calculate_angle_between;
///
/// let eye = Vec3::new(0, 0, 0);
/// let target = Vec3::new(-10, 0, 0);
/// let aim = calculate_angle_between(eye, target, Angle::zero());
/// assert_eq!(aim, Angle::new(0, 180, 0));
/// ```
#[must_use]
pub fn calculate_angle_between(source: Vec3, destination: Vec3, viewangles: Angle) -> Angle {
    let delta = source - destination;
    let mut angles = calculate_angle(delta) - viewangles;
    if delta.x >= 0.0 {
        angles.y += HALF_TURN_DEGREES;
    }
    angles
}

/// Applies the affine transform `matrix` to `vector`: each output component is the dot
/// product of `vector` with the first three entries of a row, plus that row's last entry.
#[must_use]
pub fn vector_transform(vector: Vec3, matrix: &Matrix3x4) -> Vec3 {
    let row = |i: usize| vector.dot(matrix.row_axis(i)) + matrix[i][3];
    Vec3 {
        x: row(0),
        y: row(1),
        z: row(2),
    }
}
