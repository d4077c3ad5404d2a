#[allow(unused_imports)]
use crate::core::prelude::*;

use crate::util::linalg::{impl_position3d, Vec3};
use crate::util::trig::{deg2rad, normalize_angle, sin_cos};
use serde::{Deserialize, Serialize};
use std::{fmt, fmt::Formatter};

/// Euler-style view angles in degrees: `x` is pitch, `y` is yaw and `z` is roll.
///
/// Positive pitch looks down: the [`forward`](Angle::forward) vector of a pitch of `90` is
/// `(0, 0, -1)`.
///
/// # Examples
///
/// ```
/// use viewgeom::util::angle::Angle;
///
/// let mut view = Angle::new(-190.0, 540.0, 75.0);
/// view.normalize();
/// assert_eq!(view, Angle::new(170.0, -180.0, 0.0));
/// ```
#[derive(
    Default, Debug, Copy, Clone, PartialEq, Serialize, Deserialize, bincode::Encode, bincode::Decode,
)]
pub struct Angle {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl_position3d!(Angle);

impl Angle {
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.x
    }
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.y
    }
    #[must_use]
    pub fn roll(&self) -> f32 {
        self.z
    }

    /// Turns pitch and yaw by half a turn each and keeps roll. The forward direction of the
    /// result is the current one mirrored through the horizontal plane, and up points down.
    ///
    /// The result is not wrapped back into range, so repeated flips drift by 360° at a time;
    /// call [`normalize`](Angle::normalize) afterwards if that matters.
    #[must_use]
    pub fn flip(&self) -> Angle {
        Angle {
            x: self.x + HALF_TURN_DEGREES,
            y: self.y + HALF_TURN_DEGREES,
            z: self.z,
        }
    }

    /// Wraps pitch and yaw into `[-180, 180)` and discards a roll outside of
    /// `(-ROLL_LIMIT, ROLL_LIMIT)`. Returns the normalised angle as well.
    pub fn normalize(&mut self) -> Angle {
        self.x = normalize_angle(self.x);
        self.y = normalize_angle(self.y);
        if !(self.z > -ROLL_LIMIT && self.z < ROLL_LIMIT) {
            self.z = 0.0;
        }
        *self
    }

    /// A normalised copy, see [`normalize`](Angle::normalize).
    #[must_use]
    pub fn normalized(&self) -> Angle {
        let mut rv = *self;
        rv.normalize()
    }

    /// The direction these angles look along. Roll does not affect it.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        let (sp, cp) = sin_cos(deg2rad(self.x));
        let (sy, cy) = sin_cos(deg2rad(self.y));
        Vec3 {
            x: cp * cy,
            y: cp * sy,
            z: -sp,
        }
    }

    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.basis().1
    }

    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.basis().2
    }

    /// Returns `(forward, right, up)`, computing each sine/cosine pair once.
    ///
    /// The vectors are unit length by construction for finite input.
    #[must_use]
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let (sp, cp) = sin_cos(deg2rad(self.x));
        let (sy, cy) = sin_cos(deg2rad(self.y));
        let (sr, cr) = sin_cos(deg2rad(self.z));
        let forward = Vec3 {
            x: cp * cy,
            y: cp * sy,
            z: -sp,
        };
        let right = Vec3 {
            x: -sr * sp * cy + sy * cr,
            y: -sr * sp * sy - cy * cr,
            z: -sr * cp,
        };
        let up = Vec3 {
            x: cr * sp * cy + sy * sr,
            y: cr * sp * sy - cy * sr,
            z: cr * cp,
        };
        (forward, right, up)
    }
}

impl From<Vec3> for Angle {
    fn from(value: Vec3) -> Self {
        Angle {
            x: value.x,
            y: value.y,
            z: value.z,
        }
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ang(")?;
        if let Some(p) = f.precision() {
            write!(f, "{0:.3$}, {1:.3$}, {2:.3$}", self.x, self.y, self.z, p)?;
        } else {
            write!(f, "{}, {}, {}", self.x, self.y, self.z)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn angle_accessors() {
        let a = Angle::new(10, 20, 30);
        assert_eq!((a.pitch(), a.yaw(), a.roll()), (10.0, 20.0, 30.0));
        assert_eq!(a[1], 20.0);
        assert_eq!(format!("{a}"), "ang(10, 20, 30)");
        assert_eq!(format!("{a:.1}"), "ang(10.0, 20.0, 30.0)");
    }

    #[test]
    fn angle_arithmetic() {
        let a = Angle::new(10, 20, 30);
        let b = Angle::new(1, 2, 3);
        assert_eq!(a - b, Angle::new(9, 18, 27));
        assert_eq!(a + b, Angle::new(11, 22, 33));
        assert_eq!(a * 2.0, Angle::new(20, 40, 60));
        assert_eq!(Angle::from(Vec3::from(a)), a);
    }

    #[test]
    fn angle_normalize_wraps_pitch_and_yaw() {
        let mut a = Angle::new(-190.0, 190.0, 10.0);
        let rv = a.normalize();
        assert_eq!(rv, a);
        assert_eq!(a, Angle::new(170.0, -170.0, 10.0));
        assert_eq!(Angle::new(180, 0, 0).normalized(), Angle::new(-180, 0, 0));
        assert_eq!(Angle::new(720, -720, 0).normalized(), Angle::zero());
    }

    #[test]
    fn angle_normalize_discards_large_roll() {
        assert_eq!(Angle::new(0, 0, 49.5).normalized().z, 49.5);
        assert_eq!(Angle::new(0, 0, -49.5).normalized().z, -49.5);
        assert_eq!(Angle::new(0, 0, 50).normalized().z, 0.0);
        assert_eq!(Angle::new(0, 0, -50).normalized().z, 0.0);
        assert_eq!(Angle::new(0, 0, 170).normalized().z, 0.0);
        assert_eq!(Angle::new(0, 0, f32::NAN).normalized().z, 0.0);
    }

    #[test]
    fn angle_normalize_random() {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..1000 {
            let a = Angle::new(
                rng.gen_range(-10_000.0..10_000.0_f32),
                rng.gen_range(-10_000.0..10_000.0_f32),
                rng.gen_range(-100.0..100.0_f32),
            )
            .normalized();
            check_in_range!(a.x, ANGLE_RANGE_START..ANGLE_RANGE_END);
            check_in_range!(a.y, ANGLE_RANGE_START..ANGLE_RANGE_END);
            check_lt!(a.z.abs(), ROLL_LIMIT);
        }
    }

    #[test]
    fn angle_flip() {
        let a = Angle::new(30, -45, 5);
        assert_eq!(a.flip(), Angle::new(210, 135, 5));
        // Not wrapped: two flips are a full turn away, and normalising brings them back.
        assert_eq!(a.flip().flip(), Angle::new(390, 315, 5));
        check_almost_eq!(a.flip().flip().normalized(), a.normalized());
    }

    #[test]
    fn angle_flip_mirrors_forward_vertically() {
        let a = Angle::new(20, 70, 0);
        let f = a.forward();
        check_almost_eq!(a.flip().forward(), Vec3::new(f.x, f.y, -f.z));
    }

    #[test]
    fn basis_of_zero_angle() {
        let a = Angle::zero();
        check_almost_eq!(a.forward(), Vec3::new(1, 0, 0));
        check_almost_eq!(a.right(), Vec3::new(0, -1, 0));
        check_almost_eq!(a.up(), Vec3::new(0, 0, 1));
    }

    #[test]
    fn basis_of_quarter_turns() {
        let yawed = Angle::new(0, 90, 0);
        check_almost_eq!(yawed.forward(), Vec3::new(0, 1, 0));
        check_almost_eq!(yawed.right(), Vec3::new(1, 0, 0));
        check_almost_eq!(yawed.up(), Vec3::new(0, 0, 1));

        let pitched = Angle::new(90, 0, 0);
        check_almost_eq!(pitched.forward(), Vec3::new(0, 0, -1));
        check_almost_eq!(pitched.up(), Vec3::new(1, 0, 0));

        let rolled = Angle::new(0, 0, 90);
        check_almost_eq!(rolled.forward(), Vec3::new(1, 0, 0));
        check_almost_eq!(rolled.right(), Vec3::new(0, 0, -1));
        check_almost_eq!(rolled.up(), Vec3::new(0, -1, 0));
    }

    #[test]
    fn basis_is_orthonormal() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let a = Angle::new(
                rng.gen_range(-89.0..89.0_f32),
                rng.gen_range(-180.0..180.0_f32),
                rng.gen_range(-45.0..45.0_f32),
            );
            let (f, r, u) = a.basis();
            for v in [f, r, u] {
                check!((v.length() - 1.0).abs() < 1e-5, format!("{a}: {v}"));
            }
            check!(f.dot(r).abs() < 1e-5, format!("{a}"));
            check!(f.dot(u).abs() < 1e-5, format!("{a}"));
            check!(r.dot(u).abs() < 1e-5, format!("{a}"));
            check_almost_eq!(f, a.forward());
            check_almost_eq!(r, a.right());
            check_almost_eq!(u, a.up());
        }
    }
}
