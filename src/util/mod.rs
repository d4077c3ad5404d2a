pub mod angle;
pub mod assert;
#[cfg(feature = "egui")]
pub mod interop;
pub mod linalg;
pub mod log;
pub mod matrix;
pub mod trig;

pub mod gg_float {
    use crate::util::angle::Angle;
    use crate::util::linalg::{Vec2, Vec3};
    use crate::util::matrix::{Matrix3x4, Matrix4x4};
    use num_traits::Zero;

    /// Anything made out of floats that can be checked for NaN and infinities.
    pub trait GgFloat {
        fn is_finite(&self) -> bool;
    }

    impl GgFloat for f32 {
        fn is_finite(&self) -> bool {
            f32::is_finite(*self)
        }
    }

    impl GgFloat for Vec2 {
        fn is_finite(&self) -> bool {
            self.x.is_finite() && self.y.is_finite()
        }
    }

    impl GgFloat for Vec3 {
        fn is_finite(&self) -> bool {
            self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
        }
    }

    impl GgFloat for Angle {
        fn is_finite(&self) -> bool {
            self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
        }
    }

    impl GgFloat for Matrix3x4 {
        fn is_finite(&self) -> bool {
            self.as_flat().iter().all(|x| x.is_finite())
        }
    }

    impl GgFloat for Matrix4x4 {
        fn is_finite(&self) -> bool {
            self.as_flat().iter().all(|x| x.is_finite())
        }
    }

    pub fn force_positive_zero(x: f32) -> f32 {
        if x.is_zero() { 0.0 } else { x }
    }

    /// IEEE-754 `remainder()`: `x - n * y` where `n` is `x / y` rounded to the nearest integer,
    /// ties to even. The result lies in `[-y/2, y/2]` and takes the sign that gets it there.
    pub fn ieee_remainder(x: f32, y: f32) -> f32 {
        let (x, y) = (f64::from(x), f64::from(y));
        #[allow(clippy::cast_possible_truncation)]
        let rv = (x - (x / y).round_ties_even() * y) as f32;
        rv
    }

}
