#[allow(unused_imports)]
use crate::core::prelude::*;

use crate::util::angle::Angle;
use crate::util::gg_float;
use crate::util::trig;
use num_traits::{AsPrimitive, Zero};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::{
    fmt,
    fmt::Formatter,
    ops::{Add, AddAssign, Div, Index, IndexMut, Mul, Neg, Sub, SubAssign},
};

/// A 2D point or vector using 32-bit floating point coordinates.
///
/// This is the type that screen-space positions are expressed in, and what gets handed to the
/// UI layer (see [`interop`](crate::util::interop)).
///
/// # Examples
///
/// ```
/// use viewgeom::util::linalg::Vec2;
///
/// // Any pair of primitive numbers works; they are cast to `f32`.
/// let a = Vec2::new(3, 4.5);
/// let b = Vec2::new(1.0, 0.5);
/// assert_eq!(a - b, Vec2 { x: 2.0, y: 4.0 });
/// assert_eq!((a * 2.0).x, 6.0);
/// ```
#[derive(
    Default, Debug, Copy, Clone, PartialEq, Serialize, Deserialize, bincode::Encode, bincode::Decode,
)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

/// A bare 2D position. Identical to [`Vec2`]; the alias documents intent at API boundaries.
pub type Position2d = Vec2;

impl Vec2 {
    #[must_use]
    pub fn new(x: impl AsPrimitive<f32>, y: impl AsPrimitive<f32>) -> Vec2 {
        Vec2 {
            x: x.as_(),
            y: y.as_(),
        }
    }
    #[must_use]
    pub fn zero() -> Vec2 {
        Vec2 { x: 0.0, y: 0.0 }
    }
    #[must_use]
    pub fn splat(v: f32) -> Vec2 {
        Vec2 { x: v, y: v }
    }

    /// Reads the first two floats of `values`.
    ///
    /// # Errors
    /// If `values` holds fewer than two floats.
    pub fn from_slice(values: &[f32]) -> Result<Vec2> {
        match values {
            [x, y, ..] => Ok(Vec2 { x: *x, y: *y }),
            _ => bail!("Vec2::from_slice(): need 2 floats, got {}", values.len()),
        }
    }

    #[must_use]
    pub fn dot(&self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }
    #[must_use]
    pub fn len_squared(&self) -> f32 {
        self.dot(*self)
    }
    #[must_use]
    pub fn len(&self) -> f32 {
        self.len_squared().sqrt()
    }

    /// Rounds both components to the nearest integer, e.g. to snap to the pixel grid.
    /// Halfway cases round away from zero, and negative zero comes out as positive zero.
    #[must_use]
    pub fn round(&self) -> Vec2 {
        Vec2 {
            x: gg_float::force_positive_zero(self.x.round()),
            y: gg_float::force_positive_zero(self.y.round()),
        }
    }

    /// Checks if the vector is approximately equal to another vector, that is, whether the
    /// length of their difference is less than [`EPSILON`](crate::core::config::EPSILON).
    #[must_use]
    pub fn almost_eq(&self, rhs: Vec2) -> bool {
        (*self - rhs).len() < EPSILON
    }
}

impl Zero for Vec2 {
    fn zero() -> Self {
        Vec2::zero()
    }

    fn is_zero(&self) -> bool {
        self.almost_eq(Self::zero())
    }
}

impl From<[f32; 2]> for Vec2 {
    fn from(value: [f32; 2]) -> Self {
        Vec2 {
            x: value[0],
            y: value[1],
        }
    }
}
impl From<Vec2> for [f32; 2] {
    fn from(value: Vec2) -> Self {
        [value.x, value.y]
    }
}
impl From<Size> for Vec2 {
    fn from(value: Size) -> Self {
        Vec2 {
            x: value.width,
            y: value.height,
        }
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "vec(")?;
        if let Some(p) = f.precision() {
            write!(f, "{0:.2$}, {1:.2$}", self.x, self.y, p)?;
        } else {
            write!(f, "{}, {}", self.x, self.y)?;
        }
        write!(f, ")")
    }
}

impl Index<usize> for Vec2 {
    type Output = f32;

    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Vec2: index out of range: {index}"),
        }
    }
}
impl IndexMut<usize> for Vec2 {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => panic!("Vec2: index out of range: {index}"),
        }
    }
}

impl Add<Vec2> for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Self::Output {
        Vec2 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}
impl AddAssign<Vec2> for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}
impl Sub<Vec2> for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Self::Output {
        Vec2 {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}
impl SubAssign<Vec2> for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}
impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Self::Output {
        Vec2 {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}
impl Mul<Vec2> for f32 {
    type Output = Vec2;

    fn mul(self, rhs: Vec2) -> Self::Output {
        rhs * self
    }
}
impl Div<f32> for Vec2 {
    type Output = Vec2;

    fn div(self, rhs: f32) -> Self::Output {
        Vec2 {
            x: self.x / rhs,
            y: self.y / rhs,
        }
    }
}
impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Self::Output {
        Vec2 {
            x: -self.x,
            y: -self.y,
        }
    }
}

/// A 2D extent.
#[derive(
    Default, Debug, Copy, Clone, PartialEq, Serialize, Deserialize, bincode::Encode, bincode::Decode,
)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[must_use]
    pub fn new(width: impl AsPrimitive<f32>, height: impl AsPrimitive<f32>) -> Size {
        Size {
            width: width.as_(),
            height: height.as_(),
        }
    }
    #[must_use]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

impl From<Vec2> for Size {
    fn from(value: Vec2) -> Self {
        Size {
            width: value.x,
            height: value.y,
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl Add<Size> for Size {
    type Output = Size;

    fn add(self, rhs: Size) -> Self::Output {
        Size {
            width: self.width + rhs.width,
            height: self.height + rhs.height,
        }
    }
}
impl Sub<Size> for Size {
    type Output = Size;

    fn sub(self, rhs: Size) -> Self::Output {
        Size {
            width: self.width - rhs.width,
            height: self.height - rhs.height,
        }
    }
}
impl SubAssign<Size> for Size {
    fn sub_assign(&mut self, rhs: Size) {
        self.width -= rhs.width;
        self.height -= rhs.height;
    }
}
impl Div<f32> for Size {
    type Output = Size;

    fn div(self, rhs: f32) -> Self::Output {
        Size {
            width: self.width / rhs,
            height: self.height / rhs,
        }
    }
}

/// Implements the operations shared by every three-float position type: [`Vec3`] and
/// [`Angle`]. Both keep their components in public `x`, `y`, `z` fields.
macro_rules! impl_position3d {
    ($t:ident) => {
        impl $t {
            #[must_use]
            pub fn new(
                x: impl ::num_traits::AsPrimitive<f32>,
                y: impl ::num_traits::AsPrimitive<f32>,
                z: impl ::num_traits::AsPrimitive<f32>,
            ) -> $t {
                $t {
                    x: ::num_traits::AsPrimitive::as_(x),
                    y: ::num_traits::AsPrimitive::as_(y),
                    z: ::num_traits::AsPrimitive::as_(z),
                }
            }
            #[must_use]
            pub fn zero() -> $t {
                $t {
                    x: 0.0,
                    y: 0.0,
                    z: 0.0,
                }
            }

            /// Euclidean length over all three axes.
            #[must_use]
            pub fn length(&self) -> f32 {
                self.length_sqr().sqrt()
            }
            /// Squared length; use this instead of [`length`](Self::length) when only
            /// comparing lengths, to skip the square root.
            #[must_use]
            pub fn length_sqr(&self) -> f32 {
                self.x * self.x + self.y * self.y + self.z * self.z
            }
            /// Length of the projection onto the xy-plane, i.e. ignoring `z`.
            #[must_use]
            pub fn length_2d(&self) -> f32 {
                (self.x * self.x + self.y * self.y).sqrt()
            }

            /// True if every axis lies strictly within
            /// `(-IS_ZERO_TOLERANCE, IS_ZERO_TOLERANCE)`.
            #[must_use]
            pub fn is_zero(&self) -> bool {
                self.is_zero_within($crate::core::config::IS_ZERO_TOLERANCE)
            }
            /// True if every axis lies strictly within `(-tolerance, tolerance)`.
            #[must_use]
            pub fn is_zero_within(&self, tolerance: f32) -> bool {
                [self.x, self.y, self.z]
                    .iter()
                    .all(|v| *v > -tolerance && *v < tolerance)
            }
            /// True if no axis is NaN or infinite.
            #[must_use]
            pub fn is_valid(&self) -> bool {
                self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
            }

            /// True if the length of the difference is less than
            /// [`EPSILON`](crate::core::config::EPSILON).
            #[must_use]
            pub fn almost_eq(&self, rhs: $t) -> bool {
                (*self - rhs).length() < $crate::core::config::EPSILON
            }
        }

        impl From<[f32; 3]> for $t {
            fn from(value: [f32; 3]) -> Self {
                $t {
                    x: value[0],
                    y: value[1],
                    z: value[2],
                }
            }
        }
        impl From<$t> for [f32; 3] {
            fn from(value: $t) -> Self {
                [value.x, value.y, value.z]
            }
        }

        impl ::std::ops::Index<usize> for $t {
            type Output = f32;

            fn index(&self, index: usize) -> &Self::Output {
                match index {
                    0 => &self.x,
                    1 => &self.y,
                    2 => &self.z,
                    _ => panic!("{}: index out of range: {index}", stringify!($t)),
                }
            }
        }
        impl ::std::ops::IndexMut<usize> for $t {
            fn index_mut(&mut self, index: usize) -> &mut Self::Output {
                match index {
                    0 => &mut self.x,
                    1 => &mut self.y,
                    2 => &mut self.z,
                    _ => panic!("{}: index out of range: {index}", stringify!($t)),
                }
            }
        }

        impl ::std::ops::Add<$t> for $t {
            type Output = $t;

            fn add(self, rhs: $t) -> Self::Output {
                $t {
                    x: self.x + rhs.x,
                    y: self.y + rhs.y,
                    z: self.z + rhs.z,
                }
            }
        }
        impl ::std::ops::AddAssign<$t> for $t {
            fn add_assign(&mut self, rhs: $t) {
                self.x += rhs.x;
                self.y += rhs.y;
                self.z += rhs.z;
            }
        }
        impl ::std::ops::Sub<$t> for $t {
            type Output = $t;

            fn sub(self, rhs: $t) -> Self::Output {
                $t {
                    x: self.x - rhs.x,
                    y: self.y - rhs.y,
                    z: self.z - rhs.z,
                }
            }
        }
        impl ::std::ops::SubAssign<$t> for $t {
            fn sub_assign(&mut self, rhs: $t) {
                self.x -= rhs.x;
                self.y -= rhs.y;
                self.z -= rhs.z;
            }
        }
        impl ::std::ops::Mul<f32> for $t {
            type Output = $t;

            fn mul(self, rhs: f32) -> Self::Output {
                $t {
                    x: self.x * rhs,
                    y: self.y * rhs,
                    z: self.z * rhs,
                }
            }
        }
        impl ::std::ops::Mul<$t> for f32 {
            type Output = $t;

            fn mul(self, rhs: $t) -> Self::Output {
                rhs * self
            }
        }
        impl ::std::ops::MulAssign<f32> for $t {
            fn mul_assign(&mut self, rhs: f32) {
                self.x *= rhs;
                self.y *= rhs;
                self.z *= rhs;
            }
        }
        // Component-wise.
        impl ::std::ops::MulAssign<$t> for $t {
            fn mul_assign(&mut self, rhs: $t) {
                self.x *= rhs.x;
                self.y *= rhs.y;
                self.z *= rhs.z;
            }
        }
        impl ::std::ops::Div<f32> for $t {
            type Output = $t;

            fn div(self, rhs: f32) -> Self::Output {
                $t {
                    x: self.x / rhs,
                    y: self.y / rhs,
                    z: self.z / rhs,
                }
            }
        }
        impl ::std::ops::DivAssign<f32> for $t {
            fn div_assign(&mut self, rhs: f32) {
                self.x /= rhs;
                self.y /= rhs;
                self.z /= rhs;
            }
        }
        impl ::std::ops::Neg for $t {
            type Output = $t;

            fn neg(self) -> Self::Output {
                $t {
                    x: -self.x,
                    y: -self.y,
                    z: -self.z,
                }
            }
        }
    };
}
pub(crate) use impl_position3d;

/// A 3D world-space vector or position.
///
/// Besides the usual arithmetic, this type carries the two "normalisation" operations used
/// by view-angle code, which do very different things:
/// - [`wrap_to_range`](Vec3::wrap_to_range) treats the components as angles in degrees and
///   wraps them, it does **not** produce a unit vector;
/// - [`to_unit_length`](Vec3::to_unit_length) rescales to length 1.
///
/// Equality (`==`) is exact per component. Use [`almost_eq`](Vec3::almost_eq) to compare
/// results of floating point computations.
///
/// # Examples
///
/// ```
/// use viewgeom::util::linalg::Vec3;
///
/// let mut v = Vec3::new(3.0, 0.0, 4.0);
/// assert_eq!(v.length(), 5.0);
/// let old_len = v.to_unit_length();
/// assert_eq!(old_len, 5.0);
/// assert!((v.length() - 1.0).abs() < 1e-5);
/// ```
#[derive(
    Default, Debug, Copy, Clone, PartialEq, Serialize, Deserialize, bincode::Encode, bincode::Decode,
)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// A bare 3D position. Identical to [`Vec3`]; the alias documents intent at API boundaries.
pub type Position3d = Vec3;

impl_position3d!(Vec3);

impl Vec3 {
    /// Reads the first three floats of `values`, e.g. the `origin` field of an external
    /// structure that was exposed as a float slice.
    ///
    /// # Errors
    /// If `values` holds fewer than three floats.
    pub fn from_slice(values: &[f32]) -> Result<Vec3> {
        match values {
            [x, y, z, ..] => Ok(Vec3 {
                x: *x,
                y: *y,
                z: *z,
            }),
            _ => bail!("Vec3::from_slice(): need 3 floats, got {}", values.len()),
        }
    }

    #[must_use]
    pub fn dot(&self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
    #[must_use]
    pub fn cross(&self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }
    #[must_use]
    pub fn dist(&self, other: Vec3) -> f32 {
        (*self - other).length()
    }

    /// The view angle that looks along this vector. See [`trig::calculate_angle`].
    #[must_use]
    pub fn to_angle(&self) -> Angle {
        trig::calculate_angle(*self)
    }

    /// Wraps `x` and `y` into `[-180, 180]` with the IEEE-754 signed remainder, and zeroes
    /// `z`. Non-finite `x` or `y` become `0`.
    ///
    /// This is an angle operation on a vector-typed value. It does not change the vector's
    /// length to 1; for that, see [`to_unit_length`](Vec3::to_unit_length).
    pub fn wrap_to_range(&mut self) -> Vec3 {
        let wrap = |v: f32| {
            if v.is_finite() {
                gg_float::ieee_remainder(v, FULL_TURN_DEGREES)
            } else {
                0.0
            }
        };
        self.x = wrap(self.x);
        self.y = wrap(self.y);
        self.z = 0.0;
        *self
    }

    /// Rescales this vector to unit length and returns its length from before the call.
    ///
    /// `f32::EPSILON` is added to the divisor, so the zero vector stays zero instead of
    /// turning into NaN.
    pub fn to_unit_length(&mut self) -> f32 {
        let radius = self.length();
        let inv_radius = 1.0 / (radius + f32::EPSILON);
        *self *= inv_radius;
        radius
    }

    /// A unit-length copy of this vector, see [`to_unit_length`](Vec3::to_unit_length).
    #[must_use]
    pub fn unit(&self) -> Vec3 {
        let mut rv = *self;
        rv.to_unit_length();
        rv
    }

    /// Compares two vectors based on their squared length.
    ///
    /// Falls back to [`total_cmp()`](f32::total_cmp) if either length is NaN, and logs a
    /// warning when doing so.
    #[must_use]
    pub fn cmp_by_length(&self, other: &Vec3) -> Ordering {
        let self_len = self.length_sqr();
        let other_len = other.length_sqr();
        self_len.partial_cmp(&other_len).unwrap_or_else(|| {
            warn!(
                "cmp_by_length(): partial_cmp() failed: {} vs. {}",
                self, other
            );
            self_len.total_cmp(&other_len)
        })
    }

    /// Compares two vectors based on their distance from `origin`, e.g. to find the target
    /// closest to the local player.
    #[must_use]
    pub fn cmp_by_dist(&self, other: &Vec3, origin: Vec3) -> Ordering {
        (*self - origin).cmp_by_length(&(*other - origin))
    }
}

impl From<Angle> for Vec3 {
    fn from(value: Angle) -> Self {
        Vec3 {
            x: value.x,
            y: value.y,
            z: value.z,
        }
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "vec3(")?;
        if let Some(p) = f.precision() {
            write!(f, "{0:.3$}, {1:.3$}, {2:.3$}", self.x, self.y, self.z, p)?;
        } else {
            write!(f, "{}, {}, {}", self.x, self.y, self.z)?;
        }
        write!(f, ")")
    }
}

/// A [`Vec3`] padded to 16 bytes, for exchanging vectors with SIMD-friendly external
/// structures. The padding float `w` carries no meaning and is zeroed on construction.
#[derive(
    Default, Debug, Copy, Clone, PartialEq, Serialize, Deserialize, bincode::Encode, bincode::Decode,
)]
#[repr(C, align(16))]
pub struct AlignedVec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl AlignedVec3 {
    #[must_use]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, w: 0.0 }
    }
    /// Overwrites `x`, `y` and `z`; `w` is left untouched.
    pub fn assign(&mut self, value: Vec3) {
        self.x = value.x;
        self.y = value.y;
        self.z = value.z;
    }
    #[must_use]
    pub fn as_vec3(&self) -> Vec3 {
        Vec3 {
            x: self.x,
            y: self.y,
            z: self.z,
        }
    }
}

impl From<Vec3> for AlignedVec3 {
    fn from(value: Vec3) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}
impl From<AlignedVec3> for Vec3 {
    fn from(value: AlignedVec3) -> Self {
        value.as_vec3()
    }
}

/// An axis-aligned rectangle given by its top-left corner and its size, in screen space
/// (y grows downward).
///
/// # Examples
///
/// ```
/// use viewgeom::util::linalg::{Rect, Vec2};
///
/// let rect = Rect::new(10, 10, 100, 50);
/// assert!(rect.contains_point(Vec2::new(50, 30)));
/// // The bounds are open: points on the border are outside.
/// assert!(!rect.contains_point(Vec2::new(10, 30)));
/// assert_eq!(rect.size(), Vec2::new(100, 50));
/// ```
#[derive(
    Default, Debug, Copy, Clone, PartialEq, Serialize, Deserialize, bincode::Encode, bincode::Decode,
)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(
        x: impl AsPrimitive<f32>,
        y: impl AsPrimitive<f32>,
        width: impl AsPrimitive<f32>,
        height: impl AsPrimitive<f32>,
    ) -> Self {
        Self {
            x: x.as_(),
            y: y.as_(),
            width: width.as_(),
            height: height.as_(),
        }
    }
    pub fn from_pos_size(pos: Vec2, size: Size) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            width: size.width,
            height: size.height,
        }
    }
    /// Like [`from_pos_size`](Rect::from_pos_size), with the size given as a vector.
    pub fn from_vecs(pos: Vec2, size: Vec2) -> Self {
        Self::from_pos_size(pos, size.into())
    }

    #[must_use]
    pub fn pos(&self) -> Vec2 {
        Vec2 {
            x: self.x,
            y: self.y,
        }
    }
    #[must_use]
    pub fn size(&self) -> Vec2 {
        Vec2 {
            x: self.width,
            y: self.height,
        }
    }
    #[must_use]
    pub fn extent(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }
    #[must_use]
    pub fn bottom_right(&self) -> Vec2 {
        self.pos() + self.size()
    }
    #[must_use]
    pub fn centre(&self) -> Vec2 {
        self.pos() + self.size() / 2.0
    }

    /// Strict containment: points on the border are not inside.
    #[must_use]
    pub fn contains_point(&self, pos: Vec2) -> bool {
        pos.x > self.x
            && pos.y > self.y
            && pos.x < self.x + self.width
            && pos.y < self.y + self.height
    }
}

/// Interpreted as `[x, y, width, height]`.
impl From<[f32; 4]> for Rect {
    fn from(value: [f32; 4]) -> Self {
        Self {
            x: value[0],
            y: value[1],
            width: value[2],
            height: value[3],
        }
    }
}
impl From<Rect> for [f32; 4] {
    fn from(value: Rect) -> Self {
        [value.x, value.y, value.width, value.height]
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "rect({}, {}, {})", self.x, self.y, self.extent())
    }
}
