#[allow(unused_imports)]
use crate::core::prelude::*;

use crate::util::linalg::Vec3;
use crate::util::trig;
use itertools::iproduct;
use num_traits::One;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    fmt::Formatter,
    ops::{Index, IndexMut, Mul},
};

fn fmt_rows(f: &mut Formatter<'_>, name: &str, rows: &[[f32; 4]]) -> fmt::Result {
    let precision = f.precision();
    let rows = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|x| match precision {
                    Some(p) => format!("{x:.p$}"),
                    None => format!("{x}"),
                })
                .join(", ")
        })
        .join("; ");
    write!(f, "{name}({rows})")
}

/// A row-major 3x4 affine transform, e.g. a bone-to-world matrix.
///
/// The left 3x3 block holds the local x, y and z axes as its **columns**; the last column
/// is the origin:
/// ```text
/// | x_axis.x  y_axis.x  z_axis.x  origin.x |
/// | x_axis.y  y_axis.y  z_axis.y  origin.y |
/// | x_axis.z  y_axis.z  z_axis.z  origin.z |
/// ```
///
/// The default value is the zero matrix. [`invalidate`](Matrix3x4::invalidate) fills the
/// matrix with `+inf`, which marks it as "not computed yet".
#[derive(
    Default, Debug, Copy, Clone, PartialEq, Serialize, Deserialize, bincode::Encode, bincode::Decode,
)]
#[must_use]
pub struct Matrix3x4 {
    pub rows: [[f32; 4]; 3],
}

impl Matrix3x4 {
    pub fn from_rows(rows: [[f32; 4]; 3]) -> Self {
        Self { rows }
    }

    /// Builds the transform from the local axes and the origin.
    ///
    /// # Examples
    ///
    /// ```
    /// use viewgeom::util::linalg::Vec3;
    /// use viewgeom::util::matrix::Matrix3x4;
    ///
    /// let m = Matrix3x4::from_axes(
    ///     Vec3::new(1, 0, 0),
    ///     Vec3::new(0, 1, 0),
    ///     Vec3::new(0, 0, 1),
    ///     Vec3::new(5, 6, 7),
    /// );
    /// assert_eq!(m[0], [1.0, 0.0, 0.0, 5.0]);
    /// assert_eq!(m.transform_point(Vec3::new(1, 1, 1)), Vec3::new(6, 7, 8));
    /// ```
    pub fn from_axes(x_axis: Vec3, y_axis: Vec3, z_axis: Vec3, origin: Vec3) -> Self {
        Self {
            rows: [
                [x_axis.x, y_axis.x, z_axis.x, origin.x],
                [x_axis.y, y_axis.y, z_axis.y, origin.y],
                [x_axis.z, y_axis.z, z_axis.z, origin.z],
            ],
        }
    }

    /// Reads 12 floats in row-major order, e.g. from an external bone array.
    ///
    /// # Errors
    /// If `values` holds fewer than 12 floats.
    pub fn from_slice(values: &[f32]) -> Result<Self> {
        if values.len() < 12 {
            bail!("Matrix3x4::from_slice(): need 12 floats, got {}", values.len());
        }
        let mut rv = Self::default();
        for (i, j) in iproduct!(0..3, 0..4) {
            rv.rows[i][j] = values[i * 4 + j];
        }
        Ok(rv)
    }

    #[must_use]
    pub fn as_flat(&self) -> &[f32] {
        self.rows.as_flattened()
    }

    /// Only the last column changes.
    pub fn set_origin(&mut self, origin: Vec3) {
        self.rows[0][3] = origin.x;
        self.rows[1][3] = origin.y;
        self.rows[2][3] = origin.z;
    }
    #[must_use]
    pub fn origin(&self) -> Vec3 {
        self.column(3)
    }

    /// Local axis `i` (0 = x, 1 = y, 2 = z), i.e. column `i`.
    #[must_use]
    pub fn axis(&self, i: usize) -> Vec3 {
        check_lt!(i, 3);
        self.column(i)
    }

    fn column(&self, j: usize) -> Vec3 {
        Vec3 {
            x: self.rows[0][j],
            y: self.rows[1][j],
            z: self.rows[2][j],
        }
    }

    /// The first three entries of row `i`.
    #[must_use]
    pub fn row_axis(&self, i: usize) -> Vec3 {
        let row = &self.rows[i];
        Vec3 {
            x: row[0],
            y: row[1],
            z: row[2],
        }
    }

    pub fn invalidate(&mut self) {
        self.rows = [[f32::INFINITY; 4]; 3];
    }
    /// False after [`invalidate`](Matrix3x4::invalidate), or if any entry is NaN.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.as_flat().iter().all(|x| x.is_finite())
    }

    /// See [`trig::vector_transform`].
    #[must_use]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        trig::vector_transform(point, self)
    }
}

impl Index<usize> for Matrix3x4 {
    type Output = [f32; 4];

    fn index(&self, index: usize) -> &Self::Output {
        &self.rows[index]
    }
}
impl IndexMut<usize> for Matrix3x4 {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.rows[index]
    }
}

impl fmt::Display for Matrix3x4 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt_rows(f, "mat3x4", &self.rows)
    }
}

/// A full row-major 4x4 matrix, as used for view and projection matrices.
///
/// The default value is the zero matrix; see [`one`](Matrix4x4::one) for the identity.
#[derive(
    Default, Debug, Copy, Clone, PartialEq, Serialize, Deserialize, bincode::Encode, bincode::Decode,
)]
#[must_use]
pub struct Matrix4x4 {
    pub rows: [[f32; 4]; 4],
}

impl Matrix4x4 {
    pub fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        Self { rows }
    }

    pub fn one() -> Self {
        Self::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Builds a rotation from three basis vectors, written as columns 0 to 2. The last row
    /// and column are those of the identity.
    pub fn from_basis(forward: Vec3, left: Vec3, up: Vec3) -> Self {
        Self::from_rows([
            [forward.x, left.x, up.x, 0.0],
            [forward.y, left.y, up.y, 0.0],
            [forward.z, left.z, up.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Reads 16 floats in row-major order, e.g. a view matrix read from a game's memory.
    ///
    /// # Errors
    /// If `values` holds fewer than 16 floats.
    pub fn from_slice(values: &[f32]) -> Result<Self> {
        let values: [f32; 16] = values
            .get(..16)
            .and_then(|values| values.try_into().ok())
            .with_context(|| {
                format!("Matrix4x4::from_slice(): need 16 floats, got {}", values.len())
            })?;
        Ok(values.into())
    }

    #[must_use]
    pub fn as_flat(&self) -> &[f32] {
        self.rows.as_flattened()
    }

    pub fn transposed(&self) -> Self {
        let mut rv = Self::default();
        for (i, j) in iproduct!(0..4, 0..4) {
            rv.rows[i][j] = self.rows[j][i];
        }
        rv
    }

    /// Checks every entry against [`EPSILON`](crate::core::config::EPSILON).
    #[must_use]
    pub fn almost_eq(&self, rhs: Matrix4x4) -> bool {
        self.as_flat()
            .iter()
            .zip(rhs.as_flat())
            .all(|(a, b)| (a - b).abs() < EPSILON)
    }
}

impl From<[f32; 16]> for Matrix4x4 {
    fn from(value: [f32; 16]) -> Self {
        let mut rv = Self::default();
        for (i, j) in iproduct!(0..4, 0..4) {
            rv.rows[i][j] = value[i * 4 + j];
        }
        rv
    }
}

/// Rows 0 to 2 are copied; the last row becomes `[0, 0, 0, 1]`.
impl From<Matrix3x4> for Matrix4x4 {
    fn from(value: Matrix3x4) -> Self {
        Self::from_rows([
            value.rows[0],
            value.rows[1],
            value.rows[2],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }
}

impl One for Matrix4x4 {
    fn one() -> Self {
        Self::one()
    }
}

impl Mul<Matrix4x4> for Matrix4x4 {
    type Output = Matrix4x4;

    fn mul(self, rhs: Matrix4x4) -> Self::Output {
        let mut rv = Self::default();
        for (i, j) in iproduct!(0..4, 0..4) {
            rv.rows[i][j] = (0..4).map(|k| self.rows[i][k] * rhs.rows[k][j]).sum();
        }
        rv
    }
}

impl Index<usize> for Matrix4x4 {
    type Output = [f32; 4];

    fn index(&self, index: usize) -> &Self::Output {
        &self.rows[index]
    }
}
impl IndexMut<usize> for Matrix4x4 {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.rows[index]
    }
}

impl fmt::Display for Matrix4x4 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt_rows(f, "mat4x4", &self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::angle::Angle;

    fn sample_3x4() -> Matrix3x4 {
        Matrix3x4::from_rows([
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
        ])
    }

    #[test]
    fn matrix3x4_default_is_zero() {
        let m = Matrix3x4::default();
        check!(m.as_flat().iter().all(|x| *x == 0.0));
        assert_eq!(m.as_flat().len(), 12);
    }

    #[test]
    fn matrix3x4_from_axes_writes_columns() {
        let m = Matrix3x4::from_axes(
            Vec3::new(1, 2, 3),
            Vec3::new(4, 5, 6),
            Vec3::new(7, 8, 9),
            Vec3::new(10, 11, 12),
        );
        assert_eq!(m[0], [1.0, 4.0, 7.0, 10.0]);
        assert_eq!(m[1], [2.0, 5.0, 8.0, 11.0]);
        assert_eq!(m[2], [3.0, 6.0, 9.0, 12.0]);
        assert_eq!(m.axis(1), Vec3::new(4, 5, 6));
        assert_eq!(m.origin(), Vec3::new(10, 11, 12));
        assert_eq!(m.row_axis(2), Vec3::new(3, 6, 9));
    }

    #[test]
    #[should_panic(expected = "check failed")]
    fn matrix3x4_axis_out_of_range() {
        let _ = Matrix3x4::default().axis(3);
    }

    #[test]
    fn matrix3x4_set_origin_only_touches_last_column() {
        let mut m = sample_3x4();
        m.set_origin(Vec3::new(-1, -2, -3));
        assert_eq!(m[0], [1.0, 2.0, 3.0, -1.0]);
        assert_eq!(m[1], [5.0, 6.0, 7.0, -2.0]);
        assert_eq!(m[2], [9.0, 10.0, 11.0, -3.0]);
    }

    #[test]
    fn matrix3x4_invalidate() {
        let mut m = sample_3x4();
        check!(m.is_valid());
        m.invalidate();
        check_false!(m.is_valid());
        check!(m.as_flat().iter().all(|x| *x == f32::INFINITY));
        m[1][2] = 0.0;
        check_false!(m.is_valid());
    }

    #[test]
    fn matrix3x4_index_mut() {
        let mut m = Matrix3x4::default();
        m[2][3] = 7.0;
        assert_eq!(m.rows[2][3], 7.0);
        assert_eq!(m.origin(), Vec3::new(0, 0, 7));
    }

    #[test]
    fn matrix3x4_from_slice() {
        let floats: Vec<f32> = (1..=13).map(|x| x as f32).collect();
        assert_eq!(Matrix3x4::from_slice(&floats).unwrap(), sample_3x4());
        assert!(Matrix3x4::from_slice(&floats[..11]).is_err());
    }

    #[test]
    fn matrix3x4_transform_point_moves_along_axes() {
        // Local axes rotated a quarter turn about z.
        let (forward, right, up) = Angle::new(0, 90, 0).basis();
        let m = Matrix3x4::from_axes(forward, -right, up, Vec3::new(100, 0, 0));
        check_almost_eq!(m.transform_point(Vec3::new(1, 0, 0)), Vec3::new(100, 1, 0));
        check_almost_eq!(m.transform_point(Vec3::new(0, 1, 0)), Vec3::new(99, 0, 0));
        check_almost_eq!(m.transform_point(Vec3::zero()), m.origin());
    }

    #[test]
    fn matrix3x4_display() {
        let m = Matrix3x4::from_axes(
            Vec3::new(1, 0, 0),
            Vec3::new(0, 1, 0),
            Vec3::new(0, 0, 1),
            Vec3::new(0.5, 0, 0),
        );
        assert_eq!(
            format!("{m}"),
            "mat3x4(1, 0, 0, 0.5; 0, 1, 0, 0; 0, 0, 1, 0)"
        );
        assert_eq!(
            format!("{m:.1}"),
            "mat3x4(1.0, 0.0, 0.0, 0.5; 0.0, 1.0, 0.0, 0.0; 0.0, 0.0, 1.0, 0.0)"
        );
    }

    #[test]
    fn matrix4x4_from_matrix3x4() {
        let m = Matrix4x4::from(sample_3x4());
        assert_eq!(m[0], [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(m[2], [9.0, 10.0, 11.0, 12.0]);
        assert_eq!(m[3], [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn matrix4x4_from_basis() {
        let m = Matrix4x4::from_basis(
            Vec3::new(1, 2, 3),
            Vec3::new(4, 5, 6),
            Vec3::new(7, 8, 9),
        );
        assert_eq!(m[0], [1.0, 4.0, 7.0, 0.0]);
        assert_eq!(m[1], [2.0, 5.0, 8.0, 0.0]);
        assert_eq!(m[2], [3.0, 6.0, 9.0, 0.0]);
        assert_eq!(m[3], [0.0, 0.0, 0.0, 1.0]);

        let identity = Matrix4x4::from_basis(
            Vec3::new(1, 0, 0),
            Vec3::new(0, 1, 0),
            Vec3::new(0, 0, 1),
        );
        assert_eq!(identity, Matrix4x4::one());
    }

    #[test]
    fn matrix4x4_from_floats() {
        let floats: Vec<f32> = (0..16).map(|x| x as f32).collect();
        let m = Matrix4x4::from_slice(&floats).unwrap();
        assert_eq!(m[1], [4.0, 5.0, 6.0, 7.0]);
        assert_eq!(m[3][3], 15.0);
        assert_eq!(m.as_flat(), floats.as_slice());
        let array: [f32; 16] = floats.clone().try_into().unwrap();
        assert_eq!(Matrix4x4::from(array), m);
        assert!(Matrix4x4::from_slice(&floats[..15]).is_err());
    }

    #[test]
    fn matrix4x4_transpose_and_multiply() {
        let floats: Vec<f32> = (0..16).map(|x| x as f32).collect();
        let m = Matrix4x4::from_slice(&floats).unwrap();
        let t = m.transposed();
        assert_eq!(t[0], [0.0, 4.0, 8.0, 12.0]);
        assert_eq!(t.transposed(), m);
        assert_eq!(m * Matrix4x4::one(), m);
        assert_eq!(Matrix4x4::one() * m, m);
        assert_eq!(<Matrix4x4 as One>::one(), Matrix4x4::one());

        // A rotation basis is orthonormal, so its transpose is its inverse.
        let (forward, right, up) = Angle::new(30, 60, 10).basis();
        let r = Matrix4x4::from_basis(forward, -right, up);
        check!((r * r.transposed()).almost_eq(Matrix4x4::one()));
    }
}
