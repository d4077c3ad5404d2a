#[allow(unused_imports)]
pub use itertools::Itertools;
#[allow(unused_imports)]
pub use num_traits;

#[allow(unused_imports)]
pub use anyhow::{anyhow, bail, Context, Result};
#[allow(unused_imports)]
pub use tracing::{error, info, warn};

#[allow(unused_imports)]
pub use crate::{
    core::config::*,
    util::{
        angle::Angle,
        assert::*,
        gg_float::GgFloat,
        linalg,
        linalg::{AlignedVec3, Position2d, Position3d, Rect, Size, Vec2, Vec3},
        matrix::{Matrix3x4, Matrix4x4},
        trig,
        trig::{
            calculate_angle, calculate_angle_between, deg2rad, normalize_angle,
            normalize_angle_between, rad2deg, sin_cos, vector_transform,
        },
    },
};
