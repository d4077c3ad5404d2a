//! Runtime invariant checks. Unlike `debug_assert!`, these stay on in release builds: a
//! violated geometric invariant is a bug in the caller and should stop it loudly.

use std::fmt;
use std::ops::Range;

pub fn assert_partial_ord<T: PartialOrd>(_: &T) {}
pub fn assert_partial_eq<T: PartialEq>(_: &T) {}
pub fn assert_same_type<T, U>(_: &T, _: &U) {}
pub fn assert_type<T>(_: &T) {}

#[cold]
#[track_caller]
pub fn check_failed(location: &str, expr: &str, detail: fmt::Arguments<'_>) -> ! {
    panic!("check failed: {location}: {expr}{detail}")
}

pub fn in_half_open_range(value: f32, range: &Range<f32>) -> bool {
    range.contains(&value)
}

#[allow(unused_macros)]
#[macro_export]
macro_rules! current_location {
    () => {
        format!("{}:{}", file!(), line!())
    };
}
#[allow(unused_imports)]
pub use current_location;

#[allow(unused_macros)]
#[macro_export]
macro_rules! check {
    ($cond:expr) => {
        $crate::check!($cond, "")
    };
    ($cond:expr, $extra:expr) => {{
        let value = $cond;
        $crate::util::assert::assert_type::<bool>(&value);
        if !value {
            $crate::util::assert::check_failed(
                &$crate::util::assert::current_location!(),
                stringify!($cond),
                format_args!(": {}", $extra),
            );
        }
    }};
}
#[allow(unused_imports)]
pub use check;

#[allow(unused_macros)]
#[macro_export]
macro_rules! check_false {
    ($cond:expr) => {
        $crate::check!(!$cond)
    };
}
#[allow(unused_imports)]
pub use check_false;

#[allow(unused_macros)]
#[macro_export]
macro_rules! check_lt {
    ($lhs:expr, $rhs:expr) => {{
        let lhs = $lhs;
        let rhs = $rhs;
        $crate::util::assert::assert_same_type(&lhs, &rhs);
        $crate::util::assert::assert_partial_ord(&lhs);
        // Written as a negation so that NaN fails the check.
        if !(lhs < rhs) {
            $crate::util::assert::check_failed(
                &$crate::util::assert::current_location!(),
                concat!(stringify!($lhs), " < ", stringify!($rhs)),
                format_args!(": {:?} vs. {:?}", lhs, rhs),
            );
        }
    }};
}
#[allow(unused_imports)]
pub use check_lt;

#[allow(unused_macros)]
#[macro_export]
macro_rules! check_eq {
    ($lhs:expr, $rhs:expr) => {{
        let lhs = $lhs;
        let rhs = $rhs;
        $crate::util::assert::assert_same_type(&lhs, &rhs);
        $crate::util::assert::assert_partial_eq(&lhs);
        #[allow(clippy::float_cmp)]
        if lhs != rhs {
            $crate::util::assert::check_failed(
                &$crate::util::assert::current_location!(),
                concat!(stringify!($lhs), " == ", stringify!($rhs)),
                format_args!(": {:?} vs. {:?}", lhs, rhs),
            );
        }
    }};
}
#[allow(unused_imports)]
pub use check_eq;

/// Works on anything with an `almost_eq(self, rhs) -> bool` method.
#[allow(unused_macros)]
#[macro_export]
macro_rules! check_almost_eq {
    ($lhs:expr, $rhs:expr) => {{
        let lhs = $lhs;
        let rhs = $rhs;
        $crate::util::assert::assert_same_type(&lhs, &rhs);
        if !lhs.almost_eq(rhs) {
            $crate::util::assert::check_failed(
                &$crate::util::assert::current_location!(),
                concat!(stringify!($lhs), " ~= ", stringify!($rhs)),
                format_args!(": {} vs. {}", lhs, rhs),
            );
        }
    }};
}
#[allow(unused_imports)]
pub use check_almost_eq;

/// Checks that an `f32` lies in a half-open range, e.g. the output of an angle wrap.
#[allow(unused_macros)]
#[macro_export]
macro_rules! check_in_range {
    ($value:expr, $range:expr) => {{
        let value: f32 = $value;
        let range: ::std::ops::Range<f32> = $range;
        if !$crate::util::assert::in_half_open_range(value, &range) {
            $crate::util::assert::check_failed(
                &$crate::util::assert::current_location!(),
                concat!(stringify!($value), " in ", stringify!($range)),
                format_args!(": {} not in [{}, {})", value, range.start, range.end),
            );
        }
    }};
}
#[allow(unused_imports)]
pub use check_in_range;

/// Checks that a value contains no NaN or infinite components.
#[allow(unused_macros)]
#[macro_export]
macro_rules! check_finite {
    ($value:expr) => {{
        let value = $value;
        if !$crate::util::gg_float::GgFloat::is_finite(&value) {
            $crate::util::assert::check_failed(
                &$crate::util::assert::current_location!(),
                concat!("is_finite(", stringify!($value), ")"),
                format_args!(": {:?}", value),
            );
        }
    }};
}
#[allow(unused_imports)]
pub use check_finite;

#[cfg(test)]
mod tests {
    use crate::util::linalg::Vec3;

    #[test]
    fn passing_checks_are_silent() {
        check!(1 + 1 == 2);
        check_false!(1 + 1 == 3);
        check_lt!(1.0_f32, 2.0_f32);
        check_eq!(Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 2.0, 3.0));
        check_almost_eq!(Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 2.0, 3.000_001));
        check_in_range!(-180.0, -180.0..180.0);
        check_finite!(Vec3::new(0.0, -0.0, 1e30));
    }

    #[test]
    #[should_panic(expected = "check failed")]
    fn check_lt_fails_on_nan() {
        check_lt!(f32::NAN, 1.0_f32);
    }

    #[test]
    #[should_panic(expected = "not in [-180, 180)")]
    fn check_in_range_excludes_end() {
        check_in_range!(180.0, -180.0..180.0);
    }

    #[test]
    #[should_panic(expected = "is_finite")]
    fn check_finite_rejects_infinity() {
        check_finite!(Vec3::new(0.0, f32::INFINITY, 0.0));
    }
}
