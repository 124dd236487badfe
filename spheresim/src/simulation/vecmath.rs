//! Free-function vector helpers over `NVec3`
//!
//! Thin wrappers around nalgebra so the integrator and resolver read like
//! the formulas they implement. All functions are pure.

use super::states::NVec3;

#[inline]
pub fn add(a: &NVec3, b: &NVec3) -> NVec3 {
    a + b
}

#[inline]
pub fn sub(a: &NVec3, b: &NVec3) -> NVec3 {
    a - b
}

/// Scale by a scalar
#[inline]
pub fn mul(a: &NVec3, s: f64) -> NVec3 {
    a * s
}

/// Divide by a scalar. Division by zero follows IEEE rules.
#[inline]
pub fn div(a: &NVec3, s: f64) -> NVec3 {
    a / s
}

#[inline]
pub fn dot(a: &NVec3, b: &NVec3) -> f64 {
    a.dot(b)
}

#[inline]
pub fn cross(a: &NVec3, b: &NVec3) -> NVec3 {
    a.cross(b)
}

#[inline]
pub fn magnitude(a: &NVec3) -> f64 {
    a.norm()
}

/// Unit vector in the direction of `a`; the zero vector maps to itself
#[inline]
pub fn normalize(a: &NVec3) -> NVec3 {
    let len = magnitude(a);
    if len == 0.0 {
        return NVec3::zeros();
    }
    div(a, len)
}
