//! Validated construction and degeneracy checks for the nalgebra vector types used by the
//! crate. Arithmetic, dot and cross products come straight from nalgebra and are all pure.

use crate::errors::PlaneError;
use crate::geom3::{Point3, UnitVec3, Vector3};
use itertools::Itertools;
use num_traits::ToPrimitive;

/// The length below which a vector is considered to have no direction. This is the only
/// degeneracy threshold in the crate, both for normalization and for deciding whether three
/// points span a plane.
pub const ZERO_LENGTH_TOL: f64 = 1e-14;

fn component<T: ToPrimitive>(name: &str, value: T) -> Result<f64, PlaneError> {
    value.to_f64().filter(|v| v.is_finite()).ok_or_else(|| {
        PlaneError::InvalidArgument(format!("{name} component is not a finite number"))
    })
}

/// Create a `Vector3` from any three numeric values, widening integers to `f64`. Fails with
/// `InvalidArgument` if a component is NaN, infinite, or not representable as an `f64`.
///
/// # Examples
///
/// ```
/// use planesnap::geom3::{try_vector3, Vector3};
/// let v = try_vector3(1, 2, 3).unwrap();
/// assert_eq!(v, Vector3::new(1.0, 2.0, 3.0));
/// assert!(try_vector3(1.0, f64::NAN, 0.0).is_err());
/// ```
pub fn try_vector3<T: ToPrimitive>(x: T, y: T, z: T) -> Result<Vector3, PlaneError> {
    Ok(Vector3::new(
        component("x", x)?,
        component("y", y)?,
        component("z", z)?,
    ))
}

/// Create a `Point3` with the same validation rules as `try_vector3`
pub fn try_point3<T: ToPrimitive>(x: T, y: T, z: T) -> Result<Point3, PlaneError> {
    try_vector3(x, y, z).map(Point3::from)
}

/// Create a `Vector3` from a slice of exactly three numeric values, as they would arrive from
/// a host application which reports positions as `[x, y, z]` lists.
pub fn vector3_from_slice<T: ToPrimitive + Copy>(values: &[T]) -> Result<Vector3, PlaneError> {
    let (x, y, z) = values.iter().copied().collect_tuple().ok_or_else(|| {
        PlaneError::InvalidArgument(format!("expected 3 components, got {}", values.len()))
    })?;
    try_vector3(x, y, z)
}

pub trait VectorExt {
    /// Returns true if the vector is longer than `ZERO_LENGTH_TOL` and so has a direction
    fn is_non_zero(&self) -> bool;

    /// Returns a new unit length vector pointing in the same direction, leaving the original
    /// untouched. Fails with `DegenerateVector` if the vector has no direction or has a
    /// non-finite component. Vectors whose length overflows an `f64` are rescaled by their
    /// largest component before normalizing.
    ///
    /// # Examples
    ///
    /// ```
    /// use approx::assert_relative_eq;
    /// use planesnap::geom3::{Vector3, VectorExt};
    /// let v = Vector3::new(0.0, 3.0, 4.0);
    /// let n = v.try_normalized().unwrap();
    /// assert_relative_eq!(n.into_inner(), Vector3::new(0.0, 0.6, 0.8), epsilon = 1e-12);
    /// assert!(Vector3::zeros().try_normalized().is_err());
    /// ```
    fn try_normalized(&self) -> Result<UnitVec3, PlaneError>;
}

impl VectorExt for Vector3 {
    fn is_non_zero(&self) -> bool {
        self.norm() > ZERO_LENGTH_TOL
    }

    fn try_normalized(&self) -> Result<UnitVec3, PlaneError> {
        if !self.is_non_zero() {
            return Err(PlaneError::DegenerateVector);
        }

        if self.norm().is_finite() {
            return Ok(UnitVec3::new_normalize(*self));
        }

        // The squared length overflowed, so bring the largest component down to one first
        let largest = self.amax();
        if !largest.is_finite() {
            return Err(PlaneError::DegenerateVector);
        }
        Ok(UnitVec3::new_normalize(self / largest))
    }
}
