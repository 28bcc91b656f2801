mod plane3;
mod vector3;

pub use plane3::{PLANE_POINT_COUNT, Plane3};
pub use vector3::{VectorExt, ZERO_LENGTH_TOL, try_point3, try_vector3, vector3_from_slice};

pub type Point3 = parry3d_f64::na::Point3<f64>;
pub type Vector3 = parry3d_f64::na::Vector3<f64>;
pub type UnitVec3 = parry3d_f64::na::Unit<Vector3>;
