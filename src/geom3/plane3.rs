use crate::errors::PlaneError;
use crate::geom3::{Point3, UnitVec3, Vector3, VectorExt};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// The number of points needed to define a plane
pub const PLANE_POINT_COUNT: usize = 3;

/// An infinite plane in 3D space, defined by a point which lies on the plane and a unit normal.
/// The direction of the normal decides which side of the plane is considered to be in front.
/// Deserialized planes have their normal normalized, and a zero normal is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PlaneRepr", into = "PlaneRepr")]
pub struct Plane3 {
    pub origin: Point3,
    pub normal: UnitVec3,
}

impl Plane3 {
    pub fn new(origin: Point3, normal: UnitVec3) -> Self {
        Self { origin, normal }
    }

    /// Fit a plane through exactly three points. The plane passes through the first point and
    /// its normal is the normalized cross product of the edges from the first point to the
    /// second and third. Reversing the winding of the points flips the normal.
    ///
    /// # Arguments
    ///
    /// * `points`: a slice of exactly three points
    ///
    /// returns: Result<Plane3, PlaneError>
    ///
    /// # Examples
    ///
    /// ```
    /// use planesnap::geom3::{Plane3, Point3, Vector3};
    /// let points = [
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Point3::new(0.0, 1.0, 0.0),
    /// ];
    /// let plane = Plane3::try_from_points(&points).unwrap();
    /// assert_eq!(plane.normal.into_inner(), Vector3::new(0.0, 0.0, 1.0));
    /// ```
    pub fn try_from_points(points: &[Point3]) -> Result<Self, PlaneError> {
        let (p0, p1, p2) =
            points
                .iter()
                .collect_tuple()
                .ok_or_else(|| PlaneError::InvalidSelectionCount {
                    expected: PLANE_POINT_COUNT,
                    found: points.len(),
                })?;
        Self::try_from((p0, p1, p2))
    }

    /// Create a new plane which is in the same position as this plane, but with the normal
    /// direction inverted.
    pub fn inverted_normal(&self) -> Self {
        Self::new(self.origin, -self.normal)
    }

    /// Measure and return the signed distance from the plane to a point in 3D space. The sign of
    /// the distance indicates whether the point is in front of or behind the plane according to
    /// the plane's normal vector.
    pub fn signed_distance_to_point(&self, point: &Point3) -> f64 {
        self.normal.dot(&(point - self.origin))
    }

    pub fn distance_to_point(&self, point: &Point3) -> f64 {
        self.signed_distance_to_point(point).abs()
    }

    /// Returns true if the point lies within `tol` of the plane
    pub fn contains_point(&self, point: &Point3, tol: f64) -> bool {
        self.distance_to_point(point) <= tol
    }

    /// Move a point along the plane normal until it lies on the plane. The result is the closest
    /// point on the plane to the input point, and a point already on the plane is returned
    /// unchanged.
    ///
    /// # Arguments
    ///
    /// * `point`: the point to project
    ///
    /// returns: OPoint<f64, Const<3>>
    pub fn project_point(&self, point: &Point3) -> Point3 {
        let delta = self.normal.dot(&(self.origin - point));
        point + self.normal.into_inner() * delta
    }

    /// Project every point in the slice onto the plane, preserving order
    pub fn project_points(&self, points: &[Point3]) -> Vec<Point3> {
        points.iter().map(|p| self.project_point(p)).collect()
    }
}

impl TryFrom<(&Point3, &Point3, &Point3)> for Plane3 {
    type Error = PlaneError;

    fn try_from((p0, p1, p2): (&Point3, &Point3, &Point3)) -> Result<Self, Self::Error> {
        let n = (p1 - p0).cross(&(p2 - p0));
        let normal = n
            .try_normalized()
            .map_err(|_| PlaneError::DegeneratePlane)?;
        Ok(Self::new(*p0, normal))
    }
}

/// The serialized form of a `Plane3`, with the normal as a plain vector
#[derive(Serialize, Deserialize)]
struct PlaneRepr {
    origin: Point3,
    normal: Vector3,
}

impl TryFrom<PlaneRepr> for Plane3 {
    type Error = PlaneError;

    fn try_from(repr: PlaneRepr) -> Result<Self, Self::Error> {
        Ok(Self::new(repr.origin, repr.normal.try_normalized()?))
    }
}

impl From<Plane3> for PlaneRepr {
    fn from(plane: Plane3) -> Self {
        Self {
            origin: plane.origin,
            normal: plane.normal.into_inner(),
        }
    }
}
