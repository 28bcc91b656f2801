//! The plane fitting session, which holds the single plane that points are projected onto.

use crate::errors::PlaneError;
use crate::geom3::{Plane3, Point3, Vector3};
use log::debug;

/// Holds the current plane, if one has been defined. The plane is only ever replaced as a whole
/// by a successful `define_plane` call, so a failed definition leaves the previous plane in
/// place and there is no way to observe a partially updated plane.
#[derive(Debug, Clone, Default)]
pub struct PlaneFitter {
    plane: Option<Plane3>,
}

impl PlaneFitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fit a plane through exactly three points and store it as the current plane.
    ///
    /// # Arguments
    ///
    /// * `points`: the three points the plane passes through, in winding order
    ///
    /// returns: Result<&Plane3, PlaneError>
    ///
    /// # Examples
    ///
    /// ```
    /// use planesnap::PlaneFitter;
    /// use planesnap::geom3::Point3;
    ///
    /// let mut fitter = PlaneFitter::new();
    /// fitter.define_plane(&[
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Point3::new(0.0, 1.0, 0.0),
    /// ]).unwrap();
    ///
    /// let moved = fitter.project_onto_plane(&[Point3::new(5.0, 5.0, 5.0)]).unwrap();
    /// assert_eq!(moved[0], Point3::new(5.0, 5.0, 0.0));
    /// ```
    pub fn define_plane(&mut self, points: &[Point3]) -> Result<&Plane3, PlaneError> {
        let plane = Plane3::try_from_points(points)?;
        debug!(
            "plane defined at {:?} with normal {:?}",
            plane.origin,
            plane.normal.into_inner()
        );
        Ok(&*self.plane.insert(plane))
    }

    /// Project each point onto the current plane along the plane normal, returning the projected
    /// points in the same order. The fitter is not modified, so projecting the same points again
    /// gives the same result.
    pub fn project_onto_plane(&self, points: &[Point3]) -> Result<Vec<Point3>, PlaneError> {
        let plane = self.plane.as_ref().ok_or(PlaneError::UndefinedPlane)?;
        Ok(plane.project_points(points))
    }

    pub fn plane(&self) -> Option<&Plane3> {
        self.plane.as_ref()
    }

    pub fn is_defined(&self) -> bool {
        self.plane.is_some()
    }

    /// The point the current plane passes through, or the origin if no plane is defined
    pub fn position(&self) -> Point3 {
        self.plane.map(|p| p.origin).unwrap_or_else(Point3::origin)
    }

    /// The unit normal of the current plane, or the zero vector if no plane is defined
    pub fn normal(&self) -> Vector3 {
        self.plane
            .map(|p| p.normal.into_inner())
            .unwrap_or_else(Vector3::zeros)
    }
}
