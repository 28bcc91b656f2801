//! The collaborators a host application provides to the plane tool. The host owns the scene,
//! the selection, and every visual element; the tool only reads and writes positions and asks
//! for markers and messages through these traits.

pub mod memory;

use crate::Result;
use crate::geom3::Point3;

pub use memory::MemoryHost;

/// Access to the host's selection and to the world space positions of point-like elements.
pub trait Scene {
    /// An opaque reference to a selectable point, such as a mesh vertex
    type Handle;

    /// Returns the currently selected points in selection order. The selection is flattened, so
    /// every selected component appears individually rather than as its owning object.
    fn selected_points(&self) -> Result<Vec<Self::Handle>>;

    fn world_position(&self, handle: &Self::Handle) -> Result<Point3>;

    /// Move a point so that its world space position becomes `position`. A failed call must
    /// leave the point where it was; the tool puts back any points it already moved.
    fn set_world_position(&mut self, handle: &Self::Handle, position: Point3) -> Result<()>;
}

/// Labelled visual markers grouped under named display layers. Markers are only feedback for
/// the user and are never read back.
pub trait Annotations {
    type Marker;

    fn create_marker(&mut self, layer: &str, position: Point3, label: &str)
    -> Result<Self::Marker>;

    /// Delete the given markers from the layer. A layer left without members is removed.
    fn delete_markers(&mut self, layer: &str, markers: &[Self::Marker]) -> Result<()>;
}

/// User facing messages, typically shown in a modal dialog or a status line.
pub trait Feedback {
    fn report_error(&mut self, message: &str);
    fn report_info(&mut self, message: &str);
}

/// Everything the plane tool needs from a host application
pub trait Host: Scene + Annotations + Feedback {}

impl<T: Scene + Annotations + Feedback> Host for T {}

impl<T: Scene + ?Sized> Scene for &mut T {
    type Handle = T::Handle;

    fn selected_points(&self) -> Result<Vec<Self::Handle>> {
        (**self).selected_points()
    }

    fn world_position(&self, handle: &Self::Handle) -> Result<Point3> {
        (**self).world_position(handle)
    }

    fn set_world_position(&mut self, handle: &Self::Handle, position: Point3) -> Result<()> {
        (**self).set_world_position(handle, position)
    }
}

impl<T: Annotations + ?Sized> Annotations for &mut T {
    type Marker = T::Marker;

    fn create_marker(
        &mut self,
        layer: &str,
        position: Point3,
        label: &str,
    ) -> Result<Self::Marker> {
        (**self).create_marker(layer, position, label)
    }

    fn delete_markers(&mut self, layer: &str, markers: &[Self::Marker]) -> Result<()> {
        (**self).delete_markers(layer, markers)
    }
}

impl<T: Feedback + ?Sized> Feedback for &mut T {
    fn report_error(&mut self, message: &str) {
        (**self).report_error(message)
    }

    fn report_info(&mut self, message: &str) {
        (**self).report_info(message)
    }
}
