//! The interactive tool: binds a `PlaneFitter` to a host application and runs the three user
//! commands against the host's selection.

use crate::Result;
use crate::config::ToolConfig;
use crate::errors::PlaneError;
use crate::fitter::PlaneFitter;
use crate::geom3::{PLANE_POINT_COUNT, Point3};
use crate::host::{Annotations, Feedback, Host, Scene};
use log::{debug, info, warn};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The actions a user can trigger, one for each button of the tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Fit the plane through the three selected points and mark them
    SetPlane,

    /// Project the selected points onto the plane
    MoveVertices,

    /// Remove the markers, keeping the plane
    Clear,
}

impl Command {
    pub const ALL: [Command; 3] = [Command::SetPlane, Command::MoveVertices, Command::Clear];

    pub fn label(&self) -> &'static str {
        match self {
            Command::SetPlane => "set plane",
            Command::MoveVertices => "move vertices",
            Command::Clear => "clear",
        }
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Command {
    type Err = PlaneError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['_', '-', ' '], "");
        match key.as_str() {
            "setplane" => Ok(Command::SetPlane),
            "movevertices" => Ok(Command::MoveVertices),
            "clear" => Ok(Command::Clear),
            _ => Err(PlaneError::InvalidArgument(format!("unknown command '{s}'"))),
        }
    }
}

/// A plane tool session. It owns the fitted plane and the markers it has created, and talks to
/// the host for everything else. Markers still present when the tool is dropped are removed.
///
/// # Examples
///
/// ```
/// use planesnap::{Command, MemoryHost, PlaneTool};
/// use planesnap::geom3::Point3;
///
/// let mut host = MemoryHost::new(vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
///     Point3::new(5.0, 5.0, 5.0),
/// ]);
///
/// let mut tool = PlaneTool::new(&mut host);
/// tool.host_mut().select(&[0, 1, 2]);
/// tool.dispatch(Command::SetPlane).unwrap();
/// tool.host_mut().select(&[3]);
/// tool.dispatch(Command::MoveVertices).unwrap();
/// drop(tool);
///
/// assert_eq!(host.vertex(3), Some(Point3::new(5.0, 5.0, 0.0)));
/// assert_eq!(host.marker_count(), 0);
/// ```
pub struct PlaneTool<H: Host> {
    host: H,
    fitter: PlaneFitter,
    config: ToolConfig,
    markers: Vec<H::Marker>,
}

impl<H: Host> PlaneTool<H> {
    pub fn new(host: H) -> Self {
        Self::with_config(host, ToolConfig::default())
    }

    pub fn with_config(host: H, config: ToolConfig) -> Self {
        Self {
            host,
            fitter: PlaneFitter::new(),
            config,
            markers: Vec::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn fitter(&self) -> &PlaneFitter {
        &self.fitter
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Run a command. Errors a user can cause by selecting the wrong points, or by moving points
    /// before a plane exists, are reported through the host's `Feedback` and are not returned.
    /// Failures of the host itself are returned, as are programming errors.
    pub fn dispatch(&mut self, command: Command) -> Result<()> {
        debug!("dispatching '{command}'");
        let result = match command {
            Command::SetPlane => self.set_plane(),
            Command::MoveVertices => self.move_vertices(),
            Command::Clear => self.clear_markers(),
        };

        let Err(e) = result else {
            return Ok(());
        };

        match e.downcast::<PlaneError>() {
            Ok(err) if err.is_user_facing() => {
                self.host.report_error(&err.to_string());
                Ok(())
            }
            Ok(err) => Err(err as Box<dyn std::error::Error>),
            Err(e) => Err(e),
        }
    }

    /// Remove every marker this tool has created. The plane is left as it is.
    pub fn close(&mut self) -> Result<()> {
        self.clear_markers()
    }

    fn set_plane(&mut self) -> Result<()> {
        let selection = self.host.selected_points()?;
        if selection.len() != PLANE_POINT_COUNT {
            return Err(PlaneError::InvalidSelectionCount {
                expected: PLANE_POINT_COUNT,
                found: selection.len(),
            }
            .into());
        }

        let points = self.read_positions(&selection)?;
        self.fitter.define_plane(&points)?;

        self.clear_markers()?;
        for (i, point) in points.iter().enumerate() {
            let label = self.config.label_for(i);
            let marker = self
                .host
                .create_marker(&self.config.marker_layer, *point, &label)?;
            self.markers.push(marker);
        }

        Ok(())
    }

    fn move_vertices(&mut self) -> Result<()> {
        if !self.fitter.is_defined() {
            return Err(PlaneError::UndefinedPlane.into());
        }

        let selection = self.host.selected_points()?;
        if selection.is_empty() {
            self.host.report_info("no vertices selected, nothing to move");
            return Ok(());
        }

        // Every position is read and projected before the first one is written
        let points = self.read_positions(&selection)?;
        let projected = self.fitter.project_onto_plane(&points)?;
        for (i, (handle, position)) in selection.iter().zip(projected).enumerate() {
            if let Err(e) = self.host.set_world_position(handle, position) {
                self.restore_positions(&selection[..i], &points[..i]);
                return Err(e);
            }
        }

        let message = format!("moved {} vertices onto the plane", selection.len());
        info!("{message}");
        self.host.report_info(&message);
        Ok(())
    }

    fn clear_markers(&mut self) -> Result<()> {
        if self.markers.is_empty() {
            return Ok(());
        }

        self.host
            .delete_markers(&self.config.marker_layer, &self.markers)?;
        self.markers.clear();
        Ok(())
    }

    /// Put moved points back after a failed write, so a move is either complete or not visible
    fn restore_positions(&mut self, handles: &[H::Handle], originals: &[Point3]) {
        for (handle, original) in handles.iter().zip(originals) {
            if let Err(e) = self.host.set_world_position(handle, *original) {
                warn!("failed to restore a point after an incomplete move: {e}");
            }
        }
    }

    fn read_positions(&self, selection: &[H::Handle]) -> Result<Vec<Point3>> {
        selection
            .iter()
            .map(|h| self.host.world_position(h))
            .collect()
    }
}

impl<H: Host> Drop for PlaneTool<H> {
    fn drop(&mut self) {
        if let Err(e) = self.clear_markers() {
            warn!("failed to remove plane markers: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom3::Vector3;
    use crate::host::MemoryHost;
    use approx::assert_relative_eq;
    use test_case::test_case;

    fn scene() -> MemoryHost {
        MemoryHost::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(5.0, 5.0, 5.0),
            Point3::new(-2.0, 3.0, -7.0),
            Point3::new(2.0, 0.0, 0.0),
        ])
    }

    fn tool_with_plane(host: &mut MemoryHost) -> PlaneTool<&mut MemoryHost> {
        host.select(&[0, 1, 2]);
        let mut tool = PlaneTool::new(host);
        tool.dispatch(Command::SetPlane).unwrap();
        tool
    }

    #[test_case("set plane", Command::SetPlane)]
    #[test_case("SetPlane", Command::SetPlane)]
    #[test_case("move vertices", Command::MoveVertices)]
    #[test_case("move_vertices", Command::MoveVertices)]
    #[test_case("Clear", Command::Clear)]
    fn parse_command(text: &str, expected: Command) {
        assert_eq!(text.parse::<Command>().unwrap(), expected);
    }

    #[test]
    fn command_labels_parse_back() {
        for command in Command::ALL {
            assert_eq!(command.to_string().parse::<Command>().unwrap(), command);
        }
        assert!("flatten".parse::<Command>().is_err());
        assert!("reset".parse::<Command>().is_err());
    }

    #[test]
    fn set_plane_creates_markers() {
        let mut host = scene();
        let tool = tool_with_plane(&mut host);
        assert!(tool.host().errors().is_empty());
        assert_relative_eq!(tool.fitter().normal(), Vector3::new(0.0, 0.0, 1.0));

        let markers = tool.host().markers("annotateLayer");
        let labels = markers.iter().map(|m| m.label.as_str()).collect::<Vec<_>>();
        assert_eq!(labels, vec!["point 1", "point 2", "point 3"]);
        assert_eq!(markers[1].position, Point3::new(1.0, 0.0, 0.0));
    }

    #[test_case(&[0, 1]; "two")]
    #[test_case(&[0, 1, 2, 3]; "four")]
    #[test_case(&[]; "none")]
    fn set_plane_wrong_count_is_reported(selection: &[usize]) {
        let mut host = scene();
        host.select(selection);
        let mut tool = PlaneTool::new(&mut host);
        tool.dispatch(Command::SetPlane).unwrap();

        assert!(!tool.fitter().is_defined());
        assert_eq!(tool.host().marker_count(), 0);
        assert_eq!(
            tool.host().errors(),
            [format!("please select exactly 3 vertices ({} selected)", selection.len())]
        );
    }

    #[test]
    fn set_plane_collinear_keeps_previous_state() {
        let mut host = scene();
        let mut tool = tool_with_plane(&mut host);
        let before = tool.fitter().plane().copied();

        tool.host_mut().select(&[0, 1, 5]);
        tool.dispatch(Command::SetPlane).unwrap();

        assert_eq!(tool.fitter().plane().copied(), before);
        assert_eq!(tool.host().errors().len(), 1);
        assert_eq!(tool.host().markers("annotateLayer").len(), 3);
    }

    #[test]
    fn set_plane_again_replaces_markers() {
        let mut host = scene();
        let mut tool = tool_with_plane(&mut host);

        tool.host_mut().select(&[3, 0, 1]);
        tool.dispatch(Command::SetPlane).unwrap();

        let markers = tool.host().markers("annotateLayer");
        assert_eq!(tool.host().marker_count(), 3);
        assert_eq!(markers[0].position, Point3::new(5.0, 5.0, 5.0));
        assert_eq!(tool.fitter().position(), Point3::new(5.0, 5.0, 5.0));
    }

    #[test]
    fn move_before_plane_is_reported() {
        let mut host = scene();
        host.select(&[3, 4]);
        let mut tool = PlaneTool::new(&mut host);
        tool.dispatch(Command::MoveVertices).unwrap();

        assert_eq!(tool.host().errors(), ["please define the plane first".to_string()]);
        assert_eq!(tool.host().vertices(), scene().vertices());
    }

    #[test]
    fn move_before_plane_with_empty_selection_is_reported() {
        let mut host = scene();
        let mut tool = PlaneTool::new(&mut host);
        tool.dispatch(Command::MoveVertices).unwrap();
        assert_eq!(tool.host().errors(), ["please define the plane first".to_string()]);
        assert!(tool.host().infos().is_empty());
    }

    #[test]
    fn move_with_empty_selection_is_info() {
        let mut host = scene();
        let mut tool = tool_with_plane(&mut host);
        tool.host_mut().select(&[]);
        tool.dispatch(Command::MoveVertices).unwrap();

        assert!(tool.host().errors().is_empty());
        assert_eq!(tool.host().infos().len(), 1);
        assert_eq!(tool.host().vertices(), scene().vertices());
    }

    #[test]
    fn move_projects_selection() {
        let mut host = scene();
        let mut tool = tool_with_plane(&mut host);
        tool.host_mut().select(&[3, 4]);
        tool.dispatch(Command::MoveVertices).unwrap();
        drop(tool);

        assert_relative_eq!(host.vertex(3).unwrap(), Point3::new(5.0, 5.0, 0.0));
        assert_relative_eq!(host.vertex(4).unwrap(), Point3::new(-2.0, 3.0, 0.0));
        assert_eq!(host.vertex(0), Some(Point3::origin()));
        assert_eq!(host.infos(), ["moved 2 vertices onto the plane".to_string()]);
    }

    #[test]
    fn moving_twice_changes_nothing() {
        let mut host = scene();
        let mut tool = tool_with_plane(&mut host);
        tool.host_mut().select(&[3, 4]);
        tool.dispatch(Command::MoveVertices).unwrap();
        let first = tool.host().vertices().to_vec();

        tool.dispatch(Command::MoveVertices).unwrap();
        for (a, b) in first.iter().zip(tool.host().vertices()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    fn clear_keeps_plane() {
        let mut host = scene();
        let mut tool = tool_with_plane(&mut host);
        tool.dispatch(Command::Clear).unwrap();

        assert_eq!(tool.host().marker_count(), 0);
        assert!(!tool.host().has_layer("annotateLayer"));
        assert!(tool.fitter().is_defined());

        tool.host_mut().select(&[3]);
        tool.dispatch(Command::MoveVertices).unwrap();
        assert!(tool.host().errors().is_empty());
        assert_relative_eq!(tool.host().vertex(3).unwrap(), Point3::new(5.0, 5.0, 0.0));
    }

    #[test]
    fn clear_without_markers_is_noop() {
        let mut host = scene();
        let mut tool = PlaneTool::new(&mut host);
        tool.dispatch(Command::Clear).unwrap();
        assert!(tool.host().errors().is_empty());
    }

    #[test]
    fn unknown_handle_is_returned_and_nothing_moves() {
        let mut host = scene();
        let mut tool = tool_with_plane(&mut host);
        tool.host_mut().select(&[3, 99]);

        assert!(tool.dispatch(Command::MoveVertices).is_err());
        assert!(tool.host().errors().is_empty());
        assert_eq!(tool.host().vertex(3), Some(Point3::new(5.0, 5.0, 5.0)));
    }

    #[test]
    fn failed_write_restores_moved_points() {
        let mut host = scene();
        host.lock(4);
        let mut tool = tool_with_plane(&mut host);
        tool.host_mut().select(&[3, 4]);

        assert!(tool.dispatch(Command::MoveVertices).is_err());
        assert_eq!(tool.host().vertices(), scene().vertices());
        assert!(tool.host().infos().is_empty());
    }

    #[test]
    fn drop_removes_markers() {
        let mut host = scene();
        let tool = tool_with_plane(&mut host);
        drop(tool);
        assert_eq!(host.marker_count(), 0);
    }

    #[test]
    fn close_removes_markers() {
        let mut host = scene();
        let mut tool = tool_with_plane(&mut host);
        tool.close().unwrap();
        assert_eq!(tool.host().marker_count(), 0);
        assert!(tool.fitter().is_defined());
    }

    #[test]
    fn configured_layer_and_labels() {
        let mut host = scene();
        host.select(&[0, 1, 2]);
        let config = ToolConfig::from_json(r#"{"marker_layer": "plane", "marker_label": "V"}"#)
            .unwrap();
        let mut tool = PlaneTool::with_config(&mut host, config);
        tool.dispatch(Command::SetPlane).unwrap();

        let markers = tool.host().markers("plane");
        assert_eq!(markers.len(), 3);
        assert_eq!(markers[2].label, "V 3");
        assert!(!tool.host().has_layer("annotateLayer"));
    }
}
