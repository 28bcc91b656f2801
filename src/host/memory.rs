//! A host which keeps its scene in memory, for running the tool headless and for tests.

use crate::Result;
use crate::geom3::Point3;
use crate::host::{Annotations, Feedback, Scene};
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq)]
pub enum MemoryHostError {
    UnknownVertex(usize),
    LockedVertex(usize),
    UnknownMarker(usize),
}

impl Display for MemoryHostError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Error for MemoryHostError {}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerRecord {
    pub position: Point3,
    pub label: String,
}

/// An in-memory scene made of a flat list of vertices addressed by index, with an ordered
/// selection, marker layers, and a log of every message reported to the user. Locked vertices
/// can be read but refuse to move.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    vertices: Vec<Point3>,
    selection: Vec<usize>,
    locked: BTreeSet<usize>,
    layers: BTreeMap<String, BTreeMap<usize, MarkerRecord>>,
    next_marker: usize,
    errors: Vec<String>,
    infos: Vec<String>,
}

impl MemoryHost {
    pub fn new(vertices: Vec<Point3>) -> Self {
        Self {
            vertices,
            ..Default::default()
        }
    }

    /// Add a vertex to the scene and return its handle
    pub fn add_vertex(&mut self, position: Point3) -> usize {
        self.vertices.push(position);
        self.vertices.len() - 1
    }

    pub fn vertex(&self, index: usize) -> Option<Point3> {
        self.vertices.get(index).copied()
    }

    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Replace the selection. Handles are not checked until their positions are read.
    pub fn select(&mut self, indices: &[usize]) {
        self.selection = indices.to_vec();
    }

    /// Lock a vertex so that writes to its position fail
    pub fn lock(&mut self, index: usize) {
        self.locked.insert(index);
    }

    pub fn has_layer(&self, layer: &str) -> bool {
        self.layers.contains_key(layer)
    }

    /// The markers on a layer in the order they were created
    pub fn markers(&self, layer: &str) -> Vec<&MarkerRecord> {
        self.layers
            .get(layer)
            .map(|m| m.values().collect())
            .unwrap_or_default()
    }

    pub fn marker_count(&self) -> usize {
        self.layers.values().map(|m| m.len()).sum()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn infos(&self) -> &[String] {
        &self.infos
    }
}

impl Scene for MemoryHost {
    type Handle = usize;

    fn selected_points(&self) -> Result<Vec<usize>> {
        Ok(self.selection.clone())
    }

    fn world_position(&self, handle: &usize) -> Result<Point3> {
        Ok(self
            .vertex(*handle)
            .ok_or(MemoryHostError::UnknownVertex(*handle))?)
    }

    fn set_world_position(&mut self, handle: &usize, position: Point3) -> Result<()> {
        if self.locked.contains(handle) {
            return Err(MemoryHostError::LockedVertex(*handle).into());
        }
        let vertex = self
            .vertices
            .get_mut(*handle)
            .ok_or(MemoryHostError::UnknownVertex(*handle))?;
        *vertex = position;
        Ok(())
    }
}

impl Annotations for MemoryHost {
    type Marker = usize;

    fn create_marker(&mut self, layer: &str, position: Point3, label: &str) -> Result<usize> {
        let id = self.next_marker;
        self.next_marker += 1;
        self.layers.entry(layer.to_string()).or_default().insert(
            id,
            MarkerRecord {
                position,
                label: label.to_string(),
            },
        );
        Ok(id)
    }

    fn delete_markers(&mut self, layer: &str, markers: &[usize]) -> Result<()> {
        let Some(members) = self.layers.get_mut(layer) else {
            return match markers.first() {
                Some(id) => Err(MemoryHostError::UnknownMarker(*id).into()),
                None => Ok(()),
            };
        };

        if let Some(missing) = markers.iter().find(|id| !members.contains_key(*id)) {
            return Err(MemoryHostError::UnknownMarker(*missing).into());
        }

        for id in markers {
            members.remove(id);
        }

        if members.is_empty() {
            self.layers.remove(layer);
        }
        Ok(())
    }
}

impl Feedback for MemoryHost {
    fn report_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn report_info(&mut self, message: &str) {
        self.infos.push(message.to_string());
    }
}
