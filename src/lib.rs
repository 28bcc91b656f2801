//! Fit a plane through three points of a 3D scene and snap other points onto it along the
//! plane normal.

use std::error::Error;

pub mod config;
pub mod errors;
pub mod fitter;
pub mod geom3;
pub mod host;
pub mod tool;

pub use config::ToolConfig;
pub use errors::PlaneError;
pub use fitter::PlaneFitter;
pub use host::{Host, MemoryHost};
pub use tool::{Command, PlaneTool};

pub type Result<T> = std::result::Result<T, Box<dyn Error>>;
