//! Render backend trait
//!
//! Defines the interface between the toolkit and the host engine's renderer.
//! Keeps the overlay independent of the host's graphics API: a backend
//! receives finished command lists and vertex batches, nothing more.
//!
//! World-space passes are optional; a UI-only backend leaves the defaults in
//! place and gets a typed "unsupported" error if a world layer is pointed at
//! it, which indicates a wiring bug rather than a recoverable condition.

use crate::foundation::math::Vec2;
use crate::ui::rendering::commands::DrawList;
use crate::world::vertex::WorldVertex;

/// Rendering errors surfaced to the frame pump
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    /// The backend does not implement the requested pass
    #[error("backend does not support {0}")]
    Unsupported(&'static str),

    /// Backend-specific failure
    #[error("backend error: {0}")]
    Backend(String),
}

/// Backend-agnostic rendering interface
pub trait RenderBackend {
    /// Begin the screen-space overlay pass
    fn begin_overlay_pass(&mut self, screen_size: Vec2) -> Result<(), RenderError>;

    /// Draw a finished overlay command list
    fn draw_overlay(&mut self, list: &DrawList) -> Result<(), RenderError>;

    /// End the screen-space overlay pass
    fn end_overlay_pass(&mut self) -> Result<(), RenderError>;

    /// Begin the world-space pass (markers and trails)
    fn begin_world_pass(&mut self) -> Result<(), RenderError> {
        Err(RenderError::Unsupported("world pass"))
    }

    /// Draw a batch of billboard marker vertices (triangle list)
    fn draw_markers(&mut self, _vertices: &[WorldVertex]) -> Result<(), RenderError> {
        Err(RenderError::Unsupported("marker batch"))
    }

    /// Draw a batch of trail vertices (triangle list)
    fn draw_trails(&mut self, _vertices: &[WorldVertex]) -> Result<(), RenderError> {
        Err(RenderError::Unsupported("trail batch"))
    }

    /// End the world-space pass
    fn end_world_pass(&mut self) -> Result<(), RenderError> {
        Err(RenderError::Unsupported("world pass"))
    }
}

/// Backend that records everything submitted to it
///
/// Used by headless tests and the demo application to observe what a frame
/// would have drawn.
#[derive(Debug)]
pub struct RecordingBackend {
    /// Commands from the most recent overlay pass
    pub commands: Vec<crate::ui::rendering::commands::DrawCommand>,
    /// Marker vertices from the most recent world pass
    pub marker_vertices: Vec<WorldVertex>,
    /// Trail vertices from the most recent world pass
    pub trail_vertices: Vec<WorldVertex>,
    /// Completed overlay passes
    pub overlay_passes: usize,
    /// Completed world passes
    pub world_passes: usize,
    /// Screen size from the most recent overlay pass
    pub screen_size: Vec2,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingBackend {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            marker_vertices: Vec::new(),
            trail_vertices: Vec::new(),
            overlay_passes: 0,
            world_passes: 0,
            screen_size: Vec2::zeros(),
        }
    }
}

impl RenderBackend for RecordingBackend {
    fn begin_overlay_pass(&mut self, screen_size: Vec2) -> Result<(), RenderError> {
        self.commands.clear();
        self.screen_size = screen_size;
        Ok(())
    }

    fn draw_overlay(&mut self, list: &DrawList) -> Result<(), RenderError> {
        self.commands.extend_from_slice(list.commands());
        Ok(())
    }

    fn end_overlay_pass(&mut self) -> Result<(), RenderError> {
        self.overlay_passes += 1;
        Ok(())
    }

    fn begin_world_pass(&mut self) -> Result<(), RenderError> {
        self.marker_vertices.clear();
        self.trail_vertices.clear();
        Ok(())
    }

    fn draw_markers(&mut self, vertices: &[WorldVertex]) -> Result<(), RenderError> {
        self.marker_vertices.extend_from_slice(vertices);
        Ok(())
    }

    fn draw_trails(&mut self, vertices: &[WorldVertex]) -> Result<(), RenderError> {
        self.trail_vertices.extend_from_slice(vertices);
        Ok(())
    }

    fn end_world_pass(&mut self) -> Result<(), RenderError> {
        self.world_passes += 1;
        Ok(())
    }
}
