//! Overlay draw commands
//!
//! One command per primitive, in paint order. Scissor commands bracket each
//! container's children; backends map them to their clip-rectangle state.

use crate::assets::{FontHandle, TextureHandle};
use crate::foundation::geometry::Rect;
use crate::foundation::math::Vec4;

/// RGBA color with components in [0, 1]
pub type Color = Vec4;

/// Opaque white; the neutral tint
pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlign {
    /// Left-aligned text
    Left,
    /// Center-aligned text
    Center,
    /// Right-aligned text
    Right,
}

/// Vertical text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    /// Top-aligned text
    Top,
    /// Middle-aligned text
    Middle,
    /// Bottom-aligned text
    Bottom,
}

/// A single overlay draw command
#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// Textured rectangle in absolute coordinates
    TexturedRect {
        /// Texture to sample
        texture: TextureHandle,
        /// Destination rectangle in screen space
        bounds: Rect,
        /// Multiplicative tint
        tint: Color,
        /// Effective opacity (inherited down the tree)
        opacity: f32,
    },
    /// Text run in absolute coordinates
    Text {
        /// Font to draw with
        font: FontHandle,
        /// Text content
        text: String,
        /// Layout rectangle in screen space
        bounds: Rect,
        /// Text color
        color: Color,
        /// Effective opacity (inherited down the tree)
        opacity: f32,
        /// Horizontal placement within bounds
        horizontal_align: HorizontalAlign,
        /// Vertical placement within bounds
        vertical_align: VerticalAlign,
    },
    /// Narrow the clip rectangle for subsequent commands
    PushScissor(Rect),
    /// Restore the previous clip rectangle
    PopScissor,
}

/// Ordered list of overlay draw commands for one frame
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Commands in paint order
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drop all commands, keeping the allocation for the next frame
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}
