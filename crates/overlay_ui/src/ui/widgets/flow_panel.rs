//! Flow panel widget - automatic child arrangement with wrapping
//!
//! Children are laid out in insertion order, wrapping at the content-region
//! edge. A child that cannot fit the flow axis at all is a fatal authoring
//! error: the layout panics rather than silently producing garbage.

use crate::foundation::math::Vec2;
use crate::ui::capture::CaptureType;
use crate::ui::control::{ControlState, LayoutCtx, Widget};

/// Axis children flow along before wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowDirection {
    /// Fill rows left to right, wrap downward
    #[default]
    LeftToRight,
    /// Fill columns top to bottom, wrap rightward
    TopToBottom,
}

/// Container that positions its children automatically
#[derive(Debug)]
pub struct FlowPanel {
    /// Flow axis
    pub direction: FlowDirection,

    /// Gap between children (x between columns, y between rows)
    pub spacing: Vec2,
}

impl Default for FlowPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowPanel {
    /// Create a left-to-right flow panel
    pub fn new() -> Self {
        Self {
            direction: FlowDirection::LeftToRight,
            spacing: Vec2::zeros(),
        }
    }

    /// Create a flow panel along `direction` with `spacing` gaps
    pub fn with_direction(direction: FlowDirection, spacing: Vec2) -> Self {
        Self { direction, spacing }
    }
}

impl Widget for FlowPanel {
    fn configure(&self, state: &mut ControlState) {
        state.capture = CaptureType::MOUSE;
        state.size = Vec2::new(300.0, 200.0);
    }

    fn recalculate_layout(&mut self, ctx: &mut LayoutCtx<'_>) {
        let Some(region) = ctx.tree.content_region(ctx.key) else {
            return;
        };
        let children = ctx.tree.children(ctx.key).to_vec();
        let mut cursor = Vec2::zeros();
        let mut line_extent = 0.0f32;

        for child in children {
            let Some(size) = ctx.tree.state(child).map(|s| s.size()) else {
                continue;
            };
            match self.direction {
                FlowDirection::LeftToRight => {
                    assert!(
                        size.x <= region.width,
                        "flow child is {}px wide but the content region is only {}px",
                        size.x,
                        region.width
                    );
                    if cursor.x + size.x > region.width {
                        cursor.x = 0.0;
                        cursor.y += line_extent + self.spacing.y;
                        line_extent = 0.0;
                    }
                    ctx.tree.set_location(child, cursor);
                    cursor.x += size.x + self.spacing.x;
                    line_extent = line_extent.max(size.y);
                }
                FlowDirection::TopToBottom => {
                    assert!(
                        size.y <= region.height,
                        "flow child is {}px tall but the content region is only {}px",
                        size.y,
                        region.height
                    );
                    if cursor.y + size.y > region.height {
                        cursor.y = 0.0;
                        cursor.x += line_extent + self.spacing.x;
                        line_extent = 0.0;
                    }
                    ctx.tree.set_location(child, cursor);
                    cursor.y += size.y + self.spacing.y;
                    line_extent = line_extent.max(size.x);
                }
            }
        }
    }
}
