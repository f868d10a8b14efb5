//! Paint traversal and the widget-facing paint view
//!
//! Painting walks the tree in ascending z-order, multiplying opacity down
//! the chain and intersecting each container's content region into the
//! scissor rectangle. Children that respect clipping and fall entirely
//! outside the scissor are skipped, not just clipped.

use crate::assets::{ContentProvider, FontHandle, TextureHandle};
use crate::foundation::geometry::Rect;
use crate::foundation::math::Vec2;
use crate::ui::control::{ControlState, LayoutState};
use crate::ui::rendering::commands::{
    Color, DrawCommand, DrawList, HorizontalAlign, VerticalAlign,
};
use crate::ui::tree::{ControlKey, UiTree};

/// Read-only view a widget paints through
///
/// Widgets express draw calls in local coordinates; the view translates them
/// into absolute space and attaches the control's effective opacity.
pub struct PaintView<'a> {
    /// The control being painted
    pub key: ControlKey,
    /// Absolute bounds of the control
    pub bounds: Rect,
    /// Effective opacity (own opacity times every ancestor's)
    pub opacity: f32,
    /// The control's state for hover/enabled-dependent looks
    pub state: &'a ControlState,
    /// Read access to the whole tree (scrollbars read their target here)
    pub tree: &'a UiTree,
    /// Host content for texture sizes and text measurement
    pub content: &'a dyn ContentProvider,
}

impl<'a> PaintView<'a> {
    /// Bounds in local space: the control's size at the origin
    pub fn local_bounds(&self) -> Rect {
        Rect::from_pos_size(Vec2::zeros(), self.bounds.size())
    }

    /// Translate a local rectangle into absolute space
    pub fn to_absolute(&self, local: Rect) -> Rect {
        local.translated(self.bounds.position())
    }

    /// Draw a textured rectangle covering the whole control
    pub fn fill(&self, out: &mut DrawList, texture: TextureHandle, tint: Color) {
        self.draw_rect(out, texture, self.local_bounds(), tint);
    }

    /// Draw a textured rectangle at a local-space location
    pub fn draw_rect(&self, out: &mut DrawList, texture: TextureHandle, local: Rect, tint: Color) {
        out.push(DrawCommand::TexturedRect {
            texture,
            bounds: self.to_absolute(local),
            tint,
            opacity: self.opacity,
        });
    }

    /// Draw text laid out inside a local-space rectangle
    pub fn draw_text(
        &self,
        out: &mut DrawList,
        font: FontHandle,
        text: &str,
        local: Rect,
        color: Color,
        horizontal_align: HorizontalAlign,
        vertical_align: VerticalAlign,
    ) {
        if text.is_empty() {
            return;
        }
        out.push(DrawCommand::Text {
            font,
            text: text.to_owned(),
            bounds: self.to_absolute(local),
            color,
            opacity: self.opacity,
            horizontal_align,
            vertical_align,
        });
    }
}

impl UiTree {
    /// Paint the subtree rooted at `root` into a draw list
    pub fn paint(&mut self, root: ControlKey, content: &dyn ContentProvider, out: &mut DrawList) {
        let scissor = self.absolute_bounds(root);
        self.paint_node(root, content, scissor, 1.0, out);
    }

    fn paint_node(
        &mut self,
        key: ControlKey,
        content: &dyn ContentProvider,
        scissor: Rect,
        inherited_opacity: f32,
        out: &mut DrawList,
    ) {
        let Some(state) = self.state(key) else {
            return;
        };
        if !state.visible() {
            return;
        }
        if state.layout_state() == LayoutState::Invalidated {
            self.try_recalculate(key);
        }
        let Some(state) = self.state(key) else {
            return;
        };
        if state.layout_state() == LayoutState::SkipDraw {
            return;
        }

        let opacity = inherited_opacity * state.opacity();
        let bounds = self.absolute_bounds(key);
        if state.clips_bounds() && !bounds.intersects(&scissor) {
            // Out of the clip region entirely; skip the subtree
            return;
        }

        let mut widget = self.nodes.get_mut(key).and_then(|n| n.widget.take());
        if let Some(w) = widget.as_deref_mut() {
            let view = PaintView {
                key,
                bounds,
                opacity,
                state: &self.nodes[key].state,
                tree: self,
                content,
            };
            w.paint(&view, out);
        }
        if let Some(w) = widget {
            if let Some(node) = self.nodes.get_mut(key) {
                node.widget = Some(w);
            }
        }

        if !self.is_container(key) {
            return;
        }
        let Some(region) = self.content_region(key) else {
            return;
        };
        let region_abs = region.translated(bounds.position());
        let child_scissor = scissor.intersection(&region_abs);
        if child_scissor.is_empty() {
            return;
        }
        out.push(DrawCommand::PushScissor(child_scissor));
        for child in self.children_paint_order(key) {
            self.paint_node(child, content, child_scissor, opacity, out);
        }
        out.push(DrawCommand::PopScissor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::NullContent;
    use crate::ui::control::Widget;

    struct SolidWidget;

    impl Widget for SolidWidget {
        fn paint(&mut self, view: &PaintView<'_>, out: &mut DrawList) {
            view.fill(out, TextureHandle(1), crate::ui::rendering::commands::WHITE);
        }
    }

    fn rect_commands(list: &DrawList) -> Vec<(Rect, f32)> {
        list.commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::TexturedRect {
                    bounds, opacity, ..
                } => Some((*bounds, *opacity)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_paint_translates_and_inherits_opacity() {
        let mut tree = UiTree::new();
        let root = tree.add_plain_container();
        tree.set_size(root, Vec2::new(800.0, 600.0));

        let panel = tree.add_container(SolidWidget);
        tree.set_location(panel, Vec2::new(100.0, 50.0));
        tree.set_size(panel, Vec2::new(200.0, 100.0));
        tree.set_opacity(panel, 0.5);
        tree.try_set_parent(panel, Some(root)).unwrap();

        let child = tree.add(SolidWidget);
        tree.set_location(child, Vec2::new(10.0, 10.0));
        tree.set_size(child, Vec2::new(50.0, 20.0));
        tree.try_set_parent(child, Some(panel)).unwrap();

        let mut out = DrawList::new();
        tree.paint(root, &NullContent, &mut out);

        let rects = rect_commands(&out);
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0].0, Rect::new(100.0, 50.0, 200.0, 100.0));
        assert_eq!(rects[0].1, 0.5);
        assert_eq!(rects[1].0, Rect::new(110.0, 60.0, 50.0, 20.0));
        assert_eq!(rects[1].1, 0.5);
    }

    #[test]
    fn test_offscreen_clipping_child_is_culled() {
        let mut tree = UiTree::new();
        let root = tree.add_plain_container();
        tree.set_size(root, Vec2::new(800.0, 600.0));

        let panel = tree.add_plain_container();
        tree.set_size(panel, Vec2::new(100.0, 100.0));
        tree.try_set_parent(panel, Some(root)).unwrap();

        let culled = tree.add(SolidWidget);
        tree.set_location(culled, Vec2::new(500.0, 0.0));
        tree.try_set_parent(culled, Some(panel)).unwrap();

        let escaped = tree.add(SolidWidget);
        tree.set_location(escaped, Vec2::new(500.0, 0.0));
        tree.set_clips_bounds(escaped, false);
        tree.try_set_parent(escaped, Some(panel)).unwrap();

        let mut out = DrawList::new();
        tree.paint(root, &NullContent, &mut out);

        // Only the clip-opted-out child painted
        let rects = rect_commands(&out);
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].0.x, 500.0);
    }

    #[test]
    fn test_scissor_brackets_container_children() {
        let mut tree = UiTree::new();
        let root = tree.add_plain_container();
        tree.set_size(root, Vec2::new(800.0, 600.0));

        let panel = tree.add_plain_container();
        tree.set_location(panel, Vec2::new(10.0, 10.0));
        tree.set_size(panel, Vec2::new(100.0, 100.0));
        tree.set_content_region(panel, Rect::new(5.0, 5.0, 90.0, 90.0));
        tree.try_set_parent(panel, Some(root)).unwrap();

        let child = tree.add(SolidWidget);
        tree.try_set_parent(child, Some(panel)).unwrap();

        let mut out = DrawList::new();
        tree.paint(root, &NullContent, &mut out);

        let scissors: Vec<_> = out
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::PushScissor(r) => Some(*r),
                _ => None,
            })
            .collect();
        // Root pushes its own region, then the panel's translated region
        assert_eq!(scissors.len(), 2);
        assert_eq!(scissors[1], Rect::new(15.0, 15.0, 90.0, 90.0));
    }

    #[test]
    fn test_hidden_subtree_not_painted() {
        let mut tree = UiTree::new();
        let root = tree.add_plain_container();
        tree.set_size(root, Vec2::new(800.0, 600.0));

        let panel = tree.add_container(SolidWidget);
        tree.set_visible(panel, false);
        tree.try_set_parent(panel, Some(root)).unwrap();
        let child = tree.add(SolidWidget);
        tree.try_set_parent(child, Some(panel)).unwrap();

        let mut out = DrawList::new();
        tree.paint(root, &NullContent, &mut out);
        assert!(rect_commands(&out).is_empty());
    }
}
