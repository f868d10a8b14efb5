//! Scrollbar widget - vertical scroll control for a companion container
//!
//! The thumb size is the ratio of the target's content-region height to its
//! children's bottom extent; dragging the thumb writes the target's vertical
//! scroll offset back directly, while wheel input retargets a tween so
//! scrolling glides.

use crate::animation::{Easing, TweenProperty};
use crate::assets::TextureHandle;
use crate::foundation::geometry::Rect;
use crate::foundation::math::Vec2;
use crate::ui::capture::CaptureType;
use crate::ui::control::{ControlState, Widget, WidgetCtx};
use crate::ui::input::{PointerEvent, PointerEventKind};
use crate::ui::rendering::commands::{Color, DrawList, WHITE};
use crate::ui::rendering::context::PaintView;
use crate::ui::tree::{ControlKey, UiTree};

/// Minimum thumb height so it stays grabbable
const MIN_THUMB: f32 = 12.0;
/// Duration of the wheel glide
const WHEEL_TWEEN_SECS: f32 = 0.2;

#[derive(Debug, Clone, Copy)]
struct ThumbMetrics {
    track_height: f32,
    thumb_height: f32,
    thumb_top: f32,
    max_scroll: f32,
}

/// Vertical scrollbar bound to a scrollable container
#[derive(Debug)]
pub struct Scrollbar {
    /// The container whose vertical scroll offset this bar drives
    pub target: ControlKey,

    /// Pixels scrolled per wheel notch
    pub wheel_step: f32,

    /// Track texture asset name
    pub track_texture_name: String,

    /// Thumb texture asset name
    pub thumb_texture_name: String,

    /// Track tint
    pub track_tint: Color,

    track_texture: Option<TextureHandle>,
    thumb_texture: Option<TextureHandle>,
    /// Pointer offset inside the thumb while dragging
    drag_offset: Option<f32>,
}

impl Scrollbar {
    /// Create a scrollbar driving `target`
    pub fn new(target: ControlKey) -> Self {
        Self {
            target,
            wheel_step: 48.0,
            track_texture_name: "textures/scrollbar-track".to_owned(),
            thumb_texture_name: "textures/scrollbar-thumb".to_owned(),
            track_tint: Color::new(0.15, 0.15, 0.15, 0.8),
            track_texture: None,
            thumb_texture: None,
            drag_offset: None,
        }
    }

    fn metrics(&self, tree: &UiTree, own_height: f32) -> Option<ThumbMetrics> {
        let region = tree.content_region(self.target)?;
        let content_bottom = tree.content_bounds(self.target).y;
        if content_bottom <= region.height || region.height <= 0.0 {
            return None;
        }
        let ratio = (region.height / content_bottom).clamp(0.0, 1.0);
        let thumb_height = (ratio * own_height).max(MIN_THUMB).min(own_height);
        let max_scroll = content_bottom - region.height;
        let scroll_ratio = (tree.scroll_offset(self.target).y / max_scroll).clamp(0.0, 1.0);
        Some(ThumbMetrics {
            track_height: own_height,
            thumb_height,
            thumb_top: scroll_ratio * (own_height - thumb_height),
            max_scroll,
        })
    }
}

impl Widget for Scrollbar {
    fn configure(&self, state: &mut ControlState) {
        state.capture = CaptureType::MOUSE | CaptureType::MOUSE_WHEEL;
        state.size = Vec2::new(12.0, 100.0);
    }

    fn update(&mut self, ctx: &mut WidgetCtx<'_, '_>, _dt: f32) {
        if self.track_texture.is_none() {
            self.track_texture = ctx.host.content.texture(&self.track_texture_name);
        }
        if self.thumb_texture.is_none() {
            self.thumb_texture = ctx.host.content.texture(&self.thumb_texture_name);
        }
    }

    fn on_pointer(&mut self, ctx: &mut WidgetCtx<'_, '_>, event: &PointerEvent) {
        let bounds = ctx.tree.absolute_bounds(ctx.key);
        let Some(metrics) = self.metrics(ctx.tree, bounds.height) else {
            return;
        };
        match event.kind {
            PointerEventKind::LeftPressed => {
                let local_y = event.position.y - bounds.y;
                if local_y >= metrics.thumb_top && local_y < metrics.thumb_top + metrics.thumb_height
                {
                    self.drag_offset = Some(local_y - metrics.thumb_top);
                    ctx.input.grab_pointer(ctx.key);
                } else {
                    // Page jump: center the thumb on the press point, gliding
                    let ratio = ((local_y - metrics.thumb_height * 0.5)
                        / (metrics.track_height - metrics.thumb_height))
                        .clamp(0.0, 1.0);
                    ctx.host.tweener.animate(
                        ctx.tree,
                        self.target,
                        TweenProperty::VerticalScroll,
                        ratio * metrics.max_scroll,
                        WHEEL_TWEEN_SECS,
                        Easing::QuadOut,
                    );
                }
            }
            PointerEventKind::Moved => {
                if let Some(offset) = self.drag_offset {
                    let local_y = event.position.y - bounds.y;
                    let span = metrics.track_height - metrics.thumb_height;
                    if span > 0.0 {
                        let ratio = ((local_y - offset) / span).clamp(0.0, 1.0);
                        ctx.tree
                            .set_vertical_scroll(self.target, ratio * metrics.max_scroll);
                    }
                }
            }
            PointerEventKind::LeftReleased => {
                self.drag_offset = None;
            }
            PointerEventKind::Wheel { delta } => {
                let current = ctx.tree.scroll_offset(self.target).y;
                ctx.host.tweener.animate(
                    ctx.tree,
                    self.target,
                    TweenProperty::VerticalScroll,
                    current - delta * self.wheel_step,
                    WHEEL_TWEEN_SECS,
                    Easing::QuadOut,
                );
            }
            _ => {}
        }
    }

    fn paint(&mut self, view: &PaintView<'_>, out: &mut DrawList) {
        let bounds = view.local_bounds();
        if let Some(texture) = self.track_texture {
            view.draw_rect(out, texture, bounds, self.track_tint);
        }
        // No thumb when the target has nothing to scroll
        let Some(metrics) = self.metrics(view.tree, bounds.height) else {
            return;
        };
        if let Some(texture) = self.thumb_texture {
            let thumb = Rect::new(0.0, metrics.thumb_top, bounds.width, metrics.thumb_height);
            view.draw_rect(out, texture, thumb, WHITE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thumb_metrics_ratio() {
        let mut tree = UiTree::new();
        let container = tree.add_plain_container();
        tree.set_size(container, Vec2::new(100.0, 100.0));
        let tall = tree.add_plain();
        tree.set_size(tall, Vec2::new(50.0, 400.0));
        tree.try_set_parent(tall, Some(container)).unwrap();

        let bar = Scrollbar::new(container);
        let metrics = bar.metrics(&tree, 100.0).unwrap();
        // Region is a quarter of the content, so the thumb is a quarter of
        // the track
        assert_eq!(metrics.thumb_height, 25.0);
        assert_eq!(metrics.max_scroll, 300.0);
        assert_eq!(metrics.thumb_top, 0.0);

        tree.set_vertical_scroll(container, 150.0);
        let metrics = bar.metrics(&tree, 100.0).unwrap();
        assert_eq!(metrics.thumb_top, 37.5);
    }

    #[test]
    fn test_no_thumb_without_overflow() {
        let mut tree = UiTree::new();
        let container = tree.add_plain_container();
        tree.set_size(container, Vec2::new(100.0, 100.0));
        let short = tree.add_plain();
        tree.set_size(short, Vec2::new(50.0, 40.0));
        tree.try_set_parent(short, Some(container)).unwrap();

        let bar = Scrollbar::new(container);
        assert!(bar.metrics(&tree, 100.0).is_none());
    }
}
