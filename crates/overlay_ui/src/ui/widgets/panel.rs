//! Panel widget - general-purpose container with background and title

use crate::animation::{Easing, TweenProperty};
use crate::assets::{FontHandle, TextureHandle};
use crate::foundation::geometry::Rect;
use crate::foundation::math::Vec2;
use crate::ui::capture::CaptureType;
use crate::ui::control::{ControlState, LayoutCtx, Widget, WidgetCtx};
use crate::ui::input::{PointerEvent, PointerEventKind};
use crate::ui::rendering::commands::{Color, DrawList, HorizontalAlign, VerticalAlign, WHITE};
use crate::ui::rendering::context::PaintView;
use crate::ui::widgets::DEFAULT_FONT;

/// Height of the title strip when a title is set
const TITLE_HEIGHT: f32 = 24.0;
/// Duration of the wheel glide
const WHEEL_TWEEN_SECS: f32 = 0.2;

/// Container with an optional background texture and title strip
#[derive(Debug)]
pub struct Panel {
    /// Background texture asset name, if any
    pub background_texture_name: Option<String>,

    /// Background tint
    pub background_tint: Color,

    /// Title strip text, if any
    pub title: Option<String>,

    /// Font asset name for the title
    pub font_name: String,

    /// Title text color
    pub title_color: Color,

    /// Scroll the content vertically on wheel input
    pub scroll_on_wheel: bool,

    /// Pixels scrolled per wheel notch
    pub wheel_step: f32,

    background: Option<TextureHandle>,
    font: Option<FontHandle>,
}

impl Panel {
    /// Create a bare panel
    pub fn new() -> Self {
        Self {
            background_texture_name: Some("textures/panel".to_owned()),
            background_tint: Color::new(0.0, 0.0, 0.0, 0.6),
            title: None,
            font_name: DEFAULT_FONT.to_owned(),
            title_color: WHITE,
            scroll_on_wheel: false,
            wheel_step: 48.0,
            background: None,
            font: None,
        }
    }

    /// Create a titled panel
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::new()
        }
    }

    /// Builder: enable wheel scrolling of the content region
    pub fn with_wheel_scrolling(mut self) -> Self {
        self.scroll_on_wheel = true;
        self
    }

    fn title_height(&self) -> f32 {
        if self.title.is_some() {
            TITLE_HEIGHT
        } else {
            0.0
        }
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Panel {
    fn configure(&self, state: &mut ControlState) {
        state.capture = CaptureType::MOUSE | CaptureType::MOUSE_WHEEL;
        state.size = Vec2::new(300.0, 200.0);
    }

    fn update(&mut self, ctx: &mut WidgetCtx<'_, '_>, _dt: f32) {
        if self.background.is_none() {
            if let Some(name) = &self.background_texture_name {
                self.background = ctx.host.content.texture(name);
            }
        }
        if self.font.is_none() {
            self.font = ctx.host.content.font(&self.font_name);
        }
    }

    fn recalculate_layout(&mut self, ctx: &mut LayoutCtx<'_>) {
        let Some(state) = ctx.tree.state(ctx.key) else {
            return;
        };
        let padding = state.padding();
        let size = state.size();
        let title_height = self.title_height();
        let region = Rect::new(
            padding.left,
            title_height + padding.top,
            size.x - padding.horizontal(),
            size.y - title_height - padding.vertical(),
        );
        ctx.tree.set_content_region(ctx.key, region);
    }

    fn on_pointer(&mut self, ctx: &mut WidgetCtx<'_, '_>, event: &PointerEvent) {
        if let PointerEventKind::Wheel { delta } = event.kind {
            if self.scroll_on_wheel {
                let current = ctx.tree.scroll_offset(ctx.key).y;
                ctx.host.tweener.animate(
                    ctx.tree,
                    ctx.key,
                    TweenProperty::VerticalScroll,
                    current - delta * self.wheel_step,
                    WHEEL_TWEEN_SECS,
                    Easing::QuadOut,
                );
            }
        }
    }

    fn paint(&mut self, view: &PaintView<'_>, out: &mut DrawList) {
        if let Some(texture) = self.background {
            view.fill(out, texture, self.background_tint);
        }
        if let (Some(title), Some(font)) = (&self.title, self.font) {
            let strip = Rect::new(0.0, 0.0, view.bounds.width, TITLE_HEIGHT);
            view.draw_text(
                out,
                font,
                title,
                strip,
                self.title_color,
                HorizontalAlign::Left,
                VerticalAlign::Middle,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::geometry::Thickness;
    use crate::ui::tree::UiTree;

    #[test]
    fn test_titled_panel_reserves_title_strip() {
        let mut tree = UiTree::new();
        let root = tree.add_plain_container();
        tree.set_size(root, Vec2::new(800.0, 600.0));
        let panel = tree.add_container(Panel::titled("Inventory"));
        tree.set_size(panel, Vec2::new(200.0, 150.0));
        tree.set_padding(panel, Thickness::uniform(4.0));
        tree.try_set_parent(panel, Some(root)).unwrap();

        assert_eq!(
            tree.content_region(panel),
            Some(Rect::new(4.0, 28.0, 192.0, 118.0))
        );
    }

    #[test]
    fn test_untitled_panel_uses_padded_bounds() {
        let mut tree = UiTree::new();
        let root = tree.add_plain_container();
        tree.set_size(root, Vec2::new(800.0, 600.0));
        let panel = tree.add_container(Panel::new());
        tree.set_size(panel, Vec2::new(200.0, 150.0));
        tree.try_set_parent(panel, Some(root)).unwrap();

        assert_eq!(
            tree.content_region(panel),
            Some(Rect::new(0.0, 0.0, 200.0, 150.0))
        );
    }
}
