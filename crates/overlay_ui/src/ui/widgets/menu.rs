//! Menu widgets - vertical item strips and context menus
//!
//! A [`MenuStrip`] stacks [`MenuItem`] children and sizes itself to fit.
//! Attached through [`crate::ui::Screen::attach_context_menu`] it behaves as
//! a context menu: opened at the pointer on right-press, dismissed when the
//! active control leaves it, and closed when an item is chosen.

use crate::assets::{FontHandle, TextureHandle};
use crate::events::UiEvent;
use crate::foundation::math::Vec2;
use crate::ui::capture::CaptureType;
use crate::ui::control::{ControlState, LayoutCtx, Widget, WidgetCtx};
use crate::ui::rendering::commands::{Color, DrawList, HorizontalAlign, VerticalAlign, WHITE};
use crate::ui::rendering::context::PaintView;
use crate::ui::tree::{ControlKey, UiTree};
use crate::ui::widgets::DEFAULT_FONT;

/// Vertical strip of menu items
#[derive(Debug)]
pub struct MenuStrip {
    /// Width of the strip and every item in it
    pub width: f32,

    /// Height of each item row
    pub item_height: f32,

    /// Background texture asset name
    pub background_texture_name: String,

    /// Background tint
    pub background_tint: Color,

    background: Option<TextureHandle>,
}

impl MenuStrip {
    /// Create an empty strip
    pub fn new() -> Self {
        Self {
            width: 160.0,
            item_height: 22.0,
            background_texture_name: "textures/menu".to_owned(),
            background_tint: Color::new(0.08, 0.08, 0.08, 0.95),
            background: None,
        }
    }

    /// Append a text item, returning its control key
    pub fn add_item(
        tree: &mut UiTree,
        strip: ControlKey,
        text: impl Into<String>,
    ) -> ControlKey {
        let item = tree.add(MenuItem::new(text));
        if tree.try_set_parent(item, Some(strip)).is_err() {
            log::warn!("menu item could not be attached to its strip");
        }
        item
    }
}

impl Default for MenuStrip {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for MenuStrip {
    fn configure(&self, state: &mut ControlState) {
        state.capture = CaptureType::MOUSE;
        state.size = Vec2::new(self.width, self.item_height);
    }

    fn update(&mut self, ctx: &mut WidgetCtx<'_, '_>, _dt: f32) {
        if self.background.is_none() {
            self.background = ctx.host.content.texture(&self.background_texture_name);
        }
    }

    fn recalculate_layout(&mut self, ctx: &mut LayoutCtx<'_>) {
        let children = ctx.tree.children(ctx.key).to_vec();
        for (row, child) in children.iter().enumerate() {
            ctx.tree
                .set_location(*child, Vec2::new(0.0, row as f32 * self.item_height));
            ctx.tree
                .set_size(*child, Vec2::new(self.width, self.item_height));
        }
        let height = (children.len().max(1)) as f32 * self.item_height;
        ctx.tree.set_size(ctx.key, Vec2::new(self.width, height));
    }

    fn paint(&mut self, view: &PaintView<'_>, out: &mut DrawList) {
        if let Some(texture) = self.background {
            view.fill(out, texture, self.background_tint);
        }
    }
}

/// One selectable row of a menu strip
#[derive(Debug)]
pub struct MenuItem {
    /// Row text
    pub text: String,

    /// Font asset name
    pub font_name: String,

    /// Text color
    pub text_color: Color,

    /// Row highlight tint while hovered
    pub hover_tint: Color,

    /// Highlight texture asset name
    pub highlight_texture_name: String,

    font: Option<FontHandle>,
    highlight: Option<TextureHandle>,
}

impl MenuItem {
    /// Create a menu item row
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_name: DEFAULT_FONT.to_owned(),
            text_color: WHITE,
            hover_tint: Color::new(0.3, 0.3, 0.4, 1.0),
            highlight_texture_name: "textures/menu-highlight".to_owned(),
            font: None,
            highlight: None,
        }
    }
}

impl Widget for MenuItem {
    fn configure(&self, state: &mut ControlState) {
        state.capture = CaptureType::MOUSE;
        state.size = Vec2::new(160.0, 22.0);
    }

    fn update(&mut self, ctx: &mut WidgetCtx<'_, '_>, _dt: f32) {
        if self.font.is_none() {
            self.font = ctx.host.content.font(&self.font_name);
        }
        if self.highlight.is_none() {
            self.highlight = ctx.host.content.texture(&self.highlight_texture_name);
        }
    }

    fn on_click(&mut self, ctx: &mut WidgetCtx<'_, '_>, _double: bool) {
        let menu = ctx.tree.parent(ctx.key).unwrap_or(ctx.key);
        ctx.tree.emit(UiEvent::MenuItemSelected {
            menu,
            item: ctx.key,
        });
        ctx.host.content.play_sound("audio/menu-select");
    }

    fn paint(&mut self, view: &PaintView<'_>, out: &mut DrawList) {
        if view.state.mouse_over() {
            if let Some(texture) = self.highlight {
                view.fill(out, texture, self.hover_tint);
            }
        }
        if let Some(font) = self.font {
            let rect = view
                .local_bounds()
                .inset(&crate::foundation::geometry::Thickness::new(8.0, 0.0, 4.0, 0.0));
            view.draw_text(
                out,
                font,
                &self.text,
                rect,
                self.text_color,
                HorizontalAlign::Left,
                VerticalAlign::Middle,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_stacks_items_and_sizes_itself() {
        let mut tree = UiTree::new();
        let strip = tree.add_container(MenuStrip::new());
        let a = MenuStrip::add_item(&mut tree, strip, "Open");
        let b = MenuStrip::add_item(&mut tree, strip, "Close");
        let c = MenuStrip::add_item(&mut tree, strip, "Settings");
        tree.invalidate(strip);

        assert_eq!(tree.state(a).unwrap().location(), Vec2::new(0.0, 0.0));
        assert_eq!(tree.state(b).unwrap().location(), Vec2::new(0.0, 22.0));
        assert_eq!(tree.state(c).unwrap().location(), Vec2::new(0.0, 44.0));
        assert_eq!(tree.state(strip).unwrap().size(), Vec2::new(160.0, 66.0));
    }
}
