//! Checkbox widget - toggleable boolean state

use crate::assets::{FontHandle, TextureHandle};
use crate::events::{Property, UiEvent, Value};
use crate::foundation::geometry::Rect;
use crate::foundation::math::Vec2;
use crate::ui::capture::CaptureType;
use crate::ui::control::{ControlState, Widget, WidgetCtx};
use crate::ui::rendering::commands::{Color, DrawList, HorizontalAlign, VerticalAlign, WHITE};
use crate::ui::rendering::context::PaintView;
use crate::ui::tree::{ControlKey, UiTree};
use crate::ui::widgets::DEFAULT_FONT;

/// Square glyph size of the check mark box
const BOX_SIZE: f32 = 16.0;
/// Gap between the box and the caption
const TEXT_GAP: f32 = 6.0;

/// Boolean toggle with a caption
#[derive(Debug)]
pub struct Checkbox {
    /// Caption text
    pub text: String,

    /// Current checked state
    pub checked: bool,

    /// Font asset name
    pub font_name: String,

    /// Texture for the unchecked box
    pub box_texture_name: String,

    /// Texture for the check mark overlay
    pub mark_texture_name: String,

    /// Caption color
    pub text_color: Color,

    font: Option<FontHandle>,
    box_texture: Option<TextureHandle>,
    mark_texture: Option<TextureHandle>,
}

impl Checkbox {
    /// Create an unchecked checkbox
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            checked: false,
            font_name: DEFAULT_FONT.to_owned(),
            box_texture_name: "textures/checkbox".to_owned(),
            mark_texture_name: "textures/checkbox-mark".to_owned(),
            text_color: WHITE,
            font: None,
            box_texture: None,
            mark_texture: None,
        }
    }

    /// Set the checked state programmatically, with change notification
    pub fn set_checked(tree: &mut UiTree, key: ControlKey, checked: bool) {
        let Some(checkbox) = tree.widget_mut::<Checkbox>(key) else {
            return;
        };
        if checkbox.checked == checked {
            return;
        }
        checkbox.checked = checked;
        tree.emit(UiEvent::PropertyChanged {
            control: key,
            property: Property::Value,
        });
        tree.emit(UiEvent::ValueChanged {
            control: key,
            value: Value::Bool(checked),
        });
    }
}

impl Widget for Checkbox {
    fn configure(&self, state: &mut ControlState) {
        state.capture = CaptureType::MOUSE;
        state.size = Vec2::new(140.0, BOX_SIZE);
    }

    fn update(&mut self, ctx: &mut WidgetCtx<'_, '_>, _dt: f32) {
        if self.font.is_none() {
            self.font = ctx.host.content.font(&self.font_name);
        }
        if self.box_texture.is_none() {
            self.box_texture = ctx.host.content.texture(&self.box_texture_name);
        }
        if self.mark_texture.is_none() {
            self.mark_texture = ctx.host.content.texture(&self.mark_texture_name);
        }
    }

    fn on_click(&mut self, ctx: &mut WidgetCtx<'_, '_>, _double: bool) {
        let checked = !self.checked;
        self.checked = checked;
        ctx.tree.emit(UiEvent::PropertyChanged {
            control: ctx.key,
            property: Property::Value,
        });
        ctx.tree.emit(UiEvent::ValueChanged {
            control: ctx.key,
            value: Value::Bool(checked),
        });
        ctx.host.content.play_sound("audio/checkbox-toggle");
    }

    fn paint(&mut self, view: &PaintView<'_>, out: &mut DrawList) {
        let box_rect = Rect::new(
            0.0,
            (view.bounds.height - BOX_SIZE) * 0.5,
            BOX_SIZE,
            BOX_SIZE,
        );
        if let Some(texture) = self.box_texture {
            view.draw_rect(out, texture, box_rect, WHITE);
        }
        if self.checked {
            if let Some(texture) = self.mark_texture {
                view.draw_rect(out, texture, box_rect, WHITE);
            }
        }
        if let Some(font) = self.font {
            let text_rect = Rect::new(
                BOX_SIZE + TEXT_GAP,
                0.0,
                (view.bounds.width - BOX_SIZE - TEXT_GAP).max(0.0),
                view.bounds.height,
            );
            view.draw_text(
                out,
                font,
                &self.text,
                text_rect,
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
    use crate::events::UiEventKind;

    #[test]
    fn test_set_checked_emits_value_change_once() {
        let mut tree = UiTree::new();
        let key = tree.add(Checkbox::new("enable"));
        tree.drain_events();

        Checkbox::set_checked(&mut tree, key, true);
        let events = tree.drain_events();
        assert_eq!(
            events
                .iter()
                .filter(|e| e.kind() == UiEventKind::ValueChanged)
                .count(),
            1
        );

        // Idempotent
        Checkbox::set_checked(&mut tree, key, true);
        assert!(tree.drain_events().is_empty());
    }
}
