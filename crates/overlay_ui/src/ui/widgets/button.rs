//! Button widget - interactive clickable buttons

use crate::assets::{FontHandle, TextureHandle};
use crate::foundation::math::Vec2;
use crate::ui::capture::CaptureType;
use crate::ui::control::{ControlState, Widget, WidgetCtx};
use crate::ui::input::{PointerEvent, PointerEventKind};
use crate::ui::rendering::commands::{Color, DrawList, HorizontalAlign, VerticalAlign};
use crate::ui::rendering::context::PaintView;
use crate::ui::widgets::DEFAULT_FONT;

/// Standard push button
#[derive(Debug)]
pub struct Button {
    /// Button label text
    pub text: String,

    /// Font asset name
    pub font_name: String,

    /// Background texture asset name
    pub texture_name: String,

    /// Tint in the resting state
    pub normal_tint: Color,
    /// Tint while hovered
    pub hover_tint: Color,
    /// Tint while held down
    pub pressed_tint: Color,
    /// Tint while disabled
    pub disabled_tint: Color,

    /// Text color
    pub text_color: Color,

    /// Sound effect played on click, if any
    pub click_sound: Option<String>,

    font: Option<FontHandle>,
    texture: Option<TextureHandle>,
    held: bool,
}

impl Button {
    /// Create a button with the default look
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_name: DEFAULT_FONT.to_owned(),
            texture_name: "textures/button".to_owned(),
            normal_tint: Color::new(0.3, 0.3, 0.3, 0.9),
            hover_tint: Color::new(0.4, 0.4, 0.5, 1.0),
            pressed_tint: Color::new(0.5, 0.5, 0.6, 1.0),
            disabled_tint: Color::new(0.2, 0.2, 0.2, 0.5),
            text_color: Color::new(1.0, 1.0, 1.0, 1.0),
            click_sound: Some("audio/button-click".to_owned()),
            font: None,
            texture: None,
            held: false,
        }
    }

    /// Tint for the current interaction state
    fn current_tint(&self, state: &ControlState) -> Color {
        if !state.enabled() {
            self.disabled_tint
        } else if self.held {
            self.pressed_tint
        } else if state.mouse_over() {
            self.hover_tint
        } else {
            self.normal_tint
        }
    }
}

impl Widget for Button {
    fn configure(&self, state: &mut ControlState) {
        state.capture = CaptureType::MOUSE;
        state.size = Vec2::new(128.0, 26.0);
    }

    fn update(&mut self, ctx: &mut WidgetCtx<'_, '_>, _dt: f32) {
        if self.font.is_none() {
            self.font = ctx.host.content.font(&self.font_name);
        }
        if self.texture.is_none() {
            self.texture = ctx.host.content.texture(&self.texture_name);
        }
    }

    fn on_pointer(&mut self, _ctx: &mut WidgetCtx<'_, '_>, event: &PointerEvent) {
        match event.kind {
            PointerEventKind::LeftPressed => self.held = true,
            PointerEventKind::LeftReleased => self.held = false,
            _ => {}
        }
    }

    fn on_click(&mut self, ctx: &mut WidgetCtx<'_, '_>, _double: bool) {
        if let Some(sound) = &self.click_sound {
            ctx.host.content.play_sound(sound);
        }
    }

    fn paint(&mut self, view: &PaintView<'_>, out: &mut DrawList) {
        if let Some(texture) = self.texture {
            view.fill(out, texture, self.current_tint(view.state));
        }
        if let Some(font) = self.font {
            view.draw_text(
                out,
                font,
                &self.text,
                view.local_bounds(),
                self.text_color,
                HorizontalAlign::Center,
                VerticalAlign::Middle,
            );
        }
    }
}
