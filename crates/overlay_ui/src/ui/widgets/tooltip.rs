//! Tooltip widget - hover hint shown near the pointer
//!
//! Tooltips are attached to an owner through
//! [`crate::ui::Screen::attach_tooltip`]; the screen shows and positions them
//! while the owner is the active control and hides them the moment the
//! active control changes.

use crate::assets::{FontHandle, TextureHandle};
use crate::foundation::math::Vec2;
use crate::ui::capture::CaptureType;
use crate::ui::control::{ControlState, Widget, WidgetCtx};
use crate::ui::rendering::commands::{Color, DrawList, HorizontalAlign, VerticalAlign, WHITE};
use crate::ui::rendering::context::PaintView;
use crate::ui::widgets::DEFAULT_FONT;

/// Inner padding around the tooltip text
const PADDING: Vec2 = Vec2::new(8.0, 5.0);

/// Hover hint with a single line of text
#[derive(Debug)]
pub struct Tooltip {
    /// Hint text
    pub text: String,

    /// Font asset name
    pub font_name: String,

    /// Background texture asset name
    pub background_texture_name: String,

    /// Background tint
    pub background_tint: Color,

    /// Text color
    pub text_color: Color,

    font: Option<FontHandle>,
    background: Option<TextureHandle>,
    measured: bool,
}

impl Tooltip {
    /// Create a tooltip with the given hint text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_name: DEFAULT_FONT.to_owned(),
            background_texture_name: "textures/tooltip".to_owned(),
            background_tint: Color::new(0.05, 0.05, 0.05, 0.9),
            text_color: WHITE,
            font: None,
            background: None,
            measured: false,
        }
    }
}

impl Widget for Tooltip {
    fn configure(&self, state: &mut ControlState) {
        // Tooltips never intercept input and follow the pointer across
        // container edges, so they opt out of clip culling
        state.capture = CaptureType::NONE;
        state.clips_bounds = false;
    }

    fn update(&mut self, ctx: &mut WidgetCtx<'_, '_>, _dt: f32) {
        if self.font.is_none() {
            self.font = ctx.host.content.font(&self.font_name);
        }
        if self.background.is_none() {
            self.background = ctx.host.content.texture(&self.background_texture_name);
        }
        if !self.measured {
            if let Some(font) = self.font {
                let text_size = ctx.host.content.measure_text(font, &self.text);
                ctx.tree
                    .set_size(ctx.key, text_size + PADDING * 2.0);
                self.measured = true;
            }
        }
    }

    fn paint(&mut self, view: &PaintView<'_>, out: &mut DrawList) {
        if let Some(texture) = self.background {
            view.fill(out, texture, self.background_tint);
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
