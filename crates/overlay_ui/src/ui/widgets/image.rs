//! Image widget - textured rectangle

use crate::assets::TextureHandle;
use crate::foundation::math::Vec2;
use crate::ui::control::{ControlState, Widget, WidgetCtx};
use crate::ui::rendering::commands::{Color, DrawList, WHITE};
use crate::ui::rendering::context::PaintView;

/// Texture display control
#[derive(Debug)]
pub struct Image {
    /// Texture asset name
    pub texture_name: String,

    /// Multiplicative tint
    pub tint: Color,

    /// Take the texture's native size when first resolved
    pub size_to_texture: bool,

    texture: Option<TextureHandle>,
    sized: bool,
}

impl Image {
    /// Create an image control for a named texture
    pub fn new(texture_name: impl Into<String>) -> Self {
        Self {
            texture_name: texture_name.into(),
            tint: WHITE,
            size_to_texture: true,
            texture: None,
            sized: false,
        }
    }
}

impl Widget for Image {
    fn configure(&self, state: &mut ControlState) {
        state.capture = crate::ui::capture::CaptureType::NONE;
    }

    fn update(&mut self, ctx: &mut WidgetCtx<'_, '_>, _dt: f32) {
        if self.texture.is_none() {
            self.texture = ctx.host.content.texture(&self.texture_name);
        }
        if let (Some(texture), false, true) = (self.texture, self.sized, self.size_to_texture) {
            let size = ctx.host.content.texture_size(texture);
            if size != Vec2::zeros() {
                ctx.tree.set_size(ctx.key, size);
            }
            self.sized = true;
        }
    }

    fn paint(&mut self, view: &PaintView<'_>, out: &mut DrawList) {
        // A missing texture simply draws nothing; the lookup failure was
        // already logged by the content cache
        if let Some(texture) = self.texture {
            view.fill(out, texture, self.tint);
        }
    }
}
