//! Slider widget - continuous value selection by dragging

use crate::assets::TextureHandle;
use crate::events::{Property, UiEvent, Value};
use crate::foundation::geometry::Rect;
use crate::foundation::math::Vec2;
use crate::ui::capture::CaptureType;
use crate::ui::control::{ControlState, Widget, WidgetCtx};
use crate::ui::input::{PointerEvent, PointerEventKind};
use crate::ui::rendering::commands::{Color, DrawList, WHITE};
use crate::ui::rendering::context::PaintView;
use crate::ui::tree::{ControlKey, UiTree};

/// Width of the draggable thumb
const THUMB_WIDTH: f32 = 8.0;
/// Height of the track line
const TRACK_HEIGHT: f32 = 4.0;

/// Horizontal value slider
#[derive(Debug)]
pub struct Slider {
    /// Lower bound of the value range
    pub min: f32,

    /// Upper bound of the value range
    pub max: f32,

    /// Current value, always within [min, max]
    pub value: f32,

    /// Track texture asset name
    pub track_texture_name: String,

    /// Thumb texture asset name
    pub thumb_texture_name: String,

    /// Track tint
    pub track_tint: Color,

    track_texture: Option<TextureHandle>,
    thumb_texture: Option<TextureHandle>,
    dragging: bool,
}

impl Slider {
    /// Create a slider over [min, max] starting at `value`
    pub fn new(min: f32, max: f32, value: f32) -> Self {
        Self {
            min,
            max,
            value: value.clamp(min, max),
            track_texture_name: "textures/slider-track".to_owned(),
            thumb_texture_name: "textures/slider-thumb".to_owned(),
            track_tint: Color::new(0.25, 0.25, 0.25, 1.0),
            track_texture: None,
            thumb_texture: None,
            dragging: false,
        }
    }

    /// Set the value programmatically, with change notification
    pub fn set_value(tree: &mut UiTree, key: ControlKey, value: f32) {
        let Some(slider) = tree.widget_mut::<Slider>(key) else {
            return;
        };
        let value = value.clamp(slider.min, slider.max);
        if (slider.value - value).abs() < f32::EPSILON {
            return;
        }
        slider.value = value;
        tree.emit(UiEvent::PropertyChanged {
            control: key,
            property: Property::Value,
        });
        tree.emit(UiEvent::ValueChanged {
            control: key,
            value: Value::Float(value),
        });
    }

    /// Fraction of the range the current value sits at
    fn ratio(&self) -> f32 {
        if self.max <= self.min {
            0.0
        } else {
            (self.value - self.min) / (self.max - self.min)
        }
    }

    fn value_at(&self, ctx: &WidgetCtx<'_, '_>, pointer_x: f32) -> f32 {
        let bounds = ctx.tree.absolute_bounds(ctx.key);
        if bounds.width <= 0.0 {
            return self.min;
        }
        let t = ((pointer_x - bounds.x) / bounds.width).clamp(0.0, 1.0);
        self.min + (self.max - self.min) * t
    }
}

impl Widget for Slider {
    fn configure(&self, state: &mut ControlState) {
        state.capture = CaptureType::MOUSE;
        state.size = Vec2::new(256.0, 16.0);
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
        if !ctx.tree.state(ctx.key).map_or(false, |s| s.enabled()) {
            return;
        }
        match event.kind {
            PointerEventKind::LeftPressed => {
                self.dragging = true;
                ctx.input.grab_pointer(ctx.key);
                let value = self.value_at(ctx, event.position.x);
                let key = ctx.key;
                self.value = value;
                Slider::emit_change(ctx.tree, key, value);
            }
            PointerEventKind::Moved if self.dragging => {
                let value = self.value_at(ctx, event.position.x);
                if (value - self.value).abs() >= f32::EPSILON {
                    self.value = value;
                    Slider::emit_change(ctx.tree, ctx.key, value);
                }
            }
            PointerEventKind::LeftReleased => {
                self.dragging = false;
            }
            _ => {}
        }
    }

    fn paint(&mut self, view: &PaintView<'_>, out: &mut DrawList) {
        let bounds = view.local_bounds();
        if let Some(texture) = self.track_texture {
            let track = Rect::new(
                0.0,
                (bounds.height - TRACK_HEIGHT) * 0.5,
                bounds.width,
                TRACK_HEIGHT,
            );
            view.draw_rect(out, texture, track, self.track_tint);
        }
        if let Some(texture) = self.thumb_texture {
            let x = (bounds.width - THUMB_WIDTH) * self.ratio();
            let thumb = Rect::new(x, 0.0, THUMB_WIDTH, bounds.height);
            view.draw_rect(out, texture, thumb, WHITE);
        }
    }
}

impl Slider {
    fn emit_change(tree: &mut UiTree, key: ControlKey, value: f32) {
        tree.emit(UiEvent::PropertyChanged {
            control: key,
            property: Property::Value,
        });
        tree.emit(UiEvent::ValueChanged {
            control: key,
            value: Value::Float(value),
        });
    }
}
