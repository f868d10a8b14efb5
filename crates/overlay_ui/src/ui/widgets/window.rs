//! Window widget - draggable titled container with placement persistence

use crate::assets::{FontHandle, TextureHandle};
use crate::events::UiEvent;
use crate::foundation::geometry::Rect;
use crate::foundation::math::Vec2;
use crate::ui::capture::CaptureType;
use crate::ui::control::{ControlState, LayoutCtx, Widget, WidgetCtx};
use crate::ui::input::{PointerEvent, PointerEventKind};
use crate::ui::rendering::commands::{Color, DrawList, HorizontalAlign, VerticalAlign, WHITE};
use crate::ui::rendering::context::PaintView;
use crate::ui::widgets::DEFAULT_FONT;

/// Height of the draggable title bar
const TITLE_BAR_HEIGHT: f32 = 28.0;

/// Movable window container
///
/// Dragging the title bar moves the window; on drop the position is written
/// to the placement store under `placement_id`, and restored from it when the
/// window is next created.
#[derive(Debug)]
pub struct Window {
    /// Title bar text
    pub title: String,

    /// Opaque id for position persistence; `None` disables it
    pub placement_id: Option<String>,

    /// Font asset name for the title
    pub font_name: String,

    /// Background texture asset name
    pub background_texture_name: String,

    /// Title bar texture asset name
    pub title_bar_texture_name: String,

    /// Background tint
    pub background_tint: Color,

    /// Title text color
    pub title_color: Color,

    font: Option<FontHandle>,
    background: Option<TextureHandle>,
    title_bar: Option<TextureHandle>,
    /// Pointer offset from the window origin while dragging
    drag_offset: Option<Vec2>,
    restored: bool,
}

impl Window {
    /// Create a window with a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            placement_id: None,
            font_name: DEFAULT_FONT.to_owned(),
            background_texture_name: "textures/window".to_owned(),
            title_bar_texture_name: "textures/window-title".to_owned(),
            background_tint: Color::new(0.05, 0.05, 0.08, 0.95),
            title_color: WHITE,
            font: None,
            background: None,
            title_bar: None,
            drag_offset: None,
            restored: false,
        }
    }

    /// Builder: persist and restore the window position under `id`
    pub fn with_placement_id(mut self, id: impl Into<String>) -> Self {
        self.placement_id = Some(id.into());
        self
    }

    fn bring_to_front(ctx: &mut WidgetCtx<'_, '_>) {
        let Some(parent) = ctx.tree.parent(ctx.key) else {
            return;
        };
        let top = ctx
            .tree
            .children(parent)
            .iter()
            .filter_map(|&sibling| ctx.tree.state(sibling).map(|s| s.z_index()))
            .max()
            .unwrap_or(0);
        if ctx.tree.state(ctx.key).map_or(true, |s| s.z_index() < top) {
            ctx.tree.set_z_index(ctx.key, top + 1);
        }
    }
}

impl Widget for Window {
    fn configure(&self, state: &mut ControlState) {
        state.capture = CaptureType::MOUSE | CaptureType::MOUSE_WHEEL;
        state.size = Vec2::new(400.0, 300.0);
    }

    fn update(&mut self, ctx: &mut WidgetCtx<'_, '_>, _dt: f32) {
        if !self.restored {
            self.restored = true;
            if let Some(position) = self
                .placement_id
                .as_deref()
                .and_then(|id| ctx.host.placements.load(id))
            {
                log::debug!("restoring window '{}' to {position:?}", self.title);
                ctx.tree.set_location(ctx.key, position);
            }
        }
        if self.font.is_none() {
            self.font = ctx.host.content.font(&self.font_name);
        }
        if self.background.is_none() {
            self.background = ctx.host.content.texture(&self.background_texture_name);
        }
        if self.title_bar.is_none() {
            self.title_bar = ctx.host.content.texture(&self.title_bar_texture_name);
        }
    }

    fn recalculate_layout(&mut self, ctx: &mut LayoutCtx<'_>) {
        let Some(state) = ctx.tree.state(ctx.key) else {
            return;
        };
        let padding = state.padding();
        let size = state.size();
        ctx.tree.set_content_region(
            ctx.key,
            Rect::new(
                padding.left,
                TITLE_BAR_HEIGHT + padding.top,
                size.x - padding.horizontal(),
                size.y - TITLE_BAR_HEIGHT - padding.vertical(),
            ),
        );
    }

    fn on_pointer(&mut self, ctx: &mut WidgetCtx<'_, '_>, event: &PointerEvent) {
        match event.kind {
            PointerEventKind::LeftPressed => {
                Self::bring_to_front(ctx);
                let bounds = ctx.tree.absolute_bounds(ctx.key);
                if event.position.y - bounds.y < TITLE_BAR_HEIGHT {
                    self.drag_offset = Some(event.position - bounds.position());
                    ctx.input.grab_pointer(ctx.key);
                }
            }
            PointerEventKind::Moved => {
                if let Some(offset) = self.drag_offset {
                    let bounds = ctx.tree.absolute_bounds(ctx.key);
                    let delta = (event.position - offset) - bounds.position();
                    if delta != Vec2::zeros() {
                        let location = ctx
                            .tree
                            .state(ctx.key)
                            .map_or_else(Vec2::zeros, |s| s.location());
                        ctx.tree.set_location(ctx.key, location + delta);
                    }
                }
            }
            PointerEventKind::LeftReleased => {
                if self.drag_offset.take().is_some() {
                    let position = ctx
                        .tree
                        .state(ctx.key)
                        .map_or_else(Vec2::zeros, |s| s.location());
                    if let Some(id) = self.placement_id.as_deref() {
                        ctx.host.placements.store(id, position);
                    }
                    ctx.tree.emit(UiEvent::WindowMoved {
                        window: ctx.key,
                        position,
                    });
                }
            }
            _ => {}
        }
    }

    fn paint(&mut self, view: &PaintView<'_>, out: &mut DrawList) {
        if let Some(texture) = self.background {
            view.fill(out, texture, self.background_tint);
        }
        let strip = Rect::new(0.0, 0.0, view.bounds.width, TITLE_BAR_HEIGHT);
        if let Some(texture) = self.title_bar {
            view.draw_rect(out, texture, strip, WHITE);
        }
        if let Some(font) = self.font {
            view.draw_text(
                out,
                font,
                &self.title,
                strip.inset(&crate::foundation::geometry::Thickness::new(8.0, 0.0, 8.0, 0.0)),
                self.title_color,
                HorizontalAlign::Left,
                VerticalAlign::Middle,
            );
        }
    }
}
