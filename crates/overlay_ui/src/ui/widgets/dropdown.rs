//! Dropdown widget - single selection from a pop-out item list
//!
//! The closed control shows the current selection; clicking it builds a
//! transient item list parented to the screen root (so it stacks above
//! everything and escapes the owner's clip region). Picking an item updates
//! the selection and disposes the list.

use crate::assets::{FontHandle, TextureHandle};
use crate::events::{Property, UiEvent, Value};
use crate::foundation::math::Vec2;
use crate::ui::capture::CaptureType;
use crate::ui::control::{ControlState, Widget, WidgetCtx};
use crate::ui::rendering::commands::{Color, DrawList, HorizontalAlign, VerticalAlign, WHITE};
use crate::ui::rendering::context::PaintView;
use crate::ui::tree::{ControlKey, UiTree};
use crate::ui::widgets::menu::MenuStrip;
use crate::ui::widgets::DEFAULT_FONT;

/// Z band for open dropdown lists, above regular content
const LIST_Z: i32 = 1200;

/// Closed dropdown showing the selected item
#[derive(Debug)]
pub struct Dropdown {
    /// Selectable items
    pub items: Vec<String>,

    /// Index of the current selection
    pub selected: Option<usize>,

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
    open_list: Option<ControlKey>,
}

impl Dropdown {
    /// Create a dropdown over `items` with nothing selected
    pub fn new(items: Vec<String>) -> Self {
        Self {
            items,
            selected: None,
            font_name: DEFAULT_FONT.to_owned(),
            background_texture_name: "textures/dropdown".to_owned(),
            background_tint: Color::new(0.15, 0.15, 0.15, 0.95),
            text_color: WHITE,
            font: None,
            background: None,
            open_list: None,
        }
    }

    /// Set the selection programmatically, with change notification
    pub fn select(tree: &mut UiTree, key: ControlKey, index: usize) {
        let Some(dropdown) = tree.widget_mut::<Dropdown>(key) else {
            return;
        };
        if index >= dropdown.items.len() || dropdown.selected == Some(index) {
            return;
        }
        dropdown.selected = Some(index);
        tree.emit(UiEvent::PropertyChanged {
            control: key,
            property: Property::Value,
        });
        tree.emit(UiEvent::ValueChanged {
            control: key,
            value: Value::Index(index),
        });
    }

    /// Text of the current selection
    pub fn selected_text(&self) -> Option<&str> {
        self.selected
            .and_then(|index| self.items.get(index))
            .map(String::as_str)
    }

    fn open(&mut self, ctx: &mut WidgetCtx<'_, '_>) {
        let root = ctx.tree.root_of(ctx.key);
        if root == ctx.key {
            log::warn!("dropdown cannot open before it is attached to a screen");
            return;
        }
        let own_bounds = ctx.tree.absolute_bounds(ctx.key);
        let mut strip = MenuStrip::new();
        strip.width = own_bounds.width;
        let list = ctx.tree.add_container(strip);
        if ctx.tree.try_set_parent(list, Some(root)).is_err() {
            log::warn!("dropdown list could not be attached to the screen root");
            ctx.tree.dispose(list);
            return;
        }
        for (index, item) in self.items.iter().enumerate() {
            let entry = ctx.tree.add(DropdownItem {
                owner: ctx.key,
                list,
                index,
                item: crate::ui::widgets::menu::MenuItem::new(item.clone()),
            });
            if ctx.tree.try_set_parent(entry, Some(list)).is_err() {
                log::warn!("dropdown entry could not be attached to its list");
            }
        }

        // Below the closed control, in root content space
        let root_origin = ctx.tree.absolute_origin(root)
            + ctx
                .tree
                .content_region(root)
                .map_or_else(Vec2::zeros, |r| r.position())
            - ctx.tree.scroll_offset(root);
        let local = Vec2::new(own_bounds.x, own_bounds.bottom()) - root_origin;
        ctx.tree.set_location(list, local);
        ctx.tree.set_z_index(list, LIST_Z);
        ctx.tree.invalidate(list);
        self.open_list = Some(list);
    }

    fn close(&mut self, tree: &mut UiTree) {
        if let Some(list) = self.open_list.take() {
            if tree.contains(list) {
                tree.dispose(list);
            }
        }
    }
}

impl Widget for Dropdown {
    fn configure(&self, state: &mut ControlState) {
        state.capture = CaptureType::MOUSE;
        state.size = Vec2::new(160.0, 24.0);
    }

    fn update(&mut self, ctx: &mut WidgetCtx<'_, '_>, _dt: f32) {
        if self.font.is_none() {
            self.font = ctx.host.content.font(&self.font_name);
        }
        if self.background.is_none() {
            self.background = ctx.host.content.texture(&self.background_texture_name);
        }
    }

    fn on_click(&mut self, ctx: &mut WidgetCtx<'_, '_>, _double: bool) {
        if self.open_list.is_some() {
            self.close(ctx.tree);
        } else {
            self.open(ctx);
        }
    }

    fn on_disposed(&mut self, tree: &mut UiTree, _key: ControlKey) {
        self.close(tree);
    }

    fn paint(&mut self, view: &PaintView<'_>, out: &mut DrawList) {
        if let Some(texture) = self.background {
            view.fill(out, texture, self.background_tint);
        }
        if let Some(font) = self.font {
            let text = self.selected_text().unwrap_or("-");
            let rect = view
                .local_bounds()
                .inset(&crate::foundation::geometry::Thickness::new(6.0, 0.0, 6.0, 0.0));
            view.draw_text(
                out,
                font,
                text,
                rect,
                self.text_color,
                HorizontalAlign::Left,
                VerticalAlign::Middle,
            );
        }
    }
}

/// One row of an open dropdown list
///
/// Wraps a [`crate::ui::widgets::menu::MenuItem`] look while routing the
/// selection back to the owning dropdown.
#[derive(Debug)]
struct DropdownItem {
    owner: ControlKey,
    list: ControlKey,
    index: usize,
    item: crate::ui::widgets::menu::MenuItem,
}

impl Widget for DropdownItem {
    fn configure(&self, state: &mut ControlState) {
        self.item.configure(state);
    }

    fn update(&mut self, ctx: &mut WidgetCtx<'_, '_>, dt: f32) {
        self.item.update(ctx, dt);
    }

    fn on_click(&mut self, ctx: &mut WidgetCtx<'_, '_>, _double: bool) {
        let (owner, list, index) = (self.owner, self.list, self.index);
        if let Some(dropdown) = ctx.tree.widget_mut::<Dropdown>(owner) {
            dropdown.open_list = None;
        }
        Dropdown::select(ctx.tree, owner, index);
        ctx.host.content.play_sound("audio/menu-select");
        ctx.tree.dispose(list);
    }

    fn paint(&mut self, view: &PaintView<'_>, out: &mut DrawList) {
        self.item.paint(view, out);
    }
}
