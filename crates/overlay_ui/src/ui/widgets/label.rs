//! Label widget - static text display

use crate::assets::FontHandle;
use crate::events::{Property, UiEvent};
use crate::foundation::math::Vec2;
use crate::ui::control::{ControlState, Widget, WidgetCtx};
use crate::ui::rendering::commands::{Color, DrawList, HorizontalAlign, VerticalAlign};
use crate::ui::rendering::context::PaintView;
use crate::ui::tree::{ControlKey, UiTree};
use crate::ui::widgets::DEFAULT_FONT;

/// Static text control
#[derive(Debug)]
pub struct Label {
    /// Displayed text
    pub text: String,

    /// Font asset name
    pub font_name: String,

    /// Text color
    pub color: Color,

    /// Horizontal placement within bounds
    pub horizontal_align: HorizontalAlign,

    /// Vertical placement within bounds
    pub vertical_align: VerticalAlign,

    /// Grow the control to fit the measured text
    pub auto_size: bool,

    font: Option<FontHandle>,
    needs_measure: bool,
}

impl Label {
    /// Create a label with the default font
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_name: DEFAULT_FONT.to_owned(),
            color: Color::new(1.0, 1.0, 1.0, 1.0),
            horizontal_align: HorizontalAlign::Left,
            vertical_align: VerticalAlign::Middle,
            auto_size: true,
            font: None,
            needs_measure: true,
        }
    }

    /// Replace the label text, re-measuring on the next update
    pub fn set_text(tree: &mut UiTree, key: ControlKey, text: impl Into<String>) {
        let text = text.into();
        let Some(label) = tree.widget_mut::<Label>(key) else {
            return;
        };
        if label.text == text {
            return;
        }
        label.text = text;
        label.needs_measure = true;
        tree.emit(UiEvent::PropertyChanged {
            control: key,
            property: Property::Text,
        });
        tree.invalidate(key);
    }
}

impl Widget for Label {
    fn configure(&self, state: &mut ControlState) {
        // Labels never intercept input
        state.capture = crate::ui::capture::CaptureType::NONE;
    }

    fn update(&mut self, ctx: &mut WidgetCtx<'_, '_>, _dt: f32) {
        if self.font.is_none() {
            self.font = ctx.host.content.font(&self.font_name);
        }
        if self.auto_size && self.needs_measure {
            if let Some(font) = self.font {
                let measured = ctx.host.content.measure_text(font, &self.text);
                ctx.tree
                    .set_size(ctx.key, Vec2::new(measured.x, measured.y.max(1.0)));
                self.needs_measure = false;
            }
        }
    }

    fn paint(&mut self, view: &PaintView<'_>, out: &mut DrawList) {
        let Some(font) = self.font else {
            return;
        };
        view.draw_text(
            out,
            font,
            &self.text,
            view.local_bounds(),
            self.color,
            self.horizontal_align,
            self.vertical_align,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Tweener;
    use crate::assets::NullContent;
    use crate::config::MemoryPlacementStore;
    use crate::ui::control::HostServices;
    use crate::ui::input::context::InputContext;

    #[test]
    fn test_auto_size_measures_text() {
        let mut tree = UiTree::new();
        let root = tree.add_plain_container();
        tree.set_size(root, Vec2::new(800.0, 600.0));
        let label = tree.add(Label::new("hello"));
        tree.try_set_parent(label, Some(root)).unwrap();

        let content = NullContent;
        let mut tweener = Tweener::new();
        let mut placements = MemoryPlacementStore::default();
        let mut input = InputContext::new();
        let mut host = HostServices {
            content: &content,
            tweener: &mut tweener,
            placements: &mut placements,
        };
        tree.update(root, &mut input, &mut host, 0.016);

        // NullContent glyphs are 8x16
        assert_eq!(tree.state(label).unwrap().size(), Vec2::new(40.0, 16.0));
    }

    #[test]
    fn test_set_text_same_value_is_noop() {
        let mut tree = UiTree::new();
        let label = tree.add(Label::new("hello"));
        tree.drain_events();

        Label::set_text(&mut tree, label, "hello");
        assert!(tree.drain_events().is_empty());

        Label::set_text(&mut tree, label, "world");
        assert!(!tree.drain_events().is_empty());
        assert_eq!(tree.widget::<Label>(label).unwrap().text, "world");
    }
}
