//! Text box widget - single-line text editing with caret and undo/redo

use crate::assets::{FontHandle, TextureHandle};
use crate::events::{Property, UiEvent, Value};
use crate::foundation::geometry::Rect;
use crate::foundation::math::Vec2;
use crate::ui::capture::CaptureType;
use crate::ui::control::{ControlState, Widget, WidgetCtx};
use crate::ui::input::{Key, KeyEvent};
use crate::ui::rendering::commands::{Color, DrawList, HorizontalAlign, VerticalAlign};
use crate::ui::rendering::context::PaintView;
use crate::ui::tree::{ControlKey, UiTree};
use crate::ui::widgets::DEFAULT_FONT;

/// Horizontal inset of the text from the box edge
const TEXT_INSET: f32 = 6.0;
/// Width of the caret line
const CARET_WIDTH: f32 = 1.0;
/// Edit history depth
const UNDO_LIMIT: usize = 100;

#[derive(Debug, Clone)]
struct EditState {
    text: String,
    caret: usize,
}

/// Single-line editable text field
///
/// Gains keyboard focus on click; printable keys edit at the caret, with an
/// undo/redo stack snapshotting every mutation. `Enter` commits (emits the
/// current text), `Escape` drops focus.
#[derive(Debug)]
pub struct TextBox {
    /// Current text content
    pub text: String,

    /// Caret position in characters from the start
    pub caret: usize,

    /// Font asset name
    pub font_name: String,

    /// Background texture asset name
    pub background_texture_name: String,

    /// Background tint
    pub background_tint: Color,

    /// Text color
    pub text_color: Color,

    /// Hint shown while empty and unfocused
    pub placeholder: String,

    /// Placeholder color
    pub placeholder_color: Color,

    font: Option<FontHandle>,
    background: Option<TextureHandle>,
    focused: bool,
    undo: Vec<EditState>,
    redo: Vec<EditState>,
}

impl TextBox {
    /// Create an empty text box
    pub fn new() -> Self {
        Self {
            text: String::new(),
            caret: 0,
            font_name: DEFAULT_FONT.to_owned(),
            background_texture_name: "textures/textbox".to_owned(),
            background_tint: Color::new(0.1, 0.1, 0.1, 0.9),
            text_color: Color::new(1.0, 1.0, 1.0, 1.0),
            placeholder: String::new(),
            placeholder_color: Color::new(0.6, 0.6, 0.6, 1.0),
            font: None,
            background: None,
            focused: false,
            undo: Vec::new(),
            redo: Vec::new(),
        }
    }

    /// Builder: hint text shown while empty
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Replace the content programmatically, clearing the edit history
    pub fn set_text(tree: &mut UiTree, key: ControlKey, text: impl Into<String>) {
        let text = text.into();
        let Some(text_box) = tree.widget_mut::<TextBox>(key) else {
            return;
        };
        if text_box.text == text {
            return;
        }
        text_box.caret = text.chars().count();
        text_box.text = text;
        text_box.undo.clear();
        text_box.redo.clear();
        tree.emit(UiEvent::PropertyChanged {
            control: key,
            property: Property::Text,
        });
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Byte offset of a character index
    fn byte_at(&self, chars: usize) -> usize {
        self.text
            .char_indices()
            .nth(chars)
            .map_or(self.text.len(), |(i, _)| i)
    }

    fn snapshot(&mut self) {
        if self.undo.len() >= UNDO_LIMIT {
            self.undo.remove(0);
        }
        self.undo.push(EditState {
            text: self.text.clone(),
            caret: self.caret,
        });
        self.redo.clear();
    }

    fn apply(&mut self, state: EditState) {
        self.text = state.text;
        self.caret = state.caret;
    }

    fn undo(&mut self) -> bool {
        let Some(state) = self.undo.pop() else {
            return false;
        };
        self.redo.push(EditState {
            text: self.text.clone(),
            caret: self.caret,
        });
        self.apply(state);
        true
    }

    fn redo(&mut self) -> bool {
        let Some(state) = self.redo.pop() else {
            return false;
        };
        self.undo.push(EditState {
            text: self.text.clone(),
            caret: self.caret,
        });
        self.apply(state);
        true
    }

    fn insert_char(&mut self, c: char) {
        self.snapshot();
        let at = self.byte_at(self.caret);
        self.text.insert(at, c);
        self.caret += 1;
    }

    fn backspace(&mut self) -> bool {
        if self.caret == 0 {
            return false;
        }
        self.snapshot();
        let start = self.byte_at(self.caret - 1);
        let end = self.byte_at(self.caret);
        self.text.replace_range(start..end, "");
        self.caret -= 1;
        true
    }

    fn delete(&mut self) -> bool {
        if self.caret >= self.char_count() {
            return false;
        }
        self.snapshot();
        let start = self.byte_at(self.caret);
        let end = self.byte_at(self.caret + 1);
        self.text.replace_range(start..end, "");
        true
    }

    fn emit_text_changed(tree: &mut UiTree, key: ControlKey) {
        tree.emit(UiEvent::PropertyChanged {
            control: key,
            property: Property::Text,
        });
    }
}

impl Default for TextBox {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for TextBox {
    fn configure(&self, state: &mut ControlState) {
        state.capture = CaptureType::MOUSE;
        state.size = Vec2::new(200.0, 24.0);
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
        ctx.input.request_focus(Some(ctx.key));
    }

    fn on_focus_changed(&mut self, _ctx: &mut WidgetCtx<'_, '_>, focused: bool) {
        self.focused = focused;
    }

    fn on_key(&mut self, ctx: &mut WidgetCtx<'_, '_>, event: &KeyEvent) {
        if !ctx.tree.state(ctx.key).map_or(false, |s| s.enabled()) {
            return;
        }
        let mut changed = false;
        match event.key {
            Key::Char(c) if event.modifiers.control => match c.to_ascii_lowercase() {
                'z' => changed = self.undo(),
                'y' => changed = self.redo(),
                _ => {}
            },
            Key::Char(c) => {
                self.insert_char(c);
                changed = true;
            }
            Key::Backspace => changed = self.backspace(),
            Key::Delete => changed = self.delete(),
            Key::Left => self.caret = self.caret.saturating_sub(1),
            Key::Right => self.caret = (self.caret + 1).min(self.char_count()),
            Key::Home => self.caret = 0,
            Key::End => self.caret = self.char_count(),
            Key::Enter => {
                ctx.tree.emit(UiEvent::ValueChanged {
                    control: ctx.key,
                    value: Value::Text(self.text.clone()),
                });
            }
            Key::Escape => ctx.input.request_focus(None),
            Key::Tab => {}
        }
        if changed {
            Self::emit_text_changed(ctx.tree, ctx.key);
        }
    }

    fn paint(&mut self, view: &PaintView<'_>, out: &mut DrawList) {
        if let Some(texture) = self.background {
            view.fill(out, texture, self.background_tint);
        }
        let Some(font) = self.font else {
            return;
        };
        let text_rect = Rect::new(
            TEXT_INSET,
            0.0,
            (view.bounds.width - TEXT_INSET * 2.0).max(0.0),
            view.bounds.height,
        );
        if self.text.is_empty() && !self.focused && !self.placeholder.is_empty() {
            view.draw_text(
                out,
                font,
                &self.placeholder,
                text_rect,
                self.placeholder_color,
                HorizontalAlign::Left,
                VerticalAlign::Middle,
            );
        } else {
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
        if self.focused {
            let prefix = &self.text[..self.byte_at(self.caret)];
            let caret_x = TEXT_INSET + view.content.measure_text(font, prefix).x;
            let line_height = view.content.line_height(font);
            let caret = Rect::new(
                caret_x,
                (view.bounds.height - line_height) * 0.5,
                CARET_WIDTH,
                line_height,
            );
            if let Some(texture) = self.background {
                // Caret reuses the background texture as a solid 1px strip
                view.draw_rect(out, texture, caret, self.text_color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edit(text_box: &mut TextBox, keys: &[KeyEvent]) {
        // Drive the editing core directly; key routing is covered by the
        // dispatch tests
        for event in keys {
            match event.key {
                Key::Char(c) if event.modifiers.control => match c.to_ascii_lowercase() {
                    'z' => {
                        text_box.undo();
                    }
                    'y' => {
                        text_box.redo();
                    }
                    _ => {}
                },
                Key::Char(c) => text_box.insert_char(c),
                Key::Backspace => {
                    text_box.backspace();
                }
                Key::Delete => {
                    text_box.delete();
                }
                Key::Left => text_box.caret = text_box.caret.saturating_sub(1),
                Key::Right => text_box.caret = (text_box.caret + 1).min(text_box.char_count()),
                Key::Home => text_box.caret = 0,
                Key::End => text_box.caret = text_box.char_count(),
                _ => {}
            }
        }
    }

    fn typed(text: &str) -> Vec<KeyEvent> {
        text.chars().map(|c| KeyEvent::plain(Key::Char(c))).collect()
    }

    #[test]
    fn test_typing_inserts_at_caret() {
        let mut text_box = TextBox::new();
        edit(&mut text_box, &typed("herlo"));
        edit(
            &mut text_box,
            &[
                KeyEvent::plain(Key::Left),
                KeyEvent::plain(Key::Left),
                KeyEvent::plain(Key::Backspace),
                KeyEvent::plain(Key::Char('l')),
            ],
        );
        assert_eq!(text_box.text, "hello");
        assert_eq!(text_box.caret, 3);
    }

    #[test]
    fn test_delete_at_caret() {
        let mut text_box = TextBox::new();
        edit(&mut text_box, &typed("abc"));
        edit(&mut text_box, &[KeyEvent::plain(Key::Home), KeyEvent::plain(Key::Delete)]);
        assert_eq!(text_box.text, "bc");
        assert_eq!(text_box.caret, 0);
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut text_box = TextBox::new();
        edit(&mut text_box, &typed("ab"));
        assert_eq!(text_box.text, "ab");

        edit(&mut text_box, &[KeyEvent::ctrl(Key::Char('z'))]);
        assert_eq!(text_box.text, "a");

        edit(&mut text_box, &[KeyEvent::ctrl(Key::Char('z'))]);
        assert_eq!(text_box.text, "");

        edit(&mut text_box, &[KeyEvent::ctrl(Key::Char('y'))]);
        assert_eq!(text_box.text, "a");

        // A fresh edit truncates the redo branch
        edit(&mut text_box, &typed("x"));
        assert_eq!(text_box.text, "ax");
        edit(&mut text_box, &[KeyEvent::ctrl(Key::Char('y'))]);
        assert_eq!(text_box.text, "ax");
    }

    #[test]
    fn test_undo_restores_caret() {
        let mut text_box = TextBox::new();
        edit(&mut text_box, &typed("abc"));
        edit(&mut text_box, &[KeyEvent::plain(Key::Home), KeyEvent::plain(Key::Char('x'))]);
        assert_eq!(text_box.text, "xabc");

        edit(&mut text_box, &[KeyEvent::ctrl(Key::Char('z'))]);
        assert_eq!(text_box.text, "abc");
        assert_eq!(text_box.caret, 0);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut text_box = TextBox::new();
        edit(&mut text_box, &typed("héllo"));
        assert_eq!(text_box.char_count(), 5);

        edit(&mut text_box, &[KeyEvent::plain(Key::Home), KeyEvent::plain(Key::Right), KeyEvent::plain(Key::Delete)]);
        assert_eq!(text_box.text, "hllo");
    }
}
