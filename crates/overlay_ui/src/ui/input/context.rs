//! Pointer and keyboard focus context
//!
//! Tracks which control the pointer rests on (active), which control holds
//! keyboard focus, and the transient press/grab state dispatch needs to
//! synthesize clicks and support dragging. One context belongs to one screen;
//! nothing here is process-global.

use crate::events::UiEvent;
use crate::foundation::math::Vec2;
use crate::ui::tree::{ControlKey, UiTree};

/// Seconds within which a press/release pair counts as a click, and two
/// clicks count as a double click
pub const DOUBLE_CLICK_THRESHOLD: f64 = 0.5;

/// Per-screen input state
#[derive(Debug)]
pub struct InputContext {
    mouse_position: Vec2,
    active: Option<ControlKey>,
    focused: Option<ControlKey>,
    grabbed: Option<ControlKey>,
    pressed: Option<(ControlKey, f64)>,
    last_click: Option<(ControlKey, f64)>,
    focus_request: Option<Option<ControlKey>>,
    /// Click pairing window in seconds
    pub double_click_threshold: f64,
}

impl Default for InputContext {
    fn default() -> Self {
        Self {
            mouse_position: Vec2::zeros(),
            active: None,
            focused: None,
            grabbed: None,
            pressed: None,
            last_click: None,
            focus_request: None,
            double_click_threshold: DOUBLE_CLICK_THRESHOLD,
        }
    }
}

impl InputContext {
    /// Create a fresh context
    pub fn new() -> Self {
        Self::default()
    }

    /// Last observed pointer position in screen space
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    pub(crate) fn set_mouse_position(&mut self, position: Vec2) {
        self.mouse_position = position;
    }

    /// Control currently under the pointer
    pub fn active(&self) -> Option<ControlKey> {
        self.active
    }

    /// Control currently holding keyboard focus
    pub fn focused(&self) -> Option<ControlKey> {
        self.focused
    }

    /// Control currently holding an exclusive pointer grab (dragging)
    pub fn grabbed(&self) -> Option<ControlKey> {
        self.grabbed
    }

    /// Route all pointer events to `key` until the next left-button release
    ///
    /// Used by dragging widgets (sliders, window title bars, scrollbar
    /// thumbs) that must keep receiving movement after the pointer leaves
    /// their bounds.
    pub fn grab_pointer(&mut self, key: ControlKey) {
        self.grabbed = Some(key);
    }

    /// End an exclusive pointer grab
    pub fn release_pointer(&mut self) {
        self.grabbed = None;
    }

    /// Ask for keyboard focus to move to `target` (or clear with `None`)
    ///
    /// Focus transitions are applied between dispatches so the widgets
    /// involved get their focus callbacks outside of their own call stack.
    pub fn request_focus(&mut self, target: Option<ControlKey>) {
        self.focus_request = Some(target);
    }

    pub(crate) fn take_focus_request(&mut self) -> Option<Option<ControlKey>> {
        self.focus_request.take()
    }

    pub(crate) fn set_focused_internal(&mut self, focused: Option<ControlKey>) {
        self.focused = focused;
    }

    pub(crate) fn note_press(&mut self, target: Option<ControlKey>, time: f64) {
        self.pressed = target.map(|key| (key, time));
    }

    pub(crate) fn take_press(&mut self) -> Option<(ControlKey, f64)> {
        self.pressed.take()
    }

    pub(crate) fn note_click(&mut self, key: ControlKey, time: f64) -> bool {
        let double = self.last_click.is_some_and(|(last_key, last_time)| {
            last_key == key && time - last_time <= self.double_click_threshold
        });
        // A double click ends the chain; a triple starts a new pair
        self.last_click = if double { None } else { Some((key, time)) };
        double
    }

    /// Move the active (moused-over) control, firing enter/leave and the
    /// active-change notification
    pub fn set_active(&mut self, tree: &mut UiTree, target: Option<ControlKey>) {
        let target = target.filter(|key| tree.contains(*key));
        if self.active == target {
            return;
        }
        let previous = self.active;
        if let Some(prev) = previous {
            if let Some(node) = tree.nodes.get_mut(prev) {
                node.state.mouse_over = false;
                tree.pending.push(UiEvent::MouseLeft { control: prev });
            }
        }
        if let Some(next) = target {
            if let Some(node) = tree.nodes.get_mut(next) {
                node.state.mouse_over = true;
                tree.pending.push(UiEvent::MouseEntered { control: next });
            }
        }
        self.active = target;
        log::trace!("active control changed: {previous:?} -> {target:?}");
        tree.emit(UiEvent::ActiveChanged {
            previous,
            current: target,
        });
    }

    /// Drop references to controls that were disposed or hidden
    ///
    /// Called once per frame and before each dispatch, this is what clears
    /// the active/focused controls when a control disappears out from under
    /// them.
    pub fn sanitize(&mut self, tree: &mut UiTree) {
        if self
            .active
            .is_some_and(|key| !tree.effectively_visible(key))
        {
            self.set_active(tree, None);
        }
        if self
            .focused
            .is_some_and(|key| !tree.effectively_visible(key))
            && self.focus_request.is_none()
        {
            self.request_focus(None);
        }
        if self.grabbed.is_some_and(|key| !tree.contains(key)) {
            self.grabbed = None;
        }
        if self.pressed.is_some_and(|(key, _)| !tree.contains(key)) {
            self.pressed = None;
        }
        if self.last_click.is_some_and(|(key, _)| !tree.contains(key)) {
            self.last_click = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::UiEventKind;

    #[test]
    fn test_active_change_fires_enter_leave() {
        let mut tree = UiTree::new();
        let a = tree.add_plain();
        let b = tree.add_plain();
        let mut input = InputContext::new();

        input.set_active(&mut tree, Some(a));
        assert!(tree.state(a).unwrap().mouse_over());
        tree.drain_events();

        input.set_active(&mut tree, Some(b));
        assert!(!tree.state(a).unwrap().mouse_over());
        assert!(tree.state(b).unwrap().mouse_over());

        let kinds: Vec<_> = tree.drain_events().iter().map(UiEvent::kind).collect();
        assert_eq!(
            kinds,
            vec![
                UiEventKind::MouseLeft,
                UiEventKind::MouseEntered,
                UiEventKind::ActiveChanged
            ]
        );
    }

    #[test]
    fn test_sanitize_clears_hidden_active() {
        let mut tree = UiTree::new();
        let a = tree.add_plain();
        let mut input = InputContext::new();
        input.set_active(&mut tree, Some(a));

        tree.set_visible(a, false);
        input.sanitize(&mut tree);
        assert_eq!(input.active(), None);
    }

    #[test]
    fn test_double_click_chain() {
        let mut tree = UiTree::new();
        let a = tree.add_plain();
        let mut input = InputContext::new();

        assert!(!input.note_click(a, 1.0));
        assert!(input.note_click(a, 1.2));
        // The chain resets after a double; a third click is single again
        assert!(!input.note_click(a, 1.4));
        // Too slow to pair
        assert!(!input.note_click(a, 5.0));
    }
}
