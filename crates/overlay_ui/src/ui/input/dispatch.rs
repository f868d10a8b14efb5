//! Hit testing and pointer/key dispatch
//!
//! Translates a raw pointer event into exactly the correct set of control
//! callbacks, honoring z-order and declared capture semantics, and reports
//! whether the event should continue on to the host application underneath
//! the overlay.

use crate::events::UiEvent;
use crate::foundation::math::Vec2;
use crate::ui::capture::CaptureType;
use crate::ui::control::HostServices;
use crate::ui::input::context::InputContext;
use crate::ui::input::{KeyEvent, PointerEvent, PointerEventKind};
use crate::ui::tree::{ControlKey, UiTree};

/// Result of one pointer dispatch
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    /// The control that received the event exclusively, if any
    pub target: Option<ControlKey>,
    /// Filter controls that observed the event without blocking it
    pub filtered: Vec<ControlKey>,
    /// Whether the overlay withholds the event from the host application
    pub blocks_host: bool,
}

/// Resolve the control under `position` for an event needing `needed` capture
///
/// Children are visited topmost-first (descending z-index, later-added first
/// among ties). A filter control is recorded in `filtered` and treated as a
/// miss so the search continues past it; the container itself participates
/// only after none of its children claimed the hit. The same rules apply at
/// every level, the root screen included.
pub fn hit_test(
    tree: &UiTree,
    key: ControlKey,
    position: Vec2,
    needed: CaptureType,
    filtered: &mut Vec<ControlKey>,
) -> Option<ControlKey> {
    let state = tree.state(key)?;
    if !state.visible() || !tree.absolute_bounds(key).contains(position) {
        return None;
    }

    for child in tree.children_hit_order(key) {
        if let Some(hit) = hit_test(tree, child, position, needed, filtered) {
            return Some(hit);
        }
    }

    let capture = tree.state(key)?.capture();
    if capture.is_filter() {
        filtered.push(key);
        None
    } else if capture.intersects(needed) {
        Some(key)
    } else {
        None
    }
}

/// Dispatch a pointer event against the subtree rooted at `root`
pub fn dispatch_pointer(
    tree: &mut UiTree,
    input: &mut InputContext,
    host: &mut HostServices<'_>,
    root: ControlKey,
    event: &PointerEvent,
) -> DispatchOutcome {
    input.sanitize(tree);
    if let PointerEventKind::Moved = event.kind {
        input.set_mouse_position(event.position);
    }

    // An exclusive grab (drag in progress) bypasses hit testing entirely
    if let Some(grabbed) = input.grabbed() {
        if tree.contains(grabbed) {
            return dispatch_grabbed(tree, input, host, grabbed, event);
        }
        input.release_pointer();
    }

    let needed = event.kind.required_capture();
    let mut filtered = Vec::new();
    let target = hit_test(tree, root, event.position, needed, &mut filtered);

    // Filter controls observe the event without affecting the outcome
    for &observer in &filtered {
        deliver(tree, input, host, observer, event);
    }

    match event.kind {
        PointerEventKind::Moved => {
            input.set_active(tree, target);
        }
        PointerEventKind::LeftPressed | PointerEventKind::RightPressed => {
            // Pressing anywhere outside the focused control drops focus
            if input.focused().is_some() && target != input.focused() {
                input.request_focus(None);
            }
            if event.kind == PointerEventKind::LeftPressed {
                input.note_press(target, event.time);
            }
        }
        _ => {}
    }

    if let Some(target) = target {
        deliver(tree, input, host, target, event);
    }
    if event.kind == PointerEventKind::LeftReleased {
        synthesize_click(tree, input, host, target, event.time);
    }

    let blocks_host = target.is_some_and(|key| {
        tree.state(key).map_or(false, |s| s.capture().blocks_host())
    });
    DispatchOutcome {
        target,
        filtered,
        blocks_host,
    }
}

/// Dispatch while a control holds an exclusive pointer grab
fn dispatch_grabbed(
    tree: &mut UiTree,
    input: &mut InputContext,
    host: &mut HostServices<'_>,
    grabbed: ControlKey,
    event: &PointerEvent,
) -> DispatchOutcome {
    deliver(tree, input, host, grabbed, event);
    if event.kind == PointerEventKind::LeftReleased {
        synthesize_click(tree, input, host, Some(grabbed), event.time);
        input.release_pointer();
    }
    DispatchOutcome {
        target: Some(grabbed),
        filtered: Vec::new(),
        blocks_host: tree
            .state(grabbed)
            .map_or(false, |s| s.capture().blocks_host()),
    }
}

fn deliver(
    tree: &mut UiTree,
    input: &mut InputContext,
    host: &mut HostServices<'_>,
    key: ControlKey,
    event: &PointerEvent,
) {
    tree.with_widget(key, input, host, |widget, ctx, _| {
        widget.on_pointer(ctx, event);
    });
}

/// Pair a release with its press into a click
///
/// A press/release on the same control within the double-click threshold
/// synthesizes a click distinct from the raw release; a second click within
/// the same window flags a double click. Disabled controls swallow the pair.
fn synthesize_click(
    tree: &mut UiTree,
    input: &mut InputContext,
    host: &mut HostServices<'_>,
    target: Option<ControlKey>,
    time: f64,
) {
    let Some((pressed, pressed_time)) = input.take_press() else {
        return;
    };
    if target != Some(pressed) || time - pressed_time > input.double_click_threshold {
        return;
    }
    if !tree.state(pressed).map_or(false, |s| s.enabled()) {
        return;
    }
    let double = input.note_click(pressed, time);
    log::debug!("click on {pressed:?} (double: {double})");
    tree.emit(UiEvent::Click {
        control: pressed,
        double,
    });
    tree.with_widget(pressed, input, host, |widget, ctx, _| {
        widget.on_click(ctx, double);
    });
}

/// Apply a pending focus transition
///
/// Runs between dispatches so the widgets gaining and losing focus are
/// notified outside of their own callbacks.
pub fn apply_focus_request(
    tree: &mut UiTree,
    input: &mut InputContext,
    host: &mut HostServices<'_>,
) {
    let Some(request) = input.take_focus_request() else {
        return;
    };
    let request = request.filter(|key| tree.contains(*key));
    if request == input.focused() {
        return;
    }
    let previous = input.focused();
    input.set_focused_internal(request);
    if let Some(prev) = previous {
        tree.with_widget(prev, input, host, |widget, ctx, _| {
            widget.on_focus_changed(ctx, false);
        });
    }
    if let Some(next) = request {
        tree.with_widget(next, input, host, |widget, ctx, _| {
            widget.on_focus_changed(ctx, true);
        });
    }
    tree.emit(UiEvent::FocusChanged {
        previous,
        current: request,
    });
}

/// Route a key event to the focused control
///
/// Returns true when a focused control consumed the event.
pub fn dispatch_key(
    tree: &mut UiTree,
    input: &mut InputContext,
    host: &mut HostServices<'_>,
    event: &KeyEvent,
) -> bool {
    input.sanitize(tree);
    let Some(focused) = input.focused() else {
        return false;
    };
    tree.with_widget(focused, input, host, |widget, ctx, _| {
        widget.on_key(ctx, event);
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Tweener;
    use crate::assets::NullContent;
    use crate::config::MemoryPlacementStore;
    use crate::ui::control::{Widget, WidgetCtx};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Log {
        pointer: Vec<PointerEventKind>,
        clicks: usize,
    }

    struct RecordingWidget {
        log: Rc<RefCell<Log>>,
    }

    impl Widget for RecordingWidget {
        fn on_pointer(&mut self, _ctx: &mut WidgetCtx<'_, '_>, event: &PointerEvent) {
            self.log.borrow_mut().pointer.push(event.kind);
        }

        fn on_click(&mut self, _ctx: &mut WidgetCtx<'_, '_>, _double: bool) {
            self.log.borrow_mut().clicks += 1;
        }
    }

    struct Fixture {
        tree: UiTree,
        input: InputContext,
        tweener: Tweener,
        content: NullContent,
        placements: MemoryPlacementStore,
        root: ControlKey,
    }

    impl Fixture {
        fn new() -> Self {
            let mut tree = UiTree::new();
            let root = tree.add_plain_container();
            tree.set_size(root, Vec2::new(800.0, 600.0));
            Self {
                tree,
                input: InputContext::new(),
                tweener: Tweener::new(),
                content: NullContent,
                placements: MemoryPlacementStore::default(),
                root,
            }
        }

        fn recording(&mut self, log: &Rc<RefCell<Log>>) -> ControlKey {
            let key = self.tree.add(RecordingWidget {
                log: Rc::clone(log),
            });
            self.tree.set_capture(key, CaptureType::MOUSE);
            key
        }

        fn dispatch(&mut self, kind: PointerEventKind, x: f32, y: f32, time: f64) -> DispatchOutcome {
            let mut host = HostServices {
                content: &self.content,
                tweener: &mut self.tweener,
                placements: &mut self.placements,
            };
            dispatch_pointer(
                &mut self.tree,
                &mut self.input,
                &mut host,
                self.root,
                &PointerEvent::new(kind, Vec2::new(x, y), time),
            )
        }
    }

    #[test]
    fn test_click_dispatch_scenario() {
        // Container C (0,0,200,200) with child B (Mouse, 50,50,40,40)
        let log = Rc::new(RefCell::new(Log::default()));
        let mut fx = Fixture::new();
        let container = fx.tree.add_plain_container();
        fx.tree.set_size(container, Vec2::new(200.0, 200.0));
        fx.tree.try_set_parent(container, Some(fx.root)).unwrap();

        let child = fx.recording(&log);
        fx.tree.set_location(child, Vec2::new(50.0, 50.0));
        fx.tree.set_size(child, Vec2::new(40.0, 40.0));
        fx.tree.try_set_parent(child, Some(container)).unwrap();

        let outcome = fx.dispatch(PointerEventKind::LeftPressed, 60.0, 60.0, 0.0);
        assert_eq!(outcome.target, Some(child));
        assert!(outcome.blocks_host);
        assert_eq!(log.borrow().pointer, vec![PointerEventKind::LeftPressed]);
    }

    #[test]
    fn test_z_order_tie_breaks_by_insertion() {
        let log_first = Rc::new(RefCell::new(Log::default()));
        let log_second = Rc::new(RefCell::new(Log::default()));
        let log_low = Rc::new(RefCell::new(Log::default()));
        let mut fx = Fixture::new();

        let first = fx.recording(&log_first);
        let second = fx.recording(&log_second);
        let low = fx.recording(&log_low);
        for (key, z) in [(first, 5), (second, 5), (low, 3)] {
            fx.tree.set_z_index(key, z);
            fx.tree.set_size(key, Vec2::new(100.0, 100.0));
            fx.tree.try_set_parent(key, Some(fx.root)).unwrap();
        }

        let outcome = fx.dispatch(PointerEventKind::LeftPressed, 10.0, 10.0, 0.0);
        assert_eq!(outcome.target, Some(second));
        assert!(log_first.borrow().pointer.is_empty());
        assert!(log_low.borrow().pointer.is_empty());
    }

    #[test]
    fn test_filter_passes_through_to_mouse_capture() {
        let log_filter = Rc::new(RefCell::new(Log::default()));
        let log_mouse = Rc::new(RefCell::new(Log::default()));
        let mut fx = Fixture::new();

        let filter = fx.recording(&log_filter);
        fx.tree.set_capture(filter, CaptureType::FILTER);
        fx.tree.set_z_index(filter, 10);
        fx.tree.set_size(filter, Vec2::new(100.0, 100.0));
        fx.tree.try_set_parent(filter, Some(fx.root)).unwrap();

        let mouse = fx.recording(&log_mouse);
        fx.tree.set_z_index(mouse, 1);
        fx.tree.set_size(mouse, Vec2::new(100.0, 100.0));
        fx.tree.try_set_parent(mouse, Some(fx.root)).unwrap();

        let outcome = fx.dispatch(PointerEventKind::LeftPressed, 20.0, 20.0, 0.0);
        assert_eq!(outcome.target, Some(mouse));
        assert_eq!(outcome.filtered, vec![filter]);
        // The filter control still observed the event
        assert_eq!(log_filter.borrow().pointer, vec![PointerEventKind::LeftPressed]);
        assert_eq!(log_mouse.borrow().pointer, vec![PointerEventKind::LeftPressed]);
    }

    #[test]
    fn test_none_capture_is_transparent() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut fx = Fixture::new();
        let deaf = fx.recording(&log);
        fx.tree.set_capture(deaf, CaptureType::NONE);
        fx.tree.set_size(deaf, Vec2::new(100.0, 100.0));
        fx.tree.try_set_parent(deaf, Some(fx.root)).unwrap();

        let outcome = fx.dispatch(PointerEventKind::LeftPressed, 10.0, 10.0, 0.0);
        assert_eq!(outcome.target, None);
        assert!(!outcome.blocks_host);
        assert!(log.borrow().pointer.is_empty());
    }

    #[test]
    fn test_do_not_block_reaches_widget_and_host() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut fx = Fixture::new();
        let key = fx.recording(&log);
        fx.tree
            .set_capture(key, CaptureType::MOUSE | CaptureType::DO_NOT_BLOCK);
        fx.tree.set_size(key, Vec2::new(100.0, 100.0));
        fx.tree.try_set_parent(key, Some(fx.root)).unwrap();

        let outcome = fx.dispatch(PointerEventKind::LeftPressed, 10.0, 10.0, 0.0);
        assert_eq!(outcome.target, Some(key));
        assert!(!outcome.blocks_host);
        assert_eq!(log.borrow().pointer, vec![PointerEventKind::LeftPressed]);
    }

    #[test]
    fn test_click_synthesis_and_double_click() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut fx = Fixture::new();
        let key = fx.recording(&log);
        fx.tree.set_size(key, Vec2::new(100.0, 100.0));
        fx.tree.try_set_parent(key, Some(fx.root)).unwrap();
        fx.tree.drain_events();

        fx.dispatch(PointerEventKind::LeftPressed, 10.0, 10.0, 1.0);
        fx.dispatch(PointerEventKind::LeftReleased, 12.0, 10.0, 1.1);
        fx.dispatch(PointerEventKind::LeftPressed, 10.0, 10.0, 1.2);
        fx.dispatch(PointerEventKind::LeftReleased, 10.0, 10.0, 1.3);

        assert_eq!(log.borrow().clicks, 2);
        let clicks: Vec<_> = fx
            .tree
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                UiEvent::Click { control, double } => Some((control, double)),
                _ => None,
            })
            .collect();
        assert_eq!(clicks, vec![(key, false), (key, true)]);
    }

    #[test]
    fn test_slow_release_is_not_a_click() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut fx = Fixture::new();
        let key = fx.recording(&log);
        fx.tree.set_size(key, Vec2::new(100.0, 100.0));
        fx.tree.try_set_parent(key, Some(fx.root)).unwrap();

        fx.dispatch(PointerEventKind::LeftPressed, 10.0, 10.0, 1.0);
        fx.dispatch(PointerEventKind::LeftReleased, 10.0, 10.0, 2.5);
        assert_eq!(log.borrow().clicks, 0);
    }

    #[test]
    fn test_disabled_control_swallows_click() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut fx = Fixture::new();
        let key = fx.recording(&log);
        fx.tree.set_size(key, Vec2::new(100.0, 100.0));
        fx.tree.set_enabled(key, false);
        fx.tree.try_set_parent(key, Some(fx.root)).unwrap();

        fx.dispatch(PointerEventKind::LeftPressed, 10.0, 10.0, 1.0);
        fx.dispatch(PointerEventKind::LeftReleased, 10.0, 10.0, 1.1);
        assert_eq!(log.borrow().clicks, 0);
    }

    #[test]
    fn test_move_tracks_active_control() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut fx = Fixture::new();
        let key = fx.recording(&log);
        fx.tree.set_size(key, Vec2::new(100.0, 100.0));
        fx.tree.try_set_parent(key, Some(fx.root)).unwrap();

        fx.dispatch(PointerEventKind::Moved, 10.0, 10.0, 0.0);
        assert_eq!(fx.input.active(), Some(key));
        assert!(fx.tree.state(key).unwrap().mouse_over());

        fx.dispatch(PointerEventKind::Moved, 500.0, 500.0, 0.1);
        assert_eq!(fx.input.active(), None);
        assert!(!fx.tree.state(key).unwrap().mouse_over());
    }

    #[test]
    fn test_wheel_needs_wheel_capture() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut fx = Fixture::new();
        let key = fx.recording(&log);
        fx.tree.set_size(key, Vec2::new(100.0, 100.0));
        fx.tree.try_set_parent(key, Some(fx.root)).unwrap();

        let outcome = fx.dispatch(PointerEventKind::Wheel { delta: 1.0 }, 10.0, 10.0, 0.0);
        assert_eq!(outcome.target, None);

        fx.tree
            .set_capture(key, CaptureType::MOUSE | CaptureType::MOUSE_WHEEL);
        let outcome = fx.dispatch(PointerEventKind::Wheel { delta: 1.0 }, 10.0, 10.0, 0.1);
        assert_eq!(outcome.target, Some(key));
    }

    #[test]
    fn test_grab_routes_movement_outside_bounds() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut fx = Fixture::new();
        let key = fx.recording(&log);
        fx.tree.set_size(key, Vec2::new(100.0, 100.0));
        fx.tree.try_set_parent(key, Some(fx.root)).unwrap();

        fx.dispatch(PointerEventKind::LeftPressed, 10.0, 10.0, 0.0);
        fx.input.grab_pointer(key);
        fx.dispatch(PointerEventKind::Moved, 700.0, 500.0, 0.1);
        fx.dispatch(PointerEventKind::LeftReleased, 700.0, 500.0, 0.2);

        assert_eq!(
            log.borrow().pointer,
            vec![
                PointerEventKind::LeftPressed,
                PointerEventKind::Moved,
                PointerEventKind::LeftReleased
            ]
        );
        assert_eq!(fx.input.grabbed(), None);
    }
}
