//! Screen-level orchestration
//!
//! A [`Screen`] is the root of one overlay: it owns the control tree, the
//! input context, the event system, and the tween scheduler, and exposes the
//! per-frame update/dispatch/paint pump the host render loop drives. Global
//! interaction rules live here: a change of the active control hides visible
//! tooltips and dismisses context menus the pointer is no longer over.

use crate::animation::Tweener;
use crate::assets::ContentProvider;
use crate::config::PlacementStore;
use crate::events::{EventSystem, UiEvent};
use crate::foundation::math::Vec2;
use crate::ui::control::{HostServices, PlainWidget};
use crate::ui::input::context::InputContext;
use crate::ui::input::dispatch::{
    apply_focus_request, dispatch_key, dispatch_pointer, DispatchOutcome,
};
use crate::ui::input::{KeyEvent, PointerEvent, PointerEventKind};
use crate::ui::rendering::backend::{RenderBackend, RenderError};
use crate::ui::rendering::commands::DrawList;
use crate::ui::tree::{ControlKey, UiTree};

/// Z-index band where tooltips live, above normal content
const TOOLTIP_Z: i32 = 1000;
/// Z-index band where context menus live, above tooltips
const CONTEXT_MENU_Z: i32 = 1100;
/// Offset of a tooltip's top-left corner from the pointer
const TOOLTIP_OFFSET: Vec2 = Vec2::new(12.0, 18.0);

/// Root container of one overlay UI
pub struct Screen {
    tree: UiTree,
    root: ControlKey,
    input: InputContext,
    events: EventSystem,
    tweener: Tweener,
    draw_list: DrawList,
    frame_events: Vec<UiEvent>,
    visible_tooltip: Option<ControlKey>,
    open_context_menu: Option<ControlKey>,
}

impl Screen {
    /// Create a screen spanning `size` pixels
    pub fn new(size: Vec2) -> Self {
        let mut tree = UiTree::new();
        let root = tree.add_container(PlainWidget);
        tree.set_size(root, size);
        Self {
            tree,
            root,
            input: InputContext::new(),
            events: EventSystem::new(),
            tweener: Tweener::new(),
            draw_list: DrawList::new(),
            frame_events: Vec::new(),
            visible_tooltip: None,
            open_context_menu: None,
        }
    }

    /// The control tree
    pub fn tree(&self) -> &UiTree {
        &self.tree
    }

    /// Mutable access to the control tree
    pub fn tree_mut(&mut self) -> &mut UiTree {
        &mut self.tree
    }

    /// The root container every top-level control parents to
    pub fn root(&self) -> ControlKey {
        self.root
    }

    /// The input context
    pub fn input(&self) -> &InputContext {
        &self.input
    }

    /// Mutable access to the input context
    pub fn input_mut(&mut self) -> &mut InputContext {
        &mut self.input
    }

    /// Handler registration for UI events
    pub fn events_mut(&mut self) -> &mut EventSystem {
        &mut self.events
    }

    /// The tween scheduler
    pub fn tweener_mut(&mut self) -> &mut Tweener {
        &mut self.tweener
    }

    /// Resize the screen (host window/backbuffer resize)
    pub fn resize(&mut self, size: Vec2) {
        self.tree.set_size(self.root, size);
    }

    /// Attach a tooltip control to an owner
    ///
    /// The tooltip is parented to the root, hidden, and raised into the
    /// tooltip z band; it shows near the pointer while the owner is the
    /// active control.
    pub fn attach_tooltip(&mut self, owner: ControlKey, tooltip: ControlKey) {
        if self.tree.try_set_parent(tooltip, Some(self.root)).is_err() {
            log::warn!("tooltip could not be attached to the screen root");
            return;
        }
        self.tree.set_visible(tooltip, false);
        self.tree.set_z_index(tooltip, TOOLTIP_Z);
        self.tree.set_tooltip(owner, Some(tooltip));
    }

    /// Attach a context menu to an owner, opened on right-press
    pub fn attach_context_menu(&mut self, owner: ControlKey, menu: ControlKey) {
        if self.tree.try_set_parent(menu, Some(self.root)).is_err() {
            log::warn!("context menu could not be attached to the screen root");
            return;
        }
        self.tree.set_visible(menu, false);
        self.tree.set_z_index(menu, CONTEXT_MENU_Z);
        self.tree.set_context_menu(owner, Some(menu));
    }

    /// Per-frame update: tween step, sizing, widget updates, event pump
    ///
    /// Returns every event dispatched since the last update, dispatched
    /// pointer/key events included.
    pub fn update(
        &mut self,
        content: &dyn ContentProvider,
        placements: &mut dyn PlacementStore,
        dt: f32,
    ) -> Vec<UiEvent> {
        self.tweener.update(&mut self.tree, dt);
        let mut host = HostServices {
            content,
            tweener: &mut self.tweener,
            placements,
        };
        self.tree.update(self.root, &mut self.input, &mut host, dt);
        apply_focus_request(&mut self.tree, &mut self.input, &mut host);
        self.input.sanitize(&mut self.tree);
        self.pump_events();
        std::mem::take(&mut self.frame_events)
    }

    /// Dispatch a pointer event from the input host
    pub fn handle_pointer(
        &mut self,
        content: &dyn ContentProvider,
        placements: &mut dyn PlacementStore,
        event: &PointerEvent,
    ) -> DispatchOutcome {
        let mut host = HostServices {
            content,
            tweener: &mut self.tweener,
            placements: &mut *placements,
        };
        let outcome = dispatch_pointer(&mut self.tree, &mut self.input, &mut host, self.root, event);
        if event.kind == PointerEventKind::RightPressed {
            if let Some(menu) = outcome
                .target
                .and_then(|key| self.tree.state(key))
                .and_then(|state| state.context_menu())
            {
                self.open_context_menu_at(menu, event.position);
            }
        }
        let mut host = HostServices {
            content,
            tweener: &mut self.tweener,
            placements,
        };
        apply_focus_request(&mut self.tree, &mut self.input, &mut host);
        self.pump_events();
        outcome
    }

    /// Dispatch a key event from the input host to the focused control
    pub fn handle_key(
        &mut self,
        content: &dyn ContentProvider,
        placements: &mut dyn PlacementStore,
        event: &KeyEvent,
    ) -> bool {
        let mut host = HostServices {
            content,
            tweener: &mut self.tweener,
            placements,
        };
        let handled = dispatch_key(&mut self.tree, &mut self.input, &mut host, event);
        apply_focus_request(&mut self.tree, &mut self.input, &mut host);
        self.pump_events();
        handled
    }

    /// Paint the frame and submit it to the backend
    pub fn paint(
        &mut self,
        content: &dyn ContentProvider,
        backend: &mut dyn RenderBackend,
    ) -> Result<(), RenderError> {
        self.draw_list.clear();
        self.tree.paint(self.root, content, &mut self.draw_list);
        let size = self
            .tree
            .state(self.root)
            .map_or_else(Vec2::zeros, |s| s.size());
        backend.begin_overlay_pass(size)?;
        backend.draw_overlay(&self.draw_list)?;
        backend.end_overlay_pass()
    }

    fn open_context_menu_at(&mut self, menu: ControlKey, position: Vec2) {
        if let Some(open) = self.open_context_menu.take() {
            self.tree.set_visible(open, false);
        }
        let clamped = self.clamp_to_screen(menu, position);
        self.tree.set_location(menu, clamped);
        self.tree.set_visible(menu, true);
        self.tree.invalidate(menu);
        self.open_context_menu = Some(menu);
        log::debug!("context menu opened at {clamped:?}");
    }

    fn clamp_to_screen(&self, key: ControlKey, position: Vec2) -> Vec2 {
        let size = self.tree.state(key).map_or_else(Vec2::zeros, |s| s.size());
        let screen = self
            .tree
            .state(self.root)
            .map_or_else(Vec2::zeros, |s| s.size());
        Vec2::new(
            position.x.min(screen.x - size.x).max(0.0),
            position.y.min(screen.y - size.y).max(0.0),
        )
    }

    /// Drain tree notifications, apply global interaction rules, and forward
    /// everything to registered handlers
    fn pump_events(&mut self) {
        let mut pending = self.tree.drain_events();
        if pending.is_empty() {
            return;
        }
        for event in &pending {
            match event {
                UiEvent::ActiveChanged { current, .. } => {
                    self.on_active_changed(*current);
                }
                UiEvent::MenuItemSelected { menu, .. } => {
                    // Selecting an item closes the menu it came from
                    if self.open_context_menu == Some(*menu) {
                        self.open_context_menu = None;
                    }
                    if self.tree.contains(*menu) {
                        self.tree.set_visible(*menu, false);
                    }
                }
                UiEvent::Disposed { control } => {
                    if self.visible_tooltip == Some(*control) {
                        self.visible_tooltip = None;
                    }
                    if self.open_context_menu == Some(*control) {
                        self.open_context_menu = None;
                    }
                }
                _ => {}
            }
        }
        // Side effects above may have produced follow-up notifications
        pending.extend(self.tree.drain_events());
        self.events.send_all(pending);
        self.frame_events.extend(self.events.dispatch());
    }

    /// Active-control change: tooltips hide, stale context menus dismiss
    fn on_active_changed(&mut self, current: Option<ControlKey>) {
        if let Some(tooltip) = self.visible_tooltip.take() {
            if self.tree.contains(tooltip) {
                self.tree.set_visible(tooltip, false);
            }
        }
        if let Some(tooltip) = current
            .and_then(|key| self.tree.state(key))
            .and_then(|state| state.tooltip())
        {
            let at = self.input.mouse_position() + TOOLTIP_OFFSET;
            let clamped = self.clamp_to_screen(tooltip, at);
            self.tree.set_location(tooltip, clamped);
            self.tree.set_visible(tooltip, true);
            self.tree.invalidate(tooltip);
            self.visible_tooltip = Some(tooltip);
        }
        if let Some(menu) = self.open_context_menu {
            let over_menu =
                current.is_some_and(|key| key == menu || self.tree.is_ancestor(menu, key));
            if !over_menu {
                if self.tree.contains(menu) {
                    self.tree.set_visible(menu, false);
                }
                self.open_context_menu = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::NullContent;
    use crate::config::MemoryPlacementStore;
    use crate::ui::capture::CaptureType;
    use crate::ui::rendering::backend::RecordingBackend;

    fn pointer(kind: PointerEventKind, x: f32, y: f32, time: f64) -> PointerEvent {
        PointerEvent::new(kind, Vec2::new(x, y), time)
    }

    struct Fixture {
        screen: Screen,
        content: NullContent,
        placements: MemoryPlacementStore,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                screen: Screen::new(Vec2::new(800.0, 600.0)),
                content: NullContent,
                placements: MemoryPlacementStore::default(),
            }
        }

        fn moved(&mut self, x: f32, y: f32) -> DispatchOutcome {
            self.screen.handle_pointer(
                &self.content,
                &mut self.placements,
                &pointer(PointerEventKind::Moved, x, y, 0.0),
            )
        }

        fn update(&mut self) -> Vec<UiEvent> {
            self.screen
                .update(&self.content, &mut self.placements, 1.0 / 60.0)
        }
    }

    fn hoverable(screen: &mut Screen) -> ControlKey {
        let key = screen.tree_mut().add_plain();
        screen.tree_mut().set_capture(key, CaptureType::MOUSE);
        screen.tree_mut().set_size(key, Vec2::new(100.0, 100.0));
        let root = screen.root();
        screen.tree_mut().try_set_parent(key, Some(root)).unwrap();
        key
    }

    #[test]
    fn test_tooltip_follows_active_control() {
        let mut fx = Fixture::new();
        let owner = hoverable(&mut fx.screen);

        let tip = fx.screen.tree_mut().add_plain();
        fx.screen.attach_tooltip(owner, tip);
        fx.update();

        fx.moved(10.0, 10.0);
        assert!(fx.screen.tree().state(tip).unwrap().visible());
        // Positioned near the pointer
        let location = fx.screen.tree().state(tip).unwrap().location();
        assert_eq!(location, Vec2::new(22.0, 28.0));

        fx.moved(700.0, 500.0);
        assert!(!fx.screen.tree().state(tip).unwrap().visible());
    }

    #[test]
    fn test_context_menu_opens_and_dismisses() {
        let mut fx = Fixture::new();
        let owner = hoverable(&mut fx.screen);

        let menu = fx.screen.tree_mut().add_plain_container();
        fx.screen
            .tree_mut()
            .set_size(menu, Vec2::new(120.0, 60.0));
        fx.screen.attach_context_menu(owner, menu);
        fx.update();

        fx.moved(20.0, 20.0);
        fx.screen.handle_pointer(
            &fx.content,
            &mut fx.placements,
            &pointer(PointerEventKind::RightPressed, 20.0, 20.0, 0.0),
        );
        assert!(fx.screen.tree().state(menu).unwrap().visible());

        // Mousing far away changes the active control and dismisses the menu
        fx.moved(700.0, 500.0);
        assert!(!fx.screen.tree().state(menu).unwrap().visible());
    }

    #[test]
    fn test_update_reports_frame_events() {
        let mut fx = Fixture::new();
        let key = hoverable(&mut fx.screen);
        fx.update();

        fx.moved(10.0, 10.0);
        let events = fx.update();
        assert!(events
            .iter()
            .any(|e| matches!(e, UiEvent::MouseEntered { control } if *control == key)));
    }

    #[test]
    fn test_paint_submits_to_backend() {
        let mut fx = Fixture::new();
        hoverable(&mut fx.screen);
        fx.update();

        let mut backend = RecordingBackend::new();
        fx.screen.paint(&fx.content, &mut backend).unwrap();
        assert_eq!(backend.overlay_passes, 1);
        assert_eq!(backend.screen_size, Vec2::new(800.0, 600.0));
    }
}
