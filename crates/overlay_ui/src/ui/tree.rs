//! The retained control tree
//!
//! Controls live in a slotmap arena addressed by stable [`ControlKey`]s.
//! Containers own their `children` vectors; a control's `parent` is a weak
//! back-key, so disposal never chases cyclic references. Absolute positions
//! and opacity are derived per read by walking the parent chain - they are
//! never cached.

use slotmap::SlotMap;

use crate::events::{Property, UiEvent};
use crate::foundation::geometry::{Rect, Thickness};
use crate::foundation::math::{saturate, Vec2};
use crate::ui::capture::CaptureType;
use crate::ui::container::ContainerState;
use crate::ui::control::{
    AnyWidget, ControlState, HostServices, LayoutState, PlainWidget, Widget, WidgetCtx,
};
use crate::ui::input::context::InputContext;

slotmap::new_key_type! {
    /// Stable handle to a control in a [`UiTree`]
    pub struct ControlKey;
}

/// Errors raised by structural tree mutation
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum TreeError {
    /// The referenced control no longer exists
    #[error("control no longer exists")]
    Missing,

    /// The prospective parent cannot hold children
    #[error("control is not a container")]
    NotAContainer,

    /// The receiving container vetoed the attach
    #[error("container rejected the child")]
    ChildRejected,

    /// The current container vetoed the detach
    #[error("container refused to release the child")]
    RemovalRejected,

    /// Attaching would make a control its own ancestor
    #[error("reparenting would create a cycle")]
    Cycle,
}

pub(crate) struct ControlNode {
    pub(crate) state: ControlState,
    pub(crate) container: Option<ContainerState>,
    /// `None` while the widget is detached for a callback
    pub(crate) widget: Option<Box<dyn AnyWidget>>,
}

impl ControlNode {
    /// Content region in local space: explicit if assigned, else full bounds
    pub(crate) fn resolved_content_region(&self) -> Rect {
        match self.container.as_ref().and_then(|c| c.content_region) {
            Some(region) => region,
            None => Rect::from_pos_size(Vec2::zeros(), self.state.size),
        }
    }

    pub(crate) fn scroll_offset(&self) -> Vec2 {
        self.container
            .as_ref()
            .map_or_else(Vec2::zeros, |c| Vec2::new(c.horizontal_scroll, c.vertical_scroll))
    }
}

/// Arena of controls plus the pending notification buffer
#[derive(Default)]
pub struct UiTree {
    pub(crate) nodes: SlotMap<ControlKey, ControlNode>,
    pub(crate) pending: Vec<UiEvent>,
}

impl UiTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a leaf control with the given widget behavior
    pub fn add<W: Widget>(&mut self, widget: W) -> ControlKey {
        self.insert_node(widget, None)
    }

    /// Add a container control with the given widget behavior
    pub fn add_container<W: Widget>(&mut self, widget: W) -> ControlKey {
        self.insert_node(widget, Some(ContainerState::default()))
    }

    /// Add a behaviorless leaf control
    pub fn add_plain(&mut self) -> ControlKey {
        self.add(PlainWidget)
    }

    /// Add a behaviorless container control
    pub fn add_plain_container(&mut self) -> ControlKey {
        self.add_container(PlainWidget)
    }

    fn insert_node<W: Widget>(&mut self, widget: W, container: Option<ContainerState>) -> ControlKey {
        let mut state = ControlState::default();
        widget.configure(&mut state);
        self.nodes.insert(ControlNode {
            state,
            container,
            widget: Some(Box::new(widget)),
        })
    }

    /// Whether the key still refers to a live control
    pub fn contains(&self, key: ControlKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Number of live controls
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no controls
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Read a control's state
    pub fn state(&self, key: ControlKey) -> Option<&ControlState> {
        self.nodes.get(key).map(|n| &n.state)
    }

    /// Whether the control is a container
    pub fn is_container(&self, key: ControlKey) -> bool {
        self.nodes.get(key).is_some_and(|n| n.container.is_some())
    }

    /// Owning parent of a control
    pub fn parent(&self, key: ControlKey) -> Option<ControlKey> {
        self.nodes.get(key).and_then(|n| n.state.parent)
    }

    /// Children of a container in insertion order (empty for leaves)
    pub fn children(&self, key: ControlKey) -> &[ControlKey] {
        self.nodes
            .get(key)
            .and_then(|n| n.container.as_ref())
            .map_or(&[], |c| c.children.as_slice())
    }

    /// Downcast a control's widget to its concrete type
    pub fn widget<W: Widget>(&self, key: ControlKey) -> Option<&W> {
        self.nodes
            .get(key)?
            .widget
            .as_ref()?
            .as_any()
            .downcast_ref::<W>()
    }

    /// Mutably downcast a control's widget to its concrete type
    ///
    /// Direct widget mutation bypasses change notification; widget authors
    /// expose associated setter functions that re-invalidate where needed.
    pub fn widget_mut<W: Widget>(&mut self, key: ControlKey) -> Option<&mut W> {
        self.nodes
            .get_mut(key)?
            .widget
            .as_mut()?
            .as_any_mut()
            .downcast_mut::<W>()
    }

    /// Queue a notification for the next event pump
    pub fn emit(&mut self, event: UiEvent) {
        self.pending.push(event);
    }

    /// Take all queued notifications
    pub fn drain_events(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.pending)
    }

    // ---- structural mutation ----------------------------------------------

    /// Attach a control to a new parent (or detach with `None`)
    ///
    /// The two-phase cancellable mutation of the original design is expressed
    /// as a synchronous `Result`: either veto point may reject, in which case
    /// nothing has been mutated. On success the control is absent from the old
    /// parent and present in the new one exactly once, with one `ChildRemoved`
    /// and one `ChildAdded` notification in that order.
    pub fn try_set_parent(
        &mut self,
        child: ControlKey,
        new_parent: Option<ControlKey>,
    ) -> Result<(), TreeError> {
        if !self.nodes.contains_key(child) {
            return Err(TreeError::Missing);
        }
        let old_parent = self.nodes[child].state.parent;
        if old_parent == new_parent {
            // Idempotent: re-attaching to the current parent is a no-op
            return Ok(());
        }

        if let Some(parent) = new_parent {
            if !self.nodes.contains_key(parent) {
                return Err(TreeError::Missing);
            }
            if parent == child || self.is_ancestor(child, parent) {
                return Err(TreeError::Cycle);
            }
            if self.nodes[parent].container.is_none() {
                return Err(TreeError::NotAContainer);
            }
            if !self.child_accepted(parent, child) {
                return Err(TreeError::ChildRejected);
            }
        }
        if let Some(parent) = old_parent {
            if !self.child_released(parent, child) {
                return Err(TreeError::RemovalRejected);
            }
        }

        if let Some(parent) = old_parent {
            self.detach_from_parent(parent, child);
        }
        self.nodes[child].state.parent = new_parent;
        if let Some(parent) = new_parent {
            if let Some(container) = self.nodes[parent].container.as_mut() {
                container.children.push(child);
            }
            self.pending.push(UiEvent::ChildAdded { parent, child });
            self.invalidate(parent);
            self.invalidate(child);
        }
        Ok(())
    }

    /// Topmost ancestor of a control (the screen root for attached controls)
    pub fn root_of(&self, key: ControlKey) -> ControlKey {
        let mut current = key;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// Whether `ancestor` appears on `key`'s parent chain
    pub fn is_ancestor(&self, ancestor: ControlKey, key: ControlKey) -> bool {
        let mut current = self.parent(key);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    fn child_accepted(&self, parent: ControlKey, child: ControlKey) -> bool {
        // A detached widget (mid-callback) cannot veto
        self.nodes[parent]
            .widget
            .as_deref()
            .map_or(true, |w| w.accepts_child(self, parent, child))
    }

    fn child_released(&self, parent: ControlKey, child: ControlKey) -> bool {
        self.nodes[parent]
            .widget
            .as_deref()
            .map_or(true, |w| w.releases_child(self, parent, child))
    }

    fn detach_from_parent(&mut self, parent: ControlKey, child: ControlKey) {
        if let Some(container) = self
            .nodes
            .get_mut(parent)
            .and_then(|n| n.container.as_mut())
        {
            container.children.retain(|k| *k != child);
        }
        self.pending.push(UiEvent::ChildRemoved { parent, child });
        self.invalidate(parent);
    }

    /// Dispose a control and every descendant
    ///
    /// Disposal is the hard cancellation point: the subtree is detached from
    /// its parent unconditionally (no veto), each descendant's widget gets its
    /// disposal hook and a `Disposed` notification exactly once, and the keys
    /// go stale. Attached tooltips and context menus are disposed along with
    /// their owners.
    pub fn dispose(&mut self, key: ControlKey) {
        if !self.nodes.contains_key(key) {
            log::warn!("dispose called with stale control key");
            return;
        }
        if let Some(parent) = self.nodes[key].state.parent {
            self.detach_from_parent(parent, key);
            self.nodes[key].state.parent = None;
        }

        // Breadth-first subtree collection
        let mut order = vec![key];
        let mut index = 0;
        while index < order.len() {
            order.extend_from_slice(self.children(order[index]));
            index += 1;
        }

        let mut attachments = Vec::new();
        for &node in &order {
            if let Some(state) = self.state(node) {
                attachments.extend(state.tooltip);
                attachments.extend(state.context_menu);
            }
            if let Some(mut widget) = self.nodes.get_mut(node).and_then(|n| n.widget.take()) {
                widget.on_disposed(self, node);
            }
            self.pending.push(UiEvent::Disposed { control: node });
        }
        for node in order {
            self.nodes.remove(node);
        }
        for attachment in attachments {
            if self.nodes.contains_key(attachment) {
                self.dispose(attachment);
            }
        }
    }

    // ---- derived reads ----------------------------------------------------

    /// Absolute (screen-space) origin of a control
    ///
    /// Derived per read from the ancestor chain: each ancestor contributes its
    /// own location, its content-region origin, and its scroll offset. Nothing
    /// along this path is cached, so the value can never go stale.
    pub fn absolute_origin(&self, key: ControlKey) -> Vec2 {
        let Some(node) = self.nodes.get(key) else {
            log::warn!("absolute_origin read through stale control key");
            return Vec2::zeros();
        };
        let mut origin = node.state.location;
        let mut current = node.state.parent;
        while let Some(parent) = current {
            let parent_node = &self.nodes[parent];
            origin += parent_node.state.location
                + parent_node.resolved_content_region().position()
                - parent_node.scroll_offset();
            current = parent_node.state.parent;
        }
        origin
    }

    /// Absolute (screen-space) bounds of a control
    pub fn absolute_bounds(&self, key: ControlKey) -> Rect {
        let size = self.state(key).map_or_else(Vec2::zeros, ControlState::size);
        Rect::from_pos_size(self.absolute_origin(key), size)
    }

    /// Effective opacity: the product of the control's own opacity and every
    /// ancestor's, clamped to [0, 1]
    pub fn absolute_opacity(&self, key: ControlKey) -> f32 {
        let mut opacity = 1.0;
        let mut current = Some(key);
        while let Some(node) = current.and_then(|k| self.nodes.get(k)) {
            opacity *= node.state.opacity;
            current = node.state.parent;
        }
        saturate(opacity)
    }

    /// Whether the control and all of its ancestors are visible
    pub fn effectively_visible(&self, key: ControlKey) -> bool {
        let mut current = Some(key);
        while let Some(k) = current {
            match self.nodes.get(k) {
                Some(node) if node.state.visible => current = node.state.parent,
                _ => return false,
            }
        }
        true
    }

    /// Children sorted for painting: ascending z-index, insertion order among
    /// ties (later additions paint on top)
    pub fn children_paint_order(&self, key: ControlKey) -> Vec<ControlKey> {
        let mut children = self.children(key).to_vec();
        children.sort_by_key(|&k| self.state(k).map_or(0, ControlState::z_index));
        children
    }

    /// Children sorted for hit testing: descending z-index, later-added first
    /// among ties (the visually topmost control wins)
    pub fn children_hit_order(&self, key: ControlKey) -> Vec<ControlKey> {
        let mut children = self.children_paint_order(key);
        children.reverse();
        children
    }

    // ---- property setters -------------------------------------------------

    /// Set the location within the parent's content region
    pub fn set_location(&mut self, key: ControlKey, location: Vec2) {
        self.set_with(key, Property::Location, false, |s| {
            if s.location == location {
                return false;
            }
            s.location = location;
            true
        });
    }

    /// Set width and height; negative components clamp to zero
    pub fn set_size(&mut self, key: ControlKey, size: Vec2) {
        let size = Vec2::new(size.x.max(0.0), size.y.max(0.0));
        self.set_with(key, Property::Size, true, |s| {
            if s.size == size {
                return false;
            }
            s.size = size;
            true
        });
    }

    /// Set width only
    pub fn set_width(&mut self, key: ControlKey, width: f32) {
        let Some(size) = self.state(key).map(ControlState::size) else {
            return;
        };
        self.set_size(key, Vec2::new(width, size.y));
    }

    /// Set height only
    pub fn set_height(&mut self, key: ControlKey, height: f32) {
        let Some(size) = self.state(key).map(ControlState::size) else {
            return;
        };
        self.set_size(key, Vec2::new(size.x, height));
    }

    /// Set the stacking order
    pub fn set_z_index(&mut self, key: ControlKey, z_index: i32) {
        self.set_with(key, Property::ZIndex, false, |s| {
            if s.z_index == z_index {
                return false;
            }
            s.z_index = z_index;
            true
        });
    }

    /// Show or hide the control
    pub fn set_visible(&mut self, key: ControlKey, visible: bool) {
        self.set_with(key, Property::Visible, false, |s| {
            if s.visible == visible {
                return false;
            }
            s.visible = visible;
            if !visible {
                s.mouse_over = false;
            }
            true
        });
    }

    /// Enable or disable the control
    pub fn set_enabled(&mut self, key: ControlKey, enabled: bool) {
        self.set_with(key, Property::Enabled, false, |s| {
            if s.enabled == enabled {
                return false;
            }
            s.enabled = enabled;
            true
        });
    }

    /// Set the opacity factor, clamped to [0, 1]
    pub fn set_opacity(&mut self, key: ControlKey, opacity: f32) {
        let opacity = saturate(opacity);
        self.set_with(key, Property::Opacity, false, |s| {
            if (s.opacity - opacity).abs() < f32::EPSILON {
                return false;
            }
            s.opacity = opacity;
            true
        });
    }

    /// Set the padding thickness
    pub fn set_padding(&mut self, key: ControlKey, padding: Thickness) {
        self.set_with(key, Property::Padding, true, |s| {
            if s.padding == padding {
                return false;
            }
            s.padding = padding;
            true
        });
    }

    /// Opt the control in or out of container clip culling
    pub fn set_clips_bounds(&mut self, key: ControlKey, clips: bool) {
        self.set_with(key, Property::ClipsBounds, false, |s| {
            if s.clips_bounds == clips {
                return false;
            }
            s.clips_bounds = clips;
            true
        });
    }

    /// Declare the input capture mask
    pub fn set_capture(&mut self, key: ControlKey, capture: CaptureType) {
        self.set_with(key, Property::Capture, false, |s| {
            if s.capture == capture {
                return false;
            }
            s.capture = capture;
            true
        });
    }

    /// Attach (or clear) a tooltip control shown while this control is active
    pub fn set_tooltip(&mut self, key: ControlKey, tooltip: Option<ControlKey>) {
        if let Some(node) = self.nodes.get_mut(key) {
            node.state.tooltip = tooltip;
        }
    }

    /// Attach (or clear) a context menu opened on right-click
    pub fn set_context_menu(&mut self, key: ControlKey, menu: Option<ControlKey>) {
        if let Some(node) = self.nodes.get_mut(key) {
            node.state.context_menu = menu;
        }
    }

    /// Shared property-setter plumbing
    ///
    /// The `invalidate_layout` flag is part of each setter's contract: every
    /// geometry-affecting property passes true so widget authors cannot forget
    /// to invalidate. Same-value writes short-circuit before any side effect.
    fn set_with(
        &mut self,
        key: ControlKey,
        property: Property,
        invalidate_layout: bool,
        mutate: impl FnOnce(&mut ControlState) -> bool,
    ) {
        let Some(node) = self.nodes.get_mut(key) else {
            log::warn!("property write through stale control key");
            return;
        };
        if !mutate(&mut node.state) {
            return;
        }
        self.pending.push(UiEvent::PropertyChanged { control: key, property });
        if invalidate_layout {
            self.invalidate(key);
        }
    }

    // ---- frame pump -------------------------------------------------------

    /// Per-frame update of the subtree rooted at `root`
    ///
    /// Applies AutoSize/Fill sizing (every tick, per the sizing contract),
    /// runs widget update hooks, and settles any invalidation that was
    /// deferred by a suspended layout.
    pub fn update(
        &mut self,
        root: ControlKey,
        input: &mut InputContext,
        host: &mut HostServices<'_>,
        dt: f32,
    ) {
        let mut worklist = vec![root];
        let mut index = 0;
        while index < worklist.len() {
            let key = worklist[index];
            index += 1;
            if !self.nodes.contains_key(key) {
                continue;
            }
            crate::ui::container::apply_sizing(self, key);
            self.with_widget(key, input, host, |w, ctx, _| w.update(ctx, dt));
            if self
                .state(key)
                .is_some_and(|s| s.layout_state == LayoutState::Invalidated)
            {
                self.try_recalculate(key);
            }
            worklist.extend_from_slice(self.children(key));
        }
    }

    /// Run a callback against a control's widget
    ///
    /// The widget is detached from the node for the duration so the callback
    /// may borrow the tree mutably; it is re-attached afterwards unless the
    /// widget disposed its own control.
    pub(crate) fn with_widget<R>(
        &mut self,
        key: ControlKey,
        input: &mut InputContext,
        host: &mut HostServices<'_>,
        f: impl FnOnce(&mut dyn AnyWidget, &mut WidgetCtx<'_, '_>, ControlKey) -> R,
    ) -> Option<R> {
        let mut widget = self.nodes.get_mut(key)?.widget.take()?;
        let result = {
            let mut ctx = WidgetCtx {
                tree: self,
                key,
                input,
                host,
            };
            f(widget.as_mut(), &mut ctx, key)
        };
        if let Some(node) = self.nodes.get_mut(key) {
            node.widget = Some(widget);
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::UiEventKind;

    #[test]
    fn test_default_control_size() {
        let mut tree = UiTree::new();
        let key = tree.add_plain();
        assert_eq!(tree.state(key).unwrap().size(), Vec2::new(40.0, 20.0));
    }

    #[test]
    fn test_parent_child_round_trip() {
        let mut tree = UiTree::new();
        let container_a = tree.add_plain_container();
        let container_b = tree.add_plain_container();
        let child = tree.add_plain();

        tree.try_set_parent(child, Some(container_a)).unwrap();
        tree.drain_events();
        tree.try_set_parent(child, Some(container_b)).unwrap();

        assert!(!tree.children(container_a).contains(&child));
        assert_eq!(tree.children(container_b), &[child]);
        assert_eq!(tree.parent(child), Some(container_b));

        let events: Vec<_> = tree
            .drain_events()
            .into_iter()
            .filter(|e| {
                matches!(
                    e.kind(),
                    UiEventKind::ChildRemoved | UiEventKind::ChildAdded
                )
            })
            .collect();
        assert_eq!(events.len(), 2);
        assert!(
            matches!(events[0], UiEvent::ChildRemoved { parent, child: c } if parent == container_a && c == child)
        );
        assert!(
            matches!(events[1], UiEvent::ChildAdded { parent, child: c } if parent == container_b && c == child)
        );
    }

    #[test]
    fn test_reattach_to_same_parent_is_noop() {
        let mut tree = UiTree::new();
        let container = tree.add_plain_container();
        let child = tree.add_plain();

        tree.try_set_parent(child, Some(container)).unwrap();
        tree.drain_events();
        tree.try_set_parent(child, Some(container)).unwrap();

        assert_eq!(tree.children(container), &[child]);
        assert!(tree.drain_events().is_empty());
    }

    #[test]
    fn test_parent_must_be_container() {
        let mut tree = UiTree::new();
        let leaf = tree.add_plain();
        let child = tree.add_plain();
        assert_eq!(
            tree.try_set_parent(child, Some(leaf)),
            Err(TreeError::NotAContainer)
        );
        assert_eq!(tree.parent(child), None);
    }

    #[test]
    fn test_reparent_cycle_rejected() {
        let mut tree = UiTree::new();
        let outer = tree.add_plain_container();
        let inner = tree.add_plain_container();
        tree.try_set_parent(inner, Some(outer)).unwrap();

        assert_eq!(tree.try_set_parent(outer, Some(inner)), Err(TreeError::Cycle));
        assert_eq!(tree.try_set_parent(outer, Some(outer)), Err(TreeError::Cycle));
    }

    struct ChildlessContainer;

    impl Widget for ChildlessContainer {
        fn accepts_child(&self, _tree: &UiTree, _parent: ControlKey, _child: ControlKey) -> bool {
            false
        }
    }

    #[test]
    fn test_rejected_attach_leaves_no_trace() {
        let mut tree = UiTree::new();
        let container = tree.add_container(ChildlessContainer);
        let child = tree.add_plain();

        assert_eq!(
            tree.try_set_parent(child, Some(container)),
            Err(TreeError::ChildRejected)
        );
        assert_eq!(tree.parent(child), None);
        assert!(tree.children(container).is_empty());
        assert!(tree.drain_events().is_empty());
    }

    struct PossessiveContainer;

    impl Widget for PossessiveContainer {
        fn releases_child(&self, _tree: &UiTree, _parent: ControlKey, _child: ControlKey) -> bool {
            false
        }
    }

    #[test]
    fn test_rejected_removal_keeps_parent_reference() {
        let mut tree = UiTree::new();
        let container = tree.add_container(PossessiveContainer);
        let child = tree.add_plain();
        tree.try_set_parent(child, Some(container)).unwrap();

        assert_eq!(
            tree.try_set_parent(child, None),
            Err(TreeError::RemovalRejected)
        );
        // Unlike the historical defect, rejection leaves the relationship intact
        assert_eq!(tree.parent(child), Some(container));
        assert_eq!(tree.children(container), &[child]);
    }

    #[test]
    fn test_absolute_origin_composes_ancestors() {
        let mut tree = UiTree::new();
        let outer = tree.add_plain_container();
        tree.set_location(outer, Vec2::new(100.0, 50.0));
        tree.set_size(outer, Vec2::new(400.0, 300.0));

        let inner = tree.add_plain_container();
        tree.set_location(inner, Vec2::new(20.0, 10.0));
        tree.set_size(inner, Vec2::new(200.0, 200.0));
        tree.try_set_parent(inner, Some(outer)).unwrap();

        let leaf = tree.add_plain();
        tree.set_location(leaf, Vec2::new(5.0, 5.0));
        tree.set_size(leaf, Vec2::new(40.0, 400.0));
        tree.try_set_parent(leaf, Some(inner)).unwrap();

        assert_eq!(tree.absolute_origin(leaf), Vec2::new(125.0, 65.0));

        // Scrolling the inner container shifts the leaf, not the inner itself
        tree.set_vertical_scroll(inner, 4.0);
        assert_eq!(tree.absolute_origin(leaf), Vec2::new(125.0, 61.0));
        assert_eq!(tree.absolute_origin(inner), Vec2::new(120.0, 60.0));
    }

    #[test]
    fn test_absolute_origin_honors_content_region() {
        let mut tree = UiTree::new();
        let container = tree.add_plain_container();
        tree.set_size(container, Vec2::new(200.0, 100.0));
        tree.set_content_region(container, Rect::new(8.0, 24.0, 184.0, 68.0));

        let child = tree.add_plain();
        tree.set_location(child, Vec2::new(2.0, 3.0));
        tree.try_set_parent(child, Some(container)).unwrap();

        assert_eq!(tree.absolute_origin(child), Vec2::new(10.0, 27.0));
    }

    #[test]
    fn test_opacity_inheritance() {
        use approx::assert_relative_eq;

        let mut tree = UiTree::new();
        let a = tree.add_plain_container();
        let b = tree.add_plain_container();
        let c = tree.add_plain();
        tree.try_set_parent(b, Some(a)).unwrap();
        tree.try_set_parent(c, Some(b)).unwrap();

        tree.set_opacity(a, 0.5);
        assert_relative_eq!(tree.absolute_opacity(c), 0.5);

        tree.set_opacity(b, 0.5);
        tree.set_opacity(c, 1.0);
        assert_relative_eq!(tree.absolute_opacity(c), 0.25);
    }

    #[test]
    fn test_same_value_writes_are_silent() {
        let mut tree = UiTree::new();
        let key = tree.add_plain();
        tree.drain_events();

        tree.set_size(key, Vec2::new(40.0, 20.0));
        tree.set_visible(key, true);
        tree.set_opacity(key, 1.0);

        assert!(tree.drain_events().is_empty());
    }

    #[test]
    fn test_size_clamps_negative() {
        let mut tree = UiTree::new();
        let key = tree.add_plain();
        tree.set_size(key, Vec2::new(-10.0, 15.0));
        assert_eq!(tree.state(key).unwrap().size(), Vec2::new(0.0, 15.0));
    }

    #[test]
    fn test_hit_order_breaks_z_ties_by_insertion() {
        let mut tree = UiTree::new();
        let container = tree.add_plain_container();
        let first = tree.add_plain();
        let second = tree.add_plain();
        let third = tree.add_plain();
        for (key, z) in [(first, 5), (second, 5), (third, 3)] {
            tree.set_z_index(key, z);
            tree.try_set_parent(key, Some(container)).unwrap();
        }

        assert_eq!(tree.children_hit_order(container), vec![second, first, third]);
        assert_eq!(tree.children_paint_order(container), vec![third, first, second]);
    }

    #[test]
    fn test_disposal_cascade() {
        let mut tree = UiTree::new();
        let root = tree.add_plain_container();
        let mid = tree.add_plain_container();
        let inner = tree.add_plain_container();
        let leaf_a = tree.add_plain();
        let leaf_b = tree.add_plain();
        tree.try_set_parent(mid, Some(root)).unwrap();
        tree.try_set_parent(inner, Some(mid)).unwrap();
        tree.try_set_parent(leaf_a, Some(inner)).unwrap();
        tree.try_set_parent(leaf_b, Some(mid)).unwrap();
        tree.drain_events();

        tree.dispose(root);

        let disposed: Vec<_> = tree
            .drain_events()
            .into_iter()
            .filter(|e| e.kind() == UiEventKind::Disposed)
            .collect();
        assert_eq!(disposed.len(), 5);
        assert!(tree.is_empty());
        for key in [root, mid, inner, leaf_a, leaf_b] {
            assert!(!tree.contains(key));
        }
    }

    #[test]
    fn test_dispose_detaches_from_parent() {
        let mut tree = UiTree::new();
        let container = tree.add_plain_container();
        let child = tree.add_plain();
        tree.try_set_parent(child, Some(container)).unwrap();

        tree.dispose(child);

        assert!(tree.children(container).is_empty());
        assert!(tree.contains(container));
        assert!(!tree.contains(child));
    }
}
