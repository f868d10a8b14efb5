//! Control base state and the widget behavior trait
//!
//! A control is one node in the UI tree. Its tree-facing state (geometry,
//! visibility, capture declaration, layout bookkeeping) lives in
//! [`ControlState`] inside the arena; its behavior (painting, input
//! reactions, layout of children) lives in a [`Widget`] implementation
//! attached to the node. Capabilities are opted into by overriding the
//! corresponding trait hook; everything defaults to a no-op.

use std::any::Any;

use crate::animation::Tweener;
use crate::assets::ContentProvider;
use crate::config::PlacementStore;
use crate::foundation::geometry::{Rect, Thickness};
use crate::foundation::math::Vec2;
use crate::ui::capture::CaptureType;
use crate::ui::input::context::InputContext;
use crate::ui::input::{KeyEvent, PointerEvent};
use crate::ui::rendering::commands::DrawList;
use crate::ui::rendering::context::PaintView;
use crate::ui::tree::{ControlKey, UiTree};

/// Default size of a freshly constructed control
pub const DEFAULT_CONTROL_SIZE: Vec2 = Vec2::new(40.0, 20.0);

/// Layout bookkeeping state of a control
///
/// Drives whether a draw call paints or is skipped and whether a layout
/// recompute is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutState {
    /// Never laid out; drawing is skipped entirely
    SkipDraw,
    /// Layout is stale; a recompute runs before the next paint
    Invalidated,
    /// Layout is current
    Ready,
}

/// Tree-facing state shared by every control
///
/// Mutation goes through the typed setters on [`UiTree`] so that change
/// notification and layout invalidation cannot be forgotten by widget
/// authors; this struct only exposes reads.
#[derive(Debug)]
pub struct ControlState {
    pub(crate) parent: Option<ControlKey>,
    pub(crate) location: Vec2,
    pub(crate) size: Vec2,
    pub(crate) z_index: i32,
    pub(crate) visible: bool,
    pub(crate) enabled: bool,
    pub(crate) opacity: f32,
    pub(crate) padding: Thickness,
    pub(crate) clips_bounds: bool,
    pub(crate) capture: CaptureType,
    pub(crate) layout_state: LayoutState,
    pub(crate) suspend_count: u32,
    pub(crate) recalc_depth: u32,
    pub(crate) mouse_over: bool,
    pub(crate) tooltip: Option<ControlKey>,
    pub(crate) context_menu: Option<ControlKey>,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            parent: None,
            location: Vec2::zeros(),
            size: DEFAULT_CONTROL_SIZE,
            z_index: 0,
            visible: true,
            enabled: true,
            opacity: 1.0,
            padding: Thickness::ZERO,
            clips_bounds: true,
            capture: CaptureType::NONE,
            layout_state: LayoutState::SkipDraw,
            suspend_count: 0,
            recalc_depth: 0,
            mouse_over: false,
            tooltip: None,
            context_menu: None,
        }
    }
}

impl ControlState {
    /// Owning parent container, if attached
    pub fn parent(&self) -> Option<ControlKey> {
        self.parent
    }

    /// Location within the parent's content region
    pub fn location(&self) -> Vec2 {
        self.location
    }

    /// Width and height
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Local bounds: location + size in the parent's content space
    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.location, self.size)
    }

    /// Stacking order; higher paints and hit-tests on top
    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    /// Visibility flag
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Enabled flag; disabled controls keep painting but widgets ignore input
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Own opacity factor in [0, 1]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Padding thickness
    pub fn padding(&self) -> Thickness {
        self.padding
    }

    /// Whether the control is culled when outside its container's clip region
    pub fn clips_bounds(&self) -> bool {
        self.clips_bounds
    }

    /// Declared input capture mask
    pub fn capture(&self) -> CaptureType {
        self.capture
    }

    /// Current layout bookkeeping state
    pub fn layout_state(&self) -> LayoutState {
        self.layout_state
    }

    /// Whether the pointer currently rests on this control
    pub fn mouse_over(&self) -> bool {
        self.mouse_over
    }

    /// Attached tooltip control, if any
    pub fn tooltip(&self) -> Option<ControlKey> {
        self.tooltip
    }

    /// Attached context menu control, if any
    pub fn context_menu(&self) -> Option<ControlKey> {
        self.context_menu
    }
}

/// Host services reachable from widget callbacks
///
/// These are the toolkit's in-process collaborators: content lookup, the
/// tween scheduler, and the placement settings store. The input context
/// travels separately so dispatch can hold it while widgets run.
pub struct HostServices<'h> {
    /// Texture/font/sound lookup provided by the rendering host
    pub content: &'h dyn ContentProvider,
    /// Tween scheduler for animated property changes
    pub tweener: &'h mut Tweener,
    /// Window placement persistence keyed by opaque id
    pub placements: &'h mut dyn PlacementStore,
}

/// Context handed to widget update/input callbacks
pub struct WidgetCtx<'a, 'h> {
    /// The owning tree; the widget itself is detached while the callback runs
    pub tree: &'a mut UiTree,
    /// Key of the control the callback runs for
    pub key: ControlKey,
    /// Pointer/focus context
    pub input: &'a mut InputContext,
    /// Host services
    pub host: &'a mut HostServices<'h>,
}

/// Context handed to layout recomputation
///
/// Layout runs without host services: synchronous invalidation may fire from
/// any property setter, where no host reference is available. Widgets that
/// need text metrics measure during `update` and cache the result.
pub struct LayoutCtx<'a> {
    /// The owning tree
    pub tree: &'a mut UiTree,
    /// Key of the control being recalculated
    pub key: ControlKey,
}

/// Behavior attached to a control node
///
/// All hooks default to no-ops; a widget overrides the capabilities it has.
/// The final text of a callback may mutate the tree freely (including
/// disposing its own control).
pub trait Widget: 'static {
    /// Adjust the default control state when the widget is added to a tree
    /// (size, capture declaration, clipping)
    fn configure(&self, _state: &mut ControlState) {}

    /// Per-frame update
    fn update(&mut self, _ctx: &mut WidgetCtx<'_, '_>, _dt: f32) {}

    /// Recompute derived layout after invalidation
    fn recalculate_layout(&mut self, _ctx: &mut LayoutCtx<'_>) {}

    /// Emit draw commands for this control
    fn paint(&mut self, _view: &PaintView<'_>, _out: &mut DrawList) {}

    /// Pointer event resolved to this control by dispatch
    fn on_pointer(&mut self, _ctx: &mut WidgetCtx<'_, '_>, _event: &PointerEvent) {}

    /// Synthesized click (press/release pair within the click window)
    fn on_click(&mut self, _ctx: &mut WidgetCtx<'_, '_>, _double: bool) {}

    /// Key event routed to this control while it holds keyboard focus
    fn on_key(&mut self, _ctx: &mut WidgetCtx<'_, '_>, _event: &KeyEvent) {}

    /// Keyboard focus gained or lost
    fn on_focus_changed(&mut self, _ctx: &mut WidgetCtx<'_, '_>, _focused: bool) {}

    /// Veto point for attaching a child to this container
    fn accepts_child(&self, _tree: &UiTree, _parent: ControlKey, _child: ControlKey) -> bool {
        true
    }

    /// Veto point for detaching a child from this container
    fn releases_child(&self, _tree: &UiTree, _parent: ControlKey, _child: ControlKey) -> bool {
        true
    }

    /// Called once during disposal, before the node leaves the arena
    fn on_disposed(&mut self, _tree: &mut UiTree, _key: ControlKey) {}
}

/// Object-safe downcasting shim over [`Widget`]
///
/// Lets callers recover the concrete widget type from the boxed trait object
/// stored in the arena.
pub trait AnyWidget: Widget {
    /// Upcast to `Any` for downcasting by concrete type
    fn as_any(&self) -> &dyn Any;
    /// Mutable upcast to `Any`
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<W: Widget> AnyWidget for W {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Widget with no behavior of its own
///
/// Used for plain controls and containers whose look is entirely determined
/// by their children, and as a stand-in in tests.
#[derive(Debug, Default)]
pub struct PlainWidget;

impl Widget for PlainWidget {}
