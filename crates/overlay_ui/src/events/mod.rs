//! UI event system
//!
//! Key principles:
//! - Typed payloads per event (no stringly-keyed arguments)
//! - Handler returns bool (true = consumed, stops forwarding)
//! - Registration system (only notify interested handlers)
//! - Queuing support (events accumulate, then dispatch once per frame)

use std::collections::HashMap;

use crate::foundation::math::Vec2;
use crate::ui::ControlKey;

/// Identifies which mutable field of a control changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// Location within the parent's content region
    Location,
    /// Width/height
    Size,
    /// Stacking order
    ZIndex,
    /// Visibility flag
    Visible,
    /// Enabled flag
    Enabled,
    /// Opacity factor
    Opacity,
    /// Padding thickness
    Padding,
    /// Clip-to-bounds flag
    ClipsBounds,
    /// Input capture mask
    Capture,
    /// Container content region
    ContentRegion,
    /// Container scroll offsets
    ScrollOffset,
    /// Container sizing modes
    SizingMode,
    /// Widget-specific text content
    Text,
    /// Widget-specific value (checked state, slider position, selection)
    Value,
}

/// Widget value payload for [`UiEvent::ValueChanged`]
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Boolean state (checkbox, toggle)
    Bool(bool),
    /// Continuous value (slider, scrollbar position)
    Float(f32),
    /// Selected index (dropdown)
    Index(usize),
    /// Text content (text box)
    Text(String),
}

/// Event type identification, used for handler registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiEventKind {
    /// A child was attached to a container
    ChildAdded,
    /// A child was detached from a container
    ChildRemoved,
    /// A control property changed
    PropertyChanged,
    /// Pointer entered a control's bounds
    MouseEntered,
    /// Pointer left a control's bounds
    MouseLeft,
    /// A press/release pair resolved to a click
    Click,
    /// The control under the pointer changed
    ActiveChanged,
    /// The keyboard-focused control changed
    FocusChanged,
    /// A control was disposed
    Disposed,
    /// A widget's value changed
    ValueChanged,
    /// A menu item was chosen
    MenuItemSelected,
    /// A window finished a drag move
    WindowMoved,
}

/// A UI notification with its typed payload
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// A child was attached to a container
    ChildAdded {
        /// Receiving container
        parent: ControlKey,
        /// Attached control
        child: ControlKey,
    },
    /// A child was detached from a container
    ChildRemoved {
        /// Former container
        parent: ControlKey,
        /// Detached control
        child: ControlKey,
    },
    /// A control property changed
    PropertyChanged {
        /// Mutated control
        control: ControlKey,
        /// Which field changed
        property: Property,
    },
    /// Pointer entered a control's bounds
    MouseEntered {
        /// Control now under the pointer
        control: ControlKey,
    },
    /// Pointer left a control's bounds
    MouseLeft {
        /// Control no longer under the pointer
        control: ControlKey,
    },
    /// A press/release pair resolved to a click
    Click {
        /// Clicked control
        control: ControlKey,
        /// Second click within the double-click window
        double: bool,
    },
    /// The control under the pointer changed
    ActiveChanged {
        /// Previously active control
        previous: Option<ControlKey>,
        /// Newly active control
        current: Option<ControlKey>,
    },
    /// The keyboard-focused control changed
    FocusChanged {
        /// Previously focused control
        previous: Option<ControlKey>,
        /// Newly focused control
        current: Option<ControlKey>,
    },
    /// A control was disposed
    Disposed {
        /// Disposed control (key is stale once this fires)
        control: ControlKey,
    },
    /// A widget's value changed
    ValueChanged {
        /// Owning control
        control: ControlKey,
        /// New value
        value: Value,
    },
    /// A menu item was chosen
    MenuItemSelected {
        /// Menu strip owning the item
        menu: ControlKey,
        /// Chosen item
        item: ControlKey,
    },
    /// A window finished a drag move
    WindowMoved {
        /// Moved window
        window: ControlKey,
        /// New location within its parent
        position: Vec2,
    },
}

impl UiEvent {
    /// Kind discriminant used for handler registration
    pub fn kind(&self) -> UiEventKind {
        match self {
            UiEvent::ChildAdded { .. } => UiEventKind::ChildAdded,
            UiEvent::ChildRemoved { .. } => UiEventKind::ChildRemoved,
            UiEvent::PropertyChanged { .. } => UiEventKind::PropertyChanged,
            UiEvent::MouseEntered { .. } => UiEventKind::MouseEntered,
            UiEvent::MouseLeft { .. } => UiEventKind::MouseLeft,
            UiEvent::Click { .. } => UiEventKind::Click,
            UiEvent::ActiveChanged { .. } => UiEventKind::ActiveChanged,
            UiEvent::FocusChanged { .. } => UiEventKind::FocusChanged,
            UiEvent::Disposed { .. } => UiEventKind::Disposed,
            UiEvent::ValueChanged { .. } => UiEventKind::ValueChanged,
            UiEvent::MenuItemSelected { .. } => UiEventKind::MenuItemSelected,
            UiEvent::WindowMoved { .. } => UiEventKind::WindowMoved,
        }
    }
}

/// Event handler trait
///
/// Returns true if the event was consumed (stops forwarding to later
/// handlers of the same kind), false to allow forwarding.
pub trait EventHandler {
    /// Handle an event, return true if consumed
    fn on_event(&mut self, event: &UiEvent) -> bool;
}

impl<F> EventHandler for F
where
    F: FnMut(&UiEvent) -> bool,
{
    fn on_event(&mut self, event: &UiEvent) -> bool {
        self(event)
    }
}

/// Event system with registration and queuing
///
/// Follows the chain-of-responsibility pattern: handlers for a kind run in
/// registration order until one consumes the event.
#[derive(Default)]
pub struct EventSystem {
    queue: Vec<UiEvent>,
    handlers: HashMap<UiEventKind, Vec<Box<dyn EventHandler>>>,
}

impl EventSystem {
    /// Create a new empty event system
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a specific event kind
    pub fn register_handler(&mut self, kind: UiEventKind, handler: Box<dyn EventHandler>) {
        self.handlers.entry(kind).or_default().push(handler);
    }

    /// Queue an event for dispatch
    pub fn send(&mut self, event: UiEvent) {
        self.queue.push(event);
    }

    /// Queue a batch of events for dispatch
    pub fn send_all(&mut self, events: impl IntoIterator<Item = UiEvent>) {
        self.queue.extend(events);
    }

    /// Number of events waiting for dispatch
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Dispatch all queued events to registered handlers
    ///
    /// Returns the dispatched events so the host can additionally drain them.
    pub fn dispatch(&mut self) -> Vec<UiEvent> {
        let queue = std::mem::take(&mut self.queue);
        for event in &queue {
            if let Some(handlers) = self.handlers.get_mut(&event.kind()) {
                for handler in handlers.iter_mut() {
                    if handler.on_event(event) {
                        // Event consumed, stop forwarding
                        break;
                    }
                }
            }
        }
        queue
    }

    /// Clear all queued events (useful for state transitions)
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
