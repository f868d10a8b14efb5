//! Input event types and dispatch
//!
//! Raw pointer and key events arrive from the input host once per frame tick
//! and are resolved against the control tree by [`dispatch`]. The
//! [`context::InputContext`] replaces the original design's process-wide
//! active/focused statics with an explicit object owned by the screen, so
//! independent trees can run side by side.

pub mod context;
pub mod dispatch;

use crate::foundation::math::Vec2;
use crate::ui::capture::CaptureType;

/// What happened to the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEventKind {
    /// Pointer moved
    Moved,
    /// Left button went down
    LeftPressed,
    /// Left button came up
    LeftReleased,
    /// Right button went down
    RightPressed,
    /// Right button came up
    RightReleased,
    /// Scroll wheel turned; positive delta scrolls up
    Wheel {
        /// Wheel movement in notches
        delta: f32,
    },
}

impl PointerEventKind {
    /// The capture capability a control needs to receive this event
    pub fn required_capture(&self) -> CaptureType {
        match self {
            PointerEventKind::Wheel { .. } => CaptureType::MOUSE_WHEEL,
            _ => CaptureType::MOUSE,
        }
    }
}

/// A pointer event in absolute (screen) coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// What happened
    pub kind: PointerEventKind,
    /// Pointer position in screen space
    pub position: Vec2,
    /// Host time in seconds; drives click/double-click pairing
    pub time: f64,
}

impl PointerEvent {
    /// Convenience constructor
    pub fn new(kind: PointerEventKind, position: Vec2, time: f64) -> Self {
        Self {
            kind,
            position,
            time,
        }
    }
}

/// Keyboard key identification
///
/// Only the keys the toolkit itself reacts to are named; printable input
/// arrives as `Char`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character (already layout-translated by the host)
    Char(char),
    /// Backspace
    Backspace,
    /// Forward delete
    Delete,
    /// Caret left
    Left,
    /// Caret right
    Right,
    /// Jump to line start
    Home,
    /// Jump to line end
    End,
    /// Commit / newline
    Enter,
    /// Cancel / drop focus
    Escape,
    /// Focus traversal
    Tab,
}

/// Modifier key state accompanying a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Control key held
    pub control: bool,
    /// Shift key held
    pub shift: bool,
    /// Alt key held
    pub alt: bool,
}

/// A keyboard event routed to the focused control
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyEvent {
    /// Which key
    pub key: Key,
    /// Modifier state at the time of the event
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Plain key press with no modifiers
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }

    /// Key press with control held
    pub fn ctrl(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers {
                control: true,
                ..Modifiers::default()
            },
        }
    }
}
