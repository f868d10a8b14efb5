//! Retained-mode control tree, input dispatch, and widgets

pub mod capture;
pub mod container;
pub mod control;
pub mod input;
pub mod layout;
pub mod rendering;
pub mod screen;
pub mod tree;
pub mod widgets;

pub use capture::CaptureType;
pub use container::SizingMode;
pub use control::{
    AnyWidget, ControlState, HostServices, LayoutCtx, LayoutState, PlainWidget, Widget, WidgetCtx,
};
pub use screen::Screen;
pub use tree::{ControlKey, TreeError, UiTree};
