//! Widget layer
//!
//! Presentation logic riding on the control-tree core. Leaf widgets are
//! added with [`crate::ui::UiTree::add`], container widgets with
//! [`crate::ui::UiTree::add_container`]; each widget declares its own
//! capture mask and default size in its `configure` hook.

pub mod button;
pub mod checkbox;
pub mod dropdown;
pub mod flow_panel;
pub mod image;
pub mod label;
pub mod menu;
pub mod panel;
pub mod scrollbar;
pub mod slider;
pub mod text_box;
pub mod tooltip;
pub mod window;

pub use button::Button;
pub use checkbox::Checkbox;
pub use dropdown::Dropdown;
pub use flow_panel::{FlowDirection, FlowPanel};
pub use image::Image;
pub use label::Label;
pub use menu::{MenuItem, MenuStrip};
pub use panel::Panel;
pub use scrollbar::Scrollbar;
pub use slider::Slider;
pub use text_box::TextBox;
pub use tooltip::Tooltip;
pub use window::Window;

/// Font used by widgets that were not given one explicitly
pub const DEFAULT_FONT: &str = "fonts/overlay-16";
