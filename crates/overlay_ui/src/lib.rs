//! # Overlay UI
//!
//! A retained-mode UI toolkit for in-game overlays, plus a world-space
//! marker/trail layer for drawing guidance icons and ribbons in the game
//! world itself.
//!
//! ## Features
//!
//! - **Retained control tree**: slotmap arena of controls with stable keys
//! - **Invalidation-driven layout**: suspend scopes, deferred recomputation
//! - **Z-ordered input dispatch**: capture declarations, filter pass-through,
//!   host pass-through, click synthesis
//! - **Widget set**: buttons, windows, panels, menus, scrollbars, text
//!   input, tooltips, and more
//! - **Host-agnostic rendering**: draw-command lists consumed by a backend
//!   trait; the host engine owns every GPU and asset concern
//!
//! ## Quick Start
//!
//! ```rust
//! use overlay_ui::prelude::*;
//!
//! let mut screen = Screen::new(Vec2::new(1920.0, 1080.0));
//! let root = screen.root();
//!
//! let panel = screen.tree_mut().add_container(Panel::titled("Session"));
//! screen.tree_mut().try_set_parent(panel, Some(root)).unwrap();
//!
//! let button = screen.tree_mut().add(Button::new("Ready"));
//! screen.tree_mut().try_set_parent(button, Some(panel)).unwrap();
//!
//! // Per frame, driven by the host render loop:
//! let content = NullContent;
//! let mut placements = MemoryPlacementStore::default();
//! let events = screen.update(&content, &mut placements, 1.0 / 60.0);
//! assert!(!events.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod animation;
pub mod assets;
pub mod config;
pub mod events;
pub mod foundation;
pub mod ui;
pub mod world;

/// Common imports for toolkit users
pub mod prelude {
    pub use crate::{
        animation::{Easing, TweenKey, TweenProperty, Tweener},
        assets::{ContentCache, ContentProvider, FontHandle, NullContent, TextureHandle},
        config::{Config, ConfigError, FilePlacementStore, MemoryPlacementStore, PlacementStore},
        events::{EventSystem, Property, UiEvent, UiEventKind, Value},
        foundation::{
            geometry::{Rect, Thickness},
            math::{Vec2, Vec3, Vec4},
            time::Timer,
        },
        ui::{
            input::{Key, KeyEvent, Modifiers, PointerEvent, PointerEventKind},
            rendering::backend::{RecordingBackend, RenderBackend, RenderError},
            rendering::commands::{Color, DrawCommand, DrawList},
            widgets::{
                Button, Checkbox, Dropdown, FlowDirection, FlowPanel, Image, Label, MenuItem,
                MenuStrip, Panel, Scrollbar, Slider, TextBox, Tooltip, Window,
            },
            CaptureType, ControlKey, ControlState, LayoutState, Screen, SizingMode, TreeError,
            UiTree, Widget,
        },
        world::{
            entity::WorldEntityState, marker::Marker, trail::Trail, vertex::WorldVertex, Camera,
            WorldEntityKey, WorldRenderer,
        },
    };
}
