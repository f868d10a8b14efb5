//! Overlay rendering
//!
//! Painting produces a backend-agnostic command list; a [`backend::RenderBackend`]
//! implementation translates it to the host engine's sprite batcher. The
//! toolkit itself never touches a GPU API.

pub mod backend;
pub mod commands;
pub mod context;
