//! World-space entity layer
//!
//! Markers and trails are drawn in the game world rather than in screen
//! space. They live in their own arena with the same stable-handle ownership
//! pattern as the control tree, but share nothing else with it: a world
//! entity has no layout, no input, and no parent chain.

pub mod entity;
pub mod marker;
pub mod trail;
pub mod vertex;

use slotmap::SlotMap;

use crate::assets::ContentProvider;
use crate::foundation::math::Vec3;
use crate::ui::rendering::backend::{RenderBackend, RenderError};
use self::entity::WorldEntityState;
use self::marker::Marker;
use self::trail::Trail;
use self::vertex::WorldVertex;

slotmap::new_key_type! {
    /// Stable handle to a world entity
    pub struct WorldEntityKey;
}

/// Camera description for billboarding and fade tests
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,
    /// Camera up vector
    pub up: Vec3,
}

/// World entity storage
enum WorldEntity {
    Marker(Marker),
    Trail(Trail),
}

/// Owner and renderer of all world-space entities
#[derive(Default)]
pub struct WorldRenderer {
    entities: SlotMap<WorldEntityKey, WorldEntity>,
    marker_vertices: Vec<WorldVertex>,
    trail_vertices: Vec<WorldVertex>,
}

impl WorldRenderer {
    /// Create an empty world layer
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a marker to the world
    pub fn add_marker(&mut self, marker: Marker) -> WorldEntityKey {
        self.entities.insert(WorldEntity::Marker(marker))
    }

    /// Add a trail to the world
    pub fn add_trail(&mut self, trail: Trail) -> WorldEntityKey {
        self.entities.insert(WorldEntity::Trail(trail))
    }

    /// Remove an entity; stale keys are a silent no-op
    pub fn remove(&mut self, key: WorldEntityKey) {
        self.entities.remove(key);
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the world layer is empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Get a marker by key
    pub fn marker_mut(&mut self, key: WorldEntityKey) -> Option<&mut Marker> {
        match self.entities.get_mut(key) {
            Some(WorldEntity::Marker(marker)) => Some(marker),
            _ => None,
        }
    }

    /// Get a trail by key
    pub fn trail_mut(&mut self, key: WorldEntityKey) -> Option<&mut Trail> {
        match self.entities.get_mut(key) {
            Some(WorldEntity::Trail(trail)) => Some(trail),
            _ => None,
        }
    }

    /// Shared state of any entity
    pub fn entity_mut(&mut self, key: WorldEntityKey) -> Option<&mut WorldEntityState> {
        match self.entities.get_mut(key) {
            Some(WorldEntity::Marker(marker)) => Some(&mut marker.entity),
            Some(WorldEntity::Trail(trail)) => Some(&mut trail.entity),
            None => None,
        }
    }

    /// Per-frame update: texture resolution and trail scroll animation
    pub fn update(&mut self, content: &dyn ContentProvider, dt: f32) {
        for entity in self.entities.values_mut() {
            match entity {
                WorldEntity::Marker(marker) => {
                    if marker.texture.is_none() {
                        marker.texture = content.texture(&marker.texture_name);
                    }
                }
                WorldEntity::Trail(trail) => {
                    if trail.texture.is_none() {
                        trail.texture = content.texture(&trail.texture_name);
                    }
                    trail.advance(dt);
                }
            }
        }
    }

    /// Build vertex batches and submit a world pass to the backend
    pub fn render(
        &mut self,
        camera: &Camera,
        backend: &mut dyn RenderBackend,
    ) -> Result<(), RenderError> {
        self.marker_vertices.clear();
        self.trail_vertices.clear();
        for entity in self.entities.values() {
            match entity {
                WorldEntity::Marker(marker) => {
                    if let Some(quad) = marker.build_vertices(camera) {
                        self.marker_vertices.extend_from_slice(&quad);
                    }
                }
                WorldEntity::Trail(trail) => {
                    self.trail_vertices
                        .extend_from_slice(&trail.build_vertices(camera));
                }
            }
        }
        log::debug!(
            "world pass: {} marker vertices, {} trail vertices",
            self.marker_vertices.len(),
            self.trail_vertices.len()
        );

        backend.begin_world_pass()?;
        if !self.marker_vertices.is_empty() {
            backend.draw_markers(&self.marker_vertices)?;
        }
        if !self.trail_vertices.is_empty() {
            backend.draw_trails(&self.trail_vertices)?;
        }
        backend.end_world_pass()
    }
}
