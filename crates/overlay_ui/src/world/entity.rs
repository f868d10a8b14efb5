//! Shared world-entity state
//!
//! Markers and trails embed this state the way screen widgets embed
//! [`crate::ui::ControlState`]-backed nodes: position, visibility, opacity,
//! and a distance-fade range evaluated against the camera every frame.

use crate::foundation::math::{saturate, Vec3};

/// State common to every world-space entity
#[derive(Debug, Clone)]
pub struct WorldEntityState {
    /// Anchor position in world space
    pub position: Vec3,

    /// Whether the entity renders at all
    pub visible: bool,

    /// Base opacity in [0, 1], multiplied with the distance fade
    pub opacity: f32,

    /// Distance at which fading begins
    pub fade_near: f32,

    /// Distance at which the entity is fully faded out
    pub fade_far: f32,
}

impl Default for WorldEntityState {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            visible: true,
            opacity: 1.0,
            fade_near: f32::INFINITY,
            fade_far: f32::INFINITY,
        }
    }
}

impl WorldEntityState {
    /// Entity state anchored at a position
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Effective opacity for a camera at `camera_position`
    ///
    /// Inside `fade_near` the base opacity applies unchanged; between near
    /// and far it falls off linearly; beyond far the entity is invisible.
    pub fn faded_opacity(&self, camera_position: Vec3) -> f32 {
        if !self.visible {
            return 0.0;
        }
        let distance = (self.position - camera_position).norm();
        if distance <= self.fade_near {
            return saturate(self.opacity);
        }
        if distance >= self.fade_far || self.fade_far <= self.fade_near {
            return 0.0;
        }
        let fade = 1.0 - (distance - self.fade_near) / (self.fade_far - self.fade_near);
        saturate(self.opacity * fade)
    }
}
