//! Billboard markers - world-space icons that face the camera

use crate::assets::TextureHandle;
use crate::foundation::math::Vec3;
use crate::world::entity::WorldEntityState;
use crate::world::vertex::WorldVertex;
use crate::world::Camera;

/// World-space icon billboarded toward the camera
#[derive(Debug, Clone)]
pub struct Marker {
    /// Shared entity state (position, fade, opacity)
    pub entity: WorldEntityState,

    /// Icon texture asset name
    pub texture_name: String,

    /// Edge length of the square billboard in world units
    pub size: f32,

    /// RGB tint applied to the icon
    pub tint: [f32; 3],

    pub(crate) texture: Option<TextureHandle>,
}

impl Marker {
    /// Create a marker at a world position
    pub fn new(position: Vec3, texture_name: impl Into<String>) -> Self {
        Self {
            entity: WorldEntityState::at(position),
            texture_name: texture_name.into(),
            size: 1.0,
            tint: [1.0, 1.0, 1.0],
            texture: None,
        }
    }

    /// Build the camera-facing quad as two triangles
    ///
    /// Returns `None` when fully faded or when the camera sits exactly on
    /// the marker (no billboard orientation exists there).
    pub fn build_vertices(&self, camera: &Camera) -> Option<[WorldVertex; 6]> {
        let opacity = self.entity.faded_opacity(camera.position);
        if opacity <= 0.0 {
            return None;
        }
        let to_camera = (camera.position - self.entity.position).try_normalize(1e-6)?;
        let right = camera
            .up
            .cross(&to_camera)
            .try_normalize(1e-6)
            .unwrap_or_else(|| Vec3::new(1.0, 0.0, 0.0));
        let up = to_camera.cross(&right);

        let half = self.size * 0.5;
        let center = self.entity.position;
        let color = [self.tint[0], self.tint[1], self.tint[2], opacity];
        let corner = |sx: f32, sy: f32, u: f32, v: f32| {
            let p = center + right * (sx * half) + up * (sy * half);
            WorldVertex::new([p.x, p.y, p.z], [u, v], color)
        };

        let top_left = corner(-1.0, 1.0, 0.0, 0.0);
        let top_right = corner(1.0, 1.0, 1.0, 0.0);
        let bottom_left = corner(-1.0, -1.0, 0.0, 1.0);
        let bottom_right = corner(1.0, -1.0, 1.0, 1.0);
        Some([
            top_left,
            bottom_left,
            top_right,
            top_right,
            bottom_left,
            bottom_right,
        ])
    }
}
