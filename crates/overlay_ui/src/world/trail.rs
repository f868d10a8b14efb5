//! Trails - textured ribbons along a world-space path
//!
//! A trail extrudes a flat ribbon along its polyline, one quad per segment.
//! The V texture coordinate runs with cumulative path distance and scrolls
//! over time, giving the classic marching-ants guidance effect.

use crate::assets::TextureHandle;
use crate::foundation::math::Vec3;
use crate::world::entity::WorldEntityState;
use crate::world::vertex::WorldVertex;
use crate::world::Camera;

/// Textured ribbon following a path of world positions
#[derive(Debug, Clone)]
pub struct Trail {
    /// Shared entity state; `position` anchors the fade distance test
    pub entity: WorldEntityState,

    /// Ribbon texture asset name
    pub texture_name: String,

    /// Ribbon width in world units
    pub width: f32,

    /// Path points in order; fewer than two yield no geometry
    pub points: Vec<Vec3>,

    /// Texture scroll speed in V units per second
    pub scroll_speed: f32,

    /// RGB tint applied to the ribbon
    pub tint: [f32; 3],

    pub(crate) texture: Option<TextureHandle>,
    uv_offset: f32,
}

impl Trail {
    /// Create a trail along `points`
    pub fn new(points: Vec<Vec3>, texture_name: impl Into<String>) -> Self {
        let anchor = points.first().copied().unwrap_or_else(Vec3::zeros);
        Self {
            entity: WorldEntityState::at(anchor),
            texture_name: texture_name.into(),
            width: 0.5,
            points,
            scroll_speed: 0.5,
            tint: [1.0, 1.0, 1.0],
            texture: None,
            uv_offset: 0.0,
        }
    }

    /// Advance the texture scroll animation
    pub(crate) fn advance(&mut self, dt: f32) {
        self.uv_offset = (self.uv_offset + self.scroll_speed * dt).fract();
    }

    /// Build the ribbon as a triangle list, two triangles per segment
    pub fn build_vertices(&self, camera: &Camera) -> Vec<WorldVertex> {
        let opacity = self.entity.faded_opacity(camera.position);
        if opacity <= 0.0 || self.points.len() < 2 {
            return Vec::new();
        }
        let color = [self.tint[0], self.tint[1], self.tint[2], opacity];
        let half = self.width * 0.5;
        let up = Vec3::new(0.0, 1.0, 0.0);

        let mut vertices = Vec::with_capacity((self.points.len() - 1) * 6);
        let mut distance = 0.0f32;
        for segment in self.points.windows(2) {
            let (a, b) = (segment[0], segment[1]);
            let Some(direction) = (b - a).try_normalize(1e-6) else {
                // Coincident points contribute no quad
                continue;
            };
            let side = direction
                .cross(&up)
                .try_normalize(1e-6)
                .unwrap_or_else(|| Vec3::new(1.0, 0.0, 0.0))
                * half;
            let length = (b - a).norm();
            let v0 = distance / self.width.max(1e-6) - self.uv_offset;
            let v1 = (distance + length) / self.width.max(1e-6) - self.uv_offset;
            distance += length;

            let vertex = |p: Vec3, u: f32, v: f32| WorldVertex::new([p.x, p.y, p.z], [u, v], color);
            let left_a = vertex(a - side, 0.0, v0);
            let right_a = vertex(a + side, 1.0, v0);
            let left_b = vertex(b - side, 0.0, v1);
            let right_b = vertex(b + side, 1.0, v1);
            vertices.extend_from_slice(&[left_a, right_a, left_b, left_b, right_a, right_b]);
        }
        vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn camera() -> Camera {
        Camera {
            position: Vec3::new(0.0, 5.0, 0.0),
            up: Vec3::new(0.0, 1.0, 0.0),
        }
    }

    #[test]
    fn test_segment_count() {
        let trail = Trail::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(2.0, 0.0, 0.0),
            ],
            "textures/trail",
        );
        // Two segments, six vertices each
        assert_eq!(trail.build_vertices(&camera()).len(), 12);
    }

    #[test]
    fn test_ribbon_width() {
        let mut trail = Trail::new(
            vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)],
            "textures/trail",
        );
        trail.width = 2.0;
        let vertices = trail.build_vertices(&camera());
        // Direction +X, up +Y: the side vector points along -Z/+Z
        let z_extent: f32 = vertices
            .iter()
            .map(|v| v.position[2].abs())
            .fold(0.0, f32::max);
        assert_relative_eq!(z_extent, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_degenerate_paths_build_nothing() {
        let single = Trail::new(vec![Vec3::zeros()], "textures/trail");
        assert!(single.build_vertices(&camera()).is_empty());

        let coincident = Trail::new(vec![Vec3::zeros(), Vec3::zeros()], "textures/trail");
        assert!(coincident.build_vertices(&camera()).is_empty());
    }

    #[test]
    fn test_scroll_advances_v() {
        let mut trail = Trail::new(
            vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)],
            "textures/trail",
        );
        trail.scroll_speed = 0.25;
        let before = trail.build_vertices(&camera())[0].uv[1];
        trail.advance(1.0);
        let after = trail.build_vertices(&camera())[0].uv[1];
        assert_relative_eq!(before - after, 0.25, epsilon = 1e-5);
    }
}
