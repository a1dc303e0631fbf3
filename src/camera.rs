use glam::Vec2;

use crate::geometry::Aabb;

/// Viewport over the world.
///
/// Everything in the simulation stays in world coordinates. The camera keeps
/// a single world-space origin for the screen's top-left corner; screen
/// positions are derived from it on read, so following the player never
/// touches entity or graph data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub origin: Vec2,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl Camera {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            origin: Vec2::ZERO,
            viewport_width,
            viewport_height,
        }
    }

    pub fn screen_center(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height) * 0.5
    }

    /// Move the origin so `target` lands on the screen center. Returns the
    /// shift applied, which every screen-space position moves by (negated).
    pub fn recenter(&mut self, target: Vec2) -> Vec2 {
        let new_origin = target - self.screen_center();
        let shift = new_origin - self.origin;
        self.origin = new_origin;
        shift
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.origin
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen + self.origin
    }

    /// World-space box currently on screen.
    pub fn visible_bounds(&self) -> Aabb {
        Aabb::from_min_size(
            self.origin,
            Vec2::new(self.viewport_width, self.viewport_height),
        )
    }
}
