//! Axis-aligned boxes in world space.

use glam::Vec2;
use serde::Serialize;

/// Axis-aligned bounding box. `max` is exclusive, so boxes that only share an
/// edge do not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self { min, max: min + size }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Strict overlap test; touching edges do not count.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Half-open containment: `min <= p < max`.
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }
}

/// Extents of the axis-aligned box around a `size` rectangle rotated by `angle`.
pub fn rotated_extents(size: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    Vec2::new(size.x * cos + size.y * sin, size.x * sin + size.y * cos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_touching_boxes_do_not_overlap() {
        let a = Aabb::from_min_size(Vec2::ZERO, Vec2::splat(10.0));
        let b = Aabb::from_min_size(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&b.translated(Vec2::new(-0.5, 0.0))));
    }

    #[test]
    fn test_contains_point_is_half_open() {
        let a = Aabb::from_min_size(Vec2::ZERO, Vec2::splat(10.0));
        assert!(a.contains_point(Vec2::ZERO));
        assert!(!a.contains_point(Vec2::new(10.0, 5.0)));
    }

    #[test]
    fn test_rotated_extents_quarter_turn_swaps_axes() {
        let extents = rotated_extents(Vec2::new(60.0, 40.0), FRAC_PI_2);
        assert!((extents.x - 40.0).abs() < 1e-3);
        assert!((extents.y - 60.0).abs() < 1e-3);
    }
}
