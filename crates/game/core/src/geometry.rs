//! Planar helpers shared by sensing, combat and motion.
//!
//! Angles are radians. A zero vector has no direction: [`normalize_or_zero`]
//! returns zero for it and [`angle_between`] treats it as perfectly aligned.

use glam::Vec2;

use crate::env::{MapOracle, TileGrid};

/// Euclidean distance between two world points.
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Unit vector in the direction of `v`, or zero for a (near) zero vector.
#[inline]
pub fn normalize_or_zero(v: Vec2) -> Vec2 {
    v.normalize_or_zero()
}

/// Absolute angle in `[0, π]` between two directions.
///
/// Returns 0 if either vector is zero.
pub fn angle_between(a: Vec2, b: Vec2) -> f32 {
    let (a, b) = (a.normalize_or_zero(), b.normalize_or_zero());
    if a == Vec2::ZERO || b == Vec2::ZERO {
        return 0.0;
    }
    // atan2 of cross/dot keeps precision near 0 and π where acos does not
    a.perp_dot(b).atan2(a.dot(b)).abs()
}

/// True when `point` lies within `radius` of `origin` and within `half_angle`
/// of `facing`. Both bounds are inclusive.
///
/// A point coincident with the origin is always inside.
pub fn in_cone(origin: Vec2, facing: Vec2, point: Vec2, radius: f32, half_angle: f32) -> bool {
    let offset = point - origin;
    if offset.length() > radius {
        return false;
    }
    angle_between(facing, offset) <= half_angle
}

/// Samples the segment `from → to` every half tile and reports whether every
/// sample lands on an in-bounds floor tile.
///
/// Thin diagonal wall corners can be skipped between samples; this is a
/// gameplay-grade occlusion test, not an exact one.
pub fn line_of_sight(grid: &TileGrid, from: Vec2, to: Vec2) -> bool {
    let step = grid.tile_size() * 0.5;
    let length = from.distance(to);
    let samples = (length / step).ceil().max(1.0) as u32;

    (0..=samples).all(|i| {
        let point = from.lerp(to, i as f32 / samples as f32);
        grid.is_walkable(grid.world_to_tile(point))
    })
}

/// Rotates `current` toward `desired` by at most `max_turn` radians.
pub fn turn_toward(current: Vec2, desired: Vec2, max_turn: f32) -> Vec2 {
    let desired = desired.normalize_or_zero();
    if desired == Vec2::ZERO {
        return current;
    }
    let current = current.normalize_or_zero();
    if current == Vec2::ZERO {
        return desired;
    }
    let delta = current.perp_dot(desired).atan2(current.dot(desired));
    if delta.abs() <= max_turn {
        desired
    } else {
        Vec2::from_angle(max_turn.copysign(delta)).rotate(current)
    }
}
