//! Чистая логика pickup: выбор ближайшего, pull, поворот anchor

use bevy::prelude::*;
use bevy_rapier2d::prelude::CollisionGroups;

use crate::collision_layers::{held_groups, overhead_groups};

/// Ближайший кандидат по квадрату расстояния
///
/// Строгое `<`: при равенстве выигрывает первый встреченный.
/// Пустой список → None.
pub fn select_nearest<I>(origin: Vec2, candidates: I) -> Option<Entity>
where
    I: IntoIterator<Item = (Entity, Vec2)>,
{
    let mut nearest: Option<(Entity, f32)> = None;

    for (entity, position) in candidates {
        let distance_sqr = position.distance_squared(origin);
        if nearest.is_none_or(|(_, best)| distance_sqr < best) {
            nearest = Some((entity, distance_sqr));
        }
    }

    nearest.map(|(entity, _)| entity)
}

/// Lerp factor pull'а: dt × pull_strength, зажатый в [0, 1]
pub fn pull_factor(dt: f32, pull_strength: f32) -> f32 {
    (dt * pull_strength).clamp(0.0, 1.0)
}

/// Новая скорость held item с velocity body
///
/// desired = dir.normalized × distance × pull_strength × multiplier,
/// затем lerp от текущей скорости.
pub fn pull_velocity(current: Vec2, position: Vec2, anchor: Vec2, pull_strength: f32, multiplier: f32, dt: f32) -> Vec2 {
    let direction = anchor - position;
    let desired = direction.normalize_or_zero() * direction.length() * pull_strength * multiplier;
    current.lerp(desired, pull_factor(dt, pull_strength))
}

/// Новая позиция held item без velocity body
pub fn pull_position(position: Vec2, anchor: Vec2, pull_strength: f32, multiplier: f32, dt: f32) -> Vec2 {
    position.lerp(anchor, pull_factor(dt * multiplier, pull_strength))
}

/// Groups held item: выше holder'а → overhead, иначе held
pub fn held_layer_for(item_y: f32, holder_y: f32) -> CollisionGroups {
    if item_y > holder_y {
        overhead_groups()
    } else {
        held_groups()
    }
}

/// Разница углов в [-180, 180]
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let delta = (target - current).rem_euclid(360.0);
    if delta > 180.0 {
        delta - 360.0
    } else {
        delta
    }
}

/// Поворот угла к target не больше чем на max_delta (по короткой дуге)
pub fn move_towards_angle(current: f32, target: f32, max_delta: f32) -> f32 {
    let delta = delta_angle(current, target);
    if delta.abs() <= max_delta {
        return target;
    }
    current + max_delta * delta.signum()
}

/// Позиция anchor: центр holder'а + единичный вектор угла × offset
pub fn anchor_position(holder: Vec2, angle_deg: f32, hold_offset: f32) -> Vec2 {
    holder + Vec2::from_angle(angle_deg.to_radians()) * hold_offset
}
