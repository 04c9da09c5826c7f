//! Scripted motion systems
//!
//! - `advance_transform_paths` (Update): PathDriver::Transform
//! - `advance_kinematic_paths` (FixedUpdate): PathDriver::KinematicBody через Velocity
//! - `snap_new_doors` + `advance_doors` (FixedUpdate)

use bevy::prelude::*;
use bevy_rapier2d::prelude::Velocity;

use super::door::{Door, DoorPose};
use super::path::{OscillatingPath, PathDriver, PathStep};
use crate::components::{is_active_in, ActivityQuery};

/// Moving platforms без physics body: прямая запись Transform
pub fn advance_transform_paths(
    mut paths: Query<(Entity, &mut OscillatingPath, &mut Transform)>,
    activity: ActivityQuery,
    time: Res<Time>,
) {
    let dt = time.delta_secs();

    for (entity, mut path, mut transform) in paths.iter_mut() {
        if path.driver != PathDriver::Transform || !is_active_in(&activity, entity) {
            continue;
        }
        // Пауза и пропущенный тик не двигают платформу
        if matches!(path.advance(dt), Some(PathStep::Moved | PathStep::Arrived { .. })) {
            let position = path.position();
            transform.translation.x = position.x;
            transform.translation.y = position.y;
        }
    }
}

/// Moving platforms с kinematic body: Velocity довозит body до цели за тик
pub fn advance_kinematic_paths(
    mut paths: Query<(Entity, &mut OscillatingPath, &Transform, &mut Velocity)>,
    activity: ActivityQuery,
    time: Res<Time>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }

    for (entity, mut path, transform, mut velocity) in paths.iter_mut() {
        if path.driver != PathDriver::KinematicBody {
            continue;
        }
        if !is_active_in(&activity, entity) || path.advance(dt).is_none() {
            velocity.linvel = Vec2::ZERO;
            continue;
        }

        let current = transform.translation.truncate();
        velocity.linvel = (path.position() - current) / dt;
    }
}

/// Новая дверь встаёт в closed позу
pub fn snap_new_doors(mut doors: Query<(&Door, &mut Transform), Added<Door>>) {
    for (door, mut transform) in doors.iter_mut() {
        door.closed.apply(&mut transform);
    }
}

/// Ход дверей (eased, от текущей позы)
pub fn advance_doors(mut doors: Query<(Entity, &mut Door, &mut Transform)>, activity: ActivityQuery, time: Res<Time>) {
    let dt = time.delta_secs();

    for (entity, mut door, mut transform) in doors.iter_mut() {
        if !door.is_moving() || !is_active_in(&activity, entity) {
            continue;
        }
        let current = DoorPose::from_transform(&transform);
        if let Some(pose) = door.tick(current, dt) {
            pose.apply(&mut transform);
        }
    }
}
