//! Headless integrator для rapier-компонентов
//!
//! Архитектура:
//! - В engine-сборке velocity интегрирует rapier (RapierPhysicsPlugin)
//! - Для тестов и headless demo: эти системы: gravity, impulses, velocity → Transform
//! - Пол: горизонтальная плоскость `floor_height`, она же ground detection
//!
//! Детерминизм: fixed timestep 50Hz, без коллизий между телами.

use bevy::prelude::*;
use bevy_rapier2d::prelude::{AdditionalMassProperties, ExternalImpulse, GravityScale, RigidBody, Velocity};
use serde::{Deserialize, Serialize};

use crate::movement::CharacterMotion;
use crate::time_scale::TimeScaledBody;

/// Допуск ground detection над полом
pub const GROUND_EPSILON: f32 = 0.001;

/// Headless physics tunables
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadlessPhysicsConfig {
    /// Ускорение свободного падения (m/s², вниз отрицательное)
    pub gravity: f32,
    /// Высота пола (Transform.translation.y)
    pub floor_height: f32,
    /// Масса тела без AdditionalMassProperties
    pub default_mass: f32,
}

impl Default for HeadlessPhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: -9.81,
            floor_height: 0.0,
            default_mass: 1.0,
        }
    }
}

fn time_multiplier(time_scale: Option<&TimeScaledBody>) -> f32 {
    time_scale.map_or(1.0, |scaled| scaled.multiplier())
}

/// Масса тела: AdditionalMassProperties::Mass (> 0) или default
pub fn body_mass(mass: Option<&AdditionalMassProperties>, default_mass: f32) -> f32 {
    match mass {
        Some(AdditionalMassProperties::Mass(mass)) if *mass > 0.0 => *mass,
        Some(AdditionalMassProperties::MassProperties(props)) if props.mass > 0.0 => props.mass,
        _ => default_mass,
    }
}

/// Система: ExternalImpulse → Velocity (только Dynamic), импульс обнуляется
pub fn apply_impulses(
    mut bodies: Query<(&RigidBody, &mut ExternalImpulse, &mut Velocity, Option<&AdditionalMassProperties>)>,
    config: Res<HeadlessPhysicsConfig>,
) {
    for (body, mut impulse, mut velocity, mass) in bodies.iter_mut() {
        if impulse.impulse == Vec2::ZERO && impulse.torque_impulse == 0.0 {
            continue;
        }
        if *body == RigidBody::Dynamic {
            let mass = body_mass(mass, config.default_mass);
            velocity.linvel += impulse.impulse / mass;
            velocity.angvel += impulse.torque_impulse / mass;
        }
        *impulse = ExternalImpulse::default();
    }
}

/// Система: gravity × GravityScale → Velocity (Dynamic)
///
/// Работает в FixedUpdate (50Hz) для детерминизма.
pub fn apply_gravity(
    mut bodies: Query<(&RigidBody, &mut Velocity, Option<&GravityScale>, Option<&TimeScaledBody>)>,
    config: Res<HeadlessPhysicsConfig>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (body, mut velocity, gravity_scale, time_scale) in bodies.iter_mut() {
        if *body != RigidBody::Dynamic {
            continue;
        }
        let scale = gravity_scale.map_or(1.0, |scale| scale.0);
        velocity.linvel.y += config.gravity * scale * delta * time_multiplier(time_scale);
    }
}

/// Система: velocity → Transform (Dynamic + KinematicVelocityBased)
pub fn integrate_velocity(
    mut bodies: Query<(&RigidBody, &Velocity, &mut Transform, Option<&TimeScaledBody>)>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (body, velocity, mut transform, time_scale) in bodies.iter_mut() {
        if !matches!(body, RigidBody::Dynamic | RigidBody::KinematicVelocityBased) {
            continue;
        }
        let step = delta * time_multiplier(time_scale);
        transform.translation += (velocity.linvel * step).extend(0.0);
        if velocity.angvel != 0.0 {
            transform.rotate_z(velocity.angvel * step);
        }
    }
}

/// Система: пол + ground detection
///
/// Dynamic тела не проваливаются ниже `floor_height`; CharacterMotion.grounded
/// выставляется по касанию пола (читается следующим тиком движения).
pub fn resolve_floor(
    mut bodies: Query<(&RigidBody, &mut Transform, &mut Velocity, Option<&mut CharacterMotion>)>,
    config: Res<HeadlessPhysicsConfig>,
) {
    for (body, mut transform, mut velocity, motion) in bodies.iter_mut() {
        if *body != RigidBody::Dynamic {
            continue;
        }

        if transform.translation.y < config.floor_height {
            transform.translation.y = config.floor_height;
            if velocity.linvel.y < 0.0 {
                velocity.linvel.y = 0.0;
            }
        }

        if let Some(mut motion) = motion {
            let touching = transform.translation.y <= config.floor_height + GROUND_EPSILON;
            motion.grounded = touching && velocity.linvel.y <= 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::ecs::system::RunSystemOnce;

    use super::*;

    fn physics_world() -> World {
        let mut world = World::new();
        let mut time = Time::<()>::default();
        time.advance_by(Duration::from_secs_f32(0.02));
        world.insert_resource(time);
        world.init_resource::<HeadlessPhysicsConfig>();
        world
    }

    #[test]
    fn test_impulse_divided_by_mass_and_cleared() {
        let mut world = physics_world();
        let body = world
            .spawn((
                RigidBody::Dynamic,
                Velocity::zero(),
                ExternalImpulse {
                    impulse: Vec2::new(0.0, 8.0),
                    torque_impulse: 0.0,
                },
                AdditionalMassProperties::Mass(2.0),
            ))
            .id();

        world.run_system_once(apply_impulses).unwrap();

        assert_eq!(world.get::<Velocity>(body).unwrap().linvel, Vec2::new(0.0, 4.0));
        assert_eq!(world.get::<ExternalImpulse>(body).unwrap().impulse, Vec2::ZERO);
    }

    #[test]
    fn test_gravity_scaled_and_frozen() {
        let mut world = physics_world();
        let falling = world
            .spawn((RigidBody::Dynamic, Velocity::zero(), GravityScale(2.5)))
            .id();
        let mut frozen_scale = TimeScaledBody::default();
        crate::time_scale::TimeAffected::set_time_multiplier(&mut frozen_scale, 0.0);
        let frozen = world
            .spawn((RigidBody::Dynamic, Velocity::zero(), frozen_scale))
            .id();

        world.run_system_once(apply_gravity).unwrap();

        let vy = world.get::<Velocity>(falling).unwrap().linvel.y;
        assert!((vy - (-9.81 * 2.5 * 0.02)).abs() < 1e-5, "vy = {}", vy);
        assert_eq!(world.get::<Velocity>(frozen).unwrap().linvel.y, 0.0);
    }

    #[test]
    fn test_position_based_kinematic_not_integrated() {
        let mut world = physics_world();
        let body = world
            .spawn((
                RigidBody::KinematicPositionBased,
                Velocity::linear(Vec2::new(5.0, 0.0)),
                Transform::default(),
            ))
            .id();

        world.run_system_once(integrate_velocity).unwrap();

        assert_eq!(world.get::<Transform>(body).unwrap().translation, Vec3::ZERO);
    }

    #[test]
    fn test_floor_clamps_and_grounds_character() {
        let mut world = physics_world();
        let body = world
            .spawn((
                RigidBody::Dynamic,
                Velocity::linear(Vec2::new(1.0, -3.0)),
                Transform::from_xyz(0.0, -0.2, 0.0),
                CharacterMotion::default(),
            ))
            .id();

        world.run_system_once(resolve_floor).unwrap();

        assert_eq!(world.get::<Transform>(body).unwrap().translation.y, 0.0);
        assert_eq!(world.get::<Velocity>(body).unwrap().linvel, Vec2::new(1.0, 0.0));
        assert!(world.get::<CharacterMotion>(body).unwrap().grounded);
    }
}
