//! Headless симуляция Handhold
//!
//! Небольшой уровень без рендера: игрок со случайным (seeded) input,
//! ящики, moving platform, дверь за pressure plate.

use bevy::prelude::*;
use bevy_rapier2d::prelude::{ExternalImpulse, GravityScale, RigidBody, Velocity};
use handhold_simulation::collision_layers::{environment_groups, pickup_groups, player_groups};
use handhold_simulation::level::PressurePlate;
use handhold_simulation::pickup::{HoldAnchor, ItemHolder, Pickup};
use handhold_simulation::scripted_motion::{DoorPose, PathTiming};
use handhold_simulation::*;
use rand::Rng;

fn main() {
    let seed = 42;
    log_info(&format!("Starting Handhold headless simulation (seed: {})", seed));

    let mut app = create_headless_app(seed);
    let player = spawn_level(app.world_mut());

    // 1000 тиков = 20 секунд игрового времени
    for tick in 0..1000 {
        drive_random_input(app.world_mut(), player);
        app.update();

        if tick % 100 == 0 {
            let world = app.world();
            let Some(transform) = world.get::<Transform>(player) else {
                log_error("Player despawned");
                return;
            };
            let grounded = world.get::<CharacterMotion>(player).is_some_and(|motion| motion.grounded);
            log_info(&format!(
                "Tick {}: player at ({:.2}, {:.2}), grounded: {}, entities: {}",
                tick,
                transform.translation.x,
                transform.translation.y,
                grounded,
                world.entities().len()
            ));
        }
    }

    log_info("Simulation complete!");
}

fn spawn_level(world: &mut World) -> Entity {
    let player = world
        .spawn((
            Player,
            PlayerInput::default(),
            JumpConfig::default(),
            CharacterMotion::default(),
            InputBuffer::default(),
            ItemHolder::default(),
            HoldAnchor::default(),
            RigidBody::Dynamic,
            Velocity::zero(),
            GravityScale(1.0),
            ExternalImpulse::default(),
            player_groups(),
            Tagged(ContactTag::Player),
            Transform::from_xyz(0.0, 1.0, 0.0),
        ))
        .id();

    for i in 0..3 {
        world.spawn((
            Pickup,
            RigidBody::Dynamic,
            Velocity::zero(),
            GravityScale(1.0),
            TimeScaledBody::default(),
            pickup_groups(),
            Tagged(ContactTag::Pickup),
            Transform::from_xyz(2.0 + i as f32 * 1.5, 2.0, 0.0),
        ));
    }

    world.spawn((
        OscillatingPath::new(Vec2::new(-4.0, 3.0), Vec2::new(4.0, 3.0), PathTiming::default()),
        environment_groups(),
        Transform::from_xyz(-4.0, 3.0, 0.0),
    ));

    let door = world
        .spawn((
            Door::new(
                DoorPose {
                    position: Vec2::new(8.0, 0.0),
                    rotation_deg: 0.0,
                },
                DoorPose {
                    position: Vec2::new(8.0, 3.0),
                    rotation_deg: 0.0,
                },
            ),
            environment_groups(),
            Transform::default(),
        ))
        .id();
    world.spawn(PressurePlate::new(vec![door]));

    player
}

/// Seeded random input вместо engine bridge
fn drive_random_input(world: &mut World, player: Entity) {
    let (horizontal, jump) = {
        let mut rng = world.resource_mut::<DeterministicRng>();
        (rng.rng.gen_range(-1.0..=1.0_f32), rng.rng.gen_bool(0.05))
    };

    if let Some(mut input) = world.get_mut::<PlayerInput>(player) {
        input.horizontal = horizontal;
        if jump {
            input.press_jump();
        } else {
            input.release_jump();
        }
    }
}
