//! Тесты детерминизма
//!
//! Одинаковый seed → одинаковый input → идентичный мир

use bevy::prelude::*;
use bevy_rapier2d::prelude::{ExternalImpulse, GravityScale, RigidBody, Velocity};
use handhold_simulation::pickup::{HoldAnchor, ItemHolder, Pickup, PickupRadius};
use handhold_simulation::scripted_motion::PathTiming;
use handhold_simulation::{
    create_headless_app, world_snapshot, CharacterMotion, DeterministicRng, InputBuffer, JumpConfig,
    OscillatingPath, Player, PlayerInput, TimeScaledBody,
};
use rand::Rng;

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;
    const TICK_COUNT: usize = 500;

    let snapshot1 = run_simulation(SEED, TICK_COUNT);
    let snapshot2 = run_simulation(SEED, TICK_COUNT);

    assert_eq!(
        snapshot1, snapshot2,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;
    const TICK_COUNT: usize = 300;

    // Запускаем 3 раза: все должны быть идентичны
    let snapshots: Vec<_> = (0..3).map(|_| run_simulation(SEED, TICK_COUNT)).collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(snapshots[0], *snapshot, "Прогон {} дал результат отличный от прогона 0", i);
    }
}

#[test]
fn test_different_seeds_diverge() {
    // Разный random input → разные траектории игрока
    let snapshot1 = run_simulation(1, 300);
    let snapshot2 = run_simulation(2, 300);

    assert_ne!(snapshot1, snapshot2);
}

/// Запускает симуляцию со случайным (seeded) input и возвращает snapshot Transform'ов
fn run_simulation(seed: u64, tick_count: usize) -> Vec<u8> {
    let mut app = create_headless_app(seed);
    let world = app.world_mut();

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
            Transform::from_xyz(0.0, 1.0, 0.0),
        ))
        .id();
    world.spawn(PickupRadius { owner: player });

    for i in 0..4 {
        world.spawn((
            Pickup,
            RigidBody::Dynamic,
            Velocity::zero(),
            GravityScale(1.0),
            TimeScaledBody::default(),
            Transform::from_xyz(2.0 + i as f32, 3.0, 0.0),
        ));
    }

    world.spawn((
        OscillatingPath::new(Vec2::new(-3.0, 2.0), Vec2::new(3.0, 2.0), PathTiming::default()),
        Transform::from_xyz(-3.0, 2.0, 0.0),
    ));

    for _ in 0..tick_count {
        let (horizontal, jump, aim) = {
            let mut rng = app.world_mut().resource_mut::<DeterministicRng>();
            let horizontal = rng.rng.gen_range(-1.0..=1.0_f32);
            let jump = rng.rng.gen_bool(0.1);
            let aim = Vec2::new(rng.rng.gen_range(-5.0..5.0), rng.rng.gen_range(-5.0..5.0));
            (horizontal, jump, aim)
        };

        if let Some(mut input) = app.world_mut().get_mut::<PlayerInput>(player) {
            input.horizontal = horizontal;
            input.aim_world = aim;
            if jump {
                input.press_jump();
            } else {
                input.release_jump();
            }
        }

        app.update();
    }

    world_snapshot::<Transform>(app.world_mut())
}
