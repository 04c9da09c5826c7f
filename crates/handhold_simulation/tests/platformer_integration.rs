//! Integration тесты: полный SimulationPlugin + HeadlessPhysicsPlugin
//!
//! Engine bridge имитируется напрямую: PlayerInput и SensorEvent пишутся тестом.

use bevy::prelude::*;
use bevy_rapier2d::prelude::{ExternalImpulse, GravityScale, RigidBody, Velocity};
use handhold_simulation::level::{LevelFlag, PressurePlate};
use handhold_simulation::pickup::{HeldBy, HoldAnchor, ItemHolder, Pickup, PickupRadius};
use handhold_simulation::scripted_motion::DoorPose;
use handhold_simulation::time_scale::PauseState;
use handhold_simulation::*;

fn spawn_player(app: &mut App, position: Vec3) -> Entity {
    app.world_mut()
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
            Tagged(ContactTag::Player),
            Transform::from_translation(position),
        ))
        .id()
}

fn run_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.update();
    }
}

fn read_events<E: Event + Clone>(app: &App) -> Vec<E> {
    let events = app.world().resource::<Events<E>>();
    let mut cursor = events.get_cursor();
    cursor.read(events).cloned().collect()
}

#[test]
fn test_player_falls_lands_and_runs() {
    let mut app = create_headless_app(1);
    let player = spawn_player(&mut app, Vec3::new(0.0, 2.0, 0.0));
    app.world_mut().get_mut::<PlayerInput>(player).unwrap().horizontal = 1.0;

    run_ticks(&mut app, 120);

    let motion = app.world().get::<CharacterMotion>(player).unwrap();
    let transform = app.world().get::<Transform>(player).unwrap();
    assert!(motion.grounded, "Игрок должен стоять на полу");
    assert!(transform.translation.y.abs() < 0.01);
    assert!(transform.translation.x > 1.0, "Игрок должен бежать вправо: {}", transform.translation.x);
}

#[test]
fn test_player_jumps_from_ground() {
    let mut app = create_headless_app(2);
    let player = spawn_player(&mut app, Vec3::ZERO);
    run_ticks(&mut app, 5);
    assert!(app.world().get::<CharacterMotion>(player).unwrap().grounded);

    app.world_mut().get_mut::<PlayerInput>(player).unwrap().press_jump();

    let mut max_height: f32 = 0.0;
    for _ in 0..40 {
        app.update();
        let y = app.world().get::<Transform>(player).unwrap().translation.y;
        max_height = max_height.max(y);
    }

    assert!(max_height > 0.5, "Прыжок слишком низкий: {}", max_height);
}

#[test]
fn test_pickup_then_throw_restores_body() {
    let mut app = create_headless_app(3);
    let player = spawn_player(&mut app, Vec3::ZERO);
    let radius = app.world_mut().spawn(PickupRadius { owner: player }).id();
    let item = app
        .world_mut()
        .spawn((
            Pickup,
            RigidBody::Dynamic,
            Velocity::zero(),
            GravityScale(1.5),
            Transform::from_xyz(0.5, 0.0, 0.0),
        ))
        .id();
    run_ticks(&mut app, 2);

    app.world_mut().send_event(SensorEvent::Enter {
        sensor: radius,
        other: item,
        tag: ContactTag::Pickup,
    });
    app.world_mut().get_mut::<PlayerInput>(player).unwrap().interact_pressed = true;
    run_ticks(&mut app, 3);

    assert_eq!(app.world().get::<ItemHolder>(player).unwrap().held, Some(item));
    assert_eq!(app.world().get::<HeldBy>(item).unwrap().holder, player);
    assert_eq!(app.world().get::<GravityScale>(item).unwrap().0, 0.0);

    app.world_mut().get_mut::<PlayerInput>(player).unwrap().throw_pressed = true;
    run_ticks(&mut app, 2);

    assert_eq!(app.world().get::<ItemHolder>(player).unwrap().held, None);
    assert!(app.world().get::<HeldBy>(item).is_none());
    assert_eq!(app.world().get::<GravityScale>(item).unwrap().0, 1.5);
}

#[test]
fn test_pause_freezes_and_resume_restores_body() {
    let mut app = create_headless_app(4);
    let body = app
        .world_mut()
        .spawn((
            RigidBody::Dynamic,
            Velocity::linear(Vec2::new(1.0, 0.0)),
            GravityScale(0.0),
            TimeScaledBody::default(),
            Transform::default(),
        ))
        .id();
    run_ticks(&mut app, 2);
    assert_eq!(app.world().resource::<TimeMultiplierRegistry>().len(), 1);

    app.world_mut().send_event(PauseCommand::Pause);
    run_ticks(&mut app, 3);

    assert!(app.world().resource::<PauseState>().paused);
    assert_eq!(
        *app.world().get::<RigidBody>(body).unwrap(),
        RigidBody::KinematicPositionBased
    );
    let frozen_x = app.world().get::<Transform>(body).unwrap().translation.x;
    run_ticks(&mut app, 10);
    assert_eq!(app.world().get::<Transform>(body).unwrap().translation.x, frozen_x);

    app.world_mut().send_event(PauseCommand::Resume);
    run_ticks(&mut app, 3);

    assert_eq!(*app.world().get::<RigidBody>(body).unwrap(), RigidBody::Dynamic);
    assert_eq!(
        app.world().get::<Velocity>(body).unwrap().linvel,
        Vec2::new(1.0, 0.0)
    );
    assert!(app.world().get::<Transform>(body).unwrap().translation.x > frozen_x);
}

#[test]
fn test_plate_opens_door() {
    let mut app = create_headless_app(5);
    let open = DoorPose {
        position: Vec2::new(0.0, 3.0),
        rotation_deg: 0.0,
    };
    let door = app
        .world_mut()
        .spawn((Door::new(DoorPose::default(), open), Transform::default()))
        .id();
    let plate = app.world_mut().spawn(PressurePlate::new(vec![door])).id();
    let player = spawn_player(&mut app, Vec3::ZERO);
    run_ticks(&mut app, 2);

    // Bridge берёт tag из Tagged компонента вошедшего entity
    let tag = app.world().get::<Tagged>(player).unwrap().0;
    app.world_mut().send_event(SensorEvent::Enter {
        sensor: plate,
        other: player,
        tag,
    });
    // move_duration 0.25s = 13 тиков с запасом
    run_ticks(&mut app, 30);

    let transform = app.world().get::<Transform>(door).unwrap();
    assert!((transform.translation.y - 3.0).abs() < 1e-3);
    assert!(!app.world().get::<Door>(door).unwrap().is_moving());
}

#[test]
fn test_flag_requests_next_level() {
    let mut app = create_headless_app(6);
    app.insert_resource(SceneInfo::new("Level_1"));
    let flag = app.world_mut().spawn(LevelFlag).id();
    let player = spawn_player(&mut app, Vec3::ZERO);
    run_ticks(&mut app, 2);

    app.world_mut().send_event(SensorEvent::Enter {
        sensor: flag,
        other: player,
        tag: ContactTag::Player,
    });
    app.update();

    assert_eq!(
        read_events::<LevelCompleted>(&app),
        vec![LevelCompleted {
            next_scene: Some("Level_2".to_string())
        }]
    );
    assert!(app.world().resource::<SceneInfo>().completed);
}
