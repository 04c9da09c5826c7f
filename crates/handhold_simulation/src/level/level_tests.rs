//! Tests for pressure plates, receivers and level progression.

#[cfg(test)]
mod tests {
    use bevy::ecs::system::RunSystemOnce;
    use bevy::prelude::*;

    use crate::components::{ContactTag, Player, PlayerInput, SensorEvent};
    use crate::level::plate::update_pressure_plates;
    use crate::level::progression::{detect_level_completion, map_restart_input};
    use crate::level::receiver::{apply_platform_switches, dispatch_receiver_signals};
    use crate::level::*;
    use crate::scripted_motion::{Door, DoorPose, OscillatingPath};

    fn level_world() -> World {
        let mut world = World::new();
        world.init_resource::<Events<SensorEvent>>();
        world.init_resource::<Events<ReceiverSignal>>();
        world.init_resource::<Events<LevelCompleted>>();
        world.init_resource::<Events<RestartRequested>>();
        world
    }

    fn read_all<E: Event + Clone>(world: &World) -> Vec<E> {
        let events = world.resource::<Events<E>>();
        let mut cursor = events.get_cursor();
        cursor.read(events).cloned().collect()
    }

    fn sensor(world: &mut World, enter: bool, sensor: Entity, other: Entity, tag: ContactTag) {
        let event = if enter {
            SensorEvent::Enter { sensor, other, tag }
        } else {
            SensorEvent::Exit { sensor, other, tag }
        };
        world.send_event(event);
    }

    #[test]
    fn test_plate_signals_only_on_state_change() {
        let mut plate = PressurePlate::default();
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();

        plate.enter(a);
        assert_eq!(plate.refresh(), Some(true));
        plate.enter(b);
        assert_eq!(plate.refresh(), None);
        plate.exit(a);
        assert_eq!(plate.refresh(), None);
        plate.exit(b);
        assert_eq!(plate.refresh(), Some(false));
    }

    #[test]
    fn test_one_time_plate_never_deactivates() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let mut plate = PressurePlate::default().one_time();

        plate.enter(a);
        assert_eq!(plate.refresh(), Some(true));
        plate.exit(a);
        assert_eq!(plate.refresh(), None);
        assert!(!plate.pressed);
    }

    #[test]
    fn test_plate_opens_door_and_ignores_untagged() {
        let mut world = level_world();
        let door = world
            .spawn((
                Door::new(
                    DoorPose::default(),
                    DoorPose {
                        position: Vec2::Y,
                        rotation_deg: 0.0,
                    },
                ),
                Transform::default(),
            ))
            .id();
        let plate = world.spawn(PressurePlate::new(vec![door])).id();
        let crate_item = world.spawn_empty().id();
        let rock = world.spawn_empty().id();

        sensor(&mut world, true, plate, rock, ContactTag::Untagged);
        world.run_system_once(update_pressure_plates).unwrap();
        assert!(read_all::<ReceiverSignal>(&world).is_empty());

        sensor(&mut world, true, plate, crate_item, ContactTag::Pickup);
        world.run_system_once(update_pressure_plates).unwrap();
        world.run_system_once(dispatch_receiver_signals::<Door>).unwrap();

        assert_eq!(
            read_all::<ReceiverSignal>(&world),
            vec![ReceiverSignal {
                receiver: door,
                active: true
            }]
        );
        let door_state = world.get::<Door>(door).unwrap();
        assert!(door_state.is_activated());
        assert!(door_state.is_moving());
    }

    #[test]
    fn test_platform_switch_toggles_path() {
        let mut world = level_world();
        let mut path = OscillatingPath::default();
        path.enabled = false;
        let platform = world.spawn((path, PlatformSwitch::default())).id();

        world.send_event(ReceiverSignal {
            receiver: platform,
            active: true,
        });
        world.run_system_once(dispatch_receiver_signals::<PlatformSwitch>).unwrap();
        world.run_system_once(apply_platform_switches).unwrap();
        assert!(world.get::<OscillatingPath>(platform).unwrap().enabled);

        world.resource_mut::<Events<ReceiverSignal>>().clear();
        world.send_event(ReceiverSignal {
            receiver: platform,
            active: false,
        });
        world.run_system_once(dispatch_receiver_signals::<PlatformSwitch>).unwrap();
        world.run_system_once(apply_platform_switches).unwrap();
        assert!(!world.get::<OscillatingPath>(platform).unwrap().enabled);
    }

    #[test]
    fn test_signal_for_other_receiver_type_is_ignored() {
        let mut world = level_world();
        let switch_only = world.spawn(PlatformSwitch::default()).id();

        world.send_event(ReceiverSignal {
            receiver: switch_only,
            active: true,
        });
        world.run_system_once(dispatch_receiver_signals::<Door>).unwrap();

        assert!(!world.get::<PlatformSwitch>(switch_only).unwrap().is_activated());
    }

    #[test]
    fn test_next_level_name_derivation() {
        assert_eq!(derive_next_level("Level_1"), Some("Level_2".to_string()));
        assert_eq!(derive_next_level("Level_09"), Some("Level_10".to_string()));
        assert_eq!(derive_next_level("Tutorial"), None);
        assert_eq!(derive_next_level("Level_x"), None);

        assert_eq!(
            SceneInfo::new("Level_3").with_next("Credits").next_scene_name(),
            Some("Credits".to_string())
        );
        assert_eq!(
            SceneInfo::new("Level_3").with_next("").next_scene_name(),
            Some("Level_4".to_string())
        );
    }

    #[test]
    fn test_flag_completes_level_once_for_player() {
        let mut world = level_world();
        world.insert_resource(SceneInfo::new("Level_2"));
        let flag = world.spawn(LevelFlag).id();
        let player = world.spawn(Player).id();
        let item = world.spawn_empty().id();

        sensor(&mut world, true, flag, item, ContactTag::Pickup);
        sensor(&mut world, true, flag, player, ContactTag::Player);
        sensor(&mut world, true, flag, player, ContactTag::Player);
        world.run_system_once(detect_level_completion).unwrap();

        assert_eq!(
            read_all::<LevelCompleted>(&world),
            vec![LevelCompleted {
                next_scene: Some("Level_3".to_string())
            }]
        );
        assert!(world.resource::<SceneInfo>().completed);
    }

    #[test]
    fn test_restart_input_requests_current_scene() {
        let mut world = level_world();
        world.insert_resource(SceneInfo::new("Level_5"));
        let player = world
            .spawn((
                Player,
                PlayerInput {
                    restart_pressed: true,
                    ..default()
                },
            ))
            .id();

        world.run_system_once(map_restart_input).unwrap();

        assert_eq!(
            read_all::<RestartRequested>(&world),
            vec![RestartRequested {
                scene: "Level_5".to_string()
            }]
        );
        assert!(!world.get::<PlayerInput>(player).unwrap().restart_pressed);
    }
}
