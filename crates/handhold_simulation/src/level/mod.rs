//! Level domain: activators, receivers, progression
//!
//! # Architecture
//!
//! **Activator → Receiver:**
//! - PressurePlate слушает SensorEvent (Player / Pickup)
//! - На смене нажата/отпущена шлёт `ReceiverSignal` своим receivers
//! - `dispatch_receiver_signals::<R>` вызывает `Receiver::activated/deactivated`
//!
//! **Progression:**
//! - LevelFlag + Player → `LevelCompleted { next_scene }`
//! - R → `RestartRequested { scene }`

use bevy::prelude::*;

pub mod plate;
pub mod progression;
pub mod receiver;

#[cfg(test)]
mod level_tests;

pub use plate::PressurePlate;
pub use progression::{derive_next_level, LevelCompleted, LevelFlag, RestartRequested, SceneInfo};
pub use receiver::{PlatformSwitch, Receiver, ReceiverSignal};

use crate::scripted_motion::Door;
use crate::SimulationSet;

/// Level Plugin
///
/// FixedUpdate (SimulationSet::Interaction): plates → receivers → flags.
/// Update: restart input.
pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneInfo>()
            .add_event::<ReceiverSignal>()
            .add_event::<LevelCompleted>()
            .add_event::<RestartRequested>();

        app.add_systems(
            FixedUpdate,
            (
                plate::update_pressure_plates,
                receiver::dispatch_receiver_signals::<Door>,
                receiver::dispatch_receiver_signals::<PlatformSwitch>,
                receiver::apply_platform_switches,
                progression::detect_level_completion,
            )
                .chain()
                .in_set(SimulationSet::Interaction),
        );

        app.add_systems(Update, progression::map_restart_input);
    }
}
