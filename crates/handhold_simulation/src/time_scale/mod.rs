//! Time-scale domain: глобальный time multiplier (pause / slow-mo)
//!
//! Содержит:
//! - TimeAffected trait + TimeMultiplierRegistry (registry.rs)
//! - TimeScaledBody: freeze/resume physics body (body.rs)
//! - PauseState / ScreenFade / PauseCommand (pause.rs)

use bevy::prelude::*;

pub mod body;
pub mod pause;
pub mod registry;


pub use body::{sync_time_scaled_bodies, FrozenBody, TimeScaledBody};
pub use pause::{PauseCommand, PauseConfig, PauseState, ScreenFade};
pub use registry::{
    SetTimeMultiplier, TimeAffected, TimeAffectedAppExt, TimeAffectedKind, TimeAffectedKinds, TimeHandle,
    TimeMultiplierRegistry,
};

use crate::SimulationSet;

/// Time-scale Plugin
///
/// - PostStartup: register_time_affected_entities (сцена уже заспавнена)
/// - Update: Escape → pause commands → broadcast → fade (real time)
/// - FixedUpdate (SimulationSet::TimeScale): freeze/resume bodies
pub struct TimeScalePlugin;

impl Plugin for TimeScalePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TimeMultiplierRegistry>()
            .init_resource::<PauseState>()
            .init_resource::<ScreenFade>()
            .init_resource::<PauseConfig>()
            .add_event::<SetTimeMultiplier>()
            .add_event::<PauseCommand>()
            .register_time_affected::<TimeScaledBody>();

        app.add_systems(PostStartup, registry::register_time_affected_entities);

        app.add_systems(
            Update,
            (
                pause::map_pause_input,
                pause::handle_pause_commands,
                registry::apply_time_multiplier_requests,
                pause::advance_screen_fade,
            )
                .chain(),
        );

        app.add_systems(
            FixedUpdate,
            sync_time_scaled_bodies.in_set(SimulationSet::TimeScale),
        );
    }
}
