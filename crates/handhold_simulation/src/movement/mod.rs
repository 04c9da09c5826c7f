//! Movement domain: character controller
//!
//! Содержит:
//! - CharacterMotion / InputBuffer / JumpConfig (компоненты)
//! - jump assist (coyote time + jump buffer) и custom gravity (чистая логика)
//! - JumpPerformed / Landed (events)
//!
//! Physics body authoritative для velocity: мы только "подталкиваем" Velocity,
//! GravityScale и ExternalImpulse, интеграция: в rapier (или headless integrator).

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod jump;
pub mod systems;


pub use components::*;
pub use events::*;
pub use jump::{select_gravity_scale, smooth_damp, step_jump, GravityPhase, JumpTickInput, JumpTickOutput};

use crate::SimulationSet;

/// Movement Plugin
///
/// Порядок выполнения (FixedUpdate, SimulationSet::Movement):
/// 1. detect_landing: Landed edge от ground detection прошлого тика
/// 2. apply_character_movement: горизонталь, прыжок, gravity scale
pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<JumpPerformed>().add_event::<Landed>();

        app.add_systems(
            FixedUpdate,
            (systems::detect_landing, systems::apply_character_movement)
                .chain()
                .in_set(SimulationSet::Movement),
        );
    }
}
