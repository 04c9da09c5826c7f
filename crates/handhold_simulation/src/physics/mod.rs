//! Physics module
//!
//! Headless integrator для rapier-компонентов (Velocity, ExternalImpulse, GravityScale).
//! В engine-сборке вместо него работает RapierPhysicsPlugin, наши системы идут
//! в SimulationSet до physics step.

use bevy::prelude::*;

pub mod headless;

// Re-export основных типов
pub use headless::{body_mass, HeadlessPhysicsConfig, GROUND_EPSILON};

use crate::SimulationSet;

/// Plugin headless физики
///
/// Регистрирует все системы в FixedUpdate (SimulationSet::Physics) для детерминизма.
pub struct HeadlessPhysicsPlugin;

impl Plugin for HeadlessPhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HeadlessPhysicsConfig>();

        app.add_systems(
            FixedUpdate,
            (
                headless::apply_impulses,
                headless::apply_gravity,
                headless::integrate_velocity,
                headless::resolve_floor,
            )
                .chain() // Последовательное выполнение
                .in_set(SimulationSet::Physics),
        );
    }
}
