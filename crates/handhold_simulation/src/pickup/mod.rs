//! Pickup domain: pickup / drop / throw coordinator
//!
//! # Architecture
//!
//! **State machine на holder'е:** Idle (`ItemHolder.held == None`) ↔ Holding.
//!
//! **Events → Systems flow:**
//! - Input mapping / скрипты пишут `PickupCommand`
//! - `process_pickup_commands` меняет body item'а (groups, gravity, mass)
//! - `ItemPickedUp` / `ItemReleased` → engine bridge
//!
//! **Holding (каждый fixed tick):** pull к HoldAnchor, held ↔ overhead groups.

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod selection;
pub mod systems;


pub use components::*;
pub use events::*;
pub use selection::{select_nearest, held_layer_for, move_towards_angle};

use crate::SimulationSet;

/// Pickup Plugin
///
/// FixedUpdate:
/// - SimulationSet::Input: map_pickup_input
/// - SimulationSet::Interaction: range → commands → orphans → pull → layers
///
/// Update: aim_hold_anchors
pub struct PickupPlugin;

impl Plugin for PickupPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PickupConfig>()
            .add_event::<PickupCommand>()
            .add_event::<ItemPickedUp>()
            .add_event::<ItemReleased>();

        app.add_systems(
            FixedUpdate,
            systems::map_pickup_input.in_set(SimulationSet::Input),
        );

        app.add_systems(
            FixedUpdate,
            (
                systems::track_pickup_range,
                systems::process_pickup_commands,
                systems::release_orphaned_items,
                systems::pull_held_items,
                systems::update_held_layers,
            )
                .chain()
                .in_set(SimulationSet::Interaction),
        );

        app.add_systems(Update, systems::aim_hold_anchors);
    }
}
