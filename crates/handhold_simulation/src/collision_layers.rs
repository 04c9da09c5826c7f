//! Collision Layers Constants
//!
//! Rapier collision groups: centralised constants для всего проекта.
//!
//! ## Архитектура:
//! - **Memberships (битовая маска):** На каком слое находится объект
//! - **Filters (битовая маска):** С какими слоями объект коллидирует
//!
//! ## Layers:
//! - GROUP_1: Players
//! - GROUP_2: Environment (ground, walls, platforms, doors)
//! - GROUP_3: Pickups (свободно лежащие предметы)
//! - GROUP_4: Held (предмет в руках: не толкает своего holder'а)
//! - GROUP_5: Overhead (предмет в руках выше holder'а: пролетает над ним)
//!
//! ## Использование:
//! ```rust,ignore
//! use handhold_simulation::collision_layers::*;
//!
//! commands.spawn((RigidBody::Dynamic, pickup_groups()));
//! ```

use bevy_rapier2d::prelude::{CollisionGroups, Group};

// ============================================================================
// Layer битовые маски (на каком слое объект находится)
// ============================================================================

/// Players (character bodies)
pub const COLLISION_LAYER_PLAYERS: Group = Group::GROUP_1;

/// Environment (ground, walls, moving platforms, doors)
pub const COLLISION_LAYER_ENVIRONMENT: Group = Group::GROUP_2;

/// Pickups лежащие в мире
pub const COLLISION_LAYER_PICKUPS: Group = Group::GROUP_3;

/// Pickup в руках игрока
pub const COLLISION_LAYER_HELD: Group = Group::GROUP_4;

/// Pickup в руках, поднятый выше holder'а
pub const COLLISION_LAYER_OVERHEAD: Group = Group::GROUP_5;

// ============================================================================
// Группы (memberships + filters)
// ============================================================================

/// Players: environment + pickups (held/overhead НЕ в маске)
pub fn player_groups() -> CollisionGroups {
    CollisionGroups::new(
        COLLISION_LAYER_PLAYERS,
        COLLISION_LAYER_ENVIRONMENT | COLLISION_LAYER_PICKUPS,
    )
}

/// Environment коллайдит со всеми
pub fn environment_groups() -> CollisionGroups {
    CollisionGroups::new(COLLISION_LAYER_ENVIRONMENT, Group::ALL)
}

/// Лежащий pickup: players + environment + другие pickups
pub fn pickup_groups() -> CollisionGroups {
    CollisionGroups::new(
        COLLISION_LAYER_PICKUPS,
        COLLISION_LAYER_PLAYERS | COLLISION_LAYER_ENVIRONMENT | COLLISION_LAYER_PICKUPS,
    )
}

/// Held: environment + pickups, игроки игнорируются
pub fn held_groups() -> CollisionGroups {
    CollisionGroups::new(
        COLLISION_LAYER_HELD,
        COLLISION_LAYER_ENVIRONMENT | COLLISION_LAYER_PICKUPS,
    )
}

/// Overhead: только environment (проходит над holder'ом и стопкой pickups)
pub fn overhead_groups() -> CollisionGroups {
    CollisionGroups::new(COLLISION_LAYER_OVERHEAD, COLLISION_LAYER_ENVIRONMENT)
}

/// Название слоя для debug логов
pub fn get_layer_name(groups: &CollisionGroups) -> &'static str {
    let memberships = groups.memberships;
    if memberships == COLLISION_LAYER_PLAYERS {
        "Players"
    } else if memberships == COLLISION_LAYER_ENVIRONMENT {
        "Environment"
    } else if memberships == COLLISION_LAYER_PICKUPS {
        "Pickups"
    } else if memberships == COLLISION_LAYER_HELD {
        "Held"
    } else if memberships == COLLISION_LAYER_OVERHEAD {
        "Overhead"
    } else {
        "Unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_layer_ignores_players() {
        let held = held_groups();
        assert!(!held.filters.contains(COLLISION_LAYER_PLAYERS));
        assert!(!player_groups().filters.contains(COLLISION_LAYER_HELD));
    }

    #[test]
    fn test_overhead_only_hits_environment() {
        let overhead = overhead_groups();
        assert_eq!(overhead.filters, COLLISION_LAYER_ENVIRONMENT);
        assert_eq!(get_layer_name(&overhead), "Overhead");
    }
}
