//! Pickup events
//!
//! `PickupCommand`: intent от input mapping (или AI/скриптов).
//! `ItemPickedUp` / `ItemReleased`: результат, для engine bridge (звук, анимация руки).

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupAction {
    /// Поднять ближайший item в радиусе
    PickUp,
    /// Положить текущий item
    Drop,
    /// Бросить текущий item в сторону anchor
    Throw,
}

/// Intent: holder выполняет pickup/drop/throw
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickupCommand {
    pub holder: Entity,
    pub action: PickupAction,
}

/// Item поднят
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemPickedUp {
    pub holder: Entity,
    pub item: Entity,
}

/// Item отпущен (drop или throw)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemReleased {
    pub holder: Entity,
    pub item: Entity,
    pub thrown: bool,
}
