//! Pickup компоненты
//!
//! Held-item link двусторонний:
//! - holder: `ItemHolder.held = Some(item)`
//! - item: `HeldBy { holder }` + `PickupRestore` (состояние до pickup)
//!
//! Инвариант: item держит не больше одного holder'а, holder: не больше одного item.

use bevy::prelude::*;
use bevy_rapier2d::prelude::{AdditionalMassProperties, CollisionGroups, GravityScale};
use serde::{Deserialize, Serialize};

/// Marker: предмет можно поднять
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Pickup;

/// Item сейчас в руках у `holder`
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeldBy {
    pub holder: Entity,
}

/// Состояние physics body до pickup (восстанавливается при drop/throw)
///
/// `None`: компонента не было, при restore он удаляется.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PickupRestore {
    pub groups: Option<CollisionGroups>,
    pub gravity: Option<GravityScale>,
    pub mass: Option<AdditionalMassProperties>,
}

/// Holder (игрок): текущий item + кандидаты в радиусе
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct ItemHolder {
    pub held: Option<Entity>,
    /// Pickups внутри PickupRadius, в порядке входа (без дубликатов)
    pub in_range: Vec<Entity>,
}

impl ItemHolder {
    pub fn is_holding(&self) -> bool {
        self.held.is_some()
    }

    pub fn add_candidate(&mut self, item: Entity) {
        if !self.in_range.contains(&item) {
            self.in_range.push(item);
        }
    }

    pub fn remove_candidate(&mut self, item: Entity) {
        self.in_range.retain(|candidate| *candidate != item);
    }
}

/// Точка удержания item (вращается вокруг holder'а за прицелом)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct HoldAnchor {
    /// Текущий угол (градусы, 0 = вправо)
    pub angle_deg: f32,
    /// Радиус от центра holder'а
    pub hold_offset: f32,
    /// Скорость поворота (градусы/сек)
    pub turn_speed: f32,
    /// Позиция anchor в world space (пересчитывается каждый frame)
    pub position: Vec2,
}

impl Default for HoldAnchor {
    fn default() -> Self {
        Self {
            angle_deg: 0.0,
            hold_offset: 0.75,
            turn_speed: 720.0,
            position: Vec2::new(0.75, 0.0),
        }
    }
}

/// Sensor-радиус подбора, принадлежит `owner` (holder)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickupRadius {
    pub owner: Entity,
}

/// Pickup tunables
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupConfig {
    /// Сила притяжения к anchor (и множитель lerp factor)
    pub pull_strength: f32,
    /// Импульс броска
    pub throw_force: f32,
    /// Масса item пока он в руках
    pub held_mass: f32,
    /// Множитель текущей скорости перед броском (1.0 = без гашения)
    pub throw_velocity_damping: f32,
    /// Сдвиг item без velocity body при броске
    pub throw_nudge: f32,
}

impl Default for PickupConfig {
    fn default() -> Self {
        Self {
            pull_strength: 20.0,
            throw_force: 12.0,
            held_mass: 0.1,
            throw_velocity_damping: 1.0,
            throw_nudge: 0.5,
        }
    }
}
