//! Sensor (trigger) события от physics engine
//!
//! Engine bridge конвертирует intersection callbacks (rapier sensors) в `SensorEvent`.
//! ECS системы (pickup radius, pressure plates, level flag) читают только их.

use bevy::prelude::*;

/// Категория entity, вошедшего в trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum ContactTag {
    Player,
    Pickup,
    /// Всё остальное: sensors игнорируют
    Untagged,
}

/// Компонент-тег категории (для bridge: какой `ContactTag` отправлять)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Tagged(pub ContactTag);

/// Trigger enter/exit
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum SensorEvent {
    /// `other` вошёл в trigger `sensor`
    Enter {
        sensor: Entity,
        other: Entity,
        tag: ContactTag,
    },
    /// `other` вышел из trigger `sensor` (или despawned)
    Exit {
        sensor: Entity,
        other: Entity,
        tag: ContactTag,
    },
}

impl SensorEvent {
    pub fn sensor(&self) -> Entity {
        match self {
            SensorEvent::Enter { sensor, .. } | SensorEvent::Exit { sensor, .. } => *sensor,
        }
    }

    pub fn other(&self) -> Entity {
        match self {
            SensorEvent::Enter { other, .. } | SensorEvent::Exit { other, .. } => *other,
        }
    }

    pub fn tag(&self) -> ContactTag {
        match self {
            SensorEvent::Enter { tag, .. } | SensorEvent::Exit { tag, .. } => *tag,
        }
    }

    pub fn is_enter(&self) -> bool {
        matches!(self, SensorEvent::Enter { .. })
    }
}
