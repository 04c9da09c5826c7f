//! PressurePlate: activator, нажатый пока на нём стоит Player или Pickup

use bevy::prelude::*;

use super::receiver::ReceiverSignal;
use crate::components::{ContactTag, SensorEvent};

#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct PressurePlate {
    /// Кто стоит на плите (по одной записи на каждый вошедший collider)
    pub occupants: Vec<Entity>,
    /// Receivers, которым плита шлёт сигналы
    pub receivers: Vec<Entity>,
    /// После первой активации деактивация не отправляется
    pub one_time: bool,
    /// Последнее отправленное состояние
    pub pressed: bool,
}

impl PressurePlate {
    pub fn new(receivers: Vec<Entity>) -> Self {
        Self {
            receivers,
            ..default()
        }
    }

    pub fn one_time(mut self) -> Self {
        self.one_time = true;
        self
    }

    pub fn enter(&mut self, entity: Entity) {
        self.occupants.push(entity);
    }

    pub fn exit(&mut self, entity: Entity) {
        if let Some(index) = self.occupants.iter().position(|occupant| *occupant == entity) {
            self.occupants.remove(index);
        }
    }

    /// Новое состояние плиты → Some(active) если нужно отправить сигнал
    pub fn refresh(&mut self) -> Option<bool> {
        let pressed = !self.occupants.is_empty();
        if pressed == self.pressed {
            return None;
        }
        self.pressed = pressed;
        if !pressed && self.one_time {
            return None;
        }
        Some(pressed)
    }
}

fn triggers_plate(tag: ContactTag) -> bool {
    matches!(tag, ContactTag::Player | ContactTag::Pickup)
}

/// SensorEvent → occupants → ReceiverSignal на смене состояния
pub fn update_pressure_plates(
    mut sensor_events: EventReader<SensorEvent>,
    mut plates: Query<(Entity, &mut PressurePlate)>,
    mut signals: EventWriter<ReceiverSignal>,
) {
    for event in sensor_events.read() {
        if !triggers_plate(event.tag()) {
            continue;
        }
        let Ok((_, mut plate)) = plates.get_mut(event.sensor()) else {
            continue;
        };
        if event.is_enter() {
            plate.enter(event.other());
        } else {
            plate.exit(event.other());
        }
    }

    for (entity, mut plate) in plates.iter_mut() {
        let Some(active) = plate.refresh() else {
            continue;
        };
        for receiver in &plate.receivers {
            signals.write(ReceiverSignal {
                receiver: *receiver,
                active,
            });
        }
        crate::log(&format!(
            "🔘 Plate {:?} {} ({} receivers)",
            entity,
            if active { "pressed" } else { "released" },
            plate.receivers.len()
        ));
    }
}
