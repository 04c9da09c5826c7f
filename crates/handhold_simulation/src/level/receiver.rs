//! Receiver capability: объекты, которые активируют activators (pressure plates)
//!
//! `ReceiverSignal` → `dispatch_receiver_signals::<R>` → `R::activated/deactivated`.
//! Реализуют: Door (открыть/закрыть), PlatformSwitch (вкл/выкл moving platform).

use bevy::ecs::component::Mutable;
use bevy::prelude::*;

use crate::scripted_motion::{Door, OscillatingPath};

/// Capability: получатель сигналов activator'а
pub trait Receiver: Component<Mutability = Mutable> {
    fn activated(&mut self);
    fn deactivated(&mut self);
    fn is_activated(&self) -> bool;
}

/// Event: activator → receiver
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiverSignal {
    pub receiver: Entity,
    pub active: bool,
}

/// Generic dispatch: один экземпляр системы на каждый тип Receiver
pub fn dispatch_receiver_signals<R: Receiver>(mut signals: EventReader<ReceiverSignal>, mut receivers: Query<&mut R>) {
    for signal in signals.read() {
        // Другой тип receiver'а (или despawned): не наш сигнал
        let Ok(mut receiver) = receivers.get_mut(signal.receiver) else {
            continue;
        };
        if signal.active {
            receiver.activated();
        } else {
            receiver.deactivated();
        }
    }
}

impl Receiver for Door {
    fn activated(&mut self) {
        self.activated = true;
        self.request(true);
    }

    fn deactivated(&mut self) {
        self.activated = false;
        self.request(false);
    }

    fn is_activated(&self) -> bool {
        self.activated
    }
}

/// Receiver, включающий/выключающий OscillatingPath того же entity
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformSwitch {
    pub activated: bool,
    /// true: активация включает движение; false: активация останавливает
    pub enable_on_activate: bool,
}

impl Default for PlatformSwitch {
    fn default() -> Self {
        Self {
            activated: false,
            enable_on_activate: true,
        }
    }
}

impl PlatformSwitch {
    pub fn movement_enabled(&self) -> bool {
        self.activated == self.enable_on_activate
    }
}

impl Receiver for PlatformSwitch {
    fn activated(&mut self) {
        self.activated = true;
    }

    fn deactivated(&mut self) {
        self.activated = false;
    }

    fn is_activated(&self) -> bool {
        self.activated
    }
}

/// PlatformSwitch → OscillatingPath.enabled
pub fn apply_platform_switches(mut platforms: Query<(&PlatformSwitch, &mut OscillatingPath), Changed<PlatformSwitch>>) {
    for (switch, mut path) in platforms.iter_mut() {
        path.enabled = switch.movement_enabled();
    }
}
