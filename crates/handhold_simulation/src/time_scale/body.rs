//! TimeScaledBody: physics body, реагирующий на time multiplier
//!
//! multiplier == 0 → freeze: body → KinematicPositionBased, velocity кэшируется.
//! multiplier == 1 → resume: cached velocity + body type восстанавливаются (один раз).
//! Остальные значения: потребители (pull, integrator) масштабируют сами, без кэша.

use bevy::prelude::*;
use bevy_rapier2d::prelude::{RigidBody, Velocity};

use super::registry::TimeAffected;

/// Состояние body до freeze
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrozenBody {
    pub velocity: Velocity,
    pub body: RigidBody,
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct TimeScaledBody {
    multiplier: f32,
    frozen: Option<FrozenBody>,
}

impl Default for TimeScaledBody {
    fn default() -> Self {
        Self {
            multiplier: 1.0,
            frozen: None,
        }
    }
}

impl TimeScaledBody {
    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    pub fn frozen(&self) -> Option<FrozenBody> {
        self.frozen
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.is_some()
    }

    /// Применить текущий multiplier к body
    ///
    /// Возвращает true если body был заморожен или разморожен этим вызовом.
    pub fn sync_body(&mut self, body: &mut RigidBody, velocity: &mut Velocity) -> bool {
        if self.multiplier == 0.0 {
            if self.frozen.is_some() {
                return false;
            }
            self.frozen = Some(FrozenBody {
                velocity: *velocity,
                body: *body,
            });
            *body = RigidBody::KinematicPositionBased;
            *velocity = Velocity::zero();
            return true;
        }

        if self.multiplier == 1.0 {
            if let Some(frozen) = self.frozen.take() {
                *body = frozen.body;
                *velocity = frozen.velocity;
                return true;
            }
        }

        false
    }

    /// Обнулить cached velocity замороженного body (body type остаётся в кэше)
    ///
    /// Pickup во время паузы: resume должен вернуть Dynamic, но без старой скорости.
    pub fn zero_frozen_velocity(&mut self) -> bool {
        match self.frozen.as_mut() {
            Some(frozen) => {
                frozen.velocity = Velocity::zero();
                true
            }
            None => false,
        }
    }
}

impl TimeAffected for TimeScaledBody {
    fn time_multiplier(&self) -> f32 {
        self.multiplier
    }

    fn set_time_multiplier(&mut self, multiplier: f32) {
        self.multiplier = multiplier;
    }
}

/// System: freeze / resume bodies после смены multiplier
pub fn sync_time_scaled_bodies(
    mut bodies: Query<(Entity, &mut TimeScaledBody, &mut RigidBody, &mut Velocity), Changed<TimeScaledBody>>,
) {
    for (entity, mut scaled, mut body, mut velocity) in bodies.iter_mut() {
        // bypass: собственная запись кэша не должна снова триггерить Changed
        if scaled.bypass_change_detection().sync_body(&mut body, &mut velocity) {
            crate::log(&format!(
                "⏱️ {:?} body {} (multiplier {})",
                entity,
                if scaled.is_frozen() { "frozen" } else { "resumed" },
                scaled.multiplier()
            ));
        }
    }
}
