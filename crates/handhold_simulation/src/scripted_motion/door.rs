//! Door: one-shot eased переход между closed и open позами
//!
//! Каждая команда стартует движение от ТЕКУЩЕЙ позы (прерванный ход
//! продолжается плавно, без рывка в конечную точку).

use bevy::prelude::*;

use super::easing::EaseCurve;
use crate::time_scale::TimeAffected;

/// Поза двери: позиция + угол (градусы, вокруг Z)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DoorPose {
    pub position: Vec2,
    pub rotation_deg: f32,
}

impl DoorPose {
    pub fn from_transform(transform: &Transform) -> Self {
        let (_, _, z) = transform.rotation.to_euler(EulerRot::XYZ);
        Self {
            position: transform.translation.truncate(),
            rotation_deg: z.to_degrees(),
        }
    }

    pub fn lerp(&self, target: &DoorPose, t: f32) -> DoorPose {
        DoorPose {
            position: self.position.lerp(target.position, t),
            rotation_deg: self.rotation_deg + (target.rotation_deg - self.rotation_deg) * t,
        }
    }

    pub fn apply(&self, transform: &mut Transform) {
        transform.translation.x = self.position.x;
        transform.translation.y = self.position.y;
        transform.rotation = Quat::from_rotation_z(self.rotation_deg.to_radians());
    }
}

/// Активный ход двери
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoorMove {
    pub start: DoorPose,
    pub target: DoorPose,
    pub progress: f32,
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Door {
    pub closed: DoorPose,
    pub open: DoorPose,
    /// Длительность хода (сек)
    pub move_duration: f32,
    pub curve: EaseCurve,
    /// Receiver state: true после activated()
    pub activated: bool,
    /// Запрошенная цель (старт хода в следующем тике: нужна текущая поза)
    pub(crate) requested: Option<DoorPose>,
    pub(crate) movement: Option<DoorMove>,
    time_multiplier: f32,
}

impl Door {
    pub fn new(closed: DoorPose, open: DoorPose) -> Self {
        Self {
            closed,
            open,
            move_duration: 0.25,
            curve: EaseCurve::SmoothStep,
            activated: false,
            requested: None,
            movement: None,
            time_multiplier: 1.0,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.movement.is_some() || self.requested.is_some()
    }

    /// Запросить ход к open (true) или closed (false)
    pub fn request(&mut self, open: bool) {
        self.requested = Some(if open { self.open } else { self.closed });
    }

    /// Один тик двери. Возвращает новую позу (None: дверь стоит).
    pub fn tick(&mut self, current: DoorPose, dt: f32) -> Option<DoorPose> {
        if let Some(target) = self.requested.take() {
            self.movement = Some(DoorMove {
                start: current,
                target,
                progress: 0.0,
            });
        }

        let mut movement = self.movement?;
        if self.time_multiplier == 0.0 {
            return None;
        }

        if self.move_duration <= 0.0 {
            movement.progress = 1.0;
        } else {
            movement.progress += dt * self.time_multiplier / self.move_duration;
        }

        if movement.progress >= 1.0 {
            movement.progress = 1.0;
            self.movement = None;
        } else {
            self.movement = Some(movement);
        }

        let eased = self.curve.evaluate(movement.progress);
        Some(movement.start.lerp(&movement.target, eased))
    }
}

impl TimeAffected for Door {
    fn time_multiplier(&self) -> f32 {
        self.time_multiplier
    }

    fn set_time_multiplier(&mut self, multiplier: f32) {
        self.time_multiplier = multiplier;
    }
}
