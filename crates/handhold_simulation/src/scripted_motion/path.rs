//! OscillatingPath: движение A ↔ B с паузами на концах
//!
//! Progress ∈ [0, 1] двигается на ±dt / leg_duration. На насыщении:
//! clamp → смена направления → пауза (если у конечной точки pause > 0).
//! Во время паузы progress и направление заморожены.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::easing::EaseCurve;
use crate::time_scale::TimeAffected;

/// Состояние прогресса между A и B
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathProgress {
    pub progress: f32,
    pub moving_to_b: bool,
    pub paused: bool,
    pub pause_timer: f32,
}

impl Default for PathProgress {
    fn default() -> Self {
        Self {
            progress: 0.0,
            moving_to_b: true,
            paused: false,
            pause_timer: 0.0,
        }
    }
}

/// Длительности участков и пауз (сек)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathTiming {
    pub time_a_to_b: f32,
    pub time_b_to_a: f32,
    pub pause_at_a: f32,
    pub pause_at_b: f32,
}

impl Default for PathTiming {
    fn default() -> Self {
        Self {
            time_a_to_b: 2.0,
            time_b_to_a: 2.0,
            pause_at_a: 0.0,
            pause_at_b: 0.0,
        }
    }
}

/// Результат одного шага
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStep {
    /// Progress сдвинулся
    Moved,
    /// Дошли до конечной точки (true = B), направление сменилось
    Arrived { at_b: bool },
    /// Стоим на паузе
    Paused,
    /// Длительность участка <= 0: тик пропущен
    Skipped,
}

impl PathProgress {
    /// Продвинуть progress на dt
    pub fn step(&mut self, timing: &PathTiming, dt: f32) -> PathStep {
        if self.paused {
            self.pause_timer -= dt;
            if self.pause_timer <= 0.0 {
                self.paused = false;
                self.pause_timer = 0.0;
            }
            return PathStep::Paused;
        }

        let leg_duration = if self.moving_to_b {
            timing.time_a_to_b
        } else {
            timing.time_b_to_a
        };
        if leg_duration <= 0.0 || !leg_duration.is_finite() {
            return PathStep::Skipped;
        }

        let delta = dt / leg_duration;
        self.progress += if self.moving_to_b { delta } else { -delta };

        if self.progress >= 1.0 {
            self.progress = 1.0;
            self.moving_to_b = false;
            self.enter_pause(timing.pause_at_b);
            PathStep::Arrived { at_b: true }
        } else if self.progress <= 0.0 {
            self.progress = 0.0;
            self.moving_to_b = true;
            self.enter_pause(timing.pause_at_a);
            PathStep::Arrived { at_b: false }
        } else {
            PathStep::Moved
        }
    }

    fn enter_pause(&mut self, duration: f32) {
        if duration > 0.0 {
            self.paused = true;
            self.pause_timer = duration;
        }
    }

    /// Доля пути от A к B с учётом easing текущего направления
    ///
    /// Обе кривые описывают движение "от старта к цели" в своём направлении:
    /// B→A считается от B по `1 − progress`.
    pub fn eased(&self, curve_a_to_b: &EaseCurve, curve_b_to_a: &EaseCurve) -> f32 {
        if self.moving_to_b {
            curve_a_to_b.evaluate(self.progress)
        } else {
            1.0 - curve_b_to_a.evaluate(1.0 - self.progress)
        }
    }
}

/// Чем двигается entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PathDriver {
    /// Прямая запись Transform (frame tick)
    #[default]
    Transform,
    /// Velocity kinematic body (fixed tick)
    KinematicBody,
}

/// Moving platform / patrol между A и B
#[derive(Component, Debug, Clone, PartialEq)]
pub struct OscillatingPath {
    pub point_a: Vec2,
    pub point_b: Vec2,
    pub timing: PathTiming,
    pub curve_a_to_b: EaseCurve,
    pub curve_b_to_a: EaseCurve,
    /// Флаг для скриптов / PlatformSwitch
    pub enabled: bool,
    pub driver: PathDriver,
    pub state: PathProgress,
    time_multiplier: f32,
}

impl Default for OscillatingPath {
    fn default() -> Self {
        Self {
            point_a: Vec2::ZERO,
            point_b: Vec2::ZERO,
            timing: PathTiming::default(),
            curve_a_to_b: EaseCurve::default(),
            curve_b_to_a: EaseCurve::default(),
            enabled: true,
            driver: PathDriver::default(),
            state: PathProgress::default(),
            time_multiplier: 1.0,
        }
    }
}

impl OscillatingPath {
    pub fn new(point_a: Vec2, point_b: Vec2, timing: PathTiming) -> Self {
        Self {
            point_a,
            point_b,
            timing,
            ..default()
        }
    }

    pub fn with_driver(mut self, driver: PathDriver) -> Self {
        self.driver = driver;
        self
    }

    /// Шаг с учётом enabled и time multiplier (0 → стоим)
    pub fn advance(&mut self, dt: f32) -> Option<PathStep> {
        if !self.enabled || self.time_multiplier == 0.0 {
            return None;
        }
        Some(self.state.step(&self.timing, dt * self.time_multiplier))
    }

    /// Текущая позиция на пути
    pub fn position(&self) -> Vec2 {
        let eased = self.state.eased(&self.curve_a_to_b, &self.curve_b_to_a);
        self.point_a.lerp(self.point_b, eased)
    }
}

impl TimeAffected for OscillatingPath {
    fn time_multiplier(&self) -> f32 {
        self.time_multiplier
    }

    fn set_time_multiplier(&mut self, multiplier: f32) {
        self.time_multiplier = multiplier;
    }
}
