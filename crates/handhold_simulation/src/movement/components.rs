//! Movement компоненты: состояние персонажа, input buffer, tuning

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Направление взгляда персонажа (±1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(&self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }
}

/// Состояние движения персонажа (мутируется раз в fixed tick)
///
/// Gravity scale НЕ хранится: выводится каждый тик из grounded/velocity/jump_held
/// и пишется в `GravityScale` physics body.
/// Vertical velocity живёт в `Velocity` (physics body authoritative).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct CharacterMotion {
    /// На земле (пишет ground detection: engine bridge или headless floor)
    pub grounded: bool,
    /// grounded на прошлом тике (для Landed edge)
    pub was_grounded: bool,
    /// Куда смотрит персонаж
    pub facing: Facing,
    /// Внутренняя скорость SmoothDamp для горизонтали
    pub smoothing_velocity: f32,
}

/// Coyote time + jump buffer таймеры (секунды, ≥ 0)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct InputBuffer {
    /// Сколько ещё можно прыгнуть после схода с земли
    pub coyote_remaining: f32,
    /// Сколько ещё живёт ранний запрос прыжка
    pub jump_buffer_remaining: f32,
}

/// Tuning прыжка и гравитации (per-character)
///
/// Инвариант "hold to float, release to cut": hang_multiplier < 1 < low_jump_multiplier.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct JumpConfig {
    /// Импульс прыжка вверх (N·s)
    pub jump_impulse: f32,
    /// Окно прыжка после схода с земли (секунды)
    pub coyote_time: f32,
    /// Окно раннего нажатия до приземления (секунды)
    pub jump_buffer_time: f32,
    /// Базовый gravity scale physics body
    pub base_gravity_scale: f32,
    /// Падение быстрее
    pub fall_multiplier: f32,
    /// Отпустил jump на подъёме → короткий прыжок
    pub low_jump_multiplier: f32,
    /// Держит jump на подъёме → зависание (< 1)
    pub hang_multiplier: f32,
    /// Скорость бега (умножается на axis и fixed dt)
    pub run_speed: f32,
    /// SmoothDamp время сглаживания горизонтали (секунды)
    pub movement_smoothing: f32,
    /// Управление в воздухе
    pub air_control: bool,
}

impl Default for JumpConfig {
    fn default() -> Self {
        Self {
            jump_impulse: 8.0,
            coyote_time: 0.1,
            jump_buffer_time: 0.1,
            base_gravity_scale: 1.0,
            fall_multiplier: 2.5,
            low_jump_multiplier: 3.0,
            hang_multiplier: 0.7,
            run_speed: 40.0,
            movement_smoothing: 0.05,
            air_control: false,
        }
    }
}
