//! Jump assist + custom gravity (чистая логика, без ECS)
//!
//! Порядок одного fixed tick:
//! 1. coyote timer (grounded → max, иначе decay)
//! 2. jump buffer (press → max, иначе decay)
//! 3. прыжок если buffer > 0 && (grounded || coyote > 0)
//! 4. выбор gravity scale по фазе полёта
//!
//! Системы в `systems.rs` только переносят данные physics body ↔ эти функции.

use super::components::{InputBuffer, JumpConfig};

/// Порог |vy| ниже которого считаем персонажа "у вершины"
pub const APEX_VELOCITY_EPSILON: f32 = 0.01;

impl InputBuffer {
    /// Grounded → coyote = max, иначе уменьшаем (не ниже 0)
    pub fn tick_coyote(&mut self, grounded: bool, coyote_time: f32, dt: f32) {
        if grounded {
            self.coyote_remaining = coyote_time;
        } else {
            self.coyote_remaining = (self.coyote_remaining - dt).max(0.0);
        }
    }

    /// Press → buffer = max, иначе уменьшаем (не ниже 0)
    pub fn tick_jump_buffer(&mut self, jump_pressed: bool, buffer_time: f32, dt: f32) {
        if jump_pressed {
            self.jump_buffer_remaining = buffer_time;
        } else {
            self.jump_buffer_remaining = (self.jump_buffer_remaining - dt).max(0.0);
        }
    }

    pub fn can_jump(&self, grounded: bool) -> bool {
        self.jump_buffer_remaining > 0.0 && (grounded || self.coyote_remaining > 0.0)
    }

    /// Прыжок съедает оба окна
    pub fn consume_jump(&mut self) {
        self.jump_buffer_remaining = 0.0;
        self.coyote_remaining = 0.0;
    }
}

/// Фаза полёта для выбора gravity scale (взаимоисключающие, покрывают все случаи)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GravityPhase {
    Grounded,
    /// vy < -ε
    Falling,
    /// vy > +ε и jump удерживается
    Hang,
    /// vy > +ε и jump отпущен
    LowJump,
    /// |vy| ≤ ε в воздухе
    Apex,
}

impl GravityPhase {
    pub fn classify(grounded: bool, vertical_velocity: f32, jump_held: bool) -> Self {
        if grounded {
            GravityPhase::Grounded
        } else if vertical_velocity < -APEX_VELOCITY_EPSILON {
            GravityPhase::Falling
        } else if vertical_velocity > APEX_VELOCITY_EPSILON {
            if jump_held {
                GravityPhase::Hang
            } else {
                GravityPhase::LowJump
            }
        } else {
            GravityPhase::Apex
        }
    }

    pub fn gravity_scale(&self, config: &JumpConfig) -> f32 {
        let base = config.base_gravity_scale;
        match self {
            GravityPhase::Grounded | GravityPhase::Apex => base,
            GravityPhase::Falling => base * config.fall_multiplier,
            GravityPhase::Hang => base * config.hang_multiplier,
            GravityPhase::LowJump => base * config.low_jump_multiplier,
        }
    }
}

pub fn select_gravity_scale(
    grounded: bool,
    vertical_velocity: f32,
    jump_held: bool,
    config: &JumpConfig,
) -> f32 {
    GravityPhase::classify(grounded, vertical_velocity, jump_held).gravity_scale(config)
}

/// Входы одного тика
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpTickInput {
    pub grounded: bool,
    pub vertical_velocity: f32,
    pub jump_pressed: bool,
    pub jump_held: bool,
    pub dt: f32,
}

/// Результат тика: что записать обратно в body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpTickOutput {
    pub grounded: bool,
    pub vertical_velocity: f32,
    pub gravity_scale: f32,
    /// One-shot импульс вверх (Some только в тик прыжка)
    pub impulse: Option<f32>,
}

/// Один fixed tick jump state machine
pub fn step_jump(buffer: &mut InputBuffer, input: JumpTickInput, config: &JumpConfig) -> JumpTickOutput {
    let mut grounded = input.grounded;
    let mut vertical_velocity = input.vertical_velocity;
    let mut impulse = None;

    buffer.tick_coyote(grounded, config.coyote_time, input.dt);
    buffer.tick_jump_buffer(input.jump_pressed, config.jump_buffer_time, input.dt);

    if buffer.can_jump(grounded) {
        buffer.consume_jump();
        grounded = false;
        // Сбрасываем vy чтобы высота прыжка не зависела от скорости падения
        vertical_velocity = 0.0;
        impulse = Some(config.jump_impulse);
    }

    let gravity_scale = select_gravity_scale(grounded, vertical_velocity, input.jump_held, config);

    JumpTickOutput {
        grounded,
        vertical_velocity,
        gravity_scale,
        impulse,
    }
}

/// Critically damped сглаживание (SmoothDamp без ограничения скорости)
///
/// `current_velocity`: внутреннее состояние сглаживания, живёт между тиками.
pub fn smooth_damp(current: f32, target: f32, current_velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(0.0001);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*current_velocity + omega * change) * dt;
    *current_velocity = (*current_velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;

    // Не перелетаем target
    if (target - current > 0.0) == (output > target) {
        output = target;
        *current_velocity = 0.0;
    }

    output
}
