//! Player компоненты: marker + input snapshot от engine bridge

use bevy::prelude::*;

/// Marker component для player-controlled entity
///
/// Input systems используют `With<Player>` filter.
/// Pressure plates / level flags проверяют его через `ContactTag::Player`.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Player;

/// Input snapshot игрока (заполняется engine bridge каждый frame)
///
/// Архитектура:
/// - Engine опрашивает оси/кнопки в frame tick и пишет сюда
/// - "pressed" флаги: latched: взводятся bridge'ем, сбрасываются системой-потребителем
/// - "held" флаги: уровень кнопки на момент последнего опроса
///
/// Для headless тестов: mock input напрямую через этот компонент.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct PlayerInput {
    /// Ось "Horizontal" (-1..1, raw)
    pub horizontal: f32,
    /// "Jump" нажат (edge). Потребляется fixed tick'ом движения
    pub jump_pressed: bool,
    /// "Jump" удерживается
    pub jump_held: bool,
    /// E: pickup / drop (edge)
    pub interact_pressed: bool,
    /// Mouse 0: throw (edge)
    pub throw_pressed: bool,
    /// Escape: pause toggle (edge)
    pub pause_pressed: bool,
    /// R: restart level (edge)
    pub restart_pressed: bool,
    /// Точка прицеливания (мышь) в world space
    pub aim_world: Vec2,
    /// Разрешено ли двигаться (катсцены/диалоги выключают)
    pub allow_movement: bool,
}

impl Default for PlayerInput {
    fn default() -> Self {
        Self {
            horizontal: 0.0,
            jump_pressed: false,
            jump_held: false,
            interact_pressed: false,
            throw_pressed: false,
            pause_pressed: false,
            restart_pressed: false,
            aim_world: Vec2::ZERO,
            allow_movement: true,
        }
    }
}

impl PlayerInput {
    /// Взвести jump (bridge вызывает на "Jump" down)
    pub fn press_jump(&mut self) {
        if self.allow_movement {
            self.jump_pressed = true;
        }
        self.jump_held = true;
    }

    /// Отпустить jump
    pub fn release_jump(&mut self) {
        self.jump_held = false;
    }
}
