//! Movement events

use bevy::prelude::*;

/// Event: персонаж прыгнул (импульс применён в этот тик)
///
/// Обрабатывается engine bridge (звук, анимация, пыль).
#[derive(Event, Debug, Clone, Copy)]
pub struct JumpPerformed {
    pub entity: Entity,
    pub impulse: f32,
}

/// Event: персонаж приземлился (grounded false → true)
#[derive(Event, Debug, Clone, Copy)]
pub struct Landed {
    pub entity: Entity,
}
