//! Level progression: flag → следующая сцена, R → restart
//!
//! Сам scene loading: у engine bridge. Мы только решаем КАКУЮ сцену грузить.

use bevy::prelude::*;

use crate::components::{ContactTag, Player, PlayerInput, SensorEvent};

const LEVEL_PREFIX: &str = "Level_";

/// Текущая сцена и (опционально) явно заданная следующая
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneInfo {
    pub current: String,
    /// Пустая строка / None → вывести из `Level_N`
    pub next: Option<String>,
    /// Флаг уже сработал (повторный вход игнорируется)
    pub completed: bool,
}

impl SceneInfo {
    pub fn new(current: impl Into<String>) -> Self {
        Self {
            current: current.into(),
            ..default()
        }
    }

    pub fn with_next(mut self, next: impl Into<String>) -> Self {
        self.next = Some(next.into());
        self
    }

    /// Имя следующей сцены: явное, иначе `Level_N` → `Level_{N+1}`
    pub fn next_scene_name(&self) -> Option<String> {
        match &self.next {
            Some(next) if !next.is_empty() => Some(next.clone()),
            _ => derive_next_level(&self.current),
        }
    }
}

/// `Level_3` → `Level_4`; всё остальное → None
pub fn derive_next_level(current: &str) -> Option<String> {
    let index: u32 = current.strip_prefix(LEVEL_PREFIX)?.parse().ok()?;
    Some(format!("{}{}", LEVEL_PREFIX, index.checked_add(1)?))
}

/// Marker: finish flag (sensor)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct LevelFlag;

/// Event: игрок дошёл до флага
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct LevelCompleted {
    pub next_scene: Option<String>,
}

/// Event: перезапуск текущей сцены
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct RestartRequested {
    pub scene: String,
}

/// Player вошёл во флаг → LevelCompleted (один раз)
pub fn detect_level_completion(
    mut sensor_events: EventReader<SensorEvent>,
    flags: Query<(), With<LevelFlag>>,
    mut scene: ResMut<SceneInfo>,
    mut completed: EventWriter<LevelCompleted>,
) {
    for event in sensor_events.read() {
        if !event.is_enter() || event.tag() != ContactTag::Player || !flags.contains(event.sensor()) {
            continue;
        }
        if scene.completed {
            continue;
        }

        scene.completed = true;
        let next_scene = scene.next_scene_name();
        crate::log_info(&format!("🏁 Level '{}' completed → {:?}", scene.current, next_scene));
        completed.write(LevelCompleted { next_scene });
    }
}

/// R → RestartRequested
pub fn map_restart_input(
    mut players: Query<&mut PlayerInput, With<Player>>,
    scene: Res<SceneInfo>,
    mut restart: EventWriter<RestartRequested>,
) {
    for mut input in players.iter_mut() {
        if !input.restart_pressed {
            continue;
        }
        input.restart_pressed = false;
        crate::log_info(&format!("🔄 Restart '{}'", scene.current));
        restart.write(RestartRequested {
            scene: scene.current.clone(),
        });
    }
}
