//! Pause: PauseState + экранный fade
//!
//! Pause = broadcast(0), resume = broadcast(1) через `SetTimeMultiplier`.
//! Fade идёт по real time (`Time<Real>`), не зависит от multiplier'ов.
//!
//! Cancel-and-restart: каждый `ScreenFade::start` увеличивает generation,
//! остаток прошлого перехода отбрасывается.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::registry::SetTimeMultiplier;
use crate::components::{Player, PlayerInput};

/// Pause tunables
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PauseConfig {
    /// Длительность fade in/out (сек, real time)
    pub fade_duration: f32,
}

impl Default for PauseConfig {
    fn default() -> Self {
        Self { fade_duration: 0.5 }
    }
}

/// Глобальное состояние паузы
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PauseState {
    pub paused: bool,
}

/// Event: команда паузы (Escape → Toggle)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseCommand {
    Toggle,
    Pause,
    Resume,
}

/// Активный переход alpha
#[derive(Debug, Clone, Copy, PartialEq)]
struct FadeTransition {
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
    hide_on_complete: bool,
}

/// Состояние pause-экрана (alpha + interactable + visible)
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ScreenFade {
    pub alpha: f32,
    pub interactable: bool,
    pub visible: bool,
    generation: u64,
    transition: Option<FadeTransition>,
}

impl Default for ScreenFade {
    fn default() -> Self {
        Self::hidden()
    }
}

impl ScreenFade {
    pub fn hidden() -> Self {
        Self {
            alpha: 0.0,
            interactable: false,
            visible: false,
            generation: 0,
            transition: None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_fading(&self) -> bool {
        self.transition.is_some()
    }

    /// Начать fade к show/hide. Предыдущий fade отменяется.
    ///
    /// Show: экран сразу visible + interactable. duration <= 0 → мгновенно.
    pub fn start(&mut self, show: bool, duration: f32) -> u64 {
        self.generation += 1;
        self.transition = None;

        let target = if show { 1.0 } else { 0.0 };
        if show {
            self.visible = true;
            self.interactable = true;
        }

        if duration <= 0.0 {
            self.finish(target, !show);
        } else {
            self.transition = Some(FadeTransition {
                from: self.alpha,
                to: target,
                elapsed: 0.0,
                duration,
                hide_on_complete: !show,
            });
        }

        self.generation
    }

    /// Продвинуть fade на dt. Возвращает true в тик завершения.
    pub fn advance(&mut self, dt: f32) -> bool {
        let Some(mut transition) = self.transition else {
            return false;
        };

        transition.elapsed += dt;
        let t = (transition.elapsed / transition.duration).clamp(0.0, 1.0);
        self.alpha = transition.from + (transition.to - transition.from) * t;

        if t >= 1.0 {
            self.transition = None;
            self.finish(transition.to, transition.hide_on_complete);
            true
        } else {
            self.transition = Some(transition);
            false
        }
    }

    fn finish(&mut self, target: f32, hide: bool) {
        self.alpha = target;
        if target <= f32::EPSILON {
            self.interactable = false;
        }
        if hide {
            self.visible = false;
        }
    }
}

/// System: Escape → PauseCommand::Toggle
pub fn map_pause_input(mut players: Query<&mut PlayerInput, With<Player>>, mut pause: EventWriter<PauseCommand>) {
    for mut input in players.iter_mut() {
        if input.pause_pressed {
            input.pause_pressed = false;
            pause.write(PauseCommand::Toggle);
        }
    }
}

/// System: PauseCommand → PauseState + SetTimeMultiplier + fade
pub fn handle_pause_commands(
    mut commands_reader: EventReader<PauseCommand>,
    mut state: ResMut<PauseState>,
    mut fade: ResMut<ScreenFade>,
    mut time_requests: EventWriter<SetTimeMultiplier>,
    config: Res<PauseConfig>,
) {
    for command in commands_reader.read() {
        let paused = match command {
            PauseCommand::Toggle => !state.paused,
            PauseCommand::Pause => true,
            PauseCommand::Resume => false,
        };
        if paused == state.paused {
            continue;
        }

        state.paused = paused;
        time_requests.write(SetTimeMultiplier(if paused { 0.0 } else { 1.0 }));
        let generation = fade.start(paused, config.fade_duration);

        crate::log_info(&format!(
            "⏸️ {} (fade generation {})",
            if paused { "Paused" } else { "Resumed" },
            generation
        ));
    }
}

/// System: продвинуть fade по real time
pub fn advance_screen_fade(mut fade: ResMut<ScreenFade>, real_time: Res<Time<Real>>) {
    fade.advance(real_time.delta_secs());
}
