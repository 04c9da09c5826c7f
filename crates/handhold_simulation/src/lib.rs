//! Handhold Simulation Core
//!
//! ECS-симуляция 2D physics-platformer'а на Bevy 0.16 (gameplay layer)
//!
//! HYBRID ARCHITECTURE:
//! - ECS = gameplay rules (movement, pickup, time scale, scripted motion, level logic)
//! - Engine bridge = rendering, input polling, rapier step, scene loading
//!
//! Bridge пишет `PlayerInput` и `SensorEvent`, читает `Velocity`/`Transform`
//! и события (`LevelCompleted`, `RestartRequested`, `ItemPickedUp`, ...).
//! Для headless режима есть `HeadlessPhysicsPlugin` (упрощённый integrator).

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod collision_layers;
pub mod components;
pub mod level;
pub mod logger;
pub mod movement;
pub mod physics;
pub mod pickup;
pub mod scripted_motion;
pub mod time_scale;

// Re-export базовых компонентов для удобства
pub use components::*;
pub use level::{LevelCompleted, LevelPlugin, RestartRequested, SceneInfo};
pub use movement::{CharacterMotion, InputBuffer, JumpConfig, MovementPlugin};
pub use physics::{HeadlessPhysicsConfig, HeadlessPhysicsPlugin};
pub use pickup::{PickupCommand, PickupConfig, PickupPlugin};
pub use scripted_motion::{Door, OscillatingPath, ScriptedMotionPlugin};
pub use time_scale::{PauseCommand, SetTimeMultiplier, TimeMultiplierRegistry, TimeScalePlugin, TimeScaledBody};

// Re-export logger
pub use logger::{
    init_logger, log, log_error, log_info, log_level, log_warning, log_with_level, set_log_level, set_logger,
    set_logger_if_needed, ConsoleLogger, LogLevel, LogPrinter,
};

/// Порядок fixed tick'а (FixedUpdate)
///
/// Input → Movement → Interaction → TimeScale → Motion → Physics
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// PlayerInput → команды (pickup)
    Input,
    /// Горизонталь + прыжок → Velocity
    Movement,
    /// Sensors: pickup radius, pressure plates, level flag
    Interaction,
    /// Freeze/resume physics bodies по multiplier'у
    TimeScale,
    /// Moving platforms, двери
    Motion,
    /// Headless integrator (если подключён)
    Physics,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 50Hz (как physics step движка)
            .insert_resource(Time::<Fixed>::from_duration(FIXED_STEP))
            // Детерминистичный RNG (seed по умолчанию)
            .insert_resource(DeterministicRng::new(42))
            // Trigger события от engine bridge (или тестов)
            .add_event::<SensorEvent>()
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Input,
                    SimulationSet::Movement,
                    SimulationSet::Interaction,
                    SimulationSet::TimeScale,
                    SimulationSet::Motion,
                    SimulationSet::Physics,
                )
                    .chain(),
            )
            // Подсистемы (gameplay layer)
            .add_plugins((
                MovementPlugin,
                PickupPlugin,
                TimeScalePlugin,
                ScriptedMotionPlugin,
                LevelPlugin,
            ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Fixed step симуляции (50Hz)
pub const FIXED_STEP: Duration = Duration::from_millis(20);

/// Создаёт minimal Bevy App для headless симуляции
///
/// SimulationPlugin + HeadlessPhysicsPlugin. Время идёт вручную:
/// каждый `app.update()` = ровно `FIXED_STEP` (после первого update).
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .add_plugins((SimulationPlugin, HeadlessPhysicsPlugin))
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(TimeUpdateStrategy::ManualDuration(FIXED_STEP));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
