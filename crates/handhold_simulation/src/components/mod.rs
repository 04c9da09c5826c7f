//! ECS Components общие для всех доменов
//!
//! Организация:
//! - player: player marker + input snapshot (PlayerInput)
//! - world: активность entity в иерархии (Inactive)
//! - sensor: trigger события от physics engine (SensorEvent, ContactTag)
//!
//! Доменные компоненты живут в своих модулях (movement, pickup, time_scale,
//! scripted_motion, level).

pub mod player;
pub mod sensor;
pub mod world;

// Re-exports для удобного импорта
pub use player::*;
pub use sensor::*;
pub use world::*;
