//! Scripted motion: moving platforms и двери
//!
//! Содержит:
//! - EaseCurve (easing.rs)
//! - PathProgress / OscillatingPath (path.rs)
//! - Door (door.rs)
//!
//! OscillatingPath и Door реализуют TimeAffected: multiplier 0 останавливает ход.

use bevy::prelude::*;

pub mod door;
pub mod easing;
pub mod path;
pub mod systems;


pub use door::{Door, DoorMove, DoorPose};
pub use easing::EaseCurve;
pub use path::{OscillatingPath, PathDriver, PathProgress, PathStep, PathTiming};

use crate::time_scale::TimeAffectedAppExt;
use crate::SimulationSet;

/// Scripted Motion Plugin
///
/// - Update: transform-driven paths (визуальный frame tick)
/// - FixedUpdate (SimulationSet::Motion): kinematic paths, двери
pub struct ScriptedMotionPlugin;

impl Plugin for ScriptedMotionPlugin {
    fn build(&self, app: &mut App) {
        app.register_time_affected::<OscillatingPath>()
            .register_time_affected::<Door>();

        app.add_systems(Update, systems::advance_transform_paths);

        app.add_systems(
            FixedUpdate,
            (
                systems::advance_kinematic_paths,
                systems::snap_new_doors,
                systems::advance_doors,
            )
                .chain()
                .in_set(SimulationSet::Motion),
        );
    }
}
