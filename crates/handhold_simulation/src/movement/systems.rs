//! Movement systems (FixedUpdate)

use bevy::prelude::*;
use bevy_rapier2d::prelude::{ExternalImpulse, GravityScale, Velocity};

use super::components::{CharacterMotion, InputBuffer, JumpConfig};
use super::events::{JumpPerformed, Landed};
use super::jump::{smooth_damp, step_jump, JumpTickInput};
use crate::components::PlayerInput;

/// Множитель target velocity горизонтали (axis × run_speed × dt × 10)
const RUN_VELOCITY_SCALE: f32 = 10.0;

/// Система: Landed event на переходе grounded false → true
///
/// Запускается ПЕРЕД apply_character_movement: ground detection уже записал grounded.
pub fn detect_landing(
    mut characters: Query<(Entity, &mut CharacterMotion)>,
    mut landed_events: EventWriter<Landed>,
) {
    for (entity, mut motion) in characters.iter_mut() {
        if motion.grounded && !motion.was_grounded {
            landed_events.write(Landed { entity });
        }
        motion.was_grounded = motion.grounded;
    }
}

/// Система: горизонталь + jump assist + custom gravity
///
/// Читает PlayerInput (latched jump_pressed потребляется здесь),
/// пишет Velocity / GravityScale / ExternalImpulse physics body.
pub fn apply_character_movement(
    mut characters: Query<(
        Entity,
        &mut PlayerInput,
        &JumpConfig,
        &mut CharacterMotion,
        &mut InputBuffer,
        &mut Velocity,
        &mut GravityScale,
        &mut ExternalImpulse,
        &mut Transform,
    )>,
    mut jump_events: EventWriter<JumpPerformed>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();

    for (entity, mut input, config, mut motion, mut buffer, mut velocity, mut gravity, mut impulse, mut transform) in
        characters.iter_mut()
    {
        let jump_pressed = input.jump_pressed;
        // Press потребляется этим тиком в любом случае
        input.jump_pressed = false;

        if !input.allow_movement {
            // Управление выключено: только coyote продолжает тикать
            buffer.tick_coyote(motion.grounded, config.coyote_time, dt);
            continue;
        }

        // --- Горизонталь ---
        if motion.grounded || config.air_control {
            let movement = input.horizontal * config.run_speed * dt;
            let target_vx = movement * RUN_VELOCITY_SCALE;
            velocity.linvel.x = smooth_damp(
                velocity.linvel.x,
                target_vx,
                &mut motion.smoothing_velocity,
                config.movement_smoothing,
                dt,
            );

            if movement * motion.facing.sign() < 0.0 {
                motion.facing = motion.facing.flipped();
                transform.scale.x *= -1.0;
            }
        }

        // --- Jump + gravity ---
        let output = step_jump(
            &mut buffer,
            JumpTickInput {
                grounded: motion.grounded,
                vertical_velocity: velocity.linvel.y,
                jump_pressed,
                jump_held: input.jump_held,
                dt,
            },
            config,
        );

        motion.grounded = output.grounded;
        velocity.linvel.y = output.vertical_velocity;
        gravity.0 = output.gravity_scale;

        if let Some(jump_impulse) = output.impulse {
            impulse.impulse.y += jump_impulse;
            jump_events.write(JumpPerformed {
                entity,
                impulse: jump_impulse,
            });
            crate::log(&format!("🦘 {:?} jumped (impulse {:.2})", entity, jump_impulse));
        }
    }
}
