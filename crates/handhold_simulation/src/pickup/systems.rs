//! Pickup system implementations
//!
//! # Systems
//!
//! **FixedUpdate (SimulationSet::Input):**
//! - `map_pickup_input`: PlayerInput edges → PickupCommand
//!
//! **FixedUpdate (SimulationSet::Interaction):**
//! - `track_pickup_range`: SensorEvent → ItemHolder.in_range
//! - `process_pickup_commands`: pickup / drop / throw
//! - `release_orphaned_items`: holder пропал → restore
//! - `pull_held_items`: held item тянется к anchor
//! - `update_held_layers`: held ↔ overhead groups
//!
//! **Update:**
//! - `aim_hold_anchors`: anchor поворачивается за прицелом

use std::collections::HashMap;

use bevy::prelude::*;
use bevy_rapier2d::prelude::{AdditionalMassProperties, CollisionGroups, ExternalImpulse, GravityScale, Velocity};

use super::components::*;
use super::events::*;
use super::selection::*;
use crate::collision_layers::{get_layer_name, held_groups};
use crate::components::{ContactTag, PlayerInput, SensorEvent};
use crate::time_scale::TimeScaledBody;
use crate::{log, log_warning};

// ============================================================================
// Input
// ============================================================================

/// E → pickup/drop (toggle), Mouse 0 → throw (только с item в руках)
pub fn map_pickup_input(
    mut holders: Query<(Entity, &mut PlayerInput, &ItemHolder)>,
    mut commands_writer: EventWriter<PickupCommand>,
) {
    for (holder, mut input, item_holder) in holders.iter_mut() {
        if input.interact_pressed {
            input.interact_pressed = false;
            let action = if item_holder.is_holding() {
                PickupAction::Drop
            } else {
                PickupAction::PickUp
            };
            commands_writer.write(PickupCommand { holder, action });
            // Drop и throw в одном тике не комбинируются
            input.throw_pressed = false;
            continue;
        }

        if input.throw_pressed {
            input.throw_pressed = false;
            if item_holder.is_holding() {
                commands_writer.write(PickupCommand {
                    holder,
                    action: PickupAction::Throw,
                });
            }
        }
    }
}

// ============================================================================
// Range tracking
// ============================================================================

/// PickupRadius enter/exit (tag Pickup) → кандидаты owner'а
pub fn track_pickup_range(
    mut sensor_events: EventReader<SensorEvent>,
    radii: Query<&PickupRadius>,
    mut holders: Query<&mut ItemHolder>,
) {
    for event in sensor_events.read() {
        if event.tag() != ContactTag::Pickup {
            continue;
        }
        let Ok(radius) = radii.get(event.sensor()) else {
            continue;
        };
        let Ok(mut holder) = holders.get_mut(radius.owner) else {
            continue;
        };

        if event.is_enter() {
            holder.add_candidate(event.other());
        } else {
            holder.remove_candidate(event.other());
        }
    }
}

// ============================================================================
// Pickup / Drop / Throw
// ============================================================================

type PickupItemData = (
    &'static mut Transform,
    Option<&'static HeldBy>,
    Option<&'static PickupRestore>,
    Option<&'static CollisionGroups>,
    Option<&'static GravityScale>,
    Option<&'static AdditionalMassProperties>,
    Option<&'static mut Velocity>,
    Option<&'static mut ExternalImpulse>,
    Option<&'static mut TimeScaledBody>,
);

/// Вернуть body состояние до pickup (None → компонента не было, удаляем)
fn restore_body(entity_commands: &mut EntityCommands, restore: &PickupRestore) {
    match restore.groups {
        Some(groups) => entity_commands.insert(groups),
        None => entity_commands.remove::<CollisionGroups>(),
    };
    match restore.gravity {
        Some(gravity) => entity_commands.insert(gravity),
        None => entity_commands.remove::<GravityScale>(),
    };
    match restore.mass {
        Some(mass) => entity_commands.insert(mass),
        None => entity_commands.remove::<AdditionalMassProperties>(),
    };
}

/// Process pickup intents
///
/// Все изменения body (groups/gravity/mass) идут через Commands:
/// отсутствующий до pickup компонент при restore удаляется.
pub fn process_pickup_commands(
    mut commands: Commands,
    mut intents: EventReader<PickupCommand>,
    mut holders: Query<(&mut ItemHolder, &Transform, Option<&HoldAnchor>), Without<Pickup>>,
    mut items: Query<PickupItemData, With<Pickup>>,
    config: Res<PickupConfig>,
    mut picked_events: EventWriter<ItemPickedUp>,
    mut released_events: EventWriter<ItemReleased>,
) {
    // Commands применяются после системы: restore поднятых в этом же батче
    let mut pending_restores: HashMap<Entity, PickupRestore> = HashMap::new();

    for intent in intents.read() {
        let Ok((mut holder, holder_transform, anchor)) = holders.get_mut(intent.holder) else {
            log_warning(&format!("PickupCommand: {:?} is not an ItemHolder", intent.holder));
            continue;
        };
        let holder_position = holder_transform.translation.truncate();

        match intent.action {
            PickupAction::PickUp => {
                if holder.is_holding() {
                    continue;
                }

                // Despawned кандидаты выпадают из списка
                holder.in_range.retain(|item| items.contains(*item));

                let candidates = holder.in_range.iter().filter_map(|item| {
                    let (transform, held_by, ..) = items.get(*item).ok()?;
                    let free = held_by.is_none() && !pending_restores.contains_key(item);
                    free.then(|| (*item, transform.translation.truncate()))
                });
                let Some(item) = select_nearest(holder_position, candidates) else {
                    continue;
                };

                let Ok((_, _, _, groups, gravity, mass, velocity, _, time_scale)) = items.get_mut(item) else {
                    continue;
                };

                let restore = PickupRestore {
                    groups: groups.copied(),
                    gravity: gravity.copied(),
                    mass: mass.copied(),
                };
                if let Some(mut velocity) = velocity {
                    *velocity = Velocity::zero();
                }
                // Заморожен паузой: resume не должен вернуть скорость до pickup
                if let Some(mut time_scale) = time_scale {
                    if time_scale.is_frozen() {
                        time_scale.zero_frozen_velocity();
                    }
                }

                pending_restores.insert(item, restore);
                commands.entity(item).insert((
                    HeldBy { holder: intent.holder },
                    restore,
                    held_groups(),
                    GravityScale(0.0),
                    AdditionalMassProperties::Mass(config.held_mass),
                ));
                holder.held = Some(item);

                picked_events.write(ItemPickedUp {
                    holder: intent.holder,
                    item,
                });
                log(&format!("✋ {:?} picked up {:?}", intent.holder, item));
            }

            PickupAction::Drop | PickupAction::Throw => {
                let Some(item) = holder.held.take() else {
                    continue;
                };
                let Ok((mut transform, _, restore, _, _, _, velocity, impulse, _)) = items.get_mut(item) else {
                    // Item despawned пока был в руках: link просто очищается
                    continue;
                };

                let restore = pending_restores.remove(&item).or_else(|| restore.copied());

                let mut entity_commands = commands.entity(item);
                entity_commands.remove::<(HeldBy, PickupRestore)>();
                if let Some(restore) = restore {
                    restore_body(&mut entity_commands, &restore);
                }

                let thrown = intent.action == PickupAction::Throw;
                if thrown {
                    match anchor {
                        Some(anchor) => {
                            let direction = (anchor.position - holder_position).normalize_or_zero();
                            match velocity {
                                Some(mut velocity) => {
                                    velocity.linvel *= config.throw_velocity_damping;
                                    let throw_impulse = direction * config.throw_force;
                                    match impulse {
                                        Some(mut impulse) => impulse.impulse += throw_impulse,
                                        None => {
                                            entity_commands.insert(ExternalImpulse {
                                                impulse: throw_impulse,
                                                torque_impulse: 0.0,
                                            });
                                        }
                                    }
                                }
                                None => {
                                    transform.translation += (direction * config.throw_nudge).extend(0.0);
                                }
                            }
                        }
                        None => log_warning(&format!("Throw: {:?} has no HoldAnchor, dropping", intent.holder)),
                    }
                }

                released_events.write(ItemReleased {
                    holder: intent.holder,
                    item,
                    thrown,
                });
                log(&format!(
                    "{} {:?} {} {:?}",
                    if thrown { "🤾" } else { "👐" },
                    intent.holder,
                    if thrown { "threw" } else { "dropped" },
                    item
                ));
            }
        }
    }
}

// ============================================================================
// Holding
// ============================================================================

/// Holder despawned (или потерял ItemHolder) → item отпускается как при drop
pub fn release_orphaned_items(
    mut commands: Commands,
    items: Query<(Entity, &HeldBy, Option<&PickupRestore>), With<Pickup>>,
    holders: Query<&ItemHolder>,
    mut released_events: EventWriter<ItemReleased>,
) {
    for (item, held_by, restore) in items.iter() {
        if holders.get(held_by.holder).is_ok_and(|holder| holder.held == Some(item)) {
            continue;
        }

        let mut entity_commands = commands.entity(item);
        entity_commands.remove::<(HeldBy, PickupRestore)>();
        if let Some(restore) = restore {
            restore_body(&mut entity_commands, restore);
        }

        released_events.write(ItemReleased {
            holder: held_by.holder,
            item,
            thrown: false,
        });
        log_warning(&format!("Pickup {:?}: holder {:?} is gone, releasing", item, held_by.holder));
    }
}

/// Held item тянется к HoldAnchor holder'а
pub fn pull_held_items(
    mut items: Query<(&HeldBy, &mut Transform, Option<&mut Velocity>, Option<&TimeScaledBody>), With<Pickup>>,
    anchors: Query<&HoldAnchor>,
    config: Res<PickupConfig>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();

    for (held_by, mut transform, velocity, time_scale) in items.iter_mut() {
        let Ok(anchor) = anchors.get(held_by.holder) else {
            continue;
        };
        let multiplier = time_scale.map_or(1.0, |scaled| scaled.multiplier());
        let position = transform.translation.truncate();

        match velocity {
            Some(mut velocity) => {
                velocity.linvel = pull_velocity(
                    velocity.linvel,
                    position,
                    anchor.position,
                    config.pull_strength,
                    multiplier,
                    dt,
                );
            }
            None => {
                let next = pull_position(position, anchor.position, config.pull_strength, multiplier, dt);
                transform.translation.x = next.x;
                transform.translation.y = next.y;
            }
        }
    }
}

/// Held item выше holder'а → overhead groups, ниже → held
pub fn update_held_layers(
    mut items: Query<(Entity, &HeldBy, &Transform, &mut CollisionGroups), With<Pickup>>,
    holders: Query<&Transform, (With<ItemHolder>, Without<Pickup>)>,
) {
    for (item, held_by, transform, mut groups) in items.iter_mut() {
        let Ok(holder_transform) = holders.get(held_by.holder) else {
            continue;
        };
        let target = held_layer_for(transform.translation.y, holder_transform.translation.y);
        // set_if_neq: без лишних Changed<CollisionGroups>
        if groups.set_if_neq(target) {
            log(&format!("🔀 {:?} → {} layer", item, get_layer_name(&target)));
        }
    }
}

/// Anchor поворачивается к прицелу с turn_speed (градусы/сек)
pub fn aim_hold_anchors(mut anchors: Query<(&mut HoldAnchor, &Transform, &PlayerInput)>, time: Res<Time>) {
    let dt = time.delta_secs();

    for (mut anchor, transform, input) in anchors.iter_mut() {
        let holder = transform.translation.truncate();
        let direction = input.aim_world - holder;
        let target_angle = direction.y.atan2(direction.x).to_degrees();

        anchor.angle_deg = move_towards_angle(anchor.angle_deg, target_angle, anchor.turn_speed * dt);
        anchor.position = anchor_position(holder, anchor.angle_deg, anchor.hold_offset);
    }
}
