//! Time Multiplier Registry
//!
//! # Архитектура
//!
//! **TimeAffected**: capability trait: компонент с мутабельным speed multiplier.
//! Реализуют: OscillatingPath, Door, TimeScaledBody (и любой game-specific компонент).
//!
//! **TimeAffectedKinds**: какие типы компонентов участвуют (регистрируются плагинами
//! через `app.register_time_affected::<T>()`).
//!
//! **TimeMultiplierRegistry**: type-erased handles (entity + apply fn), собирается ОДИН
//! раз на старте сцены сканом ВСЕХ entities (включая `Inactive`), без дубликатов.
//!
//! **broadcast(m)**: пишет m только активным в иерархии entities. Выключенные
//! пропускаются и сохраняют старый multiplier до следующего broadcast.

use std::collections::HashSet;

use bevy::ecs::component::Mutable;
use bevy::prelude::*;

use crate::components::is_active_in_hierarchy;

/// Capability: компонент участвует в глобальном time multiplier
pub trait TimeAffected: Component<Mutability = Mutable> {
    fn time_multiplier(&self) -> f32;
    fn set_time_multiplier(&mut self, multiplier: f32);
}

/// Type-erased описание одного `TimeAffected` типа
#[derive(Debug, Clone, Copy)]
pub struct TimeAffectedKind {
    pub name: &'static str,
    collect: fn(&mut World) -> Vec<Entity>,
    apply: fn(&mut World, Entity, f32) -> bool,
    read: fn(&World, Entity) -> Option<f32>,
}

impl TimeAffectedKind {
    pub fn of<T: TimeAffected>() -> Self {
        Self {
            name: std::any::type_name::<T>(),
            collect: collect_entities::<T>,
            apply: apply_multiplier::<T>,
            read: read_multiplier::<T>,
        }
    }
}

fn collect_entities<T: TimeAffected>(world: &mut World) -> Vec<Entity> {
    let mut query = world.query_filtered::<Entity, With<T>>();
    query.iter(world).collect()
}

fn apply_multiplier<T: TimeAffected>(world: &mut World, entity: Entity, multiplier: f32) -> bool {
    match world.get_mut::<T>(entity) {
        Some(mut component) => {
            component.set_time_multiplier(multiplier);
            true
        }
        None => false,
    }
}

fn read_multiplier<T: TimeAffected>(world: &World, entity: Entity) -> Option<f32> {
    world.get::<T>(entity).map(|component| component.time_multiplier())
}

/// Список зарегистрированных `TimeAffected` типов
#[derive(Resource, Debug, Default)]
pub struct TimeAffectedKinds {
    kinds: Vec<TimeAffectedKind>,
}

impl TimeAffectedKinds {
    pub fn register<T: TimeAffected>(&mut self) {
        let kind = TimeAffectedKind::of::<T>();
        if !self.kinds.iter().any(|k| k.name == kind.name) {
            self.kinds.push(kind);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimeAffectedKind> {
        self.kinds.iter()
    }
}

/// Handle одного участника: (entity, тип компонента)
#[derive(Debug, Clone, Copy)]
pub struct TimeHandle {
    pub entity: Entity,
    pub kind: TimeAffectedKind,
}

impl TimeHandle {
    pub fn multiplier(&self, world: &World) -> Option<f32> {
        (self.kind.read)(world, self.entity)
    }
}

/// Реестр участников time multiplier (живёт пока живёт сцена/World)
#[derive(Resource, Debug, Default)]
pub struct TimeMultiplierRegistry {
    handles: Vec<TimeHandle>,
    /// Последний broadcast (None: ещё не было)
    last_broadcast: Option<f32>,
}

impl TimeMultiplierRegistry {
    /// Скан всех entities (включая inactive) → дедуплицированный список handles
    ///
    /// Пересобирает реестр целиком. Возвращает число handles.
    pub fn register_all(world: &mut World) -> usize {
        let kinds: Vec<TimeAffectedKind> = world
            .get_resource::<TimeAffectedKinds>()
            .map(|kinds| kinds.iter().copied().collect())
            .unwrap_or_default();

        let mut seen: HashSet<(Entity, &'static str)> = HashSet::new();
        let mut handles = Vec::new();

        for kind in kinds {
            for entity in (kind.collect)(world) {
                if seen.insert((entity, kind.name)) {
                    handles.push(TimeHandle { entity, kind });
                }
            }
        }

        let count = handles.len();
        world.insert_resource(TimeMultiplierRegistry {
            handles,
            last_broadcast: None,
        });
        count
    }

    /// Записать multiplier всем активным в иерархии участникам
    ///
    /// Возвращает число обновлённых handles. Без реестра: no-op.
    pub fn broadcast(world: &mut World, multiplier: f32) -> usize {
        let Some(mut registry) = world.remove_resource::<TimeMultiplierRegistry>() else {
            return 0;
        };

        let mut updated = 0;
        for handle in &registry.handles {
            if !is_active_in_hierarchy(world, handle.entity) {
                continue;
            }
            if (handle.kind.apply)(world, handle.entity, multiplier) {
                updated += 1;
            }
        }

        registry.last_broadcast = Some(multiplier);
        world.insert_resource(registry);
        updated
    }

    pub fn handles(&self) -> &[TimeHandle] {
        &self.handles
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.handles.iter().any(|handle| handle.entity == entity)
    }

    pub fn last_broadcast(&self) -> Option<f32> {
        self.last_broadcast
    }
}

/// Регистрация `TimeAffected` типов из плагинов
pub trait TimeAffectedAppExt {
    fn register_time_affected<T: TimeAffected>(&mut self) -> &mut Self;
}

impl TimeAffectedAppExt for App {
    fn register_time_affected<T: TimeAffected>(&mut self) -> &mut Self {
        self.init_resource::<TimeAffectedKinds>();
        self.world_mut().resource_mut::<TimeAffectedKinds>().register::<T>();
        self
    }
}

/// Event: запрос broadcast (pause = 0, resume = 1, slow-mo = 0..1)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct SetTimeMultiplier(pub f32);

/// System: собрать реестр на старте сцены (PostStartup: после spawn уровня)
pub fn register_time_affected_entities(world: &mut World) {
    let count = TimeMultiplierRegistry::register_all(world);
    crate::log_info(&format!("⏱️ TimeMultiplierRegistry: {} time-affected handles", count));
}

/// System: исполнить накопившиеся SetTimeMultiplier (exclusive: сериализует broadcast)
pub fn apply_time_multiplier_requests(
    world: &mut World,
    mut cursor: Local<bevy::ecs::event::EventCursor<SetTimeMultiplier>>,
) {
    let requests: Vec<f32> = match world.get_resource::<Events<SetTimeMultiplier>>() {
        Some(events) => cursor.read(events).map(|request| request.0).collect(),
        None => return,
    };

    for multiplier in requests {
        let updated = TimeMultiplierRegistry::broadcast(world, multiplier);
        crate::log(&format!("⏱️ Time multiplier {} → {} handles", multiplier, updated));
    }
}
