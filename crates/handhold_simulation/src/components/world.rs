//! World компоненты: активность entity в иерархии

use bevy::prelude::*;

/// Marker: entity выключен (аналог "inactive" объекта сцены)
///
/// Выключенный entity (или любой его потомок через `ChildOf`) не тикает
/// scripted motion и пропускается broadcast'ом time multiplier.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Inactive;

/// Активен ли entity с учётом всех предков
///
/// Despawned entity считается неактивным.
pub fn is_active_in_hierarchy(world: &World, entity: Entity) -> bool {
    let mut current = entity;
    loop {
        let Ok(entity_ref) = world.get_entity(current) else {
            return false;
        };
        if entity_ref.contains::<Inactive>() {
            return false;
        }
        match entity_ref.get::<ChildOf>() {
            Some(child_of) => current = child_of.parent(),
            None => return true,
        }
    }
}

/// Read-only query для проверки активности из обычных систем
pub type ActivityQuery<'w, 's> = Query<'w, 's, (Option<&'static ChildOf>, Has<Inactive>)>;

/// То же что `is_active_in_hierarchy`, но через query (без `&World`)
pub fn is_active_in(query: &ActivityQuery, entity: Entity) -> bool {
    let mut current = entity;
    loop {
        let Ok((child_of, inactive)) = query.get(current) else {
            return false;
        };
        if inactive {
            return false;
        }
        match child_of {
            Some(child_of) => current = child_of.parent(),
            None => return true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_parent_disables_child() {
        let mut world = World::new();
        let parent = world.spawn_empty().id();
        let child = world.spawn(ChildOf(parent)).id();

        assert!(is_active_in_hierarchy(&world, child));

        world.entity_mut(parent).insert(Inactive);
        assert!(!is_active_in_hierarchy(&world, child));
        assert!(!is_active_in_hierarchy(&world, parent));

        world.entity_mut(parent).remove::<Inactive>();
        assert!(is_active_in_hierarchy(&world, child));
    }

    #[test]
    fn test_despawned_entity_is_inactive() {
        let mut world = World::new();
        let entity = world.spawn_empty().id();
        world.despawn(entity);
        assert!(!is_active_in_hierarchy(&world, entity));
    }
}
