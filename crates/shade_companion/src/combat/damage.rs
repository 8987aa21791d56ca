//! Damage pipeline
//!
//! DamageHit (вход) → BehaviorHooks::take_damage → DamageDealt / EntityDied (выход).
//! Каждый удар идёт через ActiveHooks, поэтому override компаньона
//! успевает поднять здоровье до применения урона.

use bevy::prelude::*;

use crate::ai::{ActiveHooks, ShadeBrain};
use crate::components::Health;

/// Событие: удар по entity (от хитбоксов хоста)
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageHit {
    pub target: Entity,
    pub attacker: Option<Entity>,
    pub damage: u32,
}

/// Событие: урон нанесен
///
/// Генерируется после применения damage к Health.
#[derive(Event, Debug, Clone)]
pub struct DamageDealt {
    pub attacker: Option<Entity>,
    pub target: Entity,
    pub damage: u32,
    pub health_after: u32,
    pub target_died: bool,
}

/// Событие: entity умер (health == 0)
#[derive(Event, Debug, Clone)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Компонент-маркер: entity мертв
///
/// Деспавн не автоматический — трупы остаются на месте.
#[derive(Component, Debug)]
pub struct Dead;

/// Система: apply damage от DamageHit событий
///
/// 1. Читаем DamageHit события
/// 2. Прогоняем урон через ActiveHooks (owner = Name entity)
/// 3. Генерируем DamageDealt и EntityDied события
pub fn apply_damage(
    mut hits: EventReader<DamageHit>,
    mut damage_dealt_events: EventWriter<DamageDealt>,
    mut entity_died_events: EventWriter<EntityDied>,
    mut targets: Query<(&mut Health, Option<&Name>), Without<Dead>>,
    hooks: Res<ActiveHooks>,
) {
    for hit in hits.read() {
        let Ok((mut health, name)) = targets.get_mut(hit.target) else {
            crate::logger::log_warning(&format!(
                "DamageHit: target {:?} has no Health (or is dead)",
                hit.target
            ));
            continue;
        };

        let owner = name.map(Name::as_str).unwrap_or_default();
        let was_alive = health.is_alive();
        hooks.take_damage(owner, &mut *health, hit.damage);
        let is_alive = health.is_alive();

        damage_dealt_events.write(DamageDealt {
            attacker: hit.attacker,
            target: hit.target,
            damage: hit.damage,
            health_after: health.current,
            target_died: was_alive && !is_alive,
        });

        if was_alive && !is_alive {
            entity_died_events.write(EntityDied {
                entity: hit.target,
                killer: hit.attacker,
            });

            crate::logger::log_info(&format!(
                "Entity {:?} '{}' killed by {:?}",
                hit.target, owner, hit.attacker
            ));
        }
    }
}

/// Система: отключение AI при смерти
///
/// Убирает ShadeBrain (мертвые не преследуют) и ставит маркер Dead.
pub fn disable_brain_on_death(mut commands: Commands, mut death_events: EventReader<EntityDied>) {
    for event in death_events.read() {
        if let Ok(mut entity_commands) = commands.get_entity(event.entity) {
            entity_commands.remove::<ShadeBrain>();
            entity_commands.insert(Dead);

            crate::log(&format!("Disabled AI for dead entity {:?}", event.entity));
        }
    }
}
