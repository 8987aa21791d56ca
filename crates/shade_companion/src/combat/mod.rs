//! Combat module
//!
//! ECS ответственность:
//! - Game state: Health
//! - Damage pipeline: DamageHit → ActiveHooks → DamageDealt / EntityDied
//! - Death: Dead маркер, отключение AI

use bevy::prelude::*;

pub mod damage;


// Re-export основных типов
pub use damage::{apply_damage, disable_brain_on_death, DamageDealt, DamageHit, Dead, EntityDied};

use crate::ShadeSet;

/// Combat Plugin
///
/// Порядок выполнения (FixedUpdate):
/// 1. apply_damage — DamageHit → damage через hooks
/// 2. disable_brain_on_death — отключение AI у мертвых
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DamageHit>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>();

        app.add_systems(
            FixedUpdate,
            (damage::apply_damage, damage::disable_brain_on_death)
                .chain()
                .in_set(ShadeSet::Combat),
        );
    }
}
