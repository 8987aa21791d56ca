//! AI module — FSM Shade и перехват его проверок
//!
//! Shade по умолчанию дружелюбна и висит в Idle. `BehaviorOverride` навешивается
//! на hooks хоста и для компаньона делает её враждебной и бессмертной.

use bevy::prelude::*;

pub mod behavior_override;
pub mod components;
pub mod hooks;
pub mod systems;


// Re-export основных типов
pub use behavior_override::{BehaviorOverride, FlagOverride};
pub use components::*;
pub use hooks::{ActiveHooks, BehaviorHooks, HostBehavior};

use crate::config::ShadeConfig;
use crate::ShadeSet;

/// AI Plugin
///
/// Порядок выполнения (FixedUpdate):
/// 1. sense_player — сенсоры (дистанция, доступность игрока)
/// 2. shade_fsm_transitions — FSM через ActiveHooks
/// 3. pursue_player — движение в Pursue
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        let companion_name = app
            .world()
            .get_resource::<ShadeConfig>()
            .map(|config| config.companion_name.clone())
            .unwrap_or_else(|| ShadeConfig::default().companion_name);

        if !app.world().contains_resource::<ActiveHooks>() {
            app.insert_resource(ActiveHooks::new(BehaviorOverride::new(
                HostBehavior,
                companion_name,
            )));
        }

        app.init_resource::<ShadeConfig>().add_systems(
            FixedUpdate,
            (
                systems::sense_player,
                systems::shade_fsm_transitions,
                systems::pursue_player,
            )
                .chain()
                .in_set(ShadeSet::Ai),
        );
    }
}
