//! Companion module — жизненный цикл компаньона ("Shade")
//!
//! Компаньон существует ⇔ фича включена, спавн не в полёте и нет устаревшего
//! entity под уборку. Держится рядом с игроком: отставший пересоздаётся.

use bevy::prelude::*;

pub mod controller;
pub mod directory;
pub mod scheduler;
pub mod systems;


// Re-export основных типов
pub use controller::{
    planar_distance, AmbientAudio, CompanionLifecycleController, CompanionTemplate,
    CompanionTuning, DespawnReason, EntityDirectory, PlayerState, Scheduler, SpawnOutcome,
    SpawnRequest, TickOutcome,
};
pub use directory::PlayerSnapshot;
pub use scheduler::SpawnQueue;
pub use systems::SessionStarted;

use crate::config::{apply_companion_toggle, CompanionToggled, ShadeConfig, ShadeSettings};
use crate::ShadeSet;

/// Companion Plugin
///
/// Порядок выполнения (FixedUpdate):
/// 1. apply_companion_toggle — меню → ShadeSettings
/// 2. handle_session_reset — SessionStarted → reset контроллера
/// 3. tick_companion_lifecycle — спавн/удаление/звук
/// 4. run_delayed_spawns — отложенные спавны
pub struct CompanionPlugin;

impl Plugin for CompanionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SessionStarted>()
            .add_event::<CompanionToggled>()
            .init_resource::<ShadeSettings>()
            .init_resource::<SpawnQueue>();

        if !app.world().contains_resource::<CompanionLifecycleController>() {
            let tuning = app
                .world()
                .get_resource::<ShadeConfig>()
                .map(CompanionTuning::from)
                .unwrap_or_default();
            app.insert_resource(CompanionLifecycleController::new(tuning));
        }

        app.add_systems(
            FixedUpdate,
            (
                apply_companion_toggle,
                systems::handle_session_reset,
                systems::tick_companion_lifecycle,
                systems::run_delayed_spawns,
            )
                .chain()
                .in_set(ShadeSet::Lifecycle),
        );
    }
}
