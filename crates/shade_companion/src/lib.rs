//! ShadeSnail — компаньон-преследователь
//!
//! ECS-симуляция на Bevy 0.16 (headless):
//! - companion: спавн/удаление Shade рядом с игроком
//! - ai: FSM Shade + override (враждебна, всегда преследует)
//! - combat: урон через hooks (компаньон бессмертен)
//! - config: персистентный флаг + tuning

use bevy::prelude::*;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod companion;
pub mod components;
pub mod config;
pub mod logger;

// Re-export базовых типов для удобства
pub use ai::{ActiveHooks, AIPlugin, BehaviorHooks, BehaviorOverride, HostBehavior, ShadeBrain, ShadeState};
pub use combat::{CombatPlugin, DamageDealt, DamageHit, Dead, EntityDied};
pub use companion::{CompanionLifecycleController, CompanionPlugin, SessionStarted, SpawnQueue};
pub use components::*;
pub use config::{CompanionToggled, ConfigError, ShadeConfig, ShadeSettings};
pub use logger::{log, log_error, log_info, log_warning, LogLevel, LogPrinter};

/// Порядок подсистем внутри FixedUpdate
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShadeSet {
    /// Спавн/удаление компаньона
    Lifecycle,
    /// Сенсоры, FSM, движение
    Ai,
    /// Урон и смерть
    Combat,
}

/// Главный plugin (объединяет все подсистемы)
///
/// ShadeSettings/ShadeConfig можно вставить до плагина — `init_resource`
/// их не перезапишет.
pub struct ShadePlugin;

impl Plugin for ShadePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ShadeSettings>()
            .init_resource::<ShadeConfig>()
            .configure_sets(
                FixedUpdate,
                (ShadeSet::Lifecycle, ShadeSet::Ai, ShadeSet::Combat).chain(),
            )
            .add_plugins((CompanionPlugin, AIPlugin, CombatPlugin));
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app() -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}
