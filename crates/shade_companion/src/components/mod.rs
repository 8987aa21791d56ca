//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: здоровье (Health)
//! - player: игрок и его "может ли действовать" (Player, PlayerControl)
//! - companion: компаньон и его фоновый звук (Companion, AmbientCue)

pub mod actor;
pub mod companion;
pub mod player;

// Re-exports для удобного импорта
pub use actor::*;
pub use companion::*;
pub use player::*;
