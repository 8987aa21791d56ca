//! Player components
//!
//! Отмечает entity игрока и его текущую способность действовать.

use bevy::prelude::*;

/// Marker component для player-controlled entity
///
/// В single-player только один entity имеет этот компонент.
/// Компаньон ориентируется на его Transform.
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(PlayerControl)]
pub struct Player;

/// Может ли игрок сейчас действовать (катсцена, переход между сценами, смерть)
///
/// Компаньон не спавнится, пока `accepting_input == false`.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct PlayerControl {
    pub accepting_input: bool,
}

impl Default for PlayerControl {
    fn default() -> Self {
        Self { accepting_input: true }
    }
}
