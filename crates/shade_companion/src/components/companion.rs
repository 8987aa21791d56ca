//! Компоненты компаньона

use bevy::prelude::*;

/// Marker: entity создан контроллером компаньона
///
/// Контроллер ищет компаньона по `Name` (зарезервированное имя), не по маркеру.
/// AI/движение его тоже не фильтруют: враждебность даёт override по имени.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Companion;

/// Фоновый звук, привязанный к компаньону
///
/// Пока компаньон включён, звук заглушен (иначе играет постоянно).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct AmbientCue {
    pub muted: bool,
}
