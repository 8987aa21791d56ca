//! FSM компоненты Shade (состояния, переменные, действия).
//!
//! Модель скриптового FSM хоста: состояния имеют строковые имена,
//! действия (BoolTest, BoolAllTrue) при входе генерируют события переходов.

use bevy::prelude::*;

/// Состояния FSM Shade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum ShadeState {
    /// Idle — висит на месте; дружелюбная Shade здесь и остаётся
    #[default]
    Idle,

    /// Startle — заметила игрока, решает: атаковать или успокоиться
    Startle,

    /// Pursue — преследует игрока
    Pursue,
}

impl ShadeState {
    /// Имя состояния в FSM хоста (по нему фильтруют hooks)
    pub const fn name(&self) -> &'static str {
        match self {
            ShadeState::Idle => "Idle",
            ShadeState::Startle => "Startle",
            ShadeState::Pursue => "Pursue",
        }
    }
}

/// События переходов FSM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum FsmEvent {
    Friendly,
    Hostile,
    Alert,
}

/// Действие BoolTest: проверка bool переменной → событие
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoolTest {
    pub is_true: Option<FsmEvent>,
    pub is_false: Option<FsmEvent>,
}

/// Действие BoolAllTrue: все условия true → send_event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoolAllTrue {
    pub send_event: FsmEvent,
}

/// Idle: дружелюбная Shade не реагирует на игрока
pub const IDLE_FRIENDLY_TEST: BoolTest = BoolTest {
    is_true: Some(FsmEvent::Friendly),
    is_false: None,
};

/// Idle: игрок рядом и доступен → тревога
pub const IDLE_ALERT_CHECK: BoolAllTrue = BoolAllTrue {
    send_event: FsmEvent::Alert,
};

/// Startle: успокоиться или атаковать
pub const STARTLE_FRIENDLY_TEST: BoolTest = BoolTest {
    is_true: Some(FsmEvent::Friendly),
    is_false: Some(FsmEvent::Hostile),
};

/// Контекст вызова hook'а: чей FSM и в каком состоянии
#[derive(Debug, Clone, Copy)]
pub struct FsmContext<'a> {
    pub owner: &'a str,
    pub state: &'a str,
}

/// FSM Shade + её переменные
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct ShadeBrain {
    pub state: ShadeState,
    /// FSM переменная "Friendly" (хост по умолчанию ставит true)
    pub friendly: bool,
    /// Игрок в detection_range (обновляет sense_player)
    pub player_in_range: bool,
    /// Игрок может действовать (не в катсцене/переходе)
    pub player_exposed: bool,
}

impl Default for ShadeBrain {
    fn default() -> Self {
        Self {
            state: ShadeState::Idle,
            friendly: true,
            player_in_range: false,
            player_exposed: false,
        }
    }
}
