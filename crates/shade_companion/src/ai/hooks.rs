//! Точки перехвата AI/боя хоста
//!
//! Хост вызывает hooks при входе в действия FSM и при получении урона.
//! `HostBehavior` — поведение хоста без изменений; поверх него можно
//! навесить декоратор (см. `BehaviorOverride`).

use bevy::prelude::*;

use super::components::{BoolAllTrue, BoolTest, FsmContext, FsmEvent};
use crate::components::Health;

pub trait BehaviorHooks: Send + Sync + 'static {
    /// Вход в BoolTest: читает `variable`, пишет событие перехода
    fn bool_test_enter(
        &self,
        ctx: &FsmContext,
        action: &BoolTest,
        variable: &mut bool,
        events: &mut Vec<FsmEvent>,
    );

    /// Вход в BoolAllTrue: все `values` true → `send_event`
    fn bool_all_true_enter(
        &self,
        ctx: &FsmContext,
        action: &BoolAllTrue,
        values: &[bool],
        events: &mut Vec<FsmEvent>,
    );

    fn take_damage(&self, owner: &str, health: &mut Health, damage: u32);
}

/// Поведение хоста как есть
#[derive(Debug, Clone, Copy, Default)]
pub struct HostBehavior;

impl BehaviorHooks for HostBehavior {
    fn bool_test_enter(
        &self,
        _ctx: &FsmContext,
        action: &BoolTest,
        variable: &mut bool,
        events: &mut Vec<FsmEvent>,
    ) {
        let event = if *variable { action.is_true } else { action.is_false };
        events.extend(event);
    }

    fn bool_all_true_enter(
        &self,
        _ctx: &FsmContext,
        action: &BoolAllTrue,
        values: &[bool],
        events: &mut Vec<FsmEvent>,
    ) {
        if values.iter().all(|v| *v) {
            events.push(action.send_event);
        }
    }

    fn take_damage(&self, _owner: &str, health: &mut Health, damage: u32) {
        health.take_damage(damage);
    }
}

/// Активная цепочка hooks (ставится AIPlugin'ом)
#[derive(Resource)]
pub struct ActiveHooks(Box<dyn BehaviorHooks>);

impl ActiveHooks {
    pub fn new(hooks: impl BehaviorHooks) -> Self {
        Self(Box::new(hooks))
    }
}

impl Default for ActiveHooks {
    fn default() -> Self {
        Self::new(HostBehavior)
    }
}

impl std::ops::Deref for ActiveHooks {
    type Target = dyn BehaviorHooks;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}
