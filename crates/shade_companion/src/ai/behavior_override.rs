//! BehaviorOverride — делает компаньона враждебным, настойчивым и бессмертным
//!
//! Декоратор над любыми `BehaviorHooks`. Внутренний вызов выполняется всегда,
//! override только корректирует до/после. Чужие entity не трогаем вообще.

use std::ops::{Deref, DerefMut};

use super::components::{BoolAllTrue, BoolTest, FsmContext, FsmEvent, ShadeState};
use super::hooks::BehaviorHooks;
use crate::components::Health;

/// Состояния, где FSM проверяет переменную Friendly
const FRIENDLY_CHECK_STATES: [&str; 2] = [ShadeState::Idle.name(), ShadeState::Startle.name()];

/// Состояние, где BoolAllTrue решает, идти ли за игроком
const PURSUIT_CHECK_STATE: &str = ShadeState::Idle.name();

/// Временная подмена bool на время одной проверки
///
/// Исходное значение восстанавливается в Drop — в том числе при панике
/// внутри обёрнутого вызова.
pub struct FlagOverride<'a> {
    flag: &'a mut bool,
    original: bool,
}

impl<'a> FlagOverride<'a> {
    pub fn new(flag: &'a mut bool, value: bool) -> Self {
        let original = *flag;
        *flag = value;
        Self { flag, original }
    }

    pub fn original(&self) -> bool {
        self.original
    }
}

impl Deref for FlagOverride<'_> {
    type Target = bool;

    fn deref(&self) -> &bool {
        self.flag
    }
}

impl DerefMut for FlagOverride<'_> {
    fn deref_mut(&mut self) -> &mut bool {
        self.flag
    }
}

impl Drop for FlagOverride<'_> {
    fn drop(&mut self) {
        *self.flag = self.original;
    }
}

#[derive(Debug, Clone)]
pub struct BehaviorOverride<H> {
    inner: H,
    companion_name: String,
}

impl<H: BehaviorHooks> BehaviorOverride<H> {
    pub fn new(inner: H, companion_name: impl Into<String>) -> Self {
        Self {
            inner,
            companion_name: companion_name.into(),
        }
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }

    /// Клоны хоста получают суффиксы к имени, поэтому prefix match
    pub fn is_companion(&self, owner: &str) -> bool {
        owner.starts_with(self.companion_name.as_str())
    }
}

impl<H: BehaviorHooks> BehaviorHooks for BehaviorOverride<H> {
    fn bool_test_enter(
        &self,
        ctx: &FsmContext,
        action: &BoolTest,
        variable: &mut bool,
        events: &mut Vec<FsmEvent>,
    ) {
        let is_friendly_test = self.is_companion(ctx.owner)
            && FRIENDLY_CHECK_STATES.iter().any(|state| *state == ctx.state);

        if is_friendly_test {
            let mut hostile = FlagOverride::new(variable, false);
            self.inner.bool_test_enter(ctx, action, &mut *hostile, events);
        } else {
            self.inner.bool_test_enter(ctx, action, variable, events);
        }
    }

    fn bool_all_true_enter(
        &self,
        ctx: &FsmContext,
        action: &BoolAllTrue,
        values: &[bool],
        events: &mut Vec<FsmEvent>,
    ) {
        self.inner.bool_all_true_enter(ctx, action, values, events);

        if self.is_companion(ctx.owner) && ctx.state == PURSUIT_CHECK_STATE {
            events.push(action.send_event);
        }
    }

    fn take_damage(&self, owner: &str, health: &mut Health, damage: u32) {
        if self.is_companion(owner) {
            // +1 сверху: после удара здоровье остаётся > 0
            health.boost(damage.saturating_add(1));
        }

        self.inner.take_damage(owner, health, damage);
    }
}
