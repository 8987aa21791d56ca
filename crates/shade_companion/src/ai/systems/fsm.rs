//! FSM AI systems (сенсоры игрока, переходы состояний).

use bevy::prelude::*;

use crate::ai::components::*;
use crate::ai::hooks::ActiveHooks;
use crate::components::{Player, PlayerControl};
use crate::config::ShadeConfig;

/// Система: обновление сенсоров Shade (игрок рядом? игрок доступен?)
///
/// Нет игрока (переход между сценами) — все сенсоры false.
pub fn sense_player(
    mut brains: Query<(&Transform, &mut ShadeBrain)>,
    player: Query<(&Transform, &PlayerControl), With<Player>>,
    config: Res<ShadeConfig>,
) {
    let player = player.single().ok();

    for (transform, mut brain) in brains.iter_mut() {
        let (in_range, exposed) = match player {
            Some((player_transform, control)) => {
                let distance = transform
                    .translation
                    .truncate()
                    .distance(player_transform.translation.truncate());
                (distance <= config.detection_range, control.accepting_input)
            }
            None => (false, false),
        };

        // Не дёргаем change detection без нужды
        if brain.player_in_range != in_range || brain.player_exposed != exposed {
            brain.player_in_range = in_range;
            brain.player_exposed = exposed;
        }
    }
}

/// Система: FSM transitions через BehaviorHooks
///
/// Idle:
/// - BoolTest(Friendly) → Friendly: остаёмся в Idle
/// - BoolAllTrue(in_range, exposed) → Alert: Startle
///
/// Startle:
/// - BoolTest(Friendly) → Friendly: Idle, иначе Hostile: Pursue
///
/// Pursue:
/// - игрок недоступен → Idle
///
/// Все проверки идут через `ActiveHooks`, поэтому override компаньона
/// видит каждую из них.
pub fn shade_fsm_transitions(
    mut brains: Query<(Entity, &Name, &mut ShadeBrain)>,
    hooks: Res<ActiveHooks>,
) {
    for (entity, name, mut brain) in brains.iter_mut() {
        let brain = &mut *brain;
        let state = brain.state;
        let ctx = FsmContext {
            owner: name.as_str(),
            state: state.name(),
        };
        let mut events = Vec::new();

        let next = match state {
            ShadeState::Idle => {
                hooks.bool_test_enter(&ctx, &IDLE_FRIENDLY_TEST, &mut brain.friendly, &mut events);

                if events.contains(&FsmEvent::Friendly) {
                    ShadeState::Idle
                } else {
                    let conditions = [brain.player_in_range, brain.player_exposed];
                    hooks.bool_all_true_enter(&ctx, &IDLE_ALERT_CHECK, &conditions, &mut events);

                    if events.contains(&FsmEvent::Alert) {
                        ShadeState::Startle
                    } else {
                        ShadeState::Idle
                    }
                }
            }

            ShadeState::Startle => {
                hooks.bool_test_enter(&ctx, &STARTLE_FRIENDLY_TEST, &mut brain.friendly, &mut events);

                match events.first() {
                    Some(FsmEvent::Friendly) => ShadeState::Idle,
                    Some(FsmEvent::Hostile) => ShadeState::Pursue,
                    _ => ShadeState::Startle,
                }
            }

            ShadeState::Pursue => {
                if brain.player_exposed {
                    ShadeState::Pursue
                } else {
                    ShadeState::Idle
                }
            }
        };

        if next != state {
            crate::log(&format!(
                "AI: {:?} '{}' {} → {} (events: {:?})",
                entity,
                name.as_str(),
                state.name(),
                next.name(),
                events
            ));
            brain.state = next;
        }
    }
}
