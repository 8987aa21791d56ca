//! Companion lifecycle systems (exclusive — контроллеру нужен весь World)

use bevy::ecs::system::SystemState;
use bevy::prelude::*;

use super::controller::CompanionLifecycleController;
use super::directory::PlayerSnapshot;
use super::scheduler::SpawnQueue;
use crate::config::ShadeSettings;

/// Событие хоста: новая сессия / рестарт (загрузка сохранения, новая игра)
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct SessionStarted;

/// System: reset контроллера на старт сессии
///
/// Несколько SessionStarted за тик = один reset.
pub fn handle_session_reset(
    world: &mut World,
    events: &mut SystemState<EventReader<SessionStarted>>,
) {
    let resets = events.get_mut(world).read().count();
    if resets == 0 {
        return;
    }

    world.resource_scope(|world, mut controller: Mut<CompanionLifecycleController>| {
        controller.reset(world);
    });
}

/// System: per-tick проверка компаньона
///
/// Без игрока (загрузка сцены) ничего не делаем — как и хост,
/// который дёргает проверку из update игрока.
pub fn tick_companion_lifecycle(world: &mut World) {
    let Some(player) = PlayerSnapshot::read(world) else {
        return;
    };
    let enabled = world.resource::<ShadeSettings>().spawn_shade;

    world.resource_scope(|world, mut queue: Mut<SpawnQueue>| {
        world.resource_scope(|world, mut controller: Mut<CompanionLifecycleController>| {
            controller.tick(world, &player, &mut *queue, enabled);
        });
    });
}

/// System: тикает SpawnQueue, выполняет сработавшие спавны
pub fn run_delayed_spawns(world: &mut World) {
    let delta = world.resource::<Time<Fixed>>().delta();
    let ready = world.resource_mut::<SpawnQueue>().advance(delta);
    if ready.is_empty() {
        return;
    }

    let enabled = world.resource::<ShadeSettings>().spawn_shade;
    world.resource_scope(|world, mut controller: Mut<CompanionLifecycleController>| {
        for request in ready {
            controller.complete_spawn(request, world, enabled);
        }
    });
}
