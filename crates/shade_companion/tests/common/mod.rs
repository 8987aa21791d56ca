//! Общие helpers для integration тестов

#![allow(dead_code)]

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use shade_companion::*;

/// Шаг виртуального времени на один `app.update()`
pub const FRAME: Duration = Duration::from_millis(20);

/// Headless App с детерминированным временем
pub fn create_app(config: ShadeConfig) -> App {
    let mut app = create_headless_app();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .insert_resource(config)
        .add_plugins(ShadePlugin);
    app
}

pub fn spawn_player(app: &mut App, position: Vec2) -> Entity {
    app.world_mut()
        .spawn((
            Name::new("Knight"),
            Player,
            Transform::from_translation(position.extend(0.0)),
        ))
        .id()
}

pub fn spawn_ambient_cue(app: &mut App) -> Entity {
    app.world_mut()
        .spawn((Name::new("Shade"), AmbientCue::default()))
        .id()
}

pub fn run_for(app: &mut App, duration: Duration) {
    let frames = duration.as_millis().div_ceil(FRAME.as_millis());
    for _ in 0..frames {
        app.update();
    }
}

/// Компаньоны, созданные контроллером (маркер + зарезервированное имя)
pub fn companions(app: &mut App) -> Vec<Entity> {
    let name = app.world().resource::<ShadeConfig>().companion_name.clone();
    let world = app.world_mut();
    let mut query = world.query_filtered::<(Entity, &Name), With<Companion>>();
    query
        .iter(world)
        .filter(|(_, n)| n.as_str() == name)
        .map(|(e, _)| e)
        .collect()
}

pub fn position(app: &App, entity: Entity) -> Vec2 {
    app.world()
        .get::<Transform>(entity)
        .map(|t| t.translation.truncate())
        .unwrap_or(Vec2::NAN)
}

pub fn controller(app: &App) -> &CompanionLifecycleController {
    app.world().resource::<CompanionLifecycleController>()
}
