//! Shade behavior integration tests
//!
//! Проверяем, что override работает внутри полного App:
//! - компаньон враждебен и преследует игрока
//! - обычная (дружелюбная) Shade остаётся в Idle
//! - компаньона нельзя убить, обычную — можно

mod common;

use std::time::Duration;

use bevy::prelude::*;
use common::*;
use shade_companion::*;

/// Игрок в (0, 0) + компаньон, успевший заспавниться
fn spawn_companion(app: &mut App) -> (Entity, Entity) {
    let player = spawn_player(app, Vec2::ZERO);
    run_for(app, Duration::from_secs(2));

    let shades = companions(app);
    assert_eq!(shades.len(), 1, "companion did not spawn");
    (player, shades[0])
}

/// Test: компаньон переходит в Pursue и догоняет игрока
#[test]
fn test_companion_pursues_player() {
    let mut app = create_app(ShadeConfig::default());
    let (player, shade) = spawn_companion(&mut app);

    app.world_mut()
        .get_mut::<Transform>(player)
        .unwrap()
        .translation = Vec3::new(10.0, 0.0, 0.0);

    run_for(&mut app, Duration::from_secs(3));

    let brain = app.world().get::<ShadeBrain>(shade).unwrap();
    assert_eq!(brain.state, ShadeState::Pursue);
    // Переменная хоста не испорчена — override был временным
    assert!(brain.friendly);

    let distance = position(&app, shade).distance(Vec2::new(10.0, 0.0));
    assert!(distance < 2.0, "companion lagging: distance {}", distance);
}

/// Test: компаньон преследует даже если игрок вне detection_range
#[test]
fn test_companion_alerts_outside_detection_range() {
    let config = ShadeConfig {
        detection_range: 0.1,
        ..Default::default()
    };
    let mut app = create_app(config);
    let (_, shade) = spawn_companion(&mut app);

    run_for(&mut app, Duration::from_millis(200));
    assert_eq!(
        app.world().get::<ShadeBrain>(shade).unwrap().state,
        ShadeState::Pursue
    );
}

/// Test: обычная Shade (не компаньон) дружелюбна и не двигается
#[test]
fn test_regular_shade_stays_idle() {
    let mut app = create_app(ShadeConfig::default());
    spawn_player(&mut app, Vec2::ZERO);
    let hollow = app
        .world_mut()
        .spawn((
            Name::new("Hollow Shade"),
            Transform::from_xyz(5.0, 0.0, 0.0),
            Health::new(10),
            ShadeBrain::default(),
        ))
        .id();

    run_for(&mut app, Duration::from_secs(1));

    let brain = app.world().get::<ShadeBrain>(hollow).unwrap();
    assert!(brain.player_in_range);
    assert!(brain.player_exposed);
    assert_eq!(brain.state, ShadeState::Idle);
    assert_eq!(position(&app, hollow), Vec2::new(5.0, 0.0));
}

/// Test: враждебная обычная Shade тоже идёт в Pursue (FSM хоста без override)
#[test]
fn test_hostile_regular_shade_pursues_when_in_range() {
    let mut app = create_app(ShadeConfig::default());
    spawn_player(&mut app, Vec2::ZERO);
    let hollow = app
        .world_mut()
        .spawn((
            Name::new("Hollow Shade"),
            Transform::from_xyz(5.0, 0.0, 0.0),
            Health::new(10),
            ShadeBrain {
                friendly: false,
                ..Default::default()
            },
        ))
        .id();

    run_for(&mut app, Duration::from_millis(200));
    assert_eq!(
        app.world().get::<ShadeBrain>(hollow).unwrap().state,
        ShadeState::Pursue
    );
}

/// Test: компаньон переживает любой урон
#[test]
fn test_companion_is_unkillable() {
    let mut app = create_app(ShadeConfig::default());
    let (_, shade) = spawn_companion(&mut app);

    for _ in 0..10 {
        app.world_mut().send_event(DamageHit {
            target: shade,
            attacker: None,
            damage: 9999,
        });
        run_for(&mut app, Duration::from_millis(40));
    }

    let health = app.world().get::<Health>(shade).unwrap();
    assert!(health.is_alive());
    assert!(app.world().get::<Dead>(shade).is_none());
    assert_eq!(companions(&mut app), vec![shade]);
}

/// Test: обычная Shade умирает, AI отключается
#[test]
fn test_regular_shade_dies() {
    let mut app = create_app(ShadeConfig::default());
    let hollow = app
        .world_mut()
        .spawn((
            Name::new("Hollow Shade"),
            Transform::default(),
            Health::new(10),
            ShadeBrain::default(),
        ))
        .id();

    app.world_mut().send_event(DamageHit {
        target: hollow,
        attacker: None,
        damage: 10,
    });
    run_for(&mut app, Duration::from_millis(100));

    assert_eq!(app.world().get::<Health>(hollow).unwrap().current, 0);
    assert!(app.world().get::<Dead>(hollow).is_some());
    assert!(app.world().get::<ShadeBrain>(hollow).is_none());
}
