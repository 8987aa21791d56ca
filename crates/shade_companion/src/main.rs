//! Headless симуляция ShadeSnail
//!
//! Игрок бежит вправо быстрее, чем летит Shade: компаньон отстаёт,
//! пересоздаётся рядом, и так по кругу.
//!
//! Usage: shade_companion [settings.json] [config.json]

use bevy::prelude::*;
use shade_companion::{
    create_headless_app, log_error, log_info, AmbientCue, Player, SessionStarted, ShadeBrain,
    ShadeConfig, ShadePlugin, ShadeSettings,
};

const TICKS: usize = 600;
const PLAYER_SPEED: f32 = 8.0;

fn main() {
    let mut args = std::env::args().skip(1);
    let settings_path = args.next().unwrap_or_else(|| "shade_settings.json".to_string());
    let config_path = args.next().unwrap_or_else(|| "shade_config.json".to_string());

    let settings = ShadeSettings::load(&settings_path).unwrap_or_else(|e| {
        log_error(&format!("Settings {}: {} — using defaults", settings_path, e));
        ShadeSettings::default()
    });
    let config = ShadeConfig::load(&config_path).unwrap_or_else(|e| {
        log_error(&format!("Config {}: {} — using defaults", config_path, e));
        ShadeConfig::default()
    });

    let mut app = create_headless_app();
    let cue_name = config.ambient_cue_name.clone();
    let companion_name = config.companion_name.clone();
    app.insert_resource(settings).insert_resource(config).add_plugins(ShadePlugin);

    app.world_mut()
        .spawn((Name::new("Knight"), Player, Transform::default()));
    app.world_mut()
        .spawn((Name::new(cue_name), AmbientCue::default()));
    app.world_mut().send_event(SessionStarted);

    log_info(&format!("Starting ShadeSnail headless simulation ({} ticks)", TICKS));

    for tick in 0..TICKS {
        advance_player(app.world_mut(), PLAYER_SPEED / 60.0);
        app.update();

        if tick % 60 == 0 {
            report(app.world_mut(), tick, &companion_name);
        }
    }

    if let Err(e) = app.world().resource::<ShadeSettings>().save(&settings_path) {
        log_error(&format!("Failed to save settings: {}", e));
    }

    log_info("Simulation complete!");
}

fn advance_player(world: &mut World, step: f32) {
    let mut query = world.query_filtered::<&mut Transform, With<Player>>();
    if let Some(mut transform) = query.iter_mut(world).next() {
        transform.translation.x += step;
    }
}

fn report(world: &mut World, tick: usize, companion_name: &str) {
    let player_x = world
        .query_filtered::<&Transform, With<Player>>()
        .iter(world)
        .next()
        .map(|t| t.translation.x)
        .unwrap_or_default();

    let mut shades = world.query::<(&Name, &Transform, &ShadeBrain)>();
    let shade = shades
        .iter(world)
        .find(|(name, _, _)| name.as_str() == companion_name)
        .map(|(_, transform, brain)| (transform.translation.truncate(), brain.state));

    match shade {
        Some((position, state)) => log_info(&format!(
            "Tick {}: player x={:.1}, shade at {:?} ({})",
            tick,
            player_x,
            position,
            state.name()
        )),
        None => log_info(&format!("Tick {}: player x={:.1}, no shade", tick, player_x)),
    }
}
