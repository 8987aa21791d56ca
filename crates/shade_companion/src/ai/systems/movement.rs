//! AI movement systems.

use bevy::prelude::*;

use crate::ai::components::{ShadeBrain, ShadeState};
use crate::components::Player;
use crate::config::ShadeConfig;

/// Ближе не подлетаем (не залезаем в игрока)
const MIN_DISTANCE: f32 = 0.5;

/// Система: преследование игрока в состоянии Pursue
///
/// Движение только в плоскости x/y, глубина (z) не меняется.
pub fn pursue_player(
    mut shades: Query<(&mut Transform, &ShadeBrain), Without<Player>>,
    player: Query<&Transform, With<Player>>,
    config: Res<ShadeConfig>,
    time: Res<Time<Fixed>>,
) {
    let Ok(player_transform) = player.single() else {
        return;
    };
    let target = player_transform.translation.truncate();
    let max_step = config.pursue_speed * time.delta_secs();

    for (mut transform, brain) in shades.iter_mut() {
        if brain.state != ShadeState::Pursue {
            continue;
        }

        let position = transform.translation.truncate();
        let to_player = target - position;
        let distance = to_player.length();

        if distance <= MIN_DISTANCE {
            continue;
        }

        let step = max_step.min(distance - MIN_DISTANCE);
        let next = position + to_player / distance * step;
        transform.translation.x = next.x;
        transform.translation.y = next.y;
    }
}
