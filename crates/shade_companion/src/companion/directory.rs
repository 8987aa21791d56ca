//! World как EntityDirectory / AmbientAudio + снимок игрока

use bevy::prelude::*;

use super::controller::{AmbientAudio, CompanionTemplate, EntityDirectory, PlayerState};
use crate::ai::ShadeBrain;
use crate::components::{AmbientCue, Companion, Health, Player, PlayerControl};

impl EntityDirectory for World {
    fn find_by_name(&mut self, name: &str) -> Option<Entity> {
        let mut query = self.query::<(Entity, &Name)>();
        query
            .iter(self)
            .find(|(_, entity_name)| entity_name.as_str() == name)
            .map(|(entity, _)| entity)
    }

    fn position_of(&mut self, entity: Entity) -> Option<Vec2> {
        self.get::<Transform>(entity)
            .map(|transform| transform.translation.truncate())
    }

    fn spawn(&mut self, template: &CompanionTemplate, position: Vec2) -> Entity {
        World::spawn(
            self,
            (
                Name::new(template.name.clone()),
                Companion,
                Transform::from_translation(position.extend(0.0)),
                Health::new(template.max_health),
                ShadeBrain::default(),
            ),
        )
        .id()
    }

    fn destroy(&mut self, entity: Entity) -> bool {
        if !self.entities().contains(entity) {
            return false;
        }
        let _ = self.despawn(entity);
        true
    }
}

impl AmbientAudio for World {
    fn set_muted(&mut self, cue_name: &str, muted: bool) -> bool {
        let mut query = self.query::<(&Name, &mut AmbientCue)>();
        let Some((_, mut cue)) = query
            .iter_mut(self)
            .find(|(name, _)| name.as_str() == cue_name)
        else {
            return false;
        };

        cue.set_if_neq(AmbientCue { muted });
        true
    }
}

/// Снимок состояния игрока на текущий тик
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSnapshot {
    pub position: Vec2,
    pub accepting_input: bool,
}

impl PlayerSnapshot {
    /// `None` — игрока нет (меню, загрузка сцены)
    pub fn read(world: &mut World) -> Option<Self> {
        let mut query = world.query_filtered::<(&Transform, &PlayerControl), With<Player>>();
        query
            .iter(world)
            .next()
            .map(|(transform, control)| Self {
                position: transform.translation.truncate(),
                accepting_input: control.accepting_input,
            })
    }
}

impl PlayerState for PlayerSnapshot {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn accepting_input(&self) -> bool {
        self.accepting_input
    }
}
