//! CompanionLifecycleController — существует ли компаньон и где
//!
//! Раз в тик:
//! 1. Ищем компаньона по зарезервированному имени
//! 2. Нет компаньона + нет pending спавна + фича включена + игрок может действовать
//!    → ставим latch, планируем отложенный спавн над игроком
//! 3. Есть компаньон + (отстал дальше порога ИЛИ фича выключена) → уничтожаем сразу
//! 4. Фоновый звук: mute пока фича включена
//!
//! Коллабораторы (World, таймеры, игрок) — через traits, чтобы логику можно было
//! гонять без Bevy App.

use bevy::prelude::*;
use std::time::Duration;

use crate::config::ShadeConfig;

/// Поиск/создание/удаление entity по имени
pub trait EntityDirectory {
    fn find_by_name(&mut self, name: &str) -> Option<Entity>;

    /// Позиция на плоскости (глубина игнорируется)
    fn position_of(&mut self, entity: Entity) -> Option<Vec2>;

    fn spawn(&mut self, template: &CompanionTemplate, position: Vec2) -> Entity;

    /// `false` — entity уже нет (no-op, не ошибка)
    fn destroy(&mut self, entity: Entity) -> bool;
}

/// Фоновый звук компаньона
pub trait AmbientAudio {
    /// `false` — источника звука нет
    fn set_muted(&mut self, cue_name: &str, muted: bool) -> bool;
}

pub trait PlayerState {
    fn position(&self) -> Vec2;
    fn accepting_input(&self) -> bool;
}

/// Single-shot отложенный запуск SpawnRequest
pub trait Scheduler {
    fn now(&self) -> Duration;
    fn after(&mut self, delay: Duration, request: SpawnRequest);
}

/// Спавн в полёте: позиция захвачена в момент планирования
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    pub position: Vec2,
    pub issued_at: Duration,
    /// Поколение сессии; reset делает старые запросы невалидными
    pub session: u64,
}

/// Что создаём при спавне
#[derive(Debug, Clone, PartialEq)]
pub struct CompanionTemplate {
    pub name: String,
    pub max_health: u32,
}

/// Параметры контроллера (копия из ShadeConfig)
#[derive(Debug, Clone, PartialEq)]
pub struct CompanionTuning {
    pub companion_name: String,
    pub ambient_cue_name: String,
    pub spawn_delay: Duration,
    pub spawn_height_offset: f32,
    pub despawn_distance: f32,
    pub max_health: u32,
}

impl Default for CompanionTuning {
    fn default() -> Self {
        Self::from(&ShadeConfig::default())
    }
}

/// Задержка, если в конфиге значение, непредставимое как Duration
const FALLBACK_SPAWN_DELAY: Duration = Duration::from_millis(1500);

impl From<&ShadeConfig> for CompanionTuning {
    fn from(config: &ShadeConfig) -> Self {
        // Resource может быть вставлен без validate()
        let spawn_delay = Duration::try_from_secs_f32(config.spawn_delay_secs).unwrap_or_else(|_| {
            crate::logger::log_warning(&format!(
                "Companion: spawn_delay_secs {} out of range, using {:?}",
                config.spawn_delay_secs, FALLBACK_SPAWN_DELAY
            ));
            FALLBACK_SPAWN_DELAY
        });

        Self {
            companion_name: config.companion_name.clone(),
            ambient_cue_name: config.ambient_cue_name.clone(),
            spawn_delay,
            spawn_height_offset: config.spawn_height_offset,
            despawn_distance: config.despawn_distance,
            max_health: config.companion_max_health,
        }
    }
}

/// Почему компаньон был уничтожен
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DespawnReason {
    /// Отстал или застрял
    OutOfRange { distance: f32 },
    /// Фича выключена в настройках
    Disabled,
    /// Новая сессия
    SessionReset,
}

/// Результат одного тика (для логов и тестов)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Ничего не делали (нет условий для спавна или спавн уже в полёте)
    Waiting,
    SpawnScheduled(SpawnRequest),
    Tracking { entity: Entity, distance: f32 },
    Despawned { entity: Entity, reason: DespawnReason },
}

/// Результат отложенного спавна
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnOutcome {
    Spawned(Entity),
    /// Запрос из прошлой сессии — выброшен, latch не трогаем
    Stale,
    /// Фича выключилась во время задержки
    Disabled,
    /// Компаньон уже есть (инвариант "не больше одного")
    AlreadyPresent(Entity),
}

/// Контроллер жизненного цикла компаньона
///
/// Один экземпляр на процесс; reset на каждый старт сессии.
#[derive(Resource, Debug, Clone, Default)]
pub struct CompanionLifecycleController {
    tuning: CompanionTuning,
    spawn_pending: bool,
    session: u64,
}

impl CompanionLifecycleController {
    pub fn new(tuning: CompanionTuning) -> Self {
        Self {
            tuning,
            spawn_pending: false,
            session: 0,
        }
    }

    pub fn tuning(&self) -> &CompanionTuning {
        &self.tuning
    }

    pub fn spawn_pending(&self) -> bool {
        self.spawn_pending
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    /// Per-tick проверка (шаги 1–4)
    pub fn tick<D, P, S>(
        &mut self,
        directory: &mut D,
        player: &P,
        scheduler: &mut S,
        enabled: bool,
    ) -> TickOutcome
    where
        D: EntityDirectory + AmbientAudio,
        P: PlayerState,
        S: Scheduler,
    {
        let existing = directory.find_by_name(&self.tuning.companion_name);

        let outcome = match existing {
            None if !self.spawn_pending && enabled && player.accepting_input() => {
                let request = SpawnRequest {
                    position: player.position() + Vec2::Y * self.tuning.spawn_height_offset,
                    issued_at: scheduler.now(),
                    session: self.session,
                };

                // Latch до планирования
                self.spawn_pending = true;
                scheduler.after(self.tuning.spawn_delay, request);

                crate::logger::log(&format!(
                    "Companion: spawn scheduled at {:?} in {:?} (session {})",
                    request.position, self.tuning.spawn_delay, request.session
                ));
                TickOutcome::SpawnScheduled(request)
            }
            None => TickOutcome::Waiting,
            Some(entity) => self.check_removal(directory, player, entity, enabled),
        };

        // Независимо от шагов выше
        directory.set_muted(&self.tuning.ambient_cue_name, enabled);

        outcome
    }

    fn check_removal<D: EntityDirectory>(
        &self,
        directory: &mut D,
        player: &impl PlayerState,
        entity: Entity,
        enabled: bool,
    ) -> TickOutcome {
        // Позиции нет (entity без Transform) — трактуем как бесконечно далеко
        let distance = directory
            .position_of(entity)
            .map(|pos| planar_distance(pos, player.position()))
            .unwrap_or(f32::INFINITY);

        let reason = if !enabled {
            Some(DespawnReason::Disabled)
        } else if distance > self.tuning.despawn_distance {
            Some(DespawnReason::OutOfRange { distance })
        } else {
            None
        };

        match reason {
            Some(reason) => {
                directory.destroy(entity);
                crate::logger::log_info(&format!("Companion {:?} destroyed: {:?}", entity, reason));
                TickOutcome::Despawned { entity, reason }
            }
            None => TickOutcome::Tracking { entity, distance },
        }
    }

    /// Тело отложенного спавна
    ///
    /// Запрос из прошлой сессии выбрасывается, не трогая latch (им может владеть
    /// более новый запрос). Актуальный запрос снимает latch и перепроверяет
    /// условия перед созданием.
    pub fn complete_spawn<D: EntityDirectory>(
        &mut self,
        request: SpawnRequest,
        directory: &mut D,
        enabled: bool,
    ) -> SpawnOutcome {
        if request.session != self.session {
            crate::logger::log(&format!(
                "Companion: dropped stale spawn from session {} (current {})",
                request.session, self.session
            ));
            return SpawnOutcome::Stale;
        }

        self.spawn_pending = false;

        if !enabled {
            crate::logger::log("Companion: spawn skipped, feature disabled during delay");
            return SpawnOutcome::Disabled;
        }

        if let Some(existing) = directory.find_by_name(&self.tuning.companion_name) {
            crate::logger::log_warning(&format!(
                "Companion: spawn skipped, {:?} already present",
                existing
            ));
            return SpawnOutcome::AlreadyPresent(existing);
        }

        let template = CompanionTemplate {
            name: self.tuning.companion_name.clone(),
            max_health: self.tuning.max_health,
        };
        let entity = directory.spawn(&template, request.position);

        crate::logger::log_info(&format!(
            "Companion {:?} '{}' spawned at {:?}",
            entity, template.name, request.position
        ));
        SpawnOutcome::Spawned(entity)
    }

    /// Новая сессия: уничтожить компаньона, снять latch, инвалидировать pending спавны
    pub fn reset<D: EntityDirectory>(&mut self, directory: &mut D) -> Option<Entity> {
        let destroyed = directory
            .find_by_name(&self.tuning.companion_name)
            .filter(|entity| directory.destroy(*entity));

        self.spawn_pending = false;
        self.session = self.session.wrapping_add(1);

        crate::logger::log_info(&format!(
            "Companion: session reset → session {} (destroyed: {:?}, reason: {:?})",
            self.session,
            destroyed,
            DespawnReason::SessionReset
        ));
        destroyed
    }
}

/// Расстояние на плоскости x/y
pub fn planar_distance(a: Vec2, b: Vec2) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}
