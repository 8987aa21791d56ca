//! Settings (персистентный флаг) и tuning компаньона
//!
//! `ShadeSettings` — то, что пользователь переключает в меню ("Spawn Shade? NO/YES").
//! `ShadeConfig` — константы поведения (дистанции, задержки, имена).
//! Оба читаются из JSON; отсутствующий файл = defaults.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Ошибки загрузки/сохранения конфигурации
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Глобальные настройки (переживают перезапуск игры)
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadeSettings {
    /// Спавнить ли компаньона вообще
    pub spawn_shade: bool,
}

impl Default for ShadeSettings {
    fn default() -> Self {
        Self { spawn_shade: true }
    }
}

impl ShadeSettings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Первый запуск (файла нет) — не ошибка, возвращаем defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match read_optional(path.as_ref())? {
            Some(json) => Self::from_json(&json),
            None => Ok(Self::default()),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        std::fs::write(path, self.to_json()?).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Верхняя граница задержки спавна (дольше — явно опечатка в конфиге)
pub const MAX_SPAWN_DELAY_SECS: f32 = 60.0;

/// Tuning компаньона
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadeConfig {
    /// Зарезервированное имя entity компаньона
    pub companion_name: String,
    /// Имя entity с фоновым звуком компаньона
    pub ambient_cue_name: String,
    /// Задержка перед спавном (игрок успевает отойти)
    pub spawn_delay_secs: f32,
    /// Смещение вверх от позиции игрока (не спавнить внутри игрока)
    pub spawn_height_offset: f32,
    /// Дальше этого — компаньон отстал/застрял, пересоздаём
    pub despawn_distance: f32,
    /// Радиус, в котором компаньон "видит" игрока
    pub detection_range: f32,
    /// Скорость преследования (units/sec)
    pub pursue_speed: f32,
    pub companion_max_health: u32,
}

impl Default for ShadeConfig {
    fn default() -> Self {
        Self {
            companion_name: "ShadeSnail.Shade".to_string(),
            ambient_cue_name: "Shade".to_string(),
            spawn_delay_secs: 1.5,
            spawn_height_offset: 2.0,
            despawn_distance: 25.0,
            detection_range: 15.0,
            pursue_speed: 6.0,
            companion_max_health: 10,
        }
    }
}

impl ShadeConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match read_optional(path.as_ref())? {
            Some(json) => Self::from_json(&json),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.companion_name.trim().is_empty() {
            return Err(ConfigError::Invalid("companion_name is empty".into()));
        }
        if !(0.0..=MAX_SPAWN_DELAY_SECS).contains(&self.spawn_delay_secs) {
            return Err(ConfigError::Invalid(format!(
                "spawn_delay_secs must be in 0..={}, got {}",
                MAX_SPAWN_DELAY_SECS, self.spawn_delay_secs
            )));
        }
        if !self.despawn_distance.is_finite() || self.despawn_distance <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "despawn_distance must be > 0, got {}",
                self.despawn_distance
            )));
        }
        if !self.pursue_speed.is_finite() || self.pursue_speed < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "pursue_speed must be >= 0, got {}",
                self.pursue_speed
            )));
        }
        Ok(())
    }
}

fn read_optional(path: &Path) -> Result<Option<String>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(json) => Ok(Some(json)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Событие от меню настроек
#[derive(Event, Debug, Clone, Copy)]
pub struct CompanionToggled {
    pub enabled: bool,
}

/// Система: применяет переключение из меню к ShadeSettings
pub fn apply_companion_toggle(
    mut toggles: EventReader<CompanionToggled>,
    mut settings: ResMut<ShadeSettings>,
) {
    // Последнее событие за тик побеждает
    if let Some(toggle) = toggles.read().last() {
        if settings.spawn_shade != toggle.enabled {
            settings.spawn_shade = toggle.enabled;
            crate::logger::log_info(&format!("Settings: spawn_shade = {}", toggle.enabled));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default_enabled() {
        assert!(ShadeSettings::default().spawn_shade);
    }

    #[test]
    fn test_settings_json() {
        let settings = ShadeSettings::from_json(r#"{ "spawn_shade": false }"#).unwrap();
        assert!(!settings.spawn_shade);

        // Пустой объект — defaults
        let settings = ShadeSettings::from_json("{}").unwrap();
        assert!(settings.spawn_shade);

        assert!(matches!(
            ShadeSettings::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_settings_save_and_load() {
        let dir = std::env::temp_dir().join(format!("shade_settings_{}", std::process::id()));
        let path = dir.join("settings.json");

        let settings = ShadeSettings { spawn_shade: false };
        settings.save(&path).unwrap();
        assert_eq!(ShadeSettings::load(&path).unwrap(), settings);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_settings_missing_file_is_default() {
        let path = std::env::temp_dir().join("shade_settings_does_not_exist.json");
        assert_eq!(ShadeSettings::load(path).unwrap(), ShadeSettings::default());
    }

    #[test]
    fn test_config_defaults() {
        let config = ShadeConfig::default();
        assert_eq!(config.companion_name, "ShadeSnail.Shade");
        assert_eq!(config.despawn_distance, 25.0);
        assert_eq!(config.spawn_delay_secs, 1.5);
        assert_eq!(config.spawn_height_offset, 2.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_partial_json_keeps_defaults() {
        let config = ShadeConfig::from_json(r#"{ "despawn_distance": 40.0 }"#).unwrap();
        assert_eq!(config.despawn_distance, 40.0);
        assert_eq!(config.spawn_delay_secs, 1.5);
    }

    #[test]
    fn test_config_rejects_invalid_values() {
        let err = ShadeConfig::from_json(r#"{ "despawn_distance": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = ShadeConfig::from_json(r#"{ "spawn_delay_secs": -1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = ShadeConfig::from_json(r#"{ "companion_name": "  " }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_config_rejects_unbounded_spawn_delay() {
        // 1e20 не влезает в Duration, 1e39 переполняет f32 в inf
        for json in [
            r#"{ "spawn_delay_secs": 1e20 }"#,
            r#"{ "spawn_delay_secs": 1e39 }"#,
            r#"{ "spawn_delay_secs": 60.5 }"#,
        ] {
            let err = ShadeConfig::from_json(json).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{} accepted", json);
        }

        let config = ShadeConfig::from_json(r#"{ "spawn_delay_secs": 60.0 }"#).unwrap();
        assert_eq!(config.spawn_delay_secs, MAX_SPAWN_DELAY_SECS);
    }

    #[test]
    fn test_config_rejects_infinite_distances() {
        let config = ShadeConfig {
            despawn_distance: f32::INFINITY,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = ShadeConfig {
            pursue_speed: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
