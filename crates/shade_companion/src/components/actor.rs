//! Здоровье акторов

use bevy::prelude::*;

/// Здоровье актора
///
/// Инвариант: 0 ≤ current. `current` может превышать `max` (см. `boost`).
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    /// Поднять здоровье без клампа к max
    pub fn boost(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_damage() {
        let mut health = Health::new(100);
        assert_eq!(health.current, 100);

        health.take_damage(30);
        assert_eq!(health.current, 70);
        assert!(health.is_alive());

        health.take_damage(100); // Saturating sub
        assert_eq!(health.current, 0);
        assert!(!health.is_alive());
    }

    #[test]
    fn test_health_boost_ignores_max() {
        let mut health = Health { current: 5, max: 10 };
        health.boost(11);
        assert_eq!(health.current, 16);

        health.boost(u32::MAX);
        assert_eq!(health.current, u32::MAX);
    }
}
