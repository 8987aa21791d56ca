//! SpawnQueue — single-shot таймеры для отложенного спавна
//!
//! Тикается из FixedUpdate (`Time<Fixed>`), кооперативно: ожидание не
//! блокирует кадр, готовые запросы забираются пачкой.

use bevy::prelude::*;
use std::time::Duration;

use super::controller::{Scheduler, SpawnRequest};

#[derive(Debug)]
struct DelayedSpawn {
    timer: Timer,
    request: SpawnRequest,
}

#[derive(Resource, Debug, Default)]
pub struct SpawnQueue {
    elapsed: Duration,
    jobs: Vec<DelayedSpawn>,
}

impl SpawnQueue {
    /// Продвинуть время, вернуть сработавшие запросы (в порядке планирования)
    pub fn advance(&mut self, delta: Duration) -> Vec<SpawnRequest> {
        self.elapsed += delta;

        let mut ready = Vec::new();
        self.jobs.retain_mut(|job| {
            job.timer.tick(delta);
            if job.timer.finished() {
                ready.push(job.request);
                false
            } else {
                true
            }
        });
        ready
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

impl Scheduler for SpawnQueue {
    fn now(&self) -> Duration {
        self.elapsed
    }

    fn after(&mut self, delay: Duration, request: SpawnRequest) {
        self.jobs.push(DelayedSpawn {
            timer: Timer::new(delay, TimerMode::Once),
            request,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(session: u64) -> SpawnRequest {
        SpawnRequest {
            position: Vec2::new(1.0, 2.0),
            issued_at: Duration::ZERO,
            session,
        }
    }

    #[test]
    fn test_job_fires_once_after_delay() {
        let mut queue = SpawnQueue::default();
        queue.after(Duration::from_millis(1500), request(0));

        assert!(queue.advance(Duration::from_millis(1000)).is_empty());
        assert_eq!(queue.len(), 1);

        let ready = queue.advance(Duration::from_millis(500));
        assert_eq!(ready, vec![request(0)]);
        assert!(queue.is_empty());

        assert!(queue.advance(Duration::from_secs(10)).is_empty());
    }

    #[test]
    fn test_now_tracks_elapsed_time() {
        let mut queue = SpawnQueue::default();
        queue.advance(Duration::from_millis(250));
        queue.advance(Duration::from_millis(250));
        assert_eq!(queue.now(), Duration::from_millis(500));
    }

    #[test]
    fn test_zero_delay_fires_on_next_advance() {
        let mut queue = SpawnQueue::default();
        queue.after(Duration::ZERO, request(3));
        assert_eq!(queue.advance(Duration::ZERO), vec![request(3)]);
    }
}
