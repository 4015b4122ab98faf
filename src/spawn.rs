/// Periodic spawning of enemies and bonuses, plus the animation clock.
///
/// Timers are plain accumulators advanced by the fixed tick delta, so a run
/// with a seeded RNG is fully reproducible.

use std::time::Duration;

use rand::Rng;

use crate::config::{Config, Size, SpeedRange};
use crate::entities::{Entity, EntityKind, Sprite};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Timer {
    interval: Duration,
    elapsed: Duration,
}

impl Timer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
        }
    }

    /// Add `dt` and return how many times the timer fired.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.interval.is_zero() {
            return 0;
        }
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            fired += 1;
        }
        fired
    }
}

/// How many of each periodic event fired during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fired {
    pub enemies: u32,
    pub bonuses: u32,
    pub animation: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Timers {
    pub enemy: Timer,
    pub bonus: Timer,
    pub animation: Timer,
}

impl Timers {
    pub fn from_config(config: &Config) -> Self {
        Self {
            enemy: Timer::new(config.enemy_interval()),
            bonus: Timer::new(config.bonus_interval()),
            animation: Timer::new(config.animation_interval()),
        }
    }

    pub fn advance(&mut self, dt: Duration) -> Fired {
        Fired {
            enemies: self.enemy.advance(dt),
            bonuses: self.bonus.advance(dt),
            animation: self.animation.advance(dt),
        }
    }
}

fn roll_speed(range: SpeedRange, rng: &mut impl Rng) -> i32 {
    rng.gen_range(range.min..=range.max)
}

/// New enemy just past the right edge at a random height.
pub fn spawn_enemy(sprite: Sprite, viewport: Size, speed: SpeedRange, rng: &mut impl Rng) -> Entity {
    let max_y = (viewport.h - sprite.size().h).max(0);
    let y = rng.gen_range(0..=max_y);
    let speed = roll_speed(speed, rng);
    log::debug!("enemy spawned at y={} speed={}", y, speed);
    Entity {
        kind: EntityKind::Enemy,
        sprite,
        rect: sprite.rect_at(viewport.w, y),
        speed,
    }
}

/// New bonus on the top edge at a random column.
pub fn spawn_bonus(sprite: Sprite, viewport: Size, speed: SpeedRange, rng: &mut impl Rng) -> Entity {
    let max_x = (viewport.w - sprite.size().w).max(0);
    let x = rng.gen_range(0..=max_x);
    let speed = roll_speed(speed, rng);
    log::debug!("bonus spawned at x={} speed={}", x, speed);
    Entity {
        kind: EntityKind::Bonus,
        sprite,
        rect: sprite.rect_at(x, 0),
        speed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_fires_on_interval() {
        let mut t = Timer::new(Duration::from_millis(100));
        assert_eq!(t.advance(Duration::from_millis(60)), 0);
        assert_eq!(t.advance(Duration::from_millis(40)), 1);
        assert_eq!(t.advance(Duration::from_millis(99)), 0);
        assert_eq!(t.advance(Duration::from_millis(1)), 1);
    }

    #[test]
    fn timer_catches_up_after_long_step() {
        let mut t = Timer::new(Duration::from_millis(125));
        assert_eq!(t.advance(Duration::from_millis(400)), 3);
        assert_eq!(t.advance(Duration::from_millis(100)), 1);
    }

    #[test]
    fn zero_interval_never_fires() {
        let mut t = Timer::new(Duration::ZERO);
        assert_eq!(t.advance(Duration::from_secs(5)), 0);
    }
}
