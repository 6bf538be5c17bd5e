use crate::defaults::{
    POWER_UP_DURATION_MS, POWER_UP_LIFETIME_MS, POWER_UP_MAX_SPAWN_ATTEMPTS, POWER_UP_SCORE_STEP,
};
use crate::session_rng::RandomSource;
use crate::validation::{is_valid_food_position, is_valid_point};
use super::food::FoodGenerator;
use super::entity::Snake;
use super::timers::OneShotTimers;
use super::types::{Point, PowerUpType};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PowerUp {
    pub kind: PowerUpType,
    pub position: Point,
    pub duration_ms: u64,
    pub active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PowerUpTimer {
    Expiry,
    Despawn,
}

/// What happened to the slot when timers fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpNotice {
    Expired(PowerUpType),
    Despawned(PowerUpType),
}

/// Holds at most one power-up, either waiting on the grid or active.
#[derive(Clone, Debug, Default)]
pub struct PowerUpManager {
    slot: Option<PowerUp>,
    timers: OneShotTimers<PowerUpTimer>,
}

impl PowerUpManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn power_up(&self) -> Option<&PowerUp> {
        self.slot.as_ref()
    }

    pub fn active_effect(&self) -> Option<PowerUpType> {
        self.slot.as_ref().filter(|p| p.active).map(|p| p.kind)
    }

    pub fn should_spawn(score: u32) -> bool {
        score > 0 && score % POWER_UP_SCORE_STEP == 0
    }

    /// Places a new power-up if `score` is on a threshold and the slot is
    /// empty. Gives up silently when no free cell turns up.
    pub fn try_spawn(
        &mut self,
        score: u32,
        grid_size: u32,
        snake: &Snake,
        food: &Point,
        now_ms: u64,
        rng: &mut impl RandomSource,
    ) -> Option<&PowerUp> {
        if !Self::should_spawn(score) || self.slot.is_some() {
            return None;
        }

        let position = (0..POWER_UP_MAX_SPAWN_ATTEMPTS)
            .map(|_| FoodGenerator::random_cell(grid_size, rng))
            .find(|cell| {
                is_valid_point(cell, grid_size) && is_valid_food_position(cell, snake) && cell != food
            })?;

        let kind = PowerUpType::ALL[rng.next_below(PowerUpType::ALL.len() as u32) as usize];
        self.slot = Some(PowerUp {
            kind,
            position,
            duration_ms: POWER_UP_DURATION_MS,
            active: false,
        });
        self.timers.schedule(now_ms, POWER_UP_LIFETIME_MS, PowerUpTimer::Despawn);
        self.slot.as_ref()
    }

    pub fn is_collision(&self, point: &Point) -> bool {
        self.slot
            .as_ref()
            .is_some_and(|p| !p.active && p.position == *point)
    }

    pub fn activate(&mut self, now_ms: u64) -> Option<PowerUpType> {
        let power_up = self.slot.as_mut().filter(|p| !p.active)?;
        power_up.active = true;
        let (kind, duration_ms) = (power_up.kind, power_up.duration_ms);

        self.timers.cancel(PowerUpTimer::Despawn);
        self.timers.schedule(now_ms, duration_ms, PowerUpTimer::Expiry);
        Some(kind)
    }

    /// Applies every timer due at `now_ms`.
    pub fn advance(&mut self, now_ms: u64) -> Vec<PowerUpNotice> {
        let mut notices = Vec::new();
        for timer in self.timers.fire_due(now_ms) {
            match (timer, self.slot.as_ref()) {
                (PowerUpTimer::Expiry, Some(p)) if p.active => {
                    notices.push(PowerUpNotice::Expired(p.kind));
                    self.slot = None;
                }
                (PowerUpTimer::Despawn, Some(p)) if !p.active => {
                    notices.push(PowerUpNotice::Despawned(p.kind));
                    self.slot = None;
                }
                _ => {}
            }
        }
        notices
    }

    pub fn remaining_effect_ms(&self, now_ms: u64) -> Option<u64> {
        self.active_effect()?;
        self.timers
            .due_at(PowerUpTimer::Expiry)
            .map(|due| due.saturating_sub(now_ms))
    }

    pub fn score_multiplier(&self) -> u32 {
        self.active_effect().map_or(1, |kind| kind.score_multiplier())
    }

    pub fn speed_percent(&self) -> u32 {
        self.active_effect().map_or(100, |kind| kind.speed_percent())
    }

    pub fn speed_modifier(&self) -> f64 {
        self.speed_percent() as f64 / 100.0
    }

    pub fn is_invincible(&self) -> bool {
        self.active_effect() == Some(PowerUpType::Invincible)
    }

    /// Drops the slot and every outstanding timer.
    pub fn clear(&mut self) {
        self.slot = None;
        self.timers.cancel_all();
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, kind: PowerUpType, position: Point, now_ms: u64) {
        self.slot = Some(PowerUp {
            kind,
            position,
            duration_ms: POWER_UP_DURATION_MS,
            active: false,
        });
        self.timers.schedule(now_ms, POWER_UP_LIFETIME_MS, PowerUpTimer::Despawn);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session_rng::SessionRng;
    use crate::session_rng::test_support::ScriptedRng;
    use crate::snake::Direction;

    fn snake() -> Snake {
        Snake::new(Point::new(10, 10), Direction::Up, 3)
    }

    #[test]
    fn test_spawn_threshold() {
        assert!(!PowerUpManager::should_spawn(0));
        assert!(!PowerUpManager::should_spawn(40));
        assert!(PowerUpManager::should_spawn(50));
        assert!(PowerUpManager::should_spawn(100));
        assert!(!PowerUpManager::should_spawn(110));
    }

    #[test]
    fn test_spawn_at_fifty_lands_on_free_cell() {
        let mut manager = PowerUpManager::new();
        let mut rng = SessionRng::new(42);
        let food = Point::new(3, 3);
        let spawned = manager.try_spawn(50, 20, &snake(), &food, 0, &mut rng).cloned();
        let spawned = spawned.unwrap();
        assert!(is_valid_point(&spawned.position, 20));
        assert!(!snake().contains(&spawned.position));
        assert_ne!(spawned.position, food);
        assert!(!spawned.active);
        assert_eq!(spawned.duration_ms, 5_000);
    }

    #[test]
    fn test_spawn_is_noop_while_slot_taken() {
        let mut manager = PowerUpManager::new();
        let mut rng = SessionRng::new(1);
        let food = Point::new(0, 0);
        manager.try_spawn(50, 20, &snake(), &food, 0, &mut rng);
        let first = manager.power_up().cloned();
        assert!(manager.try_spawn(100, 20, &snake(), &food, 0, &mut rng).is_none());
        assert_eq!(manager.power_up().cloned(), first);
    }

    #[test]
    fn test_below_threshold_does_not_spawn() {
        let mut manager = PowerUpManager::new();
        let mut rng = SessionRng::new(1);
        assert!(manager.try_spawn(30, 20, &snake(), &Point::new(0, 0), 0, &mut rng).is_none());
        assert!(manager.power_up().is_none());
    }

    #[test]
    fn test_spawn_aborts_when_every_sample_is_occupied() {
        let mut manager = PowerUpManager::new();
        // Every sample is the head cell.
        let mut rng = ScriptedRng::new(vec![10]);
        assert!(manager.try_spawn(50, 20, &snake(), &Point::new(0, 0), 0, &mut rng).is_none());
        assert!(manager.power_up().is_none());
    }

    #[test]
    fn test_uncollected_power_up_despawns_after_lifetime() {
        let mut manager = PowerUpManager::new();
        manager.place(PowerUpType::Speed, Point::new(4, 4), 1_000);
        assert!(manager.advance(10_999).is_empty());
        assert_eq!(manager.advance(11_000), vec![PowerUpNotice::Despawned(PowerUpType::Speed)]);
        assert!(manager.power_up().is_none());
    }

    #[test]
    fn test_activation_applies_effect_until_expiry() {
        let mut manager = PowerUpManager::new();
        manager.place(PowerUpType::Multiplier, Point::new(4, 4), 0);
        assert!(manager.is_collision(&Point::new(4, 4)));
        assert_eq!(manager.score_multiplier(), 1);

        assert_eq!(manager.activate(2_000), Some(PowerUpType::Multiplier));
        assert!(!manager.is_collision(&Point::new(4, 4)));
        assert_eq!(manager.score_multiplier(), 2);
        assert_eq!(manager.remaining_effect_ms(3_000), Some(4_000));

        // The despawn deadline at 10 000 no longer applies once collected.
        assert!(manager.advance(6_999).is_empty());
        assert_eq!(manager.advance(7_000), vec![PowerUpNotice::Expired(PowerUpType::Multiplier)]);
        assert_eq!(manager.score_multiplier(), 1);
        assert!(manager.advance(20_000).is_empty());
    }

    #[test]
    fn test_modifiers_follow_active_type() {
        let mut manager = PowerUpManager::new();
        assert_eq!(manager.speed_modifier(), 1.0);

        manager.place(PowerUpType::Slow, Point::new(1, 1), 0);
        assert_eq!(manager.speed_modifier(), 1.0);
        manager.activate(0);
        assert_eq!(manager.speed_modifier(), 1.5);

        manager.clear();
        manager.place(PowerUpType::Invincible, Point::new(1, 1), 0);
        manager.activate(0);
        assert!(manager.is_invincible());
    }

    #[test]
    fn test_clear_cancels_pending_timers() {
        let mut manager = PowerUpManager::new();
        manager.place(PowerUpType::Speed, Point::new(2, 2), 0);
        manager.activate(0);
        manager.clear();
        assert!(manager.power_up().is_none());

        manager.place(PowerUpType::Slow, Point::new(3, 3), 4_000);
        // The expiry scheduled before the clear must not remove the new power-up.
        assert!(manager.advance(5_000).is_empty());
        assert_eq!(manager.power_up().map(|p| p.kind), Some(PowerUpType::Slow));
    }
}
