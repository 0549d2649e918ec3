use std::time::Duration;

use super::config::GameConfig;

/// Next tick interval after the score reached `score`.
///
/// Each point shaves `score * step_ms` off the current interval, never going
/// below `floor_ms`.
pub fn next_interval_ms(current_ms: u64, score: u32, step_ms: u64, floor_ms: u64) -> u64 {
    let cut = u64::from(score).saturating_mul(step_ms);
    current_ms.saturating_sub(cut).max(floor_ms)
}

/// Tick pacing for a session: current interval plus running flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameClock {
    initial_ms: u64,
    floor_ms: u64,
    step_ms: u64,
    interval_ms: u64,
    running: bool,
}

impl GameClock {
    pub fn new(initial_ms: u64, floor_ms: u64, step_ms: u64) -> Self {
        let initial_ms = initial_ms.max(floor_ms);
        Self {
            initial_ms,
            floor_ms,
            step_ms,
            interval_ms: initial_ms,
            running: false,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.initial_interval_ms,
            config.speed_floor_ms,
            config.speedup_step_ms,
        )
    }

    /// Restart at the initial interval
    pub fn start(&mut self) {
        self.interval_ms = self.initial_ms;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Speed up after food was eaten; `score` is the score after the increment
    pub fn on_food_eaten(&mut self, score: u32) -> Duration {
        self.interval_ms = next_interval_ms(self.interval_ms, score, self.step_ms, self.floor_ms);
        self.interval()
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_sequence_for_first_points() {
        let mut clock = GameClock::new(400, 100, 2);
        clock.start();
        assert_eq!(clock.interval_ms(), 400);

        let seen: Vec<u64> = (1..=3)
            .map(|score| clock.on_food_eaten(score).as_millis() as u64)
            .collect();
        assert_eq!(seen, vec![398, 394, 388]);
    }

    #[test]
    fn test_interval_is_non_increasing_and_floored() {
        let mut clock = GameClock::from_config(&GameConfig::default());
        clock.start();

        let mut previous = clock.interval_ms();
        for score in 1..=60 {
            clock.on_food_eaten(score);
            assert!(clock.interval_ms() <= previous);
            assert!(clock.interval_ms() >= 100);
            previous = clock.interval_ms();
        }
        assert_eq!(clock.interval_ms(), 100);
    }

    #[test]
    fn test_start_resets_interval() {
        let mut clock = GameClock::new(400, 100, 2);
        clock.start();
        clock.on_food_eaten(1);
        clock.stop();
        assert!(!clock.is_running());

        clock.start();
        assert!(clock.is_running());
        assert_eq!(clock.interval(), Duration::from_millis(400));
    }

    #[test]
    fn test_next_interval_saturates() {
        assert_eq!(next_interval_ms(120, 50, 2, 100), 100);
        assert_eq!(next_interval_ms(5, 50, 2, 0), 0);
    }
}
