//! The delay and sound timers, counting down at 64 Hz of wall-clock time.

use std::time::{Duration, Instant};

pub const TIMER_HZ: u32 = 64;

/// The time between two ticks.
pub fn tick_period() -> Duration {
    Duration::from_secs(1) / TIMER_HZ
}

pub struct Clock {
    pub delay_timer: u8,
    pub sound_timer: u8,
    vblank: bool,
    last_tick: Instant,
}

impl Clock {

    pub fn new() -> Clock {
        Clock::starting_at(Instant::now())
    }

    /// A clock whose first tick period starts at `start`.
    pub fn starting_at(start: Instant) -> Clock {
        Clock {
            delay_timer: 0,
            sound_timer: 0,
            vblank: false,
            last_tick: start,
        }
    }

    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    /// Tick at most once if a full period has passed between the last tick and `now`.
    /// The last tick moves forward by exactly one period so no time is lost to rounding.
    pub fn update_at(&mut self, now: Instant) {
        let period = tick_period();
        if now.saturating_duration_since(self.last_tick) >= period {
            self.delay_timer = self.delay_timer.saturating_sub(1);
            self.sound_timer = self.sound_timer.saturating_sub(1);
            self.vblank = true;
            self.last_tick += period;
        } else {
            self.vblank = false;
        }
    }

    /// Whether the last update ticked.
    pub fn vblank(&self) -> bool {
        self.vblank
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn no_tick_before_period() {
        let start = Instant::now();
        let mut clock = Clock::starting_at(start);
        clock.delay_timer = 10;
        clock.update_at(start + tick_period() / 2);
        assert_eq!(clock.delay_timer, 10);
        assert!(!clock.vblank());
    }

    #[test]
    fn ticks_once_per_period() {
        let start = Instant::now();
        let mut clock = Clock::starting_at(start);
        clock.delay_timer = 10;
        clock.sound_timer = 1;
        clock.update_at(start + tick_period());
        assert_eq!((clock.delay_timer, clock.sound_timer), (9, 0));
        assert!(clock.vblank());

        clock.update_at(start + tick_period());
        assert_eq!(clock.delay_timer, 9);
        assert!(!clock.vblank());
    }

    #[test]
    fn catches_up_one_tick_at_a_time() {
        let start = Instant::now();
        let mut clock = Clock::starting_at(start);
        clock.delay_timer = 10;
        let later = start + tick_period() * 3;
        for _ in 0..5 {
            clock.update_at(later);
        }
        assert_eq!(clock.delay_timer, 7);
    }

    #[test]
    fn timers_floor_at_zero() {
        let start = Instant::now();
        let mut clock = Clock::starting_at(start);
        clock.update_at(start + tick_period());
        assert_eq!((clock.delay_timer, clock.sound_timer), (0, 0));
        assert!(clock.vblank());
    }
}
