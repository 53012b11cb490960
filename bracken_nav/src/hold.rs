// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hold-to-repeat timing.
//!
//! Timers are stored deadlines compared against the caller's clock on every
//! tick. [`NOT_HOLDING`] marks an inactive deadline, so "never" and "already
//! elapsed" stay distinguishable without an extra flag.

use bracken_spatial::Direction;

use crate::config::NavConfig;

/// Deadline sentinel for "no press in progress".
pub const NOT_HOLDING: f64 = f64::INFINITY;

/// Press and repeat deadlines for one held direction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HoldRepeat {
    pressed_at: f64,
    next_fire: f64,
    fired: u32,
    direction: Option<Direction>,
}

impl Default for HoldRepeat {
    fn default() -> Self {
        Self {
            pressed_at: NOT_HOLDING,
            next_fire: NOT_HOLDING,
            fired: 0,
            direction: None,
        }
    }
}

impl HoldRepeat {
    /// Start a press in `direction`; the first fire happens after `input_delay`.
    pub fn press(&mut self, now: f64, direction: Direction, input_delay: f64) {
        self.pressed_at = now;
        self.next_fire = now + input_delay.max(0.0);
        self.fired = 0;
        self.direction = Some(direction);
    }

    /// End the press.
    pub fn release(&mut self) {
        *self = Self::default();
    }

    /// Whether a press is in progress.
    pub fn is_holding(&self) -> bool {
        self.pressed_at != NOT_HOLDING
    }

    /// Direction of the current press.
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Number of times the current press has fired.
    pub fn fired(&self) -> u32 {
        self.fired
    }

    /// Next deadline, [`NOT_HOLDING`] when idle.
    pub fn next_fire(&self) -> f64 {
        self.next_fire
    }

    /// Fire if the next deadline has passed, scheduling the one after.
    pub fn poll(&mut self, now: f64, config: &NavConfig) -> bool {
        if now < self.next_fire {
            return false;
        }
        self.fired = self.fired.saturating_add(1);
        self.next_fire = if config.single_press_only {
            NOT_HOLDING
        } else if self.fired == 1 {
            (self.pressed_at + config.hold_delay).max(now)
        } else {
            now + repeat_interval(config, now - self.pressed_at)
        };
        true
    }
}

/// Auto-repeat interval after holding for `elapsed` seconds.
///
/// `hold_interval / ceil((elapsed - hold_delay) / hold_speedup_interval)`,
/// with the divisor never below one. The interval never grows as `elapsed`
/// grows.
pub fn repeat_interval(config: &NavConfig, elapsed: f64) -> f64 {
    let over = elapsed - config.hold_delay;
    if over <= 0.0 || config.hold_speedup_interval <= 0.0 {
        return config.hold_interval;
    }
    config.hold_interval / ceil_at_least_one(over / config.hold_speedup_interval)
}

// `f64::ceil` is not available in `core`.
fn ceil_at_least_one(x: f64) -> f64 {
    if !x.is_finite() {
        return if x > 0.0 { f64::MAX } else { 1.0 };
    }
    if x <= 1.0 {
        return 1.0;
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "x is finite and positive; saturation is the intent"
    )]
    let whole = x as u64 as f64;
    if whole < x { whole + 1.0 } else { whole }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> NavConfig {
        NavConfig {
            input_delay: 0.005,
            hold_delay: 0.4,
            hold_interval: 0.12,
            hold_speedup_interval: 0.5,
            ..NavConfig::default()
        }
    }

    #[test]
    fn first_fire_waits_for_input_delay() {
        let cfg = config();
        let mut hold = HoldRepeat::default();
        hold.press(1.0, Direction::Down, cfg.input_delay);
        assert!(!hold.poll(1.0, &cfg));
        assert!(hold.poll(1.01, &cfg));
        // The next fire waits for the hold delay.
        assert!(!hold.poll(1.2, &cfg));
        assert!(hold.poll(1.41, &cfg));
    }

    #[test]
    fn single_press_never_repeats() {
        let cfg = NavConfig {
            single_press_only: true,
            ..config()
        };
        let mut hold = HoldRepeat::default();
        hold.press(0.0, Direction::Up, cfg.input_delay);
        assert!(hold.poll(0.01, &cfg));
        assert!(!hold.poll(100.0, &cfg));
        assert!(hold.is_holding());
        hold.release();
        assert!(!hold.is_holding());
        assert_eq!(hold.next_fire(), NOT_HOLDING);
    }

    #[test]
    fn repeat_interval_is_non_increasing() {
        let cfg = config();
        let mut previous = f64::INFINITY;
        for step in 0..200 {
            let elapsed = step as f64 * 0.037;
            let interval = repeat_interval(&cfg, elapsed);
            assert!(interval <= previous, "interval grew at {elapsed}");
            assert!(interval > 0.0);
            previous = interval;
        }
        assert_eq!(repeat_interval(&cfg, 0.4), 0.12);
        assert_eq!(repeat_interval(&cfg, 0.6), 0.12);
        assert_eq!(repeat_interval(&cfg, 1.1), 0.06);
        assert!((repeat_interval(&cfg, 1.5) - 0.04).abs() < 1e-12);
    }

    #[test]
    fn repeats_speed_up_while_held() {
        let cfg = config();
        let mut hold = HoldRepeat::default();
        hold.press(0.0, Direction::Right, cfg.input_delay);
        let mut fires = alloc::vec::Vec::new();
        let mut now = 0.0;
        while now < 3.0 {
            if hold.poll(now, &cfg) {
                fires.push(now);
            }
            now += 0.001;
        }
        let gaps: alloc::vec::Vec<f64> = fires.windows(2).skip(1).map(|w| w[1] - w[0]).collect();
        assert!(gaps.len() > 5);
        for pair in gaps.windows(2) {
            assert!(pair[1] <= pair[0] + 0.0015, "gap grew: {pair:?}");
        }
    }
}
