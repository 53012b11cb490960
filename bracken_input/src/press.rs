// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mouse confirm press/release tracking.
//!
//! A menu records the element under the pointer when the mouse confirm
//! button goes down and confirms it when the button comes back up. Rows on a
//! text grid are one cell tall, so a small pointer wobble during the press
//! easily lands on a neighbouring row; [`PressState`] keeps the original
//! target in that case.
//!
//! ## Rules
//!
//! 1. Release over the pressed target: click on the pressed target.
//! 2. Release elsewhere: click on the pressed target only if the pointer never
//!    strayed further than the distance threshold during the press, is
//!    within it at release, and the press lasted no longer than the time
//!    threshold. A `None` threshold is unlimited; both `None` means only
//!    same-target releases click.
//! 3. Release without a press: suppressed.
//!
//! ```
//! use bracken_input::{PressResult, PressState};
//! use kurbo::Point;
//!
//! let mut press: PressState<u32> = PressState::with_thresholds(Some(1.0), Some(0.3));
//! press.on_down(7, Point::new(4.0, 2.5), 10.0);
//! // The row above is under the pointer now, but the wobble was small.
//! assert_eq!(
//!     press.on_up(Some(&6), Point::new(4.0, 1.8), 10.1),
//!     PressResult::Click(7)
//! );
//! ```

use kurbo::Point;

#[derive(Clone, Debug)]
struct Press<K> {
    target: K,
    position: Point,
    time: f64,
    strayed: bool,
}

/// Result of a mouse confirm release.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PressResult<K> {
    /// Confirm the given target.
    Click(K),
    /// No click; carries the pressed target if there was one.
    Suppressed(Option<K>),
}

/// Press/release state for the mouse confirm button.
#[derive(Clone, Debug)]
pub struct PressState<K> {
    press: Option<Press<K>>,
    /// Pointer travel, in cells, tolerated when release and press targets differ.
    pub distance_threshold: Option<f64>,
    /// Press duration, in seconds, tolerated when release and press targets differ.
    pub time_threshold: Option<f64>,
}

impl<K: PartialEq + Clone> Default for PressState<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PartialEq + Clone> PressState<K> {
    /// Create a press state tolerating one cell of travel and a quarter second.
    pub fn new() -> Self {
        Self::with_thresholds(Some(1.0), Some(0.25))
    }

    /// Create a press state with explicit thresholds.
    pub fn with_thresholds(distance_threshold: Option<f64>, time_threshold: Option<f64>) -> Self {
        Self {
            press: None,
            distance_threshold,
            time_threshold,
        }
    }

    /// Record a press on `target`.
    pub fn on_down(&mut self, target: K, position: Point, now: f64) {
        self.press = Some(Press {
            target,
            position,
            time: now,
            strayed: false,
        });
    }

    /// Track pointer travel during a press.
    ///
    /// Returns the pressed target the first time travel exceeds the distance
    /// threshold.
    pub fn on_move(&mut self, position: Point) -> Option<K> {
        let press = self.press.as_mut()?;
        let threshold = self.distance_threshold?;
        if press.strayed || press.position.distance(position) <= threshold {
            return None;
        }
        press.strayed = true;
        Some(press.target.clone())
    }

    /// Resolve a release over `current` (the element under the pointer, if any).
    pub fn on_up(&mut self, current: Option<&K>, position: Point, now: f64) -> PressResult<K> {
        let Some(press) = self.press.take() else {
            return PressResult::Suppressed(None);
        };
        if current == Some(&press.target) {
            return PressResult::Click(press.target);
        }
        if (self.distance_threshold.is_none() && self.time_threshold.is_none()) || press.strayed {
            return PressResult::Suppressed(Some(press.target));
        }
        let distance_ok = self
            .distance_threshold
            .is_none_or(|t| press.position.distance(position) <= t);
        let time_ok = self.time_threshold.is_none_or(|t| now - press.time <= t);
        if distance_ok && time_ok {
            PressResult::Click(press.target)
        } else {
            PressResult::Suppressed(Some(press.target))
        }
    }

    /// Drop the press in progress. Returns `true` if there was one.
    pub fn cancel(&mut self) -> bool {
        self.press.take().is_some()
    }

    /// Whether a press is in progress.
    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Target of the press in progress.
    pub fn pressed_target(&self) -> Option<&K> {
        self.press.as_ref().map(|p| &p.target)
    }
}
