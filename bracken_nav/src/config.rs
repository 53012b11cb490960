// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation configuration.

use bracken_spatial::DEFAULT_CONE;

/// How directional input moves the selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NavAxis {
    /// Horizontal input steps through items; vertical input is ignored.
    X,
    /// Vertical input steps through items; horizontal input is ignored.
    Y,
    /// Any direction picks the nearest item inside the directional cone.
    ClosestMatch,
    /// Horizontal input hops containers, vertical input steps items.
    TwoWay,
}

/// Navigation options for one menu.
///
/// Times are in seconds of the caller's monotonic clock.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NavConfig {
    /// Movement mode.
    pub axis: NavAxis,
    /// Wrap from the last item of a container to its first (and back).
    pub cycle_within: bool,
    /// Wrap from the last container to the first (and back).
    pub cycle_between: bool,
    /// Fire once per press; never auto-repeat while held.
    pub single_press_only: bool,
    /// Delay between receiving movement and resolving it.
    pub input_delay: f64,
    /// Hold time before auto-repeat starts.
    pub hold_delay: f64,
    /// Repeat interval right after `hold_delay`.
    pub hold_interval: f64,
    /// Every `hold_speedup_interval` of continued holding divides the repeat
    /// interval by one more.
    pub hold_speedup_interval: f64,
    /// Minimum movement magnitude that counts as a press.
    pub move_threshold: f64,
    /// Directional cone used by [`NavAxis::ClosestMatch`].
    pub cone: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            axis: NavAxis::Y,
            cycle_within: false,
            cycle_between: false,
            single_press_only: false,
            input_delay: 0.005,
            hold_delay: 0.4,
            hold_interval: 0.12,
            hold_speedup_interval: 0.5,
            move_threshold: 0.5,
            cone: DEFAULT_CONE,
        }
    }
}

impl NavConfig {
    /// Default options with a given movement mode.
    pub fn with_axis(axis: NavAxis) -> Self {
        Self {
            axis,
            ..Self::default()
        }
    }
}
