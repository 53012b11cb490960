// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menu configuration.

use bracken_nav::NavConfig;

/// What happens to the selection when a menu opens.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ResetPolicy {
    /// Focus item 0 of the first navigable container.
    #[default]
    ResetSelection,
    /// Open with nothing focused.
    ClearSelection,
    /// Keep the selection the menu had when it closed.
    Disable,
}

/// Options for one menu.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MenuConfig {
    /// Navigation options.
    pub nav: NavConfig,
    /// Selection handling on open.
    pub reset_policy: ResetPolicy,
    /// Whether an unconsumed cancel closes the menu.
    pub cancel_closes_menu: bool,
    /// Seconds after opening before input is resolved.
    pub open_input_delay: f64,
    /// Seconds an armed double-confirm button waits for its second confirm.
    pub double_confirm_window: f64,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            nav: NavConfig::default(),
            reset_policy: ResetPolicy::ResetSelection,
            cancel_closes_menu: true,
            open_input_delay: 0.1,
            double_confirm_window: 0.5,
        }
    }
}
