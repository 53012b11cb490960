// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Application-facing menu events.

use bracken_nav::{ActionId, Coord};

use crate::capture::CaptureTicket;
use crate::menu::MenuId;

/// Something the application may want to react to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuEvent {
    /// The menu opened.
    Opened(MenuId),
    /// The menu closed.
    Closed(MenuId),
    /// Focus moved.
    FocusChanged {
        /// Menu.
        menu: MenuId,
        /// Previously focused selectable.
        from: Option<Coord>,
        /// Newly focused selectable.
        to: Option<Coord>,
    },
    /// A button action ran.
    Action {
        /// Menu.
        menu: MenuId,
        /// Button.
        at: Coord,
        /// Action.
        action: ActionId,
    },
    /// A toggle flipped.
    Toggled {
        /// Menu.
        menu: MenuId,
        /// Toggle.
        at: Coord,
        /// New state.
        on: bool,
    },
    /// A slider, counter, scroll offset, text or list selection changed.
    ValueChanged {
        /// Menu.
        menu: MenuId,
        /// Widget.
        at: Coord,
        /// New generic value.
        count: i64,
    },
    /// A double-confirm button is waiting for its second confirm.
    Armed {
        /// Menu.
        menu: MenuId,
        /// Button.
        at: Coord,
    },
    /// A double-confirm button stopped waiting.
    Disarmed {
        /// Menu.
        menu: MenuId,
        /// Button.
        at: Coord,
    },
    /// Control went to the capture provider.
    CaptureRequested {
        /// Menu.
        menu: MenuId,
        /// Widget being edited.
        at: Coord,
        /// Ticket to pass to [`MenuContext::complete_capture`](crate::MenuContext::complete_capture).
        ticket: CaptureTicket,
    },
    /// The capture ended, by completion or abandonment.
    CaptureFinished {
        /// Menu.
        menu: MenuId,
        /// Widget that was edited.
        at: Coord,
        /// Ticket of the finished capture.
        ticket: CaptureTicket,
        /// Whether the widget's value changed.
        changed: bool,
    },
}

impl MenuEvent {
    /// Menu the event belongs to.
    pub fn menu(&self) -> MenuId {
        match *self {
            Self::Opened(menu) | Self::Closed(menu) => menu,
            Self::FocusChanged { menu, .. }
            | Self::Action { menu, .. }
            | Self::Toggled { menu, .. }
            | Self::ValueChanged { menu, .. }
            | Self::Armed { menu, .. }
            | Self::Disarmed { menu, .. }
            | Self::CaptureRequested { menu, .. }
            | Self::CaptureFinished { menu, .. } => menu,
        }
    }
}
