// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Abstract input events and the listener that receives them.

use kurbo::Vec2;

/// One abstract input event, produced by a [`Translator`](crate::Translator).
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// The movement vector changed (stick convention, `y` up). Zero releases.
    Move(Vec2),
    /// Confirm was pressed.
    Confirm,
    /// Cancel was pressed.
    Cancel,
    /// The mouse confirm button went down.
    MouseConfirmPressed,
    /// The mouse confirm button went up.
    MouseConfirmReleased,
    /// The mouse cancel button went down.
    MouseCancel,
    /// Scroll wheel input for this tick.
    Scroll(Vec2),
}

impl InputEvent {
    /// Whether this is a movement event with a non-zero vector.
    pub fn is_nonzero_move(&self) -> bool {
        matches!(self, Self::Move(v) if *v != Vec2::ZERO)
    }

    /// Forward this event to the matching listener method.
    pub fn deliver<L: InputListener + ?Sized>(self, listener: &mut L, now: f64) {
        match self {
            Self::Move(movement) => listener.on_move(movement, now),
            Self::Confirm => listener.on_confirm(now),
            Self::Cancel => listener.on_cancel(now),
            Self::MouseConfirmPressed => listener.on_mouse_confirm_pressed(now),
            Self::MouseConfirmReleased => listener.on_mouse_confirm_released(now),
            Self::MouseCancel => listener.on_mouse_cancel(now),
            Self::Scroll(scroll) => listener.on_scroll(scroll, now),
        }
    }
}

/// Receiver of abstract input events.
///
/// `now` is the caller's monotonic clock in seconds.
pub trait InputListener {
    /// The movement vector changed.
    fn on_move(&mut self, movement: Vec2, now: f64);

    /// Confirm was pressed.
    fn on_confirm(&mut self, now: f64);

    /// Cancel was pressed.
    fn on_cancel(&mut self, now: f64);

    /// Scroll input arrived. Ignored by default.
    fn on_scroll(&mut self, scroll: Vec2, now: f64) {
        let _ = (scroll, now);
    }

    /// The mouse confirm button went down. Ignored by default.
    fn on_mouse_confirm_pressed(&mut self, now: f64) {
        let _ = now;
    }

    /// The mouse confirm button went up. Ignored by default.
    fn on_mouse_confirm_released(&mut self, now: f64) {
        let _ = now;
    }

    /// The mouse cancel button went down. Behaves like cancel by default.
    fn on_mouse_cancel(&mut self, now: f64) {
        self.on_cancel(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[derive(Default)]
    struct Log(Vec<&'static str>);

    impl InputListener for Log {
        fn on_move(&mut self, _: Vec2, _: f64) {
            self.0.push("move");
        }
        fn on_confirm(&mut self, _: f64) {
            self.0.push("confirm");
        }
        fn on_cancel(&mut self, _: f64) {
            self.0.push("cancel");
        }
    }

    #[test]
    fn defaults_route_mouse_cancel_to_cancel() {
        let mut log = Log::default();
        for event in [
            InputEvent::Move(Vec2::new(1.0, 0.0)),
            InputEvent::MouseConfirmPressed,
            InputEvent::Scroll(Vec2::new(0.0, 1.0)),
            InputEvent::MouseCancel,
            InputEvent::Confirm,
        ] {
            event.deliver(&mut log, 0.0);
        }
        assert_eq!(log.0, ["move", "cancel", "confirm"]);
    }

    #[test]
    fn zero_move_is_not_nonzero() {
        assert!(!InputEvent::Move(Vec2::ZERO).is_nonzero_move());
        assert!(InputEvent::Move(Vec2::new(0.0, -1.0)).is_nonzero_move());
        assert!(!InputEvent::Confirm.is_nonzero_move());
    }
}
