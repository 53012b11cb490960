// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw snapshot to abstract event translation.

use kurbo::Vec2;
use smallvec::SmallVec;

use crate::event::InputEvent;
use crate::source::{Buttons, RawInput};

/// Events produced by one translation. Most ticks produce at most a few.
pub type Events = SmallVec<[InputEvent; 4]>;

/// Edge detector turning per-tick snapshots into [`InputEvent`]s.
///
/// `Move` is emitted whenever the axis vector differs from the previous tick,
/// including a change back to zero. Buttons produce events on their press
/// edge, except mouse confirm, which reports both edges. Non-zero scroll is
/// reported every tick it is present.
#[derive(Clone, Debug, Default)]
pub struct Translator {
    axis: Vec2,
    buttons: Buttons,
}

impl Translator {
    /// Create a translator with nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget held state, so the next snapshot is compared against "idle".
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Translate one snapshot.
    pub fn translate(&mut self, raw: &RawInput) -> Events {
        let mut out = Events::new();
        if raw.axis != self.axis {
            out.push(InputEvent::Move(raw.axis));
            self.axis = raw.axis;
        }
        if raw.scroll != Vec2::ZERO {
            out.push(InputEvent::Scroll(raw.scroll));
        }

        let pressed = raw.buttons & !self.buttons;
        let released = self.buttons & !raw.buttons;
        self.buttons = raw.buttons;

        if pressed.contains(Buttons::CONFIRM) {
            out.push(InputEvent::Confirm);
        }
        if pressed.contains(Buttons::CANCEL) {
            out.push(InputEvent::Cancel);
        }
        if pressed.contains(Buttons::MOUSE_CONFIRM) {
            out.push(InputEvent::MouseConfirmPressed);
        }
        if released.contains(Buttons::MOUSE_CONFIRM) {
            out.push(InputEvent::MouseConfirmReleased);
        }
        if pressed.contains(Buttons::MOUSE_CANCEL) {
            out.push(InputEvent::MouseCancel);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(axis: Vec2, buttons: Buttons) -> RawInput {
        RawInput {
            axis,
            buttons,
            ..RawInput::default()
        }
    }

    #[test]
    fn move_reports_changes_only() {
        let mut t = Translator::new();
        let right = Vec2::new(1.0, 0.0);
        assert_eq!(t.translate(&raw(right, Buttons::empty())).as_slice(), [
            InputEvent::Move(right)
        ]);
        assert!(t.translate(&raw(right, Buttons::empty())).is_empty());
        assert_eq!(
            t.translate(&raw(Vec2::ZERO, Buttons::empty())).as_slice(),
            [InputEvent::Move(Vec2::ZERO)]
        );
    }

    #[test]
    fn buttons_fire_on_edges() {
        let mut t = Translator::new();
        assert_eq!(
            t.translate(&raw(Vec2::ZERO, Buttons::CONFIRM | Buttons::MOUSE_CONFIRM))
                .as_slice(),
            [InputEvent::Confirm, InputEvent::MouseConfirmPressed]
        );
        // Held: nothing new.
        assert!(
            t.translate(&raw(Vec2::ZERO, Buttons::CONFIRM | Buttons::MOUSE_CONFIRM))
                .is_empty()
        );
        assert_eq!(t.translate(&raw(Vec2::ZERO, Buttons::CANCEL)).as_slice(), [
            InputEvent::Cancel,
            InputEvent::MouseConfirmReleased
        ]);
    }

    #[test]
    fn scroll_is_reported_every_tick() {
        let mut t = Translator::new();
        let frame = RawInput {
            scroll: Vec2::new(0.0, -1.0),
            ..RawInput::default()
        };
        for _ in 0..2 {
            assert_eq!(t.translate(&frame).as_slice(), [InputEvent::Scroll(
                Vec2::new(0.0, -1.0)
            )]);
        }
    }

    #[test]
    fn reset_forgets_held_buttons() {
        let mut t = Translator::new();
        t.translate(&raw(Vec2::ZERO, Buttons::MOUSE_CANCEL));
        t.reset();
        assert_eq!(
            t.translate(&raw(Vec2::ZERO, Buttons::MOUSE_CANCEL)).as_slice(),
            [InputEvent::MouseCancel]
        );
    }
}
