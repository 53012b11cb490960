// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw per-tick input snapshots and the devices that produce them.

use alloc::collections::VecDeque;

use kurbo::{Point, Vec2};

bitflags::bitflags! {
    /// Buttons held during a tick.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Buttons: u8 {
        /// Keyboard or gamepad confirm.
        const CONFIRM       = 0b0000_0001;
        /// Keyboard or gamepad cancel.
        const CANCEL        = 0b0000_0010;
        /// Mouse confirm (usually the primary button).
        const MOUSE_CONFIRM = 0b0000_0100;
        /// Mouse cancel (usually the secondary button).
        const MOUSE_CANCEL  = 0b0000_1000;
    }
}

/// Device state sampled once per tick.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RawInput {
    /// Movement axes, stick convention (`y` up).
    pub axis: Vec2,
    /// Buttons currently held.
    pub buttons: Buttons,
    /// Scroll accumulated since the previous tick.
    pub scroll: Vec2,
    /// Pointer position in grid space, if a pointer is present.
    pub pointer: Option<Point>,
}

/// A device layer that can be polled once per tick.
pub trait InputSource {
    /// Whether a pointer device is present.
    fn has_pointer(&self) -> bool;

    /// Last known pointer position in grid space.
    fn pointer_position(&self) -> Option<Point>;

    /// Whether input is currently accepted.
    fn input_enabled(&self) -> bool;

    /// Accept or ignore input.
    fn enable_input(&mut self, enabled: bool);

    /// Sample the devices for the tick at `now`.
    fn poll(&mut self, now: f64) -> RawInput;
}

/// An [`InputSource`] replaying queued snapshots, one per poll.
///
/// When the queue runs dry the last snapshot's held axis, buttons and pointer
/// repeat with no scroll, as a device left untouched would report.
#[derive(Clone, Debug)]
pub struct ScriptedSource {
    frames: VecDeque<RawInput>,
    last: RawInput,
    enabled: bool,
}

impl Default for ScriptedSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedSource {
    /// Create an empty, enabled source.
    pub fn new() -> Self {
        Self {
            frames: VecDeque::new(),
            last: RawInput::default(),
            enabled: true,
        }
    }

    /// Queue one snapshot.
    pub fn push(&mut self, frame: RawInput) {
        self.frames.push_back(frame);
    }

    /// Queue several snapshots.
    pub fn extend(&mut self, frames: impl IntoIterator<Item = RawInput>) {
        self.frames.extend(frames);
    }

    /// Number of snapshots still queued.
    pub fn pending(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedSource {
    fn has_pointer(&self) -> bool {
        self.last.pointer.is_some()
    }

    fn pointer_position(&self) -> Option<Point> {
        self.last.pointer
    }

    fn input_enabled(&self) -> bool {
        self.enabled
    }

    fn enable_input(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn poll(&mut self, _now: f64) -> RawInput {
        let frame = self.frames.pop_front().unwrap_or(RawInput {
            scroll: Vec2::ZERO,
            ..self.last
        });
        self.last = frame;
        if self.enabled {
            frame
        } else {
            RawInput {
                pointer: frame.pointer,
                ..RawInput::default()
            }
        }
    }
}
