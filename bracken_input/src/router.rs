// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-target input routing.
//!
//! ## Overview
//!
//! At most one target is linked at a time. Linking replaces the previous
//! link outright; there is no stack. A target that wants control back after
//! another one took it must link itself again.
//!
//! ## Link-frame guard
//!
//! Input is suppressed during the frame in which a link was made, so the
//! press that opened a menu is not also consumed as navigation inside it.
//! Callers advance frames with [`InputRouter::begin_frame`].
//!
//! ## Fallback
//!
//! With nothing linked, events are dropped. The one exception is a non-zero
//! `Move` when a fallback target is configured: it is reported as
//! [`Routed::Fallback`] so the caller can open a default menu.

use crate::event::InputEvent;

/// Where one event should go.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Routed<K> {
    /// Deliver to the linked target.
    Deliver(K),
    /// The target was linked this frame; drop the event.
    Suppressed(K),
    /// Nothing is linked; the fallback target should take focus.
    Fallback(K),
    /// Nothing is linked; drop the event.
    Dropped,
}

/// Routes abstract input to exactly one linked target.
#[derive(Clone, Debug)]
pub struct InputRouter<K> {
    linked: Option<K>,
    linked_frame: Option<u64>,
    frame: u64,
    fallback: Option<K>,
}

impl<K> Default for InputRouter<K> {
    fn default() -> Self {
        Self {
            linked: None,
            linked_frame: None,
            frame: 0,
            fallback: None,
        }
    }
}

impl<K: Copy + Eq + core::fmt::Debug> InputRouter<K> {
    /// Create a router with nothing linked.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to the next frame and return its number.
    pub fn begin_frame(&mut self) -> u64 {
        self.frame = self.frame.wrapping_add(1);
        self.frame
    }

    /// Current frame number.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Currently linked target.
    pub fn linked(&self) -> Option<K> {
        self.linked
    }

    /// Whether `target` is the linked target.
    pub fn is_linked(&self, target: K) -> bool {
        self.linked == Some(target)
    }

    /// Link `target`, replacing any previous link. Returns the replaced target.
    pub fn link(&mut self, target: K) -> Option<K> {
        let previous = self.linked.replace(target);
        self.linked_frame = Some(self.frame);
        if let Some(previous) = previous
            && previous != target
        {
            log::debug!("input link {previous:?} replaced by {target:?}");
        } else {
            log::trace!("input linked to {target:?}");
        }
        previous
    }

    /// Unlink `target` if it is the linked one; otherwise do nothing.
    ///
    /// Returns `true` when a link was removed.
    pub fn unlink(&mut self, target: K) -> bool {
        if self.linked != Some(target) {
            return false;
        }
        self.linked = None;
        self.linked_frame = None;
        log::trace!("input unlinked from {target:?}");
        true
    }

    /// Target that receives non-zero moves while nothing is linked.
    pub fn fallback(&self) -> Option<K> {
        self.fallback
    }

    /// Set or clear the fallback target.
    pub fn set_fallback(&mut self, target: Option<K>) {
        self.fallback = target;
    }

    /// Whether the link was made during the current frame.
    pub fn in_link_frame(&self) -> bool {
        self.linked.is_some() && self.linked_frame == Some(self.frame)
    }

    /// Decide where `event` goes this frame.
    pub fn route(&self, event: &InputEvent) -> Routed<K> {
        match self.linked {
            Some(target) if self.in_link_frame() => Routed::Suppressed(target),
            Some(target) => Routed::Deliver(target),
            None => match self.fallback {
                Some(fallback) if event.is_nonzero_move() => Routed::Fallback(fallback),
                _ => Routed::Dropped,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;

    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    struct Menu(u8);

    const A: Menu = Menu(1);
    const B: Menu = Menu(2);

    #[test]
    fn linking_b_revokes_a_and_a_unlink_is_a_noop() {
        let mut router = InputRouter::new();
        router.link(A);
        router.begin_frame();
        assert_eq!(router.route(&InputEvent::Confirm), Routed::Deliver(A));

        assert_eq!(router.link(B), Some(A));
        router.begin_frame();
        assert!(!router.unlink(A));
        assert_eq!(router.linked(), Some(B));
        assert_eq!(router.route(&InputEvent::Confirm), Routed::Deliver(B));
    }

    #[test]
    fn input_in_link_frame_is_suppressed() {
        let mut router = InputRouter::new();
        router.begin_frame();
        router.link(A);
        assert_eq!(router.route(&InputEvent::Confirm), Routed::Suppressed(A));
        router.begin_frame();
        assert_eq!(router.route(&InputEvent::Confirm), Routed::Deliver(A));
    }

    #[test]
    fn unlinked_input_is_dropped_except_fallback_moves() {
        let mut router: InputRouter<Menu> = InputRouter::new();
        let down = InputEvent::Move(Vec2::new(0.0, -1.0));
        assert_eq!(router.route(&down), Routed::Dropped);

        router.set_fallback(Some(B));
        assert_eq!(router.route(&down), Routed::Fallback(B));
        assert_eq!(router.route(&InputEvent::Confirm), Routed::Dropped);
        assert_eq!(router.route(&InputEvent::Move(Vec2::ZERO)), Routed::Dropped);
    }

    #[test]
    fn unlink_removes_own_link() {
        let mut router = InputRouter::new();
        router.link(A);
        assert!(router.unlink(A));
        assert_eq!(router.linked(), None);
        assert!(!router.in_link_frame());
    }
}
