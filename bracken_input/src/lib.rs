// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bracken Input: abstract menu input.
//!
//! Devices are sampled once per tick into a [`RawInput`] by an
//! [`InputSource`]. A [`Translator`] turns consecutive snapshots into
//! [`InputEvent`]s (movement changes and button edges), and an
//! [`InputRouter`] decides which single [`InputListener`] receives them.
//! [`PressState`] pairs mouse confirm presses with their releases.
//!
//! ```rust
//! use bracken_input::{Buttons, InputEvent, InputRouter, RawInput, Routed, Translator};
//! use kurbo::Vec2;
//!
//! let mut translator = Translator::new();
//! let mut router = InputRouter::new();
//! router.link("main");
//! router.begin_frame();
//!
//! let raw = RawInput {
//!     axis: Vec2::new(0.0, -1.0),
//!     buttons: Buttons::CONFIRM,
//!     ..RawInput::default()
//! };
//! let events = translator.translate(&raw);
//! assert_eq!(events[0], InputEvent::Move(Vec2::new(0.0, -1.0)));
//! assert_eq!(events[1], InputEvent::Confirm);
//! assert_eq!(router.route(&events[1]), Routed::Deliver("main"));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod event;
mod press;
mod router;
mod source;
mod translate;

pub use event::{InputEvent, InputListener};
pub use press::{PressResult, PressState};
pub use router::{InputRouter, Routed};
pub use source::{Buttons, InputSource, RawInput, ScriptedSource};
pub use translate::{Events, Translator};
