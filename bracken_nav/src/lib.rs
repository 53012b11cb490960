// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bracken Nav: focus and directional navigation for text-grid menus.
//!
//! A menu is a list of [`Container`]s ("windows"), each holding an ordered list
//! of [`Selectable`]s. A [`Coord`] (container index, item index) names at most
//! one focused selectable. [`NavigationState`] owns that selection and turns
//! movement, scroll and pointer input into focus changes.
//!
//! The pieces:
//!
//! - [`Widget`]: the behaviour of one selectable (button, toggle, slider,
//!   text input, scrollable text, list select, countable button,
//!   double-confirm button), answering confirm/cancel/adjust with a
//!   [`Reaction`].
//! - [`Layout`]: where the renderer put things. Containers cache the bounds it
//!   reports and refresh them lazily when they are invalidated.
//! - [`NavConfig`]: movement mode ([`NavAxis`]), wrapping, and hold-to-repeat
//!   timing.
//! - [`resolve_move`]: the pure movement resolver.
//!
//! ## Tick model
//!
//! Input is stored when it arrives and resolved on the next
//! [`NavigationState::tick`] once the configured input delay has passed.
//! Holding a direction repeats at an accelerating interval (see
//! [`repeat_interval`]). When the pointer moved since the previous tick,
//! [`NavigationState::update`] follows the pointer and skips keyboard
//! resolution for that tick.
//!
//! ```rust
//! use bracken_nav::{
//!     ActionId, Container, ContainerId, Coord, NavConfig, NavigationState, Selectable, Tick,
//! };
//! use kurbo::Vec2;
//!
//! let mut containers = vec![Container::new(ContainerId(0)).with_items([
//!     Selectable::button("Start", ActionId(0)),
//!     Selectable::button("Quit", ActionId(1)),
//! ])];
//!
//! let mut nav = NavigationState::new(NavConfig::default());
//! nav.set_navigation_active(true);
//! nav.reset(&mut containers);
//!
//! // Stick down; resolved once the input delay has passed.
//! nav.on_move(Vec2::new(0.0, -1.0), 0.0);
//! assert_eq!(nav.tick(0.0, &mut containers), Tick::Idle);
//! assert!(matches!(nav.tick(0.01, &mut containers), Tick::Moved { .. }));
//! assert_eq!(nav.selection(), Some(Coord::new(0, 1)));
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod container;
mod coord;
mod hold;
mod layout;
mod resolve;
mod selectable;
mod state;
mod widget;

pub use config::{NavAxis, NavConfig};
pub use container::{Container, ContainerId};
pub use coord::Coord;
pub use hold::{HoldRepeat, NOT_HOLDING, repeat_interval};
pub use layout::{FixedLayout, Layout};
pub use resolve::{first_navigable, is_valid, resolve_move};
pub use selectable::Selectable;
pub use state::{NavigationState, Tick};
pub use widget::{ActionId, CaptureRequest, CaptureResult, Kind, Reaction, Widget};

pub use bracken_spatial::Direction;
