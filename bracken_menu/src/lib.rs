// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bracken Menu: menus for keyboard, gamepad and mouse on a text grid.
//!
//! A [`Menu`] owns its containers and [`NavigationState`](bracken_nav::NavigationState),
//! opens and closes, and turns confirm/cancel into widget behaviour:
//!
//! | Widget | Confirm | Cancel |
//! |---|---|---|
//! | Button | runs its action | closes the menu* |
//! | Toggle | flips | closes the menu* |
//! | Slider, scrollable text | captures directional input; again releases | releases |
//! | Text input, list select | hands control to the [`CaptureProvider`] | closes the menu* |
//! | Countable button | increments | decrements, closes at the minimum* |
//! | Double-confirm button | arms; again within the window runs its action | disarms |
//!
//! \* when [`MenuConfig::cancel_closes_menu`] is set.
//!
//! Unavailable selectables ignore confirm.
//!
//! A [`MenuContext`] owns every menu, the input link and the layout service,
//! and runs the frame loop:
//!
//! ```rust
//! use bracken_input::{Buttons, RawInput, ScriptedSource};
//! use bracken_menu::{Menu, MenuConfig, MenuContext, MenuEvent, MenuId};
//! use bracken_nav::{ActionId, Container, ContainerId, Coord, FixedLayout, Selectable};
//!
//! let main = MenuId(0);
//! let mut cx = MenuContext::new(FixedLayout::new());
//! cx.insert(Menu::new(main, MenuConfig::default()).with_container(
//!     Container::new(ContainerId(0)).with_items([
//!         Selectable::button("Play", ActionId(1)),
//!         Selectable::button("Quit", ActionId(2)),
//!     ]),
//! ));
//! cx.open(main, 0.0).unwrap();
//!
//! let mut source = ScriptedSource::new();
//! // Idle past the open delay, then press confirm.
//! source.extend([RawInput::default(); 3]);
//! source.push(RawInput { buttons: Buttons::CONFIRM, ..RawInput::default() });
//! for frame in 1..=4 {
//!     cx.tick(f64::from(frame) * 0.05, &mut source);
//! }
//!
//! assert!(cx.take_events().contains(&MenuEvent::Action {
//!     menu: main,
//!     at: Coord::new(0, 0),
//!     action: ActionId(1),
//! }));
//! ```
//!
//! Failures are reported as [`MenuError`] and logged through the `log` facade.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod capture;
mod config;
mod context;
mod error;
mod event;
mod menu;

pub use capture::{CaptureProvider, CaptureTicket};
pub use config::{MenuConfig, ResetPolicy};
pub use context::MenuContext;
pub use error::{MenuError, Result};
pub use event::MenuEvent;
pub use menu::{ContextMenu, Menu, MenuId};
