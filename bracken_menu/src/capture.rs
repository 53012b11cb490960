// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! External capture providers.
//!
//! Text inputs and list selections do not edit themselves. On confirm they
//! hand control to a [`CaptureProvider`] (an on-screen keyboard, a choice
//! overlay) and the menu stops receiving input until the provider reports
//! back through [`MenuContext::complete_capture`](crate::MenuContext::complete_capture).

use bracken_nav::CaptureRequest;

/// Identifies one capture from begin to completion.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CaptureTicket(pub u64);

/// An overlay that edits a widget's value on the menu's behalf.
pub trait CaptureProvider {
    /// Start capturing. The provider keeps `ticket` for its completion call.
    fn begin(&mut self, ticket: CaptureTicket, request: &CaptureRequest);

    /// The capture is no longer wanted, for example because its menu closed.
    fn abandon(&mut self, ticket: CaptureTicket);
}
