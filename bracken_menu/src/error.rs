// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use crate::capture::CaptureTicket;
use crate::menu::MenuId;

/// Errors from menu operations.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuError {
    /// No menu with this id is registered.
    UnknownMenu(MenuId),
    /// A context menu was given different numbers of labels and actions.
    MismatchedChoices {
        /// Number of labels.
        choices: usize,
        /// Number of actions.
        actions: usize,
    },
    /// A widget asked for external capture but no provider is installed.
    NoCaptureProvider(MenuId),
    /// The ticket does not belong to the capture in progress.
    StaleCapture(CaptureTicket),
}

impl fmt::Display for MenuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownMenu(id) => write!(f, "no menu registered as {}", id.0),
            Self::MismatchedChoices { choices, actions } => {
                write!(f, "{choices} choices but {actions} actions")
            }
            Self::NoCaptureProvider(id) => {
                write!(f, "menu {} requested capture without a provider", id.0)
            }
            Self::StaleCapture(ticket) => write!(f, "capture ticket {} is not active", ticket.0),
        }
    }
}

impl core::error::Error for MenuError {}

/// Result type for menu operations.
pub type Result<T> = core::result::Result<T, MenuError>;
