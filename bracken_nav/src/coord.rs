// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection coordinates.

/// Position of a selectable inside a menu: container index, then item index.
///
/// Coordinates are plain values. Movement resolution always produces a new
/// coordinate instead of editing one in place, so a half-applied move can never
/// be observed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    container: usize,
    item: usize,
}

impl Coord {
    /// Create a coordinate.
    pub const fn new(container: usize, item: usize) -> Self {
        Self { container, item }
    }

    /// Index of the container.
    pub const fn container(self) -> usize {
        self.container
    }

    /// Index of the item inside its container.
    pub const fn item(self) -> usize {
        self.item
    }

    /// Same container, different item.
    pub const fn with_item(self, item: usize) -> Self {
        Self {
            container: self.container,
            item,
        }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((container, item): (usize, usize)) -> Self {
        Self::new(container, item)
    }
}
