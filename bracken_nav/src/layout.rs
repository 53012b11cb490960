// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout service consumed by the position-sync pass.

use hashbrown::HashMap;
use kurbo::Rect;

use crate::container::ContainerId;

/// Source of measured screen rectangles.
///
/// The renderer owns layout; navigation only reads the results. Returning
/// `None` means "not laid out yet", which keeps the corresponding cache
/// unmeasured until a later sync.
pub trait Layout {
    /// Bounds of a whole container.
    fn container_bounds(&self, id: ContainerId) -> Option<Rect>;

    /// Bounds of one item of a container.
    fn item_bounds(&self, id: ContainerId, index: usize) -> Option<Rect>;
}

impl<L: Layout + ?Sized> Layout for &L {
    fn container_bounds(&self, id: ContainerId) -> Option<Rect> {
        (**self).container_bounds(id)
    }

    fn item_bounds(&self, id: ContainerId, index: usize) -> Option<Rect> {
        (**self).item_bounds(id, index)
    }
}

/// A [`Layout`] backed by rectangles pushed by the renderer after drawing.
///
/// ```rust
/// use kurbo::Rect;
/// use bracken_nav::{ContainerId, FixedLayout, Layout};
///
/// let mut layout = FixedLayout::new();
/// let window = ContainerId(1);
/// layout.set_container(window, Rect::new(0.0, 0.0, 20.0, 5.0));
/// layout.set_item(window, 0, Rect::new(1.0, 1.0, 19.0, 2.0));
///
/// assert_eq!(layout.item_bounds(window, 0), Some(Rect::new(1.0, 1.0, 19.0, 2.0)));
/// assert_eq!(layout.item_bounds(window, 1), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct FixedLayout {
    containers: HashMap<ContainerId, Rect>,
    items: HashMap<(ContainerId, usize), Rect>,
}

impl FixedLayout {
    /// Create an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a container's bounds.
    pub fn set_container(&mut self, id: ContainerId, bounds: Rect) {
        self.containers.insert(id, bounds);
    }

    /// Record an item's bounds.
    pub fn set_item(&mut self, id: ContainerId, index: usize, bounds: Rect) {
        self.items.insert((id, index), bounds);
    }

    /// Lay out a column of one-row items inside `bounds`, one row apart,
    /// starting one row below the top border.
    ///
    /// This mirrors how a boxed window draws its entries on a text grid and is
    /// handy for tests and demos.
    pub fn set_column(&mut self, id: ContainerId, bounds: Rect, items: usize) {
        self.set_container(id, bounds);
        self.items.retain(|(owner, _), _| *owner != id);
        for index in 0..items {
            let top = bounds.y0 + 1.0 + index as f64;
            self.set_item(
                id,
                index,
                Rect::new(bounds.x0 + 1.0, top, bounds.x1 - 1.0, top + 1.0),
            );
        }
    }

    /// Forget everything recorded for a container.
    pub fn remove_container(&mut self, id: ContainerId) {
        self.containers.remove(&id);
        self.items.retain(|(owner, _), _| *owner != id);
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.containers.clear();
        self.items.clear();
    }
}

impl Layout for FixedLayout {
    fn container_bounds(&self, id: ContainerId) -> Option<Rect> {
        self.containers.get(&id).copied()
    }

    fn item_bounds(&self, id: ContainerId, index: usize) -> Option<Rect> {
        self.items.get(&(id, index)).copied()
    }
}
