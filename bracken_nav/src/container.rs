// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Containers ("windows") of selectables.

use alloc::vec::Vec;

use bracken_spatial::{Candidate, measured};
use kurbo::{Point, Rect};

use crate::coord::Coord;
use crate::layout::Layout;
use crate::selectable::Selectable;

/// Identifier a container uses to look itself up in a [`Layout`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(pub u32);

/// An ordered group of selectables rendered together.
///
/// Insertion order is navigation order. Item indices stay valid until the
/// next [`Container::clear`].
#[derive(Clone, Debug)]
pub struct Container {
    id: ContainerId,
    items: Vec<Selectable>,
    active: bool,
    single_item_mode: bool,
    bounds: Option<Rect>,
}

impl Container {
    /// Create an empty, active container.
    pub fn new(id: ContainerId) -> Self {
        Self {
            id,
            items: Vec::new(),
            active: true,
            single_item_mode: false,
            bounds: None,
        }
    }

    /// Builder-style: add items.
    pub fn with_items(mut self, items: impl IntoIterator<Item = Selectable>) -> Self {
        self.items.extend(items);
        self
    }

    /// Builder-style: set single-item mode.
    pub fn with_single_item_mode(mut self, single: bool) -> Self {
        self.single_item_mode = single;
        self
    }

    /// Layout identifier.
    pub fn id(&self) -> ContainerId {
        self.id
    }

    /// Append an item and return its index.
    pub fn push(&mut self, item: Selectable) -> usize {
        self.items.push(item);
        self.bounds = None;
        self.items.len() - 1
    }

    /// Remove every item. Coordinates into this container become invalid.
    pub fn clear(&mut self) {
        self.items.clear();
        self.bounds = None;
    }

    /// Items in navigation order.
    pub fn items(&self) -> &[Selectable] {
        &self.items
    }

    /// Item at `index`.
    pub fn get(&self, index: usize) -> Option<&Selectable> {
        self.items.get(index)
    }

    /// Mutable item at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Selectable> {
        self.items.get_mut(index)
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the container has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the container is shown and interactive.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Show or hide the container. Hiding drops focus from all items.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if !active {
            self.clear_focus();
        }
    }

    /// Whether focus can enter this container.
    pub fn can_navigate(&self) -> bool {
        self.active && !self.items.is_empty()
    }

    /// Whether a hit anywhere in the container targets item 0.
    pub fn single_item_mode(&self) -> bool {
        self.single_item_mode
    }

    /// Enable or disable single-item mode.
    pub fn set_single_item_mode(&mut self, single: bool) {
        self.single_item_mode = single;
    }

    /// Cached container bounds, `None` until measured.
    pub fn bounds(&self) -> Option<Rect> {
        measured(self.bounds)
    }

    /// Centre of the cached bounds.
    pub fn center(&self) -> Option<Point> {
        self.bounds().map(|r| r.center())
    }

    /// Whether the measured container bounds contain `point`.
    pub fn contains_position(&self, point: Point) -> bool {
        self.bounds().is_some_and(|r| r.contains(point))
    }

    /// Whether the measured bounds of item `index` contain `point`.
    pub fn item_contains_position(&self, index: usize, point: Point) -> bool {
        self.items
            .get(index)
            .and_then(Selectable::bounds)
            .is_some_and(|r| r.contains(point))
    }

    /// Whether the container and all of its items have been measured.
    pub fn is_measured(&self) -> bool {
        self.bounds().is_some() && self.items.iter().all(|i| i.bounds().is_some())
    }

    /// Refresh cached bounds from `layout` if anything is unmeasured.
    ///
    /// Returns `true` when every cache is measured afterwards.
    pub fn update_positions(&mut self, layout: &impl Layout) -> bool {
        if self.is_measured() {
            return true;
        }
        self.bounds = layout.container_bounds(self.id);
        for (index, item) in self.items.iter_mut().enumerate() {
            item.set_bounds(layout.item_bounds(self.id, index));
        }
        self.is_measured()
    }

    /// Invalidate the container's and items' cached bounds.
    pub fn clear_cached_position(&mut self) {
        self.bounds = None;
        for item in &mut self.items {
            item.clear_bounds();
        }
    }

    /// Remove focus and value capture from every item.
    pub fn clear_focus(&mut self) {
        for item in &mut self.items {
            item.set_input(false);
            item.set_focus(false);
        }
    }

    /// Spatial candidates for this container's items, keyed by coordinate.
    pub fn candidates(&self, container_index: usize) -> impl Iterator<Item = Candidate<Coord>> + '_ {
        self.items
            .iter()
            .enumerate()
            .map(move |(i, item)| Candidate::new(Coord::new(container_index, i), item.bounds()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FixedLayout;
    use crate::widget::ActionId;

    #[test]
    fn can_navigate_requires_items_and_active() {
        let mut c = Container::new(ContainerId(0));
        assert!(!c.can_navigate());
        c.push(Selectable::button("A", ActionId(0)));
        assert!(c.can_navigate());
        c.set_active(false);
        assert!(!c.can_navigate());
    }

    #[test]
    fn update_positions_fills_and_invalidation_clears() {
        let mut layout = FixedLayout::new();
        layout.set_column(ContainerId(3), Rect::new(0.0, 0.0, 12.0, 4.0), 2);
        let mut c = Container::new(ContainerId(3)).with_items([
            Selectable::button("A", ActionId(0)),
            Selectable::button("B", ActionId(1)),
        ]);
        assert!(!c.is_measured());
        assert!(c.update_positions(&layout));
        assert!(c.contains_position(Point::new(5.0, 2.5)));
        assert!(c.item_contains_position(1, Point::new(5.0, 2.5)));
        assert!(!c.item_contains_position(0, Point::new(5.0, 2.5)));

        c.clear_cached_position();
        assert!(!c.is_measured());
        assert!(!c.contains_position(Point::new(5.0, 2.5)));
    }

    #[test]
    fn hiding_clears_focus() {
        let mut c = Container::new(ContainerId(0)).with_items([Selectable::slider("V", 0, 0, 3, 1)]);
        let item = c.get_mut(0).unwrap();
        item.set_focus(true);
        item.set_input(true);
        c.set_active(false);
        assert!(!c.items()[0].is_focused());
        assert!(!c.items()[0].is_capturing_input());
    }
}
