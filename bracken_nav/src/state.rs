// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The focus state machine.

use alloc::vec::Vec;

use bracken_spatial::{Direction, SpatialMatcher};
use kurbo::{Point, Vec2};

use crate::config::NavConfig;
use crate::container::Container;
use crate::coord::Coord;
use crate::hold::HoldRepeat;
use crate::layout::Layout;
use crate::resolve::{first_navigable, is_valid, resolve_move};
use crate::selectable::Selectable;

/// Observable result of one navigation tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Tick {
    /// Nothing changed.
    Idle,
    /// Focus moved.
    Moved {
        /// Previous selection.
        from: Option<Coord>,
        /// New selection.
        to: Coord,
    },
    /// The widget capturing input changed its value.
    Adjusted {
        /// The adjusted selectable.
        at: Coord,
        /// Its new generic value.
        count: i64,
    },
}

/// Focus state for one menu.
///
/// The state does not own the containers it navigates; the owning menu passes
/// them in on every call. See the crate documentation for the tick model.
#[derive(Clone, Debug)]
pub struct NavigationState {
    config: NavConfig,
    selection: Option<Coord>,
    element_input: bool,
    move_vector: Vec2,
    scroll_vector: Vec2,
    hold: HoldRepeat,
    mouse_active: bool,
    navigation_active: bool,
    selection_updated: bool,
}

impl NavigationState {
    /// Create an inactive state with nothing selected.
    pub fn new(config: NavConfig) -> Self {
        Self {
            config,
            selection: None,
            element_input: false,
            move_vector: Vec2::ZERO,
            scroll_vector: Vec2::ZERO,
            hold: HoldRepeat::default(),
            mouse_active: false,
            navigation_active: false,
            selection_updated: false,
        }
    }

    /// Current options.
    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Replace the options. Any press in progress is dropped.
    pub fn set_config(&mut self, config: NavConfig) {
        self.config = config;
        self.hold.release();
    }

    /// Current selection, `None` when nothing is focused.
    pub fn selection(&self) -> Option<Coord> {
        self.selection
    }

    /// Whether the selection changed since the flag was last taken.
    pub fn selection_updated(&self) -> bool {
        self.selection_updated
    }

    /// Read and reset the selection-changed flag.
    pub fn take_selection_updated(&mut self) -> bool {
        core::mem::take(&mut self.selection_updated)
    }

    /// Whether directional input currently drives the focused widget's value.
    pub fn is_element_input(&self) -> bool {
        self.element_input
    }

    /// Whether the last focus change came from the pointer.
    pub fn is_mouse_active(&self) -> bool {
        self.mouse_active
    }

    /// Whether ticks resolve input.
    pub fn is_navigation_active(&self) -> bool {
        self.navigation_active
    }

    /// Start or stop resolving input. Stopping drops pending movement.
    pub fn set_navigation_active(&mut self, active: bool) {
        if self.navigation_active != active {
            log::trace!("navigation active: {active}");
        }
        self.navigation_active = active;
        if !active {
            self.reset_hold();
        }
    }

    /// Last movement vector received.
    pub fn move_vector(&self) -> Vec2 {
        self.move_vector
    }

    /// Whether a movement press is being held.
    pub fn is_holding(&self) -> bool {
        self.hold.is_holding()
    }

    /// Store the latest movement vector (stick convention, `y` up).
    ///
    /// Resolution happens on a later [`tick`](Self::tick), after the configured
    /// input delay. A change of dominant direction counts as a new press.
    pub fn on_move(&mut self, movement: Vec2, now: f64) {
        self.move_vector = movement;
        match self.pressed_direction(movement) {
            None => self.hold.release(),
            Some(direction) if self.hold.direction() != Some(direction) => {
                self.hold.press(now, direction, self.config.input_delay);
            }
            Some(_) => {}
        }
    }

    /// Store a scroll vector; it is consumed by the next tick.
    pub fn on_scroll(&mut self, scroll: Vec2) {
        self.scroll_vector = scroll;
    }

    /// Drop pending movement, scroll and hold timers.
    pub fn reset_hold(&mut self) {
        self.hold.release();
        self.move_vector = Vec2::ZERO;
        self.scroll_vector = Vec2::ZERO;
    }

    fn pressed_direction(&self, movement: Vec2) -> Option<Direction> {
        let threshold = self.config.move_threshold;
        if movement.hypot2() < threshold * threshold {
            None
        } else {
            Direction::from_move(movement)
        }
    }

    /// The focused selectable.
    pub fn selectable<'a>(&self, containers: &'a [Container]) -> Option<&'a Selectable> {
        let coord = self.selection?;
        containers.get(coord.container())?.get(coord.item())
    }

    /// The focused selectable, mutably.
    pub fn selectable_mut<'a>(
        &self,
        containers: &'a mut [Container],
    ) -> Option<&'a mut Selectable> {
        let coord = self.selection?;
        containers.get_mut(coord.container())?.get_mut(coord.item())
    }

    /// Move focus to `target`.
    ///
    /// Invalid targets are rejected. Leaving a widget that captures input
    /// releases the capture first. Returns `true` when the selection changed.
    pub fn select(&mut self, target: Option<Coord>, containers: &mut [Container]) -> bool {
        if target == self.selection {
            return false;
        }
        if target.is_some_and(|t| !is_valid(t, containers)) {
            return false;
        }
        self.exit_element_input(containers);
        if let Some(old) = self.selectable_mut(containers) {
            old.set_focus(false);
        }
        self.selection = target;
        if let Some(new) = self.selectable_mut(containers) {
            new.set_focus(true);
        }
        self.selection_updated = true;
        true
    }

    /// Focus item 0 of the first navigable container.
    pub fn reset(&mut self, containers: &mut [Container]) -> bool {
        let first = first_navigable(containers);
        self.select(first, containers)
    }

    /// Remove focus everywhere and select nothing.
    pub fn clear(&mut self, containers: &mut [Container]) {
        self.exit_element_input(containers);
        for container in containers.iter_mut() {
            container.clear_focus();
        }
        if self.selection.take().is_some() {
            self.selection_updated = true;
        }
    }

    /// Drop a selection that no longer names a navigable selectable.
    ///
    /// Returns `true` when the selection was dropped.
    pub fn validate(&mut self, containers: &mut [Container]) -> bool {
        match self.selection {
            Some(coord) if !is_valid(coord, containers) => {
                log::debug!("dropping stale selection {coord:?}");
                self.element_input = false;
                if let Some(item) = self.selectable_mut(containers) {
                    item.set_input(false);
                    item.set_focus(false);
                }
                self.selection = None;
                self.selection_updated = true;
                true
            }
            _ => false,
        }
    }

    /// Hand directional input to the focused widget.
    ///
    /// Only sliders and scrollable text accept. Returns `true` on entry.
    pub fn enter_element_input(&mut self, containers: &mut [Container]) -> bool {
        if self.element_input {
            return false;
        }
        let Some(item) = self.selectable_mut(containers) else {
            return false;
        };
        if !item.widget().captures_input() {
            return false;
        }
        item.set_input(true);
        self.element_input = true;
        self.hold.release();
        true
    }

    /// Return directional input to navigation, telling the widget first.
    ///
    /// Returns `true` when element input mode was active.
    pub fn exit_element_input(&mut self, containers: &mut [Container]) -> bool {
        if !self.element_input {
            return false;
        }
        if let Some(item) = self.selectable_mut(containers) {
            item.set_input(false);
        }
        self.element_input = false;
        self.hold.release();
        true
    }

    /// Refresh unmeasured position caches from `layout`.
    ///
    /// Returns `true` when every active container is fully measured.
    pub fn sync_positions(containers: &mut [Container], layout: &impl Layout) -> bool {
        let mut all = true;
        for container in containers.iter_mut().filter(|c| c.is_active()) {
            all &= container.update_positions(layout);
        }
        all
    }

    /// One scheduler tick with pointer arbitration.
    ///
    /// `moved_to` is the pointer position when the pointer moved since the
    /// previous frame, and `None` when it rested or is absent. A moving
    /// pointer is followed and keyboard input waits; otherwise keyboard and
    /// scroll input are resolved.
    pub fn update(&mut self, now: f64, moved_to: Option<Point>, containers: &mut [Container]) -> Tick {
        match moved_to {
            Some(point) => self.follow_pointer(point, containers),
            None => self.tick(now, containers),
        }
    }

    /// Resolve pending movement and scroll input.
    pub fn tick(&mut self, now: f64, containers: &mut [Container]) -> Tick {
        if !self.navigation_active {
            return Tick::Idle;
        }
        self.validate(containers);

        let scroll = core::mem::take(&mut self.scroll_vector);
        let threshold2 = self.config.move_threshold * self.config.move_threshold;
        if scroll.hypot2() > self.move_vector.hypot2() && scroll.hypot2() >= threshold2 {
            return self.fire(scroll, containers);
        }

        let movement = self.move_vector;
        let Some(direction) = self.pressed_direction(movement) else {
            self.hold.release();
            return Tick::Idle;
        };
        if !self.hold.is_holding() {
            self.hold.press(now, direction, self.config.input_delay);
            return Tick::Idle;
        }
        if self.hold.poll(now, &self.config) {
            self.fire(movement, containers)
        } else {
            Tick::Idle
        }
    }

    fn fire(&mut self, movement: Vec2, containers: &mut [Container]) -> Tick {
        if self.element_input {
            return self.adjust(movement, containers);
        }
        let from = self.selection;
        match resolve_move(from, movement, containers, &self.config) {
            Some(to) if Some(to) != from => {
                self.select(Some(to), containers);
                self.mouse_active = false;
                log::trace!("focus {from:?} -> {to:?}");
                Tick::Moved { from, to }
            }
            _ => Tick::Idle,
        }
    }

    fn adjust(&mut self, movement: Vec2, containers: &mut [Container]) -> Tick {
        let (Some(at), Some(direction)) = (self.selection, Direction::from_move(movement)) else {
            return Tick::Idle;
        };
        let Some(container) = containers.get_mut(at.container()) else {
            return Tick::Idle;
        };
        let Some(item) = container.get_mut(at.item()) else {
            return Tick::Idle;
        };
        if !item.widget_mut().adjust(direction) {
            return Tick::Idle;
        }
        let count = item.count();
        // The value is drawn inside the row; its width may have changed.
        container.clear_cached_position();
        Tick::Adjusted { at, count }
    }

    /// Follow the pointer to `point`.
    ///
    /// Focus moves to the hit target when it differs from the selection.
    /// The pointer never moves focus away from a widget capturing input.
    pub fn follow_pointer(&mut self, point: Point, containers: &mut [Container]) -> Tick {
        if !self.navigation_active || self.element_input {
            return Tick::Idle;
        }
        let Some(to) = self.hit_test(point, containers) else {
            return Tick::Idle;
        };
        self.mouse_active = true;
        let from = self.selection;
        if self.select(Some(to), containers) {
            Tick::Moved { from, to }
        } else {
            Tick::Idle
        }
    }

    /// Selectable under `point`.
    ///
    /// The first navigable container whose measured bounds contain the point
    /// wins. Inside it, single-item containers resolve to item 0; otherwise an
    /// item containing the point, else the item nearest to it.
    pub fn hit_test(&self, point: Point, containers: &[Container]) -> Option<Coord> {
        let matcher = SpatialMatcher::with_cone(self.config.cone);
        let (index, container) = containers
            .iter()
            .enumerate()
            .find(|(_, c)| c.can_navigate() && c.contains_position(point))?;
        if container.single_item_mode() {
            return Some(Coord::new(index, 0));
        }
        let candidates: Vec<_> = container.candidates(index).collect();
        matcher
            .hit(point, &candidates)
            .or_else(|| matcher.nearest(point, &candidates))
    }
}
