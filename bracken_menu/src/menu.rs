// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menu lifecycle and widget dispatch.

use alloc::vec::Vec;

use bracken_input::{InputListener, PressResult, PressState};
use bracken_nav::{
    ActionId, CaptureRequest, CaptureResult, Container, ContainerId, Coord, Layout, NOT_HOLDING,
    NavAxis, NavConfig, NavigationState, Reaction, Selectable, Tick, Widget,
};
use kurbo::{Point, Vec2};

use crate::config::{MenuConfig, ResetPolicy};
use crate::error::{MenuError, Result};
use crate::event::MenuEvent;

/// Identifier of a menu inside a [`MenuContext`](crate::MenuContext).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MenuId(pub u32);

/// One menu: its containers, its navigation state and its open/closed state.
///
/// A menu reacts to input through its [`InputListener`] implementation and
/// advances timers in [`Menu::update`]. Requests it cannot fulfil alone
/// (closing itself, starting an external capture) are left for the owning
/// context to pick up with [`Menu::take_close_request`] and
/// [`Menu::take_capture_request`].
#[derive(Clone, Debug)]
pub struct Menu {
    id: MenuId,
    config: MenuConfig,
    containers: Vec<Container>,
    nav: NavigationState,
    open: bool,
    input_ready_at: f64,
    dirty: bool,
    reported: Option<Coord>,
    pointer: Option<Point>,
    press: PressState<Coord>,
    close_requested: bool,
    capture_request: Option<(Coord, CaptureRequest)>,
    events: Vec<MenuEvent>,
}

impl Menu {
    /// Create a closed menu without containers.
    pub fn new(id: MenuId, config: MenuConfig) -> Self {
        Self {
            id,
            config,
            containers: Vec::new(),
            nav: NavigationState::new(config.nav),
            open: false,
            input_ready_at: NOT_HOLDING,
            dirty: true,
            reported: None,
            pointer: None,
            press: PressState::new(),
            close_requested: false,
            capture_request: None,
            events: Vec::new(),
        }
    }

    /// Builder-style: append a container.
    pub fn with_container(mut self, container: Container) -> Self {
        self.push_container(container);
        self
    }

    /// Append a container and return its index.
    pub fn push_container(&mut self, mut container: Container) -> usize {
        container.set_active(self.open);
        self.containers.push(container);
        self.dirty = true;
        self.containers.len() - 1
    }

    /// Identifier.
    pub fn id(&self) -> MenuId {
        self.id
    }

    /// Current options.
    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// Replace the options.
    pub fn set_config(&mut self, config: MenuConfig) {
        self.nav.set_config(config.nav);
        self.config = config;
    }

    /// Whether the menu is displayed.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether input is currently resolved.
    pub fn is_navigation_active(&self) -> bool {
        self.nav.is_navigation_active()
    }

    /// Whether a slider or scrollable text holds directional input.
    pub fn is_element_input(&self) -> bool {
        self.nav.is_element_input()
    }

    /// Focused coordinate.
    pub fn selection(&self) -> Option<Coord> {
        self.nav.selection()
    }

    /// Focused selectable.
    pub fn selectable(&self) -> Option<&Selectable> {
        self.nav.selectable(&self.containers)
    }

    /// Navigation state, read-only.
    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    /// Containers in navigation order.
    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    /// Mutable container access. Marks the menu dirty.
    ///
    /// A selection left pointing at a removed item is dropped on the next
    /// update.
    pub fn container_mut(&mut self, index: usize) -> Option<&mut Container> {
        self.dirty = true;
        self.containers.get_mut(index)
    }

    /// Read and reset the redraw flag.
    pub fn take_dirty(&mut self) -> bool {
        core::mem::take(&mut self.dirty)
    }

    /// Request a redraw.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Drain pending events.
    pub fn take_events(&mut self) -> Vec<MenuEvent> {
        core::mem::take(&mut self.events)
    }

    pub(crate) fn drain_events(&mut self, into: &mut Vec<MenuEvent>) {
        into.append(&mut self.events);
    }

    pub(crate) fn push_event(&mut self, event: MenuEvent) {
        self.events.push(event);
    }

    /// Whether an unconsumed cancel asked for the menu to close.
    pub fn take_close_request(&mut self) -> bool {
        core::mem::take(&mut self.close_requested)
    }

    /// Capture a widget asked for on its last confirm.
    pub fn take_capture_request(&mut self) -> Option<(Coord, CaptureRequest)> {
        self.capture_request.take()
    }

    /// Open the menu.
    ///
    /// Containers are activated and their cached positions dropped, the
    /// selection is handled per [`ResetPolicy`](crate::ResetPolicy), and input
    /// is resolved once `open_input_delay` has passed. Returns `false` if the
    /// menu was already open.
    pub fn open(&mut self, now: f64) -> bool {
        if self.open {
            return false;
        }
        self.open = true;
        self.close_requested = false;
        self.input_ready_at = now + self.config.open_input_delay.max(0.0);
        self.nav.set_navigation_active(false);
        for container in &mut self.containers {
            container.set_active(true);
            container.clear_cached_position();
        }
        match self.config.reset_policy {
            ResetPolicy::ResetSelection => {
                self.nav.clear(&mut self.containers);
                self.nav.reset(&mut self.containers);
            }
            ResetPolicy::ClearSelection => self.nav.clear(&mut self.containers),
            ResetPolicy::Disable => {
                self.nav.validate(&mut self.containers);
                if let Some(item) = self.nav.selectable_mut(&mut self.containers) {
                    item.set_focus(true);
                }
            }
        }
        self.dirty = true;
        log::debug!("menu {:?} opened", self.id);
        self.events.push(MenuEvent::Opened(self.id));
        self.flush_focus();
        true
    }

    /// Close the menu.
    ///
    /// A widget holding directional input is released first. Focus visuals
    /// are cleared and containers deactivated, but the selection itself is
    /// kept for [`ResetPolicy::Disable`](crate::ResetPolicy::Disable).
    /// Returns `false` if the menu was already closed.
    pub fn close(&mut self) -> bool {
        if !self.open {
            return false;
        }
        if self.nav.exit_element_input(&mut self.containers) {
            log::trace!("menu {:?} released element input on close", self.id);
        }
        self.disarm_where(Widget::disarm);
        self.press.cancel();
        self.close_requested = false;
        self.capture_request = None;
        for container in &mut self.containers {
            container.clear_focus();
            container.set_active(false);
        }
        self.nav.set_navigation_active(false);
        self.input_ready_at = NOT_HOLDING;
        self.open = false;
        self.dirty = true;
        log::debug!("menu {:?} closed", self.id);
        self.events.push(MenuEvent::Closed(self.id));
        true
    }

    /// Stop resolving input while another menu or a capture provider has it.
    pub fn suspend(&mut self) {
        self.nav.set_navigation_active(false);
        self.input_ready_at = NOT_HOLDING;
        self.press.cancel();
    }

    /// Resume resolving input from `now` after a [`suspend`](Self::suspend).
    ///
    /// Has no effect on a closed menu or on one still waiting out its open delay.
    pub fn resume(&mut self, now: f64) {
        if self.open && !self.nav.is_navigation_active() && self.input_ready_at == NOT_HOLDING {
            self.input_ready_at = now;
        }
    }

    /// Record where the pointer is this frame.
    ///
    /// Mouse presses and releases hit-test against this position, so it is
    /// set before the frame's input is delivered. `None` while the menu does
    /// not own the input link.
    pub fn set_pointer(&mut self, pointer: Option<Point>) {
        if let Some(point) = pointer {
            self.press.on_move(point);
        }
        self.pointer = pointer;
    }

    /// Pointer position recorded by [`Menu::set_pointer`].
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Per-tick update: activation delay, position sync, double-confirm
    /// expiry and navigation.
    ///
    /// `moved_to` is the pointer position when the pointer moved since the
    /// previous frame and this menu owns the input link.
    pub fn update(&mut self, now: f64, moved_to: Option<Point>, layout: &impl Layout) {
        if !self.open {
            return;
        }
        if now >= self.input_ready_at {
            self.input_ready_at = NOT_HOLDING;
            self.nav.set_navigation_active(true);
        }
        NavigationState::sync_positions(&mut self.containers, layout);

        let window = self.config.double_confirm_window;
        self.disarm_where(|widget| widget.expire(now, window));

        if moved_to.is_some() {
            self.set_pointer(moved_to);
        }
        if let Tick::Adjusted { at, count } = self.nav.update(now, moved_to, &mut self.containers) {
            self.events.push(MenuEvent::ValueChanged {
                menu: self.id,
                at,
                count,
            });
            self.dirty = true;
        }
        self.flush_focus();
    }

    /// Focus `target` directly.
    pub fn select(&mut self, target: Option<Coord>) -> bool {
        let changed = self.nav.select(target, &mut self.containers);
        self.flush_focus();
        changed
    }

    /// Apply an external capture result to the widget at `at`.
    ///
    /// Returns `true` when the widget's value changed.
    pub fn apply_capture(&mut self, at: Coord, result: CaptureResult) -> bool {
        let Some(container) = self.containers.get_mut(at.container()) else {
            return false;
        };
        let Some(item) = container.get_mut(at.item()) else {
            return false;
        };
        if !item.widget_mut().apply_capture(result) {
            return false;
        }
        let count = item.count();
        container.clear_cached_position();
        self.events.push(MenuEvent::ValueChanged {
            menu: self.id,
            at,
            count,
        });
        self.dirty = true;
        true
    }

    fn flush_focus(&mut self) {
        if !self.nav.take_selection_updated() {
            return;
        }
        let to = self.nav.selection();
        if to != self.reported {
            self.events.push(MenuEvent::FocusChanged {
                menu: self.id,
                from: self.reported,
                to,
            });
            self.reported = to;
            self.dirty = true;
        }
    }

    fn disarm_where(&mut self, mut disarm: impl FnMut(&mut Widget) -> bool) {
        let menu = self.id;
        for (ci, container) in self.containers.iter_mut().enumerate() {
            for ii in 0..container.len() {
                if container
                    .get_mut(ii)
                    .is_some_and(|item| disarm(item.widget_mut()))
                {
                    self.events.push(MenuEvent::Disarmed {
                        menu,
                        at: Coord::new(ci, ii),
                    });
                    self.dirty = true;
                }
            }
        }
    }

    fn react(&mut self, at: Coord, reaction: Reaction) {
        let menu = self.id;
        match reaction {
            Reaction::Consumed | Reaction::Unconsumed => {}
            Reaction::Trigger(action) => {
                log::debug!("menu {menu:?} triggered {action:?}");
                self.events.push(MenuEvent::Action { menu, at, action });
                self.dirty = true;
            }
            Reaction::Toggled(on) => {
                self.events.push(MenuEvent::Toggled { menu, at, on });
                self.dirty = true;
            }
            Reaction::Counted(count) => {
                self.events.push(MenuEvent::ValueChanged { menu, at, count });
                self.dirty = true;
            }
            Reaction::Armed => {
                self.events.push(MenuEvent::Armed { menu, at });
                self.dirty = true;
            }
            Reaction::Disarmed => {
                self.events.push(MenuEvent::Disarmed { menu, at });
                self.dirty = true;
            }
            Reaction::BeginInput => {
                if self.nav.enter_element_input(&mut self.containers) {
                    self.dirty = true;
                }
            }
            Reaction::Capture(request) => self.capture_request = Some((at, request)),
        }
    }
}

impl InputListener for Menu {
    fn on_move(&mut self, movement: Vec2, now: f64) {
        if self.nav.is_navigation_active() {
            self.nav.on_move(movement, now);
        }
    }

    fn on_confirm(&mut self, now: f64) {
        if !self.nav.is_navigation_active() {
            return;
        }
        // Confirm while captured releases the capture.
        if self.nav.exit_element_input(&mut self.containers) {
            self.dirty = true;
            return;
        }
        let Some(at) = self.nav.selection() else {
            return;
        };
        let window = self.config.double_confirm_window;
        let Some(item) = self.nav.selectable_mut(&mut self.containers) else {
            return;
        };
        if !item.is_available() {
            log::debug!("confirm ignored on unavailable {at:?}");
            return;
        }
        let reaction = item.widget_mut().confirm(now, window);
        self.react(at, reaction);
    }

    fn on_cancel(&mut self, _now: f64) {
        if !self.nav.is_navigation_active() {
            return;
        }
        if self.nav.exit_element_input(&mut self.containers) {
            self.dirty = true;
            return;
        }
        let reaction = match (
            self.nav.selection(),
            self.nav.selectable_mut(&mut self.containers),
        ) {
            (Some(at), Some(item)) if item.is_available() => Some((at, item.widget_mut().cancel())),
            _ => None,
        };
        match reaction {
            Some((at, reaction)) if reaction != Reaction::Unconsumed => self.react(at, reaction),
            _ if self.config.cancel_closes_menu => self.close_requested = true,
            _ => {}
        }
    }

    fn on_scroll(&mut self, scroll: Vec2, _now: f64) {
        if self.nav.is_navigation_active() {
            self.nav.on_scroll(scroll);
        }
    }

    fn on_mouse_confirm_pressed(&mut self, now: f64) {
        if !self.nav.is_navigation_active() {
            return;
        }
        let Some(point) = self.pointer else {
            return;
        };
        if let Some(target) = self.nav.hit_test(point, &self.containers) {
            self.press.on_down(target, point, now);
        }
    }

    fn on_mouse_confirm_released(&mut self, now: f64) {
        let (true, Some(point)) = (self.nav.is_navigation_active(), self.pointer) else {
            self.press.cancel();
            return;
        };
        let current = self.nav.hit_test(point, &self.containers);
        if let PressResult::Click(target) = self.press.on_up(current.as_ref(), point, now) {
            self.nav.select(Some(target), &mut self.containers);
            self.flush_focus();
            self.on_confirm(now);
        }
    }
}

/// Builder for single-container pop-up menus of buttons.
#[derive(Copy, Clone, Debug)]
pub struct ContextMenu;

impl ContextMenu {
    /// Options used by [`ContextMenu::build`]: vertical, wrapping, cancel closes.
    pub fn config() -> MenuConfig {
        MenuConfig {
            nav: NavConfig {
                cycle_within: true,
                ..NavConfig::with_axis(NavAxis::Y)
            },
            cancel_closes_menu: true,
            ..MenuConfig::default()
        }
    }

    /// Build a closed menu with one button per `(choice, action)` pair.
    pub fn build<S: AsRef<str>>(
        id: MenuId,
        container: ContainerId,
        choices: &[S],
        actions: &[ActionId],
    ) -> Result<Menu> {
        if choices.len() != actions.len() {
            log::warn!(
                "context menu {id:?}: {} choices but {} actions",
                choices.len(),
                actions.len()
            );
            return Err(MenuError::MismatchedChoices {
                choices: choices.len(),
                actions: actions.len(),
            });
        }
        let buttons = choices
            .iter()
            .zip(actions)
            .map(|(label, action)| Selectable::button(label.as_ref(), *action));
        Ok(Menu::new(id, Self::config()).with_container(Container::new(container).with_items(buttons)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use bracken_nav::FixedLayout;
    use kurbo::Rect;

    const ID: MenuId = MenuId(1);
    const DOWN: Vec2 = Vec2::new(0.0, -1.0);
    const RIGHT: Vec2 = Vec2::new(1.0, 0.0);

    fn settings() -> Menu {
        Menu::new(ID, MenuConfig::default()).with_container(Container::new(ContainerId(0)).with_items([
            Selectable::slider("Volume", 5, 0, 10, 1),
            Selectable::toggle("Subtitles", false),
            Selectable::countable("Lives", 0, 0, 3),
            Selectable::double_confirm("Reset", ActionId(9)),
            Selectable::button("Back", ActionId(1)),
        ]))
    }

    /// Open and run past the input delay.
    fn opened(mut menu: Menu) -> Menu {
        menu.open(0.0);
        menu.update(1.0, None, &FixedLayout::new());
        assert!(menu.is_navigation_active());
        menu.take_events();
        menu
    }

    fn tap(menu: &mut Menu, movement: Vec2, now: &mut f64) {
        let layout = FixedLayout::new();
        menu.on_move(movement, *now);
        *now += 0.01;
        menu.update(*now, None, &layout);
        menu.on_move(Vec2::ZERO, *now);
        *now += 0.01;
        menu.update(*now, None, &layout);
    }

    #[test]
    fn opening_resets_selection_and_waits_for_input_delay() {
        let mut menu = settings();
        assert!(menu.open(0.0));
        assert!(!menu.open(0.0));
        assert_eq!(menu.selection(), Some(Coord::new(0, 0)));
        assert!(menu.containers()[0].items()[0].is_focused());
        assert_eq!(menu.take_events(), vec![
            MenuEvent::Opened(ID),
            MenuEvent::FocusChanged {
                menu: ID,
                from: None,
                to: Some(Coord::new(0, 0))
            }
        ]);

        menu.update(0.05, None, &FixedLayout::new());
        assert!(!menu.is_navigation_active());
        menu.on_move(DOWN, 0.05);
        menu.update(0.1, None, &FixedLayout::new());
        assert!(menu.is_navigation_active());
        assert_eq!(menu.selection(), Some(Coord::new(0, 0)));
    }

    #[test]
    fn clear_policy_opens_without_focus() {
        let mut menu = settings();
        menu.set_config(MenuConfig {
            reset_policy: ResetPolicy::ClearSelection,
            ..MenuConfig::default()
        });
        menu.open(0.0);
        assert_eq!(menu.selection(), None);
        assert!(menu.containers()[0].items().iter().all(|i| !i.is_focused()));
    }

    #[test]
    fn disable_policy_restores_frozen_selection() {
        let mut menu = settings();
        menu.set_config(MenuConfig {
            reset_policy: ResetPolicy::Disable,
            ..MenuConfig::default()
        });
        let mut menu = opened(menu);
        menu.select(Some(Coord::new(0, 4)));
        menu.close();
        assert!(!menu.containers()[0].items()[4].is_focused());
        assert!(!menu.containers()[0].is_active());
        menu.open(2.0);
        assert_eq!(menu.selection(), Some(Coord::new(0, 4)));
        assert!(menu.containers()[0].items()[4].is_focused());
    }

    #[test]
    fn slider_confirm_captures_movement_and_cancel_releases() {
        let mut menu = opened(settings());
        let mut now = 1.0;
        menu.on_confirm(now);
        assert!(menu.is_element_input());

        tap(&mut menu, RIGHT, &mut now);
        assert_eq!(menu.containers()[0].items()[0].count(), 6);
        assert_eq!(menu.selection(), Some(Coord::new(0, 0)));
        assert!(menu.take_events().contains(&MenuEvent::ValueChanged {
            menu: ID,
            at: Coord::new(0, 0),
            count: 6
        }));

        menu.on_cancel(now);
        assert!(!menu.is_element_input());
        assert!(!menu.take_close_request());
        tap(&mut menu, DOWN, &mut now);
        assert_eq!(menu.containers()[0].items()[0].count(), 6);
        assert_eq!(menu.selection(), Some(Coord::new(0, 1)));
    }

    #[test]
    fn toggle_flips_unless_unavailable() {
        let mut menu = opened(settings());
        let toggle = Coord::new(0, 1);
        menu.select(Some(toggle));
        menu.take_events();
        menu.on_confirm(1.0);
        assert_eq!(menu.take_events(), vec![MenuEvent::Toggled {
            menu: ID,
            at: toggle,
            on: true
        }]);

        if let Some(item) = menu.container_mut(0).and_then(|c| c.get_mut(1)) {
            item.set_available(false);
        }
        menu.on_confirm(1.1);
        assert!(menu.take_events().is_empty());
        assert_eq!(menu.selectable().map(Selectable::count), Some(1));
    }

    #[test]
    fn countable_cancel_at_minimum_closes() {
        let mut menu = opened(settings());
        menu.select(Some(Coord::new(0, 2)));
        menu.on_confirm(1.0);
        menu.on_confirm(1.0);
        assert_eq!(menu.selectable().map(Selectable::count), Some(2));
        menu.on_cancel(1.0);
        menu.on_cancel(1.0);
        assert_eq!(menu.selectable().map(Selectable::count), Some(0));
        assert!(!menu.take_close_request());
        menu.on_cancel(1.0);
        assert!(menu.take_close_request());
    }

    #[test]
    fn double_confirm_arms_triggers_and_expires() {
        let mut menu = opened(settings());
        let reset = Coord::new(0, 3);
        menu.select(Some(reset));
        menu.take_events();

        menu.on_confirm(1.0);
        menu.on_confirm(1.2);
        assert_eq!(menu.take_events(), vec![
            MenuEvent::Armed {
                menu: ID,
                at: reset
            },
            MenuEvent::Action {
                menu: ID,
                at: reset,
                action: ActionId(9)
            }
        ]);

        menu.on_confirm(2.0);
        menu.update(2.4, None, &FixedLayout::new());
        assert_eq!(menu.take_events().len(), 1, "still armed inside the window");
        menu.update(2.6, None, &FixedLayout::new());
        assert_eq!(menu.take_events(), vec![MenuEvent::Disarmed {
            menu: ID,
            at: reset
        }]);

        menu.on_confirm(3.0);
        menu.on_cancel(3.1);
        assert!(!menu.take_close_request());
        assert_eq!(menu.selectable().map(Selectable::count), Some(0));
    }

    #[test]
    fn close_releases_capture_and_clears_focus() {
        let mut menu = opened(settings());
        menu.on_confirm(1.0);
        assert!(menu.containers()[0].items()[0].is_capturing_input());
        menu.select(Some(Coord::new(0, 3)));
        menu.on_confirm(1.0);
        menu.select(Some(Coord::new(0, 0)));
        menu.on_confirm(1.1);
        menu.take_events();

        assert!(menu.close());
        assert!(!menu.is_element_input());
        let items = menu.containers()[0].items();
        assert!(items.iter().all(|i| !i.is_focused() && !i.is_capturing_input()));
        assert_eq!(items[3].count(), 0);
        assert_eq!(menu.take_events(), vec![
            MenuEvent::Disarmed {
                menu: ID,
                at: Coord::new(0, 3)
            },
            MenuEvent::Closed(ID)
        ]);
        assert!(!menu.close());
    }

    #[test]
    fn input_is_ignored_while_closed() {
        let mut menu = settings();
        menu.on_confirm(0.0);
        menu.on_cancel(0.0);
        assert!(!menu.take_close_request());
        assert!(menu.take_events().is_empty());
    }

    #[test]
    fn text_input_requests_capture() {
        let mut menu = opened(
            Menu::new(ID, MenuConfig::default()).with_container(
                Container::new(ContainerId(0))
                    .with_items([Selectable::text_input("Name", "Ada")]),
            ),
        );
        menu.on_confirm(1.0);
        let (at, request) = menu.take_capture_request().unwrap();
        assert_eq!(at, Coord::new(0, 0));
        assert!(matches!(request, CaptureRequest::Text { ref initial, .. } if initial == "Ada"));
        assert!(menu.apply_capture(at, CaptureResult::Text("Grace".into())));
        assert_eq!(menu.selectable().map(Selectable::count), Some(5));
        assert!(!menu.apply_capture(at, CaptureResult::Cancelled));
    }

    #[test]
    fn mouse_release_over_pressed_item_confirms_it() {
        let mut layout = FixedLayout::new();
        layout.set_column(ContainerId(0), Rect::new(0.0, 0.0, 20.0, 7.0), 5);
        let mut menu = settings();
        menu.open(0.0);
        menu.update(1.0, None, &layout);
        menu.take_events();

        let toggle_row = Point::new(5.0, 2.5);
        menu.update(1.1, Some(toggle_row), &layout);
        assert_eq!(menu.selection(), Some(Coord::new(0, 1)));
        menu.on_mouse_confirm_pressed(1.1);
        menu.on_mouse_confirm_released(1.15);
        assert!(menu.take_events().contains(&MenuEvent::Toggled {
            menu: ID,
            at: Coord::new(0, 1),
            on: true
        }));
    }

    #[test]
    fn press_uses_pointer_recorded_before_delivery() {
        let mut layout = FixedLayout::new();
        layout.set_column(ContainerId(0), Rect::new(0.0, 0.0, 20.0, 7.0), 5);
        let mut menu = settings();
        menu.open(0.0);
        menu.update(1.0, None, &layout);
        menu.take_events();

        // The pointer shows up in the same frame as the press.
        let back_row = Point::new(5.0, 5.5);
        menu.set_pointer(Some(back_row));
        menu.on_mouse_confirm_pressed(1.1);
        menu.update(1.1, None, &layout);
        menu.set_pointer(Some(back_row));
        menu.on_mouse_confirm_released(1.15);
        assert_eq!(menu.selection(), Some(Coord::new(0, 4)));
        assert!(menu.take_events().contains(&MenuEvent::Action {
            menu: ID,
            at: Coord::new(0, 4),
            action: ActionId(1)
        }));
    }

    #[test]
    fn scrollable_text_captures_and_mouse_cancel_releases() {
        let mut menu = opened(
            Menu::new(ID, MenuConfig::default()).with_container(
                Container::new(ContainerId(0)).with_items([
                    Selectable::scrollable_text("Credits", 12, 4),
                    Selectable::button("Back", ActionId(1)),
                ]),
            ),
        );
        menu.on_confirm(1.0);
        assert!(menu.is_element_input());
        let mut now = 1.0;
        tap(&mut menu, DOWN, &mut now);
        tap(&mut menu, RIGHT, &mut now);
        assert_eq!(menu.selectable().map(Selectable::count), Some(5));
        assert_eq!(menu.selection(), Some(Coord::new(0, 0)));
        assert!(menu.take_events().contains(&MenuEvent::ValueChanged {
            menu: ID,
            at: Coord::new(0, 0),
            count: 4
        }));

        // The first mouse cancel only releases the capture.
        menu.on_mouse_cancel(now);
        assert!(!menu.is_element_input());
        assert!(!menu.take_close_request());
        // The next one falls through to closing.
        menu.on_mouse_cancel(now);
        assert!(menu.take_close_request());
    }

    #[test]
    fn context_menu_requires_matching_lengths() {
        let err = ContextMenu::build(ID, ContainerId(0), &["Use", "Drop"], &[ActionId(0)]).unwrap_err();
        assert_eq!(err, MenuError::MismatchedChoices {
            choices: 2,
            actions: 1
        });
        let menu = ContextMenu::build(ID, ContainerId(0), &["Use", "Drop"], &[ActionId(0), ActionId(1)])
            .unwrap();
        assert_eq!(menu.containers()[0].len(), 2);
        assert!(menu.config().nav.cycle_within);
    }
}
