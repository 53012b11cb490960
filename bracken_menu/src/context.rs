// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The menu context: registry, input link and per-frame scheduler.

use alloc::boxed::Box;
use alloc::vec::Vec;

use bracken_input::{InputEvent, InputRouter, InputSource, Routed, Translator};
use bracken_nav::{CaptureRequest, CaptureResult, Coord, FixedLayout, Layout};
use hashbrown::HashMap;
use kurbo::Point;
use smallvec::SmallVec;

use crate::capture::{CaptureProvider, CaptureTicket};
use crate::error::{MenuError, Result};
use crate::event::MenuEvent;
use crate::menu::{Menu, MenuId};

#[derive(Copy, Clone, Debug)]
struct ActiveCapture {
    ticket: CaptureTicket,
    menu: MenuId,
    at: Coord,
}

/// Owns every menu, the input link and the shared layout service.
///
/// ## Frame
///
/// [`MenuContext::tick`] runs one frame: poll the source, translate raw input
/// into events, deliver them to the linked menu, carry out close and capture
/// requests, then update every open menu (activation delays, position sync,
/// navigation). Events raised along the way are collected for
/// [`MenuContext::take_events`].
///
/// ## Returning from child menus
///
/// [`MenuContext::open_child`] records the parent as the child's last menu.
/// Closing the child re-links the parent (reopening it if it was closed) and
/// forgets the reference, so only one level of return is remembered per menu.
pub struct MenuContext<L = FixedLayout> {
    router: InputRouter<MenuId>,
    translator: Translator,
    menus: HashMap<MenuId, Menu>,
    last_menu: HashMap<MenuId, MenuId>,
    layout: L,
    provider: Option<Box<dyn CaptureProvider>>,
    capture: Option<ActiveCapture>,
    next_ticket: u64,
    pointer: Option<Point>,
    events: Vec<MenuEvent>,
}

impl<L> core::fmt::Debug for MenuContext<L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MenuContext")
            .field("linked", &self.router.linked())
            .field("menus", &self.menus.len())
            .field("capture", &self.capture)
            .finish_non_exhaustive()
    }
}

impl<L: Layout> MenuContext<L> {
    /// Create an empty context around a layout service.
    pub fn new(layout: L) -> Self {
        Self {
            router: InputRouter::new(),
            translator: Translator::new(),
            menus: HashMap::new(),
            last_menu: HashMap::new(),
            layout,
            provider: None,
            capture: None,
            next_ticket: 0,
            pointer: None,
            events: Vec::new(),
        }
    }

    /// Install or remove the capture provider.
    ///
    /// Removing it abandons a capture in progress.
    pub fn set_capture_provider(&mut self, provider: Option<Box<dyn CaptureProvider>>) {
        if provider.is_none() {
            self.abandon_capture(None);
        }
        self.provider = provider;
    }

    /// Layout service.
    pub fn layout(&self) -> &L {
        &self.layout
    }

    /// Layout service, mutably, for the renderer to report positions.
    pub fn layout_mut(&mut self) -> &mut L {
        &mut self.layout
    }

    /// Register a menu, returning the one it replaces.
    pub fn insert(&mut self, menu: Menu) -> Option<Menu> {
        let id = menu.id();
        let previous = self.menus.insert(id, menu);
        if previous.is_some() {
            log::warn!("menu {id:?} registered twice; replacing");
            self.router.unlink(id);
            self.abandon_capture(Some(id));
        }
        previous
    }

    /// Close and unregister a menu.
    pub fn remove(&mut self, id: MenuId) -> Option<Menu> {
        self.abandon_capture(Some(id));
        let mut menu = self.menus.remove(&id)?;
        menu.close();
        self.router.unlink(id);
        self.last_menu.remove(&id);
        self.last_menu.retain(|_, parent| *parent != id);
        if self.router.fallback() == Some(id) {
            self.router.set_fallback(None);
        }
        Some(menu)
    }

    /// Registered menu.
    pub fn menu(&self, id: MenuId) -> Option<&Menu> {
        self.menus.get(&id)
    }

    /// Registered menu, mutably.
    pub fn menu_mut(&mut self, id: MenuId) -> Option<&mut Menu> {
        self.menus.get_mut(&id)
    }

    /// Menu currently receiving input.
    pub fn linked(&self) -> Option<MenuId> {
        self.router.linked()
    }

    /// Menu a child will return to when it closes.
    pub fn last_menu(&self, child: MenuId) -> Option<MenuId> {
        self.last_menu.get(&child).copied()
    }

    /// Menu opened by movement while nothing is linked.
    pub fn default_menu(&self) -> Option<MenuId> {
        self.router.fallback()
    }

    /// Set or clear the default menu.
    pub fn set_default_menu(&mut self, id: Option<MenuId>) {
        self.router.set_fallback(id);
    }

    /// Whether a capture provider currently has control.
    pub fn is_capturing(&self) -> bool {
        self.capture.is_some()
    }

    /// Drain events raised since the last call.
    pub fn take_events(&mut self) -> Vec<MenuEvent> {
        core::mem::take(&mut self.events)
    }

    /// Menus needing a redraw, in id order. Resets their dirty flags.
    pub fn take_dirty(&mut self) -> SmallVec<[MenuId; 4]> {
        let mut dirty: SmallVec<[MenuId; 4]> = self
            .menus
            .iter_mut()
            .filter_map(|(id, menu)| menu.take_dirty().then_some(*id))
            .collect();
        dirty.sort_unstable();
        dirty
    }

    /// Open a menu and give it the input link.
    pub fn open(&mut self, id: MenuId, now: f64) -> Result<()> {
        let menu = self.menus.get_mut(&id).ok_or_else(|| unknown(id))?;
        menu.open(now);
        self.link(id, now);
        self.collect(id);
        Ok(())
    }

    /// Open `child` on top of `parent`; closing the child returns to `parent`.
    pub fn open_child(&mut self, child: MenuId, parent: MenuId, now: f64) -> Result<()> {
        if !self.menus.contains_key(&parent) {
            return Err(unknown(parent));
        }
        if !self.menus.contains_key(&child) {
            return Err(unknown(child));
        }
        self.last_menu.insert(child, parent);
        self.open(child, now)
    }

    /// Close a menu, releasing its link and any capture it started, then
    /// return to its last menu if one was recorded.
    pub fn close(&mut self, id: MenuId, now: f64) -> Result<()> {
        self.abandon_capture(Some(id));
        let menu = self.menus.get_mut(&id).ok_or_else(|| unknown(id))?;
        menu.close();
        self.router.unlink(id);
        self.collect(id);

        let Some(parent) = self.last_menu.remove(&id) else {
            return Ok(());
        };
        log::debug!("returning from {id:?} to {parent:?}");
        match self.menus.get(&parent).map(Menu::is_open) {
            Some(true) => {
                self.link(parent, now);
                Ok(())
            }
            Some(false) => self.open(parent, now),
            None => {
                log::warn!("last menu {parent:?} of {id:?} is gone");
                Ok(())
            }
        }
    }

    /// Hand the widget at `at` in menu `id` to the capture provider.
    ///
    /// The menu loses the input link until
    /// [`complete_capture`](Self::complete_capture) is called with the
    /// returned ticket. A capture already in progress is abandoned.
    pub fn begin_capture(
        &mut self,
        id: MenuId,
        at: Coord,
        request: CaptureRequest,
    ) -> Result<CaptureTicket> {
        if !self.menus.contains_key(&id) {
            return Err(unknown(id));
        }
        if self.provider.is_none() {
            log::warn!("menu {id:?} requested capture without a provider");
            return Err(MenuError::NoCaptureProvider(id));
        }
        self.abandon_capture(None);

        let ticket = CaptureTicket(self.next_ticket);
        self.next_ticket = self.next_ticket.wrapping_add(1);
        if let Some(provider) = self.provider.as_mut() {
            provider.begin(ticket, &request);
        }
        self.capture = Some(ActiveCapture {
            ticket,
            menu: id,
            at,
        });
        self.router.unlink(id);
        if let Some(menu) = self.menus.get_mut(&id) {
            menu.suspend();
            menu.push_event(MenuEvent::CaptureRequested {
                menu: id,
                at,
                ticket,
            });
        }
        log::debug!("capture {ticket:?} started for {id:?} at {at:?}");
        self.collect(id);
        Ok(ticket)
    }

    /// Finish the capture identified by `ticket`.
    ///
    /// Applies `result` to the widget, re-links its menu if still open, and
    /// returns whether the widget's value changed.
    pub fn complete_capture(
        &mut self,
        ticket: CaptureTicket,
        result: CaptureResult,
        now: f64,
    ) -> Result<bool> {
        let active = match self.capture {
            Some(active) if active.ticket == ticket => active,
            _ => {
                log::warn!("capture ticket {ticket:?} is not active");
                return Err(MenuError::StaleCapture(ticket));
            }
        };
        self.capture = None;
        let menu = self
            .menus
            .get_mut(&active.menu)
            .ok_or_else(|| unknown(active.menu))?;
        let changed = menu.apply_capture(active.at, result);
        menu.push_event(MenuEvent::CaptureFinished {
            menu: active.menu,
            at: active.at,
            ticket,
            changed,
        });
        let relink = menu.is_open();
        self.collect(active.menu);
        if relink {
            self.link(active.menu, now);
        }
        Ok(changed)
    }

    /// Run one frame.
    pub fn tick(&mut self, now: f64, source: &mut impl InputSource) {
        self.router.begin_frame();
        let raw = source.poll(now);
        let enabled = source.input_enabled();
        let pointer = if enabled && source.has_pointer() {
            source.pointer_position()
        } else {
            None
        };
        // Movement is a change between two known positions; a pointer that
        // appears or rests is not followed.
        let moved_to = match (self.pointer, pointer) {
            (Some(before), Some(after)) if before != after => Some(after),
            _ => None,
        };
        self.pointer = pointer;

        // Presses hit-test against this frame's position.
        if let Some(id) = self.router.linked()
            && let Some(menu) = self.menus.get_mut(&id)
        {
            menu.set_pointer(pointer);
        }

        // Translate even while a provider has control so held buttons do not
        // fire when the link returns.
        let events = self.translator.translate(&raw);
        if enabled && self.capture.is_none() {
            for event in events {
                self.route(event, now);
            }
        }

        let linked = self.router.linked();
        let mut ids: SmallVec<[MenuId; 4]> = self.menus.keys().copied().collect();
        ids.sort_unstable();
        for id in ids {
            let Some(menu) = self.menus.get_mut(&id) else {
                continue;
            };
            if linked == Some(id) {
                menu.set_pointer(pointer);
                menu.update(now, moved_to, &self.layout);
            } else {
                menu.set_pointer(None);
                menu.update(now, None, &self.layout);
            }
            menu.drain_events(&mut self.events);
        }
    }

    fn route(&mut self, event: InputEvent, now: f64) {
        match self.router.route(&event) {
            Routed::Deliver(id) => {
                let Some(menu) = self.menus.get_mut(&id) else {
                    log::warn!("linked menu {id:?} is not registered");
                    self.router.unlink(id);
                    return;
                };
                event.deliver(menu, now);
                self.after_input(id, now);
            }
            Routed::Fallback(id) => {
                log::debug!("unassigned movement opens default menu {id:?}");
                if let Err(err) = self.open(id, now) {
                    log::warn!("default menu not opened: {err}");
                }
            }
            Routed::Suppressed(_) | Routed::Dropped => {}
        }
    }

    fn after_input(&mut self, id: MenuId, now: f64) {
        let Some(menu) = self.menus.get_mut(&id) else {
            return;
        };
        let capture = menu.take_capture_request();
        let close = menu.take_close_request();
        if let Some((at, request)) = capture
            && let Err(err) = self.begin_capture(id, at, request)
        {
            log::warn!("capture not started: {err}");
        }
        if close && let Err(err) = self.close(id, now) {
            log::warn!("close failed: {err}");
        }
        self.collect(id);
    }

    fn link(&mut self, id: MenuId, now: f64) {
        if let Some(previous) = self.router.link(id)
            && previous != id
            && let Some(menu) = self.menus.get_mut(&previous)
        {
            menu.suspend();
        }
        if let Some(menu) = self.menus.get_mut(&id) {
            menu.resume(now);
        }
    }

    fn abandon_capture(&mut self, only: Option<MenuId>) {
        let Some(active) = self
            .capture
            .filter(|c| only.is_none_or(|id| id == c.menu))
        else {
            return;
        };
        self.capture = None;
        if let Some(provider) = self.provider.as_mut() {
            provider.abandon(active.ticket);
        }
        log::debug!("capture {:?} abandoned", active.ticket);
        if let Some(menu) = self.menus.get_mut(&active.menu) {
            menu.push_event(MenuEvent::CaptureFinished {
                menu: active.menu,
                at: active.at,
                ticket: active.ticket,
                changed: false,
            });
        }
        self.collect(active.menu);
    }

    fn collect(&mut self, id: MenuId) {
        if let Some(menu) = self.menus.get_mut(&id) {
            menu.drain_events(&mut self.events);
        }
    }
}

fn unknown(id: MenuId) -> MenuError {
    log::warn!("unknown menu {id:?}");
    MenuError::UnknownMenu(id)
}
