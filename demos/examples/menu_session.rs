// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted menu session on a text grid.
//!
//! This example shows how to combine:
//! - `bracken_menu` for the menu registry, lifecycle and widget dispatch,
//! - `bracken_nav::FixedLayout` as the layout service a renderer would fill,
//! - `bracken_input::ScriptedSource` standing in for real devices,
//! - a [`CaptureProvider`] that answers text and choice captures.
//!
//! The "renderer" prints each dirty menu as text and every event as it happens.
//!
//! Run:
//! - `cargo run -p bracken_demos --example menu_session`

use std::cell::RefCell;
use std::rc::Rc;

use bracken_input::{Buttons, RawInput, ScriptedSource};
use bracken_menu::{
    CaptureProvider, CaptureTicket, Menu, MenuConfig, MenuContext, MenuEvent, MenuId,
};
use bracken_nav::{
    ActionId, CaptureRequest, CaptureResult, Container, ContainerId, FixedLayout, NavAxis,
    NavConfig, Selectable,
};
use kurbo::{Point, Rect, Vec2};

const MAIN: MenuId = MenuId(0);
const OPTIONS: MenuId = MenuId(1);

const PLAY: ActionId = ActionId(0);
const OPEN_OPTIONS: ActionId = ActionId(1);
const QUIT: ActionId = ActionId(2);
const BACK: ActionId = ActionId(3);
const RESET: ActionId = ActionId(4);

const FRAME: f64 = 1.0 / 20.0;

/// Answers every capture on the next frame: text gets a fixed name, choice
/// lists advance by one.
#[derive(Default)]
struct Overlay {
    pending: Option<(CaptureTicket, CaptureRequest)>,
}

struct SharedOverlay(Rc<RefCell<Overlay>>);

impl CaptureProvider for SharedOverlay {
    fn begin(&mut self, ticket: CaptureTicket, request: &CaptureRequest) {
        println!("  [overlay] begin {ticket:?}: {request:?}");
        self.0.borrow_mut().pending = Some((ticket, request.clone()));
    }

    fn abandon(&mut self, ticket: CaptureTicket) {
        println!("  [overlay] abandon {ticket:?}");
        self.0.borrow_mut().pending = None;
    }
}

fn answer(request: &CaptureRequest) -> CaptureResult {
    match request {
        CaptureRequest::Text { .. } => CaptureResult::Text("Wanderer".into()),
        CaptureRequest::Choice { choices, selected } => {
            CaptureResult::Choice((selected + 1) % choices.len().max(1))
        }
    }
}

fn main_menu() -> Menu {
    Menu::new(MAIN, MenuConfig {
        cancel_closes_menu: false,
        ..MenuConfig::default()
    })
    .with_container(Container::new(ContainerId(0)).with_items([
        Selectable::button("Play", PLAY),
        Selectable::button("Options", OPEN_OPTIONS),
        Selectable::text_input("Name", "Nobody"),
        Selectable::button("Quit", QUIT),
    ]))
}

fn options_menu() -> Menu {
    let config = MenuConfig {
        nav: NavConfig {
            cycle_within: true,
            cycle_between: true,
            ..NavConfig::with_axis(NavAxis::TwoWay)
        },
        ..MenuConfig::default()
    };
    Menu::new(OPTIONS, config)
        .with_container(Container::new(ContainerId(1)).with_items([
            Selectable::slider("Volume", 5, 0, 10, 1),
            Selectable::toggle("Subtitles", false),
            Selectable::list_select(
                "Difficulty",
                vec!["Easy".into(), "Normal".into(), "Hard".into()],
                1,
            ),
        ]))
        .with_container(Container::new(ContainerId(2)).with_items([
            Selectable::double_confirm("Reset", RESET),
            Selectable::button("Back", BACK),
        ]))
}

/// Where the renderer would draw each container.
fn layout() -> FixedLayout {
    let mut layout = FixedLayout::new();
    layout.set_column(ContainerId(0), Rect::new(2.0, 1.0, 22.0, 7.0), 4);
    layout.set_column(ContainerId(1), Rect::new(24.0, 1.0, 44.0, 6.0), 3);
    layout.set_column(ContainerId(2), Rect::new(46.0, 1.0, 60.0, 5.0), 2);
    layout
}

fn axis(x: f64, y: f64) -> RawInput {
    RawInput {
        axis: Vec2::new(x, y),
        ..RawInput::default()
    }
}

fn buttons(buttons: Buttons) -> RawInput {
    RawInput {
        buttons,
        ..RawInput::default()
    }
}

/// Press and release, with a few idle frames to let delays pass.
fn tap(script: &mut Vec<RawInput>, frame: RawInput) {
    script.push(frame);
    script.push(RawInput::default());
    script.extend([RawInput::default(); 2]);
}

fn script() -> Vec<RawInput> {
    let mut script = vec![RawInput::default(); 3];
    // Down to "Options", open it.
    tap(&mut script, axis(0.0, -1.0));
    tap(&mut script, buttons(Buttons::CONFIRM));
    script.extend([RawInput::default(); 3]);
    // Grab the slider and push it up twice.
    tap(&mut script, buttons(Buttons::CONFIRM));
    tap(&mut script, axis(1.0, 0.0));
    tap(&mut script, axis(1.0, 0.0));
    tap(&mut script, buttons(Buttons::CANCEL));
    // Toggle subtitles, change difficulty through the overlay.
    tap(&mut script, axis(0.0, -1.0));
    tap(&mut script, buttons(Buttons::CONFIRM));
    tap(&mut script, axis(0.0, -1.0));
    tap(&mut script, buttons(Buttons::CONFIRM));
    script.extend([RawInput::default(); 2]);
    // Hop right to "Reset" and double-confirm it.
    tap(&mut script, axis(1.0, 0.0));
    tap(&mut script, buttons(Buttons::CONFIRM));
    tap(&mut script, buttons(Buttons::CONFIRM));
    // Point at "Back" and click it.
    script.push(RawInput {
        pointer: Some(Point::new(50.0, 3.5)),
        ..RawInput::default()
    });
    let at_back = |buttons| RawInput {
        buttons,
        pointer: Some(Point::new(50.0, 3.5)),
        ..RawInput::default()
    };
    script.push(at_back(Buttons::MOUSE_CONFIRM));
    script.push(at_back(Buttons::empty()));
    script.extend([at_back(Buttons::empty()); 3]);
    // Back in the main menu: rename, then quit.
    tap(&mut script, axis(0.0, -1.0));
    tap(&mut script, buttons(Buttons::CONFIRM));
    script.extend([RawInput::default(); 2]);
    tap(&mut script, axis(0.0, -1.0));
    tap(&mut script, buttons(Buttons::CONFIRM));
    script
}

fn render(cx: &mut MenuContext) {
    for id in cx.take_dirty() {
        let Some(menu) = cx.menu(id) else { continue };
        if !menu.is_open() {
            continue;
        }
        println!("  +-- menu {} --", id.0);
        for (ci, container) in menu.containers().iter().enumerate() {
            for item in container.items() {
                let marker = match (item.is_focused(), item.is_capturing_input()) {
                    (true, true) => "<>",
                    (true, false) => "> ",
                    _ => "  ",
                };
                println!("  | {ci} {marker}{:<12} {}", item.label(), item.count());
            }
        }
    }
}

fn main() {
    let overlay = Rc::new(RefCell::new(Overlay::default()));
    let mut cx = MenuContext::new(layout());
    cx.set_capture_provider(Some(Box::new(SharedOverlay(overlay.clone()))));
    cx.insert(main_menu());
    cx.insert(options_menu());
    cx.set_default_menu(Some(MAIN));

    let mut source = ScriptedSource::new();
    source.extend(script());

    let mut now = 0.0;
    cx.open(MAIN, now).expect("main menu is registered");
    let mut running = true;
    while running && source.pending() > 0 {
        now += FRAME;
        cx.tick(now, &mut source);

        for event in cx.take_events() {
            println!("{now:6.2}s {event:?}");
            match event {
                MenuEvent::Action {
                    action: OPEN_OPTIONS,
                    ..
                } => cx
                    .open_child(OPTIONS, MAIN, now)
                    .expect("both menus are registered"),
                MenuEvent::Action { action: BACK, .. } => {
                    cx.close(OPTIONS, now).expect("options is registered");
                }
                MenuEvent::Action { action: QUIT, .. } => running = false,
                _ => {}
            }
        }

        let pending = overlay.borrow_mut().pending.take();
        if let Some((ticket, request)) = pending {
            let changed = cx
                .complete_capture(ticket, answer(&request), now)
                .expect("overlay answers the active capture");
            println!("  [overlay] completed {ticket:?}, changed: {changed}");
        }

        render(&mut cx);
    }
    println!("session ended at {now:.2}s");
}
