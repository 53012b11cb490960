// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interactive elements.

use alloc::string::String;
use alloc::vec::Vec;

use bracken_spatial::measured;
use kurbo::{Point, Rect};

use crate::widget::{ActionId, Kind, Widget};

/// One focusable element inside a [`Container`](crate::Container).
///
/// Focus and availability are owned by the navigation and menu layers;
/// application code toggles availability to grey out an element without
/// removing it from navigation.
#[derive(Clone, Debug, PartialEq)]
pub struct Selectable {
    label: String,
    widget: Widget,
    available: bool,
    focused: bool,
    input: bool,
    bounds: Option<Rect>,
}

impl Selectable {
    /// Create an available, unfocused selectable.
    pub fn new(label: impl Into<String>, widget: Widget) -> Self {
        Self {
            label: label.into(),
            widget,
            available: true,
            focused: false,
            input: false,
            bounds: None,
        }
    }

    /// A plain button.
    pub fn button(label: impl Into<String>, action: ActionId) -> Self {
        Self::new(label, Widget::Button { action })
    }

    /// An on/off toggle.
    pub fn toggle(label: impl Into<String>, on: bool) -> Self {
        Self::new(label, Widget::Toggle { on })
    }

    /// A slider over `min..=max` moving by `step`.
    pub fn slider(label: impl Into<String>, value: i64, min: i64, max: i64, step: i64) -> Self {
        Self::new(
            label,
            Widget::Slider {
                value: value.clamp(min, max.max(min)),
                min,
                max,
                step,
            },
        )
    }

    /// A single-line text input.
    pub fn text_input(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(
            label,
            Widget::TextInput {
                text: text.into(),
                max_len: None,
            },
        )
    }

    /// A scrollable block of text with `lines` total and `page` visible lines.
    pub fn scrollable_text(label: impl Into<String>, lines: i64, page: i64) -> Self {
        Self::new(
            label,
            Widget::ScrollableText {
                offset: 0,
                max_offset: (lines - page).max(0),
                page,
            },
        )
    }

    /// A choice among `choices`, initially `selected`.
    pub fn list_select(label: impl Into<String>, choices: Vec<String>, selected: usize) -> Self {
        let selected = selected.min(choices.len().saturating_sub(1));
        Self::new(label, Widget::ListSelect { choices, selected })
    }

    /// A counter over `min..=max`.
    pub fn countable(label: impl Into<String>, count: i64, min: i64, max: i64) -> Self {
        Self::new(
            label,
            Widget::CountableButton {
                count: count.clamp(min, max.max(min)),
                min,
                max,
            },
        )
    }

    /// A button that needs two confirms.
    pub fn double_confirm(label: impl Into<String>, action: ActionId) -> Self {
        Self::new(
            label,
            Widget::DoubleConfirmButton {
                action,
                armed_at: None,
            },
        )
    }

    /// Display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Widget state.
    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    /// Mutable widget state.
    pub fn widget_mut(&mut self) -> &mut Widget {
        &mut self.widget
    }

    /// Widget tag.
    pub fn kind(&self) -> Kind {
        self.widget.kind()
    }

    /// Generic numeric value, see [`Widget::count`].
    pub fn count(&self) -> i64 {
        self.widget.count()
    }

    /// Set the generic numeric value, see [`Widget::set_count`].
    pub fn set_count(&mut self, count: i64) -> bool {
        self.widget.set_count(count)
    }

    /// Whether confirm has any effect.
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Enable or disable the element.
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Whether the element currently holds focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Apply or remove focus. Returns `true` when the focus state changed.
    pub fn set_focus(&mut self, focused: bool) -> bool {
        let changed = self.focused != focused;
        self.focused = focused;
        changed
    }

    /// Whether the element is capturing directional input for its value.
    pub fn is_capturing_input(&self) -> bool {
        self.input
    }

    /// Enter or leave value capture. Only input-capturing widgets accept `true`.
    ///
    /// Returns `true` when the capture state changed.
    pub fn set_input(&mut self, input: bool) -> bool {
        let input = input && self.widget.captures_input();
        let changed = self.input != input;
        self.input = input;
        changed
    }

    /// Cached screen bounds, `None` until measured.
    pub fn bounds(&self) -> Option<Rect> {
        measured(self.bounds)
    }

    /// Store bounds measured by the layout pass.
    pub fn set_bounds(&mut self, bounds: Option<Rect>) {
        self.bounds = bounds;
    }

    /// Store bounds from two opposite corners.
    pub fn set_corners(&mut self, a: Point, b: Point) {
        self.bounds = Some(Rect::from_points(a, b));
    }

    /// Centre of the cached bounds.
    pub fn center(&self) -> Option<Point> {
        self.bounds().map(|r| r.center())
    }

    /// Forget the cached bounds.
    pub fn clear_bounds(&mut self) {
        self.bounds = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_round_trip_restores_state() {
        let mut item = Selectable::toggle("Sound", true);
        let before = item.clone();
        assert!(item.set_focus(true));
        assert!(!item.set_focus(true));
        assert!(item.set_focus(false));
        assert_eq!(item, before);
    }

    #[test]
    fn zero_bounds_count_as_unmeasured() {
        let mut item = Selectable::button("Play", ActionId(0));
        assert_eq!(item.bounds(), None);
        item.set_corners(Point::ORIGIN, Point::ORIGIN);
        assert_eq!(item.bounds(), None);
        assert_eq!(item.center(), None);
        item.set_corners(Point::new(10.0, 3.0), Point::new(2.0, 2.0));
        assert_eq!(item.bounds(), Some(Rect::new(2.0, 2.0, 10.0, 3.0)));
    }

    #[test]
    fn only_capturing_widgets_enter_input() {
        let mut button = Selectable::button("Play", ActionId(0));
        assert!(!button.set_input(true));
        assert!(!button.is_capturing_input());

        let mut slider = Selectable::slider("Volume", 5, 0, 10, 1);
        assert!(slider.set_input(true));
        assert!(slider.is_capturing_input());
        assert!(slider.set_input(false));
    }
}
