// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget behaviours.
//!
//! Every interactive element carries a [`Widget`]: a tagged variant holding
//! the state of one widget kind. Confirm, cancel and value adjustment are
//! single calls on the variant ([`Widget::confirm`], [`Widget::cancel`],
//! [`Widget::adjust`]) that report what happened as a [`Reaction`]. The menu
//! layer turns reactions into application events; the widget itself never
//! reaches outside its own state.

use alloc::string::String;
use alloc::vec::Vec;

use bracken_spatial::Direction;

/// Application-defined identifier for a button action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(pub u32);

/// Widget kind, used for logging and for callers that only need the tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Triggers an action on confirm.
    Button,
    /// Flips a boolean on confirm.
    Toggle,
    /// Captures directional input to step a bounded value.
    Slider,
    /// Hands control to an external text capture provider.
    TextInput,
    /// Captures directional input to scroll a block of text.
    ScrollableText,
    /// Hands control to an external choice list provider.
    ListSelect,
    /// Confirm increments, cancel decrements.
    CountableButton,
    /// Needs two confirms in a short window to trigger.
    DoubleConfirmButton,
}

/// Request for an external capture provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaptureRequest {
    /// Edit a line of text.
    Text {
        /// Current text.
        initial: String,
        /// Maximum length in characters, if limited.
        max_len: Option<usize>,
    },
    /// Pick one of several choices.
    Choice {
        /// Labels to present.
        choices: Vec<String>,
        /// Currently selected index.
        selected: usize,
    },
}

/// Result reported by an external capture provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaptureResult {
    /// Replacement text for a [`Widget::TextInput`].
    Text(String),
    /// Chosen index for a [`Widget::ListSelect`].
    Choice(usize),
    /// The provider was dismissed without a result.
    Cancelled,
}

/// What a widget did in response to confirm or cancel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reaction {
    /// Nothing observable happened, but the input was consumed.
    Consumed,
    /// The widget did not use the input.
    Unconsumed,
    /// Run the given action.
    Trigger(ActionId),
    /// A toggle flipped to the given state.
    Toggled(bool),
    /// A countable value changed to the given count.
    Counted(i64),
    /// A double-confirm button is waiting for its second confirm.
    Armed,
    /// A double-confirm button stopped waiting.
    Disarmed,
    /// The widget wants directional input for its own value.
    BeginInput,
    /// The widget wants an external capture provider.
    Capture(CaptureRequest),
}

/// State of one interactive element.
#[derive(Clone, Debug, PartialEq)]
pub enum Widget {
    /// Plain button.
    Button {
        /// Action to trigger.
        action: ActionId,
    },
    /// On/off switch.
    Toggle {
        /// Current state.
        on: bool,
    },
    /// Bounded integer value stepped with directional input.
    Slider {
        /// Current value.
        value: i64,
        /// Inclusive lower bound.
        min: i64,
        /// Inclusive upper bound.
        max: i64,
        /// Amount added per directional tick.
        step: i64,
    },
    /// Single-line text entry.
    TextInput {
        /// Current text.
        text: String,
        /// Maximum length in characters, if limited.
        max_len: Option<usize>,
    },
    /// Text block taller than its viewport.
    ScrollableText {
        /// First visible line.
        offset: i64,
        /// Largest valid `offset`.
        max_offset: i64,
        /// Visible height in lines; vertical input jumps by this much.
        page: i64,
    },
    /// Choice among labels.
    ListSelect {
        /// Labels.
        choices: Vec<String>,
        /// Selected index.
        selected: usize,
    },
    /// Counter adjusted with confirm and cancel.
    CountableButton {
        /// Current count.
        count: i64,
        /// Inclusive lower bound.
        min: i64,
        /// Inclusive upper bound.
        max: i64,
    },
    /// Button guarded by a second confirm.
    DoubleConfirmButton {
        /// Action to trigger.
        action: ActionId,
        /// Time of the first confirm while armed.
        armed_at: Option<f64>,
    },
}

impl Widget {
    /// Tag for this widget.
    pub fn kind(&self) -> Kind {
        match self {
            Self::Button { .. } => Kind::Button,
            Self::Toggle { .. } => Kind::Toggle,
            Self::Slider { .. } => Kind::Slider,
            Self::TextInput { .. } => Kind::TextInput,
            Self::ScrollableText { .. } => Kind::ScrollableText,
            Self::ListSelect { .. } => Kind::ListSelect,
            Self::CountableButton { .. } => Kind::CountableButton,
            Self::DoubleConfirmButton { .. } => Kind::DoubleConfirmButton,
        }
    }

    /// Whether confirm hands directional input to this widget.
    pub fn captures_input(&self) -> bool {
        matches!(self, Self::Slider { .. } | Self::ScrollableText { .. })
    }

    /// Generic numeric value.
    ///
    /// Sliders, counters and scroll offsets report their value, toggles and
    /// armed double-confirm buttons report `0`/`1`, list selections their
    /// index, text inputs their length in characters. Plain buttons report `0`.
    pub fn count(&self) -> i64 {
        match self {
            Self::Button { .. } => 0,
            Self::Toggle { on } => i64::from(*on),
            Self::Slider { value, .. } => *value,
            Self::TextInput { text, .. } => i64::try_from(text.chars().count()).unwrap_or(i64::MAX),
            Self::ScrollableText { offset, .. } => *offset,
            Self::ListSelect { selected, .. } => i64::try_from(*selected).unwrap_or(i64::MAX),
            Self::CountableButton { count, .. } => *count,
            Self::DoubleConfirmButton { armed_at, .. } => i64::from(armed_at.is_some()),
        }
    }

    /// Set the generic numeric value, clamped to the widget's range.
    ///
    /// Returns `true` when the stored value changed. Widgets without a
    /// settable number ignore the call.
    pub fn set_count(&mut self, new: i64) -> bool {
        match self {
            Self::Toggle { on } => replace_if_changed(on, new != 0),
            Self::Slider { value, min, max, .. } => {
                replace_if_changed(value, new.clamp(*min, (*max).max(*min)))
            }
            Self::ScrollableText {
                offset, max_offset, ..
            } => replace_if_changed(offset, new.clamp(0, (*max_offset).max(0))),
            Self::ListSelect { choices, selected } => match usize::try_from(new) {
                Ok(index) if index < choices.len() => replace_if_changed(selected, index),
                _ => false,
            },
            Self::CountableButton { count, min, max } => {
                replace_if_changed(count, new.clamp(*min, (*max).max(*min)))
            }
            Self::Button { .. } | Self::TextInput { .. } | Self::DoubleConfirmButton { .. } => {
                false
            }
        }
    }

    /// Adjust the value of an input-capturing widget for one directional tick.
    ///
    /// Sliders step by `step` along the dominant axis, right and up
    /// increasing. Scrollable text moves one line horizontally and one page
    /// vertically, down scrolling forwards. Returns `true` when the value changed.
    pub fn adjust(&mut self, direction: Direction) -> bool {
        let current = self.count();
        let delta = match self {
            Self::Slider { step, .. } => match direction {
                Direction::Right | Direction::Up => *step,
                Direction::Left | Direction::Down => -*step,
            },
            Self::ScrollableText { page, .. } => match direction {
                Direction::Right => 1,
                Direction::Left => -1,
                Direction::Down => (*page).max(1),
                Direction::Up => -(*page).max(1),
            },
            _ => return false,
        };
        self.set_count(current.saturating_add(delta))
    }

    /// React to confirm at time `now`.
    ///
    /// `double_confirm_window` is how long an armed double-confirm button
    /// waits for its second confirm.
    pub fn confirm(&mut self, now: f64, double_confirm_window: f64) -> Reaction {
        match self {
            Self::Button { action } => Reaction::Trigger(*action),
            Self::Toggle { on } => {
                *on = !*on;
                Reaction::Toggled(*on)
            }
            Self::Slider { .. } | Self::ScrollableText { .. } => Reaction::BeginInput,
            Self::TextInput { text, max_len } => Reaction::Capture(CaptureRequest::Text {
                initial: text.clone(),
                max_len: *max_len,
            }),
            Self::ListSelect { choices, selected } => Reaction::Capture(CaptureRequest::Choice {
                choices: choices.clone(),
                selected: *selected,
            }),
            Self::CountableButton { count, max, .. } => {
                if *count < *max {
                    *count += 1;
                    Reaction::Counted(*count)
                } else {
                    Reaction::Consumed
                }
            }
            Self::DoubleConfirmButton { action, armed_at } => match armed_at.take() {
                Some(at) if now - at <= double_confirm_window => Reaction::Trigger(*action),
                _ => {
                    *armed_at = Some(now);
                    Reaction::Armed
                }
            },
        }
    }

    /// React to cancel.
    pub fn cancel(&mut self) -> Reaction {
        match self {
            Self::CountableButton { count, min, .. } if *count > *min => {
                *count -= 1;
                Reaction::Counted(*count)
            }
            Self::DoubleConfirmButton { armed_at, .. } if armed_at.is_some() => {
                *armed_at = None;
                Reaction::Disarmed
            }
            _ => Reaction::Unconsumed,
        }
    }

    /// Disarm a double-confirm button whose window has passed.
    ///
    /// Returns `true` when the widget was disarmed by this call.
    pub fn expire(&mut self, now: f64, double_confirm_window: f64) -> bool {
        match self {
            Self::DoubleConfirmButton { armed_at, .. } => {
                if armed_at.is_some_and(|at| now - at > double_confirm_window) {
                    *armed_at = None;
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    /// Disarm without waiting for the window, for example when the menu closes.
    pub fn disarm(&mut self) -> bool {
        match self {
            Self::DoubleConfirmButton { armed_at, .. } => armed_at.take().is_some(),
            _ => false,
        }
    }

    /// Apply the result of an external capture.
    ///
    /// Returns `true` when the widget's value changed. Results that do not
    /// match the widget kind, and out-of-range choices, are ignored.
    pub fn apply_capture(&mut self, result: CaptureResult) -> bool {
        match (self, result) {
            (Self::TextInput { text, max_len }, CaptureResult::Text(mut new)) => {
                if let Some(limit) = *max_len
                    && let Some((cut, _)) = new.char_indices().nth(limit)
                {
                    new.truncate(cut);
                }
                replace_if_changed(text, new)
            }
            (Self::ListSelect { choices, selected }, CaptureResult::Choice(index))
                if index < choices.len() =>
            {
                replace_if_changed(selected, index)
            }
            _ => false,
        }
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn slider_adjust_clamps_to_range() {
        let mut slider = Widget::Slider {
            value: 9,
            min: 0,
            max: 10,
            step: 1,
        };
        assert!(slider.adjust(Direction::Right));
        assert_eq!(slider.count(), 10);
        assert!(!slider.adjust(Direction::Up), "already at max");
        assert!(slider.adjust(Direction::Down));
        assert_eq!(slider.count(), 9);
    }

    #[test]
    fn scrollable_text_jumps_by_page_vertically() {
        let mut text = Widget::ScrollableText {
            offset: 0,
            max_offset: 12,
            page: 5,
        };
        assert!(text.adjust(Direction::Down));
        assert_eq!(text.count(), 5);
        assert!(text.adjust(Direction::Right));
        assert_eq!(text.count(), 6);
        assert!(text.adjust(Direction::Down));
        assert!(text.adjust(Direction::Down));
        assert_eq!(text.count(), 12, "clamped to the last page");
        assert!(!text.adjust(Direction::Down));
    }

    #[test]
    fn double_confirm_needs_two_confirms_in_window() {
        let mut w = Widget::DoubleConfirmButton {
            action: ActionId(7),
            armed_at: None,
        };
        assert_eq!(w.confirm(1.0, 0.5), Reaction::Armed);
        assert_eq!(w.confirm(1.2, 0.5), Reaction::Trigger(ActionId(7)));
        assert_eq!(w.count(), 0);

        // Too slow: the second confirm re-arms instead.
        assert_eq!(w.confirm(2.0, 0.5), Reaction::Armed);
        assert_eq!(w.confirm(3.0, 0.5), Reaction::Armed);

        // Cancel disarms.
        assert_eq!(w.cancel(), Reaction::Disarmed);
        assert_eq!(w.cancel(), Reaction::Unconsumed);
    }

    #[test]
    fn double_confirm_expires() {
        let mut w = Widget::DoubleConfirmButton {
            action: ActionId(1),
            armed_at: None,
        };
        w.confirm(0.0, 0.5);
        assert!(!w.expire(0.4, 0.5));
        assert!(w.expire(0.6, 0.5));
        assert_eq!(w.count(), 0);
    }

    #[test]
    fn countable_increments_and_decrements_within_bounds() {
        let mut w = Widget::CountableButton {
            count: 0,
            min: 0,
            max: 2,
        };
        assert_eq!(w.cancel(), Reaction::Unconsumed);
        assert_eq!(w.confirm(0.0, 0.0), Reaction::Counted(1));
        assert_eq!(w.confirm(0.0, 0.0), Reaction::Counted(2));
        assert_eq!(w.confirm(0.0, 0.0), Reaction::Consumed);
        assert_eq!(w.cancel(), Reaction::Counted(1));
    }

    #[test]
    fn capture_results_are_applied_by_kind() {
        let mut text = Widget::TextInput {
            text: "abc".to_string(),
            max_len: Some(4),
        };
        assert!(text.apply_capture(CaptureResult::Text("hello".to_string())));
        assert_eq!(
            text,
            Widget::TextInput {
                text: "hell".to_string(),
                max_len: Some(4)
            }
        );
        assert!(!text.apply_capture(CaptureResult::Choice(1)));

        let mut list = Widget::ListSelect {
            choices: vec!["a".to_string(), "b".to_string()],
            selected: 0,
        };
        assert!(!list.apply_capture(CaptureResult::Choice(5)));
        assert!(list.apply_capture(CaptureResult::Choice(1)));
        assert_eq!(list.count(), 1);
        assert!(!list.apply_capture(CaptureResult::Cancelled));
    }

    #[test]
    fn confirm_on_text_and_list_requests_capture() {
        let mut list = Widget::ListSelect {
            choices: vec!["low".to_string(), "high".to_string()],
            selected: 1,
        };
        assert_eq!(
            list.confirm(0.0, 0.0),
            Reaction::Capture(CaptureRequest::Choice {
                choices: vec!["low".to_string(), "high".to_string()],
                selected: 1,
            })
        );
        let mut toggle = Widget::Toggle { on: false };
        assert_eq!(toggle.confirm(0.0, 0.0), Reaction::Toggled(true));
        assert_eq!(toggle.count(), 1);
    }
}
