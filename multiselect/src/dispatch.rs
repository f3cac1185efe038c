//! Event dispatch from tuidom events to registered handlers.
//!
//! Targets are resolved per event kind:
//! 1. Clicks: outside-click handlers first, then the deepest clickable element
//! 2. Scrolls: the deepest element under the pointer
//! 3. Keys: the focused element
//!
//! Handlers run from the target outward to the root. The first handler
//! returning `EventResult::Consumed` stops propagation.

use log::debug;
use tuidom::{
    Element, Event, FocusState, Key, LayoutResult, Modifiers, MouseButton, find_element,
    find_path, hit_test, hit_test_any, hit_test_focusable,
};

use crate::handler::{EventData, EventResult, HandlerContext, HandlerRegistry, events};

// =============================================================================
// Dispatcher
// =============================================================================

/// Routes input events and owns keyboard focus.
#[derive(Debug, Default, Clone)]
pub struct Dispatcher {
    focus: FocusState,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<&str> {
        self.focus.focused()
    }

    pub fn focus(&mut self, id: &str) {
        self.focus.focus(id);
    }

    /// Sync focus with a freshly built tree.
    ///
    /// Forgets focus on elements that disappeared and marks the focused one
    /// so it renders with its focused style.
    pub fn prepare(&mut self, root: &mut Element) {
        self.focus.retain_in(root);
        root.set_focus(self.focus.focused());
    }

    /// Dispatch one event against the tree it was laid out from.
    pub fn dispatch(
        &mut self,
        root: &Element,
        layout: &LayoutResult,
        registry: &HandlerRegistry,
        event: &Event,
    ) -> EventResult {
        match *event {
            Event::Click {
                x,
                y,
                button: MouseButton::Left,
            } => self.dispatch_click(root, layout, registry, x, y),
            Event::Scroll { x, y, delta_y } => match hit_test_any(layout, root, x, y) {
                Some(target) => {
                    let data = EventData::Scroll { delta_y };
                    self.bubble(root, registry, &target, events::SCROLL, data)
                }
                None => EventResult::Ignored,
            },
            Event::Key { key, modifiers } => {
                self.dispatch_key(root, layout, registry, key, modifiers)
            }
            _ => EventResult::Ignored,
        }
    }

    fn dispatch_click(
        &mut self,
        root: &Element,
        layout: &LayoutResult,
        registry: &HandlerRegistry,
        x: u16,
        y: u16,
    ) -> EventResult {
        let under_pointer = hit_test_any(layout, root, x, y);
        let inside = under_pointer
            .as_deref()
            .and_then(|id| find_path(root, id))
            .unwrap_or_default();
        let target = under_pointer.unwrap_or_default();

        let mut dismissed = false;
        for owner in registry.elements_with(events::OUTSIDE_CLICK) {
            if inside.contains(&owner) {
                continue;
            }
            if let Some(handler) = registry.get(&owner, events::OUTSIDE_CLICK) {
                debug!("dispatch: outside click for {owner}");
                let cx = HandlerContext::new(&target, &owner, EventData::None);
                dismissed |= handler(&cx).is_handled();
                self.apply(&cx);
            }
        }

        if let Some(id) = hit_test_focusable(layout, root, x, y) {
            self.focus.focus(&id);
        }

        let Some(clicked) = hit_test(layout, root, x, y) else {
            return if dismissed {
                EventResult::Consumed
            } else {
                EventResult::Ignored
            };
        };

        let result = self.bubble(root, registry, &clicked, events::ACTIVATE, EventData::None);
        if dismissed {
            EventResult::Consumed
        } else {
            result
        }
    }

    fn dispatch_key(
        &mut self,
        root: &Element,
        layout: &LayoutResult,
        registry: &HandlerRegistry,
        key: Key,
        modifiers: Modifiers,
    ) -> EventResult {
        match key {
            Key::Tab => {
                self.focus.focus_next(root, layout);
                return EventResult::Consumed;
            }
            Key::BackTab => {
                self.focus.focus_prev(root, layout);
                return EventResult::Consumed;
            }
            _ => {}
        }

        let Some(target) = self.focus.focused().map(str::to_owned) else {
            return EventResult::Ignored;
        };
        let Some(element) = find_element(root, &target) else {
            return EventResult::Ignored;
        };

        if element.captures_input && !modifiers.ctrl && !modifiers.alt {
            if let Some(text) = element.input_value().and_then(|value| edit(value, key)) {
                let data = EventData::Change { text };
                return self.invoke(registry, &target, &target, events::CHANGE, data);
            }
        }

        let activates = match key {
            Key::Enter => true,
            Key::Char(' ') => !element.captures_input,
            _ => false,
        };
        if activates && modifiers.none() {
            let result = self.bubble(root, registry, &target, events::ACTIVATE, EventData::None);
            if result.is_handled() {
                return result;
            }
        }

        let data = EventData::Key { key, modifiers };
        self.bubble(root, registry, &target, events::KEY, data)
    }

    /// Run handlers for `event` from `target` up to the root.
    fn bubble(
        &mut self,
        root: &Element,
        registry: &HandlerRegistry,
        target: &str,
        event: &str,
        data: EventData,
    ) -> EventResult {
        let Some(path) = find_path(root, target) else {
            return EventResult::Ignored;
        };

        for current in path.iter().rev() {
            if self.invoke(registry, target, current, event, data.clone()).is_handled() {
                debug!("dispatch: {event} on {target} consumed by {current}");
                return EventResult::Consumed;
            }
        }

        EventResult::Ignored
    }

    fn invoke(
        &mut self,
        registry: &HandlerRegistry,
        target: &str,
        current: &str,
        event: &str,
        data: EventData,
    ) -> EventResult {
        let Some(handler) = registry.get(current, event) else {
            return EventResult::Ignored;
        };
        let cx = HandlerContext::new(target, current, data);
        let result = handler(&cx);
        self.apply(&cx);
        result
    }

    fn apply(&mut self, cx: &HandlerContext) {
        if let Some(id) = cx.take_focus_request() {
            debug!("dispatch: {} moves focus to {id}", cx.current());
            self.focus.focus(&id);
        }
    }
}

/// Apply a single editing key to an input value.
fn edit(value: &str, key: Key) -> Option<String> {
    match key {
        Key::Char(c) => {
            let mut text = value.to_string();
            text.push(c);
            Some(text)
        }
        Key::Backspace => {
            let mut text = value.to_string();
            text.pop()?;
            Some(text)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_appends_and_pops() {
        assert_eq!(edit("ab", Key::Char('c')).as_deref(), Some("abc"));
        assert_eq!(edit("ab", Key::Backspace).as_deref(), Some("a"));
        assert_eq!(edit("", Key::Backspace), None);
        assert_eq!(edit("ab", Key::Left), None);
    }
}
