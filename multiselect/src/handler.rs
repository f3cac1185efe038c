//! Handler plumbing shared by every part of the multi-select.
//!
//! This module provides:
//! - `Handler`: closure type registered against an element and event name
//! - `EventData`: event-specific payload handed to a handler
//! - `HandlerContext`: what a handler sees when it runs
//! - `HandlerRegistry`: stores handlers keyed by (element_id, event_name)
//!
//! Handlers return an [`EventResult`]. The dispatcher walks from the target
//! element up to the root and stops at the first `Consumed`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tuidom::{Key, Modifiers};

// =============================================================================
// Handler Type
// =============================================================================

/// A handler closure that receives a HandlerContext.
pub type Handler = Arc<dyn Fn(&HandlerContext) -> EventResult + Send + Sync>;

/// Standard event names used as the second half of a registry key.
pub mod events {
    /// Click, Enter or Space on an element.
    pub const ACTIVATE: &str = "on_activate";
    /// Text input value changed.
    pub const CHANGE: &str = "on_change";
    /// Key press that was not turned into activation or editing.
    pub const KEY: &str = "on_key";
    /// Mouse wheel over an element.
    pub const SCROLL: &str = "on_scroll";
    /// A click landed outside the element's subtree.
    pub const OUTSIDE_CLICK: &str = "on_outside_click";
}

// =============================================================================
// Event Result
// =============================================================================

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, try handlers further up the tree.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
}

impl EventResult {
    /// Check if the event was handled.
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}

// =============================================================================
// Event Data
// =============================================================================

/// Event-specific data passed to handlers via HandlerContext.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EventData {
    /// No event data (activation, outside clicks).
    #[default]
    None,
    /// Text input value changed.
    Change {
        /// The new text value.
        text: String,
    },
    /// A key press.
    Key { key: Key, modifiers: Modifiers },
    /// Mouse wheel movement, positive is down.
    Scroll { delta_y: i16 },
}

impl EventData {
    /// Get the changed text from a Change event.
    pub fn text(&self) -> Option<&str> {
        match self {
            EventData::Change { text } => Some(text),
            _ => None,
        }
    }

    pub fn key(&self) -> Option<(Key, Modifiers)> {
        match self {
            EventData::Key { key, modifiers } => Some((*key, *modifiers)),
            _ => None,
        }
    }

    pub fn scroll_delta(&self) -> Option<i16> {
        match self {
            EventData::Scroll { delta_y } => Some(*delta_y),
            _ => None,
        }
    }
}

// =============================================================================
// HandlerContext
// =============================================================================

/// Context handed to a handler invocation.
///
/// `target` is the element the event was aimed at; `current` is the element
/// whose handler is running, which differs while the event bubbles.
#[derive(Debug)]
pub struct HandlerContext {
    target: String,
    current: String,
    event: EventData,
    focus_request: RefCell<Option<String>>,
}

impl HandlerContext {
    pub fn new(target: impl Into<String>, current: impl Into<String>, event: EventData) -> Self {
        Self {
            target: target.into(),
            current: current.into(),
            event,
            focus_request: RefCell::new(None),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn event(&self) -> &EventData {
        &self.event
    }

    /// Shorthand for `event().text()`.
    pub fn changed_text(&self) -> Option<&str> {
        self.event.text()
    }

    /// Ask the dispatcher to move focus once the handler returns.
    pub fn focus(&self, element_id: impl Into<String>) {
        *self.focus_request.borrow_mut() = Some(element_id.into());
    }

    /// Take the pending focus request, if any.
    pub fn take_focus_request(&self) -> Option<String> {
        self.focus_request.borrow_mut().take()
    }
}

// =============================================================================
// HandlerRegistry
// =============================================================================

/// Registry for element event handlers.
///
/// Maps (element_id, event_name) to handler closures. Owners clear it before
/// each rebuild so handlers from previous renders don't persist.
#[derive(Default, Clone)]
pub struct HandlerRegistry {
    handlers: Arc<RwLock<HashMap<(String, String), Handler>>>,
}

impl HandlerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for an element event. Replaces any earlier handler
    /// for the same key.
    pub fn register(&self, element_id: &str, event: &str, handler: Handler) {
        if let Ok(mut handlers) = self.handlers.write() {
            handlers.insert((element_id.to_string(), event.to_string()), handler);
        }
    }

    /// Get a handler for an element event.
    pub fn get(&self, element_id: &str, event: &str) -> Option<Handler> {
        self.handlers
            .read()
            .ok()?
            .get(&(element_id.to_string(), event.to_string()))
            .cloned()
    }

    /// IDs of every element with a handler for `event`, sorted.
    pub fn elements_with(&self, event: &str) -> Vec<String> {
        let mut ids: Vec<String> = self
            .handlers
            .read()
            .map(|handlers| {
                handlers
                    .keys()
                    .filter(|(_, name)| name == event)
                    .map(|(id, _)| id.clone())
                    .collect()
            })
            .unwrap_or_default();
        ids.sort();
        ids
    }

    /// Clear all handlers.
    pub fn clear(&self) {
        if let Ok(mut handlers) = self.handlers.write() {
            handlers.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.read().map(|h| h.len()).unwrap_or(0)
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.handlers
            .read()
            .map(|h| h.is_empty())
            .unwrap_or(true)
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn consume() -> Handler {
        Arc::new(|_| EventResult::Consumed)
    }

    #[test]
    fn test_register_replaces_same_key() {
        let registry = HandlerRegistry::new();
        registry.register("a", events::ACTIVATE, Arc::new(|_| EventResult::Ignored));
        registry.register("a", events::ACTIVATE, consume());

        assert_eq!(registry.len(), 1);
        let handler = registry.get("a", events::ACTIVATE).expect("handler");
        let cx = HandlerContext::new("a", "a", EventData::None);
        assert_eq!(handler(&cx), EventResult::Consumed);
    }

    #[test]
    fn test_elements_with_filters_by_event() {
        let registry = HandlerRegistry::new();
        registry.register("b", events::OUTSIDE_CLICK, consume());
        registry.register("a", events::OUTSIDE_CLICK, consume());
        registry.register("c", events::ACTIVATE, consume());

        assert_eq!(registry.elements_with(events::OUTSIDE_CLICK), vec!["a", "b"]);
    }

    #[test]
    fn test_focus_request_is_taken_once() {
        let cx = HandlerContext::new("t", "c", EventData::None);
        cx.focus("next");
        assert_eq!(cx.take_focus_request().as_deref(), Some("next"));
        assert_eq!(cx.take_focus_request(), None);
    }

    #[test]
    fn test_clear_empties_registry() {
        let registry = HandlerRegistry::new();
        registry.register("a", events::KEY, consume());
        registry.clear();
        assert!(registry.is_empty());
    }
}
