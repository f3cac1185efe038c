//! The multi-select container and its per-instance popover state.

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, warn};
use tuidom::{Element, Key, Size};

use crate::candidate::CandidateIndex;
use crate::context::{ChangeCallback, RenderScope, SelectionContext};
use crate::error::MultiSelectError;
use crate::handler::{EventResult, HandlerContext, HandlerRegistry, events};
use crate::list::Content;
use crate::popover::Popover;
use crate::state::State;
use crate::theme::Palette;
use crate::trigger::Trigger;

/// Per-instance UI state of a multi-select.
///
/// The parent keeps one of these next to its form state and passes it to
/// every build. It holds the popover's open flag, the search text and the
/// list scroll offset; the selection itself always belongs to the parent.
/// Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct MultiSelectState {
    open: State<bool>,
    search: State<String>,
    scroll: State<u16>,
    /// Duplicate candidate values already reported. Not part of `is_dirty`.
    reported: State<HashSet<String>>,
}

impl MultiSelectState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether anything changed since the last `clear_dirty`.
    pub fn is_dirty(&self) -> bool {
        self.open.is_dirty() || self.search.is_dirty() || self.scroll.is_dirty()
    }

    pub fn clear_dirty(&self) {
        self.open.clear_dirty();
        self.search.clear_dirty();
        self.scroll.clear_dirty();
    }

    pub(crate) fn is_open(&self) -> bool {
        self.open.get()
    }

    pub(crate) fn open(&self) {
        self.open.set(true);
    }

    /// Close the popover and forget the search.
    pub(crate) fn close(&self) {
        self.open.set(false);
        self.search.set(String::new());
        self.scroll.set(0);
    }

    /// Flip the popover, returning whether it is now open.
    pub(crate) fn toggle(&self) -> bool {
        if self.is_open() {
            self.close();
            false
        } else {
            self.open();
            true
        }
    }

    pub(crate) fn search(&self) -> String {
        self.search.get()
    }

    /// Replace the search text. The list jumps back to the top.
    pub(crate) fn set_search(&self, text: &str) {
        self.search.set(text.to_string());
        self.scroll.set(0);
    }

    pub(crate) fn scroll_offset(&self) -> u16 {
        self.scroll.get()
    }

    pub(crate) fn scroll_by(&self, delta: i16, max_offset: u16) {
        self.scroll.update(|offset| {
            let next = i32::from(*offset) + i32::from(delta);
            *offset = next.clamp(0, i32::from(max_offset)) as u16;
        });
    }

    /// Record a duplicate candidate value, returning true the first time
    /// this instance sees it.
    pub(crate) fn first_report_of(&self, value: &str) -> bool {
        let mut first = false;
        self.reported.update(|seen| first = seen.insert(value.to_string()));
        first
    }

    /// Adjust the offset so row `index` lies inside a window of `rows` rows.
    pub(crate) fn scroll_into_view(&self, index: usize, rows: u16) {
        let index = u16::try_from(index).unwrap_or(u16::MAX);
        let rows = rows.max(1);
        self.scroll.update(|offset| {
            if index < *offset {
                *offset = index;
            } else if index >= offset.saturating_add(rows) {
                *offset = index - rows + 1;
            }
        });
    }
}

/// Controlled multi-value select.
///
/// Renders from the `values` snapshot the parent passes in and reports every
/// requested change through `on_values_change`. Nothing changes on screen
/// until the parent applies the new sequence and rebuilds.
///
/// # Example
///
/// ```
/// use multiselect::prelude::*;
///
/// let registry = HandlerRegistry::new();
/// let state = MultiSelectState::new();
/// let values = vec!["users.read".to_string()];
///
/// let element = MultiSelect::new("permissions")
///     .values(&values)
///     .on_values_change(|next| println!("{next:?}"))
///     .trigger(Trigger::new().placeholder("Pick permissions"))
///     .content(Content::new(
///         ListSurface::new()
///             .item(Item::new("users.read").label("Read users"))
///             .item(Item::new("users.write").label("Write users")),
///     ))
///     .build(&state, &registry)
///     .unwrap();
///
/// assert_eq!(element.id, "permissions");
/// ```
pub struct MultiSelect {
    id: String,
    values: Vec<String>,
    on_change: Option<ChangeCallback>,
    trigger: Trigger,
    content: Content,
    palette: Palette,
    width: Option<u16>,
    disabled: bool,
}

impl MultiSelect {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            values: Vec::new(),
            on_change: None,
            trigger: Trigger::default(),
            content: Content::default(),
            palette: Palette::default(),
            width: None,
            disabled: false,
        }
    }

    /// The current selection, in order.
    pub fn values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Receives the complete next selection after every mutation.
    pub fn on_values_change<F>(mut self, on_change: F) -> Self
    where
        F: Fn(Vec<String>) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(on_change));
        self
    }

    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn content(mut self, content: Content) -> Self {
        self.content = content;
        self
    }

    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Build the element tree and register its handlers.
    pub fn build(
        self,
        state: &MultiSelectState,
        registry: &HandlerRegistry,
    ) -> Result<Element, MultiSelectError> {
        let id = self.id;
        let open = state.is_open() && !self.disabled;

        debug!(
            "MultiSelect::build id={} values={} open={} candidates={}",
            id,
            self.values.len(),
            open,
            self.content.list().declared().len()
        );

        let selection = SelectionContext::new(&self.values, self.on_change);
        let scope = RenderScope::for_container(registry, &id, selection, self.palette);
        let candidates =
            CandidateIndex::build(self.content.list().declared().iter().map(|i| i.candidate()));
        for value in candidates.duplicates() {
            if state.first_report_of(value) {
                warn!(
                    "MultiSelect {id}: duplicate candidate value {value:?}, last declaration wins"
                );
            }
        }

        let trigger_id = format!("{id}-trigger");
        let search_id = format!("{id}-search");

        let trigger = self.trigger.build(&scope, &candidates, open, self.disabled)?;
        let mut root = Element::col().id(&id).child(trigger);
        if let Some(width) = self.width {
            root = root.width(Size::Fixed(width));
        }

        if self.disabled {
            return Ok(root.disabled(true));
        }

        let toggle_state = state.clone();
        let focus_on_open = search_id.clone();
        registry.register(
            &trigger_id,
            events::ACTIVATE,
            Arc::new(move |cx| {
                if toggle_state.toggle() {
                    cx.focus(focus_on_open.as_str());
                }
                EventResult::Consumed
            }),
        );

        let mut navigation = Navigation {
            state: state.clone(),
            trigger_id,
            search_id,
            item_ids: Vec::new(),
            rows: 0,
        };

        if open {
            let list = self.content.build(&scope, state)?;
            navigation.item_ids = list.item_ids;
            navigation.rows = list.max_visible;
            root = root.child(
                Popover::new(format!("{id}-popover"))
                    .style(self.palette.surface())
                    .build(list.element),
            );

            let dismiss = state.clone();
            registry.register(
                &id,
                events::OUTSIDE_CLICK,
                Arc::new(move |_| {
                    debug!("MultiSelect: outside click, closing");
                    dismiss.close();
                    EventResult::Consumed
                }),
            );
        }

        registry.register(
            &id,
            events::KEY,
            Arc::new(move |cx| match cx.event().key() {
                Some((key, modifiers)) if modifiers.none() => navigation.on_key(key, cx),
                _ => EventResult::Ignored,
            }),
        );

        Ok(root)
    }
}

/// Keyboard handling for the whole container subtree.
struct Navigation {
    state: MultiSelectState,
    trigger_id: String,
    search_id: String,
    /// Visible items, in display order.
    item_ids: Vec<String>,
    rows: u16,
}

impl Navigation {
    fn on_key(&self, key: Key, cx: &HandlerContext) -> EventResult {
        let open = self.state.is_open();
        match key {
            Key::Escape if open => {
                self.state.close();
                cx.focus(self.trigger_id.as_str());
                EventResult::Consumed
            }
            Key::Down if !open && cx.target() == self.trigger_id => {
                self.state.open();
                cx.focus(self.search_id.as_str());
                EventResult::Consumed
            }
            Key::Down if open => {
                let next = match self.position(cx.target()) {
                    Some(i) => (i + 1).min(self.item_ids.len().saturating_sub(1)),
                    None => 0,
                };
                self.focus_item(next, cx);
                EventResult::Consumed
            }
            Key::Up if open => {
                match self.position(cx.target()) {
                    Some(0) => cx.focus(self.search_id.as_str()),
                    Some(i) => self.focus_item(i - 1, cx),
                    None => return EventResult::Ignored,
                }
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn position(&self, target: &str) -> Option<usize> {
        self.item_ids.iter().position(|id| id == target)
    }

    fn focus_item(&self, index: usize, cx: &HandlerContext) {
        if let Some(id) = self.item_ids.get(index) {
            self.state.scroll_into_view(index, self.rows);
            cx.focus(id.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_resets_search_and_scroll() {
        let state = MultiSelectState::new();
        state.open();
        state.set_search("read");
        state.scroll_by(3, 10);

        state.close();

        assert!(!state.is_open());
        assert_eq!(state.search(), "");
        assert_eq!(state.scroll_offset(), 0);
    }

    #[test]
    fn test_toggle_reports_new_state() {
        let state = MultiSelectState::new();
        assert!(state.toggle());
        assert!(!state.toggle());
    }

    #[test]
    fn test_scroll_by_clamps() {
        let state = MultiSelectState::new();
        state.scroll_by(-4, 5);
        assert_eq!(state.scroll_offset(), 0);
        state.scroll_by(9, 5);
        assert_eq!(state.scroll_offset(), 5);
    }

    #[test]
    fn test_scroll_into_view_moves_window() {
        let state = MultiSelectState::new();
        state.scroll_into_view(9, 4);
        assert_eq!(state.scroll_offset(), 6);
        state.scroll_into_view(7, 4);
        assert_eq!(state.scroll_offset(), 6);
        state.scroll_into_view(2, 4);
        assert_eq!(state.scroll_offset(), 2);
    }

    #[test]
    fn test_duplicate_reported_once_per_value() {
        let state = MultiSelectState::new();
        assert!(state.first_report_of("p1"));
        assert!(!state.clone().first_report_of("p1"));
        assert!(state.first_report_of("p2"));
        assert!(!state.is_dirty());
    }

    #[test]
    fn test_state_clones_share_dirty_flags() {
        let state = MultiSelectState::new();
        let handle = state.clone();
        handle.open();
        assert!(state.is_dirty());
        state.clear_dirty();
        assert!(!handle.is_dirty());
    }
}
