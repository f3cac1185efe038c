//! Popover content: the searchable list of candidates.

use std::sync::Arc;

use log::debug;
use tuidom::{Edges, Element, Size};

use crate::container::MultiSelectState;
use crate::context::RenderScope;
use crate::error::MultiSelectError;
use crate::filter::substring_filter;
use crate::handler::{EventResult, events};
use crate::item::{Item, item_id};

const DEFAULT_MAX_VISIBLE: u16 = 8;

/// Content slot of a multi-select, shown while the popover is open.
#[derive(Debug, Clone, Default)]
pub struct Content {
    list: ListSurface,
}

impl Content {
    pub fn new(list: ListSurface) -> Self {
        Self { list }
    }

    pub(crate) fn list(&self) -> &ListSurface {
        &self.list
    }

    pub(crate) fn build(
        &self,
        scope: &RenderScope<'_>,
        state: &MultiSelectState,
    ) -> Result<BuiltList, MultiSelectError> {
        self.list.build(scope, state)
    }
}

/// A built list surface plus what keyboard navigation needs to know.
pub(crate) struct BuiltList {
    pub element: Element,
    /// Ids of the items that passed the filter, in display order.
    pub item_ids: Vec<String>,
    pub max_visible: u16,
}

/// Search field above a scrollable, filtered list of items.
#[derive(Debug, Clone)]
pub struct ListSurface {
    items: Vec<Item>,
    search_placeholder: String,
    empty_message: String,
    max_visible: u16,
}

impl Default for ListSurface {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search_placeholder: "Search...".into(),
            empty_message: "No results found.".into(),
            max_visible: DEFAULT_MAX_VISIBLE,
        }
    }
}

impl ListSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    pub fn items(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        self.items.extend(items);
        self
    }

    pub fn search_placeholder(mut self, text: impl Into<String>) -> Self {
        self.search_placeholder = text.into();
        self
    }

    /// Shown in place of the list when no item matches the search.
    pub fn empty_message(mut self, text: impl Into<String>) -> Self {
        self.empty_message = text.into();
        self
    }

    /// Rows shown before the list scrolls. At least one.
    pub fn max_visible(mut self, rows: u16) -> Self {
        self.max_visible = rows.max(1);
        self
    }

    pub(crate) fn declared(&self) -> &[Item] {
        &self.items
    }

    fn build(
        &self,
        scope: &RenderScope<'_>,
        state: &MultiSelectState,
    ) -> Result<BuiltList, MultiSelectError> {
        let id = scope.container_id("ListSurface")?.to_string();
        let palette = scope.palette();
        let registry = scope.registry();
        let query = state.search();

        let haystacks: Vec<String> = self
            .items
            .iter()
            .map(|item| item.candidate().search_text())
            .collect();
        let matches = substring_filter(&query, &haystacks);

        debug!(
            "ListSurface::build id={} query={:?} matches={}/{}",
            id,
            query,
            matches.len(),
            self.items.len()
        );

        let search_id = format!("{id}-search");
        let search = Element::text_input(&query)
            .id(&search_id)
            .placeholder(&self.search_placeholder)
            .width(Size::Fill)
            .style_focused(palette.accent());

        let search_state = state.clone();
        registry.register(
            &search_id,
            events::CHANGE,
            Arc::new(move |cx| match cx.changed_text() {
                Some(text) => {
                    search_state.set_search(text);
                    EventResult::Consumed
                }
                None => EventResult::Ignored,
            }),
        );

        let surface = Element::col()
            .id(format!("{id}-surface"))
            .padding(Edges::horizontal(1))
            .child(search);

        if matches.is_empty() {
            let empty = Element::text(&self.empty_message)
                .id(format!("{id}-empty"))
                .style(palette.muted());
            return Ok(BuiltList {
                element: surface.child(empty),
                item_ids: Vec::new(),
                max_visible: self.max_visible,
            });
        }

        let hidden = matches.len().saturating_sub(usize::from(self.max_visible));
        let max_offset = u16::try_from(hidden).unwrap_or(u16::MAX);
        let offset = state.scroll_offset().min(max_offset);

        let mut rows = Vec::with_capacity(matches.len());
        let mut item_ids = Vec::with_capacity(matches.len());
        for hit in &matches {
            rows.push(self.items[hit.index].build(scope, hit.index)?);
            item_ids.push(item_id(&id, hit.index));
        }

        let list_id = format!("{id}-list");
        let list = Element::col()
            .id(&list_id)
            .width(Size::Fill)
            .scrollable(true)
            .max_height(self.max_visible)
            .scroll_offset(offset)
            .children(rows);

        let scroll_state = state.clone();
        registry.register(
            &list_id,
            events::SCROLL,
            Arc::new(move |cx| match cx.event().scroll_delta() {
                Some(delta) => {
                    scroll_state.scroll_by(delta, max_offset);
                    EventResult::Consumed
                }
                None => EventResult::Ignored,
            }),
        );

        Ok(BuiltList {
            element: surface.child(list),
            item_ids,
            max_visible: self.max_visible,
        })
    }
}
