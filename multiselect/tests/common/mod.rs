//! A small page hosting one multi-select, driven like a real event loop:
//! dispatch an event, then rebuild from the parent's state.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use multiselect::prelude::*;
use tuidom::{Content as Node, Element, Event, Key, LayoutResult, Rect, Size, find_element, layout};

pub const ID: &str = "perms";

pub fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub fn permissions() -> Vec<Item> {
    vec![
        Item::new("p1").label("Alpha"),
        Item::new("p2").label("Beta"),
        Item::new("p3").label("Gamma"),
    ]
}

pub struct Page {
    pub values: State<Vec<String>>,
    pub changes: Arc<Mutex<Vec<Vec<String>>>>,
    pub widget: MultiSelectState,
    pub registry: HandlerRegistry,
    pub dispatcher: Dispatcher,
    pub root: Element,
    pub layout: LayoutResult,
    items: Vec<Item>,
    /// When false the parent records changes but never applies them.
    applies_changes: bool,
    with_callback: bool,
    disabled: bool,
    max_visible: Option<u16>,
}

impl Page {
    pub fn new(items: Vec<Item>) -> Self {
        let mut page = Self {
            values: State::new(Vec::new()),
            changes: Arc::new(Mutex::new(Vec::new())),
            widget: MultiSelectState::new(),
            registry: HandlerRegistry::new(),
            dispatcher: Dispatcher::new(),
            root: Element::col(),
            layout: LayoutResult::new(),
            items,
            applies_changes: true,
            with_callback: true,
            disabled: false,
            max_visible: None,
        };
        page.rebuild();
        page
    }

    pub fn with_values(self, values: &[&str]) -> Self {
        self.values.set(ids(values));
        self.rebuilt()
    }

    pub fn ignoring_changes(mut self) -> Self {
        self.applies_changes = false;
        self.rebuilt()
    }

    pub fn without_callback(mut self) -> Self {
        self.with_callback = false;
        self.rebuilt()
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self.rebuilt()
    }

    pub fn max_visible(mut self, rows: u16) -> Self {
        self.max_visible = Some(rows);
        self.rebuilt()
    }

    fn rebuilt(mut self) -> Self {
        self.rebuild();
        self
    }

    pub fn rebuild(&mut self) {
        self.registry.clear();

        let mut list = ListSurface::new().items(self.items.clone());
        if let Some(rows) = self.max_visible {
            list = list.max_visible(rows);
        }

        let mut select = MultiSelect::new(ID)
            .values(self.values.get())
            .width(40)
            .disabled(self.disabled)
            .trigger(Trigger::new().placeholder("Pick permissions").clear(ClearControl::new()))
            .content(Content::new(list));

        if self.with_callback {
            let values = self.values.clone();
            let changes = Arc::clone(&self.changes);
            let applies = self.applies_changes;
            select = select.on_values_change(move |next| {
                changes.lock().unwrap().push(next.clone());
                if applies {
                    values.set(next);
                }
            });
        }

        let select = select.build(&self.widget, &self.registry).expect("build");
        let outside = Element::text("outside").id("outside").clickable(true);

        let mut root = Element::row()
            .id("page")
            .width(Size::Fill)
            .gap(1)
            .child(select)
            .child(outside);
        self.dispatcher.prepare(&mut root);
        self.layout = layout(&root, Rect::from_size(80, 24));
        self.root = root;
    }

    pub fn dispatch(&mut self, event: Event) -> EventResult {
        let result = self
            .dispatcher
            .dispatch(&self.root, &self.layout, &self.registry, &event);
        self.rebuild();
        result
    }

    /// Click the top-left cell of the element with `id`.
    pub fn click(&mut self, id: &str) -> EventResult {
        let rect = *self
            .layout
            .get(id)
            .unwrap_or_else(|| panic!("{id} is not on screen"));
        self.dispatch(Event::click(rect.x, rect.y))
    }

    pub fn key(&mut self, key: Key) -> EventResult {
        self.dispatch(Event::key(key))
    }

    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.key(Key::Char(c));
        }
    }

    pub fn scroll(&mut self, id: &str, delta_y: i16) -> EventResult {
        let rect = *self.layout.get(id).expect("on screen");
        self.dispatch(Event::Scroll {
            x: rect.x,
            y: rect.y,
            delta_y,
        })
    }

    pub fn values(&self) -> Vec<String> {
        self.values.get()
    }

    pub fn changes(&self) -> Vec<Vec<String>> {
        self.changes.lock().unwrap().clone()
    }

    pub fn is_open(&self) -> bool {
        find_element(&self.root, &format!("{ID}-popover")).is_some()
    }

    pub fn exists(&self, id: &str) -> bool {
        find_element(&self.root, id).is_some()
    }

    pub fn on_screen(&self, id: &str) -> bool {
        self.layout.contains_key(id)
    }

    /// Concatenated text of an element's subtree, space separated.
    pub fn text(&self, id: &str) -> String {
        let mut parts = Vec::new();
        if let Some(element) = find_element(&self.root, id) {
            collect_text(element, &mut parts);
        }
        parts.join(" ")
    }

    /// Ids of the list items currently built, in display order.
    pub fn item_ids(&self) -> Vec<String> {
        find_element(&self.root, &format!("{ID}-list"))
            .map(|list| list.child_elements().iter().map(|e| e.id.clone()).collect())
            .unwrap_or_default()
    }
}

fn collect_text(element: &Element, out: &mut Vec<String>) {
    match &element.content {
        Node::Text(text) => out.push(text.clone()),
        Node::Input { value, .. } => out.push(value.clone()),
        Node::Children(children) => children.iter().for_each(|c| collect_text(c, out)),
        Node::None => {}
    }
}
