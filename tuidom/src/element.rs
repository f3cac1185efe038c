use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::types::{Direction, Edges, Position, Size, Style, Wrap};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Content {
    #[default]
    None,
    Text(String),
    /// Single-line editable text. Editing itself is driven by whoever
    /// dispatches key events; the element only carries the current value.
    Input {
        value: String,
        placeholder: String,
    },
    Children(Vec<Element>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    // Identity
    pub id: String,

    // Content
    pub content: Content,

    // Box model
    pub width: Size,
    pub height: Size,
    pub max_height: Option<u16>,
    pub padding: Edges,

    // Positioning
    pub position: Position,
    pub top: i16,
    pub left: i16,
    pub z_index: i16,

    // Container
    pub direction: Direction,
    pub gap: u16,
    pub wrap: Wrap,
    /// Vertical scroll offset in rows. Only honored when `scrollable` is set.
    pub scroll_offset: u16,

    // Visual
    pub style: Style,
    pub style_focused: Option<Style>,

    // Interaction
    pub focusable: bool,
    pub clickable: bool,
    pub scrollable: bool,
    /// When true, printable keys edit this element instead of triggering activation.
    pub captures_input: bool,

    // State
    /// Set by the runtime before rendering, never by widgets.
    pub focused: bool,
    pub disabled: bool,

    // Custom data storage
    pub data: HashMap<String, String>,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            id: generate_id("el"),
            content: Content::None,
            width: Size::Auto,
            height: Size::Auto,
            max_height: None,
            padding: Edges::default(),
            position: Position::Static,
            top: 0,
            left: 0,
            z_index: 0,
            direction: Direction::Column,
            gap: 0,
            wrap: Wrap::NoWrap,
            scroll_offset: 0,
            style: Style::default(),
            style_focused: None,
            focusable: false,
            clickable: false,
            scrollable: false,
            captures_input: false,
            focused: false,
            disabled: false,
            data: HashMap::new(),
        }
    }
}

impl Element {
    pub fn box_() -> Self {
        Self {
            id: generate_id("box"),
            ..Default::default()
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            id: generate_id("text"),
            content: Content::Text(content.into()),
            ..Default::default()
        }
    }

    pub fn col() -> Self {
        Self {
            id: generate_id("col"),
            direction: Direction::Column,
            ..Default::default()
        }
    }

    pub fn row() -> Self {
        Self {
            id: generate_id("row"),
            direction: Direction::Row,
            ..Default::default()
        }
    }

    /// Create a text input element.
    pub fn text_input(value: impl Into<String>) -> Self {
        Self {
            id: generate_id("input"),
            content: Content::Input {
                value: value.into(),
                placeholder: String::new(),
            },
            focusable: true,
            captures_input: true,
            ..Default::default()
        }
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    // Content
    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        for child in children {
            self = self.child(child);
        }
        self
    }

    /// Set the placeholder of a text input. No effect on other content.
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        if let Content::Input { placeholder, .. } = &mut self.content {
            *placeholder = text.into();
        }
        self
    }

    // Box model
    pub fn width(mut self, width: Size) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: Size) -> Self {
        self.height = height;
        self
    }

    pub fn max_height(mut self, max_height: u16) -> Self {
        self.max_height = Some(max_height);
        self
    }

    pub fn padding(mut self, padding: Edges) -> Self {
        self.padding = padding;
        self
    }

    // Positioning
    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn top(mut self, top: i16) -> Self {
        self.top = top;
        self
    }

    pub fn left(mut self, left: i16) -> Self {
        self.left = left;
        self
    }

    pub fn z_index(mut self, z_index: i16) -> Self {
        self.z_index = z_index;
        self
    }

    // Container
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    /// Let a row break its children onto further lines, `gap` rows apart.
    pub fn wrap(mut self, wrap: Wrap) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn scroll_offset(mut self, offset: u16) -> Self {
        self.scroll_offset = offset;
        self
    }

    // Visual
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn style_focused(mut self, style: Style) -> Self {
        self.style_focused = Some(style);
        self
    }

    // Interaction
    pub fn focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }

    pub fn clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    pub fn scrollable(mut self, scrollable: bool) -> Self {
        self.scrollable = scrollable;
        self
    }

    pub fn captures_input(mut self, captures: bool) -> Self {
        self.captures_input = captures;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Child elements, empty for leaf content.
    pub fn child_elements(&self) -> &[Element] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }

    /// Current value of a text input.
    pub fn input_value(&self) -> Option<&str> {
        match &self.content {
            Content::Input { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Style to paint with, taking focus into account.
    pub fn effective_style(&self) -> Style {
        match (&self.style_focused, self.focused) {
            (Some(focused), true) => self.style.merge(focused),
            _ => self.style.clone(),
        }
    }

    /// Mark the element with the given id as focused and clear the flag everywhere else.
    pub fn set_focus(&mut self, focused: Option<&str>) {
        self.focused = focused == Some(self.id.as_str());
        if let Content::Children(children) = &mut self.content {
            for child in children {
                child.set_focus(focused);
            }
        }
    }
}

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    root.child_elements()
        .iter()
        .find_map(|child| find_element(child, id))
}

/// IDs from the root down to (and including) the element with `id`.
pub fn find_path(root: &Element, id: &str) -> Option<Vec<String>> {
    if root.id == id {
        return Some(vec![root.id.clone()]);
    }

    for child in root.child_elements() {
        if let Some(mut path) = find_path(child, id) {
            path.insert(0, root.id.clone());
            return Some(path);
        }
    }

    None
}
