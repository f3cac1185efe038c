//! Floating surface anchored below its owner.

use tuidom::{Element, Position, Size, Style};

const POPOVER_Z: i16 = 100;

/// Absolutely positioned overlay painted above the page.
///
/// The popover does not take part in its parent's flow layout and absorbs
/// clicks on its background, so nothing underneath reacts. It hangs off a
/// zero-height anchor, so placing the anchor right after the owner in flow
/// keeps the surface below the owner however many rows the owner grows to.
#[derive(Debug, Clone)]
pub struct Popover {
    id: String,
    style: Style,
}

impl Popover {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            style: Style::default(),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Wrap `content` in the surface and its anchor. The anchor's id is the
    /// popover's id with `-anchor` appended.
    pub fn build(self, content: Element) -> Element {
        let surface = Element::col()
            .id(&self.id)
            .position(Position::Absolute)
            .z_index(POPOVER_Z)
            .style(self.style)
            .child(content);

        Element::box_()
            .id(format!("{}-anchor", self.id))
            .height(Size::Fixed(0))
            .child(surface)
    }
}
