use std::sync::Arc;

use tuidom::{Element, Size, Style};

use crate::candidate::Candidate;
use crate::context::RenderScope;
use crate::error::MultiSelectError;
use crate::handler::{EventResult, events};

/// Element id of the item declared at `index` inside container `container`.
pub(crate) fn item_id(container: &str, index: usize) -> String {
    format!("{container}-item-{index}")
}

/// One selectable row in a list surface.
///
/// Shows a `[x]` / `[ ]` indicator read from the enclosing selection.
/// Activating it toggles its value; the popover stays open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    candidate: Candidate,
}

impl Item {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            candidate: Candidate::new(value),
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.candidate.label = Some(label.into());
        self
    }

    /// Secondary text shown dimmed after the label. Also searched.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.candidate.description = Some(description.into());
        self
    }

    pub fn candidate(&self) -> &Candidate {
        &self.candidate
    }

    /// Build the row for the item declared at `index`.
    ///
    /// Fails with [`MultiSelectError::OutsideContainer`] when `scope` has no
    /// enclosing multi-select.
    pub fn build(
        &self,
        scope: &RenderScope<'_>,
        index: usize,
    ) -> Result<Element, MultiSelectError> {
        let selection = scope.selection("Item")?;
        let id = item_id(scope.container_id("Item")?, index);
        let palette = scope.palette();

        let value = self.candidate.value.clone();
        let selected = selection.is_selected(&value);

        let (indicator, indicator_style) = if selected {
            ("[x]", palette.accent())
        } else {
            ("[ ]", palette.muted())
        };
        let label_style = if selected {
            Style::new().bold()
        } else {
            Style::new()
        };

        let mut row = Element::row()
            .id(&id)
            .gap(1)
            .width(Size::Fill)
            .focusable(true)
            .clickable(true)
            .style_focused(palette.focus())
            .data("value", &value)
            .child(Element::text(indicator).style(indicator_style))
            .child(Element::text(self.candidate.display_label()).style(label_style));
        if let Some(description) = &self.candidate.description {
            row = row.child(Element::text(description).style(palette.muted()));
        }

        let selection = selection.clone();
        scope.registry().register(
            &id,
            events::ACTIVATE,
            Arc::new(move |_| {
                selection.select(&value);
                EventResult::Consumed
            }),
        );

        Ok(row)
    }
}

impl From<Candidate> for Item {
    fn from(candidate: Candidate) -> Self {
        Self { candidate }
    }
}
