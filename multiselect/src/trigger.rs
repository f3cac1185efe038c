//! The always-visible part of a multi-select: badges and the toggle.

use std::sync::Arc;

use tuidom::{Element, Size, Wrap};

use crate::candidate::CandidateIndex;
use crate::clear::ClearControl;
use crate::context::RenderScope;
use crate::error::MultiSelectError;
use crate::handler::{EventResult, events};

/// Trigger slot: shows one badge per selected value, or a placeholder.
#[derive(Debug, Clone)]
pub struct Trigger {
    placeholder: String,
    clear: Option<ClearControl>,
}

impl Default for Trigger {
    fn default() -> Self {
        Self {
            placeholder: "Select...".into(),
            clear: None,
        }
    }
}

impl Trigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text shown while nothing is selected.
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Render a clear control after the badges.
    pub fn clear(mut self, control: ClearControl) -> Self {
        self.clear = Some(control);
        self
    }

    pub(crate) fn build(
        self,
        scope: &RenderScope<'_>,
        candidates: &CandidateIndex,
        open: bool,
        disabled: bool,
    ) -> Result<Element, MultiSelectError> {
        let selection = scope.selection("Trigger")?;
        let id = format!("{}-trigger", scope.container_id("Trigger")?);
        let palette = scope.palette();

        let mut row = Element::row()
            .id(&id)
            .gap(1)
            .width(Size::Fill)
            .wrap(Wrap::Wrap)
            .focusable(!disabled)
            .clickable(!disabled)
            .disabled(disabled)
            .style_focused(palette.focus());

        if selection.values().is_empty() {
            row = row.child(Element::text(&self.placeholder).style(palette.muted()));
        } else {
            for (n, value) in selection.values().iter().enumerate() {
                let badge = Badge::new(value, candidates.label_for(value)).disabled(disabled);
                row = row.child(badge.build(scope, n)?);
            }
        }

        let arrow = if open { "▲" } else { "▼" };
        row = row.child(Element::text(arrow).style(palette.muted()));

        if let Some(clear) = self.clear {
            row = row.child(clear.disabled(disabled).build(scope)?);
        }

        Ok(row)
    }
}

/// Chip for one selected value with its own remove control.
///
/// The remove control consumes its activation, so the surrounding trigger
/// never toggles the popover when a badge is dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    value: String,
    label: String,
    disabled: bool,
}

impl Badge {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Build the badge at position `n` of the selection.
    pub fn build(self, scope: &RenderScope<'_>, n: usize) -> Result<Element, MultiSelectError> {
        let selection = scope.selection("Badge")?;
        let id = format!("{}-badge-{n}", scope.container_id("Badge")?);
        let remove_id = format!("{id}-remove");
        let palette = scope.palette();

        let remove = Element::text("×")
            .id(&remove_id)
            .clickable(!self.disabled)
            .focusable(!self.disabled)
            .disabled(self.disabled)
            .style_focused(palette.focus());

        if !self.disabled {
            let selection = selection.clone();
            let value = self.value.clone();
            scope.registry().register(
                &remove_id,
                events::ACTIVATE,
                Arc::new(move |_| {
                    selection.remove(&value);
                    EventResult::Consumed
                }),
            );
        }

        Ok(Element::row()
            .id(&id)
            .gap(1)
            .style(palette.badge())
            .data("value", self.value)
            .child(Element::text(self.label))
            .child(remove))
    }
}
