use std::sync::Arc;

use tuidom::Element;

use crate::context::RenderScope;
use crate::error::MultiSelectError;
use crate::handler::{EventResult, events};

/// Control that empties the selection.
///
/// Rendered whether or not anything is selected. Activating it leaves the
/// popover alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearControl {
    label: String,
    disabled: bool,
}

impl Default for ClearControl {
    fn default() -> Self {
        Self {
            label: "clear".into(),
            disabled: false,
        }
    }
}

impl ClearControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Fails with [`MultiSelectError::OutsideContainer`] when `scope` has no
    /// enclosing multi-select.
    pub fn build(&self, scope: &RenderScope<'_>) -> Result<Element, MultiSelectError> {
        let selection = scope.selection("ClearControl")?;
        let id = format!("{}-clear", scope.container_id("ClearControl")?);
        let palette = scope.palette();

        let element = Element::text(&self.label)
            .id(&id)
            .clickable(!self.disabled)
            .focusable(!self.disabled)
            .disabled(self.disabled)
            .style(palette.muted())
            .style_focused(palette.focus());

        if !self.disabled {
            let selection = selection.clone();
            scope.registry().register(
                &id,
                events::ACTIVATE,
                Arc::new(move |_| {
                    selection.clear_all();
                    EventResult::Consumed
                }),
            );
        }

        Ok(element)
    }
}
