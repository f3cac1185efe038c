use crate::element::{find_element, Element};
use crate::layout::LayoutResult;

/// Tracks which element is currently focused.
#[derive(Debug, Default, Clone)]
pub struct FocusState {
    focused: Option<String>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the currently focused element ID.
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Programmatically focus an element by ID.
    /// Returns true if focus changed.
    pub fn focus(&mut self, id: &str) -> bool {
        if self.focused.as_deref() == Some(id) {
            return false;
        }
        self.focused = Some(id.to_string());
        true
    }

    /// Clear focus.
    /// Returns true if there was something focused.
    pub fn blur(&mut self) -> bool {
        self.focused.take().is_some()
    }

    /// Drop focus if the focused element no longer exists in `root`.
    pub fn retain_in(&mut self, root: &Element) {
        if let Some(id) = &self.focused {
            if find_element(root, id).is_none() {
                log::debug!("focus: {id} left the tree");
                self.focused = None;
            }
        }
    }

    /// Focus the next visible focusable element (Tab navigation).
    /// Returns the newly focused element ID if focus changed.
    pub fn focus_next(&mut self, root: &Element, layout: &LayoutResult) -> Option<String> {
        let focusable = collect_visible_focusable(root, layout);
        let next = match self.position_in(&focusable) {
            Some(i) => focusable.get((i + 1) % focusable.len()),
            None => focusable.first(),
        }?
        .clone();
        self.focus(&next).then_some(next)
    }

    /// Focus the previous visible focusable element (Shift+Tab navigation).
    /// Returns the newly focused element ID if focus changed.
    pub fn focus_prev(&mut self, root: &Element, layout: &LayoutResult) -> Option<String> {
        let focusable = collect_visible_focusable(root, layout);
        let prev = match self.position_in(&focusable) {
            Some(0) | None => focusable.last(),
            Some(i) => focusable.get(i - 1),
        }?
        .clone();
        self.focus(&prev).then_some(prev)
    }

    fn position_in(&self, ids: &[String]) -> Option<usize> {
        let current = self.focused.as_deref()?;
        ids.iter().position(|id| id == current)
    }
}

/// All focusable, enabled elements in tree order.
pub fn collect_focusable(root: &Element) -> Vec<String> {
    let mut out = Vec::new();
    collect(root, &mut out, &|_| true);
    out
}

/// Focusable elements that received a rect in `layout`, in tree order.
pub fn collect_visible_focusable(root: &Element, layout: &LayoutResult) -> Vec<String> {
    let mut out = Vec::new();
    collect(root, &mut out, &|e| layout.contains_key(&e.id));
    out
}

fn collect(element: &Element, out: &mut Vec<String>, visible: &dyn Fn(&Element) -> bool) {
    if element.focusable && !element.disabled && visible(element) {
        out.push(element.id.clone());
    }
    for child in element.child_elements() {
        collect(child, out, visible);
    }
}
