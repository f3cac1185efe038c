//! Render-scoped selection context.
//!
//! A [`SelectionContext`] is created by every `MultiSelect::build` from the
//! parent's current snapshot and change callback. Descendant parts receive it
//! through a [`RenderScope`]; there is no global registry, so a part built
//! from a scope without a container fails with
//! [`MultiSelectError::OutsideContainer`].

use std::fmt;
use std::sync::Arc;

use log::{debug, error};

use crate::error::MultiSelectError;
use crate::handler::HandlerRegistry;
use crate::selection;
use crate::theme::Palette;

/// Callback receiving the complete next selection.
pub type ChangeCallback = Arc<dyn Fn(Vec<String>) + Send + Sync>;

/// The selection snapshot of one render plus the way to request changes.
///
/// Mutating operations never touch the snapshot; they compute the next
/// sequence and pass it to the parent. The displayed selection only changes
/// once the parent applies it and rebuilds.
#[derive(Clone)]
pub struct SelectionContext {
    values: Arc<[String]>,
    on_change: Option<ChangeCallback>,
}

impl SelectionContext {
    pub fn new(values: &[String], on_change: Option<ChangeCallback>) -> Self {
        Self {
            values: values.into(),
            on_change,
        }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn is_selected(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    /// Toggle membership of `value`.
    pub fn select(&self, value: &str) {
        self.emit("select", selection::toggled(&self.values, value));
    }

    pub fn remove(&self, value: &str) {
        self.emit("remove", selection::removed(&self.values, value));
    }

    pub fn clear_all(&self) {
        self.emit("clear_all", Vec::new());
    }

    fn emit(&self, operation: &str, next: Vec<String>) {
        match &self.on_change {
            Some(on_change) => {
                debug!(
                    "SelectionContext::{operation} {} -> {} values",
                    self.values.len(),
                    next.len()
                );
                on_change(next);
            }
            None => debug!("SelectionContext::{operation} dropped: no change callback"),
        }
    }
}

impl fmt::Debug for SelectionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionContext")
            .field("values", &self.values)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

/// Everything a part needs while it is being built.
#[derive(Debug, Clone)]
pub struct RenderScope<'a> {
    registry: &'a HandlerRegistry,
    container: Option<ContainerScope>,
}

#[derive(Debug, Clone)]
struct ContainerScope {
    id: String,
    selection: SelectionContext,
    palette: Palette,
}

impl<'a> RenderScope<'a> {
    /// A scope with no enclosing container.
    pub fn new(registry: &'a HandlerRegistry) -> Self {
        Self {
            registry,
            container: None,
        }
    }

    pub(crate) fn for_container(
        registry: &'a HandlerRegistry,
        id: impl Into<String>,
        selection: SelectionContext,
        palette: Palette,
    ) -> Self {
        Self {
            registry,
            container: Some(ContainerScope {
                id: id.into(),
                selection,
                palette,
            }),
        }
    }

    pub fn registry(&self) -> &'a HandlerRegistry {
        self.registry
    }

    /// Colors of the enclosing container, or the defaults when detached.
    pub fn palette(&self) -> Palette {
        self.container
            .as_ref()
            .map(|c| c.palette)
            .unwrap_or_default()
    }

    /// The enclosing container's selection context.
    pub fn selection(
        &self,
        component: &'static str,
    ) -> Result<&SelectionContext, MultiSelectError> {
        self.container(component).map(|c| &c.selection)
    }

    /// The enclosing container's element id, used to derive part ids.
    pub fn container_id(&self, component: &'static str) -> Result<&str, MultiSelectError> {
        self.container(component).map(|c| c.id.as_str())
    }

    fn container(&self, component: &'static str) -> Result<&ContainerScope, MultiSelectError> {
        self.container.as_ref().ok_or_else(|| {
            error!("{component} must be used within a MultiSelect");
            MultiSelectError::OutsideContainer { component }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<Vec<String>>>>, ChangeCallback) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: ChangeCallback = Arc::new(move |next| sink.lock().unwrap().push(next));
        (seen, callback)
    }

    #[test]
    fn test_select_emits_without_touching_snapshot() {
        let (seen, callback) = recorder();
        let cx = SelectionContext::new(&["a".to_string()], Some(callback));

        cx.select("b");

        assert_eq!(cx.values(), ["a".to_string()]);
        assert_eq!(*seen.lock().unwrap(), vec![vec!["a".to_string(), "b".to_string()]]);
    }

    #[test]
    fn test_clear_all_on_empty_set_still_emits() {
        let (seen, callback) = recorder();
        let cx = SelectionContext::new(&[], Some(callback));

        cx.clear_all();

        assert_eq!(*seen.lock().unwrap(), vec![Vec::<String>::new()]);
    }

    #[test]
    fn test_mutation_without_callback_is_dropped() {
        let cx = SelectionContext::new(&["a".to_string()], None);
        cx.remove("a");
        assert!(cx.is_selected("a"));
    }

    #[test]
    fn test_detached_scope_reports_component() {
        let registry = HandlerRegistry::new();
        let scope = RenderScope::new(&registry);

        assert_eq!(
            scope.selection("Item").unwrap_err(),
            MultiSelectError::OutsideContainer { component: "Item" }
        );
        assert!(scope.container_id("ClearControl").is_err());
    }
}
