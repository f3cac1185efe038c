use thiserror::Error;

/// Errors raised while building a multi-select.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MultiSelectError {
    /// A part that reads the selection context was built without an
    /// enclosing `MultiSelect`.
    #[error("{component} must be used within a MultiSelect")]
    OutsideContainer { component: &'static str },
}
