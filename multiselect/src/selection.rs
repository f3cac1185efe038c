//! Set arithmetic on the ordered selection sequence.
//!
//! The parent owns the sequence; these functions only compute the next value
//! to hand back through the change callback.

/// Remove `value` when present, otherwise append it at the end.
pub fn toggled(values: &[String], value: &str) -> Vec<String> {
    if values.iter().any(|v| v == value) {
        removed(values, value)
    } else {
        let mut next = values.to_vec();
        next.push(value.to_string());
        next
    }
}

/// Drop every occurrence of `value`, keeping the relative order of the rest.
pub fn removed(values: &[String], value: &str) -> Vec<String> {
    values.iter().filter(|v| *v != value).cloned().collect()
}
