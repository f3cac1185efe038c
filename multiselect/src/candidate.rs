//! Candidate options offered by a list surface.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One selectable option.
///
/// Deserializes from `{"value": "...", "label": "...", "description": "..."}`
/// with `label` and `description` optional, so option lists can be loaded
/// from data files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Candidate {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: None,
            description: None,
        }
    }

    /// Label shown to the user: the explicit label, else the raw value.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.value)
    }

    /// Text the search query is matched against.
    pub fn search_text(&self) -> String {
        match &self.description {
            Some(description) => format!("{} {}", self.display_label(), description),
            None => self.display_label().to_string(),
        }
    }
}

/// Label lookup for selected values, built from the declared candidates.
#[derive(Debug, Default)]
pub(crate) struct CandidateIndex {
    labels: HashMap<String, String>,
    duplicates: Vec<String>,
}

impl CandidateIndex {
    /// Index candidates by value. When a value is declared twice the later
    /// declaration wins and the value is listed in `duplicates`.
    pub(crate) fn build<'a>(candidates: impl IntoIterator<Item = &'a Candidate>) -> Self {
        let mut labels = HashMap::new();
        let mut duplicates = Vec::new();
        for candidate in candidates {
            let previous = labels.insert(
                candidate.value.clone(),
                candidate.display_label().to_string(),
            );
            if previous.is_some() && !duplicates.contains(&candidate.value) {
                duplicates.push(candidate.value.clone());
            }
        }
        Self { labels, duplicates }
    }

    /// Values declared more than once, in order of their second declaration.
    pub(crate) fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    /// Label for a selected value, falling back to the value itself when no
    /// candidate declares it.
    pub(crate) fn label_for<'a>(&'a self, value: &'a str) -> &'a str {
        self.labels.get(value).map(String::as_str).unwrap_or(value)
    }
}
