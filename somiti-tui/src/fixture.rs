//! Role fixtures: a role and the permissions it may be granted.

use std::fs;
use std::path::Path;

use log::{info, warn};
use multiselect::Candidate;
use serde::Deserialize;

use crate::error::AppError;

const BUNDLED: &str = include_str!("../fixtures/role.json");

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    /// Permissions currently granted, in display order.
    #[serde(default)]
    pub permission_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoleFixture {
    pub role: Role,
    pub permissions: Vec<Candidate>,
}

impl RoleFixture {
    /// Load from `path`, or the bundled sample when `path` is None.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let fixture = match path {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|source| AppError::FixtureRead {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::parse(&text)?
            }
            None => Self::parse(BUNDLED)?,
        };

        info!(
            "fixture: role {} with {} granted of {} permissions",
            fixture.role.id,
            fixture.role.permission_ids.len(),
            fixture.permissions.len()
        );
        Ok(fixture)
    }

    pub fn parse(text: &str) -> Result<Self, AppError> {
        let fixture: Self = serde_json::from_str(text)?;
        for granted in &fixture.role.permission_ids {
            if !fixture.permissions.iter().any(|p| &p.value == granted) {
                warn!("fixture: granted permission {granted:?} is not a known permission");
            }
        }
        Ok(fixture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_fixture_parses() {
        let fixture = RoleFixture::load(None).unwrap();
        assert_eq!(fixture.role.id, "role-support");
        assert!(fixture.permissions.len() > 8);
        assert_eq!(fixture.role.permission_ids, vec!["tickets.read", "tickets.reply"]);
    }

    #[test]
    fn test_optional_fields_default() {
        let fixture = RoleFixture::parse(
            r#"{"role": {"id": "r", "name": "R"}, "permissions": [{"value": "p"}]}"#,
        )
        .unwrap();
        assert!(fixture.role.permission_ids.is_empty());
        assert_eq!(fixture.permissions[0].display_label(), "p");
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = RoleFixture::load(Some(Path::new("/nonexistent/role.json"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/role.json"));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = RoleFixture::parse("{").unwrap_err();
        assert!(matches!(err, AppError::FixtureParse(_)));
    }
}
