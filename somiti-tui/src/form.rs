//! The role-permission form payload.

use serde::Serialize;
use thiserror::Error;

/// What the page submits: the role and its permission ids, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RolePermissionsForm {
    pub role_id: String,
    pub permission_ids: Vec<String>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Select at least one permission")]
    NoPermissions,
}

impl RolePermissionsForm {
    pub fn validate(role_id: &str, permission_ids: &[String]) -> Result<Self, FormError> {
        if permission_ids.is_empty() {
            return Err(FormError::NoPermissions);
        }
        Ok(Self {
            role_id: role_id.to_string(),
            permission_ids: permission_ids.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selection_is_rejected() {
        assert_eq!(
            RolePermissionsForm::validate("r", &[]),
            Err(FormError::NoPermissions)
        );
    }

    #[test]
    fn test_payload_keeps_selection_order() {
        let ids = vec!["b".to_string(), "a".to_string()];
        let form = RolePermissionsForm::validate("role-1", &ids).unwrap();

        let json = serde_json::to_string(&form).unwrap();

        assert_eq!(json, r#"{"role_id":"role-1","permission_ids":["b","a"]}"#);
    }
}
