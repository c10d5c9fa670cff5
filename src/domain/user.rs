use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display-only session object. Not a security boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub name: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logged_in_at: Option<DateTime<Utc>>,
}

fn default_role() -> String {
    "User".to_string()
}

impl UserSession {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self { name: name.into(), role: role.into(), logged_in_at: None }
    }
}

impl Default for UserSession {
    fn default() -> Self {
        Self::new("Auditor", default_role())
    }
}
