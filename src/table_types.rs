use crate::types::SenderBinding;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const USERS_TABLE: &str = "users";

/// Column list requested from the hosted users table.
pub const ADMIN_SELECT: &str = "id,email,role,sender_phone,bolna_agent_id";

/// One row of the hosted users table, as its REST interface returns it.  The
/// phone and agent columns are hand-maintained and frequently null or blank
/// on older rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminRow {
    pub id: Uuid,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub sender_phone: Option<String>,
    #[serde(default)]
    pub bolna_agent_id: Option<String>,
}

impl AdminRow {
    /// Which dispatch columns still need a value.  Blank strings count as
    /// missing, same as null.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if non_blank(&self.sender_phone).is_none() {
            missing.push("sender_phone");
        }
        if non_blank(&self.bolna_agent_id).is_none() {
            missing.push("bolna_agent_id");
        }
        missing
    }

    /// The sender-to-agent binding this row carries, if it is complete.
    pub fn binding(&self) -> Option<SenderBinding> {
        match (
            non_blank(&self.sender_phone),
            non_blank(&self.bolna_agent_id),
        ) {
            (Some(sender_phone), Some(agent_id)) => Some(SenderBinding {
                user_id: self.id,
                email: self.email.clone(),
                sender_phone: sender_phone.to_string(),
                agent_id: agent_id.to_string(),
            }),
            _ => None,
        }
    }
}

/// Partial-update body for a users row.  Absent fields are not serialized, so
/// a backfill never rewrites a value that is already present.
#[derive(Debug, Default, Serialize)]
pub struct UserPatch<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bolna_agent_id: Option<&'a str>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
}
