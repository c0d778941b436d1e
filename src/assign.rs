use crate::error::AppError;
use crate::table_types::{UserPatch, USERS_TABLE};
use crate::types::AppState;
use crate::utils::normalize_phone;

use tracing::info;
use uuid::Uuid;

/// The binding as written: the row id plus the normalized phone and agent.
#[derive(Debug)]
pub struct AssignOutcome {
    pub user_id: Uuid,
    pub sender_phone: String,
    pub agent_id: String,
}

/// Bind a sender phone and an agent to one user row, keyed by the row's uuid.
/// The phone is normalized before it reaches the table; both columns are
/// written in a single partial update.
pub async fn run(
    state: &AppState,
    user: &str,
    phone: &str,
    agent: &str,
) -> Result<AssignOutcome, AppError> {
    let user_id = Uuid::parse_str(user).map_err(|_| AppError::Invalid {
        what: "user id",
        value: user.to_string(),
    })?;
    let sender_phone = normalize_phone(phone)?;

    let patch = UserPatch {
        sender_phone: Some(&sender_phone),
        bolna_agent_id: Some(agent),
    };
    state.table_patch(USERS_TABLE, user_id, &patch).await?;
    info!(user=%user_id, sender=%sender_phone, agent=%agent, "binding assigned");

    Ok(AssignOutcome {
        user_id,
        sender_phone,
        agent_id: agent.to_string(),
    })
}
