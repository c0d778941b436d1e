use crate::bolna_types::{CallUserData, PlaceCallRequest, PlaceCallResponse};
use crate::error::AppError;
use crate::table_types::{AdminRow, ADMIN_SELECT, USERS_TABLE};
use crate::types::{AppState, DispatchOutcome, ResolvedSender, SenderBinding};
use crate::utils::{json_body, normalize_phone, send_request};

use tracing::{debug, info, warn};

/// Place one outbound call to `recipient` from `sender`, using the agent the
/// hosted users table binds to the sender.  When the requested sender has no
/// binding, the configured default sender (and its own binding) is used
/// instead and the outcome says so.
pub async fn place_call(
    state: &AppState,
    recipient: &str,
    sender: &str,
    contact_name: Option<&str>,
) -> Result<DispatchOutcome, AppError> {
    let recipient = normalize_phone(recipient)?;
    let requested = normalize_phone(sender)?;

    let resolved = resolve_sender(state, &requested).await?;
    let binding = resolved.binding();

    let bolna = state.config.bolna()?;
    let payload = PlaceCallRequest {
        agent_id: binding.agent_id.clone(),
        recipient_phone_number: recipient.clone(),
        from_phone_number: Some(binding.sender_phone.clone()),
        user_data: contact_name.map(|name| CallUserData {
            contact_name: name.to_string(),
        }),
    };
    debug!(agent=%payload.agent_id, recipient=%recipient, sender=%binding.sender_phone, "placing call");
    let req = state
        .http_client
        .post(format!("{}/call", bolna.base_url.trim_end_matches('/')))
        .bearer_auth(&bolna.api_key)
        .json(&payload);
    let resp = send_request("call origination", req).await?;
    let placed: PlaceCallResponse = json_body("call origination", resp).await?;

    let call_id = placed
        .call_sid()
        .ok_or_else(|| AppError::Decode {
            context: "call origination",
            detail: "response carried no call identifier".to_string(),
        })?
        .to_string();
    let status = placed.state().unwrap_or("unknown").to_string();
    info!(call_id=%call_id, status=%status, sender=%binding.sender_phone, "call placed");

    Ok(DispatchOutcome {
        call_id,
        status,
        sender_phone: binding.sender_phone.clone(),
        agent_id: binding.agent_id.clone(),
        fell_back: resolved.fell_back(),
    })
}

/// Decide which sender/agent pair to originate from.  The hosted table is the
/// only source of bindings; when neither the requested nor the default sender
/// is bound, the dispatch fails instead of guessing an agent.
pub async fn resolve_sender(
    state: &AppState,
    requested: &str,
) -> Result<ResolvedSender, AppError> {
    if let Some(binding) = binding_for(state, requested).await? {
        return Ok(ResolvedSender::Bound(binding));
    }

    let default = state.config.fallback.sender_phone.clone();
    if default != requested {
        if let Some(binding) = binding_for(state, &default).await? {
            warn!(requested=%requested, default=%default, "sender has no agent binding; using default sender");
            return Ok(ResolvedSender::Fallback {
                binding,
                requested: requested.to_string(),
            });
        }
    }

    Err(AppError::NoBinding {
        requested: requested.to_string(),
        default,
    })
}

async fn binding_for(state: &AppState, phone: &str) -> Result<Option<SenderBinding>, AppError> {
    let rows: Vec<AdminRow> = state
        .table_get(
            USERS_TABLE,
            &[
                ("sender_phone", format!("eq.{phone}")),
                ("select", ADMIN_SELECT.to_string()),
                ("limit", "1".to_string()),
            ],
        )
        .await?;
    Ok(rows.into_iter().next().and_then(|row| row.binding()))
}
