use crate::error::AppError;
use crate::table_types::{AdminRow, UserPatch, ADMIN_SELECT, USERS_TABLE};
use crate::types::AppState;

use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct BackfillOptions {
    pub role: String,
    pub dry_run: bool,
}

impl Default for BackfillOptions {
    fn default() -> Self {
        Self {
            role: "admin".to_string(),
            dry_run: false,
        }
    }
}

/// Per-row outcome: which fields were (or would be) filled, or why the update
/// failed.
#[derive(Debug)]
pub struct RowReport {
    pub user_id: Uuid,
    pub email: String,
    pub filled: Vec<&'static str>,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
pub struct BackfillSummary {
    pub scanned: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
    pub rows: Vec<RowReport>,
}

/// Make sure every row matching the role filter carries a sender phone and an
/// agent id, writing the configured defaults into only the fields that are
/// genuinely missing.  A failing row is reported and the run continues;
/// re-running after a clean pass updates nothing.
pub async fn run(state: &AppState, options: &BackfillOptions) -> Result<BackfillSummary, AppError> {
    let rows: Vec<AdminRow> = state
        .table_get(
            USERS_TABLE,
            &[
                ("role", format!("eq.{}", options.role)),
                ("select", ADMIN_SELECT.to_string()),
            ],
        )
        .await?;

    let defaults = &state.config.fallback;
    let mut summary = BackfillSummary {
        scanned: rows.len(),
        ..BackfillSummary::default()
    };

    for row in rows {
        let missing = row.missing_fields();
        if missing.is_empty() {
            summary.skipped += 1;
            summary.rows.push(RowReport {
                user_id: row.id,
                email: row.email,
                filled: Vec::new(),
                error: None,
            });
            continue;
        }

        if options.dry_run {
            debug!(user=%row.id, fields=?missing, "dry run, would fill");
            summary.rows.push(RowReport {
                user_id: row.id,
                email: row.email,
                filled: missing,
                error: None,
            });
            continue;
        }

        let patch = UserPatch {
            sender_phone: missing
                .contains(&"sender_phone")
                .then_some(defaults.sender_phone.as_str()),
            bolna_agent_id: missing
                .contains(&"bolna_agent_id")
                .then_some(defaults.agent_id.as_str()),
        };
        match state.table_patch(USERS_TABLE, row.id, &patch).await {
            Ok(()) => {
                info!(user=%row.id, fields=?missing, "backfilled");
                summary.updated += 1;
                summary.rows.push(RowReport {
                    user_id: row.id,
                    email: row.email,
                    filled: missing,
                    error: None,
                });
            }
            Err(e) => {
                summary.failed += 1;
                summary.rows.push(RowReport {
                    user_id: row.id,
                    email: row.email,
                    filled: missing,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    Ok(summary)
}
