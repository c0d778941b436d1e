use crate::config::Config;
use crate::error::AppError;
use crate::utils::{expect_success, json_body, send_request};

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

/// Shared state for one invocation: the configuration read at startup and the
/// HTTP client every flow borrows.
pub struct AppState {
    pub config: Config,
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| AppError::Transport {
                context: "http client setup",
                source: e,
            })?;
        Ok(Self {
            config,
            http_client,
        })
    }

    /// Select rows from a hosted table.  Filters use the store's
    /// `column=eq.value` query convention.
    pub async fn table_get<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>, AppError> {
        let supabase = self.config.supabase()?;
        let url = format!("{}/rest/v1/{table}", supabase.url.trim_end_matches('/'));
        let req = self
            .http_client
            .get(url)
            .header("apikey", &supabase.service_key)
            .bearer_auth(&supabase.service_key)
            .query(filters);
        let resp = send_request("hosted table select", req).await?;
        json_body("hosted table select", resp).await
    }

    /// Partial update of one row by id.  The store answers 204 on success.
    pub async fn table_patch<B: Serialize>(
        &self,
        table: &str,
        id: Uuid,
        body: &B,
    ) -> Result<(), AppError> {
        let supabase = self.config.supabase()?;
        let url = format!("{}/rest/v1/{table}", supabase.url.trim_end_matches('/'));
        let req = self
            .http_client
            .patch(url)
            .header("apikey", &supabase.service_key)
            .bearer_auth(&supabase.service_key)
            .header("Prefer", "return=minimal")
            .query(&[("id", format!("eq.{id}"))])
            .json(body);
        let resp = send_request("hosted table update", req).await?;
        expect_success("hosted table update", resp).await
    }
}

/// A sender phone and the voice agent bound to it, as recorded in the hosted
/// users table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderBinding {
    pub user_id: Uuid,
    pub email: String,
    pub sender_phone: String,
    pub agent_id: String,
}

/// How the sender for a dispatch was resolved: bound as requested, or
/// substituted with the process-wide default.
#[derive(Debug)]
pub enum ResolvedSender {
    Bound(SenderBinding),
    Fallback {
        binding: SenderBinding,
        requested: String,
    },
}

impl ResolvedSender {
    pub fn binding(&self) -> &SenderBinding {
        match self {
            ResolvedSender::Bound(binding) => binding,
            ResolvedSender::Fallback { binding, .. } => binding,
        }
    }

    pub fn fell_back(&self) -> bool {
        matches!(self, ResolvedSender::Fallback { .. })
    }
}

/// Result of one dispatch.  `sender_phone` is the number actually used;
/// `fell_back` says whether it differs from the one asked for.
#[derive(Debug)]
pub struct DispatchOutcome {
    pub call_id: String,
    pub status: String,
    pub sender_phone: String,
    pub agent_id: String,
    pub fell_back: bool,
}
