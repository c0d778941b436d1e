use crate::consts;
use crate::error::AppError;
use crate::utils::normalize_phone;

use std::env;
use std::time::Duration;

/// Everything the toolkit may be asked to talk to, read from the process
/// environment once at startup.  Sections are optional so a command only
/// needs the credentials it actually uses; the accessors fail up front,
/// naming the variables to set, before any network call happens.
// No Debug derives on the credential-bearing sections; nothing should ever
// print a service key or password, not even by accident.
#[derive(Clone)]
pub struct Config {
    pub bolna: Option<BolnaConfig>,
    pub supabase: Option<SupabaseConfig>,
    pub console: Option<ConsoleConfig>,
    pub fallback: FallbackBinding,
    pub http_timeout: Duration,
}

#[derive(Clone)]
pub struct BolnaConfig {
    pub base_url: String,
    pub api_key: String,
}

#[derive(Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub service_key: String,
}

#[derive(Clone)]
pub struct ConsoleConfig {
    pub base_url: String,
    pub email: String,
    pub password: String,
}

/// The sender/agent pair substituted when a requested sender has no binding,
/// and the values the backfill writes into incomplete rows.  The phone is
/// held in canonical E.164 form; `from_env` normalizes whatever the
/// environment supplied.
#[derive(Debug, Clone)]
pub struct FallbackBinding {
    pub sender_phone: String,
    pub agent_id: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let bolna = read_env("BOLNA_API_KEY").map(|api_key| BolnaConfig {
            base_url: read_env("BOLNA_API_URL")
                .unwrap_or_else(|| consts::DEFAULT_BOLNA_URL.to_string()),
            api_key,
        });

        let supabase = match (
            read_env("SUPABASE_URL"),
            read_env("SUPABASE_SERVICE_ROLE_KEY"),
        ) {
            (Some(url), Some(service_key)) => Some(SupabaseConfig { url, service_key }),
            (Some(_), None) => return Err(AppError::MissingConfig("SUPABASE_SERVICE_ROLE_KEY")),
            (None, Some(_)) => return Err(AppError::MissingConfig("SUPABASE_URL")),
            (None, None) => None,
        };

        let console = match (read_env("CONSOLE_EMAIL"), read_env("CONSOLE_PASSWORD")) {
            (Some(email), Some(password)) => Some(ConsoleConfig {
                base_url: read_env("CONSOLE_API_URL")
                    .unwrap_or_else(|| consts::DEFAULT_CONSOLE_URL.to_string()),
                email,
                password,
            }),
            (Some(_), None) => return Err(AppError::MissingConfig("CONSOLE_PASSWORD")),
            (None, Some(_)) => return Err(AppError::MissingConfig("CONSOLE_EMAIL")),
            (None, None) => None,
        };

        let fallback = FallbackBinding {
            sender_phone: normalize_phone(
                &read_env("DEFAULT_SENDER_PHONE")
                    .unwrap_or_else(|| consts::DEFAULT_SENDER_PHONE.to_string()),
            )?,
            agent_id: read_env("DEFAULT_BOLNA_AGENT_ID")
                .unwrap_or_else(|| consts::DEFAULT_BOLNA_AGENT_ID.to_string()),
        };

        let http_timeout = match read_env("HTTP_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>().ok().filter(|secs| *secs > 0) {
                Some(secs) => Duration::from_secs(secs),
                None => {
                    return Err(AppError::Invalid {
                        what: "HTTP_TIMEOUT_SECS",
                        value: raw,
                    })
                }
            },
            None => Duration::from_secs(consts::DEFAULT_HTTP_TIMEOUT_SECS),
        };

        Ok(Self {
            bolna,
            supabase,
            console,
            fallback,
            http_timeout,
        })
    }

    pub fn bolna(&self) -> Result<&BolnaConfig, AppError> {
        self.bolna
            .as_ref()
            .ok_or(AppError::MissingConfig("BOLNA_API_KEY"))
    }

    pub fn supabase(&self) -> Result<&SupabaseConfig, AppError> {
        self.supabase.as_ref().ok_or(AppError::MissingConfig(
            "SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY",
        ))
    }

    pub fn console(&self) -> Result<&ConsoleConfig, AppError> {
        self.console.as_ref().ok_or(AppError::MissingConfig(
            "CONSOLE_EMAIL and CONSOLE_PASSWORD",
        ))
    }
}

/// Blank values count as unset; upstream deploy tooling writes empty strings
/// for variables it does not know.
fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
