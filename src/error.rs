use thiserror::Error;

/// Failure taxonomy for every flow in the crate.  Configuration problems are
/// caught before any network call; vendor rejections keep the status code and
/// the raw body so the terminal shows exactly what the service said.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("missing configuration: set {0}")]
    MissingConfig(&'static str),

    #[error("invalid {what}: `{value}`")]
    Invalid { what: &'static str, value: String },

    #[error("invalid phone number `{0}`: expected E.164 like +918035743222")]
    InvalidPhone(String),

    #[error("{context}: HTTP {status}: {body}")]
    Http {
        context: &'static str,
        status: u16,
        body: String,
    },

    #[error("{context}: request failed: {source}")]
    Transport {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{context}: unexpected response payload: {detail}")]
    Decode {
        context: &'static str,
        detail: String,
    },

    #[error("no agent binding for sender {requested} and none for default sender {default}")]
    NoBinding { requested: String, default: String },

    #[error("{failed} of {total} operations failed")]
    PartialFailure { failed: usize, total: usize },
}
