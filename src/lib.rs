pub mod assign;
pub mod backfill;
pub mod bolna_types;
pub mod config;
pub mod console;
pub mod console_types;
pub mod dispatch;
pub mod error;
pub mod table_types;
pub mod types;
pub mod utils;

pub mod consts {
    /// Sender number substituted when a requested sender has no agent binding.
    pub const DEFAULT_SENDER_PHONE: &str = "+918035743222";
    /// Agent bound to the default sender.
    pub const DEFAULT_BOLNA_AGENT_ID: &str = "15554373-b8e1-4b00-8c25-c4742dc8e480";
    pub const DEFAULT_BOLNA_URL: &str = "https://api.bolna.dev";
    pub const DEFAULT_CONSOLE_URL: &str = "http://localhost:8000";
    pub const DEFAULT_CALL_TYPE: &str = "manual";
    pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
}
