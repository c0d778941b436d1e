mod call {
    use serde::{Deserialize, Serialize};

    /// Body of a call-origination request.
    #[derive(Debug, Clone, Serialize)]
    pub struct PlaceCallRequest {
        pub agent_id: String,
        pub recipient_phone_number: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub from_phone_number: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub user_data: Option<CallUserData>,
    }

    /// Context the agent can read out during the call.
    #[derive(Debug, Clone, Serialize)]
    pub struct CallUserData {
        pub contact_name: String,
    }

    /// Call-origination response.  Older deployments answer with
    /// `execution_id` and `message`, newer ones with `call_id` and `status`;
    /// every field is optional and read through the accessors below.
    #[derive(Debug, Default, Deserialize)]
    pub struct PlaceCallResponse {
        #[serde(default)]
        pub call_id: Option<String>,
        #[serde(default)]
        pub execution_id: Option<String>,
        #[serde(default)]
        pub status: Option<String>,
        #[serde(default)]
        pub message: Option<String>,
    }

    impl PlaceCallResponse {
        /// Call identifier: `call_id` first, `execution_id` second.
        pub fn call_sid(&self) -> Option<&str> {
            self.call_id.as_deref().or(self.execution_id.as_deref())
        }

        /// Reported state: `status` first, the free-text `message` second.
        pub fn state(&self) -> Option<&str> {
            self.status.as_deref().or(self.message.as_deref())
        }
    }
}
pub use call::*;

mod agent {
    use serde::{Deserialize, Serialize};

    /// Agent configuration as the vendor-shaped endpoints return it.  Field
    /// names differ between endpoint revisions (`name` vs `agent_name`), so
    /// display code goes through the accessors.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct AgentProfile {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub agent_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub welcome_message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub agent_welcome_message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub prompt: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub language: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub voice: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub sales_approach: Option<String>,
    }

    impl AgentProfile {
        pub fn display_name(&self) -> Option<&str> {
            self.name.as_deref().or(self.agent_name.as_deref())
        }

        pub fn greeting(&self) -> Option<&str> {
            self.welcome_message
                .as_deref()
                .or(self.agent_welcome_message.as_deref())
        }
    }
}
pub use agent::*;
