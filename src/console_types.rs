mod auth {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize)]
    pub struct LoginRequest<'a> {
        pub email: &'a str,
        pub password: &'a str,
    }

    #[derive(Debug, Deserialize)]
    pub struct LoginResponse {
        pub token: String,
    }
}
pub use auth::*;

mod call {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize)]
    pub struct ManualCallRequest {
        pub recipient_phone: String,
        pub sender_phone: String,
        pub call_type: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub contact_name: Option<String>,
    }

    /// The echoed `sender_phone` can differ from the requested one when the
    /// server fell back to its default number; callers compare the two.
    #[derive(Debug, Deserialize)]
    pub struct ManualCallResponse {
        pub call_sid: String,
        pub sender_phone: String,
        #[serde(default)]
        pub status: Option<String>,
    }
}
pub use call::*;

mod org {
    use serde::{Deserialize, Serialize};
    use serde_json::{Map, Value};

    /// Organization-creation body.  Contact details go out under both
    /// spellings the backend has used (`email`/`contact_email`,
    /// `phone`/`contact_phone`) so either revision accepts the request.
    #[derive(Debug, Clone, Serialize)]
    pub struct OrganizationRequest {
        pub name: String,
        #[serde(rename = "type")]
        pub org_type: String,
        pub status: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub email: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub contact_email: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub phone: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub contact_phone: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub address: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
    }

    impl OrganizationRequest {
        pub fn new(
            name: impl Into<String>,
            org_type: impl Into<String>,
            status: impl Into<String>,
        ) -> Self {
            Self {
                name: name.into(),
                org_type: org_type.into(),
                status: status.into(),
                email: None,
                contact_email: None,
                phone: None,
                contact_phone: None,
                address: None,
                description: None,
            }
        }

        /// Duplicate the contact details under both field spellings.
        pub fn with_contact(mut self, email: Option<String>, phone: Option<String>) -> Self {
            self.contact_email = email.clone();
            self.email = email;
            self.contact_phone = phone.clone();
            self.phone = phone;
            self
        }
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OrganizationCreated {
        pub organization: Organization,
    }

    /// Typed where the contract is firm; whatever else the backend attaches
    /// (id, owner, contact columns) rides along in `extra` for display.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Organization {
        pub name: String,
        #[serde(rename = "type")]
        pub org_type: String,
        pub status: String,
        #[serde(flatten)]
        pub extra: Map<String, Value>,
    }
}
pub use org::*;

mod order {
    use serde::{Deserialize, Serialize};

    /// Order-creation body.  `amount` is integer minor units (paise) end to
    /// end; nothing in this crate multiplies or divides it.
    #[derive(Debug, Clone, Serialize)]
    pub struct OrderRequest {
        pub amount: u64,
        pub currency: String,
        pub phone_number: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct OrderResponse {
        pub order_id: String,
        pub amount: u64,
        #[serde(default)]
        pub currency: Option<String>,
    }
}
pub use order::*;
