#![allow(dead_code)]

use std::collections::HashMap;
use std::net::TcpListener as StdTcpListener;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::sync::oneshot;
use uuid::Uuid;

use callops::config::{BolnaConfig, Config, ConsoleConfig, FallbackBinding, SupabaseConfig};
use callops::types::AppState;

pub const STUB_EMAIL: &str = "ops@example.test";
pub const STUB_PASSWORD: &str = "not-a-real-password";
pub const STUB_TOKEN: &str = "token-abc123";
pub const DEFAULT_SENDER: &str = "+918035743222";
pub const DEFAULT_AGENT: &str = "15554373-b8e1-4b00-8c25-c4742dc8e480";

/// One row of the stub's in-memory users table.
#[derive(Debug, Clone)]
pub struct StubUser {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub sender_phone: Option<String>,
    pub bolna_agent_id: Option<String>,
}

impl StubUser {
    pub fn admin(email: &str, sender_phone: Option<&str>, agent_id: Option<&str>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.to_string(),
            role: "admin".to_string(),
            sender_phone: sender_phone.map(str::to_string),
            bolna_agent_id: agent_id.map(str::to_string),
        }
    }

    fn as_row(&self) -> Value {
        json!({
            "id": self.id,
            "email": self.email,
            "role": self.role,
            "sender_phone": self.sender_phone,
            "bolna_agent_id": self.bolna_agent_id,
        })
    }
}

/// Shared state of the stub backend.  Requests are captured verbatim so tests
/// can assert on exactly what went over the wire, and the users table is
/// mutable so table updates are visible to later selects.
#[derive(Default)]
pub struct StubState {
    pub users: Mutex<Vec<StubUser>>,
    pub patches: Mutex<Vec<(Uuid, Value)>>,
    pub vendor_calls: Mutex<Vec<Value>>,
    pub manual_calls: Mutex<Vec<Value>>,
    pub organizations: Mutex<Vec<Value>>,
    pub orders: Mutex<Vec<Value>>,
    pub fail_vendor_call: AtomicBool,
    pub legacy_vendor_response: AtomicBool,
    pub fail_patch_for: Mutex<Vec<Uuid>>,
}

/// In-process server standing in for all three backends at once: the hosted
/// table's REST surface, the voice vendor's `/call`, and the dev console.
/// The paths do not collide, so one listener serves them all.
pub struct StubBackend {
    pub state: Arc<StubState>,
    base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
    join: Option<thread::JoinHandle<()>>,
}

impl StubBackend {
    pub fn spawn(users: Vec<StubUser>) -> Self {
        let state = Arc::new(StubState {
            users: Mutex::new(users),
            ..StubState::default()
        });

        let listener = StdTcpListener::bind("127.0.0.1:0").expect("stub bind failed");
        listener
            .set_nonblocking(true)
            .expect("stub listener nonblocking failed");
        let addr = listener.local_addr().expect("stub local addr failed");
        let base_url = format!("http://{addr}");

        let app = Router::new()
            .route("/rest/v1/users", get(table_select).patch(table_update))
            .route("/call", post(vendor_call))
            .route("/api/auth/login", post(console_login))
            .route(
                "/api/bolna/agents/:agent_id/details",
                get(console_agent_details),
            )
            .route("/api/manual-call", post(console_manual_call))
            .route("/api/organizations", post(console_organizations))
            .route("/api/create-razorpay-order", post(console_create_order))
            .with_state(Arc::clone(&state));

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let join = thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("stub runtime failed");
            runtime.block_on(async move {
                let server = axum::Server::from_tcp(listener)
                    .expect("stub server failed")
                    .serve(app.into_make_service())
                    .with_graceful_shutdown(async move {
                        let _ = shutdown_rx.await;
                    });
                let _ = server.await;
            });
        });

        Self {
            state,
            base_url,
            shutdown: Some(shutdown_tx),
            join: Some(join),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Config pointing every backend section at this stub.
    pub fn config(&self) -> Config {
        Config {
            bolna: Some(BolnaConfig {
                base_url: self.base_url.clone(),
                api_key: "test-key".to_string(),
            }),
            supabase: Some(SupabaseConfig {
                url: self.base_url.clone(),
                service_key: "service-key".to_string(),
            }),
            console: Some(ConsoleConfig {
                base_url: self.base_url.clone(),
                email: STUB_EMAIL.to_string(),
                password: STUB_PASSWORD.to_string(),
            }),
            fallback: FallbackBinding {
                sender_phone: DEFAULT_SENDER.to_string(),
                agent_id: DEFAULT_AGENT.to_string(),
            },
            http_timeout: Duration::from_secs(5),
        }
    }

    pub fn app_state(&self) -> AppState {
        AppState::new(self.config()).expect("app state failed")
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

fn filter_value<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params.get(key).and_then(|value| value.strip_prefix("eq."))
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value == format!("Bearer {STUB_TOKEN}"))
        .unwrap_or(false)
}

async fn table_select(
    State(state): State<Arc<StubState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let users = state.users.lock().unwrap();
    let mut rows: Vec<Value> = users
        .iter()
        .filter(|user| filter_value(&params, "role").map_or(true, |role| user.role == role))
        .filter(|user| {
            filter_value(&params, "sender_phone")
                .map_or(true, |phone| user.sender_phone.as_deref() == Some(phone))
        })
        .map(StubUser::as_row)
        .collect();
    if let Some(limit) = params.get("limit").and_then(|value| value.parse().ok()) {
        rows.truncate(limit);
    }
    Json(Value::Array(rows))
}

async fn table_update(
    State(state): State<Arc<StubState>>,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> StatusCode {
    let Some(id) = filter_value(&params, "id").and_then(|value| Uuid::parse_str(value).ok())
    else {
        return StatusCode::BAD_REQUEST;
    };
    if state.fail_patch_for.lock().unwrap().contains(&id) {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }

    let mut users = state.users.lock().unwrap();
    let Some(user) = users.iter_mut().find(|user| user.id == id) else {
        return StatusCode::NOT_FOUND;
    };
    if let Some(phone) = body.get("sender_phone").and_then(Value::as_str) {
        user.sender_phone = Some(phone.to_string());
    }
    if let Some(agent) = body.get("bolna_agent_id").and_then(Value::as_str) {
        user.bolna_agent_id = Some(agent.to_string());
    }
    state.patches.lock().unwrap().push((id, body));
    StatusCode::NO_CONTENT
}

async fn vendor_call(
    State(state): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.vendor_calls.lock().unwrap().push(body);
    if state.fail_vendor_call.load(Ordering::SeqCst) {
        return (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "error": "telephony upstream unavailable" })),
        );
    }
    if state.legacy_vendor_response.load(Ordering::SeqCst) {
        return (
            StatusCode::OK,
            Json(json!({ "message": "Call enqueued", "execution_id": "exec-legacy-1" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({ "call_id": "call-stub-1", "status": "queued" })),
    )
}

async fn console_login(
    State(_state): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let email = body.get("email").and_then(Value::as_str);
    let password = body.get("password").and_then(Value::as_str);
    if email == Some(STUB_EMAIL) && password == Some(STUB_PASSWORD) {
        (StatusCode::OK, Json(json!({ "token": STUB_TOKEN })))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "invalid credentials" })),
        )
    }
}

async fn console_agent_details(
    State(_state): State<Arc<StubState>>,
    Path(agent_id): Path<String>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "missing bearer token" })),
        );
    }
    // Vendor-shaped payload: `agent_name`, not `name`.
    (
        StatusCode::OK,
        Json(json!({
            "agent_name": format!("Agent {agent_id}"),
            "agent_welcome_message": "Hello! Calling from the demo desk.",
            "prompt": "You are a polite sales agent.",
            "language": "hi",
            "voice": "female-1",
            "sales_approach": "consultative",
        })),
    )
}

async fn console_manual_call(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "missing bearer token" })),
        );
    }
    state.manual_calls.lock().unwrap().push(body.clone());

    let requested = body
        .get("sender_phone")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let bound = {
        let users = state.users.lock().unwrap();
        users.iter().any(|user| {
            user.sender_phone.as_deref() == Some(requested) && user.bolna_agent_id.is_some()
        })
    };
    let sender = if bound { requested } else { DEFAULT_SENDER };
    (
        StatusCode::OK,
        Json(json!({
            "call_sid": "manual-stub-1",
            "sender_phone": sender,
            "status": "queued",
        })),
    )
}

async fn console_organizations(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "missing bearer token" })),
        );
    }
    state.organizations.lock().unwrap().push(body.clone());

    let organization = json!({
        "id": Uuid::new_v4(),
        "name": body.get("name").cloned().unwrap_or(Value::Null),
        "type": body.get("type").cloned().unwrap_or(Value::Null),
        "status": body.get("status").cloned().unwrap_or(Value::Null),
        "user_id": 7,
    });
    (
        StatusCode::CREATED,
        Json(json!({ "organization": organization })),
    )
}

async fn console_create_order(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "missing bearer token" })),
        );
    }
    state.orders.lock().unwrap().push(body.clone());

    // Echo the paise amount untouched.
    (
        StatusCode::OK,
        Json(json!({
            "order_id": "order_stub_0001",
            "amount": body.get("amount").cloned().unwrap_or(Value::Null),
            "currency": body.get("currency").cloned().unwrap_or(Value::Null),
        })),
    )
}
