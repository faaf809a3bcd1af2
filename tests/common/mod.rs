//! In-process fake of the PBX OpenAPI used by the integration tests.

#![allow(dead_code)]

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use pbx_dashboard::api::{Clock, PbxClient};
use pbx_dashboard::auth::Credentials;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};
use tokio::sync::Notify;

pub const USERNAME: &str = "client-id";
pub const PASSWORD: &str = "client-secret";

#[derive(Debug, Clone, Default)]
pub struct SeenRequest {
    pub authorization: Option<String>,
    pub user_agent: Option<String>,
    pub content_type: Option<String>,
}

impl SeenRequest {
    fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        Self {
            authorization: header("authorization"),
            user_agent: header("user-agent"),
            content_type: header("content-type"),
        }
    }
}

#[derive(Default)]
struct FakeState {
    token_requests: AtomicUsize,
    system_requests: AtomicUsize,
    extension_requests: AtomicUsize,
    /// `None` issues `token-<n>` with errcode 0
    token_reply: Mutex<Option<Value>>,
    system_reply: Mutex<Option<(StatusCode, Value)>>,
    extension_reply: Mutex<Option<(StatusCode, Value)>>,
    last_token_body: Mutex<Option<Value>>,
    last_token_request: Mutex<SeenRequest>,
    last_system_request: Mutex<SeenRequest>,
    last_extension_request: Mutex<SeenRequest>,
    /// Signalled every time the system information handler is entered
    system_entered: Notify,
    /// While set, system information replies wait for a notification
    system_gate: Mutex<Option<Arc<Notify>>>,
}

pub struct FakePbx {
    pub base_url: String,
    state: Arc<FakeState>,
}

pub fn default_system_info() -> Value {
    json!({
        "errcode": 0,
        "errmsg": "SUCCESS",
        "device_name": "PBX-01",
        "firmware_version": "37.12.0.5",
        "sn": "3631A1234567",
        "max_call_count": 60
    })
}

pub fn default_extensions() -> Value {
    json!({
        "errcode": 0,
        "errmsg": "SUCCESS",
        "total_number": 3,
        "extension": [
            {"id": 1, "number": "1000", "caller_id_name": "Alice", "online_status": {"sip_phone": true}},
            {"id": 2, "number": "1001", "caller_id_name": "Bob"},
            {"id": 3, "number": "1002", "email_addr": "carol@example.com"}
        ]
    })
}

impl FakePbx {
    pub async fn start() -> Self {
        let state = Arc::new(FakeState::default());

        let router = Router::new()
            .route("/openapi/v1.0/get_token", post(get_token))
            .route("/openapi/v1.0/system/information", get(system_information))
            .route("/openapi/v1.0/extension/list", get(extension_list))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn client(&self) -> PbxClient {
        PbxClient::new(credentials(&self.base_url)).unwrap()
    }

    pub fn token_requests(&self) -> usize {
        self.state.token_requests.load(Ordering::SeqCst)
    }

    pub fn system_requests(&self) -> usize {
        self.state.system_requests.load(Ordering::SeqCst)
    }

    pub fn extension_requests(&self) -> usize {
        self.state.extension_requests.load(Ordering::SeqCst)
    }

    pub fn set_token_reply(&self, reply: Value) {
        *self.state.token_reply.lock().unwrap() = Some(reply);
    }

    pub fn reset_token_reply(&self) {
        *self.state.token_reply.lock().unwrap() = None;
    }

    pub fn set_system_reply(&self, status: StatusCode, body: Value) {
        *self.state.system_reply.lock().unwrap() = Some((status, body));
    }

    pub fn set_extension_reply(&self, status: StatusCode, body: Value) {
        *self.state.extension_reply.lock().unwrap() = Some((status, body));
    }

    /// Make system information requests wait until `release_system_info`
    pub fn hold_system_info(&self) {
        *self.state.system_gate.lock().unwrap() = Some(Arc::new(Notify::new()));
    }

    pub fn release_system_info(&self) {
        if let Some(gate) = self.state.system_gate.lock().unwrap().take() {
            gate.notify_one();
        }
    }

    /// Resolves once a system information request has reached the fake
    pub async fn system_info_entered(&self) {
        self.state.system_entered.notified().await;
    }

    pub fn last_token_body(&self) -> Option<Value> {
        self.state.last_token_body.lock().unwrap().clone()
    }

    pub fn last_token_request(&self) -> SeenRequest {
        self.state.last_token_request.lock().unwrap().clone()
    }

    pub fn last_system_request(&self) -> SeenRequest {
        self.state.last_system_request.lock().unwrap().clone()
    }

    pub fn last_extension_request(&self) -> SeenRequest {
        self.state.last_extension_request.lock().unwrap().clone()
    }
}

async fn get_token(
    State(state): State<Arc<FakeState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    let n = state.token_requests.fetch_add(1, Ordering::SeqCst) + 1;
    *state.last_token_body.lock().unwrap() = Some(body);
    *state.last_token_request.lock().unwrap() = SeenRequest::from_headers(&headers);

    let reply = state.token_reply.lock().unwrap().clone();
    Json(reply.unwrap_or_else(|| {
        json!({
            "errcode": 0,
            "errmsg": "SUCCESS",
            "access_token_expire_time": 1800,
            "access_token": format!("token-{}", n),
            "refresh_token_expire_time": 86400,
            "refresh_token": format!("refresh-{}", n)
        })
    }))
}

async fn system_information(
    State(state): State<Arc<FakeState>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    state.system_requests.fetch_add(1, Ordering::SeqCst);
    *state.last_system_request.lock().unwrap() = SeenRequest::from_headers(&headers);
    state.system_entered.notify_one();

    let gate = state.system_gate.lock().unwrap().clone();
    if let Some(gate) = gate {
        gate.notified().await;
    }

    let reply = state.system_reply.lock().unwrap().clone();
    let (status, body) = reply.unwrap_or_else(|| (StatusCode::OK, default_system_info()));
    (status, Json(body))
}

async fn extension_list(
    State(state): State<Arc<FakeState>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    state.extension_requests.fetch_add(1, Ordering::SeqCst);
    *state.last_extension_request.lock().unwrap() = SeenRequest::from_headers(&headers);

    let reply = state.extension_reply.lock().unwrap().clone();
    let (status, body) = reply.unwrap_or_else(|| (StatusCode::OK, default_extensions()));
    (status, Json(body))
}

pub fn credentials(base_url: &str) -> Credentials {
    Credentials::new(
        base_url.to_string(),
        USERNAME.to_string(),
        PASSWORD.to_string(),
    )
    .unwrap()
}

/// Base URL nothing listens on
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Clock the tests move by hand
pub struct ManualClock {
    now: Mutex<SystemTime>,
}

impl ManualClock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000)),
        })
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> SystemTime {
        *self.now.lock().unwrap()
    }
}
