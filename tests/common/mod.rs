#![allow(dead_code)]

use std::collections::HashMap;
use std::process::{Command, Output};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::Json;
use serde_json::{Value, json};
use tokio::sync::broadcast;

use flowgate::endpoint::Endpoint;
use flowgate::remote::RemoteClient;

pub const SESSION: &str = "sess-1";

/// Backend data plus everything the tests want to assert on.
#[derive(Default)]
pub struct MockState {
    pub me: Value,
    pub users: Vec<Value>,
    pub workflows: Vec<Value>,
    pub executions: Vec<Value>,
    pub grants: Vec<Value>,
    pub logs: Vec<Value>,
    pub instances: Vec<Value>,
    pub public_instances: Vec<Value>,
    /// Wraps collection bodies as `{ <key>: [...] }` when set.
    pub envelope: Option<&'static str>,
    /// `"METHOD /path"` -> (status, optional `error` text).
    pub failures: HashMap<String, (u16, Option<String>)>,
    /// `"METHOD /path?query"` for every request, in arrival order.
    pub requests: Vec<String>,
    pub bodies: Vec<(String, Value)>,
    next_id: u64,
}

impl MockState {
    fn fixture() -> Self {
        let admin = json!({"id": "u1", "email": "admin@khalti.com", "role": "superadmin"});
        Self {
            me: admin.clone(),
            users: vec![
                admin,
                json!({"id": "u2", "email": "alice@khalti.com", "role": "user"}),
                json!({"id": "u3", "email": "carol@khalti.com", "role": "user"}),
            ],
            workflows: vec![
                json!({"id": "mktg:100", "name": "Welcome Email", "active": true}),
                json!({"id": "mktg:101", "name": "Promo", "active": false}),
                json!({"id": "ops:5", "name": "Backup", "active": true}),
                json!({"id": 7, "name": "Nightly Sync", "active": true}),
            ],
            executions: vec![
                json!({"id": "mktg:9001", "workflowId": "mktg:100", "status": "success", "finished": true}),
                json!({"id": "mktg:9002", "workflowId": "mktg:100", "status": "error", "finished": true}),
                json!({"id": 9003, "workflowId": 7, "finished": false}),
            ],
            grants: vec![
                json!({"user_id": "u2", "workflow_id": "mktg:100"}),
                json!({"user_id": "u3", "workflow_id": "ops:5"}),
            ],
            logs: vec![
                json!({"id": "l1", "user_id": "u2", "action": "Visited Dashboard", "timestamp": "2024-05-01T10:00:00Z"}),
            ],
            instances: vec![
                json!({"id": "i1", "identifier": "mktg", "name": "Marketing", "base_url": "https://mktg.example", "active": true}),
            ],
            public_instances: vec![json!({"prefix": "mktg", "name": "Marketing"})],
            ..Self::default()
        }
    }

    fn fresh_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    fn list(&self, rows: &[Value]) -> Value {
        let rows = Value::Array(rows.to_vec());
        match self.envelope {
            Some(key) => {
                let mut wrapped = serde_json::Map::new();
                wrapped.insert(key.to_string(), rows);
                Value::Object(wrapped)
            }
            None => rows,
        }
    }

    pub fn grant_pairs(&self) -> Vec<(String, String)> {
        let mut out: Vec<(String, String)> = self
            .grants
            .iter()
            .map(|g| {
                (
                    g["user_id"].as_str().unwrap_or_default().to_string(),
                    match &g["workflow_id"] {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    },
                )
            })
            .collect();
        out.sort();
        out
    }
}

type Shared = Arc<Mutex<MockState>>;

pub struct MockServer {
    pub base_url: String,
    state: Shared,
    sync: broadcast::Sender<String>,
    _rt: tokio::runtime::Runtime,
}

impl MockServer {
    pub fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn requests(&self) -> Vec<String> {
        self.state().requests.clone()
    }

    /// Requests whose `"METHOD /path"` starts with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.state()
            .requests
            .iter()
            .filter(|r| r.starts_with(prefix))
            .count()
    }

    pub fn fail(&self, route: &str, status: u16, error: Option<&str>) {
        self.state()
            .failures
            .insert(route.to_string(), (status, error.map(str::to_string)));
    }

    /// Sends a text frame to every connected sync subscriber.
    pub fn push_sync(&self, text: &str) -> usize {
        self.sync.send(text.to_string()).unwrap_or(0)
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint::parse(&self.base_url).expect("mock endpoint")
    }

    pub fn client(&self) -> RemoteClient {
        RemoteClient::new(self.endpoint(), Some(SESSION.to_string())).expect("client")
    }

    pub fn anonymous_client(&self) -> RemoteClient {
        RemoteClient::new(self.endpoint(), None).expect("client")
    }
}

pub fn spawn_mock() -> Result<MockServer> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("build tokio runtime")?;
    let state: Shared = Arc::new(Mutex::new(MockState::fixture()));
    let (sync, _) = broadcast::channel(16);

    let app = Router::new()
        .route("/me", get(me))
        .route("/dashboard", get(dashboard))
        .route("/workflows", get(workflows))
        .route("/executions", get(executions))
        .route("/instances", get(public_instances))
        .route("/admin/users", get(users).post(create_user))
        .route("/admin/users/role", post(set_role))
        .route("/admin/workflow-access", get(grants))
        .route("/admin/workflow-access/grant-bulk", post(grant_bulk))
        .route("/admin/workflow-access/revoke-bulk", post(revoke_bulk))
        .route("/admin/action-logs", get(action_logs))
        .route("/admin/instances", get(instances).post(create_instance))
        .route(
            "/admin/instances/:id",
            put(update_instance).delete(delete_instance),
        )
        .route("/auth/logout", post(logout))
        .route("/log-action", post(log_action))
        .route("/ws/n8n", get(ws_upgrade))
        .layer(middleware::from_fn_with_state(state.clone(), gate))
        .with_state(AppState {
            data: state.clone(),
            sync: sync.clone(),
        });

    let listener = rt
        .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
        .context("bind mock listener")?;
    let addr = listener.local_addr().context("mock local addr")?;
    rt.spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(MockServer {
        base_url: format!("http://{}", addr),
        state,
        sync,
        _rt: rt,
    })
}

#[derive(Clone)]
struct AppState {
    data: Shared,
    sync: broadcast::Sender<String>,
}

fn lock(s: &Shared) -> MutexGuard<'_, MockState> {
    s.lock().unwrap_or_else(|e| e.into_inner())
}

fn has_session(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .any(|c| c.trim() == format!("token={}", SESSION))
}

/// Records the request, enforces the session cookie and injects failures.
async fn gate(State(state): State<Shared>, req: Request, next: Next) -> Response {
    let target = req
        .uri()
        .path_and_query()
        .map(|p| p.as_str().to_string())
        .unwrap_or_default();
    let route = format!("{} {}", req.method(), req.uri().path());
    let failure = {
        let mut st = lock(&state);
        st.requests.push(format!("{} {}", req.method(), target));
        st.failures.get(&route).cloned()
    };

    if !has_session(req.headers()) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "Unauthorized"}))).into_response();
    }
    if let Some((status, error)) = failure {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return match error {
            Some(msg) => (status, Json(json!({ "error": msg }))).into_response(),
            None => (status, "upstream exploded").into_response(),
        };
    }
    next.run(req).await
}

async fn me(State(s): State<AppState>) -> Json<Value> {
    Json(lock(&s.data).me.clone())
}

async fn dashboard() -> Json<Value> {
    Json(json!({"message": "Welcome to the dashboard"}))
}

async fn workflows(State(s): State<AppState>) -> Json<Value> {
    let st = lock(&s.data);
    Json(st.list(&st.workflows))
}

async fn executions(State(s): State<AppState>) -> Json<Value> {
    let st = lock(&s.data);
    Json(st.list(&st.executions))
}

async fn public_instances(State(s): State<AppState>) -> Json<Value> {
    let st = lock(&s.data);
    Json(st.list(&st.public_instances))
}

async fn users(State(s): State<AppState>) -> Json<Value> {
    let st = lock(&s.data);
    Json(st.list(&st.users))
}

async fn grants(State(s): State<AppState>) -> Json<Value> {
    let st = lock(&s.data);
    Json(st.list(&st.grants))
}

async fn action_logs(State(s): State<AppState>) -> Json<Value> {
    let st = lock(&s.data);
    Json(st.list(&st.logs))
}

async fn instances(State(s): State<AppState>) -> Json<Value> {
    let st = lock(&s.data);
    Json(st.list(&st.instances))
}

async fn create_user(State(s): State<AppState>, Json(body): Json<Value>) -> Json<Value> {
    let mut st = lock(&s.data);
    st.bodies.push(("POST /admin/users".to_string(), body.clone()));
    let id = st.fresh_id("u");
    let user = json!({"id": id, "email": body["email"], "role": "user"});
    st.users.push(user.clone());
    Json(user)
}

async fn set_role(State(s): State<AppState>, Json(body): Json<Value>) -> Json<Value> {
    let mut st = lock(&s.data);
    st.bodies.push(("POST /admin/users/role".to_string(), body.clone()));
    for u in st.users.iter_mut() {
        if u["id"] == body["user_id"] {
            u["role"] = body["role"].clone();
        }
    }
    Json(json!({"success": true}))
}

async fn grant_bulk(State(s): State<AppState>, Json(body): Json<Value>) -> Json<Value> {
    let mut st = lock(&s.data);
    st.bodies.push(("POST grant-bulk".to_string(), body.clone()));
    let ids = body["workflow_ids"].as_array().cloned().unwrap_or_default();
    let mut granted = 0;
    for id in &ids {
        let exists = st
            .grants
            .iter()
            .any(|g| g["user_id"] == body["user_id"] && &g["workflow_id"] == id);
        if !exists {
            st.grants
                .push(json!({"user_id": body["user_id"], "workflow_id": id}));
            granted += 1;
        }
    }
    Json(json!({
        "granted": granted,
        "skipped": ids.len() - granted,
        "total_requested": ids.len(),
    }))
}

async fn revoke_bulk(State(s): State<AppState>, Json(body): Json<Value>) -> Json<Value> {
    let mut st = lock(&s.data);
    st.bodies.push(("POST revoke-bulk".to_string(), body.clone()));
    let ids = body["workflow_ids"].as_array().cloned().unwrap_or_default();
    let before = st.grants.len();
    st.grants
        .retain(|g| !(g["user_id"] == body["user_id"] && ids.contains(&g["workflow_id"])));
    Json(json!({"revoked": before - st.grants.len(), "total_requested": ids.len()}))
}

async fn create_instance(State(s): State<AppState>, Json(body): Json<Value>) -> Json<Value> {
    let mut st = lock(&s.data);
    st.bodies.push(("POST /admin/instances".to_string(), body.clone()));
    let id = st.fresh_id("i");
    let created = json!({
        "id": id,
        "identifier": body["identifier"],
        "name": body["name"],
        "base_url": body["base_url"],
        "active": body["active"],
    });
    st.instances.push(created.clone());
    Json(created)
}

/// Answers with an empty body, as the proxy does.
async fn update_instance(
    State(s): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> StatusCode {
    let mut st = lock(&s.data);
    st.bodies.push((format!("PUT /admin/instances/{}", id), body.clone()));
    let Some(inst) = st.instances.iter_mut().find(|i| i["id"] == id.as_str()) else {
        return StatusCode::NOT_FOUND;
    };
    if let (Some(target), Some(patch)) = (inst.as_object_mut(), body.as_object()) {
        for (k, v) in patch {
            target.insert(k.clone(), v.clone());
        }
    }
    StatusCode::OK
}

async fn delete_instance(State(s): State<AppState>, Path(id): Path<String>) -> StatusCode {
    let mut st = lock(&s.data);
    st.instances.retain(|i| i["id"] != id.as_str());
    StatusCode::NO_CONTENT
}

async fn logout() -> Json<Value> {
    Json(json!({"success": true}))
}

async fn log_action(State(s): State<AppState>, Json(body): Json<Value>) -> Json<Value> {
    let mut st = lock(&s.data);
    let id = st.fresh_id("l");
    let user_id = st.me["id"].clone();
    st.logs
        .push(json!({"id": id, "user_id": user_id, "action": body["action"]}));
    Json(json!({"success": true}))
}

async fn ws_upgrade(State(s): State<AppState>, ws: WebSocketUpgrade) -> Response {
    let rx = s.sync.subscribe();
    ws.on_upgrade(move |socket| forward_sync(socket, rx))
}

async fn forward_sync(mut socket: WebSocket, mut rx: broadcast::Receiver<String>) {
    while let Ok(text) = rx.recv().await {
        if socket.send(Message::Text(text)).await.is_err() {
            break;
        }
    }
}

/// Runs the built binary with its store under `home`.
pub fn run_flowgate(home: &std::path::Path, api_url: Option<&str>, args: &[&str]) -> Result<Output> {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_flowgate"));
    cmd.env("FLOWGATE_HOME", home)
        .env_remove("FLOWGATE_API_URL")
        .env_remove("FLOWGATE_HOST")
        .env("FLOWGATE_LOG", "off");
    if let Some(url) = api_url {
        cmd.args(["--api-url", url]);
    }
    cmd.args(args)
        .output()
        .with_context(|| format!("run flowgate {:?}", args))
}

pub fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).to_string()
}

pub fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).to_string()
}
