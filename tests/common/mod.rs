#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use admin_console::authz::SessionUser;
use admin_console::client::ApiClient;
use admin_console::models::{
    Menu, MenuFilter, MenuForm, MenuId, MenuType, Permission, PermissionAssignment,
    PermissionType, Role, RoleForm, RoleId, RoleMenuTree, RoleQuery, RoleUpdate,
};
use admin_console::tree::TreeBuilder;
use admin_console::types::{IdList, Page, Status, Visibility};
use anyhow::{Context, Result};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

/// In-memory admin API state
#[derive(Debug)]
pub struct FakeState {
    pub menus: Vec<Menu>,
    pub roles: Vec<Role>,
    pub catalogue: Vec<Permission>,
    pub role_permissions: HashMap<RoleId, Vec<String>>,
    pub whoami: SessionUser,
    next_menu_id: MenuId,
    next_role_id: RoleId,
}

pub type Shared = Arc<Mutex<FakeState>>;

impl FakeState {
    fn seeded() -> Self {
        let menus = vec![
            MenuForm::new("System", MenuType::Directory).ordered(1).into_menu(1),
            MenuForm::new("Users", MenuType::Menu)
                .under(1)
                .ordered(1)
                .with_perms("system:user:list")
                .into_menu(2),
            MenuForm::new("Add user", MenuType::Button)
                .under(2)
                .ordered(1)
                .with_perms("system:user:add")
                .into_menu(3),
            MenuForm::new("Roles", MenuType::Menu)
                .under(1)
                .ordered(2)
                .with_perms("system:role:list")
                .into_menu(4),
            {
                let mut monitor = MenuForm::new("Monitor", MenuType::Directory).ordered(2);
                monitor.visible = Visibility::Hidden;
                monitor.into_menu(5)
            },
        ];

        let role = |id: RoleId, name: &str, key: &str| Role {
            id,
            name: name.to_string(),
            key: key.to_string(),
            sort: id,
            status: Status::Normal,
            remark: None,
            created_at: Some(chrono::Utc::now()),
        };

        let permission = |id: &str, key: &str, kind: PermissionType, parent: Option<&str>| {
            Permission {
                id: id.to_string(),
                name: key.rsplit(':').next().unwrap_or(key).to_string(),
                key: key.to_string(),
                permission_type: kind,
                parent_id: parent.map(str::to_string),
            }
        };

        let mut role_permissions = HashMap::new();
        role_permissions.insert(2, vec!["101".to_string(), "103".to_string()]);

        Self {
            menus,
            roles: vec![
                role(1, "Administrator", "admin"),
                role(2, "Editor", "editor"),
                role(3, "Auditor", "auditor"),
            ],
            catalogue: vec![
                permission("101", "system:user:list", PermissionType::Menu, None),
                permission("102", "system:user:add", PermissionType::Button, Some("101")),
                permission("103", "system:role:list", PermissionType::Menu, None),
            ],
            role_permissions,
            whoami: SessionUser {
                username: "editor".to_string(),
                is_admin: false,
                permissions: vec!["system:user:list".to_string(), "system:role:list".to_string()],
            },
            next_menu_id: 100,
            next_role_id: 100,
        }
    }

    fn permission_keys(&self, role_id: RoleId) -> Vec<String> {
        self.role_permissions
            .get(&role_id)
            .map(|ids| {
                ids.iter()
                    .map(|id| {
                        self.catalogue
                            .iter()
                            .find(|p| &p.id == id)
                            .map(|p| p.key.clone())
                            .unwrap_or_else(|| id.clone())
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

pub struct FakeServer {
    pub base_url: String,
    pub state: Shared,
}

impl FakeServer {
    pub fn client(&self) -> Arc<ApiClient> {
        let token = Some("test-token".to_string());
        Arc::new(ApiClient::new(&self.base_url, token, Duration::from_secs(5)).expect("client"))
    }
}

/// Start a fresh fake admin API on an unused port for the current test runtime
pub async fn spawn_server() -> Result<FakeServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("failed to bind {}", base_url))?;

    let state: Shared = Arc::new(Mutex::new(FakeState::seeded()));
    let app = router(state.clone());

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(FakeServer { base_url, state })
}

/// Base URL of a port nobody listens on
pub fn unreachable_url() -> Result<String> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    Ok(format!("http://127.0.0.1:{}", port))
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/auth/whoami", get(whoami))
        .route("/api/system/menu", get(menu_list).post(menu_create).delete(menu_batch_delete))
        .route("/api/system/menu/:id", get(menu_get).put(menu_update).delete(menu_delete))
        .route("/api/system/role", get(role_list).post(role_create).delete(role_batch_delete))
        .route("/api/system/role/:id", get(role_get).patch(role_update).delete(role_delete))
        .route(
            "/api/system/role/:id/permissions",
            get(role_permissions_get).put(role_permissions_put),
        )
        .route("/api/system/role/:id/menu-tree", get(role_menu_tree))
        .route("/api/system/permission", get(permission_list))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

fn ok(status: StatusCode, data: impl serde::Serialize) -> Response {
    (status, Json(json!({ "success": true, "data": data }))).into_response()
}

fn error(status: StatusCode, code: &str, message: String) -> Response {
    (status, Json(json!({ "error": true, "message": message, "code": code }))).into_response()
}

fn not_found(what: &str, id: impl std::fmt::Display) -> Response {
    error(StatusCode::NOT_FOUND, "NOT_FOUND", format!("{} {} not found", what, id))
}

async fn whoami(State(state): State<Shared>) -> Response {
    let state = state.lock().unwrap();
    ok(StatusCode::OK, &state.whoami)
}

async fn menu_list(State(state): State<Shared>, Query(filter): Query<MenuFilter>) -> Response {
    let state = state.lock().unwrap();
    let menus: Vec<&Menu> = state.menus.iter().filter(|m| filter.matches(m)).collect();
    ok(StatusCode::OK, menus)
}

async fn menu_get(State(state): State<Shared>, Path(id): Path<MenuId>) -> Response {
    let state = state.lock().unwrap();
    match state.menus.iter().find(|m| m.menu_id == id) {
        Some(menu) => ok(StatusCode::OK, menu),
        None => not_found("menu", id),
    }
}

async fn menu_create(State(state): State<Shared>, Json(form): Json<MenuForm>) -> Response {
    let mut state = state.lock().unwrap();
    if form.menu_name.trim().is_empty() {
        let message = "menuName is required".to_string();
        return error(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message);
    }
    state.next_menu_id += 1;
    let menu = form.into_menu(state.next_menu_id);
    state.menus.push(menu.clone());
    ok(StatusCode::CREATED, menu)
}

async fn menu_update(
    State(state): State<Shared>,
    Path(id): Path<MenuId>,
    Json(form): Json<MenuForm>,
) -> Response {
    let mut state = state.lock().unwrap();
    if form.parent_id == id {
        let message = "a menu cannot be its own parent".to_string();
        return error(StatusCode::UNPROCESSABLE_ENTITY, "UNPROCESSABLE_ENTITY", message);
    }
    match state.menus.iter_mut().find(|m| m.menu_id == id) {
        Some(menu) => {
            *menu = form.into_menu(id);
            ok(StatusCode::OK, menu.clone())
        }
        None => not_found("menu", id),
    }
}

async fn menu_delete(State(state): State<Shared>, Path(id): Path<MenuId>) -> Response {
    let mut state = state.lock().unwrap();
    let before = state.menus.len();
    state.menus.retain(|m| m.menu_id != id);
    if state.menus.len() == before {
        return not_found("menu", id);
    }
    StatusCode::NO_CONTENT.into_response()
}

/// Deletes what it can, then reports the first missing id
async fn menu_batch_delete(
    State(state): State<Shared>,
    Json(body): Json<IdList<MenuId>>,
) -> Response {
    let mut state = state.lock().unwrap();
    let mut missing = Vec::new();
    for id in body.ids {
        let before = state.menus.len();
        state.menus.retain(|m| m.menu_id != id);
        if state.menus.len() == before {
            missing.push(id);
        }
    }
    match missing.first() {
        Some(id) => not_found("menu", id),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

async fn role_list(State(state): State<Shared>, Query(query): Query<RoleQuery>) -> Response {
    let state = state.lock().unwrap();
    let matching: Vec<&Role> = state.roles.iter().filter(|r| query.matches(r)).collect();
    let page = query.page.unwrap_or(1).max(1);
    let page_size = query.page_size.unwrap_or(10).max(1);
    let items: Vec<Role> = matching
        .iter()
        .skip(((page - 1) * page_size) as usize)
        .take(page_size as usize)
        .map(|r| (*r).clone())
        .collect();
    ok(
        StatusCode::OK,
        Page {
            items,
            total: matching.len() as u64,
            page,
            page_size,
        },
    )
}

async fn role_get(State(state): State<Shared>, Path(id): Path<RoleId>) -> Response {
    let state = state.lock().unwrap();
    match state.roles.iter().find(|r| r.id == id) {
        Some(role) => ok(StatusCode::OK, role),
        None => not_found("role", id),
    }
}

async fn role_create(State(state): State<Shared>, Json(form): Json<RoleForm>) -> Response {
    let mut state = state.lock().unwrap();
    if state.roles.iter().any(|r| r.key == form.key) {
        let message = format!("Role key '{}' already exists", form.key);
        return error(StatusCode::CONFLICT, "CONFLICT", message);
    }
    state.next_role_id += 1;
    let role = Role {
        id: state.next_role_id,
        name: form.name,
        key: form.key,
        sort: form.sort,
        status: form.status,
        remark: form.remark,
        created_at: Some(chrono::Utc::now()),
    };
    state.roles.push(role.clone());
    ok(StatusCode::CREATED, role)
}

async fn role_update(
    State(state): State<Shared>,
    Path(id): Path<RoleId>,
    Json(update): Json<RoleUpdate>,
) -> Response {
    let mut state = state.lock().unwrap();
    if let Some(key) = &update.key {
        if state.roles.iter().any(|r| &r.key == key && r.id != id) {
            let message = format!("Role key '{}' already exists", key);
            return error(StatusCode::CONFLICT, "CONFLICT", message);
        }
    }
    match state.roles.iter_mut().find(|r| r.id == id) {
        Some(role) => {
            update.apply_to(role);
            ok(StatusCode::OK, role.clone())
        }
        None => not_found("role", id),
    }
}

async fn role_delete(State(state): State<Shared>, Path(id): Path<RoleId>) -> Response {
    let mut state = state.lock().unwrap();
    let before = state.roles.len();
    state.roles.retain(|r| r.id != id);
    if state.roles.len() == before {
        return not_found("role", id);
    }
    state.role_permissions.remove(&id);
    StatusCode::NO_CONTENT.into_response()
}

async fn role_batch_delete(
    State(state): State<Shared>,
    Json(body): Json<IdList<RoleId>>,
) -> Response {
    let mut state = state.lock().unwrap();
    let mut missing = Vec::new();
    for id in body.ids {
        let before = state.roles.len();
        state.roles.retain(|r| r.id != id);
        if state.roles.len() == before {
            missing.push(id);
        }
        state.role_permissions.remove(&id);
    }
    match missing.first() {
        Some(id) => not_found("role", id),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

async fn role_permissions_get(State(state): State<Shared>, Path(id): Path<RoleId>) -> Response {
    let state = state.lock().unwrap();
    if !state.roles.iter().any(|r| r.id == id) {
        return not_found("role", id);
    }
    ok(StatusCode::OK, state.permission_keys(id))
}

async fn role_permissions_put(
    State(state): State<Shared>,
    Path(id): Path<RoleId>,
    Json(body): Json<PermissionAssignment>,
) -> Response {
    let mut state = state.lock().unwrap();
    if !state.roles.iter().any(|r| r.id == id) {
        return not_found("role", id);
    }
    state.role_permissions.insert(id, body.permission_ids);
    StatusCode::NO_CONTENT.into_response()
}

async fn role_menu_tree(State(state): State<Shared>, Path(id): Path<RoleId>) -> Response {
    let state = state.lock().unwrap();
    if !state.roles.iter().any(|r| r.id == id) {
        return not_found("role", id);
    }
    let keys = state.permission_keys(id);
    let checked_keys: Vec<MenuId> = state
        .menus
        .iter()
        .filter(|m| m.permission_key().map_or(false, |k| keys.iter().any(|g| g == k)))
        .map(|m| m.menu_id)
        .collect();
    let tree = RoleMenuTree {
        menus: TreeBuilder::new(false).build_options(&state.menus, None),
        checked_keys,
    };
    ok(StatusCode::OK, tree)
}

async fn permission_list(State(state): State<Shared>) -> Response {
    let state = state.lock().unwrap();
    ok(StatusCode::OK, &state.catalogue)
}

/// Snapshot of menu ids currently held by the fake server
pub fn menu_ids(state: &Shared) -> Vec<MenuId> {
    state.lock().unwrap().menus.iter().map(|m| m.menu_id).collect()
}

/// Role keys by id, for assertions
pub fn role_keys(state: &Shared) -> BTreeMap<RoleId, String> {
    state.lock().unwrap().roles.iter().map(|r| (r.id, r.key.clone())).collect()
}

pub fn json_of(value: &impl serde::Serialize) -> Value {
    serde_json::to_value(value).expect("serializable")
}
