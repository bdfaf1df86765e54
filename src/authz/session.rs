use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::client::{send_as, ApiRequest, Transport};
use crate::error::Result;

/// Read-only view of the current user's session, as consumed by the
/// permission engine.
pub trait SessionSource: Send + Sync {
    fn is_administrator(&self) -> bool;

    /// The granted identifiers as the authentication layer delivered them
    fn granted_permissions(&self) -> Arc<Vec<String>>;

    /// Bumped on every login, logout and permission refresh
    fn generation(&self) -> u64;
}

/// Who the server says the current user is
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[derive(Debug, Default)]
struct SessionState {
    username: Option<String>,
    is_admin: bool,
    permissions: Arc<Vec<String>>,
}

/// In-process session holder. Every change swaps in a new permission list
/// and bumps the generation; readers never see a list mutated in place.
#[derive(Debug, Default)]
pub struct SessionStore {
    state: RwLock<SessionState>,
    generation: AtomicU64,
}

impl SessionStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn login(&self, user: SessionUser) {
        tracing::debug!(user = %user.username, admin = user.is_admin, "session login");
        self.replace(SessionState {
            username: Some(user.username),
            is_admin: user.is_admin,
            permissions: Arc::new(user.permissions),
        });
    }

    /// New permission list from the server for the same user
    pub fn refresh_permissions(&self, permissions: Vec<String>) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.permissions = Arc::new(permissions);
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn logout(&self) {
        tracing::debug!("session logout");
        self.replace(SessionState::default());
    }

    pub fn username(&self) -> Option<String> {
        self.state.read().unwrap_or_else(|e| e.into_inner()).username.clone()
    }

    fn replace(&self, next: SessionState) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        *state = next;
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

impl SessionSource for SessionStore {
    fn is_administrator(&self) -> bool {
        self.state.read().unwrap_or_else(|e| e.into_inner()).is_admin
    }

    fn granted_permissions(&self) -> Arc<Vec<String>> {
        self.state.read().unwrap_or_else(|e| e.into_inner()).permissions.clone()
    }

    fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

/// Load the current user's resolved session from the server
pub async fn fetch_session(transport: &dyn Transport) -> Result<SessionUser> {
    send_as(transport, ApiRequest::get("/api/auth/whoami")).await
}
