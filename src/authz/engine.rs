use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use super::requirement::Requirement;
use super::session::SessionSource;
use crate::models::Menu;

/// Granted set derived from one specific permission list
struct GrantedCache {
    generation: u64,
    source: Arc<Vec<String>>,
    granted: Arc<HashSet<String>>,
}

/// Client-side permission checks for UI affordances.
///
/// The server enforces every permission on its own; a `true` here only
/// means the element may be shown. The granted set is rebuilt when the
/// session's generation or permission list changes and reused otherwise.
pub struct PermissionEngine<S: SessionSource> {
    session: Arc<S>,
    cache: Mutex<Option<GrantedCache>>,
    rebuilds: AtomicU64,
}

impl<S: SessionSource> PermissionEngine<S> {
    pub fn new(session: Arc<S>) -> Self {
        Self {
            session,
            cache: Mutex::new(None),
            rebuilds: AtomicU64::new(0),
        }
    }

    /// True when the user holds at least one of the required identifiers.
    ///
    /// Evaluated in order: no requirement allows; administrators are
    /// allowed unconditionally; an empty granted set denies; otherwise any
    /// match allows.
    pub fn has_permission(&self, required: impl Into<Requirement>) -> bool {
        self.evaluate(&required.into(), |granted, ids| ids.iter().any(|id| granted.contains(id)))
    }

    /// Same as [`has_permission`](Self::has_permission) but every required
    /// identifier must be granted.
    pub fn has_all_permissions(&self, required: impl Into<Requirement>) -> bool {
        self.evaluate(&required.into(), |granted, ids| ids.iter().all(|id| granted.contains(id)))
    }

    /// Permission gate for one menu node, by its `perms` key only. The
    /// node's visible/status flags are left to the caller.
    pub fn permits_menu(&self, menu: &Menu) -> bool {
        self.has_permission(menu.permission_key())
    }

    /// Current granted set, rebuilt only if the session changed
    pub fn granted(&self) -> Arc<HashSet<String>> {
        let generation = self.session.generation();
        let source = self.session.granted_permissions();

        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(cached) = cache.as_ref() {
            if cached.generation == generation && Arc::ptr_eq(&cached.source, &source) {
                return cached.granted.clone();
            }
        }

        let granted: Arc<HashSet<String>> = Arc::new(source.iter().cloned().collect());
        self.rebuilds.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(generation, size = granted.len(), "granted permission set rebuilt");

        *cache = Some(GrantedCache {
            generation,
            source,
            granted: granted.clone(),
        });
        granted
    }

    /// How many times the granted set has been rebuilt
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds.load(Ordering::Relaxed)
    }

    fn evaluate(
        &self,
        required: &Requirement,
        matches: impl Fn(&HashSet<String>, &[String]) -> bool,
    ) -> bool {
        if required.is_unrestricted() {
            return true;
        }
        if self.session.is_administrator() {
            return true;
        }
        let granted = self.granted();
        if granted.is_empty() {
            return false;
        }
        matches(&granted, required.identifiers())
    }
}
