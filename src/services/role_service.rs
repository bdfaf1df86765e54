use std::collections::BTreeSet;
use std::sync::Arc;

use crate::client::{send_as, send_unit, ApiRequest, Transport};
use crate::config::{config, RoleConfig};
use crate::error::Result;
use crate::models::{
    Permission, PermissionAssignment, PermissionId, Role, RoleForm, RoleId, RoleMenuTree, RoleQuery,
    RoleUpdate,
};
use crate::types::{IdList, Page};

const ROLE_PATH: &str = "/api/system/role";
const PERMISSION_PATH: &str = "/api/system/permission";

/// Role and role-permission store over the admin API
#[derive(Clone)]
pub struct RoleService {
    transport: Arc<dyn Transport>,
    paging: RoleConfig,
}

impl RoleService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            paging: config().roles.clone(),
        }
    }

    pub fn with_paging(mut self, paging: RoleConfig) -> Self {
        self.paging = paging;
        self
    }

    pub async fn list(&self, query: &RoleQuery) -> Result<Page<Role>> {
        let request =
            ApiRequest::get(ROLE_PATH).with_query(query.to_query(self.paging.default_page_size));
        send_as(self.transport.as_ref(), request).await
    }

    /// First page at a large page size, for selection widgets. Not a
    /// complete listing when the server holds more roles than that.
    pub async fn list_all(&self) -> Result<Vec<Role>> {
        let page = self.list(&RoleQuery::page(1, self.paging.list_all_page_size)).await?;
        if page.is_truncated() {
            tracing::warn!(
                total = page.total,
                page_size = page.page_size,
                "role list_all truncated; raise CONSOLE_ROLE_LIST_ALL_PAGE_SIZE"
            );
        }
        Ok(page.items)
    }

    pub async fn get(&self, id: RoleId) -> Result<Role> {
        send_as(self.transport.as_ref(), ApiRequest::get(format!("{}/{}", ROLE_PATH, id))).await
    }

    /// Duplicate keys are rejected by the server, not checked here
    pub async fn create(&self, form: &RoleForm) -> Result<Role> {
        send_as(self.transport.as_ref(), ApiRequest::post(ROLE_PATH, form)?).await
    }

    /// Partial update: only the fields set in `update` are sent
    pub async fn update(&self, id: RoleId, update: &RoleUpdate) -> Result<Role> {
        let request = ApiRequest::patch(format!("{}/{}", ROLE_PATH, id), update)?;
        send_as(self.transport.as_ref(), request).await
    }

    pub async fn delete(&self, id: RoleId) -> Result<()> {
        let request = ApiRequest::delete(format!("{}/{}", ROLE_PATH, id));
        send_unit(self.transport.as_ref(), request).await
    }

    /// Single outcome for the whole batch; not atomic server-side
    pub async fn batch_delete(&self, ids: &[RoleId]) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let request = ApiRequest::delete(ROLE_PATH).json(&IdList { ids: ids.to_vec() })?;
        send_unit(self.transport.as_ref(), request).await
    }

    /// Permission keys currently granted to the role
    pub async fn get_permissions(&self, role_id: RoleId) -> Result<BTreeSet<String>> {
        let keys: Vec<String> = send_as(
            self.transport.as_ref(),
            ApiRequest::get(format!("{}/{}/permissions", ROLE_PATH, role_id)),
        )
        .await?;
        Ok(keys.into_iter().collect())
    }

    /// Replace the role's permissions with exactly `permission_ids`.
    /// Last writer wins; nothing is merged.
    pub async fn save_permissions<I, P>(&self, role_id: RoleId, permission_ids: I) -> Result<()>
    where
        I: IntoIterator<Item = P>,
        P: Into<PermissionId>,
    {
        let mut seen = BTreeSet::new();
        let permission_ids: Vec<PermissionId> = permission_ids
            .into_iter()
            .map(Into::into)
            .filter(|id: &PermissionId| seen.insert(id.clone()))
            .collect();

        let request = ApiRequest::put(
            format!("{}/{}/permissions", ROLE_PATH, role_id),
            &PermissionAssignment { permission_ids },
        )?;
        send_unit(self.transport.as_ref(), request).await
    }

    /// Menu option tree plus the menus already checked for the role
    pub async fn menu_tree(&self, role_id: RoleId) -> Result<RoleMenuTree> {
        send_as(
            self.transport.as_ref(),
            ApiRequest::get(format!("{}/{}/menu-tree", ROLE_PATH, role_id)),
        )
        .await
    }

    pub async fn permission_catalog(&self) -> Result<Vec<Permission>> {
        send_as(self.transport.as_ref(), ApiRequest::get(PERMISSION_PATH)).await
    }
}
