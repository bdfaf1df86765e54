use std::sync::Arc;

use crate::client::{send_as, send_unit, ApiRequest, Transport};
use crate::error::Result;
use crate::models::{Menu, MenuFilter, MenuForm, MenuId};
use crate::tree::{MenuNode, OptionNode, TreeBuilder};
use crate::types::IdList;

const MENU_PATH: &str = "/api/system/menu";

/// Menu record store over the admin API.
///
/// One request per call, no retries, no caching. A failed fetch is only a
/// failure; it never means the menu was deleted.
#[derive(Clone)]
pub struct MenuService {
    transport: Arc<dyn Transport>,
    builder: TreeBuilder,
}

impl MenuService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            builder: TreeBuilder::default(),
        }
    }

    pub fn with_builder(mut self, builder: TreeBuilder) -> Self {
        self.builder = builder;
        self
    }

    pub async fn list(&self, filter: &MenuFilter) -> Result<Vec<Menu>> {
        let request = ApiRequest::get(MENU_PATH).with_query(filter.to_query());
        send_as(self.transport.as_ref(), request).await
    }

    /// Fails with `NotFound` for an unknown id
    pub async fn get(&self, id: MenuId) -> Result<Menu> {
        send_as(self.transport.as_ref(), ApiRequest::get(format!("{}/{}", MENU_PATH, id))).await
    }

    pub async fn create(&self, form: &MenuForm) -> Result<Menu> {
        send_as(self.transport.as_ref(), ApiRequest::post(MENU_PATH, form)?).await
    }

    pub async fn update(&self, id: MenuId, form: &MenuForm) -> Result<Menu> {
        let request = ApiRequest::put(format!("{}/{}", MENU_PATH, id), form)?;
        send_as(self.transport.as_ref(), request).await
    }

    pub async fn delete(&self, id: MenuId) -> Result<()> {
        let request = ApiRequest::delete(format!("{}/{}", MENU_PATH, id));
        send_unit(self.transport.as_ref(), request).await
    }

    /// Single outcome for the whole batch. On failure some ids may already
    /// be gone server-side; re-list to find out which.
    pub async fn batch_delete(&self, ids: &[MenuId]) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let request = ApiRequest::delete(MENU_PATH).json(&IdList { ids: ids.to_vec() })?;
        send_unit(self.transport.as_ref(), request).await
    }

    /// Fetch and build the navigation forest
    pub async fn tree(&self, filter: &MenuFilter) -> Result<Vec<MenuNode>> {
        let menus = self.list(filter).await?;
        Ok(self.builder.build(&menus))
    }

    /// Fetch everything and build the parent picker for `editing`
    pub async fn parent_options(&self, editing: Option<MenuId>) -> Result<Vec<OptionNode<MenuId>>> {
        let menus = self.list(&MenuFilter::default()).await?;
        Ok(self.builder.build_options(&menus, editing.as_ref()))
    }
}
