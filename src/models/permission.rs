use serde::{Deserialize, Serialize};

use super::menu::MenuId;
use crate::tree::{OptionNode, TreeRecord};

pub type PermissionId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionType {
    Menu,
    Button,
    Api,
}

/// A grantable capability. `parent_id` only groups permissions for display;
/// authorization looks at the flat set of granted keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub id: PermissionId,
    pub name: String,
    pub key: String,
    #[serde(rename = "type")]
    pub permission_type: PermissionType,
    #[serde(default)]
    pub parent_id: Option<PermissionId>,
}

impl TreeRecord for Permission {
    type Id = PermissionId;

    fn record_id(&self) -> PermissionId {
        self.id.clone()
    }

    fn parent_record_id(&self) -> Option<PermissionId> {
        self.parent_id.clone().filter(|p| !p.is_empty() && p != "0")
    }

    // catalogue order is the display order
    fn sort_key(&self) -> i64 {
        0
    }

    fn label(&self) -> &str {
        &self.name
    }
}

/// Body of the permission-save endpoint. Always the complete desired set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionAssignment {
    pub permission_ids: Vec<PermissionId>,
}

/// Menu picker for one role: the full menu option tree plus the menus the
/// role currently holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleMenuTree {
    pub menus: Vec<OptionNode<MenuId>>,
    #[serde(default)]
    pub checked_keys: Vec<MenuId>,
}

impl RoleMenuTree {
    pub fn is_checked(&self, menu_id: MenuId) -> bool {
        self.checked_keys.contains(&menu_id)
    }
}
