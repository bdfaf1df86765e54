use serde::{Deserialize, Serialize};

use crate::tree::TreeRecord;
use crate::types::{Status, Visibility};

pub type MenuId = i64;

/// Menu node classification. Encoded `"M"` / `"C"` / `"F"` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MenuType {
    #[serde(rename = "M")]
    Directory,
    #[serde(rename = "C")]
    Menu,
    #[serde(rename = "F")]
    Button,
}

impl MenuType {
    pub fn as_str(self) -> &'static str {
        match self {
            MenuType::Directory => "M",
            MenuType::Menu => "C",
            MenuType::Button => "F",
        }
    }

    /// Directories and menus may have children, buttons may not.
    pub fn allows_children(self) -> bool {
        !matches!(self, MenuType::Button)
    }
}

impl std::str::FromStr for MenuType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "M" | "m" | "directory" => Ok(MenuType::Directory),
            "C" | "c" | "menu" => Ok(MenuType::Menu),
            "F" | "f" | "button" => Ok(MenuType::Button),
            other => Err(format!("unknown menu type '{}'", other)),
        }
    }
}

/// A menu record as returned by the server. `children` is never part of the
/// record; see [`crate::tree::TreeNode`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub menu_id: MenuId,
    /// 0 means root
    #[serde(default)]
    pub parent_id: MenuId,
    pub menu_name: String,
    #[serde(default)]
    pub order_num: i64,
    pub menu_type: MenuType,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub component: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub visible: Visibility,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub is_frame: Option<String>,
    #[serde(default)]
    pub is_cache: Option<String>,
    #[serde(default)]
    pub perms: Option<String>,
}

impl Menu {
    pub fn is_displayed(&self) -> bool {
        self.visible == Visibility::Shown
    }

    pub fn is_enabled(&self) -> bool {
        self.status == Status::Normal
    }

    pub fn is_leaf_kind(&self) -> bool {
        !self.menu_type.allows_children()
    }

    /// Permission key attached to the node. The server sends `""` for
    /// nodes without one; any other value is kept verbatim.
    pub fn permission_key(&self) -> Option<&str> {
        self.perms.as_deref().filter(|p| !p.is_empty())
    }
}

impl TreeRecord for Menu {
    type Id = MenuId;

    fn record_id(&self) -> MenuId {
        self.menu_id
    }

    fn parent_record_id(&self) -> Option<MenuId> {
        Some(self.parent_id).filter(|id| *id != 0)
    }

    fn sort_key(&self) -> i64 {
        self.order_num
    }

    fn label(&self) -> &str {
        &self.menu_name
    }
}

/// Create/update payload for a menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuForm {
    #[serde(default)]
    pub parent_id: MenuId,
    pub menu_name: String,
    #[serde(default)]
    pub order_num: i64,
    pub menu_type: MenuType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub visible: Visibility,
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_frame: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_cache: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perms: Option<String>,
}

impl MenuForm {
    pub fn new(menu_name: impl Into<String>, menu_type: MenuType) -> Self {
        Self {
            parent_id: 0,
            menu_name: menu_name.into(),
            order_num: 0,
            menu_type,
            path: None,
            component: None,
            icon: None,
            visible: Visibility::Shown,
            status: Status::Normal,
            is_frame: None,
            is_cache: None,
            perms: None,
        }
    }

    pub fn under(mut self, parent_id: MenuId) -> Self {
        self.parent_id = parent_id;
        self
    }

    pub fn ordered(mut self, order_num: i64) -> Self {
        self.order_num = order_num;
        self
    }

    pub fn with_perms(mut self, perms: impl Into<String>) -> Self {
        self.perms = Some(perms.into());
        self
    }

    /// Materialize the record the server would hold for this form under `menu_id`
    pub fn into_menu(self, menu_id: MenuId) -> Menu {
        Menu {
            menu_id,
            parent_id: self.parent_id,
            menu_name: self.menu_name,
            order_num: self.order_num,
            menu_type: self.menu_type,
            path: self.path,
            component: self.component,
            icon: self.icon,
            visible: self.visible,
            status: self.status,
            is_frame: self.is_frame,
            is_cache: self.is_cache,
            perms: self.perms,
        }
    }
}

impl From<&Menu> for MenuForm {
    fn from(menu: &Menu) -> Self {
        Self {
            parent_id: menu.parent_id,
            menu_name: menu.menu_name.clone(),
            order_num: menu.order_num,
            menu_type: menu.menu_type,
            path: menu.path.clone(),
            component: menu.component.clone(),
            icon: menu.icon.clone(),
            visible: menu.visible,
            status: menu.status,
            is_frame: menu.is_frame.clone(),
            is_cache: menu.is_cache.clone(),
            perms: menu.perms.clone(),
        }
    }
}

/// List filter. Unset fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_type: Option<MenuType>,
}

impl MenuFilter {
    /// Case-insensitive name substring, exact status and type
    pub fn matches(&self, menu: &Menu) -> bool {
        if let Some(name) = self.menu_name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            if !menu.menu_name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if menu.status != status {
                return false;
            }
        }
        if let Some(menu_type) = self.menu_type {
            if menu.menu_type != menu_type {
                return false;
            }
        }
        true
    }

    /// Query-string pairs for the list endpoint
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(name) = self.menu_name.as_deref().filter(|n| !n.trim().is_empty()) {
            query.push(("menuName", name.to_string()));
        }
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(menu_type) = self.menu_type {
            query.push(("menuType", menu_type.as_str().to_string()));
        }
        query
    }
}
