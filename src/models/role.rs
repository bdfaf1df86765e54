use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Status;

pub type RoleId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    /// Unique machine key, e.g. `admin`
    pub key: String,
    #[serde(default)]
    pub sort: i64,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub remark: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Full create payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleForm {
    pub name: String,
    pub key: String,
    #[serde(default)]
    pub sort: i64,
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

impl RoleForm {
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            sort: 0,
            status: Status::Normal,
            remark: None,
        }
    }
}

/// Partial update payload. Unset fields are omitted from the request body
/// and left untouched by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

impl RoleUpdate {
    pub fn is_empty(&self) -> bool {
        self == &RoleUpdate::default()
    }

    /// Apply the set fields onto an existing role
    pub fn apply_to(&self, role: &mut Role) {
        if let Some(name) = &self.name {
            role.name = name.clone();
        }
        if let Some(key) = &self.key {
            role.key = key.clone();
        }
        if let Some(sort) = self.sort {
            role.sort = sort;
        }
        if let Some(status) = self.status {
            role.status = status;
        }
        if let Some(remark) = &self.remark {
            role.remark = Some(remark.clone());
        }
    }
}

/// Paginated list query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl RoleQuery {
    pub fn page(page: u32, page_size: u32) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
            ..Default::default()
        }
    }

    /// Keyword matches name or key, case-insensitively
    pub fn matches(&self, role: &Role) -> bool {
        if let Some(keyword) = self.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            let keyword = keyword.to_lowercase();
            if !role.name.to_lowercase().contains(&keyword)
                && !role.key.to_lowercase().contains(&keyword)
            {
                return false;
            }
        }
        self.status.map_or(true, |status| role.status == status)
    }

    /// Query-string pairs, filling page defaults
    pub fn to_query(&self, default_page_size: u32) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(keyword) = self.keyword.as_deref().filter(|k| !k.trim().is_empty()) {
            query.push(("keyword", keyword.to_string()));
        }
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        query.push(("page", self.page.unwrap_or(1).max(1).to_string()));
        query.push(("pageSize", self.page_size.unwrap_or(default_page_size).max(1).to_string()));
        query
    }
}
