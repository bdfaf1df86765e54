//! Shared wire types used by menus, roles and the CLI

use serde::{Deserialize, Serialize};

/// Activation flag. Encoded `"0"` (normal) / `"1"` (disabled).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    #[serde(rename = "0")]
    Normal,
    #[serde(rename = "1")]
    Disabled,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Normal => "0",
            Status::Disabled => "1",
        }
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "0" | "normal" | "enabled" => Ok(Status::Normal),
            "1" | "disabled" => Ok(Status::Disabled),
            other => Err(format!("unknown status '{}'", other)),
        }
    }
}

/// Display flag, independent of [`Status`]. Encoded `"0"` (shown) / `"1"` (hidden).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    #[serde(rename = "0")]
    Shown,
    #[serde(rename = "1")]
    Hidden,
}

/// One page of a paginated collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    /// True when the server holds more records than this page covers
    pub fn is_truncated(&self) -> bool {
        (self.page as u64).saturating_mul(self.page_size as u64) < self.total
    }
}

/// `{ "ids": [...] }` body used by batch deletes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdList<T> {
    pub ids: Vec<T>,
}
