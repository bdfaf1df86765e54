//! Flat parent-linked records to navigable trees.
//!
//! Both menus and the permission catalogue come from the server as flat
//! lists. The builder here groups them by parent, orders siblings, and
//! guards against cycles and dangling parents in the data.

pub mod builder;
pub mod types;

pub use builder::{build_parent_options, build_permission_tree, build_tree, TreeBuilder};
pub use types::{OptionNode, TreeNode};

use std::hash::Hash;

/// A record that knows its own id, its parent's id and its sibling order.
pub trait TreeRecord {
    type Id: Clone + Eq + Hash + std::fmt::Debug;

    fn record_id(&self) -> Self::Id;

    /// `None` for root records
    fn parent_record_id(&self) -> Option<Self::Id>;

    /// Siblings are ordered ascending by this key, ties by input order
    fn sort_key(&self) -> i64;

    /// Display label used for picker options
    fn label(&self) -> &str;
}

pub type MenuNode = TreeNode<crate::models::Menu>;
