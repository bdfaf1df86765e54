pub mod authz;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod sequence;
pub mod services;
pub mod tree;
pub mod types;

#[cfg(test)]
pub mod testing;

pub use authz::{PermissionEngine, Requirement, SessionStore};
pub use error::{ConsoleError, Result};
pub use tree::{build_parent_options, build_permission_tree, build_tree};
