pub mod menu;
pub mod permission;
pub mod role;

pub use menu::{Menu, MenuFilter, MenuForm, MenuId, MenuType};
pub use permission::{Permission, PermissionAssignment, PermissionId, PermissionType, RoleMenuTree};
pub use role::{Role, RoleForm, RoleId, RoleQuery, RoleUpdate};
