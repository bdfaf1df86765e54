pub mod menu_service;
pub mod role_service;

pub use menu_service::MenuService;
pub use role_service::RoleService;
