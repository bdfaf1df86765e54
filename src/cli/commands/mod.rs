pub mod auth;
pub mod menu;
pub mod profile;
pub mod role;
