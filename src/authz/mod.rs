//! Client-side permission evaluation.
//!
//! [`SessionStore`] holds what the authentication layer resolved for the
//! current user; [`PermissionEngine`] answers "may this user see X" from it.

pub mod engine;
pub mod requirement;
pub mod session;

pub use engine::PermissionEngine;
pub use requirement::Requirement;
pub use session::{fetch_session, SessionSource, SessionStore, SessionUser};
