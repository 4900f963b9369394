//! # MBH Security
//!
//! Security utilities: password hashing, server-side sessions, CSRF.

pub mod csrf;
pub mod password;
pub mod session;

pub use csrf::{generate_csrf_token, validate_csrf_token};
pub use password::{PasswordError, PasswordService};
pub use session::{Session, SessionError, SessionStore, SessionUser};
