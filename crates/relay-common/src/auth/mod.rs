//! Authentication utilities - password hashing and session management

mod password;
mod session;

pub use password::{hash_password, validate_password_strength, verify_password};
pub use session::{Session, SessionError, SessionStore, SESSION_COOKIE};
