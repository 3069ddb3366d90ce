//! Request extractors

mod auth;
mod path;
mod validated;

pub use auth::{AuthUser, SessionToken};
pub use path::PeerIdPath;
pub use validated::ValidatedJson;
