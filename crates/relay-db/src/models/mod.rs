//! Database row models

mod message;
mod user;

pub use message::MessageModel;
pub use user::UserModel;
