//! Request and response DTOs

mod requests;
mod responses;

pub use requests::{LoginRequest, RegisterRequest};
pub use responses::{ActiveUserResponse, AuthResponse, MessageResponse, UserResponse};
