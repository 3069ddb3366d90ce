//! # relay-service
//!
//! Application layer: the use cases behind the REST boundary and the
//! relay router, plus the dependency container they share.

pub mod dto;
pub mod services;

pub use dto::{
    ActiveUserResponse, AuthResponse, LoginRequest, MessageResponse, RegisterRequest,
    UserResponse,
};
pub use services::{
    AuthService, MessageService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult,
};
