mod session;
mod user;

pub use session::Session;
pub use user::{AuthResponse, LoginRequest, RegisterRequest, User, UserResponse};
