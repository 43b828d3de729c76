pub mod auth;
pub mod response;

pub use auth::{require_authentication, AuthenticatedUser};
pub use response::{ApiResponse, ApiResult};
