mod session_service;
mod user_service;

pub use session_service::SessionService;
pub use user_service::UserService;
