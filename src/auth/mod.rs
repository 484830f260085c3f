//! User-facing authentication flows and their wire models.

mod models;
mod service;

pub use models::{
    ForgotPassword, PasswordResetHash, RegisterUser, ResetPassword, UserPasswordUpdate,
    UserResponse,
};
pub use service::AuthenticationService;
