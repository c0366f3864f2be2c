//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod login;
pub mod logout;
pub mod register;

// Re-exports
pub use authenticate::AuthenticateUseCase;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
