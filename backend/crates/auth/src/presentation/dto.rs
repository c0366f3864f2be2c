//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

/// POST /auth/register/
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: String,
}

/// POST /auth/login/
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Register and login response
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub username: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}
