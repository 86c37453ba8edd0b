use crate::domain::common::EntityId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: AdminUser,
}

/// Signed-in admin as returned by `/auth/login` and kept in local storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AdminUser {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl AdminUser {
    pub fn is_superadmin(&self) -> bool {
        self.role == "superadmin"
    }
}
