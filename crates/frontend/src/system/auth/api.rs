use crate::shared::api::{ApiClient, ApiError};
use contracts::domain::common::normalize_item;
use contracts::system::auth::{LoginRequest, LoginResponse};

/// `POST /auth/login`
pub async fn login(client: &ApiClient, email: String, password: String) -> Result<LoginResponse, ApiError> {
    let request = LoginRequest { email, password };
    let body = serde_json::to_value(&request)?;
    let response = client
        .post("/auth/login", &body)
        .await
        .map_err(|e| e.context("Signing in"))?;
    Ok(serde_json::from_value(normalize_item(response))?)
}
