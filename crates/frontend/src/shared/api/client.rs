use super::error::ApiError;
use crate::shared::config::AppConfig;
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::callback::Timeout;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Source of the bearer token, read on every request
pub type TokenSource = fn() -> Option<String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// HTTP client of the back-office API.
///
/// Every request carries the API key, `Accept: application/json` and, when a
/// session exists, the bearer token. Requests exceeding the configured timeout
/// are aborted and reported as network errors.
#[derive(Clone)]
pub struct ApiClient {
    config: Arc<AppConfig>,
    token: TokenSource,
}

impl ApiClient {
    pub fn new(config: AppConfig, token: TokenSource) -> Self {
        Self {
            config: Arc::new(config),
            token,
        }
    }

    /// Client reading the token of the signed-in admin
    pub fn with_session(config: AppConfig) -> Self {
        Self::new(config, crate::system::auth::storage::get_token)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub async fn get(&self, path: &str, query: Option<&str>) -> Result<Value, ApiError> {
        self.send(HttpMethod::Get, path, query, None).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.send(HttpMethod::Post, path, None, Some(body)).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.send(HttpMethod::Put, path, None, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.send(HttpMethod::Delete, path, None, None).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, query: Option<&str>) -> Result<T, ApiError> {
        let value = self.get(path, query).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)?;
        let value = self.post(path, &body).await?;
        Ok(serde_json::from_value(value)?)
    }

    fn builder(&self, method: HttpMethod, url: &str) -> RequestBuilder {
        let builder = match method {
            HttpMethod::Get => Request::get(url),
            HttpMethod::Post => Request::post(url),
            HttpMethod::Put => Request::put(url),
            HttpMethod::Delete => Request::delete(url),
        };

        let mut builder = builder.header("Accept", "application/json");
        if !self.config.api_key.is_empty() {
            builder = builder.header("X-API-Key", &self.config.api_key);
        }
        if let Some(token) = (self.token)() {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }
        builder
    }

    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        query: Option<&str>,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let url = build_url(&self.config.api_url(path), query);
        let started = js_sys::Date::now();

        if self.config.log_requests {
            log::debug!("→ {} {}", method.as_str(), url);
        }

        let controller = web_sys::AbortController::new()
            .map_err(|_| ApiError::network("AbortController is not available"))?;
        let signal = controller.signal();
        let builder = self.builder(method, &url).abort_signal(Some(&signal));

        let request = match body {
            Some(body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::network(format!("Failed to build request: {}", e)))?;

        let timeout_ms = self.config.request_timeout_ms;
        let timeout = Timeout::new(timeout_ms, move || controller.abort());

        let result = request.send().await;
        drop(timeout);

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                let elapsed = js_sys::Date::now() - started;
                let message = if elapsed >= f64::from(timeout_ms) {
                    format!("Request timed out after {} ms", timeout_ms)
                } else {
                    format!("Network error: {}", e)
                };
                log::error!("{} {} failed: {}", method.as_str(), url, message);
                return Err(ApiError::network(message));
            }
        };

        if self.config.log_requests {
            log::debug!(
                "← {} {} {} ({:.0} ms)",
                method.as_str(),
                url,
                response.status(),
                js_sys::Date::now() - started
            );
        }

        handle_response(response).await
    }
}

async fn handle_response(response: Response) -> Result<Value, ApiError> {
    let status = response.status();
    let text = response.text().await.map_err(|e| e.to_string());
    interpret_response(status, text)
}

fn interpret_response(status: u16, text: Result<String, String>) -> Result<Value, ApiError> {
    let text = match text {
        Ok(text) => text,
        Err(e) => {
            log::error!("Failed to read response body (HTTP {}): {}", status, e);
            if (200..300).contains(&status) {
                return Err(ApiError::network(format!("Failed to read response body: {}", e)));
            }
            String::new()
        }
    };
    let body = parse_body(&text);

    if (200..300).contains(&status) {
        return match body {
            Some(Ok(value)) => Ok(value),
            Some(Err(e)) => Err(ApiError::decode(e.to_string())),
            None => Ok(Value::Null),
        };
    }

    let error = ApiError::from_response(status, body.and_then(Result::ok));
    if error.is_unauthorized() {
        log::warn!("Unauthorized: {}", error.message);
    } else {
        log::error!("HTTP {}: {}", status, error.message);
    }
    Err(error)
}

fn parse_body(text: &str) -> Option<Result<Value, serde_json::Error>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(serde_json::from_str(trimmed))
    }
}

fn build_url(base: &str, query: Option<&str>) -> String {
    match query.map(|q| q.trim_start_matches('?')).filter(|q| !q.is_empty()) {
        Some(q) if base.contains('?') => format!("{}&{}", base, q),
        Some(q) => format!("{}?{}", base, q),
        None => base.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        assert_eq!(build_url("http://h/api/products", None), "http://h/api/products");
        assert_eq!(build_url("http://h/api/products", Some("")), "http://h/api/products");
        assert_eq!(build_url("http://h/api/products", Some("page=2")), "http://h/api/products?page=2");
        assert_eq!(build_url("http://h/x?a=1", Some("?b=2")), "http://h/x?a=1&b=2");
    }

    #[test]
    fn test_parse_body() {
        assert!(parse_body("  ").is_none());
        assert!(matches!(parse_body("{\"id\":1}"), Some(Ok(_))));
        assert!(matches!(parse_body("<html>"), Some(Err(_))));
    }

    #[test]
    fn test_unreadable_success_body_is_a_network_error() {
        let err = interpret_response(200, Err("connection reset".to_string())).unwrap_err();
        assert!(err.network_error);
        assert!(err.message.contains("connection reset"));
    }

    #[test]
    fn test_unreadable_error_body_keeps_the_status() {
        let err = interpret_response(503, Err("connection reset".to_string())).unwrap_err();
        assert_eq!(err.status, Some(503));
        assert!(!err.network_error);
    }

    #[test]
    fn test_empty_success_body_is_null() {
        assert_eq!(interpret_response(204, Ok(String::new())).unwrap(), Value::Null);
        assert!(interpret_response(200, Ok("<html>".to_string())).is_err());
    }
}
