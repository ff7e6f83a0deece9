use std::rc::Rc;
use std::time::Duration;
use futures::future::{self, Either};
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;
use serde::{de::DeserializeOwned, Serialize};
use shared::{config::{ClientConfig, CLIENT_CONFIG}, error::ErrorResponse};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    #[error("Request timed out after {0} ms")]
    Timeout(u32),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Failed to encode request: {0}")]
    Encode(String),
    #[error("Failed to decode response: {0}")]
    Decode(String),
    #[error("{detail}")]
    Status { status: u16, detail: String },
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[derive(Clone, Copy)]
enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

/// Handle to the application's single configured HTTP client.
///
/// Cloning is cheap and every clone refers to the same instance, so two
/// handles compare equal only when they came from the same construction.
#[derive(Clone, Debug)]
pub struct HttpClient {
    config: Rc<ClientConfig>,
}

impl PartialEq for HttpClient {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.config, &other.config)
    }
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config: Rc::new(config) }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.config.timeout()
    }

    pub fn default_headers(&self) -> &[(&'static str, &'static str)] {
        self.config.headers
    }

    pub fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    fn request(&self, method: Method, path: &str) -> Request {
        let url = self.url(path);
        let request = match method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Patch => Request::patch(&url),
            Method::Delete => Request::delete(&url),
        };

        self.default_headers()
            .iter()
            .fold(request, |request, (name, value)| request.header(name, value))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.execute(self.request(Method::Get, path)).await?;
        decode(response).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ClientError> {
        let request = self.request(Method::Post, path)
            .json(body)
            .map_err(|e| ClientError::Encode(e.to_string()))?;
        decode(self.execute(request).await?).await
    }

    pub async fn patch<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ClientError> {
        let request = self.request(Method::Patch, path)
            .json(body)
            .map_err(|e| ClientError::Encode(e.to_string()))?;
        decode(self.execute(request).await?).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.execute(self.request(Method::Delete, path)).await?;
        decode(response).await
    }

    // Dropping the losing fetch does not cancel it in the browser; its result is ignored.
    async fn execute(&self, request: Request) -> Result<Response, ClientError> {
        let timeout_ms = self.config.timeout_ms;
        let send = Box::pin(request.send());
        let timer = Box::pin(TimeoutFuture::new(timeout_ms));

        let response = match future::select(send, timer).await {
            Either::Left((result, _)) => result.map_err(|e| ClientError::Network(e.to_string()))?,
            Either::Right(_) => {
                web_sys::console::warn_1(&format!("request timed out after {} ms", timeout_ms).into());
                return Err(ClientError::Timeout(timeout_ms));
            }
        };

        if response.ok() {
            return Ok(response);
        }

        let status = response.status();
        let detail = response.json::<ErrorResponse>().await
            .map(|body| body.detail)
            .unwrap_or_else(|_| format!("Request failed with status {}", status));
        web_sys::console::warn_1(&format!("{} {}: {}", status, response.url(), detail).into());
        Err(ClientError::Status { status, detail })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    response.json::<T>().await.map_err(|e| ClientError::Decode(e.to_string()))
}

/// Builds the client every component shares, from the compiled-in defaults.
pub fn create_client() -> HttpClient {
    HttpClient::new(CLIENT_CONFIG)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_client_uses_configured_defaults() {
        let client = create_client();
        assert_eq!(client.base_url(), "http://localhost:8000/");
        assert_eq!(client.timeout(), Duration::from_millis(1000));
        assert!(client
            .default_headers()
            .contains(&("Content-Type", "application/json")));
        assert_eq!(client.url("clients/1"), "http://localhost:8000/clients/1");
    }

    #[test]
    fn clones_share_one_instance() {
        let client = create_client();
        let handle = client.clone();
        assert_eq!(client, handle);
        assert_eq!(handle.config(), &CLIENT_CONFIG);

        let other = create_client();
        assert_ne!(client, other);
        assert_eq!(client.config(), other.config());
    }

    #[test]
    fn status_errors_expose_code() {
        let err = ClientError::Status { status: 404, detail: "Client not found".into() };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Client not found");
        assert_eq!(ClientError::Timeout(1000).status(), None);
        assert_eq!(ClientError::Timeout(1000).to_string(), "Request timed out after 1000 ms");
    }
}
