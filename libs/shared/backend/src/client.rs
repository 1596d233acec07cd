use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION},
    Method,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use shared_config::PortalConfig;
use shared_models::error::ApiError;

/// JSON client for the appointment platform backend. Authenticated calls
/// carry the patient credential as a bearer token.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &PortalConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.backend_url.trim_end_matches('/').to_string(),
        }
    }

    fn get_headers(&self, auth_token: Option<&str>) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = auth_token {
            let bearer = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ApiError::Transport("Credential is not a valid header value".to_string()))?;
            headers.insert(AUTHORIZATION, bearer);
        }

        Ok(headers)
    }

    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        auth_token: Option<&str>,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        if self.base_url.is_empty() {
            return Err(ApiError::NotConfigured("backend URL is empty".to_string()));
        }

        let url = format!("{}{}", self.base_url, path);
        debug!("Making {} request to {}", method, url);

        let mut req = self.client
            .request(method, &url)
            .headers(self.get_headers(auth_token)?);

        if let Some(body_data) = body {
            req = req.json(body_data);
        }

        let response = req
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            error!("API error ({}): {}", status, response_text);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: extract_message(&response_text),
            });
        }

        serde_json::from_str::<T>(&response_text).map_err(|e| {
            error!("Failed to parse response from {}: {}", url, e);
            ApiError::Decode(e.to_string())
        })
    }

    pub async fn get<T>(&self, path: &str, auth_token: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        self.request::<T, Value>(Method::GET, path, Some(auth_token), None).await
    }

    /// Unauthenticated GET for public listings.
    pub async fn get_public<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        self.request::<T, Value>(Method::GET, path, None, None).await
    }

    pub async fn post<T, B>(&self, path: &str, auth_token: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(auth_token), Some(body)).await
    }

    pub fn get_base_url(&self) -> &str {
        &self.base_url
    }
}

/// Pulls `message` out of an error body such as `{"success":false,"message":"..."}`.
fn extract_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
