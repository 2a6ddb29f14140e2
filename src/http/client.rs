//! Low-level HTTP client: `FirestoreHttp`.
//!
//! One method per Firestore call the SDK makes. Returns Firestore wire types
//! (decoding into trade/token documents happens in the domain sub-clients).

use crate::error::HttpError;
use crate::http::firestore::{Document, RunQueryItem, RunQueryRequest};
use crate::http::retry::RetryPolicy;

use async_lock::RwLock;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Low-level HTTP client for the Firestore REST API.
pub struct FirestoreHttp {
    base_url: String,
    project_id: String,
    database: String,
    api_key: Option<String>,
    retry: RetryPolicy,
    client: Client,
    /// Firebase ID token, sent as a bearer token when set. NEVER exposed publicly.
    auth_token: Arc<RwLock<Option<String>>>,
}

impl FirestoreHttp {
    pub fn new(
        base_url: &str,
        project_id: &str,
        database: &str,
        api_key: Option<String>,
        retry: RetryPolicy,
    ) -> Result<Self, HttpError> {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder
                .timeout(Duration::from_secs(30))
                .pool_max_idle_per_host(10);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            project_id: project_id.to_string(),
            database: database.to_string(),
            api_key,
            retry,
            client: builder.build()?,
            auth_token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/projects/{project}/databases/{database}/documents`
    pub fn documents_root(&self) -> String {
        format!(
            "{}/projects/{}/databases/{}/documents",
            self.base_url, self.project_id, self.database
        )
    }

    /// Set the Firebase ID token used for security-rule-protected reads.
    pub async fn set_auth_token(&self, token: Option<String>) {
        *self.auth_token.write().await = token;
    }

    pub async fn has_auth_token(&self) -> bool {
        self.auth_token.read().await.is_some()
    }

    // ── Documents ────────────────────────────────────────────────────────

    pub async fn get_document(&self, collection: &str, id: &str) -> Result<Document, HttpError> {
        let url = format!(
            "{}/{}/{}",
            self.documents_root(),
            urlencoding::encode(collection),
            urlencoding::encode(id)
        );
        self.get(&url).await
    }

    // ── Queries ──────────────────────────────────────────────────────────

    pub async fn run_query(&self, query: &RunQueryRequest) -> Result<Vec<RunQueryItem>, HttpError> {
        let url = format!("{}:runQuery", self.documents_root());
        // Reads only; safe to retry.
        self.post(&url, query).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    fn with_key(&self, url: &str) -> String {
        match &self.api_key {
            Some(key) => {
                let sep = if url.contains('?') { '&' } else { '?' };
                format!("{}{}key={}", url, sep, urlencoding::encode(key))
            }
            None => url.to_string(),
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::GET, url, None::<&()>)
            .await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::POST, url, Some(body))
            .await
    }

    async fn request_with_retry<T: DeserializeOwned, B: Serialize>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<T, HttpError> {
        let url = self.with_key(url);
        let Some(config) = self.retry.config() else {
            return self.do_request(&method, &url, body).await;
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match self.do_request::<T, B>(&method, &url, body).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    let should_retry = match &e {
                        HttpError::ServerError { status, .. } => config.is_retryable_status(*status),
                        HttpError::RateLimited { retry_after_ms } => {
                            if let Some(ms) = retry_after_ms {
                                futures_timer::Delay::new(Duration::from_millis(*ms)).await;
                            }
                            true
                        }
                        HttpError::Timeout => true,
                        HttpError::Reqwest(re) => {
                            #[cfg(not(target_arch = "wasm32"))]
                            let retryable = re.is_connect() || re.is_timeout() || re.is_request();
                            #[cfg(target_arch = "wasm32")]
                            let retryable = re.is_timeout() || re.is_request();
                            retryable
                        }
                        _ => false,
                    };

                    if should_retry && attempt < config.max_retries {
                        let delay = config.delay_for_attempt(attempt);
                        tracing::debug!(
                            attempt = attempt + 1,
                            max = config.max_retries,
                            delay_ms = delay.as_millis() as u64,
                            "Retrying Firestore request: {}",
                            e
                        );
                        futures_timer::Delay::new(delay).await;
                        last_error = Some(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &reqwest::Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<T, HttpError> {
        let mut req = self.client.request(method.clone(), url);

        if let Some(token) = self.auth_token.read().await.as_ref() {
            req = req.bearer_auth(token);
        }

        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() {
            let parsed = resp.json::<T>().await?;
            return Ok(parsed);
        }

        let status_code = status.as_u16();
        let retry_after_ms = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .map(|secs| secs * 1000);
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            401 | 403 => Err(HttpError::Unauthorized),
            404 => Err(HttpError::NotFound(body_text)),
            408 => Err(HttpError::Timeout),
            429 => Err(HttpError::RateLimited { retry_after_ms }),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

impl Clone for FirestoreHttp {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            project_id: self.project_id.clone(),
            database: self.database.clone(),
            api_key: self.api_key.clone(),
            retry: self.retry.clone(),
            client: self.client.clone(),
            auth_token: self.auth_token.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(api_key: Option<&str>) -> FirestoreHttp {
        FirestoreHttp::new(
            "https://firestore.googleapis.com/v1/",
            "curve-dex",
            "(default)",
            api_key.map(str::to_string),
            RetryPolicy::None,
        )
        .unwrap()
    }

    #[test]
    fn test_documents_root() {
        assert_eq!(
            http(None).documents_root(),
            "https://firestore.googleapis.com/v1/projects/curve-dex/databases/(default)/documents"
        );
    }

    #[test]
    fn test_api_key_appended() {
        let client = http(Some("k e y"));
        assert_eq!(client.with_key("https://x/doc"), "https://x/doc?key=k%20e%20y");
        assert_eq!(client.with_key("https://x/doc?a=1"), "https://x/doc?a=1&key=k%20e%20y");
        assert_eq!(http(None).with_key("https://x/doc"), "https://x/doc");
    }

    #[tokio::test]
    async fn test_auth_token_roundtrip() {
        let client = http(None);
        assert!(!client.has_auth_token().await);
        client.set_auth_token(Some("id-token".to_string())).await;
        assert!(client.has_auth_token().await);
    }
}
