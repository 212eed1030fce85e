//! Shared HTTP client for the catalog backend.

use std::time::Duration;

use biblioteca_kernel::settings::BackendSettings;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::{NoContext, Timestamp, Uuid};

use crate::error::{ApiError, ApiResult};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Configured client with a fixed base URL and timeout. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(settings: &BackendSettings) -> ApiResult<Self> {
        let base_url = Url::parse(&settings.base_url).map_err(|err| {
            ApiError::InvalidRequest(format!("invalid base URL '{}': {}", settings.base_url, err))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidRequest(format!(
                "base URL '{}' cannot carry a path",
                settings.base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .default_headers(headers)
            .build()
            .map_err(ApiError::from_transport)?;

        tracing::debug!(
            base_url = %base_url,
            timeout_ms = settings.timeout_ms,
            "api client configured"
        );

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append percent-encoded path segments to the base URL.
    pub fn url(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidRequest("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> ApiResult<T> {
        let response = self
            .execute(Method::GET, segments, |request| request.query(query))
            .await?;
        read_json(response).await
    }

    pub async fn post<B, T>(&self, segments: &[&str], body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .execute(Method::POST, segments, |request| request.json(body))
            .await?;
        read_json(response).await
    }

    pub async fn put<B, T>(&self, segments: &[&str], body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .execute(Method::PUT, segments, |request| request.json(body))
            .await?;
        read_json(response).await
    }

    /// Any 2xx counts as success; the body (usually empty) is ignored.
    pub async fn delete(&self, segments: &[&str]) -> ApiResult<()> {
        self.execute(Method::DELETE, segments, |request| request)
            .await
            .map(|_| ())
    }

    async fn execute(
        &self,
        method: Method,
        segments: &[&str],
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> ApiResult<Response> {
        let url = self.url(segments)?;
        let request_id = Uuid::new_v7(Timestamp::now(NoContext)).to_string();

        tracing::debug!(%method, %url, %request_id, "sending request");

        let request = build(self.http.request(method.clone(), url.clone()))
            .header(REQUEST_ID_HEADER, request_id.as_str());

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                let error = ApiError::from_transport(err);
                tracing::error!(%method, %url, %request_id, error = %error, "request failed");
                return Err(error);
            }
        };

        let status = response.status();
        tracing::debug!(%request_id, status = status.as_u16(), "response received");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let error = ApiError::from_status(status.as_u16(), &body);
        tracing::error!(
            %method,
            %url,
            %request_id,
            status = status.as_u16(),
            error = %error,
            detail = error.detail().unwrap_or(""),
            "request rejected"
        );
        Err(error)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let bytes = response.bytes().await.map_err(ApiError::from_transport)?;
    serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode { source })
}
