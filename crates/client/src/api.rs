use std::future::Future;

use api_types::expense::{Expense, ExpenseFields, ExpenseInput};
use reqwest::{
    Method, Response, Url,
    header::{self, HeaderMap, HeaderValue},
};
use serde::Serialize;

use crate::{
    ClientError,
    envelope::{error_message, normalize_list, unwrap_data},
};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_API_PREFIX: &str = "/api";

/// The five operations of the expense service.
///
/// [`ApiClient`] talks HTTP; the presentation state only depends on this
/// trait.
pub trait ExpenseApi {
    fn list(&self) -> impl Future<Output = Result<Vec<Expense>, ClientError>> + Send;

    fn get(&self, id: &str) -> impl Future<Output = Result<Expense, ClientError>> + Send;

    fn create(
        &self,
        input: &ExpenseInput,
    ) -> impl Future<Output = Result<Expense, ClientError>> + Send;

    fn update(
        &self,
        id: &str,
        changes: &ExpenseFields,
    ) -> impl Future<Output = Result<Expense, ClientError>> + Send;

    fn delete(&self, id: &str) -> impl Future<Output = Result<(), ClientError>> + Send;
}

/// HTTP client for the expense service.
///
/// Base URL and default headers are fixed at construction; clone it to share
/// it, clones reuse the same connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    expenses_url: Url,
}

impl ApiClient {
    /// Return a builder for `ApiClient`.
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Client for `base_url` with the default `/api` prefix.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    fn url(&self, id: Option<&str>) -> Result<Url, ClientError> {
        let mut url = self.expenses_url.clone();
        if let Some(id) = id {
            url.path_segments_mut()
                .map_err(|_| ClientError::InvalidBaseUrl(self.expenses_url.to_string()))?
                .push(id);
        }
        Ok(url)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<Vec<u8>, ClientError> {
        let mut req = self.http.request(method, url);
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.bytes().await?.to_vec());
        }

        Err(Self::server_error(resp).await)
    }

    async fn server_error(resp: Response) -> ClientError {
        let status = resp.status();
        let message = match resp.bytes().await {
            Ok(body) => error_message(&body),
            Err(_) => None,
        }
        .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));
        tracing::debug!("request failed with {status}: {message}");
        ClientError::Server { status, message }
    }
}

impl ExpenseApi for ApiClient {
    async fn list(&self) -> Result<Vec<Expense>, ClientError> {
        let body = self
            .send::<()>(Method::GET, self.url(None)?, None)
            .await?;
        Ok(normalize_list(&body))
    }

    async fn get(&self, id: &str) -> Result<Expense, ClientError> {
        let body = self
            .send::<()>(Method::GET, self.url(Some(id))?, None)
            .await?;
        unwrap_data(&body)
    }

    async fn create(&self, input: &ExpenseInput) -> Result<Expense, ClientError> {
        let body = self
            .send(Method::POST, self.url(None)?, Some(input))
            .await?;
        unwrap_data(&body)
    }

    async fn update(&self, id: &str, changes: &ExpenseFields) -> Result<Expense, ClientError> {
        let body = self
            .send(Method::PUT, self.url(Some(id))?, Some(changes))
            .await?;
        unwrap_data(&body)
    }

    async fn delete(&self, id: &str) -> Result<(), ClientError> {
        self.send::<()>(Method::DELETE, self.url(Some(id))?, None)
            .await?;
        Ok(())
    }
}

/// The builder for `ApiClient`
#[derive(Debug, Clone)]
pub struct ApiClientBuilder {
    base_url: String,
    api_prefix: String,
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
        }
    }
}

impl ApiClientBuilder {
    /// Origin of the service, e.g. `http://127.0.0.1:5000`.
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// Path the `/expenses` resource is nested under. Empty for the root.
    pub fn api_prefix(mut self, api_prefix: &str) -> Self {
        self.api_prefix = api_prefix.to_string();
        self
    }

    pub fn build(self) -> Result<ApiClient, ClientError> {
        let base = Url::parse(self.base_url.trim())
            .map_err(|err| ClientError::InvalidBaseUrl(format!("{}: {err}", self.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(self.base_url));
        }

        let mut expenses_url = base.clone();
        {
            let mut segments = expenses_url
                .path_segments_mut()
                .map_err(|_| ClientError::InvalidBaseUrl(base.to_string()))?;
            segments.pop_if_empty();
            for segment in self.api_prefix.split('/').filter(|s| !s.is_empty()) {
                segments.push(segment);
            }
            segments.push("expenses");
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(ApiClient { http, expenses_url })
    }
}
