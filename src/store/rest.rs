// ABOUTME: PostgREST-compatible HTTP record store for hosted Postgres backends
// ABOUTME: Translates Query filters/ordering/limits into PostgREST URL parameters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # REST Record Store
//!
//! Talks to a `PostgREST` endpoint (`{base}/rest/v1/{table}`), the API shape
//! exposed by hosted Postgres services. Inserts use
//! `Prefer: return=representation` so the stored row is echoed back; a
//! bulk insert is a single statement and therefore all-or-nothing.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use super::{Filter, Query, RecordStore, Row, SortDirection};
use crate::errors::{AppError, AppResult, StoreError};
use fitlog_core::constants::defaults;

/// Connection settings for a `PostgREST` endpoint
#[derive(Debug, Clone)]
pub struct RestStoreConfig {
    /// Project base URL, e.g. `https://project.example.co/`
    pub base_url: Url,
    /// Public API key sent as `apikey`
    pub api_key: String,
    /// Signed-in user's access token; the API key is used when absent
    pub access_token: Option<String>,
    /// Whole-request timeout
    pub timeout: Duration,
    /// Connection timeout
    pub connect_timeout: Duration,
}

impl RestStoreConfig {
    /// Settings with default timeouts
    #[must_use]
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            base_url,
            api_key: api_key.into(),
            access_token: None,
            timeout: Duration::from_secs(defaults::HTTP_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(defaults::HTTP_CONNECT_TIMEOUT_SECS),
        }
    }
}

/// Error body returned by `PostgREST`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP record store
#[derive(Clone)]
pub struct RestRecordStore {
    client: Client,
    config: Arc<RestStoreConfig>,
}

impl RestRecordStore {
    /// Build a store with a pooled HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed
    pub fn new(config: RestStoreConfig) -> AppResult<Self> {
        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| AppError::config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Same endpoint, authenticated as a signed-in user
    #[must_use]
    pub fn with_access_token(&self, token: impl Into<String>) -> Self {
        let mut config = (*self.config).clone();
        config.access_token = Some(token.into());
        Self {
            client: self.client.clone(),
            config: Arc::new(config),
        }
    }

    fn table_url(&self, table: &str) -> Result<Url, StoreError> {
        self.config
            .base_url
            .join(&format!("rest/v1/{table}"))
            .map_err(|e| StoreError::rejected(table, format!("invalid table URL: {e}")))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let token = self
            .config
            .access_token
            .as_deref()
            .unwrap_or(&self.config.api_key);
        request
            .header("apikey", &self.config.api_key)
            .bearer_auth(token)
    }

    async fn post_rows(&self, table: &str, body: &Value) -> Result<Vec<Row>, StoreError> {
        let request = self
            .client
            .post(self.table_url(table)?)
            .header("Prefer", "return=representation")
            .json(body);
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| unavailable(&e))?;
        read_rows(table, response).await
    }
}

fn unavailable(error: &reqwest::Error) -> StoreError {
    StoreError::Unavailable {
        reason: error.to_string(),
    }
}

async fn read_rows(table: &str, response: Response) -> Result<Vec<Row>, StoreError> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message);
        tracing::warn!(store.table = table, http.status = status.as_u16(), "Record store rejected request");
        return Err(StoreError::Rejected {
            table: table.to_owned(),
            message,
        });
    }

    response
        .json::<Vec<Row>>()
        .await
        .map_err(|e| StoreError::Decode(e.to_string()))
}

/// Render a filter value the way `PostgREST` expects it in a URL
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_owned(),
        other => other.to_string(),
    }
}

/// URL parameters for a select query
#[must_use]
pub fn query_params(query: &Query) -> Vec<(String, String)> {
    let mut params = Vec::with_capacity(query.filters.len() + 3);
    let select = if query.columns.is_empty() {
        "*".to_owned()
    } else {
        query.columns.join(",")
    };
    params.push(("select".to_owned(), select));

    for filter in &query.filters {
        let (op, value) = match filter {
            Filter::Eq { value, .. } => ("eq", value),
            Filter::Gte { value, .. } => ("gte", value),
        };
        params.push((filter.column().to_owned(), format!("{op}.{}", render_value(value))));
    }

    if let Some(order) = &query.order {
        let direction = match order.direction {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        };
        params.push(("order".to_owned(), format!("{}.{direction}", order.column)));
    }

    if let Some(limit) = query.limit {
        params.push(("limit".to_owned(), limit.to_string()));
    }

    params
}

#[async_trait]
impl RecordStore for RestRecordStore {
    async fn insert(&self, table: &str, record: Row) -> Result<Row, StoreError> {
        let rows = self.post_rows(table, &Value::Object(record)).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode(format!("insert into '{table}' echoed no row")))
    }

    async fn insert_batch(&self, table: &str, records: Vec<Row>) -> Result<Vec<Row>, StoreError> {
        let body = Value::Array(records.into_iter().map(Value::Object).collect());
        self.post_rows(table, &body).await
    }

    async fn query(&self, query: &Query) -> Result<Vec<Row>, StoreError> {
        let request = self
            .client
            .get(self.table_url(&query.table)?)
            .query(&query_params(query));
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| unavailable(&e))?;
        read_rows(&query.table, response).await
    }
}
