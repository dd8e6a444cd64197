// ABOUTME: Record store factory for configuration-based backend selection
// ABOUTME: Wraps the in-memory and REST backends behind one clonable handle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;

use super::memory::InMemoryRecordStore;
use super::rest::{RestRecordStore, RestStoreConfig};
use super::{Query, RecordStore, Row};
use crate::config::{ClientConfig, StoreBackend};
use crate::errors::{AppResult, StoreError};

/// Unified record store handle
#[derive(Clone)]
pub enum Store {
    /// Process-local tables
    Memory(InMemoryRecordStore),
    /// Hosted `PostgREST` endpoint
    Rest(RestRecordStore),
}

impl Store {
    /// Create the backend named by the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the REST client cannot be built
    pub fn from_config(config: &ClientConfig) -> AppResult<Self> {
        match &config.store {
            StoreBackend::Memory => {
                tracing::info!("Initializing in-memory record store");
                Ok(Self::Memory(InMemoryRecordStore::new()))
            }
            StoreBackend::Rest {
                base_url,
                api_key,
                access_token,
            } => {
                tracing::info!(
                    store.url = %base_url,
                    store.user_token = access_token.is_some(),
                    "Initializing REST record store"
                );
                let mut rest = RestStoreConfig::new(base_url.clone(), api_key.clone());
                rest.timeout = config.http_timeout;
                let store = RestRecordStore::new(rest)?;
                Ok(Self::Rest(match access_token {
                    Some(token) => store.with_access_token(token.clone()),
                    None => store,
                }))
            }
        }
    }

    /// Backend name for logs
    #[must_use]
    pub const fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Rest(_) => "rest",
        }
    }
}

#[async_trait]
impl RecordStore for Store {
    async fn insert(&self, table: &str, record: Row) -> Result<Row, StoreError> {
        match self {
            Self::Memory(store) => store.insert(table, record).await,
            Self::Rest(store) => store.insert(table, record).await,
        }
    }

    async fn insert_batch(&self, table: &str, records: Vec<Row>) -> Result<Vec<Row>, StoreError> {
        match self {
            Self::Memory(store) => store.insert_batch(table, records).await,
            Self::Rest(store) => store.insert_batch(table, records).await,
        }
    }

    async fn query(&self, query: &Query) -> Result<Vec<Row>, StoreError> {
        match self {
            Self::Memory(store) => store.query(query).await,
            Self::Rest(store) => store.query(query).await,
        }
    }
}
