// ABOUTME: In-memory key-value engine backed by a shared BTreeMap
// ABOUTME: Mirrors the durable engine's ordering guarantees for tests and ephemeral runs
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! In-memory storage engine.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::{stream, StreamExt};
use tokio::sync::RwLock;

use super::{KeyValueStore, KvStream};
use crate::errors::AppResult;

/// `BTreeMap`-backed engine with the same ordering guarantees as the
/// durable one. Cloning shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryKv {
    entries: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryKv {
    /// Empty engine
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKv {
    async fn put(&self, key: &str, value: &[u8]) -> AppResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_owned(), value.to_vec());
        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<Option<Vec<u8>>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn scan_prefix<'a>(&'a self, prefix: &str) -> AppResult<KvStream<'a>> {
        // Materialized under the read lock; the guard cannot live inside
        // the returned stream
        let matches: Vec<AppResult<(String, Vec<u8>)>> = self
            .entries
            .read()
            .await
            .range(prefix.to_owned()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| Ok((key.clone(), value.clone())))
            .collect();

        Ok(stream::iter(matches).boxed())
    }
}
