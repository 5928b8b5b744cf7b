use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use super::traits::{BlobStore, ChannelRepository};
use crate::domain::Channel;

/// In-memory channel index keyed by (run, lap, name).
///
/// Satisfies the same contract as the persistent backends; intended for
/// tests and small embedded data sets.
#[derive(Default)]
pub struct MemoryChannelIndex {
    channels: RwLock<Vec<Channel>>,
}

impl MemoryChannelIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, channel: Channel) {
        self.channels.write().unwrap().push(channel);
    }
}

#[async_trait]
impl ChannelRepository for MemoryChannelIndex {
    async fn find_channel(
        &self,
        run_id: Uuid,
        lap_number: i32,
        channel_name: &str,
    ) -> Result<Option<Channel>> {
        let channels = self.channels.read().unwrap();
        Ok(channels
            .iter()
            .find(|c| c.matches(run_id, lap_number, channel_name))
            .cloned())
    }
}

/// In-memory blob store keyed by content hash.
///
/// Counts fetches so tests can assert the retrieval service short-circuits
/// before touching blob storage.
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
    fetches: AtomicUsize,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, content_hash: &str, bytes: Vec<u8>) {
        self.blobs
            .write()
            .unwrap()
            .insert(content_hash.to_string(), bytes);
    }

    /// Number of fetches served so far, hits and misses alike.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn fetch_blob(&self, content_hash: &str) -> Result<Option<Vec<u8>>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.blobs.read().unwrap().get(content_hash).cloned())
    }
}
