use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Channel;

/// Read-only access to channel metadata stored per (run, lap, channel name).
///
/// `Ok(None)` means no such record exists, including a syntactically valid
/// but unknown run id; it is an expected outcome, not an error. `Err` is
/// reserved for infrastructure failure and is never used to signal absence.
#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// Look up the unique channel for the given run, lap, and channel name.
    async fn find_channel(
        &self,
        run_id: Uuid,
        lap_number: i32,
        channel_name: &str,
    ) -> Result<Option<Channel>>;
}

/// Read-only access to raw sample blobs, keyed by content hash.
///
/// The store is content-stable: two fetches of the same hash return
/// identical bytes. The same blob can be shared by many channels whose data
/// is identical.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Return the bytes stored under the given hash, or `None` if unknown.
    async fn fetch_blob(&self, content_hash: &str) -> Result<Option<Vec<u8>>>;
}
