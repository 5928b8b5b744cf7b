use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use super::traits::{BlobStore, ChannelRepository};
use crate::domain::{Channel, ChannelRecord};

/// Blob store backed by a directory of content-addressed files.
///
/// Each blob lives at `<root>/<hash>.bin`. Files are written once and never
/// rewritten in place; changed content gets a new hash and a new file.
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Create a store over the given directory, creating it if needed.
    pub fn new(root: PathBuf) -> Result<Self> {
        fs::create_dir_all(&root).context("Failed to create blob store directory")?;
        Ok(Self { root })
    }

    /// Write a blob under the given hash. Test setup and offline ingestion
    /// tooling only; the retrieval path never writes.
    pub fn put(&self, content_hash: &str, bytes: &[u8]) -> Result<()> {
        let path = self.blob_path(content_hash);
        fs::write(&path, bytes).context(format!("Failed to write blob to {:?}", path))?;
        Ok(())
    }

    fn blob_path(&self, content_hash: &str) -> PathBuf {
        self.root.join(format!("{}.bin", content_hash))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn fetch_blob(&self, content_hash: &str) -> Result<Option<Vec<u8>>> {
        let path = self.blob_path(content_hash);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(hash = content_hash, "blob not found");
                Ok(None)
            }
            Err(e) => Err(e).context(format!("Failed to read blob from {:?}", path)),
        }
    }
}

/// Channel index loaded from a single JSON file.
///
/// Records are re-validated through the [`Channel`] invariant on load, so a
/// hand-edited index with a blank hash or negative lap is rejected up front
/// rather than surfacing later as a broken lookup.
pub struct JsonChannelIndex {
    channels: Vec<Channel>,
}

impl JsonChannelIndex {
    /// Load the index from the given file.
    pub fn load(path: &Path) -> Result<Self> {
        let json =
            fs::read_to_string(path).context(format!("Failed to read channel index {:?}", path))?;

        let records: Vec<ChannelRecord> =
            serde_json::from_str(&json).context("Failed to deserialize channel index")?;

        let channels = records
            .into_iter()
            .map(|record| {
                Channel::try_from(record)
                    .map_err(|e| anyhow::anyhow!("Invalid channel record in index: {}", e))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { channels })
    }

    /// Write channels out as an index file. Test setup and offline tooling
    /// only.
    pub fn save(path: &Path, channels: &[Channel]) -> Result<()> {
        let records: Vec<ChannelRecord> = channels.iter().map(ChannelRecord::from).collect();
        let json = serde_json::to_string_pretty(&records)
            .context("Failed to serialize channel index")?;

        fs::write(path, json).context(format!("Failed to write channel index {:?}", path))?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

#[async_trait]
impl ChannelRepository for JsonChannelIndex {
    async fn find_channel(
        &self,
        run_id: Uuid,
        lap_number: i32,
        channel_name: &str,
    ) -> Result<Option<Channel>> {
        Ok(self
            .channels
            .iter()
            .find(|c| c.matches(run_id, lap_number, channel_name))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_put_and_fetch_blob() {
        let dir = tempdir().unwrap();
        let store = FsBlobStore::new(dir.path().to_path_buf()).unwrap();

        store.put("abc123", &[1, 2, 3, 4]).unwrap();
        let bytes = store.fetch_blob("abc123").await.unwrap();
        assert_eq!(bytes, Some(vec![1, 2, 3, 4]));
    }

    #[tokio::test]
    async fn test_fetch_unknown_hash_is_absent() {
        let dir = tempdir().unwrap();
        let store = FsBlobStore::new(dir.path().to_path_buf()).unwrap();

        assert_eq!(store.fetch_blob("zzz").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_index_save_load_find() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("channels.json");

        let run = Uuid::new_v4();
        let channels = vec![
            Channel::new(run, 0, "speed", "abc123").unwrap(),
            Channel::new(run, 1, "speed", "def456").unwrap(),
        ];
        JsonChannelIndex::save(&path, &channels).unwrap();

        let index = JsonChannelIndex::load(&path).unwrap();
        assert_eq!(index.len(), 2);

        let hit = index.find_channel(run, 1, "speed").await.unwrap().unwrap();
        assert_eq!(hit.content_hash(), "def456");
        assert!(index.find_channel(run, 2, "speed").await.unwrap().is_none());
    }

    #[test]
    fn test_index_rejects_invalid_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("channels.json");

        let json = serde_json::json!([{
            "id": Uuid::new_v4(),
            "run_id": Uuid::new_v4(),
            "lap_number": 0,
            "name": "speed",
            "content_hash": "  "
        }]);
        fs::write(&path, json.to_string()).unwrap();

        assert!(JsonChannelIndex::load(&path).is_err());
    }
}
