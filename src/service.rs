use std::sync::Arc;

use tracing::{debug, trace};
use uuid::Uuid;

use crate::decode::decode_doubles;
use crate::error::{Result, TimeSeriesError};
use crate::store::{BlobStore, ChannelRepository};

/// High-level API for retrieving decoded time-series data for a given
/// (simulation run, lap, channel).
///
/// Holds no state of its own beyond the two injected backends; every call is
/// one resolve, at most one fetch, and one decode. Backends are supplied by
/// the caller, who owns their lifetime.
pub struct TimeSeriesService {
    channels: Arc<dyn ChannelRepository>,
    blobs: Arc<dyn BlobStore>,
}

impl TimeSeriesService {
    pub fn new(channels: Arc<dyn ChannelRepository>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { channels, blobs }
    }

    /// Return the decoded time-series for the given run, lap, and channel
    /// name.
    ///
    /// An unknown run, lap, or channel, and a resolved hash with no stored
    /// blob, all yield an empty sequence: missing data is an expected
    /// outcome, not an error. Errors are reserved for malformed input,
    /// corrupt stored bytes, and backend failures, which pass through
    /// unchanged.
    pub async fn get_time_series(
        &self,
        run_id: Uuid,
        lap_number: i32,
        channel_name: &str,
    ) -> Result<Vec<f64>> {
        // Validate before any lookup.
        if run_id.is_nil() {
            return Err(TimeSeriesError::NilRunId);
        }
        if lap_number < 0 {
            return Err(TimeSeriesError::NegativeLap(lap_number));
        }
        if channel_name.trim().is_empty() {
            return Err(TimeSeriesError::EmptyChannelName);
        }

        let channel = match self
            .channels
            .find_channel(run_id, lap_number, channel_name)
            .await?
        {
            Some(channel) => channel,
            None => {
                debug!(%run_id, lap_number, channel_name, "no channel record");
                return Ok(Vec::new());
            }
        };

        let blob = match self.blobs.fetch_blob(channel.content_hash()).await? {
            Some(blob) => blob,
            None => {
                debug!(hash = channel.content_hash(), "no blob for resolved hash");
                return Ok(Vec::new());
            }
        };

        trace!(hash = channel.content_hash(), bytes = blob.len(), "decoding blob");
        decode_doubles(&blob)
    }
}
