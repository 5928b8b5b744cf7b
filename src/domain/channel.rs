use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, TimeSeriesError};

/// A single time-series channel within a simulation run and lap, pointing at
/// shared sample data via a deterministic content hash.
///
/// The hash is derived from the blob bytes only, so ingesting identical data
/// for two different laps yields the same hash and reuses the same blob.
/// Channels are immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    id: Uuid,
    run_id: Uuid,
    lap_number: i32,
    name: String,
    content_hash: String,
}

impl Channel {
    /// Create a new channel record with a freshly assigned identity.
    ///
    /// Fails if the name or hash is empty/whitespace, or the lap is negative.
    pub fn new(run_id: Uuid, lap_number: i32, name: &str, content_hash: &str) -> Result<Self> {
        Self::from_parts(Uuid::new_v4(), run_id, lap_number, name, content_hash)
    }

    /// Rebuild a channel from stored fields, keeping its persisted identity.
    /// Applies the same validation as [`Channel::new`].
    pub fn from_parts(
        id: Uuid,
        run_id: Uuid,
        lap_number: i32,
        name: &str,
        content_hash: &str,
    ) -> Result<Self> {
        if lap_number < 0 {
            return Err(TimeSeriesError::NegativeLap(lap_number));
        }
        if name.trim().is_empty() {
            return Err(TimeSeriesError::EmptyChannelName);
        }
        if content_hash.trim().is_empty() {
            return Err(TimeSeriesError::EmptyContentHash);
        }

        Ok(Self {
            id,
            run_id,
            lap_number,
            name: name.to_string(),
            content_hash: content_hash.to_string(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn lap_number(&self) -> i32 {
        self.lap_number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    /// True when this channel is the record for the given lookup triple.
    pub fn matches(&self, run_id: Uuid, lap_number: i32, name: &str) -> bool {
        self.run_id == run_id && self.lap_number == lap_number && self.name == name
    }
}

/// Raw serde form of a [`Channel`], used by persisted indexes. Loading goes
/// back through [`Channel::from_parts`] so invalid records are rejected
/// instead of trusted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelRecord {
    pub id: Uuid,
    pub run_id: Uuid,
    pub lap_number: i32,
    pub name: String,
    pub content_hash: String,
}

impl From<&Channel> for ChannelRecord {
    fn from(channel: &Channel) -> Self {
        Self {
            id: channel.id,
            run_id: channel.run_id,
            lap_number: channel.lap_number,
            name: channel.name.clone(),
            content_hash: channel.content_hash.clone(),
        }
    }
}

impl TryFrom<ChannelRecord> for Channel {
    type Error = TimeSeriesError;

    fn try_from(record: ChannelRecord) -> Result<Self> {
        Channel::from_parts(
            record.id,
            record.run_id,
            record.lap_number,
            &record.name,
            &record.content_hash,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_assigns_unique_ids() {
        let run = Uuid::new_v4();
        let a = Channel::new(run, 0, "speed", "abc123").unwrap();
        let b = Channel::new(run, 0, "speed", "abc123").unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_empty_name_rejected_at_construction() {
        let err = Channel::new(Uuid::new_v4(), 0, "   ", "abc123").unwrap_err();
        assert!(matches!(err, TimeSeriesError::EmptyChannelName));
    }

    #[test]
    fn test_empty_hash_rejected_at_construction() {
        let err = Channel::new(Uuid::new_v4(), 0, "speed", "").unwrap_err();
        assert!(matches!(err, TimeSeriesError::EmptyContentHash));
    }

    #[test]
    fn test_negative_lap_rejected_at_construction() {
        let err = Channel::new(Uuid::new_v4(), -1, "speed", "abc123").unwrap_err();
        assert!(matches!(err, TimeSeriesError::NegativeLap(-1)));
    }

    #[test]
    fn test_record_round_trip_preserves_identity() {
        let channel = Channel::new(Uuid::new_v4(), 3, "throttle", "fff000").unwrap();
        let record = ChannelRecord::from(&channel);
        let restored = Channel::try_from(record).unwrap();
        assert_eq!(channel, restored);
    }

    #[test]
    fn test_record_with_blank_hash_rejected() {
        let record = ChannelRecord {
            id: Uuid::new_v4(),
            run_id: Uuid::new_v4(),
            lap_number: 0,
            name: "speed".to_string(),
            content_hash: " ".to_string(),
        };
        assert!(Channel::try_from(record).is_err());
    }
}
