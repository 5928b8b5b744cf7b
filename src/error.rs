use thiserror::Error;

/// Errors surfaced by the retrieval chain.
///
/// Absent data is never an error: an unknown (run, lap, channel) triple or a
/// hash with no stored blob comes back as an empty sample sequence. Errors
/// are reserved for caller misuse, corrupt stored bytes, and backend
/// infrastructure failures.
#[derive(Debug, Error)]
pub enum TimeSeriesError {
    #[error("run id must not be nil")]
    NilRunId,

    #[error("lap number must not be negative, got {0}")]
    NegativeLap(i32),

    #[error("channel name must not be empty")]
    EmptyChannelName,

    #[error("content hash must not be empty")]
    EmptyContentHash,

    /// Stored blob bytes do not conform to the packed-double layout.
    #[error("blob length {length} is not a multiple of {width} bytes")]
    MisalignedBlob { length: usize, width: usize },

    /// Infrastructure failure from a storage backend, passed through
    /// unchanged so callers can tell "no data" from "backend down".
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl TimeSeriesError {
    /// True for caller-side precondition violations, reported before any
    /// backend lookup is attempted.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::NilRunId | Self::NegativeLap(_) | Self::EmptyChannelName | Self::EmptyContentHash
        )
    }
}

pub type Result<T> = std::result::Result<T, TimeSeriesError>;
