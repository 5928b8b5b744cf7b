pub mod fs;
pub mod memory;
pub mod traits;

pub use fs::{FsBlobStore, JsonChannelIndex};
pub use memory::{MemoryBlobStore, MemoryChannelIndex};
pub use traits::{BlobStore, ChannelRepository};
