pub mod decode;
pub mod domain;
pub mod error;
pub mod service;
pub mod store;

pub use domain::Channel;
pub use error::{Result, TimeSeriesError};
pub use service::TimeSeriesService;
