pub mod config;
pub mod error;
pub mod published;
pub mod types;

pub use config::TrackerConfig;
pub use error::Error;
pub use published::{NullSource, PublishedSource};
pub use types::{Article, Platform, Post};

pub type Result<T> = std::result::Result<T, Error>;
