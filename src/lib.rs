pub mod config;
pub mod error;
pub mod item;

// Image selection
pub mod processor;

// Feed ingestion
pub mod feed;

// Command line
pub mod cli;

// Re-exports
pub use config::{ImageConfig, Settings};
pub use error::{Error, Result};
pub use item::{FeedItem, Item};
pub use processor::{ImageProcessor, ProcessOutcome, ProcessReport};
