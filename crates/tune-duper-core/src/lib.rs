pub mod cache;
pub mod config;
pub mod delete;
pub mod engine;
pub mod error;
pub mod metadata;
pub mod model;
pub mod progress;
pub mod scanner;
pub mod similarity;
pub mod worker;

pub use cache::{FileStore, MemoryStore, ResultStore};
pub use config::AppConfig;
pub use delete::{delete_files, DeleteReport, DeleteStatus};
pub use engine::ScanEngine;
pub use error::Error;
pub use model::{FileRecord, ScanResult, SimilarityGroup};
pub use progress::{ProgressReporter, SilentReporter};
pub use similarity::SimilarityMetric;
