pub mod config;
pub mod error;
pub mod metrics;
pub mod model;
pub mod report;
pub mod signal;

pub use config::AppConfig;
pub use error::DomainError;
pub use metrics::Score;
pub use model::ModelSize;
pub use report::BatchRecord;
pub use signal::Signal;
