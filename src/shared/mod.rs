pub mod config;
pub mod error;
pub mod logging;

pub use config::{ApiConfig, AppConfig, LoggingConfig};
pub use error::{AppError, Result};
