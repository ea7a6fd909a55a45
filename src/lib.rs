//! Salary Predictor - HTTP service for salary predictions
//!
//! Serves predictions from a pre-trained linear regression model. Each
//! request is encoded into a fixed-order feature vector, optionally
//! scaled, run through the model and logged to an in-memory history.
//!
//! # Features
//!
//! - Categorical feature encoding with documented fallbacks
//! - Optional standard scaler applied before inference
//! - Atomic model/scaler reload
//! - In-memory prediction history with aggregate statistics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use salary_predictor::{Config, PredictionInput, PredictionService};
//!
//! let service = PredictionService::from_config(&Config::default());
//! let outcome = service.predict(PredictionInput::with_experience(5.0));
//! ```

// Core modules
pub mod error;
pub mod config;
pub mod types;

pub mod features;
pub mod model;
pub mod history;
pub mod service;

// API module (optional)
#[cfg(feature = "http-server")]
pub mod api;

// Re-export commonly used types
pub use error::{Error, Result};
pub use config::Config;
pub use types::{FeatureVector, PredictionInput};
pub use features::{FeatureEncoder, FeatureSet};
pub use history::{HistoryStatistics, PredictionHistory, PredictionRecord};
pub use model::{ModelBundle, ModelRegistry};
pub use service::PredictionService;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Initialize logging with `RUST_LOG`, defaulting to `info`
pub fn init() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init()
        .map_err(|e| Error::config(format!("Failed to initialize logger: {}", e)))?;
    log::info!("{} {} initialized", NAME, VERSION);
    Ok(())
}
