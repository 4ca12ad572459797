pub mod config;
pub mod oracle;

pub use config::GeminiConfig;
pub use oracle::GeminiOracle;
