pub mod config;
pub mod error;
pub mod logger;
pub mod script;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::ScenescribeError;
pub use script::read_script;
pub type Result<T> = std::result::Result<T, ScenescribeError>;
