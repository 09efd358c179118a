mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{AuthConfig, Config, LoggingConfig, RestoreMode, SaverConfig};
