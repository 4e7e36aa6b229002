mod loader;
mod types;

pub use loader::{ConfigError, BASE_URL_ENV};
pub use types::{ApiConfig, Config};
