pub mod config;
pub mod constants;

pub use config::{AzureConfig, CleanerConfig, parse_cleaner_toml};
