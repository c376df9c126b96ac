//! File-based configuration for the Shopdesk CLI
//!
//! Settings are read from a YAML or TOML file (chosen by extension), then
//! environment variables are layered on top.
//!
//! # Example
//! ```no_run
//! # use shopdesk_config_file::ShopdeskConfig;
//! let mut config = ShopdeskConfig::from_file("~/.shopdesk/config.yaml")?;
//! for warning in config.merge_env() {
//!     eprintln!("{}", warning);
//! }
//! config.validate()?;
//! # Ok::<(), shopdesk_config_file::ConfigError>(())
//! ```

mod config;

pub use config::{
    ApiSettings, ConfigError, LogFormat, LoggingConfig, SessionSettings, ShopdeskConfig,
    default_config_path, expand_path,
};
