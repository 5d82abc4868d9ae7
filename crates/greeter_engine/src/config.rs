use std::fs;
use std::io;
use std::path::Path;

use greeter_base::{ErrorKind, GreeterError, GreeterResult};
use serde::Deserialize;
use tracing::debug;

/// File looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "greeter.toml";

/// Configuration for the greeter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Who to greet.
    #[serde(default = "default_name")]
    pub name: String,
}

fn default_name() -> String {
    "world".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: default_name(),
        }
    }
}

pub fn parse_config(text: &str) -> GreeterResult<Config> {
    toml::from_str(text).map_err(|e| greeter_base::err!("Invalid configuration: {}", e))
}

/// Load configuration from `path`.
pub fn load_config(path: &Path) -> GreeterResult<Config> {
    let text = fs::read_to_string(path).map_err(|source| file_error(path, source))?;
    parse_config(&text).map_err(|e| load_error(path, *e))
}

/// Load configuration from `path`, falling back to defaults if the file does not exist.
pub fn load_config_or_default(path: &Path) -> GreeterResult<Config> {
    match fs::read_to_string(path) {
        Ok(text) => parse_config(&text).map_err(|e| load_error(path, *e)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(Config::default())
        }
        Err(source) => Err(file_error(path, source)),
    }
}

fn load_error(path: &Path, cause: GreeterError) -> Box<GreeterError> {
    Box::new(
        GreeterError::message(format!("Failed to load {}", path.display())).caused_by(cause),
    )
}

fn file_error(path: &Path, source: io::Error) -> Box<GreeterError> {
    Box::new(GreeterError::new(ErrorKind::FileError {
        path: path.to_path_buf(),
        source,
    }))
}
