pub mod config;
pub mod ffi;
pub mod message;

pub use config::{CONFIG_FILE_NAME, Config, load_config, load_config_or_default, parse_config};
pub use message::{GREETING_PREFIX, Message, generate_message, generate_message_in, write_greeting};
