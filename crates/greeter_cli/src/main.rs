/* 📖 # Why is the CLI minimal and hardcoded?

The CLI takes no arguments. It greets the name from `greeter.toml` in the current
directory, or `world` when there is no such file.

Exit codes:
- 0: Success (greeting printed to stdout)
- 1: Error (bad config, allocation failure, or stdout not writable); nothing is printed to stdout
*/

use std::env;
use std::io;
use std::process::ExitCode;

use greeter_base::tracing::{debug, init_tracing};
use greeter_base::{GreeterResult, ResultExt, SystemHeap, err};
use greeter_engine::{CONFIG_FILE_NAME, load_config_or_default, write_greeting};

fn main() -> ExitCode {
    if let Err(e) = init_tracing() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> GreeterResult<()> {
    let current_dir =
        env::current_dir().map_err(|e| err!("Failed to get current directory: {}", e))?;
    let config = load_config_or_default(&current_dir.join(CONFIG_FILE_NAME))?;
    debug!(name = %config.name, "configuration loaded");

    write_greeting(&SystemHeap, &config.name, &mut io::stdout().lock()).context("greeting failed")
}
