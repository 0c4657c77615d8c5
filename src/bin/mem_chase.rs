//! Reads a large array in random order on every core for the given number of seconds.
//!
//! Usage: `mem_chase [DURATION]`. Logging goes to stderr and follows `RUST_LOG` (default `info`).

use std::process;

use log::error;

use memchase::{Config, Error};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_args(std::env::args_os()) {
        Ok(config) => config,
        // Prints the message with usage; exits 0 for --help/--version and 1 otherwise.
        Err(Error::Usage(e)) => e.exit(),
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    if let Err(e) = memchase::run(&config) {
        error!("{}", e);
        process::exit(1);
    }
}
