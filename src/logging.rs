use std::fs::OpenOptions;
use std::path::Path;

use env_logger::{Env, Target};
use log::LevelFilter;

/// Install `env_logger` writing to `path` (level from `RUST_LOG`, default `info`).
/// If the file cannot be opened, logging is switched off.
pub fn init(path: &Path) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => {
            builder.target(Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            builder.filter_level(LevelFilter::Off);
        }
    }
    // A second init (tests, embedding) keeps the first logger
    let _ = builder.try_init();
}
