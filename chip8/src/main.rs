use clap::Parser;
use env_logger::Env;

use crate::config::Config;
use crate::run::run;

mod audio;
mod config;
mod keymap;
mod run;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    let default_filter = if config.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    run(&config)
}
