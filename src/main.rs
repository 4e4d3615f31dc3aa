mod app;
mod config;
mod controllers;
mod endpoint;
mod error;
mod events;
mod logger;
mod page;
mod session;
mod state;
mod utils;

use anyhow::{anyhow, Result};
use app::App;
use clap::{App as ClapApp, Arg};
use config::Config;
use std::path::Path;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let matches = ClapApp::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Sets a custom configuration directory")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Logs controller activity at debug level"),
        )
        .arg(
            Arg::with_name("SCENARIO")
                .help("Scenario file of page events to replay")
                .required(true)
                .index(1),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;

    let scenario = matches
        .value_of("SCENARIO")
        .ok_or_else(|| anyhow!("No scenario file given"))?;
    App::start(config, Path::new(scenario), matches.is_present("verbose")).await
}
