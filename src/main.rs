use std::process::ExitCode;

use clap::Parser;
use log::{error, info, warn};

use prism_config::configure;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Configuration file e.g.: "conf/dev.yaml"
    #[arg(short = 'c', default_value = "")]
    config: String,
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();

    let loaded = match configure(&args.config) {
        Ok(loaded) => loaded,
        Err(error) => {
            error!("{error}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(error) = &loaded.logger_error {
        warn!("continuing with degraded logging: {error}");
    }

    let config = loaded.config;
    info!(
        "listen: {:?}\nbackends: {:?}\nsync log methods: {:?}",
        config.yaml().listen(),
        config
            .yaml()
            .backends()
            .iter()
            .map(|backend| backend.to_string())
            .collect::<Vec<_>>(),
        config.sync_log_methods_set()
    );

    if let Some(main_log) = config.main_log() {
        if let Err(error) = main_log.log("configuration loaded") {
            warn!("could not write to main log: {error}");
        }
    }

    ExitCode::SUCCESS
}
