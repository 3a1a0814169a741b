use anyhow::Result;
use env_logger::Env;

use sd_treebank::cli;
use sd_treebank::config::Config;

fn main() -> Result<()> {
    // Parse configuration from command line and environment
    let config = Config::from_args_and_env()?;

    env_logger::Builder::from_env(Env::default().default_filter_or(config.log_level.as_str()))
        .init();

    let clean = cli::run(&config)?;

    if config.strict && !clean {
        std::process::exit(1);
    }

    Ok(())
}
