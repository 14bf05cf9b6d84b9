use anyhow::Context;
use clap::Parser;

use memcmp::args::{MemcmpCli, derive_settings};
use memcmp::logging::init_logging;
use memcmp::run::{EXIT_FATAL, run};
use memcmp_core::config::{load_memcmp_config, load_memcmp_config_from_path};

fn main() {
    let cli = MemcmpCli::parse();
    init_logging(cli.verbose, cli.quiet);

    let code = match try_main(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("memcmp: {err:#}");
            EXIT_FATAL
        }
    };
    std::process::exit(code);
}

fn try_main(cli: &MemcmpCli) -> anyhow::Result<i32> {
    let cfg = match &cli.config {
        Some(path) => load_memcmp_config_from_path(path)?,
        None => {
            let cwd = std::env::current_dir().context("failed to resolve current directory")?;
            load_memcmp_config(&cwd)?
        }
    };
    let settings = derive_settings(cli, &cfg);
    let outcome = run(&settings, chrono::Local::now().naive_local())?;
    Ok(outcome.exit_code())
}
