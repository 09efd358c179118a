use anyhow::Context;
use clap::Parser;

use termlock::cli::Cli;
use termlock::{logging, runtime};

fn main() {
    let cli = Cli::parse();
    let code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("termlock: {:#}", e);
            1
        }
    };
    std::process::exit(code);
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    let config = cli.load_config()?;
    logging::init_tracing(config.logging.file.as_deref()).with_context(|| {
        format!(
            "Failed to open log file '{}'",
            config
                .logging
                .file
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        )
    })?;
    Ok(runtime::run(&config)?)
}
