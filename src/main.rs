use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;
mod client;
mod commands;
mod domain;
mod error;
mod services;

use cli::Cli;
use client::HttpClient;
use commands::{handle_lookup_commands, handle_scan_commands, handle_transfer_commands};
use error::MalpediaError;
use services::config::Config;
use services::output::print_error;

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise --verbose switches our own spans to debug.
    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("malpedia_cli=debug")
    } else {
        EnvFilter::new("malpedia_cli=info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        let code = e
            .downcast_ref::<MalpediaError>()
            .map(MalpediaError::code)
            .unwrap_or("INTERNAL");
        print_error(cli.json, code, &format!("{e:#}"));
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let cfg = Config::resolve(
        cli.apikey.as_deref(),
        cli.config.as_deref(),
        cli.base_url.as_deref(),
        cli.json,
    )?;
    debug!("using api at {}", cfg.base_url);
    let client = HttpClient::new(&cfg.base_url, &cfg.api_key)?;

    if handle_lookup_commands(cli, &cfg, &client)? {
        return Ok(());
    }
    if handle_transfer_commands(cli, &cfg, &client)? {
        return Ok(());
    }
    if handle_scan_commands(cli, &cfg, &client)? {
        return Ok(());
    }
    anyhow::bail!("unhandled command")
}
