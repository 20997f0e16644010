use crate::cli::{Cli, Commands, YaraCommands};
use crate::client::Transport;
use crate::services::config::Config;
use crate::services::output::print_one;
use crate::services::resolver::resolve_family;
use crate::services::samples::{download_family, download_sample, package, DecodePolicy, Packaging};
use crate::services::yara::{fetch_rules, save_rules, YaraSelector};
use std::path::PathBuf;

pub fn handle_transfer_commands(
    cli: &Cli,
    cfg: &Config,
    transport: &dyn Transport,
) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::GetSample { hash, pack, output } => {
            let states = download_sample(transport, hash, DecodePolicy::Strict)?;
            let packaging = if pack.raw {
                Packaging::Raw {
                    dir: PathBuf::from("."),
                }
            } else {
                Packaging::Zip {
                    path: output.clone(),
                    password: pack.password().map(str::to_string),
                }
            };
            let report = package(&states, hash, &packaging)?;
            print_one(cfg.json, report, |r| {
                r.files
                    .iter()
                    .map(|f| format!("{}\t{}\t{} bytes", f.state, f.path, f.size))
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
        }
        Commands::DownloadFamily { name, pack, dir } => {
            let family = resolve_family(transport, name)?;
            std::fs::create_dir_all(dir)?;
            let report = download_family(transport, &family, dir, pack.raw, pack.password())?;
            print_one(cfg.json, report, |r| {
                format!(
                    "wrote {} samples of {} to {} ({} failed)",
                    r.written.len(),
                    r.family,
                    dir.display(),
                    r.failed.len()
                )
            })?;
        }
        Commands::GetYara { command } => {
            let (selector, out) = match command {
                YaraCommands::Tlp { level, out } => (YaraSelector::Tlp(level.clone()), out),
                YaraCommands::Family { name, out } => (YaraSelector::Family(name.clone()), out),
            };
            let (resolved, bytes) = fetch_rules(transport, &selector)?;
            let report = save_rules(&resolved, &bytes, &out.output, out.zip)?;
            print_one(cfg.json, report, |r| {
                if r.extracted {
                    format!("extracted {} rule files to {}", r.files.len(), r.output)
                } else {
                    format!("wrote rules to {}", r.output)
                }
            })?;
        }
        _ => return Ok(false),
    }
    Ok(true)
}
