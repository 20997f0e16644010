use crate::cli::{Cli, Commands};
use crate::client::Transport;
use crate::services::config::Config;
use crate::services::output::{print_json, print_table};
use crate::services::resolver::resolve_family;
use crate::services::scan::{binary_matches, scan_binary, scan_yara, yara_rows};
use tracing::info;

pub fn handle_scan_commands(
    cli: &Cli,
    cfg: &Config,
    transport: &dyn Transport,
) -> anyhow::Result<bool> {
    let (body, binary) = match &cli.command {
        Commands::ScanBinary { file } => (scan_binary(transport, file)?, true),
        Commands::ScanYara { rule } => (scan_yara(transport, rule, None)?, false),
        Commands::ScanYaraFamily { family, rule } => {
            let family = resolve_family(transport, family)?;
            (scan_yara(transport, rule, Some(&family))?, false)
        }
        _ => return Ok(false),
    };

    if cfg.json {
        print_json(&body)?;
    } else if binary {
        let matches = binary_matches(&body)?;
        info!("{} matching rules", matches.len());
        let rows: Vec<Vec<String>> = matches
            .into_iter()
            .map(|m| {
                vec![
                    m.family.unwrap_or_default(),
                    m.rule,
                    m.matched_strings.to_string(),
                    m.matched_hits.to_string(),
                ]
            })
            .collect();
        print_table(&["Family", "Rule", "Strings", "Hits"], &rows);
    } else {
        let rows: Vec<Vec<String>> = yara_rows(&body)?
            .into_iter()
            .map(|(rule, family, sample)| vec![rule, family, sample])
            .collect();
        print_table(&["Rule Name", "Matching Family", "Matching Sample"], &rows);
    }
    Ok(true)
}
