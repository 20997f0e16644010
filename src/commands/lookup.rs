use crate::cli::{Cli, Commands};
use crate::client::{Endpoint, Transport};
use crate::domain::models::{Actor, Family, FamilySample, Version};
use crate::services::config::Config;
use crate::services::lookup::{
    actor_rows, decode, family_rows, family_samples, group_by_status, sample_rows,
    sorted_actors, sorted_names,
};
use crate::services::output::{print_json, print_pairs, print_table};
use crate::services::resolver::{resolve_actor, resolve_family};
use tracing::warn;

pub fn handle_lookup_commands(
    cli: &Cli,
    cfg: &Config,
    transport: &dyn Transport,
) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::Actor { name } => {
            let id = resolve_actor(transport, name)?;
            let body = transport.get(&Endpoint::Actor(id))?;
            if cfg.json {
                print_json(&body)?;
            } else {
                let actor: Actor = decode(&body)?;
                print_pairs(["Field", "Value"], &actor_rows(&actor));
            }
        }
        Commands::Actors => {
            let body = transport.get(&Endpoint::Actors)?;
            if cfg.json {
                print_json(&body)?;
            } else {
                for actor in sorted_actors(&body)? {
                    println!("{actor}");
                }
            }
        }
        Commands::Family { name, samples } => {
            let id = resolve_family(transport, name)?;
            let body = transport.get(&Endpoint::Family(id.clone()))?;
            if cfg.json {
                print_json(&body)?;
            } else {
                let family: Family = decode(&body)?;
                let mut rows = family_rows(&family);
                if *samples {
                    match family_samples(transport, &id) {
                        Ok(listing) => rows.extend(sample_rows(&group_by_status(&listing))),
                        Err(e) => warn!("could not list samples of {}: {}", id, e),
                    }
                }
                print_pairs(["Field", "Value"], &rows);
            }
        }
        Commands::Families => {
            let body = transport.get(&Endpoint::Families)?;
            if cfg.json {
                print_json(&body)?;
            } else {
                for name in sorted_names(&body)? {
                    println!("{name}");
                }
            }
        }
        Commands::FamilySamples { name } => {
            let id = resolve_family(transport, name)?;
            let body = transport.get(&Endpoint::FamilySamples(id))?;
            if cfg.json {
                print_json(&body)?;
            } else {
                let mut listing: Vec<FamilySample> = decode(&body)?;
                listing.sort_by(|a, b| a.status.cmp(&b.status));
                let rows: Vec<Vec<String>> = listing
                    .into_iter()
                    .map(|s| vec![s.status, s.sha256, s.version.unwrap_or_default()])
                    .collect();
                print_table(&["Status", "SHA-256", "Version"], &rows);
            }
        }
        Commands::Version => {
            let body = transport.get(&Endpoint::Version)?;
            if cfg.json {
                print_json(&body)?;
            } else {
                let version: Version = decode(&body)?;
                println!("Date: {}", version.date);
                println!("Version: {}", version.version);
            }
        }
        _ => return Ok(false),
    }
    Ok(true)
}
