use crate::client::{Endpoint, Transport};
use crate::domain::models::{Actor, Family, FamilySample};
use crate::error::Result;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(body)?)
}

pub fn family_samples(transport: &dyn Transport, family: &str) -> Result<Vec<FamilySample>> {
    let body = transport.get(&Endpoint::FamilySamples(family.to_string()))?;
    decode(&body)
}

/// status → hashes, statuses sorted, hashes in listing order.
pub fn group_by_status(samples: &[FamilySample]) -> BTreeMap<String, Vec<String>> {
    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for s in samples {
        grouped
            .entry(s.status.clone())
            .or_default()
            .push(s.sha256.clone());
    }
    grouped
}

pub fn sorted_names(body: &[u8]) -> Result<Vec<String>> {
    let families: BTreeMap<String, serde_json::Value> = decode(body)?;
    Ok(families.into_keys().collect())
}

pub fn sorted_actors(body: &[u8]) -> Result<Vec<String>> {
    let mut actors: Vec<String> = decode(body)?;
    actors.sort();
    Ok(actors)
}

fn single_line(text: &str) -> String {
    text.replace(['\t', '\n'], " ").replace('\r', "")
}

fn numbered(rows: &mut Vec<(String, String)>, label: &str, values: &[String]) {
    for (i, v) in values.iter().enumerate() {
        rows.push((format!("{label} {}", i + 1), v.clone()));
    }
}

pub fn family_rows(family: &Family) -> Vec<(String, String)> {
    let mut rows = vec![
        ("Common Name".to_string(), family.common_name.clone()),
        ("Last Updated".to_string(), family.updated.clone()),
    ];
    numbered(&mut rows, "Alias", &family.alt_names);
    numbered(&mut rows, "Attribution", &family.attribution);
    let description = single_line(&family.description);
    if !description.is_empty() {
        rows.push(("Description".to_string(), description));
    }
    if let Some(props) = &family.properties {
        if let Some(lang) = &props.programming_language {
            rows.push(("Language".to_string(), lang.clone()));
        }
        if !props.obfuscation.is_empty() {
            let packers: Vec<String> = props
                .obfuscation
                .iter()
                .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
                .collect();
            rows.push(("Obfuscation".to_string(), packers.join(", ")));
        }
    }
    numbered(&mut rows, "Reference", &family.urls);
    rows
}

pub fn sample_rows(grouped: &BTreeMap<String, Vec<String>>) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    for (status, hashes) in grouped {
        numbered(&mut rows, status, hashes);
    }
    rows
}

pub fn actor_rows(actor: &Actor) -> Vec<(String, String)> {
    let mut rows = vec![("Name".to_string(), actor.value.clone())];
    if !actor.meta.country.is_empty() {
        rows.push(("Country".to_string(), actor.meta.country.clone()));
    }
    let description = single_line(&actor.description);
    if !description.is_empty() {
        rows.push(("Description".to_string(), description));
    }
    numbered(&mut rows, "Synonym", &actor.meta.synonyms);
    for (id, family) in &actor.families {
        let label = if family.common_name.is_empty() {
            id.clone()
        } else {
            format!("{} ({})", id, family.common_name)
        };
        rows.push(("Family".to_string(), label));
    }
    let related: Vec<String> = actor
        .related
        .iter()
        .map(|r| format!("{} [{}]", r.dest_uuid, r.kind))
        .collect();
    numbered(&mut rows, "Related", &related);
    numbered(&mut rows, "Reference", &actor.meta.refs);
    rows
}
