use crate::client::{Endpoint, Transport};
use crate::domain::models::{BinaryScanEntry, BinaryScanRow, YaraScanResult};
use crate::error::{MalpediaError, Result};
use crate::services::lookup::decode;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

fn upload_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            MalpediaError::invalid_argument(format!("{} is not a file", path.display()))
        })
}

pub fn scan_binary(transport: &dyn Transport, path: &Path) -> Result<Vec<u8>> {
    let name = upload_name(path)?;
    let body = std::fs::read(path)?;
    debug!("submitting {} ({} bytes) for binary scan", name, body.len());
    transport.post_multipart(&Endpoint::ScanBinary, &name, body)
}

/// Matching rules only, in key order.
pub fn binary_matches(body: &[u8]) -> Result<Vec<BinaryScanRow>> {
    let entries: BTreeMap<String, BinaryScanEntry> = decode(body)?;
    let mut rows = Vec::new();
    for (key, entry) in entries {
        match entry {
            BinaryScanEntry::Rule(m) if m.matched => rows.push(BinaryScanRow {
                family: None,
                rule: key,
                matched_strings: m.matched_strings,
                matched_hits: m.matched_hits,
            }),
            BinaryScanEntry::Rule(_) => {}
            BinaryScanEntry::Family(rules) => {
                for (rule, m) in rules.into_iter().filter(|(_, m)| m.matched) {
                    rows.push(BinaryScanRow {
                        family: Some(key.clone()),
                        rule,
                        matched_strings: m.matched_strings,
                        matched_hits: m.matched_hits,
                    });
                }
            }
        }
    }
    Ok(rows)
}

/// Upload a rule file; `family` must already be resolved.
pub fn scan_yara(transport: &dyn Transport, rule_path: &Path, family: Option<&str>) -> Result<Vec<u8>> {
    let body = std::fs::read(rule_path)?;
    let endpoint = match family {
        Some(f) => Endpoint::ScanYaraFamily(f.to_string()),
        None => Endpoint::ScanYara,
    };
    debug!("submitting {} to {}", rule_path.display(), endpoint);
    transport.post_raw(&endpoint, body)
}

pub fn yara_rows(body: &[u8]) -> Result<Vec<(String, String, String)>> {
    let result: YaraScanResult = decode(body)?;
    let mut rows = Vec::new();
    for (rule, families) in result {
        for (family, samples) in families {
            for sample in samples.into_keys() {
                rows.push((rule.clone(), family.clone(), sample));
            }
        }
    }
    Ok(rows)
}
