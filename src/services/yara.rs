use crate::client::{Endpoint, Transport};
use crate::domain::constants::TLP_CATEGORIES;
use crate::domain::models::YaraReport;
use crate::error::{MalpediaError, Result};
use crate::services::{archive, resolver};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YaraSelector {
    Tlp(String),
    Family(String),
}

pub fn tlp_category(level: &str) -> Result<&'static str> {
    TLP_CATEGORIES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(level))
        .map(|(_, category)| *category)
        .ok_or_else(|| MalpediaError::invalid_argument(format!("invalid TLP level: {level}")))
}

/// Fetch the rule bundle; returns the backend selector used and the zip bytes.
pub fn fetch_rules(transport: &dyn Transport, selector: &YaraSelector) -> Result<(String, Vec<u8>)> {
    let resolved = match selector {
        YaraSelector::Tlp(level) => tlp_category(level)?.to_string(),
        YaraSelector::Family(name) => resolver::resolve_family(transport, name)?,
    };
    debug!("requesting yara bundle for {}", resolved);
    let bytes = transport.get(&Endpoint::YaraZip(resolved.clone()))?;
    Ok((resolved, bytes))
}

/// Persist the bundle as-is, or unpack it into `output` through a
/// temporary archive that is removed when this returns.
pub fn save_rules(selector: &str, bytes: &[u8], output: &Path, keep_zip: bool) -> Result<YaraReport> {
    if keep_zip {
        std::fs::write(output, bytes)?;
        info!("wrote yara bundle to {}", output.display());
        return Ok(YaraReport {
            selector: selector.to_string(),
            output: output.display().to_string(),
            extracted: false,
            files: Vec::new(),
        });
    }

    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;
    let mut tmp = tempfile::Builder::new()
        .prefix(".malpedia-yara")
        .suffix(".zip")
        .tempfile_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;

    let files = archive::unzip(tmp.path(), output)?;
    info!("extracted {} yara files to {}", files.len(), output.display());
    Ok(YaraReport {
        selector: selector.to_string(),
        output: output.display().to_string(),
        extracted: true,
        files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::FakeTransport;
    use std::fs::{self, File};
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn bundle() -> Vec<u8> {
        let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
        zip.start_file("win.emotet/win.emotet_auto.yar", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"rule win_emotet_auto { condition: true }").unwrap();
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn tlp_levels_map_to_categories() {
        assert_eq!(tlp_category("white").unwrap(), "tlp_white");
        assert_eq!(tlp_category("green").unwrap(), "tlp_green");
        assert_eq!(tlp_category("AMBER").unwrap(), "tlp_amber");
    }

    #[test]
    fn unknown_tlp_fails_without_request() {
        let t = FakeTransport::new();
        let err = fetch_rules(&t, &YaraSelector::Tlp("purple".into())).unwrap_err();
        assert!(matches!(err, MalpediaError::InvalidArgument(_)));
        assert!(t.requests.borrow().is_empty());
    }

    #[test]
    fn family_selector_resolves_first() {
        let zipped = bundle();
        let t = FakeTransport::new()
            .route("/find/family/emotet", r#"[{"name":"win.emotet"}]"#)
            .route("/get/yara/win.emotet/zip", zipped.clone());
        let (resolved, bytes) = fetch_rules(&t, &YaraSelector::Family("emotet".into())).unwrap();
        assert_eq!(resolved, "win.emotet");
        assert_eq!(bytes, zipped);
        assert_eq!(
            t.requests.borrow().as_slice(),
            ["/find/family/emotet", "/get/yara/win.emotet/zip"]
        );
    }

    #[test]
    fn extraction_leaves_no_temporary_archive() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("yara_rules");
        let report = save_rules("tlp_white", &bundle(), &out, false).unwrap();

        assert!(report.extracted);
        assert_eq!(report.files, ["win.emotet/win.emotet_auto.yar"]);
        assert!(out.join("win.emotet/win.emotet_auto.yar").exists());
        let leftovers: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, ["yara_rules"]);
    }

    #[test]
    fn extraction_creates_missing_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("nested").join("deeper").join("rules");
        let report = save_rules("tlp_amber", &bundle(), &out, false).unwrap();

        assert!(report.extracted);
        assert!(out.join("win.emotet/win.emotet_auto.yar").exists());
        let leftovers: Vec<_> = fs::read_dir(out.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, ["rules"]);
    }

    #[test]
    fn zip_mode_keeps_bundle() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("rules.zip");
        let report = save_rules("tlp_green", &bundle(), &out, true).unwrap();
        assert!(!report.extracted);
        let archive = zip::ZipArchive::new(File::open(&out).unwrap()).unwrap();
        assert_eq!(archive.len(), 1);
    }
}
