use crate::client::{Endpoint, Transport};
use crate::domain::models::{BatchReport, SampleReport, WrittenSample};
use crate::error::{MalpediaError, Result};
use crate::services::lookup;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use zip::write::{FileOptions, SimpleFileOptions};
use zip::{AesMode, CompressionMethod, ZipWriter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashKind {
    Md5,
    Sha1,
    Sha256,
}

/// Classify a hex digest by its decoded length.
pub fn hash_kind(hash: &str) -> Result<HashKind> {
    let digest = hex::decode(hash)
        .map_err(|e| MalpediaError::invalid_argument(format!("failed to parse hash {hash}: {e}")))?;
    match digest.len() {
        16 => Ok(HashKind::Md5),
        20 => Ok(HashKind::Sha1),
        32 => Ok(HashKind::Sha256),
        n => Err(MalpediaError::invalid_argument(format!(
            "invalid hash type ({n} bytes)"
        ))),
    }
}

/// Standard base64, tolerating the line breaks some encoders insert.
pub fn decode_base64(content: &str) -> Result<Vec<u8>> {
    let compact: String = content.chars().filter(|c| *c != '\n' && *c != '\r').collect();
    Ok(STANDARD.decode(compact)?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodePolicy {
    /// Any undecodable state fails the download.
    Strict,
    /// Undecodable states are logged and dropped.
    Lenient,
}

/// Decoded sample states keyed by state label.
pub type SampleStates = BTreeMap<String, Vec<u8>>;

pub fn download_sample(
    transport: &dyn Transport,
    hash: &str,
    policy: DecodePolicy,
) -> Result<SampleStates> {
    match hash_kind(hash)? {
        HashKind::Md5 | HashKind::Sha256 => {}
        HashKind::Sha1 => {
            return Err(MalpediaError::invalid_argument(
                "only md5 and sha256 hashes are allowed",
            ))
        }
    }

    let body = transport.get(&Endpoint::SampleRaw(hash.to_string()))?;
    let encoded: BTreeMap<String, String> = serde_json::from_slice(&body)?;

    let mut states = SampleStates::new();
    for (state, content) in encoded {
        match decode_base64(&content) {
            Ok(bytes) => {
                if sha256_hex(&bytes).eq_ignore_ascii_case(hash) {
                    debug!("state {} matches requested hash {}", state, hash);
                }
                states.insert(state, bytes);
            }
            Err(e) if policy == DecodePolicy::Lenient => {
                warn!("skipping {} state of {}: {}", state, hash, e);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(states)
}

pub fn entry_name(state: &str, hash: &str) -> String {
    format!("{state}_{hash}")
}

/// State labels come from the server and become file or entry names, so
/// they must be a single plain path component.
fn entry_names(states: &SampleStates, hash: &str) -> Result<Vec<String>> {
    states
        .keys()
        .map(|state| {
            let name = entry_name(state, hash);
            if state.is_empty() || state.contains(['/', '\\', ':']) || state.contains("..") {
                return Err(MalpediaError::IllegalPath(name));
            }
            Ok(name)
        })
        .collect()
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

#[derive(Debug, Clone)]
pub enum Packaging {
    /// One file per state, `<state>_<hash>`, inside `dir`.
    Raw { dir: PathBuf },
    /// All states in one archive; entries AES-128 encrypted when a
    /// password is set.
    Zip {
        path: PathBuf,
        password: Option<String>,
    },
}

pub fn package(states: &SampleStates, hash: &str, packaging: &Packaging) -> Result<SampleReport> {
    match packaging {
        Packaging::Raw { dir } => Ok(SampleReport {
            hash: hash.to_string(),
            archive: None,
            encrypted: false,
            files: dump_raw(states, hash, dir)?,
        }),
        Packaging::Zip { path, password } => Ok(SampleReport {
            hash: hash.to_string(),
            archive: Some(path.display().to_string()),
            encrypted: password.is_some(),
            files: dump_zip(states, hash, path, password.as_deref())?,
        }),
    }
}

pub fn dump_raw(states: &SampleStates, hash: &str, dir: &Path) -> Result<Vec<WrittenSample>> {
    let names = entry_names(states, hash)?;
    let mut written = Vec::with_capacity(states.len());
    for ((state, bytes), name) in states.iter().zip(names) {
        let path = dir.join(name);
        std::fs::write(&path, bytes)?;
        info!("wrote sample to {}", path.display());
        written.push(WrittenSample {
            state: state.clone(),
            path: path.display().to_string(),
            size: bytes.len(),
            sha256: sha256_hex(bytes),
        });
    }
    Ok(written)
}

pub fn dump_zip(
    states: &SampleStates,
    hash: &str,
    out: &Path,
    password: Option<&str>,
) -> Result<Vec<WrittenSample>> {
    let names = entry_names(states, hash)?;
    let file = File::create(out)?;
    let mut zip = ZipWriter::new(file);

    let base = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let options: FileOptions<'_, ()> = match password {
        Some(pw) => base.with_aes_encryption(AesMode::Aes128, pw),
        None => base,
    };

    let mut written = Vec::with_capacity(states.len());
    for ((state, bytes), name) in states.iter().zip(names) {
        zip.start_file(name.as_str(), options.clone())?;
        zip.write_all(bytes)?;
        written.push(WrittenSample {
            state: state.clone(),
            path: format!("{}:{}", out.display(), name),
            size: bytes.len(),
            sha256: sha256_hex(bytes),
        });
    }
    zip.finish()?;
    info!("wrote sample to {}", out.display());
    Ok(written)
}

/// Download every sample of an already-resolved family. A sample that
/// fails to download or write is reported and skipped.
pub fn download_family(
    transport: &dyn Transport,
    family: &str,
    dir: &Path,
    raw: bool,
    password: Option<&str>,
) -> Result<BatchReport> {
    let samples = lookup::family_samples(transport, family)?;
    let grouped = lookup::group_by_status(&samples);

    let mut report = BatchReport {
        family: family.to_string(),
        written: Vec::new(),
        failed: Vec::new(),
    };

    for (status, hashes) in &grouped {
        for hash in hashes {
            info!("downloading {} sample: {}", status, hash);
            let states = match download_sample(transport, hash, DecodePolicy::Lenient) {
                Ok(s) => s,
                Err(e) => {
                    warn!("unable to download {}: {}", hash, e);
                    report.failed.push(hash.clone());
                    continue;
                }
            };

            let packaging = if raw {
                Packaging::Raw {
                    dir: dir.to_path_buf(),
                }
            } else {
                Packaging::Zip {
                    path: dir.join(format!("{hash}.zip")),
                    password: password.map(str::to_string),
                }
            };

            info!("writing {} sample: {}", status, hash);
            match package(&states, hash, &packaging) {
                Ok(r) => report.written.push(r),
                Err(e) => {
                    warn!("unable to write {}: {}", hash, e);
                    report.failed.push(hash.clone());
                }
            }
        }
    }

    Ok(report)
}
