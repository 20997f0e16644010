use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct JsonError {
    pub ok: bool,
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Version {
    pub date: String,
    pub version: i64,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Actor {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub meta: ActorMeta,
    #[serde(default)]
    pub families: BTreeMap<String, Family>,
    #[serde(default)]
    pub related: Vec<Related>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ActorMeta {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub refs: Vec<String>,
    #[serde(default, rename = "cfr-suspected-victims")]
    pub cfr_suspected_victims: Vec<String>,
    #[serde(default, rename = "cfr-target-category")]
    pub cfr_target_category: Vec<String>,
    #[serde(default, rename = "cfr-type-of-incident")]
    pub cfr_type_of_incident: Option<String>,
    #[serde(default, rename = "cfr-suspected-state-sponsor")]
    pub cfr_suspected_state_sponsor: Option<String>,
    #[serde(default, rename = "attribution-confidence")]
    pub attribution_confidence: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Related {
    #[serde(rename = "dest-uuid")]
    pub dest_uuid: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Family {
    #[serde(default)]
    pub common_name: String,
    #[serde(default)]
    pub updated: String,
    #[serde(default)]
    pub attribution: Vec<String>,
    #[serde(default)]
    pub alt_names: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub sources: Vec<serde_json::Value>,
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<FamilyProperties>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct FamilyProperties {
    #[serde(default)]
    pub programming_language: Option<String>,
    #[serde(default)]
    pub iat: Option<serde_json::Value>,
    #[serde(default)]
    pub obfuscation: Vec<serde_json::Value>,
    #[serde(default)]
    pub pe_header: Option<serde_json::Value>,
    #[serde(default)]
    pub valid_timestamp: Option<serde_json::Value>,
}

/// One row of `/list/samples/{family}`.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FamilySample {
    pub status: String,
    pub sha256: String,
    #[serde(default)]
    pub version: Option<String>,
}

/// Candidate returned by the `/find/...` endpoints.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Candidate {
    pub name: String,
    #[serde(default)]
    pub common_name: Option<String>,
    #[serde(default)]
    pub alt_names: Vec<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

/// The find endpoints answer either with a bare list or a wrapped one.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FindResponse {
    List(Vec<Candidate>),
    Wrapped { candidates: Vec<Candidate> },
}

impl FindResponse {
    pub fn into_candidates(self) -> Vec<Candidate> {
        match self {
            FindResponse::List(c) => c,
            FindResponse::Wrapped { candidates } => candidates,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ScanMatch {
    #[serde(rename = "match")]
    pub matched: bool,
    #[serde(default)]
    pub matched_strings: i64,
    #[serde(default)]
    pub matched_hits: i64,
}

/// Binary scan results come back keyed by rule, or by family then rule.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum BinaryScanEntry {
    Rule(ScanMatch),
    Family(BTreeMap<String, ScanMatch>),
}

/// rule → family → sample → metadata
pub type YaraScanResult =
    BTreeMap<String, BTreeMap<String, BTreeMap<String, serde_json::Value>>>;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct BinaryScanRow {
    pub family: Option<String>,
    pub rule: String,
    pub matched_strings: i64,
    pub matched_hits: i64,
}

#[derive(Debug, Serialize, Clone)]
pub struct WrittenSample {
    pub state: String,
    pub path: String,
    pub size: usize,
    pub sha256: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct SampleReport {
    pub hash: String,
    pub archive: Option<String>,
    pub encrypted: bool,
    pub files: Vec<WrittenSample>,
}

#[derive(Debug, Serialize, Clone)]
pub struct BatchReport {
    pub family: String,
    pub written: Vec<SampleReport>,
    pub failed: Vec<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct YaraReport {
    pub selector: String,
    pub output: String,
    pub extracted: bool,
    pub files: Vec<String>,
}
