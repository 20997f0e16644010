//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `config.rs` — API key / base URL resolution from flags and config files.
//! - `resolver.rs` — user-typed actor/family names → canonical identifiers.
//! - `lookup.rs` — read-only payload decoding and table row assembly.
//! - `samples.rs` — hash classification, sample download, raw/zip packaging.
//! - `archive.rs` — zip extraction with path-traversal guard.
//! - `yara.rs` — Yara rule bundle selection and persistence.
//! - `scan.rs` — binary and rule uploads, scan result flattening.
//! - `output.rs` — JSON/text/table output helpers.
//!
//! ## Conventions
//! - Services take a `&dyn Transport` and return `error::Result`.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod archive;
pub mod config;
pub mod lookup;
pub mod output;
pub mod resolver;
pub mod samples;
pub mod scan;
pub mod yara;
