//! Shared data model layer (structs/constants only).
//!
//! ## Files
//! - `models.rs` — API payload records and output structs.
//! - `constants.rs` — base URL, default file names, TLP mapping.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! Payload structs mirror the Malpedia API. Fields the API may omit are
//! `Option<_>` or `#[serde(default)]`; keep that distinction when editing.

pub mod constants;
pub mod models;
