//! Command handler layer.
//!
//! Each handler matches the subcommands it owns and returns `Ok(false)`
//! for anything else, so `main` can chain them.
//!
//! ## Files
//! - `lookup.rs` — actor/family/version reads.
//! - `transfer.rs` — sample and Yara bundle downloads.
//! - `scan.rs` — binary and Yara rule uploads.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - `--json` prints backend payloads verbatim (pretty) for reads and
//!   a `{"ok": true, "data": ...}` report for writes.

pub mod lookup;
pub mod scan;
pub mod transfer;

pub use lookup::handle_lookup_commands;
pub use scan::handle_scan_commands;
pub use transfer::handle_transfer_commands;
