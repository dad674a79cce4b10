//! Scan-phase pipeline.
//!
//! ## Module Structure
//!
//! - `parsers`: message flattening and TypeScript/TSX parsing
//! - `file_scanner`: source file selection
//! - `locate`: call-site discovery, function naming and context snippets
//! - `data`: entries, evidence and per-key translation records
//! - `aggregate`: translation choice and output files
//! - `context`: `TranslateContext`, which runs the scan phase end to end
//!
//! Everything here runs on one thread; only the translation phase is
//! concurrent.

pub mod aggregate;
pub mod context;
pub mod data;
pub mod file_scanner;
pub mod locate;
pub mod parsers;

pub use context::TranslateContext;
pub use data::{OrderedEntry, Tier, TierFailure, TranslationRecord, UsageEvidence};
