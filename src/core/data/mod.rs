//! Core data types shared by every pipeline stage.
//!
//! ## Module Structure
//!
//! - `entry`: `OrderedEntry`, one flattened leaf of the input dictionary
//! - `evidence`: `UsageEvidence`, where (and how) a key is used in source
//! - `record`: `TranslationRecord`, per-key state threaded through the tiers

pub mod entry;
pub mod evidence;
pub mod record;

pub use entry::OrderedEntry;
pub use evidence::UsageEvidence;
pub use record::{Tier, TierFailure, TranslationRecord};
