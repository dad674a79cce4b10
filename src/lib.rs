//! ctxlate - context-aware translation for next-intl style message files
//!
//! ctxlate is a CLI tool and library that translates a JSON message file
//! key by key. For each key it finds where the key is used in TypeScript/TSX
//! source, and escalates through three translation tiers: the bare text, the
//! text plus the enclosing function, and a guided translation driven by a
//! generated description of the UI element.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and validation
//! - `core`: Scan phase (flatten, locate, snippet) and output aggregation
//! - `translate`: Generation client, prompts and the escalation engine
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod translate;
pub mod utils;
