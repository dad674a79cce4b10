//! File parsers for message and source files.
//!
//! This module provides parsers for different file types:
//! - `json`: message dictionary flattening and nested re-serialization
//! - `source`: TypeScript / TSX source parser (uses swc for AST generation)

pub mod json;
pub mod source;
