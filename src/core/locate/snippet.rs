//! Context snippet construction.
//!
//! The snippet handed to the generation service is the enclosing function's
//! text with the key literal swapped for the source-language value, wrapped
//! in [`DELIMITER`] so the model can find the segment being translated.

/// Marker placed on both sides of the value inside a snippet.
pub const DELIMITER: &str = "---";

/// Wrap a value in the snippet delimiter: `Welcome` -> `---Welcome---`.
pub fn delimit(value: &str) -> String {
    format!("{DELIMITER}{value}{DELIMITER}")
}

/// Replace every occurrence of `literal` in `function_text` with the
/// delimited `value`.
///
/// Substitution is textual: occurrences outside the translation call are
/// replaced too. The snippet is advisory context only, so an occasional
/// over-substitution of a short literal is tolerated.
pub fn build_snippet(function_text: &str, literal: &str, value: &str) -> String {
    if literal.is_empty() {
        return function_text.to_string();
    }
    function_text.replace(literal, &delimit(value))
}
