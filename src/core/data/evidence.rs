use serde::Serialize;

/// Proof that a key is used somewhere in the source tree.
///
/// Created once per key by the usage locator and never mutated afterwards.
/// Keys without a discovered call site keep the `not_found` state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageEvidence {
    /// Flattened key path this evidence belongs to.
    pub key: String,
    /// File containing the matched call site.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    /// Enclosing function text with the key literal replaced by the
    /// delimited source value. Empty when `found` is false.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub context_snippet: String,
    pub found: bool,
}

impl UsageEvidence {
    pub fn not_found(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn found(
        key: impl Into<String>,
        source_file: impl Into<String>,
        context_snippet: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            source_file: Some(source_file.into()),
            context_snippet: context_snippet.into(),
            found: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_empty() {
        let evidence = UsageEvidence::not_found("Home.title");
        assert_eq!(evidence.key, "Home.title");
        assert!(!evidence.found);
        assert!(evidence.source_file.is_none());
        assert!(evidence.context_snippet.is_empty());
    }

    #[test]
    fn test_serialization_skips_missing_fields() {
        let json = serde_json::to_string(&UsageEvidence::not_found("a.b")).unwrap();
        assert_eq!(json, r#"{"key":"a.b","found":false}"#);
    }
}
