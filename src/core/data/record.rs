//! Per-key translation state.
//!
//! A `TranslationRecord` is created after flattening and location, then owned
//! by exactly one escalation task. Each tier writes only its own fields, so
//! records never share mutable state across keys.

use std::fmt;

use serde::Serialize;

use super::{OrderedEntry, UsageEvidence};

// ============================================================
// Tiers
// ============================================================

/// One stage of progressively context-richer translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    /// Source text alone.
    Bare,
    /// Source text plus the enclosing function snippet.
    FunctionContext,
    /// Source text plus a generated description of the UI element.
    AiContext,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Bare => write!(f, "bare"),
            Tier::FunctionContext => write!(f, "function-context"),
            Tier::AiContext => write!(f, "ai-context"),
        }
    }
}

/// Annotation left on a record when one of its tiers could not complete.
///
/// Tiers after the failing one are not attempted; tiers before it keep
/// their output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierFailure {
    pub tier: Tier,
    pub message: String,
}

impl TierFailure {
    pub fn new(tier: Tier, error: impl fmt::Display) -> Self {
        Self {
            tier,
            message: error.to_string(),
        }
    }
}

impl fmt::Display for TierFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} tier failed: {}", self.tier, self.message)
    }
}

// ============================================================
// Translation Record
// ============================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRecord {
    /// Serialized through `evidence.key`, which always holds the same path.
    #[serde(skip)]
    pub key: String,
    pub source_text: String,
    #[serde(flatten)]
    pub evidence: UsageEvidence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simple_translation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contextual_translation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_translation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<TierFailure>,
}

impl TranslationRecord {
    pub fn new(entry: &OrderedEntry, evidence: UsageEvidence) -> Self {
        Self {
            key: entry.path.clone(),
            source_text: entry.value.clone(),
            evidence,
            simple_translation: None,
            contextual_translation: None,
            ai_context: None,
            final_translation: None,
            failure: None,
        }
    }

    /// The richest translation obtained so far.
    ///
    /// Precedence: final (AI context) > contextual (function context) > simple.
    /// Returns `None` when not even the bare tier succeeded.
    pub fn preferred_translation(&self) -> Option<&str> {
        self.final_translation
            .as_deref()
            .or(self.contextual_translation.as_deref())
            .or(self.simple_translation.as_deref())
    }

    /// The tier that would run next, given what has been filled in.
    pub fn pending_tier(&self) -> Tier {
        if self.simple_translation.is_none() {
            Tier::Bare
        } else if self.contextual_translation.is_none() {
            Tier::FunctionContext
        } else {
            Tier::AiContext
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(found: bool) -> TranslationRecord {
        let entry = OrderedEntry::new("Home.title", "Welcome");
        let evidence = if found {
            UsageEvidence::found("Home.title", "page.tsx", "t(\"---Welcome---\")")
        } else {
            UsageEvidence::not_found("Home.title")
        };
        TranslationRecord::new(&entry, evidence)
    }

    #[test]
    fn test_preferred_translation_precedence() {
        let mut rec = record(true);
        assert_eq!(rec.preferred_translation(), None);

        rec.simple_translation = Some("欢迎".to_string());
        assert_eq!(rec.preferred_translation(), Some("欢迎"));

        rec.contextual_translation = Some("欢迎光临".to_string());
        assert_eq!(rec.preferred_translation(), Some("欢迎光临"));

        rec.final_translation = Some("欢迎回来".to_string());
        assert_eq!(rec.preferred_translation(), Some("欢迎回来"));
    }

    #[test]
    fn test_final_wins_even_without_contextual() {
        let mut rec = record(true);
        rec.simple_translation = Some("a".to_string());
        rec.final_translation = Some("c".to_string());
        assert_eq!(rec.preferred_translation(), Some("c"));
    }

    #[test]
    fn test_pending_tier() {
        let mut rec = record(true);
        assert_eq!(rec.pending_tier(), Tier::Bare);
        rec.simple_translation = Some("a".to_string());
        assert_eq!(rec.pending_tier(), Tier::FunctionContext);
        rec.contextual_translation = Some("b".to_string());
        assert_eq!(rec.pending_tier(), Tier::AiContext);
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(Tier::Bare.to_string(), "bare");
        assert_eq!(Tier::FunctionContext.to_string(), "function-context");
        assert_eq!(Tier::AiContext.to_string(), "ai-context");
        let failure = TierFailure::new(Tier::FunctionContext, "HTTP 500");
        assert_eq!(failure.to_string(), "function-context tier failed: HTTP 500");
    }

    #[test]
    fn test_record_serialization_flattens_evidence() {
        let mut rec = record(false);
        rec.simple_translation = Some("欢迎".to_string());
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["key"], "Home.title");
        assert_eq!(json["sourceText"], "Welcome");
        assert_eq!(json["found"], false);
        assert_eq!(json["simpleTranslation"], "欢迎");
        assert!(json.get("finalTranslation").is_none());
    }
}
