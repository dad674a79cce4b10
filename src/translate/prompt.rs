//! Prompt templates for each escalation step.
//!
//! Every template puts the text being worked on between [`DELIMITER`]s on
//! the last line of the user prompt, and asks for bare output without those
//! delimiters.

use std::sync::Arc;

use enum_dispatch::enum_dispatch;

use super::client::CompletionRequest;
use crate::core::{
    Tier,
    locate::snippet::{DELIMITER, delimit},
};

/// A single request made while escalating a key.
///
/// The AI-context tier needs two requests: a description of the UI element
/// followed by a translation guided by that description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Bare,
    FunctionContext,
    ContextDescription,
    GuidedTranslation,
}

impl Step {
    pub fn tier(self) -> Tier {
        match self {
            Step::Bare => Tier::Bare,
            Step::FunctionContext => Tier::FunctionContext,
            Step::ContextDescription | Step::GuidedTranslation => Tier::AiContext,
        }
    }
}

/// Run-wide target language settings, shared by every prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetLocale {
    /// Locale code such as `zh-CN`; the regional variant is inferred from it.
    pub code: String,
    /// Terms to keep untranslated.
    pub preserve_terms: Vec<String>,
}

impl TargetLocale {
    pub fn new(code: impl Into<String>, preserve_terms: Vec<String>) -> Self {
        Self {
            code: code.into(),
            preserve_terms,
        }
    }

    fn preserve_rule(&self) -> Option<String> {
        if self.preserve_terms.is_empty() {
            return None;
        }
        Some(format!(
            "Keep the following terms exactly as written, untranslated: {}.",
            self.preserve_terms.join(", ")
        ))
    }
}

const ROLE: &str = "You translate the user interface of a website.";

fn output_rules(target: Option<&TargetLocale>) -> String {
    let mut rules = vec![
        "Reply with the requested text only, without explanations, quotes or notes.".to_string(),
        format!("Do not include the \"{DELIMITER}\" delimiters in the reply."),
    ];
    if let Some(rule) = target.and_then(TargetLocale::preserve_rule) {
        rules.push(rule);
    }
    rules.join("\n")
}

#[enum_dispatch]
pub trait PromptTemplate {
    fn step(&self) -> Step;

    fn system_prompt(&self) -> String;

    fn user_prompt(&self) -> String;

    /// Deterministic by default; exploratory steps return `None`.
    fn temperature(&self) -> Option<f32> {
        Some(0.0)
    }
}

#[enum_dispatch(PromptTemplate)]
#[derive(Debug, Clone)]
pub enum Prompt {
    Bare(BarePrompt),
    FunctionContext(FunctionContextPrompt),
    ContextDescription(ContextDescriptionPrompt),
    Guided(GuidedPrompt),
}

impl Prompt {
    pub fn request(&self) -> CompletionRequest {
        CompletionRequest {
            step: self.step(),
            system: self.system_prompt(),
            user: self.user_prompt(),
            temperature: self.temperature(),
        }
    }
}

// ============================================================
// Templates
// ============================================================

/// Source text alone.
#[derive(Debug, Clone)]
pub struct BarePrompt {
    pub target: Arc<TargetLocale>,
    pub text: String,
}

impl PromptTemplate for BarePrompt {
    fn step(&self) -> Step {
        Step::Bare
    }

    fn system_prompt(&self) -> String {
        format!(
            "{ROLE}\n\
             You receive a language code and a text delimited by \"{DELIMITER}\".\n\
             First infer the regional language the language code stands for, \
             then translate the delimited text into that language.\n\
             {}",
            output_rules(Some(&self.target))
        )
    }

    fn user_prompt(&self) -> String {
        format!(
            "Language code: {}\nText to translate: {}",
            self.target.code,
            delimit(&self.text)
        )
    }
}

/// Source text plus the enclosing function as situational evidence.
#[derive(Debug, Clone)]
pub struct FunctionContextPrompt {
    pub target: Arc<TargetLocale>,
    pub text: String,
    pub snippet: String,
}

impl PromptTemplate for FunctionContextPrompt {
    fn step(&self) -> Step {
        Step::FunctionContext
    }

    fn system_prompt(&self) -> String {
        format!(
            "{ROLE}\n\
             You receive a language code, a code snippet and a text delimited by \"{DELIMITER}\".\n\
             First infer the regional language the language code stands for. \
             Then work out from the snippet how the delimited text is shown in the interface. \
             Finally translate the delimited text into that language so it fits that usage.\n\
             {}",
            output_rules(Some(&self.target))
        )
    }

    fn user_prompt(&self) -> String {
        format!(
            "Language code: {}\nCode snippet:\n{}\nText to translate: {}",
            self.target.code,
            self.snippet,
            delimit(&self.text)
        )
    }
}

/// Ask for a plain-language description of the UI element showing the text.
#[derive(Debug, Clone)]
pub struct ContextDescriptionPrompt {
    pub text: String,
    pub snippet: String,
}

impl PromptTemplate for ContextDescriptionPrompt {
    fn step(&self) -> Step {
        Step::ContextDescription
    }

    fn system_prompt(&self) -> String {
        format!(
            "{ROLE}\n\
             You receive a code snippet and a text delimited by \"{DELIMITER}\" that will be translated later.\n\
             Describe in one or two sentences how the delimited text appears in the interface: \
             what kind of element shows it and what it tells the user.\n\
             Describe only what the user sees; do not mention code, frameworks or technologies.\n\
             {}",
            output_rules(None)
        )
    }

    fn user_prompt(&self) -> String {
        format!(
            "Code snippet:\n{}\nText to be translated later: {}",
            self.snippet,
            delimit(&self.text)
        )
    }

    fn temperature(&self) -> Option<f32> {
        None
    }
}

/// Source text plus the generated UI description as guidance.
#[derive(Debug, Clone)]
pub struct GuidedPrompt {
    pub target: Arc<TargetLocale>,
    pub text: String,
    pub description: String,
}

impl PromptTemplate for GuidedPrompt {
    fn step(&self) -> Step {
        Step::GuidedTranslation
    }

    fn system_prompt(&self) -> String {
        format!(
            "{ROLE}\n\
             You receive a language code, a description of where the text appears, \
             and a text delimited by \"{DELIMITER}\".\n\
             First infer the regional language the language code stands for, \
             then translate the delimited text into that language. \
             Use the description to resolve ambiguous meanings and to match the tone of the element.\n\
             Do not include the description in the reply.\n\
             {}",
            output_rules(Some(&self.target))
        )
    }

    fn user_prompt(&self) -> String {
        format!(
            "Language code: {}\nUsage description: {}\nText to translate: {}",
            self.target.code,
            self.description,
            delimit(&self.text)
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn target(terms: &[&str]) -> Arc<TargetLocale> {
        Arc::new(TargetLocale::new(
            "zh-CN",
            terms.iter().map(|t| t.to_string()).collect(),
        ))
    }

    #[test]
    fn test_bare_prompt() {
        let prompt = Prompt::from(BarePrompt {
            target: target(&[]),
            text: "Welcome".to_string(),
        });
        let request = prompt.request();

        assert_eq!(request.step, Step::Bare);
        assert_eq!(request.temperature, Some(0.0));
        assert_eq!(
            request.user,
            "Language code: zh-CN\nText to translate: ---Welcome---"
        );
        assert!(request.system.contains("regional language"));
        assert!(!request.system.contains("untranslated"));
    }

    #[test]
    fn test_preserve_terms_are_forwarded() {
        let prompt = Prompt::from(GuidedPrompt {
            target: target(&["GitHub", "Next.js"]),
            text: "Sign in with GitHub".to_string(),
            description: "A login button.".to_string(),
        });
        let request = prompt.request();

        assert!(request.system.contains("untranslated: GitHub, Next.js."));
        assert!(request.user.contains("Usage description: A login button."));
        assert!(request.user.ends_with("---Sign in with GitHub---"));
    }

    #[test]
    fn test_function_context_prompt_carries_snippet() {
        let prompt = Prompt::from(FunctionContextPrompt {
            target: target(&[]),
            text: "Welcome".to_string(),
            snippet: "function Home() { return t(\"---Welcome---\"); }".to_string(),
        });
        let request = prompt.request();

        assert_eq!(request.step.tier(), Tier::FunctionContext);
        assert!(request.user.contains("function Home()"));
        assert!(request.user.ends_with("Text to translate: ---Welcome---"));
    }

    #[test]
    fn test_description_uses_default_temperature() {
        let prompt = Prompt::from(ContextDescriptionPrompt {
            text: "Welcome".to_string(),
            snippet: "<h1>{t(\"---Welcome---\")}</h1>".to_string(),
        });
        let request = prompt.request();

        assert_eq!(request.temperature, None);
        assert_eq!(request.step.tier(), Tier::AiContext);
        assert!(request.system.contains("do not mention code"));
    }

    #[test]
    fn test_step_tiers() {
        assert_eq!(Step::Bare.tier(), Tier::Bare);
        assert_eq!(Step::ContextDescription.tier(), Tier::AiContext);
        assert_eq!(Step::GuidedTranslation.tier(), Tier::AiContext);
    }
}
