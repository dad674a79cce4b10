//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `translate`: locate key usages and translate every key with escalating context
//! - `scan`: locate key usages only, without calling the generation service
//! - `init`: write a default `.ctxlaterc.json`

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Translate(cmd)) => cmd.common.verbose,
            Some(Command::Scan(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Source code root directory
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Source-language message file (overrides config file)
    #[arg(long)]
    pub messages: Option<PathBuf>,

    /// Write per-key usage evidence to this JSON file
    #[arg(long)]
    pub evidence: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct TranslateCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Target locale code, e.g. zh-CN (overrides config file)
    #[arg(long, env = "CTXLATE_LOCALE")]
    pub locale: Option<String>,

    /// Translated message file (overrides config file)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Maximum number of keys translated at once (overrides config file)
    #[arg(long)]
    pub max_concurrency: Option<usize>,

    /// OpenAI-compatible API base URL (overrides config file)
    #[arg(long, env = "CTXLATE_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Model id (overrides config file)
    #[arg(long, env = "CTXLATE_MODEL")]
    pub model: Option<String>,
}

#[derive(Debug, Args)]
pub struct ScanCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Translate every message key, using where it is used in source as context
    Translate(TranslateCommand),
    /// Show where each message key is used, without translating
    Scan(ScanCommand),
    /// Initialize a new .ctxlaterc.json configuration file
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_translate() {
        let args = Arguments::try_parse_from([
            "ctxlate",
            "translate",
            "--locale",
            "ja-JP",
            "--source-root",
            "web",
            "--max-concurrency",
            "2",
            "-v",
        ])
        .unwrap();

        assert!(args.verbose());
        let Some(Command::Translate(cmd)) = args.command else {
            panic!("expected translate");
        };
        assert_eq!(cmd.locale.as_deref(), Some("ja-JP"));
        assert_eq!(cmd.common.source_root, Some(PathBuf::from("web")));
        assert_eq!(cmd.max_concurrency, Some(2));
    }

    #[test]
    fn test_parse_scan() {
        let args =
            Arguments::try_parse_from(["ctxlate", "scan", "--evidence", "audit.json"]).unwrap();
        assert!(!args.verbose());
        let Some(Command::Scan(cmd)) = args.command else {
            panic!("expected scan");
        };
        assert_eq!(cmd.common.evidence, Some(PathBuf::from("audit.json")));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Arguments::command().debug_assert();
    }
}
