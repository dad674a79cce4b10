use std::path::{Component, Path, PathBuf};

use anyhow::{Context as _, Result, anyhow};
use tracing::{debug, info};

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::{
        TranslationRecord, file_scanner::scan_files, locate::locate, parsers::json::load_messages,
    },
};

/// Everything the translation phase needs, produced by the sequential
/// scan phase: flatten the dictionary, select source files, locate usages.
pub struct TranslateContext {
    pub config: Config,
    /// Directory the scan started from; relative config paths resolve here.
    pub root_dir: PathBuf,
    /// Scanned source files, sorted.
    pub files: Vec<String>,
    /// One record per flattened entry, in flattening order.
    pub records: Vec<TranslationRecord>,
}

impl TranslateContext {
    /// Create a new `TranslateContext` from command line arguments.
    ///
    /// 1. Loads configuration (CLI args > config file > defaults)
    /// 2. Flattens the message file
    /// 3. Scans source files
    /// 4. Locates each key's usage
    ///
    /// Fails on an invalid config, an unreadable or malformed message file,
    /// and any source file that cannot be read or parsed.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let root_dir = common_args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let root = root_dir
            .to_str()
            .with_context(|| anyhow!("Invalid path: {:?}", root_dir))?;

        // Walk up real directories, not the text of a relative root.
        let config_start = root_dir
            .canonicalize()
            .with_context(|| format!("Source root not found: {}", root_dir.display()))?;
        let config_result = load_config(&config_start)?;
        if !config_result.from_file {
            info!("No config file found, using default configuration");
        }

        let mut config = config_result.config;
        if let Some(ref messages) = common_args.messages {
            config.messages_file = messages.to_string_lossy().to_string();
        }
        if let Some(ref evidence) = common_args.evidence {
            config.evidence_file = Some(evidence.to_string_lossy().to_string());
        }

        let messages_path = resolve_path(&root_dir, &config.messages_file);
        let entries = load_messages(&messages_path)?;
        debug!(count = entries.len(), "flattened message entries");

        let scan = scan_files(root, &config.ignores);
        if scan.skipped_count > 0 {
            debug!(count = scan.skipped_count, "paths could not be accessed");
        }

        let evidence = locate(&entries, &scan.files, &config.translation_function)?;
        let records = entries
            .iter()
            .zip(evidence)
            .map(|(entry, evidence)| TranslationRecord::new(entry, evidence))
            .collect();

        Ok(Self {
            config,
            root_dir,
            files: scan.files,
            records,
        })
    }

    pub fn output_path(&self) -> PathBuf {
        resolve_path(&self.root_dir, &self.config.output_file)
    }

    pub fn evidence_path(&self) -> Option<PathBuf> {
        self.config
            .evidence_file
            .as_deref()
            .map(|p| resolve_path(&self.root_dir, p))
    }

    /// Number of keys with a located call site.
    pub fn found_count(&self) -> usize {
        self.records.iter().filter(|r| r.evidence.found).count()
    }
}

/// Resolve a configured path against the source root.
///
/// Absolute paths are kept; when the root is the current directory the
/// path stays relative so reports show it as written.
fn resolve_path(root_dir: &Path, configured: &str) -> PathBuf {
    let p = Path::new(configured);
    if p.is_absolute() {
        return p.to_path_buf();
    }
    let is_cur_dir = root_dir
        .components()
        .all(|c| matches!(c, Component::CurDir));
    if is_cur_dir {
        p.to_path_buf()
    } else {
        let rel = p.strip_prefix(Path::new(".")).unwrap_or(p);
        root_dir.join(rel)
    }
}
