use std::{
    collections::BTreeSet,
    path::{Component, Path, PathBuf},
};

use glob::Pattern;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Directories never worth descending into.
const ALWAYS_SKIPPED_DIRS: &[&str] = &["node_modules", ".git"];

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths under the root.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning files.
pub struct ScanResult {
    /// Scannable files, sorted by path.
    pub files: Vec<String>,
    pub skipped_count: usize,
}

/// Enumerate `.ts` / `.tsx` files below `base_dir`.
///
/// Honours the root `.gitignore`, always skips `node_modules` and `.git`, and
/// excludes paths matching `ignore_patterns`. A pattern with `*` or `?` is a
/// glob matched against the path relative to `base_dir`; anything else is a
/// literal path prefix (so `app/[locale]` is not a character class).
pub fn scan_files(base_dir: &str, ignore_patterns: &[String]) -> ScanResult {
    let root = Path::new(base_dir);
    let mut files = BTreeSet::new();
    let mut skipped_count = 0;

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();
    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => warn!(pattern = %p, "Invalid ignore pattern: {}", e),
            }
        } else {
            literal_ignore_paths.push(root.join(p));
        }
    }

    let gitignore = load_gitignore(root);
    // Scanning from the current directory reports plain relative paths.
    let root_is_cur_dir = root.components().all(|c| matches!(c, Component::CurDir));

    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        !is_always_skipped(entry)
            && !gitignore
                .matched(entry.path(), entry.file_type().is_dir())
                .is_ignore()
    });

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                warn!("Cannot access path: {}", e);
                continue;
            }
        };
        let path = entry.path();

        if literal_ignore_paths
            .iter()
            .any(|ignore_path| path.starts_with(ignore_path))
        {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        if glob_patterns
            .iter()
            .any(|p| p.matches(&relative.to_string_lossy()))
        {
            continue;
        }

        if entry.file_type().is_file() && is_scannable_file(path) {
            let shown = if root_is_cur_dir { relative } else { path };
            files.insert(shown.to_string_lossy().into_owned());
        }
    }

    debug!(count = files.len(), root = %base_dir, "scanned source files");

    ScanResult {
        files: files.into_iter().collect(),
        skipped_count,
    }
}

fn load_gitignore(root: &Path) -> Gitignore {
    let mut builder = GitignoreBuilder::new(root);
    let path = root.join(".gitignore");
    if path.is_file()
        && let Some(e) = builder.add(&path)
    {
        warn!("Failed to read {}: {}", path.display(), e);
    }
    builder.build().unwrap_or_else(|e| {
        warn!("Ignoring malformed .gitignore: {}", e);
        Gitignore::empty()
    })
}

fn is_always_skipped(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| ALWAYS_SKIPPED_DIRS.contains(&name))
}

fn is_scannable_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    // Declaration files hold types only.
    if name.ends_with(".d.ts") {
        return false;
    }
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("tsx" | "ts")
    )
}
