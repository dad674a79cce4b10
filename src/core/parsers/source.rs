use std::{path::Path, sync::Arc};

use anyhow::{Result, anyhow, bail};
use swc_common::{BytePos, FileName, Globals, SourceMap};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

/// Source dialects understood by the usage locator.
///
/// TSX is a superset of plain TypeScript that adds JSX templating; the two
/// are selected by file extension because `<T>expr` casts are only legal in
/// the plain dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    TypeScript,
    Tsx,
}

impl Dialect {
    fn syntax(self) -> Syntax {
        Syntax::Typescript(TsSyntax {
            tsx: self == Dialect::Tsx,
            ..Default::default()
        })
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("ts") => Some(Dialect::TypeScript),
            Some("tsx") => Some(Dialect::Tsx),
            _ => None,
        }
    }
}

/// A parsed source file together with its text.
///
/// Spans in `module` are offsets into the shared `SourceMap`; use
/// [`ParsedSource::slice`] to map them back onto this file's text.
pub struct ParsedSource {
    pub module: Module,
    code: String,
    start_pos: BytePos,
}

impl ParsedSource {
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Source text between two positions of this file's span space.
    pub fn slice(&self, lo: BytePos, hi: BytePos) -> Option<&str> {
        let start = lo.0.checked_sub(self.start_pos.0)? as usize;
        let end = hi.0.checked_sub(self.start_pos.0)? as usize;
        self.code.get(start..end)
    }
}

/// Parser handle shared by both dialects, reused file after file.
///
/// The scan phase is sequential, so one `SourceParser` serves the whole run.
pub struct SourceParser {
    source_map: Arc<SourceMap>,
}

impl Default for SourceParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceParser {
    pub fn new() -> Self {
        Self {
            source_map: Arc::new(SourceMap::default()),
        }
    }

    /// Parse a file, picking the dialect from its extension.
    pub fn parse(&self, file_path: &str, code: String) -> Result<ParsedSource> {
        let dialect = Dialect::from_path(Path::new(file_path))
            .ok_or_else(|| anyhow!("Unsupported source file: {}", file_path))?;
        self.parse_as(dialect, file_path, code)
    }

    /// Parse source text with an explicit dialect.
    ///
    /// Any syntax error fails the parse, including errors the parser was able
    /// to recover from: a partially understood file would yield misleading
    /// evidence.
    pub fn parse_as(&self, dialect: Dialect, file_path: &str, code: String) -> Result<ParsedSource> {
        use swc_common::GLOBALS;

        // swc drops a leading BOM before assigning spans; `slice` must see
        // the same text.
        let code = match code.strip_prefix('\u{feff}') {
            Some(rest) => rest.to_string(),
            None => code,
        };

        GLOBALS.set(&Globals::new(), || {
            let source_file = self
                .source_map
                .new_source_file(FileName::Real(file_path.into()).into(), code.clone());

            let mut parser = Parser::new(
                dialect.syntax(),
                StringInput::from(&*source_file),
                None,
            );

            let module = parser
                .parse_module()
                .map_err(|e| anyhow!("Failed to parse source file {}: {:?}", file_path, e))?;

            if let Some(e) = parser.take_errors().into_iter().next() {
                bail!("Failed to parse source file {}: {:?}", file_path, e);
            }

            Ok(ParsedSource {
                module,
                code,
                start_pos: source_file.start_pos,
            })
        })
    }
}
