//! Conversions through the `pandoc` binary
//!
//! Every pandoc reader becomes a `format → ast` converter (`pandoc -f format -t json`) and every
//! writer an `ast → format` converter (`pandoc -f json -t format`). Writers of binary formats
//! (docx, odt, epub, pptx) only run when the conversion has an output file.
//!
//! The binary is taken from an explicit path, then from `DOCBRIDGE_PANDOC_BIN`, then looked up
//! on `PATH`.

use super::command::{content_to_stdin, run_tool};
use crate::error::{BabelError, Result};
use crate::graph::{Content, Context};
use crate::pandoc::PandocToAst;
use serde_json::Value;
use std::env;
use std::path::{Path, PathBuf};

pub const PANDOC_BIN_ENV: &str = "DOCBRIDGE_PANDOC_BIN";

/// Writers producing binary files
pub const BINARY_WRITERS: &[&str] = &["docx", "odt", "epub", "epub2", "epub3", "pptx"];

/// Pandoc formats that are not exposed as languages
const SKIPPED_FORMATS: &[&str] = &["json", "native"];

/// File extensions of the usual pandoc formats
const KNOWN_EXTENSIONS: &[(&str, &str)] = &[
    ("asciidoc", ".adoc"),
    ("docbook", ".dbk"),
    ("docx", ".docx"),
    ("epub", ".epub"),
    ("html", ".html"),
    ("ipynb", ".ipynb"),
    ("latex", ".tex"),
    ("mediawiki", ".wiki"),
    ("odt", ".odt"),
    ("opml", ".opml"),
    ("org", ".org"),
    ("plain", ".txt"),
    ("pptx", ".pptx"),
    ("rst", ".rst"),
    ("rtf", ".rtf"),
    ("texinfo", ".texi"),
    ("textile", ".textile"),
    ("typst", ".typ"),
];

pub fn known_extension(format: &str) -> Option<&'static str> {
    KNOWN_EXTENSIONS
        .iter()
        .find(|(name, _)| *name == format)
        .map(|(_, ext)| *ext)
}

pub fn is_binary_writer(format: &str) -> bool {
    BINARY_WRITERS.contains(&format)
}

/// Handle on a pandoc executable.
#[derive(Debug, Clone)]
pub struct Pandoc {
    binary: PathBuf,
}

impl Pandoc {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Pandoc {
            binary: binary.into(),
        }
    }

    /// Find pandoc, `None` when it is not installed.
    pub fn locate(explicit: Option<&Path>) -> Option<Self> {
        if let Some(path) = explicit {
            return Some(Pandoc::new(path));
        }
        if let Some(path) = env::var_os(PANDOC_BIN_ENV) {
            if !path.is_empty() {
                return Some(Pandoc::new(path));
            }
        }
        which_pandoc().map(Pandoc::new)
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    fn list(&self, flag: &str) -> Result<Vec<String>> {
        let stdout = run_tool(&self.binary, [flag], Vec::new())?;
        let formats = String::from_utf8_lossy(&stdout)
            .lines()
            .map(str::trim)
            .filter(|name| !name.is_empty() && !SKIPPED_FORMATS.contains(name))
            .map(str::to_string)
            .collect();
        Ok(formats)
    }

    pub fn input_formats(&self) -> Result<Vec<String>> {
        self.list("--list-input-formats")
    }

    pub fn output_formats(&self) -> Result<Vec<String>> {
        self.list("--list-output-formats")
    }

    /// Read `input` written in `format` into a pandoc JSON document.
    pub fn read(&self, format: &str, input: Vec<u8>) -> Result<Value> {
        let stdout = run_tool(&self.binary, ["-f", format, "-t", "json"], input)?;
        Ok(serde_json::from_slice(&stdout)?)
    }

    /// Write a pandoc JSON document in `format`.
    pub fn write(&self, format: &str, document: &Value) -> Result<Vec<u8>> {
        let input = serde_json::to_vec(document)?;
        let mut args = vec!["-f", "json", "-t", format];
        if is_binary_writer(format) {
            args.extend(["-o", "-"]);
        }
        run_tool(&self.binary, args, input)
    }

    /// Converter `format → ast`
    pub fn reader(
        &self,
        format: &str,
        bullet_char: char,
    ) -> impl Fn(Content, &Context) -> Result<Content> + Send + Sync {
        let pandoc = self.clone();
        let format = format.to_string();
        move |content: Content, _context: &Context| {
            let document = pandoc.read(&format, content_to_stdin(content)?)?;
            let root = PandocToAst::new()
                .with_bullet_char(bullet_char)
                .read(&document)?;
            Ok(Content::Ast(root))
        }
    }

    /// Converter `ast → format`
    pub fn writer(&self, format: &str) -> impl Fn(Content, &Context) -> Result<Content> + Send + Sync {
        let pandoc = self.clone();
        let format = format.to_string();
        move |content: Content, context: &Context| {
            if is_binary_writer(&format) && context.output.is_none() {
                return Err(BabelError::NeedsOutputFile(format.clone()));
            }
            let document = crate::pandoc::ast_to_pandoc(&content.into_ast()?)?;
            let stdout = pandoc.write(&format, &document)?;
            if is_binary_writer(&format) {
                return Ok(Content::Binary(stdout));
            }
            String::from_utf8(stdout)
                .map(Content::Text)
                .map_err(|err| BabelError::ExternalTool {
                    tool: "pandoc".to_string(),
                    reason: format!("non UTF-8 output for `{format}`: {err}"),
                })
        }
    }
}

#[cfg(feature = "external-tools")]
fn which_pandoc() -> Option<PathBuf> {
    which::which("pandoc").ok()
}

#[cfg(not(feature = "external-tools"))]
fn which_pandoc() -> Option<PathBuf> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast;

    #[test]
    fn test_known_extensions() {
        assert_eq!(known_extension("rst"), Some(".rst"));
        assert_eq!(known_extension("latex"), Some(".tex"));
        assert_eq!(known_extension("gfm"), None);
        assert!(is_binary_writer("epub3"));
        assert!(!is_binary_writer("html"));
    }

    #[test]
    fn test_explicit_binary_wins() {
        let pandoc = Pandoc::locate(Some(Path::new("/opt/pandoc"))).unwrap();
        assert_eq!(pandoc.binary(), Path::new("/opt/pandoc"));
    }

    #[test]
    fn test_binary_writer_needs_output_file() {
        let writer = Pandoc::new("/nonexistent/pandoc").writer("docx");
        let content = Content::from(ast::root([ast::para(["x"])]));
        let err = writer(content, &Context::default()).unwrap_err();
        assert!(matches!(err, BabelError::NeedsOutputFile(format) if format == "docx"));
    }

    #[test]
    fn test_missing_binary_is_a_tool_error() {
        let reader = Pandoc::new("/nonexistent/pandoc").reader("rst", '*');
        let err = reader(Content::from("x"), &Context::default()).unwrap_err();
        assert!(matches!(err, BabelError::ExternalTool { .. }));
    }
}
