//! Read phase of the conversion graph: lookups and conversions.

use super::content::{Content, Input};
use super::converter::{Context, Edge};
use super::language::Language;
use super::path;
use crate::error::{BabelError, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, trace};
use walkdir::WalkDir;

/// Language names accepted in place of another
const ALIASES: &[(&str, &str)] = &[("json", "ast")];

/// Map an alias to the language it stands for.
pub fn canonical(name: &str) -> &str {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, lang)| *lang)
        .unwrap_or(name)
}

/// Options of a single conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Source language, inferred from the input path when unset
    pub source: Option<String>,
    /// Target language, inferred from the output path when unset
    pub target: Option<String>,
    /// Explicit chain of languages, replacing path finding
    pub lang_chain: Option<Vec<String>>,
    /// Write the result to this file
    pub output: Option<PathBuf>,
}

impl ConvertOptions {
    pub fn new() -> Self {
        ConvertOptions::default()
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_chain<I, S>(mut self, chain: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lang_chain = Some(chain.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }
}

/// Immutable graph of languages and converters.
#[derive(Debug)]
pub struct ConversionGraph {
    languages: BTreeMap<String, Language>,
    edges: BTreeMap<(String, String), Edge>,
}

impl ConversionGraph {
    pub(super) fn new(
        languages: BTreeMap<String, Language>,
        edges: BTreeMap<(String, String), Edge>,
    ) -> Self {
        ConversionGraph { languages, edges }
    }

    /// Registered language names, sorted
    pub fn languages(&self) -> Vec<&str> {
        self.languages.keys().map(String::as_str).collect()
    }

    pub fn language(&self, name: &str) -> Result<&Language> {
        self.languages
            .get(canonical(name))
            .ok_or_else(|| BabelError::UnknownLanguage(name.to_string()))
    }

    /// Every registered file extension, sorted
    pub fn file_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self
            .languages
            .values()
            .filter_map(Language::file_ext)
            .collect();
        exts.sort_unstable();
        exts.dedup();
        exts
    }

    pub fn file_ext(&self, lang: &str) -> Option<&str> {
        self.languages
            .get(canonical(lang))
            .and_then(Language::file_ext)
    }

    /// Language registered for an extension, with or without its leading dot.
    pub fn lang_for_file_ext(&self, ext: &str) -> Result<&str> {
        let wanted = if ext.starts_with('.') {
            ext.to_string()
        } else {
            format!(".{ext}")
        };
        self.languages
            .values()
            .find(|lang| lang.file_ext() == Some(wanted.as_str()))
            .map(Language::name)
            .ok_or_else(|| BabelError::UnknownExtension(wanted))
    }

    pub fn lang_for_path(&self, path: &Path) -> Result<&str> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| BabelError::UnknownExtension(path.display().to_string()))?;
        self.lang_for_file_ext(ext)
    }

    /// Every `(source, target)` pair with a converter, sorted
    pub fn conversion_pairs(&self) -> Vec<(&str, &str)> {
        self.edges
            .keys()
            .map(|(source, target)| (source.as_str(), target.as_str()))
            .collect()
    }

    fn edge_list(&self) -> Vec<(&str, &str)> {
        self.conversion_pairs()
    }

    /// Shortest chain of languages from `source` to `target`.
    pub fn find_path(&self, source: &str, target: &str) -> Option<Vec<String>> {
        let edges = self.edge_list();
        path::find_path(&edges, &canonical(source), &canonical(target))
            .map(|chain| chain.into_iter().map(str::to_string).collect())
    }

    /// Languages `lang` converts to through one or more converters.
    pub fn target_languages(&self, lang: &str) -> Vec<String> {
        let edges = self.edge_list();
        path::connected_component(&edges, &canonical(lang))
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Files directly in `dir` with the extension of `lang`, or every file when `lang` is
    /// `None`. Sorted by path.
    pub fn files_in_dir(&self, dir: &Path, lang: Option<&str>) -> Result<Vec<PathBuf>> {
        let ext = match lang {
            Some(lang) => Some(
                self.language(lang)?
                    .file_ext()
                    .ok_or_else(|| BabelError::UnknownExtension(format!("<{lang}>")))?
                    .trim_start_matches('.')
                    .to_string(),
            ),
            None => None,
        };
        let mut files = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|err| match err.into_io_error() {
                Some(io) => BabelError::Io(io),
                None => BabelError::MissingInput(dir.to_path_buf()),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let matches = match &ext {
                Some(ext) => entry.path().extension().and_then(|e| e.to_str()) == Some(ext.as_str()),
                None => true,
            };
            if matches {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    pub fn load(&self, path: &Path, lang: Option<&str>) -> Result<Content> {
        let lang = match lang {
            Some(lang) => lang,
            None => self.lang_for_path(path)?,
        };
        self.language(lang)?.load(path)
    }

    pub fn dump(&self, content: &Content, path: &Path, lang: Option<&str>) -> Result<()> {
        let lang = match lang {
            Some(lang) => lang,
            None => self.lang_for_path(path)?,
        };
        self.language(lang)?.dump(content, path)
    }

    pub fn loads(&self, text: &str, lang: &str) -> Result<Content> {
        self.language(lang)?.loads(text)
    }

    pub fn dumps(&self, content: &Content, lang: &str) -> Result<String> {
        self.language(lang)?.dumps(content)
    }

    pub fn assert_equal(&self, a: &Content, b: &Content, lang: &str) -> Result<bool> {
        Ok(self.language(lang)?.assert_equal(a, b))
    }

    /// Convert `input` along a chain of converters.
    ///
    /// Both ends of the chain must be registered languages. Path inputs are loaded with the
    /// source language. The result is written to `options.output` only once every step
    /// succeeded.
    pub fn convert(&self, input: impl Into<Input>, options: ConvertOptions) -> Result<Content> {
        let input = input.into();
        if let Input::Path(path) = &input {
            if !path.exists() {
                return Err(BabelError::MissingInput(path.clone()));
            }
        }

        let chain = match options.lang_chain {
            Some(chain) if chain.is_empty() => {
                return Err(BabelError::UnresolvedLanguage("source"));
            }
            Some(chain) => chain
                .iter()
                .map(|lang| canonical(lang).to_string())
                .collect(),
            None => {
                let source = self.resolve_source(&input, options.source.as_deref())?;
                let target = self.resolve_target(options.target.as_deref(), options.output.as_deref())?;
                self.find_path(&source, &target)
                    .ok_or_else(|| BabelError::NoPath {
                        from: source.clone(),
                        to: target.clone(),
                    })?
            }
        };
        let (source, target) = match (chain.first(), chain.last()) {
            (Some(first), Some(last)) => (first.clone(), last.clone()),
            _ => return Err(BabelError::UnresolvedLanguage("source")),
        };
        let source_lang = self.language(&source)?;
        let target_lang = self.language(&target)?;

        let mut content = match input {
            Input::Path(path) => source_lang.load(&path)?,
            Input::Content(Content::Text(text)) => source_lang.loads(&text)?,
            Input::Content(content) => content,
        };

        let context = Context {
            source: source.clone(),
            target: target.clone(),
            lang_chain: chain.clone(),
            output: options.output.clone(),
        };
        for pair in chain.windows(2) {
            let (from, to) = (&pair[0], &pair[1]);
            let edge = self
                .edges
                .get(&(from.clone(), to.clone()))
                .ok_or_else(|| BabelError::MissingConverter {
                    from: from.clone(),
                    to: to.clone(),
                })?;
            trace!(from = %from, to = %to, content = content.kind(), "running converter");
            content = edge.run(content, &context)?;
        }

        if let Some(output) = &options.output {
            target_lang.dump(&content, output)?;
        }
        info!(source = %source, target = %target, steps = chain.len() - 1, "conversion done");
        Ok(content)
    }

    fn resolve_source(&self, input: &Input, source: Option<&str>) -> Result<String> {
        if let Some(source) = source {
            return Ok(self.language(source)?.name().to_string());
        }
        match input {
            Input::Path(path) => Ok(self.lang_for_path(path)?.to_string()),
            Input::Content(Content::Ast(_)) => Ok("ast".to_string()),
            Input::Content(_) => Err(BabelError::UnresolvedLanguage("source")),
        }
    }

    fn resolve_target(&self, target: Option<&str>, output: Option<&Path>) -> Result<String> {
        if let Some(target) = target {
            return Ok(self.language(target)?.name().to_string());
        }
        match output {
            Some(output) => Ok(self.lang_for_path(output)?.to_string()),
            None => Err(BabelError::UnresolvedLanguage("target")),
        }
    }
}
