//! Error types for conversion operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building trees, registering formats or converting documents
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BabelError {
    /// A node was built with an unusable name
    #[error("invalid node: {0}")]
    InvalidNode(String),

    /// A tree violates the AST invariants
    #[error("invalid AST: {0}")]
    InvalidAst(String),

    /// Tree recursion went deeper than the configured bound
    #[error("tree is nested deeper than {0} levels")]
    DepthExceeded(usize),

    /// Registered file extensions must start with a dot
    #[error("file extension `{0}` must start with `.`")]
    InvalidExtension(String),

    /// An edge was registered without a resolvable source or target
    #[error("cannot determine the source and target languages of a converter")]
    UndeterminedEdge,

    /// No chain of converters connects the two languages
    #[error("no path found from `{from}` to `{to}`")]
    NoPath { from: String, to: String },

    /// A chain references a pair without a registered converter
    #[error("no function registered for `{from}` => `{to}`")]
    MissingConverter { from: String, to: String },

    /// No language is registered for this file extension
    #[error("the file extension `{0}` hasn't been registered")]
    UnknownExtension(String),

    /// The language name is not registered
    #[error("unknown language `{0}`")]
    UnknownLanguage(String),

    /// The source or target of a conversion could not be determined
    #[error("cannot determine the {0} language of the conversion")]
    UnresolvedLanguage(&'static str),

    /// The target format writes binary data and needs an output file
    #[error("converting to `{0}` requires an output file")]
    NeedsOutputFile(String),

    /// A converter received content of the wrong kind
    #[error("expected {expected} content, got {found}")]
    ContentMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// The external JSON tree uses an envelope shape that is not supported
    #[error("unsupported document envelope: {0}")]
    UnsupportedEnvelope(String),

    /// The external JSON tree is structurally wrong
    #[error("malformed pandoc JSON: {0}")]
    MalformedJson(String),

    /// No plugin matches the requested name or extension
    #[error("no plugin matches `{0}`")]
    PluginNotFound(String),

    /// A plugin manifest could not be loaded
    #[error("failed to load plugin manifest {path}: {reason}")]
    PluginManifest { path: PathBuf, reason: String },

    /// An input path does not exist
    #[error("file {0} does not exist")]
    MissingInput(PathBuf),

    /// An external program failed
    #[error("external tool `{tool}` failed: {reason}")]
    ExternalTool { tool: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = BabelError> = std::result::Result<T, E>;
