//! Converters backed by external commands
//!
//! The source content is written to the command's stdin and the result read back from its
//! stdout. AST content is exchanged as pandoc JSON, so a command targeting `ast` must print a
//! pandoc JSON document.

use crate::error::{BabelError, Result};
use crate::graph::{Content, Context, Converter};
use crate::pandoc;
use std::ffi::OsStr;
use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;
use tracing::{debug, trace};

/// Run `program` with `args`, feeding `input` on stdin, and return its stdout.
///
/// Fails with [`BabelError::ExternalTool`] when the program cannot be started or exits with a
/// non-zero status, quoting its stderr.
pub fn run_tool<P, I, S>(program: P, args: I, input: Vec<u8>) -> Result<Vec<u8>>
where
    P: AsRef<OsStr>,
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let tool = program.as_ref().to_string_lossy().into_owned();
    let mut child = Command::new(program.as_ref())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|err| BabelError::ExternalTool {
            tool: tool.clone(),
            reason: format!("failed to start: {err}"),
        })?;

    // fed concurrently with draining stdout
    let writer = child.stdin.take().map(|mut stdin| {
        let tool = tool.clone();
        thread::spawn(move || {
            // a tool may exit without reading everything, its status decides
            if let Err(err) = stdin.write_all(&input) {
                debug!(tool = %tool, error = %err, "stdin not fully written");
            }
        })
    });
    let output = child.wait_with_output().map_err(|err| BabelError::ExternalTool {
        tool: tool.clone(),
        reason: err.to_string(),
    })?;
    if let Some(writer) = writer {
        let _ = writer.join();
    }

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(BabelError::ExternalTool {
            tool,
            reason: format!("exited with {}: {}", output.status, stderr.trim()),
        });
    }
    trace!(tool = %tool, bytes = output.stdout.len(), "external tool finished");
    Ok(output.stdout)
}

/// Bytes sent to an external program for `content`.
pub fn content_to_stdin(content: Content) -> Result<Vec<u8>> {
    match content {
        Content::Ast(node) => {
            let document = pandoc::ast_to_pandoc(&node)?;
            Ok(serde_json::to_vec(&document)?)
        }
        other => other.into_bytes(),
    }
}

/// A converter running a command declared by a plugin manifest.
#[derive(Debug, Clone)]
pub struct CommandConverter {
    source: String,
    target: String,
    program: String,
    args: Vec<String>,
}

impl CommandConverter {
    /// `command` is the program followed by its arguments.
    pub fn new(source: &str, target: &str, command: &[String]) -> Result<Self> {
        let (program, args) = command.split_first().ok_or_else(|| BabelError::ExternalTool {
            tool: format!("{source} => {target}"),
            reason: "empty command".to_string(),
        })?;
        Ok(CommandConverter {
            source: source.to_string(),
            target: target.to_string(),
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Converter for CommandConverter {
    fn convert(&self, content: Content, _context: &Context) -> Result<Content> {
        let stdout = run_tool(&self.program, &self.args, content_to_stdin(content)?)?;
        if self.target == "ast" {
            let document: serde_json::Value = serde_json::from_slice(&stdout)?;
            return Ok(Content::Ast(pandoc::pandoc_to_ast(&document)?));
        }
        Ok(match String::from_utf8(stdout) {
            Ok(text) => Content::Text(text),
            Err(err) => Content::Binary(err.into_bytes()),
        })
    }

    fn declared_source(&self) -> Option<&str> {
        Some(&self.source)
    }

    fn declared_target(&self) -> Option<&str> {
        Some(&self.target)
    }
}
