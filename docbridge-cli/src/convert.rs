//! The convert and list commands.
//!
//! Files are first written to a staging directory next to their destination and only moved in
//! place once every conversion of the invocation succeeded.

use crate::CliError;
use docbridge_babel::{Content, ConversionGraph, ConvertOptions, Input};
use std::fmt::Write as _;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info, warn};

/// What the user asked to convert.
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub inputs: Vec<PathBuf>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub output: Option<PathBuf>,
}

impl Request {
    fn options(&self) -> ConvertOptions {
        let mut options = ConvertOptions::new();
        if let Some(from) = &self.from {
            options = options.with_source(from.as_str());
        }
        if let Some(to) = &self.to {
            options = options.with_target(to.as_str());
        }
        options
    }
}

/// Languages with their extension, then every direct conversion.
pub fn list(graph: &ConversionGraph) -> String {
    let mut out = String::from("Languages:\n");
    for name in graph.languages() {
        let ext = graph.file_ext(name).unwrap_or("-");
        let _ = writeln!(out, "  {name:<20} {ext}");
    }
    out.push_str("\nConversions:\n");
    for (source, target) in graph.conversion_pairs() {
        let _ = writeln!(out, "  {source} -> {target}");
    }
    out
}

pub fn run(graph: &ConversionGraph, request: &Request) -> Result<(), CliError> {
    let output_is_dir = request.output.as_deref().is_some_and(Path::is_dir);
    match request.inputs.as_slice() {
        [] => {
            if request.from.is_none() {
                return Err(CliError::Usage(
                    "--from is required when reading stdin".to_string(),
                ));
            }
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            convert_single(graph, Input::from(source), request)
        }
        [input] if !output_is_dir => convert_single(graph, Input::from(input.as_path()), request),
        inputs => convert_many(graph, inputs, request),
    }
}

/// One document, printed or written to `--output`.
fn convert_single(graph: &ConversionGraph, input: Input, request: &Request) -> Result<(), CliError> {
    let Some(output) = &request.output else {
        let content = graph.convert(input, request.options())?;
        return print_content(content);
    };

    let mut options = request.options();
    if request.to.is_none() {
        options = options.with_target(graph.lang_for_path(output)?);
    }
    let mut staging = Staging::new(parent_dir(output))?;
    let staged = staging.stage(output)?;
    graph.convert(input, options.with_output(staged))?;
    staging.commit()
}

/// Several documents, all printed or all written into the `--output` directory.
fn convert_many(graph: &ConversionGraph, inputs: &[PathBuf], request: &Request) -> Result<(), CliError> {
    let to = request.to.as_deref().ok_or_else(|| {
        CliError::Usage("--to is required when converting several inputs".to_string())
    })?;

    let Some(out_dir) = &request.output else {
        let mut results = Vec::with_capacity(inputs.len());
        for input in inputs {
            results.push(graph.convert(input.as_path(), request.options())?);
        }
        for content in results {
            print_content(content)?;
        }
        return Ok(());
    };

    if !out_dir.is_dir() {
        return Err(CliError::Usage(format!(
            "--output must be an existing directory when converting several inputs, got {}",
            out_dir.display()
        )));
    }
    let ext = graph
        .file_ext(to)
        .ok_or_else(|| CliError::Usage(format!("language `{to}` has no file extension")))?
        .to_string();

    let mut staging = Staging::new(out_dir)?;
    for input in inputs {
        let stem = input
            .file_stem()
            .ok_or_else(|| CliError::Usage(format!("cannot name the output of {}", input.display())))?;
        let mut name = stem.to_os_string();
        name.push(&ext);
        let staged = staging.stage(&out_dir.join(name))?;
        graph.convert(input.as_path(), request.options().with_output(staged))?;
    }
    staging.commit()
}

fn print_content(content: Content) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    match content {
        Content::Binary(bytes) => stdout.write_all(&bytes)?,
        other => stdout.write_all(other.to_text()?.as_bytes())?,
    }
    stdout.flush()?;
    Ok(())
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Outputs waiting for the whole invocation to succeed.
struct Staging {
    dir: TempDir,
    moves: Vec<(PathBuf, PathBuf)>,
}

impl Staging {
    fn new(near: &Path) -> io::Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(".docbridge-")
            .tempdir_in(near)?;
        Ok(Staging {
            dir,
            moves: Vec::new(),
        })
    }

    /// Staging path for `destination`, keeping its file name.
    fn stage(&mut self, destination: &Path) -> io::Result<PathBuf> {
        let slot = self.dir.path().join(self.moves.len().to_string());
        fs::create_dir(&slot)?;
        let staged = match destination.file_name() {
            Some(name) => slot.join(name),
            None => slot.join("output"),
        };
        self.moves.push((staged.clone(), destination.to_path_buf()));
        Ok(staged)
    }

    /// Move every staged file in place. If one move fails, the destinations already replaced
    /// get their previous content back.
    fn commit(self) -> Result<(), CliError> {
        let mut installed: Vec<(&Path, Option<PathBuf>)> = Vec::new();
        for (index, (staged, destination)) in self.moves.iter().enumerate() {
            if !staged.exists() {
                debug!(path = %destination.display(), "nothing written");
                continue;
            }
            let backup = self.dir.path().join(format!("{index}.previous"));
            match install(staged, destination, &backup) {
                Ok(replaced) => {
                    installed.push((destination.as_path(), replaced.then_some(backup)))
                }
                Err(err) => {
                    for (destination, backup) in installed.into_iter().rev() {
                        restore(destination, backup.as_deref());
                    }
                    return Err(err.into());
                }
            }
        }
        for (destination, _) in &installed {
            info!(path = %destination.display(), "written");
        }
        Ok(())
    }
}

/// Rename `staged` to `destination`, keeping a file already there at `backup`. Returns
/// whether a file was replaced.
fn install(staged: &Path, destination: &Path, backup: &Path) -> io::Result<bool> {
    let replaced = destination.is_file();
    if replaced {
        fs::rename(destination, backup)?;
    }
    if let Err(err) = fs::rename(staged, destination) {
        if replaced {
            restore(destination, Some(backup));
        }
        return Err(err);
    }
    Ok(replaced)
}

fn restore(destination: &Path, backup: Option<&Path>) {
    let result = match backup {
        Some(backup) => fs::rename(backup, destination),
        None => fs::remove_file(destination),
    };
    if let Err(err) = result {
        warn!(path = %destination.display(), error = %err, "could not roll back output");
    }
}
