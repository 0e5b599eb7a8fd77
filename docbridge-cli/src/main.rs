// Command-line interface for docbridge
//
// Converts documents between every language of the conversion graph: the built-in markdown, ast
// and tree formats, the formats of an installed pandoc and the languages of plugin manifests
// found in the data directory.
//
// Usage:
//  docbridge <input> --to <lang> [--from <lang>] [--output <file>]
//  docbridge a.md b.md --to rst --output out/        - several inputs into a directory
//  cat a.md | docbridge --from markdown --to ast     - read stdin, print to stdout
//  docbridge --list                                  - languages and conversions
//
// The source language is detected from the input extension and the target from the output
// extension unless --from / --to are given. Outputs are only written once every conversion
// succeeded.
//
// Configuration layers: embedded defaults, <data-dir>/docbridge.toml, --config, then flags.

mod convert;
mod logging;

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use config::ConfigError;
use docbridge_babel::{
    discover_plugins, BabelError, ConversionGraph, PluginOptions, PluginRegistry,
};
use docbridge_config::{DocbridgeConfig, Loader};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Data directory used when --data-dir is absent
const DATA_DIR_ENV: &str = "DOCBRIDGE_DATA_DIR";

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Babel(#[from] BabelError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn build_cli() -> Command {
    Command::new("docbridge")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert documents between markup formats through a common AST")
        .long_about(
            "docbridge converts documents by parsing them into a common AST and writing the \
            AST in the target language.\n\n\
            Languages come from the built-in formats (markdown, ast, tree), from pandoc when it \
            is installed, and from plugin manifests in <data-dir>/plugins.\n\n\
            Examples:\n  \
            docbridge notes.md --to ast                 # pandoc JSON on stdout\n  \
            docbridge notes.md -o notes.rst             # target from the output extension\n  \
            docbridge a.md b.md --to html -o site/      # several inputs into a directory\n  \
            cat notes.md | docbridge -f markdown -t tree"
        )
        .arg(
            Arg::new("inputs")
                .help("Input files (reads stdin when absent)")
                .num_args(0..)
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("from")
                .long("from")
                .short('f')
                .value_name("LANG")
                .help("Source language (detected from the input extension if not specified)")
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .short('t')
                .value_name("LANG")
                .help("Target language (detected from the output extension if not specified)")
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("PATH")
                .help("Output file, or directory for several inputs (defaults to stdout)")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::AnyPath),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .value_name("DIR")
                .help("Directory holding docbridge.toml and plugins/")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::DirPath),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a docbridge.toml configuration file")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("no-pandoc")
                .long("no-pandoc")
                .help("Do not attach the pandoc formats")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list")
                .long("list")
                .help("List languages and conversions")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log more (-v info, -vv debug, -vvv trace)")
                .action(ArgAction::Count),
        )
}

fn main() {
    let matches = build_cli().get_matches();
    logging::init(matches.get_count("verbose"));

    if let Err(err) = run(&matches) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), CliError> {
    let data_dir = matches
        .get_one::<PathBuf>("data-dir")
        .cloned()
        .or_else(|| env::var_os(DATA_DIR_ENV).map(PathBuf::from));
    let config = load_config(matches, data_dir.as_deref())?;
    let graph = build_graph(&config, data_dir.as_deref())?;

    if matches.get_flag("list") {
        print!("{}", convert::list(&graph));
        return Ok(());
    }

    let request = convert::Request {
        inputs: matches
            .get_many::<PathBuf>("inputs")
            .map(|inputs| inputs.cloned().collect())
            .unwrap_or_default(),
        from: matches.get_one::<String>("from").cloned(),
        to: matches.get_one::<String>("to").cloned(),
        output: matches.get_one::<PathBuf>("output").cloned(),
    };
    convert::run(&graph, &request)
}

fn load_config(matches: &ArgMatches, data_dir: Option<&Path>) -> Result<DocbridgeConfig, CliError> {
    let mut loader = Loader::new();
    if let Some(dir) = data_dir {
        loader = loader.with_optional_file(dir.join("docbridge.toml"));
    }
    if let Some(path) = matches.get_one::<PathBuf>("config") {
        loader = loader.with_file(path);
    }
    if matches.get_flag("no-pandoc") {
        loader = loader.set_override("plugins.with_pandoc", false)?;
    }
    Ok(loader.build()?)
}

fn build_graph(config: &DocbridgeConfig, data_dir: Option<&Path>) -> Result<ConversionGraph, CliError> {
    let mut registry = PluginRegistry::with_builtins();
    let mut dirs: Vec<PathBuf> = data_dir.map(|dir| dir.join("plugins")).into_iter().collect();
    dirs.extend(config.plugins.dirs.iter().cloned());
    let added = discover_plugins(&dirs, &mut registry)?;
    debug!(added, dirs = dirs.len(), "plugin discovery done");

    Ok(registry.build_graph(&PluginOptions::from(config))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        build_cli().debug_assert();
    }

    #[test]
    fn parses_several_inputs() {
        let matches = build_cli()
            .try_get_matches_from(["docbridge", "a.md", "b.md", "-t", "ast", "-vv"])
            .expect("arguments to parse");
        assert_eq!(matches.get_many::<PathBuf>("inputs").map(|i| i.count()), Some(2));
        assert_eq!(matches.get_one::<String>("to").map(String::as_str), Some("ast"));
        assert_eq!(matches.get_count("verbose"), 2);
    }
}
