use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of build_cli() in src/main.rs, build scripts can't access src/ modules
fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("docbridge")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert documents between markup formats through a common AST")
        .arg(
            Arg::new("inputs")
                .help("Input files (reads stdin when absent)")
                .num_args(0..)
                .value_hint(ValueHint::FilePath),
        )
        .arg(Arg::new("from").long("from").short('f').value_hint(ValueHint::Other))
        .arg(Arg::new("to").long("to").short('t').value_hint(ValueHint::Other))
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_hint(ValueHint::AnyPath),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .value_hint(ValueHint::DirPath),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_hint(ValueHint::FilePath),
        )
        .arg(Arg::new("no-pandoc").long("no-pandoc").action(ArgAction::SetTrue))
        .arg(Arg::new("list").long("list").action(ArgAction::SetTrue))
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count),
        );

    generate_to(Bash, &mut cmd, "docbridge", &outdir)?;
    generate_to(Zsh, &mut cmd, "docbridge", &outdir)?;
    generate_to(Fish, &mut cmd, "docbridge", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
