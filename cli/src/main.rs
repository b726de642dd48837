use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{value_parser, Arg, ArgMatches, Command};

const EXIT_ERROR: i32 = 1;

fn cli() -> Command {
    Command::new("renfa")
        .about("Compiles a regular expression into an NFA with explicit ε-transitions")
        .arg(
            Arg::new("OUTPUT_PATH")
                .required(true)
                .help("Path of the file the transition table is written to")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("REGEX")
                .required(true)
                .help("Regular expression to compile (literals, `|`, `*`, `+` and `(...)`)"),
        )
}

fn main() {
    env_logger::init();

    let args = cli().get_matches();

    if let Err(err) = convert(&args) {
        eprintln!("error: {:#}", err);
        process::exit(EXIT_ERROR);
    }
}

fn convert(args: &ArgMatches) -> anyhow::Result<()> {
    let output_path = args.get_one::<PathBuf>("OUTPUT_PATH").unwrap();
    let regex = args.get_one::<String>("REGEX").unwrap();

    // Spaces carry no meaning in the pattern and are stripped up front; the
    // parser treats any remaining character outside the reserved set as a
    // literal.
    let pattern: String = regex.chars().filter(|c| *c != ' ').collect();

    let nfa = renfa::compile(&pattern)?;

    nfa.export_to_file(output_path).with_context(|| {
        format!("can not write `{}`", output_path.display())
    })?;

    Ok(())
}
