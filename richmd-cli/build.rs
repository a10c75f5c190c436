use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the command surface from src/main.rs
// We need to duplicate this here since build scripts can't access src/ modules
fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("richmd")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Markdown to normalized rich-text markup")
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a richmd.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a Markdown file to rich-text markup (default command)")
                .arg(
                    Arg::new("input")
                        .help("Input file path, or '-' for stdin")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("inline")
                        .long("inline")
                        .help("Parse in inline mode (no wrapping paragraph)")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "richmd", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "richmd", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "richmd", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
