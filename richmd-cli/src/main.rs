// Command-line interface for richmd
//
// This binary converts Markdown text into normalized rich-text markup using
// the richmd-convert crate. It is a thin shell over the library: argument
// handling, config loading, file/stdin plumbing and nothing else.
//
// Converting:
//
// Usage:
//  richmd <input> [--inline] [--output <file>]          - Convert a file (default)
//  richmd convert <input> [--inline] [--output <file>]  - Same as above (explicit)
//  richmd convert - < input.md                          - Read from stdin
//
// Configuration is layered: embedded defaults, then an optional richmd.toml
// in the working directory, then an explicit --config file, then flags.

use clap::{Arg, ArgAction, Command, ValueHint};
use richmd_config::{Loader, RichmdConfig};
use richmd_convert::{ConversionDriver, ParseOptions, Schema};
use std::fs;
use std::io::Read;
use tracing_subscriber::EnvFilter;

fn build_cli() -> Command {
    Command::new("richmd")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Markdown to normalized rich-text markup")
        .long_about(
            "richmd converts Markdown text into rich-text markup normalized for a\n\
            structured document schema: block elements are pulled out of inline\n\
            containers, renderer newline artifacts are stripped, and inline parses\n\
            keep their surrounding whitespace.\n\n\
            Examples:\n  \
            richmd notes.md                      # Convert to markup (stdout)\n  \
            richmd notes.md -o notes.html        # Write to a file\n  \
            richmd convert - --inline < frag.md  # Inline fragment from stdin",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
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
                .long_about(
                    "Convert Markdown to normalized rich-text markup.\n\n\
                    Input is a file path, or '-' to read from stdin.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    richmd convert notes.md              # Convert to markup (stdout)\n  \
                    richmd convert notes.md -o out.html  # Write to a file\n  \
                    richmd notes.md                      # 'convert' is optional",
                )
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
                        .long_help(
                            "Parse the source as an inline fragment.\n\n\
                            The implicit paragraph the renderer wraps inline content in\n\
                            is removed, and the source's leading/trailing whitespace is\n\
                            preserved in the output.",
                        )
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // If no subcommand is provided and the first arg looks like an input,
    // inject "convert".
    let args: Vec<String> = std::env::args().collect();

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            if should_inject_convert(&args) {
                let mut new_args = vec![args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&args[1..]);
                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let inline = sub_matches.get_flag("inline") || config.convert.inline;
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, inline, output, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Whether the arguments look like `richmd <input> ...` with the subcommand
/// left out
fn should_inject_convert(args: &[String]) -> bool {
    let Some(first) = args.get(1) else {
        return false;
    };
    if first == "-" {
        return true;
    }
    !first.starts_with('-') && first != "convert" && first != "help"
}

/// Handle the convert command
fn handle_convert_command(input: &str, inline: bool, output: Option<&str>, config: &RichmdConfig) {
    let source = if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .unwrap_or_else(|e| {
                eprintln!("Error reading stdin: {e}");
                std::process::exit(1);
            });
        buffer
    } else {
        fs::read_to_string(input).unwrap_or_else(|e| {
            eprintln!("Error reading file '{input}': {e}");
            std::process::exit(1);
        })
    };

    let driver =
        ConversionDriver::new(Schema::rich_text()).with_render_options((&config.render).into());
    let mut result = driver.parse(&source, &ParseOptions { inline });

    if config.output.trailing_newline && !result.ends_with('\n') {
        result.push('\n');
    }

    match output {
        Some(path) => {
            fs::write(path, &result).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => {
            print!("{result}");
        }
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> RichmdConfig {
    let loader = Loader::new().with_optional_file("richmd.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}
