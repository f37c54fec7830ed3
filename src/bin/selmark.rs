//! Command-line interface for selmark
//! Parses selmark files and prints their syntax tree, document model or token stream.
//!
//! Usage:
//!   selmark inspect `<path>` [--format `<format>`] [--config `<file>`] [--line-numbers]
//!   selmark check `<path>`                              - Exit 0 if the file parses, 1 otherwise
//!   selmark tokens `<path>` [--context body|head|selector] - Dump the token stream
//!
//! Logging goes to stderr. Set `SELMARK_LOG` (or `RUST_LOG`) to a filter such as
//! `selmark=debug`, or pass `-v` / `-vv`.

use clap::{Arg, ArgAction, ArgMatches, Command};
use selmark::config::Loader;
use selmark::formats::{DocumentFormatter, FormatError, FormatRegistry, TreevizFormatter};
use selmark::lexing::{LexContext, Scanner, TokenKind};
use selmark::{parse, Element, ParseError};
use std::path::PathBuf;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SELMARK_LOG";

#[derive(Debug, Error)]
enum CliError {
    #[error("Cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("{0}")]
    Config(#[from] config::ConfigError),
    #[error("{error}")]
    Parse { error: ParseError, excerpt: String },
    #[error("{0}")]
    Format(#[from] FormatError),
    #[error("{0}")]
    Usage(String),
}

fn build_cli() -> Command {
    let path_arg = Arg::new("path")
        .help("Path to the selmark file")
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
        .index(1);

    Command::new("selmark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting selmark files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Increase logging verbosity (-v: debug, -vv: trace)"),
        )
        .subcommand(
            Command::new("inspect")
                .about("Parse a file and print its tree")
                .arg(path_arg.clone())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format: treeviz, json, yaml or document (default from config)"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("TOML file layered over the built-in defaults"),
                )
                .arg(
                    Arg::new("line-numbers")
                        .long("line-numbers")
                        .action(ArgAction::SetTrue)
                        .help("Prefix treeviz lines with source line numbers"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Check that a file parses")
                .arg(path_arg.clone()),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the tokens of a file scanned in a single lexing context")
                .arg(path_arg)
                .arg(
                    Arg::new("context")
                        .long("context")
                        .value_parser(["body", "head", "selector"])
                        .default_value("body")
                        .help("Lexing context to scan with"),
                ),
        )
}

fn init_tracing(verbosity: u8) {
    let default_directive = match verbosity {
        0 => "selmark=warn",
        1 => "selmark=debug",
        _ => "selmark=trace",
    };

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let matches = build_cli().get_matches();
    init_tracing(matches.get_count("verbose"));

    let result = match matches.subcommand() {
        Some(("inspect", inspect_matches)) => handle_inspect_command(inspect_matches),
        Some(("check", check_matches)) => handle_check_command(check_matches),
        Some(("tokens", tokens_matches)) => handle_tokens_command(tokens_matches),
        _ => unreachable!(),
    };

    if let Err(error) = result {
        eprintln!("Error: {}", error);
        if let CliError::Parse { excerpt, .. } = &error {
            eprint!("{}", excerpt);
        }
        std::process::exit(1);
    }
}

fn path_of(matches: &ArgMatches) -> Result<&PathBuf, CliError> {
    matches
        .get_one::<PathBuf>("path")
        .ok_or_else(|| CliError::Usage("missing <path>".to_string()))
}

fn read_source(path: &PathBuf) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })
}

fn parse_file(path: &PathBuf, source: &str) -> Result<Element, CliError> {
    parse(source).map_err(|error| CliError::Parse {
        excerpt: error.source_context(source),
        error: error.with_filename(path.display().to_string()),
    })
}

/// Handle the inspect command
fn handle_inspect_command(matches: &ArgMatches) -> Result<(), CliError> {
    let path = path_of(matches)?;

    let mut loader = Loader::new();
    if let Some(config_path) = matches.get_one::<PathBuf>("config") {
        loader = loader.with_file(config_path);
    }
    if matches.get_flag("line-numbers") {
        loader = loader.set_override("inspect.treeviz.show_line_numbers", true)?;
    }
    let config = loader.build()?;

    let format = matches
        .get_one::<String>("format")
        .cloned()
        .unwrap_or_else(|| config.inspect.default_format.clone());

    let source = read_source(path)?;
    let root = parse_file(path, &source)?;

    let mut registry = FormatRegistry::with_defaults();
    registry.register(TreevizFormatter::new((&config.inspect.treeviz).into()));
    registry.register(DocumentFormatter::new((&config.document).into()));

    let output = registry.serialize(&root, &source, &format)?;
    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

/// Handle the check command
fn handle_check_command(matches: &ArgMatches) -> Result<(), CliError> {
    let path = path_of(matches)?;
    let source = read_source(path)?;
    parse_file(path, &source)?;
    println!("{}: ok", path.display());
    Ok(())
}

/// Handle the tokens command
fn handle_tokens_command(matches: &ArgMatches) -> Result<(), CliError> {
    let path = path_of(matches)?;
    let context: LexContext = matches
        .get_one::<String>("context")
        .map(String::as_str)
        .unwrap_or("body")
        .parse()
        .map_err(CliError::Usage)?;

    let source = read_source(path)?;
    let mut scanner = Scanner::new(&source);

    loop {
        let token = scanner.next(context);
        if token.kind == TokenKind::Eof {
            break;
        }
        let position = scanner.position(token.start);
        println!("{:>4}:{:<4} {}", position.line, position.column, token);
    }
    Ok(())
}
