//! Springbox CLI
//!
//! Usage:
//!   springbox [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --config <FILE>    Layout configuration (TOML format)
//!   -f, --format <FORMAT>  Output format: text or toml
//!   -l, --lint             Report gaps and overflow on stderr
//!   -g, --grammar          Show language grammar reference
//!   -h, --help             Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use springbox::layout::{format_tree, to_toml};
use springbox::{layout_with_lint, LayoutConfig};

#[derive(Parser)]
#[command(name = "springbox")]
#[command(about = "One-dimensional box layout with springs and struts")]
struct Cli {
    /// Input file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Layout configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Report layouts that leave gaps or overflow
    #[arg(short, long)]
    lint: bool,

    /// Show language grammar reference
    #[arg(short, long)]
    grammar: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Indented tree, one element per line
    Text,
    /// TOML document
    Toml,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if cli.grammar {
        print_grammar();
        return;
    }

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let config = match &cli.config {
        Some(path) => match LayoutConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => LayoutConfig::default(),
    };

    // Read input
    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let (result, warnings) = match layout_with_lint(&source, &config) {
        Ok(out) => out,
        Err(e) => {
            eprint!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
    };

    if cli.lint {
        for warning in &warnings {
            eprintln!("warning: {}", warning);
        }
    }

    match cli.format {
        Format::Text => print!("{}", format_tree(&result)),
        Format::Toml => match to_toml(&result) {
            Ok(toml) => print!("{}", toml),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
    }
}

fn print_intro() {
    println!(
        r#"Springbox - one-dimensional box layout with springs and struts

USAGE:
    springbox [OPTIONS] [FILE]
    echo '<code>' | springbox

OPTIONS:
    -c, --config       Layout configuration (TOML file)
    -f, --format       Output format: text (default) or toml
    -l, --lint         Report gaps and overflow
    -g, --grammar      Show language grammar reference
    -h, --help         Print help

QUICK START:
    echo 'row [width: 100] {{ box a  spring  box b }}' | springbox

This pushes `a` and `b` to opposite ends of a 100-wide row.
Run --grammar for the syntax reference."#
    );
}

fn print_grammar() {
    println!(
        r#"SPRINGBOX GRAMMAR
=================

ITEMS
-----
box [name] [modifiers]       Ordinary element (default 40x20, rigid)
spring [name]                Stretches to absorb excess space, first to collapse
strut [name] [modifiers]     Fixed-size spacer

LAYOUTS
-------
row [name] [mod] {{ ... }}    Children left to right
col [name] [mod] {{ ... }}    Children top to bottom

MODIFIERS
---------
Modifiers go in brackets after the element name:
    box a [width: 30, min_width: 10, max_width: unbounded]

    width, height            Natural size (box, strut; root row width / root col height)
    min_width, min_height    How far a box may shrink (defaults to natural)
    max_width, max_height    How far a box may grow (number or `unbounded`)
    justify                  Cross-axis alignment of a row or column's children
                             row: top | center | bottom    col: left | center | right
                             both: start | center | end

COMMENTS
--------
// line comment    /* block comment */"#
    );
}
