use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use std::fs;
use std::io::Read;
use tyc::diagnostics::Diagnostic;
use tyc::parser::ast::ASTRefVisitor;
use tyc::parser::pretty_print_ast::PrettyPrint;
use tyc::{parse, tokens_to_string, SUCCESS};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path of input TyC file, or `-` for stdin
    file: String,

    /// Print the token stream instead of parsing
    #[arg(long)]
    tokens: bool,

    /// Pretty-print the syntax tree of an accepted program
    #[arg(long)]
    ast: bool,

    /// Increase log verbosity (repeatable); RUST_LOG takes precedence
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn read_source(file: &str) -> anyhow::Result<String> {
    if file == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        Ok(text)
    } else {
        fs::read_to_string(file).with_context(|| format!("failed to read {}", file))
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let text = read_source(&cli.file)?;

    if cli.tokens {
        match tokens_to_string(&text) {
            Ok(tokens) => println!("{}", tokens),
            Err(err) => {
                eprintln!("{}", Diagnostic::from(err).render(&text));
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    match parse(&text) {
        Ok(program) => {
            if cli.ast {
                println!("{}", PrettyPrint::new().visit_program(&program));
            }
            println!("{}", SUCCESS);
        }
        Err(err) => {
            eprintln!("{}", err.render(&text));
            std::process::exit(1);
        }
    }

    Ok(())
}
