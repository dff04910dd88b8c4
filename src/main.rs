use std::process::ExitCode;

use clap::Parser;

use cyk::cli::Cli;
use cyk::cyk::Cyk;
use cyk::error_handling::{Error, Location};
use cyk::generator;
use cyk::grammar::{GrammarErrorType, Nonterminal};
use cyk::parser;

const DEFAULT_DEPTH: usize = 8;

fn report(cyk: &mut Cyk, input: &str, table: bool) {
    let verdict = if cyk.eval(input) { "accepted" } else { "rejected" };
    println!("{:?}: {}", input, verdict);
    if table {
        println!("{}", cyk.table());
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let definition = match parser::parse_file(&cli.file) {
        Ok(definition) => definition,
        Err(errors) => {
            for error in errors {
                eprintln!("{}", error);
            }
            return ExitCode::FAILURE;
        }
    };

    let start_symbol = match cli.start.as_deref().map(Nonterminal::try_from) {
        None => definition.start_symbol,
        Some(Ok(symbol)) => symbol,
        Some(Err(error)) => {
            eprintln!("{}", Error::<GrammarErrorType> { location: Location::file(cli.file), error });
            return ExitCode::FAILURE;
        }
    };

    let mut cyk = Cyk::with_grammar(start_symbol, definition.grammar);

    for input in &cli.inputs {
        report(&mut cyk, input, cli.table);
    }

    let amount = cli.amount.unwrap_or(0);
    let depth = cli.depth.unwrap_or(DEFAULT_DEPTH);
    match generator::generate_many(cyk.grammar(), start_symbol, depth, amount, cli.file) {
        Ok(generated) => {
            for input in generated {
                report(&mut cyk, &input, cli.table);
            }
        }
        Err(error) => {
            eprintln!("{}", error);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
