use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar, in Chomsky normal form
    pub file: PathBuf,

    /// Strings to test for membership
    pub inputs: Vec<String>,

    /// Start symbol (default: first in the file)
    #[arg(short, long, value_name = "SYMBOL")]
    pub start: Option<String>,

    /// Print the CYK table after each test
    #[arg(short, long)]
    pub table: bool,

    /// Amount of random strings to generate and test (default: 0)
    #[arg(short = 'n', long, value_name = "AMOUNT")]
    pub amount: Option<usize>,

    /// Depth after which generated derivations are closed off (default: 8)
    #[arg(short, long, value_name = "DEPTH")]
    pub depth: Option<usize>
}
