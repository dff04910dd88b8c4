/*
    This module decides membership of strings with the CYK algorithm
*/

mod table;

use itertools::Itertools;

use crate::grammar::{self, Grammar, Nonterminal, SymbolSet};

pub use table::{Span, Table};

// A CYK recognizer for one start symbol. The table of the last evaluation is
// kept for inspection until the next call to `eval`.
#[derive(Debug, Clone)]
pub struct Cyk {
    start_symbol: Nonterminal,
    grammar: Grammar,
    input: Vec<char>,
    table: Table
}

impl Cyk {
    pub fn new(start_symbol: Nonterminal) -> Self {
        Cyk::with_grammar(start_symbol, Grammar::new())
    }

    pub fn with_grammar(start_symbol: Nonterminal, grammar: Grammar) -> Self {
        Cyk {
            start_symbol,
            grammar,
            input: Vec::new(),
            table: Table::default()
        }
    }

    // Adds `left -> right` to the grammar, eg. ("S", "AB") or ("A", "a")
    pub fn insert(&mut self, left: &str, right: &str) -> grammar::Result<()> {
        self.grammar.insert(left, right)
    }

    pub fn start_symbol(&self) -> Nonterminal {
        self.start_symbol
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    // The input of the last evaluation
    pub fn input(&self) -> String {
        self.input.iter().collect()
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    // `None` if the cell was not computed by the last evaluation
    pub fn cell(&self, start: usize, end: usize) -> Option<&SymbolSet> {
        self.table.get(start, end)
    }

    // Returns true if the grammar derives `input` from the start symbol
    pub fn eval(&mut self, input: &str) -> bool {
        self.run(input);
        self.accepts()
    }

    fn run(&mut self, input: &str) {
        self.input = input.chars().collect();
        let width = self.input.len();
        self.table = Table::new(width);

        for (i, &c) in self.input.iter().enumerate() {
            self.table.set(Span::new(i, i), self.grammar.terminal_matches(c));
        }

        for len in 2..=width {
            for start in 0..=width - len {
                let span = Span::new(start, start + len - 1);
                let symbols = self.combine(span);
                self.table.set(span, symbols);
            }
        }
    }

    // Collects every nonterminal `X` with a production `X -> B C` where `B`
    // derives `start..=split` and `C` derives `split+1..=end`
    fn combine(&self, span: Span) -> SymbolSet {
        let mut symbols = SymbolSet::new();

        for split in span.start..span.end {
            let left = self.table.get(span.start, split);
            let right = self.table.get(split + 1, span.end);
            let (Some(left), Some(right)) = (left, right) else {
                continue;
            };

            for (first, second) in pairs(left, right) {
                symbols.extend(self.grammar.variable_matches(first, second).iter());
            }
        }

        symbols
    }

    fn accepts(&self) -> bool {
        self.table
            .top()
            .is_some_and(|symbols| symbols.contains(self.start_symbol))
    }
}

// Every (left, right) pair of symbols taken from the two cells
fn pairs<'a>(left: &'a SymbolSet, right: &'a SymbolSet) -> impl Iterator<Item = (Nonterminal, Nonterminal)> + 'a {
    left.iter().cartesian_product(right.iter().collect_vec())
}
