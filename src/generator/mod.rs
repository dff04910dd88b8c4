/*
    This module generates random strings derivable from a grammar
*/

use rand::prelude::*;
use std::path::PathBuf;
use std::{collections::HashMap, fmt::Display};

use crate::grammar::{Body, Grammar, Nonterminal, Production};
use crate::error_handling::*;

#[derive(Debug, PartialEq)]
pub enum GenerateErrorType {
    // A nonterminal without any productions was reached
    UndefinedNonterminal(Nonterminal),
    // Every derivation from this nonterminal loops forever
    Unproductive(Nonterminal),
}

impl ErrorType for GenerateErrorType {}

impl Display for GenerateErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateErrorType::UndefinedNonterminal(nonterminal) => write!(f, "No definition for nonterminal `{}`", nonterminal),
            GenerateErrorType::Unproductive(nonterminal) => write!(f, "Nonterminal `{}` never derives a finite string", nonterminal),
        }
    }
}

pub type GenResult = Result<String, GenerateErrorType>;

// Height of the shortest derivation tree for each nonterminal that has one
type Heights = HashMap<Nonterminal, usize>;

fn production_height(production: &Production, heights: &Heights) -> Option<usize> {
    match production.body {
        Body::Terminal(_) => Some(1),
        Body::Pair(b, c) => Some(1 + *heights.get(&b)?.max(heights.get(&c)?)),
    }
}

fn derivation_heights(grammar: &Grammar) -> Heights {
    let mut heights = Heights::new();

    // Each pass can only lower a height or add a symbol, so this settles
    let mut changed = true;
    while changed {
        changed = false;
        for production in grammar.productions() {
            let Some(height) = production_height(production, &heights) else {
                continue;
            };
            let current = heights.entry(production.left).or_insert(usize::MAX);
            if height < *current {
                *current = height;
                changed = true;
            }
        }
    }

    heights
}

struct Generator<'a, R: Rng> {
    grammar: &'a Grammar,
    heights: Heights,
    max_depth: usize,
    rng: &'a mut R
}

impl<'a, R: Rng> Generator<'a, R> {
    fn generate_nonterminal(&mut self, nonterminal: Nonterminal, depth: usize, result: &mut String) -> Result<(), GenerateErrorType> {
        if !self.grammar.defines(nonterminal) {
            return Err(GenerateErrorType::UndefinedNonterminal(nonterminal));
        }
        let Some(&height) = self.heights.get(&nonterminal) else {
            return Err(GenerateErrorType::Unproductive(nonterminal));
        };

        // Past the depth limit only productions on a shortest derivation are
        // used, which strictly lowers the height each step
        let choices = self.grammar.rewrites(nonterminal)
            .filter(|p| match production_height(p, &self.heights) {
                Some(h) => depth < self.max_depth || h == height,
                None => false,
            })
            .copied()
            .collect::<Vec<_>>();

        let production = match choices.choose(&mut *self.rng) {
            Some(p) => *p,
            None => return Err(GenerateErrorType::Unproductive(nonterminal)),
        };

        match production.body {
            Body::Terminal(t) => result.push(t),
            Body::Pair(b, c) => {
                self.generate_nonterminal(b, depth + 1, result)?;
                self.generate_nonterminal(c, depth + 1, result)?;
            }
        }

        Ok(())
    }
}

// Generates a string in the given grammar starting with the given symbol.
// Derivations may grow freely until `max_depth`, after which they are closed
// off as quickly as possible.
pub fn generate(grammar: &Grammar, start: Nonterminal, max_depth: usize, rng: &mut impl Rng) -> GenResult {
    let mut generator = Generator {
        grammar,
        heights: derivation_heights(grammar),
        max_depth,
        rng
    };

    let mut result = String::new();
    generator.generate_nonterminal(start, 0, &mut result)?;
    Ok(result)
}

// Generates `amount` strings, stopping at the first error. `file` is where
// the grammar came from.
pub fn generate_many(grammar: &Grammar, start: Nonterminal, max_depth: usize, amount: usize, file: PathBuf) -> Result<Vec<String>, Error<GenerateErrorType>> {
    let mut rng = thread_rng();
    (0..amount)
        .map(|_| generate(grammar, start, max_depth, &mut rng))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|error| Error {
            location: Location::file(file),
            error
        })
}
