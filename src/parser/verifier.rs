use std::collections::HashSet;

use crate::grammar::{Body, Nonterminal};
use super::CompileErrorType::UndefinedNonterminal;
use super::{CompileError, CompileErrors, FileResult, Rule};

fn get_rule_undefined_symbols(rule: &Rule, defined: &HashSet<Nonterminal>) -> CompileErrors {
    // Take the symbols on the right of every pair production and keep the
    // ones that never appear on the left of a rule
    rule.productions.iter()
        .flat_map(|production| match production.body {
            Body::Pair(b, c) => vec![b, c],
            Body::Terminal(_) => Vec::new()
        })
        .filter(|symbol| !defined.contains(symbol))
        .map(|symbol| CompileError {
            location: rule.location.to_owned(),
            error: UndefinedNonterminal(symbol)
        })
        .collect()
}

fn get_undefined_symbols(rules: &[Rule]) -> CompileErrors {
    let defined: HashSet<Nonterminal> = rules.iter().map(|rule| rule.symbol).collect();

    rules.iter()
        .flat_map(|rule| get_rule_undefined_symbols(rule, &defined))
        .collect()
}

pub fn verify_rules(rules: &[Rule]) -> FileResult<()> {
    let mut errors = Vec::new();

    errors.extend(get_undefined_symbols(rules).into_iter());

    if errors.len() > 0 {
        Err(errors)
    } else {
        Ok(())
    }
}
