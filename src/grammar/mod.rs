/*
    This module is for storing and querying grammars in Chomsky normal form
*/

mod set;

use std::fmt::Display;

use itertools::Itertools;

use crate::error_handling::ErrorType;

pub use set::SymbolSet;

// The base unit in a rule as it is written in a grammar file
#[derive(Debug, PartialEq, Clone)]
pub enum Symbol {
    Terminal(String),
    Nonterminal(String),
}

// The symbols in a single alternative
pub type Alternative = Vec<Symbol>;

// The alternatives of a rewrite rule
pub type Rewrite = Vec<Alternative>;

#[derive(Debug, PartialEq, Clone)]
pub enum GrammarErrorType {
    // A nonterminal must be exactly one uppercase letter
    InvalidNonterminal(String),
    // A terminal must be exactly one lowercase letter
    InvalidTerminal(String),
    // The right side is neither one terminal nor two nonterminals
    InvalidBody(String),
}

impl ErrorType for GrammarErrorType {}

impl Display for GrammarErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarErrorType::InvalidNonterminal(s) => write!(f, "`{}` is not a nonterminal (expected one uppercase letter)", s),
            GrammarErrorType::InvalidTerminal(s) => write!(f, "`{}` is not a terminal (expected one lowercase letter)", s),
            GrammarErrorType::InvalidBody(s) => write!(f, "`{}` is not in Chomsky normal form (expected one terminal or two nonterminals)", s),
        }
    }
}

pub type Result<T> = std::result::Result<T, GrammarErrorType>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Nonterminal(char);

impl Nonterminal {
    pub fn new(symbol: char) -> Option<Self> {
        symbol.is_uppercase().then_some(Nonterminal(symbol))
    }

    pub fn as_char(self) -> char {
        self.0
    }
}

impl TryFrom<&str> for Nonterminal {
    type Error = GrammarErrorType;

    fn try_from(text: &str) -> Result<Self> {
        single_char(text)
            .and_then(Nonterminal::new)
            .ok_or_else(|| GrammarErrorType::InvalidNonterminal(text.to_string()))
    }
}

impl Display for Nonterminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn single_char(text: &str) -> Option<char> {
    text.chars().exactly_one().ok()
}

fn terminal(text: &str) -> Result<char> {
    single_char(text)
        .filter(|c| c.is_lowercase())
        .ok_or_else(|| GrammarErrorType::InvalidTerminal(text.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Terminal(char),
    Pair(Nonterminal, Nonterminal),
}

impl Display for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Body::Terminal(t) => write!(f, "\"{}\"", t),
            Body::Pair(b, c) => write!(f, "{} {}", b, c),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Production {
    pub left: Nonterminal,
    pub body: Body,
}

impl Production {
    // Parses the compact form used by `Grammar::insert`, eg. ("S", "AB") or
    // ("A", "a")
    pub fn parse(left: &str, right: &str) -> Result<Production> {
        let left = Nonterminal::try_from(left)?;
        let chars = right.chars().collect_vec();

        let body = match chars.as_slice() {
            &[t] if t.is_lowercase() => Body::Terminal(t),
            &[_] => return Err(GrammarErrorType::InvalidTerminal(right.to_string())),
            &[b, c] => match (Nonterminal::new(b), Nonterminal::new(c)) {
                (Some(b), Some(c)) => Body::Pair(b, c),
                _ => return Err(GrammarErrorType::InvalidBody(right.to_string())),
            },
            _ => return Err(GrammarErrorType::InvalidBody(right.to_string())),
        };

        Ok(Production { left, body })
    }

    // Builds a production from one alternative of a grammar file rule
    pub fn from_alternative(left: Nonterminal, alternative: &Alternative) -> Result<Production> {
        let body = match &alternative[..] {
            [Symbol::Terminal(t)] => Body::Terminal(terminal(t)?),
            [Symbol::Nonterminal(b), Symbol::Nonterminal(c)] => {
                Body::Pair(Nonterminal::try_from(b.as_str())?, Nonterminal::try_from(c.as_str())?)
            }
            _ => return Err(GrammarErrorType::InvalidBody(render_alternative(alternative))),
        };

        Ok(Production { left, body })
    }
}

impl Display for Production {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.left, self.body)
    }
}

fn render_alternative(alternative: &Alternative) -> String {
    alternative.iter().map(|symbol| match symbol {
        Symbol::Terminal(t) => format!("\"{}\"", t),
        Symbol::Nonterminal(n) => n.clone(),
    }).join(" ")
}

// The productions of a grammar, in the order they were inserted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grammar {
    productions: Vec<Production>,
}

impl Grammar {
    pub fn new() -> Self {
        Grammar { productions: Vec::new() }
    }

    // Inserts `left -> right`, rejecting anything that is not in Chomsky
    // normal form
    pub fn insert(&mut self, left: &str, right: &str) -> Result<()> {
        self.push(Production::parse(left, right)?);
        Ok(())
    }

    pub fn push(&mut self, production: Production) {
        self.productions.push(production);
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn len(&self) -> usize {
        self.productions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.productions.is_empty()
    }

    // Every nonterminal with a production `X -> terminal`
    pub fn terminal_matches(&self, terminal: char) -> SymbolSet {
        self.productions.iter()
            .filter(|p| p.body == Body::Terminal(terminal))
            .map(|p| p.left)
            .collect()
    }

    // Every nonterminal with a production `X -> first second`
    pub fn variable_matches(&self, first: Nonterminal, second: Nonterminal) -> SymbolSet {
        self.productions.iter()
            .filter(|p| p.body == Body::Pair(first, second))
            .map(|p| p.left)
            .collect()
    }

    // The productions whose left side is `symbol`
    pub fn rewrites(&self, symbol: Nonterminal) -> impl Iterator<Item = &Production> + '_ {
        self.productions.iter().filter(move |p| p.left == symbol)
    }

    pub fn defines(&self, symbol: Nonterminal) -> bool {
        self.rewrites(symbol).next().is_some()
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.productions.iter().join("\n"))
    }
}
