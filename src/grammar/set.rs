use std::fmt::Display;

use itertools::Itertools;

use super::Nonterminal;

// The nonterminals that can derive one span of the input. Symbols are kept
// in the order they were first inserted so that printed tables are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolSet {
    symbols: Vec<Nonterminal>
}

impl SymbolSet {
    pub fn new() -> Self {
        SymbolSet { symbols: Vec::new() }
    }

    // Returns false if the symbol was already present
    pub fn insert(&mut self, symbol: Nonterminal) -> bool {
        if self.contains(symbol) {
            return false;
        }
        self.symbols.push(symbol);
        true
    }

    pub fn contains(&self, symbol: Nonterminal) -> bool {
        self.symbols.contains(&symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Nonterminal> + '_ {
        self.symbols.iter().copied()
    }

    // True if both sets hold the same symbols, whatever their order
    pub fn same_members(&self, other: &SymbolSet) -> bool {
        self.len() == other.len() && self.iter().all(|s| other.contains(s))
    }

    // True if every symbol of this set is also in `other`
    pub fn is_subset(&self, other: &SymbolSet) -> bool {
        self.iter().all(|s| other.contains(s))
    }
}

impl Extend<Nonterminal> for SymbolSet {
    fn extend<I: IntoIterator<Item = Nonterminal>>(&mut self, iter: I) {
        for symbol in iter {
            self.insert(symbol);
        }
    }
}

impl FromIterator<Nonterminal> for SymbolSet {
    fn from_iter<I: IntoIterator<Item = Nonterminal>>(iter: I) -> Self {
        let mut set = SymbolSet::new();
        set.extend(iter);
        set
    }
}

impl Display for SymbolSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.symbols.iter().join(","))
    }
}
