use std::collections::HashMap;
use std::fmt::Display;

use crate::grammar::SymbolSet;

// A substring of the input, `start..=end`, both zero based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "X({},{})", self.start + 1, self.end + 1)
    }
}

// The triangular table filled in by one CYK run over an input of `width`
// characters. Only spans with start <= end ever hold a value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    width: usize,
    cells: HashMap<Span, SymbolSet>
}

impl Table {
    pub fn new(width: usize) -> Self {
        Table {
            width,
            cells: HashMap::with_capacity(width * (width + 1) / 2)
        }
    }

    // Length of the input the table was built for
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    // `None` if the cell was never computed
    pub fn get(&self, start: usize, end: usize) -> Option<&SymbolSet> {
        self.cells.get(&Span::new(start, end))
    }

    pub(crate) fn set(&mut self, span: Span, symbols: SymbolSet) {
        self.cells.insert(span, symbols);
    }

    // The cell covering the whole input, if there is one
    pub fn top(&self) -> Option<&SymbolSet> {
        self.width.checked_sub(1).and_then(|end| self.get(0, end))
    }

    // The spans of one diagonal (all spans of `len` characters) in order of
    // increasing start position
    pub fn diagonal(&self, len: usize) -> impl Iterator<Item = Span> {
        let count = if len == 0 { 0 } else { (self.width + 1).saturating_sub(len) };
        (0..count).map(move |start| Span::new(start, start + len - 1))
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "no table computed");
        }

        for len in 1..=self.width {
            if len > 1 {
                writeln!(f)?;
            }
            write!(f, "{}:", len)?;
            for span in self.diagonal(len) {
                match self.cells.get(&span) {
                    Some(symbols) => write!(f, "\t{}:{}", span, symbols)?,
                    None => write!(f, "\t{}:-", span)?,
                }
            }
        }

        Ok(())
    }
}
