//! Membership testing for context-free grammars in Chomsky normal form,
//! using the Cocke-Younger-Kasami algorithm.
//!
//! ```
//! use cyk::cyk::Cyk;
//! use cyk::grammar::Nonterminal;
//!
//! let mut cyk = Cyk::new(Nonterminal::new('S').unwrap());
//! cyk.insert("S", "AB").unwrap();
//! cyk.insert("A", "a").unwrap();
//! cyk.insert("B", "b").unwrap();
//!
//! assert!(cyk.eval("ab"));
//! assert!(!cyk.eval("ba"));
//! ```

pub mod cli;
pub mod cyk;
pub mod error_handling;
pub mod generator;
pub mod grammar;
pub mod parser;
