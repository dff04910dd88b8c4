/*
    This module parses grammar files in Chomsky normal form
*/

mod lexer;
mod verifier;

use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::grammar::*;
use crate::error_handling::*;
use itertools::Itertools;
use lexer::*;
use verifier::verify_rules;

#[derive(Debug)]
pub enum CompileErrorType {
    // A line which should contain a rule does not
    MissingEquals,
    // A rule has multiple equals signs
    UnexpectedEquals,
    // The user starts a rule line with something other than a nonterminal
    MissingNonterminal,
    // There is an unclosed quote
    UnmatchedQuote,
    // A nonterminal is used but has no rules
    UndefinedNonterminal(Nonterminal),
    // A symbol or alternative that cannot appear in Chomsky normal form
    NotNormalForm(GrammarErrorType),
    // The file has no rules, so there is no start symbol
    NoRules,
    // Somehow a full rewrite was parsed as a base alternative
    // This is a problem with cyk, not the grammar
    UnsplitRewrite,
    // A blank line got too deep into the parser
    // This is a problem with cyk, not the grammar
    UnexpectedBlankLine,
    // There was an issue with reading a file
    FileError(std::io::Error),
}

impl ErrorType for CompileErrorType {}

impl PartialEq for CompileErrorType {
    fn eq(&self, other: &Self) -> bool {
        use CompileErrorType::*;
        match (self, other) {
            (FileError(a), FileError(b)) => a.kind() == b.kind(),
            (UndefinedNonterminal(a), UndefinedNonterminal(b)) => a == b,
            (NotNormalForm(a), NotNormalForm(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Display for CompileErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileErrorType::MissingEquals => write!(f, "Expected `=` after nonterminal"),
            CompileErrorType::UnexpectedEquals => write!(f, "Unexpected `=` encountered"),
            CompileErrorType::MissingNonterminal => write!(f, "Tried to define something other than a nonterminal"),
            CompileErrorType::UnmatchedQuote => write!(f, "Unmatched quotes"),
            CompileErrorType::UndefinedNonterminal(nonterminal) => write!(f, "Could not find definition for `{}`", nonterminal),
            CompileErrorType::NotNormalForm(e) => write!(f, "{}", e),
            CompileErrorType::NoRules => write!(f, "The grammar has no rules"),
            CompileErrorType::UnsplitRewrite => write!(f, "Rewrite was not fully split (this is a problem with cyk, not the grammar)"),
            CompileErrorType::UnexpectedBlankLine => write!(f, "Blank line encountered in rule parser (this is a problem with cyk, not the grammar)"),
            CompileErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

impl From<GrammarErrorType> for CompileErrorType {
    fn from(error: GrammarErrorType) -> Self {
        CompileErrorType::NotNormalForm(error)
    }
}

pub type CompileError = Error<CompileErrorType>;
pub type CompileErrors = Errors<CompileErrorType>;

fn io_error(error: std::io::Error, file: PathBuf) -> CompileError {
    CompileError {
        location: Location::file(file),
        error: CompileErrorType::FileError(error)
    }
}

pub type Result<T> = std::result::Result<T, CompileErrorType>;
pub type LineResult<T> = std::result::Result<T, CompileError>;
pub type FileResult<T> = std::result::Result<T, CompileErrors>;

// A grammar read from a file, along with the start symbol it declares
#[derive(Debug, PartialEq)]
pub struct Definition {
    pub start_symbol: Nonterminal,
    pub grammar: Grammar
}

#[derive(PartialEq, Debug)]
struct Rule {
    symbol: Nonterminal,
    productions: Vec<Production>,
    location: Location
}

fn parse_alternative(tokens: &[Token]) -> Result<Alternative> {
    tokens.iter().map(|t| match t {
        Token::Equals => Err(CompileErrorType::UnexpectedEquals),
        Token::Or => Err(CompileErrorType::UnsplitRewrite),
        Token::Nonterminal(s) => Ok(Symbol::Nonterminal(s.clone())),
        Token::Terminal(s) => Ok(Symbol::Terminal(s.clone()))
    }).collect()
}

fn parse_rewrite(tokens: &[Token]) -> Result<Rewrite> {
    tokens.split(|t| *t == Token::Or).map(parse_alternative).collect()
}

fn parse_line(tokens: &[Token], location: Location) -> Result<Rule> {
    let symbol = match tokens.get(0) {
        Some(Token::Nonterminal(s)) => Ok(Nonterminal::try_from(s.as_str())?),
        Some(_) => Err(CompileErrorType::MissingNonterminal),
        None => Err(CompileErrorType::UnexpectedBlankLine)
    }?;

    if tokens.get(1) != Some(&Token::Equals) {
        return Err(CompileErrorType::MissingEquals)
    }

    let productions = parse_rewrite(&tokens[2..])?
        .iter()
        .map(|alternative| Production::from_alternative(symbol, alternative))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    return Ok(Rule {
        symbol,
        productions,
        location
    });
}

fn parse_lex_line(line: &str, location: Location) -> LineResult<Rule> {
    lexer::lex_line(line)
        .and_then(|lexed_line| parse_line(&lexed_line, location.clone()))
        .map_err(|error| CompileError { location, error })
}

fn is_rule_line(line: &String) -> bool {
    let line = line.trim_start();
    !line.is_empty() && !line.starts_with(';')
}

// Returns an iterator over the lines of a reader, with the io errors wrapped
// in CompileError and enumerated
fn file_line_nums<'a>(reader: impl BufRead + 'a, path: &'a Path) -> impl Iterator<Item = (usize, LineResult<String>)> + 'a {
    reader
        .lines()
        .map(move |line| line.map_err(|e| io_error(e, path.to_path_buf())))
        .enumerate()
        .filter(|(_, line)| line.as_ref().is_ok_and(is_rule_line) || line.is_err())
        .map(|(num, line)| (num + 1, line))
}

fn grammar_from_rules(rules: Vec<Rule>, path: &Path) -> FileResult<Definition> {
    let start_symbol = match rules.first() {
        Some(rule) => rule.symbol,
        None => return Err(vec![CompileError {
            location: Location::file(path.to_path_buf()),
            error: CompileErrorType::NoRules
        }])
    };

    verify_rules(&rules)?;

    let mut grammar = Grammar::new();
    for production in rules.into_iter().flat_map(|rule| rule.productions) {
        grammar.push(production);
    }

    return Ok(Definition {
        start_symbol,
        grammar
    });
}

// Parses grammar text read from `reader`; `path` is only used to locate
// errors
pub fn parse_reader<'a>(reader: impl BufRead + 'a, path: &'a Path) -> FileResult<Definition> {
    let lines = file_line_nums(reader, path);

    let parsed_lines = lines.map(|(num, line_res)| {
        line_res.and_then(|line| parse_lex_line(&line, Location {
            file: path.to_path_buf(),
            line: num
        }))
    });

    let (rules, errors): (Vec<_>, Vec<_>) = parsed_lines.partition_result();
    if errors.len() > 0 {
        return Err(errors);
    }

    return grammar_from_rules(rules, path);
}

pub fn parse_str(text: &str, path: &Path) -> FileResult<Definition> {
    parse_reader(text.as_bytes(), path)
}

pub fn parse_file(path: &Path) -> FileResult<Definition> {
    let file = File::open(path).map_err(|e| vec![io_error(e, path.to_path_buf())])?;
    parse_reader(BufReader::new(file), path)
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;

    impl Location {
        pub fn new() -> Self {
            Location {
                file: PathBuf::new(),
                line: 0
            }
        }
    }

    fn nt(c: char) -> Nonterminal {
        Nonterminal::new(c).unwrap()
    }

    fn pair(left: char, b: char, c: char) -> Production {
        Production { left: nt(left), body: Body::Pair(nt(b), nt(c)) }
    }

    fn term(left: char, t: char) -> Production {
        Production { left: nt(left), body: Body::Terminal(t) }
    }

    fn s_nonterminal(text: &str) -> Symbol {
        Symbol::Nonterminal(text.to_string())
    }

    fn s_terminal(text: &str) -> Symbol {
        Symbol::Terminal(text.to_string())
    }

    #[test]
    fn parse_normal_alternative() {
        let lines = vec![
            vec![
                Token::Nonterminal("A".to_string()),
                Token::Nonterminal("B".to_string())
            ],
            vec![
                Token::Terminal("a".to_string())
            ]
        ];
        let answers = vec![
            vec![
                s_nonterminal("A"),
                s_nonterminal("B")
            ],
            vec![
                s_terminal("a")
            ]
        ];

        for (line, answer) in zip(lines, answers) {
            assert_eq!(parse_alternative(&line[..]).unwrap(), answer);
        }
    }

    #[test]
    fn parse_malformed_alternative() {
        assert_eq!(parse_alternative(&[Token::Equals]), Err(CompileErrorType::UnexpectedEquals));
        assert_eq!(parse_alternative(&[Token::Or]), Err(CompileErrorType::UnsplitRewrite));
    }

    #[test]
    fn parse_normal_line() {
        let text = "S = A B | \"s\"";
        let lexed = lexer::lex_line(text).unwrap();

        let answer = Rule {
            symbol: nt('S'),
            productions: vec![pair('S', 'A', 'B'), term('S', 's')],
            location: Location::new()
        };

        assert_eq!(parse_line(&lexed[..], Location::new()), Ok(answer));
    }

    #[test]
    fn parse_malformed_line() {
        // Blank
        assert_eq!(parse_line(&[], Location::new()), Err(CompileErrorType::UnexpectedBlankLine));

        // Missing equals
        assert_eq!(parse_line(
            &lexer::lex_line("S A B").unwrap()[..],
            Location::new()
        ), Err(CompileErrorType::MissingEquals));

        // Improper definition
        assert_eq!(parse_line(
            &lexer::lex_line("\"s\" = A B").unwrap()[..],
            Location::new()
        ), Err(CompileErrorType::MissingNonterminal));
        assert_eq!(parse_line(
            &lexer::lex_line("| = A B").unwrap()[..],
            Location::new()
        ), Err(CompileErrorType::MissingNonterminal));
        assert_eq!(parse_line(
            &lexer::lex_line("= A B").unwrap()[..],
            Location::new()
        ), Err(CompileErrorType::MissingNonterminal));

        // Not in normal form
        assert_eq!(parse_line(
            &lexer::lex_line("Sentence = A B").unwrap()[..],
            Location::new()
        ), Err(CompileErrorType::NotNormalForm(GrammarErrorType::InvalidNonterminal("Sentence".to_string()))));
        assert_eq!(parse_line(
            &lexer::lex_line("S = A B C").unwrap()[..],
            Location::new()
        ), Err(CompileErrorType::NotNormalForm(GrammarErrorType::InvalidBody("A B C".to_string()))));
        assert_eq!(parse_line(
            &lexer::lex_line("S = A |").unwrap()[..],
            Location::new()
        ), Err(CompileErrorType::NotNormalForm(GrammarErrorType::InvalidBody("A".to_string()))));
        assert_eq!(parse_line(
            &lexer::lex_line("S = \"ab\"").unwrap()[..],
            Location::new()
        ), Err(CompileErrorType::NotNormalForm(GrammarErrorType::InvalidTerminal("ab".to_string()))));
    }

    #[test]
    fn parse_rules_across_lines() {
        let text = "; balanced\n\nS = L R\n  ; indented comment\nS = S S\nL = \"l\"\nR = \"r\"\n";
        let parsed = parse_str(text, Path::new("inline")).unwrap();

        assert_eq!(parsed.start_symbol, nt('S'));
        assert_eq!(parsed.grammar.productions(), &[
            pair('S', 'L', 'R'),
            pair('S', 'S', 'S'),
            term('L', 'l'),
            term('R', 'r')
        ]);
    }

    #[test]
    fn parse_empty_grammar() {
        let path = Path::new("inline");

        assert_eq!(parse_str("; nothing here\n", path), Err(vec![CompileError {
            location: Location::file(path.to_path_buf()),
            error: CompileErrorType::NoRules
        }]));
    }

    #[test]
    fn parse_normal_file() {
        let example_path = PathBuf::from("example_data/ab.cnf");
        let example_parsed = parse_file(&example_path).unwrap();

        let mut grammar = Grammar::new();
        grammar.push(pair('S', 'A', 'B'));
        grammar.push(pair('A', 'A', 'A'));
        grammar.push(term('A', 'a'));
        grammar.push(term('B', 'b'));

        assert_eq!(example_parsed, Definition {
            start_symbol: nt('S'),
            grammar
        });
    }

    #[test]
    fn parse_malformed_file() {
        let example_path = PathBuf::from("example_data/malformed.cnf");
        let example_parsed = parse_file(&example_path).unwrap_err();

        assert_eq!(example_parsed, vec![
            CompileError {
                location: Location {
                    file: example_path.clone(),
                    line: 3
                },
                error: CompileErrorType::MissingNonterminal
            },
            CompileError {
                location: Location {
                    file: example_path.clone(),
                    line: 5
                },
                error: CompileErrorType::NotNormalForm(GrammarErrorType::InvalidBody("A B C".to_string()))
            },
            CompileError {
                location: Location {
                    file: example_path,
                    line: 7
                },
                error: CompileErrorType::UnexpectedEquals
            }
        ]);
    }

    #[test]
    fn parse_undefined_file() {
        let example_path = PathBuf::from("example_data/undefined.cnf");
        let example_parsed = parse_file(&example_path).unwrap_err();

        assert_eq!(example_parsed, vec![
            CompileError {
                location: Location {
                    file: example_path,
                    line: 2
                },
                error: CompileErrorType::UndefinedNonterminal(nt('C'))
            }
        ]);
    }

    #[test]
    fn parse_missing_file() {
        let example_path = PathBuf::from("example_data/does_not_exist.cnf");
        let example_parsed = parse_file(&example_path).unwrap_err();

        assert_eq!(example_parsed, vec![io_error(
            std::io::Error::from(std::io::ErrorKind::NotFound),
            example_path
        )]);
    }
}
