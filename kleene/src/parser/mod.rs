//! # Wire-format parsers
//! This module contains parsers for the three single-line text encodings: finite automata,
//! regular expressions and context-free grammars. All whitespace is stripped from the input
//! before parsing, so the encodings may be spaced freely.
//!
//! ## Format for automata
//! Semicolon-separated fields on one line:
//!
//! ```text
//! <#states>;<initial>;{<final>,<final>,…};{<sym>,<sym>,…};<src>,<sym>,<dst>;…
//! ```
//!
//! The leading field is the number of states and is informational only; it is recomputed when
//! the automaton is encoded again. The final-state set and the alphabet may be empty (`{}`),
//! and the transition list may be absent. A transition on the symbol `&` is an ε-move.
//!
//! ## Format for regular expressions
//! The metacharacters are `(`, `)`, `|`, `*` and `&`; any other character stands for itself.
//! `|` is alternation, `*` is the Kleene star, `&` is the empty string and parentheses group.
//! Concatenation is written by adjacency. The parser is total: an empty input denotes the
//! empty string, a dangling group is closed at the end of the input, and anything left over
//! after a stray `)` is ignored.
//!
//! ## Format for grammars
//! `head=body;head=body;…` where each head is a single nonterminal symbol and each body is a
//! string of single-character symbols (`&` for an ε-body). The head of the first rule is the
//! start symbol. Empty segments between semicolons are skipped, and duplicate bodies of the
//! same head are dropped.
//!
//! Automata and grammars are parsed in two steps: the functions here produce [ParsedAutomaton]
//! and [ParsedGrammar] values which only reflect the textual shape, and `TryInto` converts
//! them into [Automaton](crate::automaton::Automaton) and [Grammar](crate::grammar::Grammar)
//! while checking their invariants. Regular expressions need no validation step, so
//! [regex](crate::parser::regex) returns a [Regex](crate::regex::Regex) directly.

mod fa;
mod grammar;
mod re;

use crate::regex::Regex;
use nom::{combinator::all_consuming, error::Error, Finish};

/// An automaton as it appears in the text encoding, before invariant checking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAutomaton {
    pub state_count: usize,
    pub initial: String,
    pub finals: Vec<String>,
    pub alphabet: Vec<String>,
    pub transitions: Vec<(String, String, String)>,
}

/// A grammar as it appears in the text encoding, before invariant checking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedGrammar {
    pub rules: Vec<ParsedRule>,
}

/// One `head=body` rule of the grammar encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRule {
    pub head: char,
    pub body: Vec<char>,
}

/// Parses an automaton encoding. The whole (whitespace-stripped) input must be consumed.
/// The result is a [ParsedAutomaton] which is not yet checked against the automaton
/// invariants; use [TryInto] to convert it into an
/// [Automaton](crate::automaton::Automaton).
pub fn automaton(input: &str) -> Result<ParsedAutomaton, Error<String>> {
    let stripped = strip_whitespace(input);
    let result = all_consuming(fa::full_automaton)(&stripped)
        .finish()
        .map(|(_, automaton)| automaton)
        .map_err(owned_error);
    result
}

/// Parses a regular expression. Every input denotes some expression (see the module
/// documentation), so this function is total.
pub fn regex(input: &str) -> Regex {
    let stripped = strip_whitespace(input);
    re::full_regex(&stripped)
}

/// Parses a grammar encoding. The whole (whitespace-stripped) input must be consumed. The
/// result is a [ParsedGrammar] which is not yet checked against the grammar invariants; use
/// [TryInto] to convert it into a [Grammar](crate::grammar::Grammar).
pub fn grammar(input: &str) -> Result<ParsedGrammar, Error<String>> {
    let stripped = strip_whitespace(input);
    let result = all_consuming(grammar::full_grammar)(&stripped)
        .finish()
        .map(|(_, grammar)| grammar)
        .map_err(owned_error);
    result
}

fn strip_whitespace(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

// The stripped input is local to the parse functions, so errors cannot borrow from it
fn owned_error(error: Error<&str>) -> Error<String> {
    Error::new(error.input.to_string(), error.code)
}
