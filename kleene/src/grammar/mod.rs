//! # Context-free grammars
//! The [Grammar] struct represents a context-free grammar over single-character symbols.
//! Uppercase letters are nonterminals, everything else is a terminal, `&` is the ε-body and
//! `$` the end-of-input sentinel of the analysis. A grammar is encoded on a single line as
//! `head=body;head=body;…`; the head of the first rule is the start symbol.
//!
//! Rules keep their order of appearance: the LL(1) table refers to rules by their 1-based
//! position in that order. Duplicate bodies of the same head are dropped when parsing.
//!
//! ```
//! use kleene::grammar::Grammar;
//!
//! let grammar: Grammar = kleene::parser::grammar("S=AB;A=aA;A=&;B=b")
//!     .unwrap()
//!     .try_into()
//!     .unwrap();
//! assert_eq!(
//!     grammar.first_follow_summary(),
//!     "First(S) = {a,b}; First(A) = {a,&}; First(B) = {b}; \
//!      Follow(S) = {$}; Follow(A) = {b}; Follow(B) = {$}"
//! );
//! ```
//!
//! ## Operations
//! * [Grammar::first] and [Grammar::follow] compute the FIRST and FOLLOW sets, guarded so
//!   that cyclic grammars terminate,
//! * [Grammar::left_recursion] finds a left-recursive cycle if one exists,
//! * [Grammar::left_ambiguity] finds two bodies of one head whose FIRST sets overlap,
//! * [Grammar::ll1_table] builds the LL(1) parsing table, refusing left-recursive or
//!   ambiguous grammars with a diagnostic.

pub use crate::parser::grammar as parse;
use crate::symbol::{is_terminal, EPSILON};

pub mod analysis;
pub mod ll1;
pub mod parse;

pub use analysis::LeftAmbiguity;
pub use ll1::{GrammarError, Ll1Table};
pub use parse::GrammarParseError;

/// A context-free grammar: the start symbol and the rules in order of appearance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grammar {
    pub(crate) initial: char,
    pub(crate) productions: Vec<Production>,
}

/// The rules of one head nonterminal, with the bodies in order of appearance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Production {
    pub(crate) head: char,
    pub(crate) bodies: Vec<Vec<char>>,
}

impl Production {
    /// Gets the head nonterminal of this production.
    pub fn head(&self) -> char {
        self.head
    }

    /// Gets the bodies of this production, in order of appearance.
    pub fn bodies(&self) -> &[Vec<char>] {
        &self.bodies
    }
}

impl Grammar {
    /// Gets the start symbol, the head of the first rule.
    pub fn initial(&self) -> char {
        self.initial
    }

    /// Gets the productions, heads in order of first appearance.
    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    /// Gets the bodies of the given nonterminal, or an empty slice if it has no rules.
    pub fn bodies(&self, head: char) -> &[Vec<char>] {
        self.productions
            .iter()
            .find(|production| production.head == head)
            .map(|production| production.bodies.as_slice())
            .unwrap_or(&[])
    }

    /// Iterates over the rules as `(head, body)` pairs in rule order. The LL(1) table numbers
    /// the rules from 1 in exactly this order.
    pub fn rules(&self) -> impl Iterator<Item = (char, &[char])> {
        self.productions.iter().flat_map(|production| {
            production
                .bodies
                .iter()
                .map(move |body| (production.head, body.as_slice()))
        })
    }

    /// Gets the nonterminals in order of first appearance: rule heads first, then
    /// nonterminals that only occur in bodies.
    pub fn nonterminals(&self) -> Vec<char> {
        let mut symbols: Vec<char> = Vec::new();
        for production in &self.productions {
            if !symbols.contains(&production.head) {
                symbols.push(production.head);
            }
        }
        for (_, body) in self.rules() {
            for &symbol in body {
                if !is_terminal(symbol) && !symbols.contains(&symbol) {
                    symbols.push(symbol);
                }
            }
        }
        symbols
    }

    /// Gets the terminals in order of first appearance. `&` does not count as a terminal of
    /// the grammar.
    pub fn terminals(&self) -> Vec<char> {
        let mut symbols: Vec<char> = Vec::new();
        for (_, body) in self.rules() {
            for &symbol in body {
                if is_terminal(symbol) && symbol != EPSILON && !symbols.contains(&symbol) {
                    symbols.push(symbol);
                }
            }
        }
        symbols
    }
}
