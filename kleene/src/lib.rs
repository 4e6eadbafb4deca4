//!# kleene
//!
//! `kleene` is a Rust library for the front-end theory of formal languages: finite automata,
//! regular expressions and context-free grammars, built around canonical single-line text
//! encodings suitable for automated grading.
//!
//! ## Usage
//!
//! ```rust
//! use kleene::automaton::Automaton;
//! use kleene::grammar::Grammar;
//!
//! // Determinize an ε-NFA. The encoding is
//! // <#states>;<initial>;{finals};{alphabet};src,sym,dst;…
//! let nfa: Automaton = kleene::parser::automaton("3;A;{C};{a,b};A,&,B;B,a,B;B,b,C")
//!     .unwrap()
//!     .try_into()
//!     .unwrap();
//! let dfa = nfa.determinize();
//! assert_eq!(dfa.encode(), "3;AB;{C};{a,b};AB,a,B;AB,b,C;B,a,B;B,b,C");
//!
//! // Compile a regular expression to a minimal-looking DFA the annotation way
//! let dfa = kleene::parser::regex("(a|b)*abb").to_dfa();
//! assert!(dfa.accepts("aababb"));
//! assert!(!dfa.accepts("ab"));
//!
//! // Analyze a grammar
//! let grammar: Grammar = kleene::parser::grammar("S=AB;A=aA;A=&;B=b")
//!     .unwrap()
//!     .try_into()
//!     .unwrap();
//! assert_eq!(grammar.follow('A'), std::collections::BTreeSet::from(['b']));
//! assert!(grammar.ll1_table().is_ok());
//! ```
//!
//! ## Values and encodings
//!
//! Everything is an immutable value constructed from a text encoding (or from parts) and
//! either transformed into a new value or serialized back to text. The encodings are
//! canonical: sets are sorted, transitions are ordered by source, symbol and destination, so
//! serializing, parsing and serializing again reproduces the exact same line.
//!
//! * [Automaton](automaton::Automaton) carries states, alphabet, one initial state, final
//!   states and a transition relation. ε-moves are transitions on the reserved symbol `&`.
//! * [Regex](regex::Regex) is a syntax tree with leaf, concatenation, alternation and star
//!   nodes. `&` is the empty string.
//! * [Grammar](grammar::Grammar) is an ordered rule set over single-character symbols;
//!   uppercase letters are the nonterminals.
//!
//! ## Operations
//!
//! This library currently supports:
//!
//! * [Parsing](parser::automaton) and [validating](automaton::parse) automata
//! * [Determinization](automaton::Automaton::determinize) by the subset construction with
//!   ε-closures
//! * [Minimization](automaton::Automaton::minimize) by useless-state pruning and partition
//!   refinement
//! * [Reachability](automaton::Automaton::reachable) sweeps, optionally per symbol
//! * [Word acceptance](automaton::Automaton::accepts) for automata of any shape
//! * [Parsing regular expressions](parser::regex) and
//!   [compiling them to DFAs](regex::Regex::to_dfa) via nullable/firstpos/lastpos/followpos
//! * [Parsing](parser::grammar) and [validating](grammar::parse) grammars
//! * [FIRST](grammar::Grammar::first) and [FOLLOW](grammar::Grammar::follow) sets, guarded
//!   against cyclic grammars
//! * [Left-recursion](grammar::Grammar::left_recursion) and
//!   [left-ambiguity](grammar::Grammar::left_ambiguity) detection
//! * [LL(1) table construction](grammar::Grammar::ll1_table) with structured refusal

pub mod automaton;
pub mod grammar;
pub mod parser;
pub mod regex;
pub mod symbol;

#[cfg(test)]
mod tests;
