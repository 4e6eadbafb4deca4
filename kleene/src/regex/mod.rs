//! # Regular expressions
//! This module implements the mathematical flavor of regular expressions: single-character
//! symbols, concatenation by adjacency, alternation with `|`, the Kleene star `*`, grouping
//! parentheses and `&` for the empty string. `#` is reserved as the end marker of the
//! compilation step and should not appear in expressions.
//!
//! A parsed expression is a [Regex] wrapping a [RegexTree], a sum type with exactly four
//! variants: a leaf (a symbol or ε), concatenation, alternation and the star. The only
//! operation is compiling to a deterministic automaton with [Regex::to_dfa], which uses the
//! syntax-tree annotation method: every non-ε leaf gets a position, the tree is annotated
//! with nullable/firstpos/lastpos, a followpos table is accumulated, and the DFA states are
//! discovered as sets of positions.
//!
//! ```
//! use kleene::parser;
//!
//! let regex = parser::regex("(a|b)*abb");
//! let dfa = regex.to_dfa();
//! assert!(dfa.accepts("abb"));
//! assert!(dfa.accepts("babb"));
//! assert!(!dfa.accepts("ab"));
//! ```

use std::fmt;

mod annotate;
mod compile;

/// A regular expression, as produced by [parser::regex](crate::parser::regex).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Regex {
    pub tree: RegexTree,
}

/// The syntax tree of a regular expression. A leaf carries a single symbol, or `None` for the
/// empty string ε.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegexTree {
    Leaf(Option<char>),
    Cat(Box<RegexTree>, Box<RegexTree>),
    Or(Box<RegexTree>, Box<RegexTree>),
    Star(Box<RegexTree>),
}

impl RegexTree {
    /// The ε leaf.
    pub fn epsilon() -> RegexTree {
        RegexTree::Leaf(None)
    }

    /// Concatenation of two trees.
    pub fn cat(left: RegexTree, right: RegexTree) -> RegexTree {
        RegexTree::Cat(Box::new(left), Box::new(right))
    }

    /// Alternation of two trees.
    pub fn or(left: RegexTree, right: RegexTree) -> RegexTree {
        RegexTree::Or(Box::new(left), Box::new(right))
    }

    /// The Kleene star of a tree.
    pub fn star(child: RegexTree) -> RegexTree {
        RegexTree::Star(Box::new(child))
    }
}

impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        build_string(&self.tree, f)
    }
}

fn build_string(tree: &RegexTree, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match tree {
        RegexTree::Leaf(None) => write!(f, "&"),
        RegexTree::Leaf(Some(c)) => write!(f, "{c}"),
        RegexTree::Cat(left, right) => {
            build_string(left, f)?;
            build_string(right, f)
        }
        RegexTree::Or(left, right) => {
            write!(f, "(")?;
            build_string(left, f)?;
            write!(f, "|")?;
            build_string(right, f)?;
            write!(f, ")")
        }
        RegexTree::Star(child) => {
            write!(f, "(")?;
            build_string(child, f)?;
            write!(f, ")*")
        }
    }
}
