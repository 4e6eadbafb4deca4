use crate::grammar::{Grammar, LeftAmbiguity};
use crate::symbol::{format_symbol_set, EPSILON};
use std::collections::BTreeMap;
use thiserror::Error;

/// Why an LL(1) table could not be built for a grammar.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GrammarError {
    #[error("left-recursive grammar: {}", cycle_text(.0))]
    LeftRecursive(Vec<char>),
    #[error("grammar is not left-factored: {}", ambiguity_text(.0))]
    LeftAmbiguous(LeftAmbiguity),
    #[error("rules {0} and {1} both claim the table cell [{2}, {3}]")]
    TableConflict(usize, usize, char, char),
}

fn cycle_text(cycle: &[char]) -> String {
    cycle
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(" => ")
}

fn ambiguity_text(ambiguity: &LeftAmbiguity) -> String {
    let head = ambiguity.head;
    let first: String = ambiguity.bodies.0.iter().collect();
    let second: String = ambiguity.bodies.1.iter().collect();
    let symbols = format_symbol_set(ambiguity.symbols.iter().copied());
    format!("rules {head} => {first} and {head} => {second} collide on {symbols}")
}

/// An LL(1) parsing table: the partial mapping from a (nonterminal, lookahead terminal) pair
/// to the 1-based index of the rule to predict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ll1Table {
    pub(crate) initial: char,
    pub(crate) entries: BTreeMap<(char, char), usize>,
}

impl Ll1Table {
    /// Looks up the rule predicted for a nonterminal under a lookahead terminal.
    pub fn get(&self, nonterminal: char, terminal: char) -> Option<usize> {
        self.entries.get(&(nonterminal, terminal)).copied()
    }

    /// Iterates over the table cells as `(nonterminal, terminal, rule index)`.
    pub fn entries(&self) -> impl Iterator<Item = (char, char, usize)> + '_ {
        self.entries
            .iter()
            .map(|(&(nonterminal, terminal), &index)| (nonterminal, terminal, index))
    }

    /// Produces the single-line encoding
    /// `{nonterminals};initial;{terminals};[A,a,i][A,b,j]…`. Cells are sorted by terminal,
    /// then nonterminal, with non-alphanumeric terminals like `$` after the alphanumeric
    /// ones.
    pub fn encode(&self) -> String {
        let nonterminals = format_symbol_set(self.entries.keys().map(|&(nt, _)| nt));
        let terminals = format_symbol_set(self.entries.keys().map(|&(_, t)| t));

        let mut cells: Vec<(char, char, usize)> = self.entries().collect();
        cells.sort_by_key(|&(nonterminal, terminal, _)| {
            (!terminal.is_alphanumeric(), terminal, nonterminal)
        });
        let cells: String = cells
            .into_iter()
            .map(|(nonterminal, terminal, index)| format!("[{nonterminal},{terminal},{index}]"))
            .collect();

        format!("{nonterminals};{};{terminals};{cells}", self.initial)
    }
}

impl Grammar {
    /// Builds the LL(1) parsing table. The grammar is refused with a diagnostic if it is
    /// left-recursive or not left-factored, since the table would be ill-defined. Rule `i`
    /// (1-based, in rule order) lands in cell `[A, a]` for every terminal `a` in FIRST of its
    /// body; when the body is nullable it also lands in `[A, b]` for every `b` in FOLLOW(A),
    /// `$` included. A collision that survives both checks is reported as a conflict.
    pub fn ll1_table(&self) -> Result<Ll1Table, GrammarError> {
        if let Some(cycle) = self.left_recursion() {
            return Err(GrammarError::LeftRecursive(cycle));
        }
        if let Some(ambiguity) = self.left_ambiguity() {
            return Err(GrammarError::LeftAmbiguous(ambiguity));
        }

        let mut entries: BTreeMap<(char, char), usize> = BTreeMap::new();
        for (index, (head, body)) in self.rules().enumerate() {
            let index = index + 1;
            let mut symbols = self.first_of(body);
            if symbols.remove(&EPSILON) {
                symbols.extend(self.follow(head));
            }
            for symbol in symbols {
                if let Some(&previous) = entries.get(&(head, symbol)) {
                    return Err(GrammarError::TableConflict(previous, index, head, symbol));
                }
                entries.insert((head, symbol), index);
            }
        }

        Ok(Ll1Table {
            initial: self.initial,
            entries,
        })
    }
}
