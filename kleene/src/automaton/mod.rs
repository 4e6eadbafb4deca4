//! # Finite automata
//! The [Automaton] struct represents a finite automaton, deterministic or not, with or without
//! ε-moves. It is an immutable value: every operation returns a fresh automaton and nothing is
//! mutated after construction. The two ways to create one are parsing the single-line text
//! encoding and building it from parts with [Automaton::new].
//!
//! ## Encoding
//! An automaton is encoded on a single line with semicolon-separated fields:
//!
//! ```text
//! <#states>;<initial>;{<finals>};{<alphabet>};<src>,<sym>,<dst>;<src>,<sym>,<dst>;…
//! ```
//!
//! All whitespace is stripped before parsing. The `<#states>` field is informational and is
//! recomputed on output. ε-moves are written as transitions on the symbol `&`; `&` itself is
//! never part of the alphabet. The set of states is derived from the transition endpoints
//! together with the initial state and the final states, and is never supplied on its own.
//!
//! Parsing is done in two steps, the first one parsing into a
//! [ParsedAutomaton](crate::parser::ParsedAutomaton) and the second one checking the invariants
//! of that parsed automaton and converting it into an [Automaton] with [TryInto]:
//!
//! ```
//! use kleene::automaton::Automaton;
//!
//! // An ε-NFA accepting any number of a:s followed by one b
//! let input = "3;A;{C};{a,b};A,&,B;B,a,B;B,b,C";
//! let nfa: Automaton = kleene::parser::automaton(input).unwrap().try_into().unwrap();
//! assert!(nfa.accepts("aab"));
//! assert!(!nfa.accepts("aba"));
//!
//! // Determinization by the subset construction. The new state names are the sorted
//! // concatenations of the member state names.
//! let dfa = nfa.determinize();
//! assert_eq!(dfa.encode(), "3;AB;{C};{a,b};AB,a,B;AB,b,C;B,a,B;B,b,C");
//! ```
//!
//! ## Operations
//! * [Automaton::determinize] runs the subset construction with ε-closures,
//! * [Automaton::minimize] determinizes, prunes useless states and merges equivalent ones,
//! * [Automaton::reachable] is a breadth-first sweep over the transitions, optionally
//!   restricted to a single symbol (pass `&` to obtain ε-closures),
//! * [Automaton::productive] finds the states that can still reach a final state,
//! * [Automaton::accepts] simulates the automaton over a word,
//! * [Automaton::encode] produces the canonical single-line encoding shown above.
//!
//! The encoding is canonical: final states and the alphabet are serialized in sorted order and
//! transitions are sorted by source state, then symbol, then destination, so
//! `encode ∘ parse ∘ encode = encode`.

pub use crate::parser::automaton as parse;
use crate::symbol::EPSILON_STR;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;
use unicode_segmentation::UnicodeSegmentation;

mod determinize;
mod minimize;
pub mod parse;

pub use parse::AutomatonParseError;

/// A finite automaton, denoted by its states, alphabet, initial state, final states and
/// transition relation. The relation maps a (state, symbol) pair to a set of destination
/// states; a deterministic automaton simply never maps a pair to more than one destination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Automaton {
    pub(crate) states: BTreeSet<Rc<str>>,
    pub(crate) initial: Rc<str>,
    pub(crate) finals: BTreeSet<Rc<str>>,
    pub(crate) alphabet: BTreeSet<Rc<str>>,
    // src -> sym -> set of dst, kept sorted so iteration is canonical
    pub(crate) transitions: BTreeMap<Rc<str>, BTreeMap<Rc<str>, BTreeSet<Rc<str>>>>,
}

impl Automaton {
    /// Constructs an automaton from an initial state, the final states, the alphabet and a
    /// sequence of `(source, symbol, destination)` triples. The set of states is derived from
    /// the triple endpoints plus the initial and final states. `&` is filtered out of the
    /// alphabet; transitions on `&` are kept and represent ε-moves.
    pub fn new<S, F, A, T>(initial: S, finals: F, alphabet: A, transitions: T) -> Self
    where
        S: Into<Rc<str>>,
        F: IntoIterator<Item = S>,
        A: IntoIterator<Item = S>,
        T: IntoIterator<Item = (S, S, S)>,
    {
        let initial: Rc<str> = initial.into();
        let finals: BTreeSet<Rc<str>> = finals.into_iter().map(Into::into).collect();
        let alphabet: BTreeSet<Rc<str>> = alphabet
            .into_iter()
            .map(Into::into)
            .filter(|symbol| symbol.as_ref() != EPSILON_STR)
            .collect();

        let mut states = BTreeSet::new();
        let mut relation: BTreeMap<Rc<str>, BTreeMap<Rc<str>, BTreeSet<Rc<str>>>> =
            BTreeMap::new();
        for (src, sym, dst) in transitions {
            let (src, sym, dst) = (src.into(), sym.into(), dst.into());
            states.insert(src.clone());
            states.insert(dst.clone());
            relation
                .entry(src)
                .or_default()
                .entry(sym)
                .or_default()
                .insert(dst);
        }
        states.insert(initial.clone());
        states.extend(finals.iter().cloned());

        Automaton {
            states,
            initial,
            finals,
            alphabet,
            transitions: relation,
        }
    }

    /// Gets the states of this automaton, in sorted order.
    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(|state| &**state)
    }

    /// Gets the initial state of this automaton.
    pub fn initial(&self) -> &str {
        &self.initial
    }

    /// Gets the final states of this automaton, in sorted order.
    pub fn finals(&self) -> impl Iterator<Item = &str> {
        self.finals.iter().map(|state| &**state)
    }

    /// Checks if the given state is a final state.
    pub fn is_final(&self, state: &str) -> bool {
        self.finals.contains(state)
    }

    /// Gets the alphabet of this automaton, in sorted order. `&` is never an element.
    pub fn alphabet(&self) -> impl Iterator<Item = &str> {
        self.alphabet.iter().map(|symbol| &**symbol)
    }

    /// Gets the set of states reached from `state` upon seeing `symbol`. The set is empty both
    /// for missing transitions and for unknown states; no implicit trap state exists.
    pub fn step(&self, state: &str, symbol: &str) -> BTreeSet<Rc<str>> {
        self.transitions
            .get(state)
            .and_then(|by_symbol| by_symbol.get(symbol))
            .cloned()
            .unwrap_or_default()
    }

    /// Iterates over every `(source, symbol, destination)` triple exactly once, sorted by
    /// source, then symbol, then destination.
    pub fn transitions(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.transitions.iter().flat_map(|(src, by_symbol)| {
            by_symbol.iter().flat_map(move |(sym, dsts)| {
                dsts.iter().map(move |dst| (&**src, &**sym, &**dst))
            })
        })
    }

    /// Performs a breadth-first sweep from `from` and returns every state reached, always
    /// including `from` itself. When `symbol` is given only transitions on that symbol are
    /// followed, so `reachable(q, Some("&"))` is the ε-closure of `q`. Without a symbol every
    /// symbol of the alphabet is followed and ε-moves are not.
    pub fn reachable(&self, from: &str, symbol: Option<&str>) -> BTreeSet<Rc<str>> {
        let Some(from) = self.states.get(from) else {
            return BTreeSet::new();
        };
        let symbols: Vec<&str> = match symbol {
            Some(symbol) => vec![symbol],
            None => self.alphabet.iter().map(|s| &**s).collect(),
        };

        let mut reached = BTreeSet::from([from.clone()]);
        let mut frontier = vec![from.clone()];
        while let Some(state) = frontier.pop() {
            for symbol in &symbols {
                for destination in self.step(&state, symbol) {
                    if reached.insert(destination.clone()) {
                        frontier.push(destination);
                    }
                }
            }
        }
        reached
    }

    /// Returns every state from which some final state is reachable by the default sweep over
    /// the alphabet. A final state is always productive since it reaches itself.
    pub fn productive(&self) -> BTreeSet<Rc<str>> {
        self.states
            .iter()
            .filter(|state| {
                self.reachable(state, None)
                    .iter()
                    .any(|reached| self.finals.contains(reached))
            })
            .cloned()
            .collect()
    }

    /// Computes the ε-closure of every state.
    pub fn epsilon_closures(&self) -> BTreeMap<Rc<str>, BTreeSet<Rc<str>>> {
        self.states
            .iter()
            .map(|state| (state.clone(), self.reachable(state, Some(EPSILON_STR))))
            .collect()
    }

    /// Checks if this automaton has any ε-moves.
    pub fn has_epsilon_moves(&self) -> bool {
        self.transitions
            .values()
            .any(|by_symbol| by_symbol.contains_key(EPSILON_STR))
    }

    /// Checks if this automaton accepts the given word. The word is split into unicode
    /// grapheme clusters, each of which must be a symbol of the alphabet for the word to be
    /// accepted. The simulation tracks the full set of current states and follows ε-closures,
    /// so it works for deterministic and nondeterministic automata alike.
    pub fn accepts(&self, word: &str) -> bool {
        let closures = self.epsilon_closures();
        let mut current: BTreeSet<Rc<str>> = closures
            .get(&self.initial)
            .cloned()
            .expect("the initial state always has a closure");

        for grapheme in word.graphemes(true) {
            let mut next = BTreeSet::new();
            for state in &current {
                for destination in self.step(state, grapheme) {
                    if let Some(closure) = closures.get(&destination) {
                        next.extend(closure.iter().cloned());
                    }
                }
            }
            current = next;
            if current.is_empty() {
                return false;
            }
        }
        current.iter().any(|state| self.finals.contains(state))
    }

    /// Produces the canonical single-line encoding of this automaton. Finals and alphabet are
    /// sorted lexicographically, transitions by source, then symbol, then destination. The
    /// leading field is the number of states.
    pub fn encode(&self) -> String {
        let finals = self.finals.iter().map(|s| &**s).collect::<Vec<_>>().join(",");
        let alphabet = self
            .alphabet
            .iter()
            .map(|s| &**s)
            .collect::<Vec<_>>()
            .join(",");
        let transitions = self
            .transitions()
            .map(|(src, sym, dst)| format!("{src},{sym},{dst}"))
            .collect::<Vec<_>>()
            .join(";");
        format!(
            "{};{};{{{finals}}};{{{alphabet}}};{transitions}",
            self.states.len(),
            self.initial,
        )
    }
}
