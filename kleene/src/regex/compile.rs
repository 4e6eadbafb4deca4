use crate::automaton::Automaton;
use crate::regex::annotate::{annotate, Position};
use crate::regex::{Regex, RegexTree};
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::rc::Rc;

/// Appended to the expression before annotation; its position marks acceptance.
const END_MARKER: char = '#';

impl Regex {
    /// Compiles this regular expression to a deterministic automaton. The expression is
    /// extended with the reserved end marker `#`, the tree is annotated, and the DFA states
    /// are discovered as sets of positions starting from the firstpos of the root: the
    /// successor of a state under a symbol is the union of the followpos of its positions
    /// carrying that symbol. A state is final when it holds the end-marker position.
    ///
    /// States are named `q0, q1, …` in discovery order, with `q0` the initial state. The
    /// discovery is a breadth-first sweep visiting symbols in sorted order, so the naming is
    /// deterministic. The alphabet of the result consists of the symbols actually appearing
    /// on transitions; compiling `&` therefore yields a single initial and final state over
    /// an empty alphabet.
    pub fn to_dfa(&self) -> Automaton {
        let wrapped = RegexTree::cat(self.tree.clone(), RegexTree::Leaf(Some(END_MARKER)));
        let annotation = annotate(&wrapped);
        let marker = annotation
            .symbols
            .keys()
            .next_back()
            .copied()
            .expect("the end marker always holds the last position");

        let mut names: HashMap<BTreeSet<Position>, Rc<str>> = HashMap::new();
        let mut sequence = 0usize..;
        let mut name_of = |state: &BTreeSet<Position>| -> Rc<str> {
            names
                .entry(state.clone())
                .or_insert_with(|| {
                    let number = sequence.next().expect("an unbounded range never ends");
                    Rc::from(format!("q{number}"))
                })
                .clone()
        };

        let initial_set = annotation.root.firstpos.clone();
        let initial = name_of(&initial_set);
        let mut seen: BTreeSet<BTreeSet<Position>> = BTreeSet::from([initial_set.clone()]);
        let mut frontier = VecDeque::from([initial_set]);
        let mut finals: BTreeSet<Rc<str>> = BTreeSet::new();
        let mut transitions: Vec<(Rc<str>, Rc<str>, Rc<str>)> = Vec::new();

        while let Some(state) = frontier.pop_front() {
            let source = name_of(&state);
            if state.contains(&marker) {
                finals.insert(source.clone());
            }

            let mut successors: BTreeMap<char, BTreeSet<Position>> = BTreeMap::new();
            for &position in &state {
                if let Some(follow) = annotation.followpos.get(&position) {
                    if !follow.is_empty() {
                        successors
                            .entry(annotation.symbols[&position])
                            .or_default()
                            .extend(follow.iter().copied());
                    }
                }
            }

            for (symbol, successor) in successors {
                let destination = name_of(&successor);
                transitions.push((source.clone(), Rc::from(symbol.to_string()), destination));
                if seen.insert(successor.clone()) {
                    frontier.push_back(successor);
                }
            }
        }

        let alphabet: Vec<Rc<str>> = transitions
            .iter()
            .map(|(_, symbol, _)| symbol.clone())
            .collect();
        Automaton::new(initial, finals, alphabet, transitions)
    }
}
