use crate::automaton::Automaton;
use std::collections::{BTreeSet, VecDeque};
use std::rc::Rc;

impl Automaton {
    /// Converts this automaton to a deterministic one using the subset construction. ε-moves
    /// are resolved through ε-closures, so the input may be a full ε-NFA. Each state of the
    /// result corresponds to a set of states of the input and is named by concatenating the
    /// member names in sorted order, which makes the naming canonical: determinizing twice
    /// yields the very same automaton. Subsets without any outgoing transition on a symbol
    /// get no transition on that symbol; no trap state is introduced.
    pub fn determinize(&self) -> Automaton {
        let closures = self.epsilon_closures();
        let initial_set = closures
            .get(&self.initial)
            .cloned()
            .expect("the initial state always has a closure");
        let initial = subset_label(&initial_set);

        let mut seen: BTreeSet<BTreeSet<Rc<str>>> = BTreeSet::from([initial_set.clone()]);
        let mut frontier = VecDeque::from([initial_set]);
        let mut finals: BTreeSet<Rc<str>> = BTreeSet::new();
        let mut transitions: Vec<(Rc<str>, Rc<str>, Rc<str>)> = Vec::new();

        while let Some(subset) = frontier.pop_front() {
            let source = subset_label(&subset);
            if subset.iter().any(|state| self.finals.contains(state)) {
                finals.insert(source.clone());
            }

            for symbol in &self.alphabet {
                let mut target: BTreeSet<Rc<str>> = BTreeSet::new();
                for state in &subset {
                    for destination in self.step(state, symbol) {
                        let closure = closures
                            .get(&destination)
                            .expect("every transition endpoint is a state");
                        target.extend(closure.iter().cloned());
                    }
                }
                if target.is_empty() {
                    continue;
                }

                transitions.push((source.clone(), symbol.clone(), subset_label(&target)));
                if seen.insert(target.clone()) {
                    frontier.push_back(target);
                }
            }
        }

        Automaton::new(initial, finals, self.alphabet.iter().cloned().collect::<Vec<_>>(), transitions)
    }
}

/// The canonical name of a subset of states: the member names concatenated in sorted order.
/// Set equality then coincides with name equality.
fn subset_label(subset: &BTreeSet<Rc<str>>) -> Rc<str> {
    subset.iter().map(|state| &**state).collect::<String>().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    fn automaton(input: &str) -> Automaton {
        parser::automaton(input).unwrap().try_into().unwrap()
    }

    #[test]
    fn subset_construction_resolves_epsilon_moves() {
        let nfa = automaton("3;A;{C};{a,b};A,&,B;B,a,B;B,b,C");
        let dfa = nfa.determinize();

        assert_eq!(dfa.initial(), "AB");
        assert_eq!(dfa.finals().collect::<Vec<_>>(), vec!["C"]);
        assert_eq!(dfa.encode(), "3;AB;{C};{a,b};AB,a,B;AB,b,C;B,a,B;B,b,C");
    }

    #[test]
    fn nondeterministic_branches_are_merged() {
        // Two a-successors from A must collapse into the single subset state BC
        let nfa = automaton("3;A;{B,C};{a};A,a,B;A,a,C");
        let dfa = nfa.determinize();
        assert_eq!(dfa.encode(), "2;A;{BC};{a};A,a,BC");
    }

    #[test]
    fn determinization_preserves_the_language() {
        let nfa = automaton("4;A;{D};{a,b};A,a,A;A,b,A;A,a,B;B,b,C;C,b,D");
        let dfa = nfa.determinize();
        for word in ["abb", "aabb", "babb", "abab", "bb", ""] {
            assert_eq!(nfa.accepts(word), dfa.accepts(word), "word {word:?}");
        }
    }

    #[test]
    fn determinization_is_canonical() {
        let nfa = automaton("3;A;{C};{a,b};A,&,B;B,a,B;B,b,C;A,a,C");
        let once = nfa.determinize();
        let twice = once.determinize();
        assert_eq!(once.encode(), twice.encode());
    }

    #[test]
    fn subsets_keep_missing_transitions_missing() {
        let nfa = automaton("2;A;{B};{a,b};A,a,B");
        let dfa = nfa.determinize();
        // No b-transition anywhere, and no trap state was invented
        assert!(dfa.step("A", "b").is_empty());
        assert_eq!(dfa.states().count(), 2);
    }
}
