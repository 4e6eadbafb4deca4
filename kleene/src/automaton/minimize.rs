use crate::automaton::Automaton;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

impl Automaton {
    /// Minimizes this automaton. The input is determinized first, then useless states are
    /// pruned and the remaining states are merged into equivalence classes by partition
    /// refinement. Each class is named after its lexicographically smallest member, so the
    /// result is canonical and minimizing again is a no-op.
    pub fn minimize(&self) -> Automaton {
        let trimmed = self.determinize().trim_useless();

        let mut representative: BTreeMap<Rc<str>, Rc<str>> = BTreeMap::new();
        for class in trimmed.equivalence_classes() {
            let leader = class
                .iter()
                .next()
                .expect("equivalence classes are never empty")
                .clone();
            for member in class {
                representative.insert(member, leader.clone());
            }
        }
        let quotient = |state: &str| -> Rc<str> {
            representative
                .get(state)
                .cloned()
                .unwrap_or_else(|| Rc::from(state))
        };

        let transitions: Vec<(Rc<str>, Rc<str>, Rc<str>)> = trimmed
            .transitions()
            .map(|(src, sym, dst)| (quotient(src), Rc::from(sym), quotient(dst)))
            .collect();
        let finals: Vec<Rc<str>> = trimmed.finals.iter().map(|state| quotient(state)).collect();
        let alphabet: Vec<Rc<str>> = trimmed.alphabet.iter().cloned().collect();

        Automaton::new(quotient(&trimmed.initial), finals, alphabet, transitions)
    }

    /// Removes the useless states: those unreachable from the initial state and those from
    /// which no final state can be reached. Transitions touching a dropped state are dropped
    /// with it, as are dropped final states. The initial state is always kept, so an automaton
    /// for the empty language shrinks to its initial state with no transitions and no finals.
    fn trim_useless(&self) -> Automaton {
        let reachable = self.reachable(&self.initial, None);
        let productive = self.productive();
        let mut keep: BTreeSet<Rc<str>> = reachable.intersection(&productive).cloned().collect();
        keep.insert(self.initial.clone());

        let transitions: Vec<(Rc<str>, Rc<str>, Rc<str>)> = self
            .transitions()
            .filter(|(src, _, dst)| keep.contains(*src) && keep.contains(*dst))
            .map(|(src, sym, dst)| (Rc::from(src), Rc::from(sym), Rc::from(dst)))
            .collect();
        let finals: Vec<Rc<str>> = self
            .finals
            .iter()
            .filter(|state| keep.contains(&***state))
            .cloned()
            .collect();
        let alphabet: Vec<Rc<str>> = self.alphabet.iter().cloned().collect();

        Automaton::new(self.initial.clone(), finals, alphabet, transitions)
    }

    /// Refines the partition of states into equivalence classes. The partition starts from the
    /// final/non-final split (dropping an empty side) and each round groups the states by a
    /// signature consisting of the current class, the class each alphabet symbol leads to
    /// (`-1` when the transition is missing, kept missing on purpose) and finality. The
    /// refinement is stable once a round no longer increases the number of classes.
    fn equivalence_classes(&self) -> Vec<BTreeSet<Rc<str>>> {
        let (finals, others): (BTreeSet<Rc<str>>, BTreeSet<Rc<str>>) = self
            .states
            .iter()
            .cloned()
            .partition(|state| self.finals.contains(state));
        let mut classes: Vec<BTreeSet<Rc<str>>> = [finals, others]
            .into_iter()
            .filter(|class| !class.is_empty())
            .collect();

        loop {
            let mut class_of: BTreeMap<Rc<str>, i64> = BTreeMap::new();
            for (index, class) in classes.iter().enumerate() {
                for state in class {
                    class_of.insert(state.clone(), index as i64);
                }
            }

            let mut groups: BTreeMap<Vec<i64>, BTreeSet<Rc<str>>> = BTreeMap::new();
            for state in &self.states {
                let mut signature = vec![class_of[state]];
                for symbol in &self.alphabet {
                    let class = self
                        .step(state, symbol)
                        .iter()
                        .next()
                        .map(|destination| class_of[destination])
                        .unwrap_or(-1);
                    signature.push(class);
                }
                signature.push(i64::from(self.finals.contains(state)));
                groups.entry(signature).or_default().insert(state.clone());
            }

            let refined: Vec<BTreeSet<Rc<str>>> = groups.into_values().collect();
            if refined.len() == classes.len() {
                return refined;
            }
            classes = refined;
        }
    }
}
