use crate::grammar::Grammar;
use crate::symbol::{format_symbol_set, is_terminal, END_OF_INPUT, EPSILON};
use std::collections::BTreeSet;

/// Two bodies of one head whose FIRST sets overlap, making a predictive choice between them
/// impossible without factoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeftAmbiguity {
    pub head: char,
    pub bodies: (Vec<char>, Vec<char>),
    pub symbols: BTreeSet<char>,
}

impl Grammar {
    /// Computes FIRST of a single symbol. See [Grammar::first_of].
    pub fn first(&self, symbol: char) -> BTreeSet<char> {
        self.first_of(&[symbol])
    }

    /// Computes FIRST of a symbol string: every terminal that can start a derivation of the
    /// string, plus `&` when the whole string can derive ε. The string is folded from the
    /// left, stopping at the first non-nullable symbol. FIRST of the empty string is `{&}`.
    pub fn first_of(&self, sequence: &[char]) -> BTreeSet<char> {
        self.first_of_guarded(sequence, &mut Vec::new())
    }

    // The stack holds the leading symbols of the rule bodies currently being expanded;
    // skipping bodies whose lead is already on it keeps cyclic grammars terminating.
    fn first_of_guarded(&self, sequence: &[char], stack: &mut Vec<char>) -> BTreeSet<char> {
        let mut first = BTreeSet::new();
        for &symbol in sequence {
            let symbol_first = if is_terminal(symbol) {
                BTreeSet::from([symbol])
            } else {
                let mut expanded = BTreeSet::new();
                for body in self.bodies(symbol) {
                    let Some(&lead) = body.first() else { continue };
                    if stack.contains(&lead) {
                        continue;
                    }
                    stack.push(lead);
                    expanded.extend(self.first_of_guarded(body, stack));
                    stack.pop();
                }
                expanded
            };

            let nullable = symbol_first.contains(&EPSILON);
            first.extend(symbol_first.into_iter().filter(|&s| s != EPSILON));
            if !nullable {
                return first;
            }
        }
        first.insert(EPSILON);
        first
    }

    /// Computes FOLLOW of a nonterminal: every terminal that can appear immediately after it
    /// in a derivation from the start symbol, with `$` standing for the end of the input.
    /// The result never contains `&`.
    pub fn follow(&self, nonterminal: char) -> BTreeSet<char> {
        self.follow_guarded(nonterminal, &mut Vec::new())
    }

    fn follow_guarded(&self, nonterminal: char, stack: &mut Vec<char>) -> BTreeSet<char> {
        let mut follow = BTreeSet::new();
        if nonterminal == self.initial {
            follow.insert(END_OF_INPUT);
        }

        for (head, body) in self.rules() {
            for (index, &symbol) in body.iter().enumerate() {
                if symbol != nonterminal {
                    continue;
                }
                let rest = &body[index + 1..];
                let rest_first = self.first_of(rest);
                if !rest.is_empty() {
                    follow.extend(rest_first.iter().copied().filter(|&s| s != EPSILON));
                }
                // At the end of the body, or before a nullable tail, the follower of the
                // head is also a follower of this occurrence
                if (rest.is_empty() || rest_first.contains(&EPSILON)) && !stack.contains(&head) {
                    stack.push(head);
                    let head_follow = self.follow_guarded(head, stack);
                    stack.pop();
                    follow.extend(head_follow);
                }
            }
        }

        follow.remove(&EPSILON);
        follow
    }

    /// Searches for a left-recursive cycle: a nonterminal that can derive a string starting
    /// with itself. The search walks leftmost symbols depth-first from every nonterminal,
    /// stepping over nullable leading symbols, and reports the first cycle found as the path
    /// `A, …, A` beginning and ending with the recurring nonterminal.
    pub fn left_recursion(&self) -> Option<Vec<char>> {
        for production in &self.productions {
            let mut path = vec![production.head];
            if let Some(cycle) = self.left_recursion_from(production.head, &mut path) {
                return Some(cycle);
            }
        }
        None
    }

    fn left_recursion_from(&self, head: char, path: &mut Vec<char>) -> Option<Vec<char>> {
        for body in self.bodies(head) {
            for &symbol in body {
                if is_terminal(symbol) {
                    break;
                }
                if path.contains(&symbol) {
                    let start = path
                        .iter()
                        .position(|&on_path| on_path == symbol)
                        .expect("the symbol recurs on the path");
                    let mut cycle = path[start..].to_vec();
                    cycle.push(symbol);
                    return Some(cycle);
                }
                path.push(symbol);
                let found = self.left_recursion_from(symbol, path);
                path.pop();
                if found.is_some() {
                    return found;
                }
                // Only a nullable symbol lets the next one become leftmost
                if !self.first(symbol).contains(&EPSILON) {
                    break;
                }
            }
        }
        None
    }

    /// Searches for a pair of bodies of the same head whose FIRST sets share a symbol other
    /// than `&`, or which are both nullable. Either way a single token of lookahead cannot
    /// choose between the two.
    pub fn left_ambiguity(&self) -> Option<LeftAmbiguity> {
        for production in &self.productions {
            for (index, first_body) in production.bodies.iter().enumerate() {
                for second_body in &production.bodies[index + 1..] {
                    let first_a = self.first_of(first_body);
                    let first_b = self.first_of(second_body);
                    let shared: BTreeSet<char> = first_a
                        .intersection(&first_b)
                        .copied()
                        .filter(|&s| s != EPSILON)
                        .collect();
                    if !shared.is_empty() {
                        return Some(LeftAmbiguity {
                            head: production.head,
                            bodies: (first_body.clone(), second_body.clone()),
                            symbols: shared,
                        });
                    }
                    if first_a.contains(&EPSILON) && first_b.contains(&EPSILON) {
                        return Some(LeftAmbiguity {
                            head: production.head,
                            bodies: (first_body.clone(), second_body.clone()),
                            symbols: BTreeSet::from([EPSILON]),
                        });
                    }
                }
            }
        }
        None
    }

    /// Formats the FIRST and FOLLOW sets of every nonterminal, FIRST entries before FOLLOW
    /// entries, nonterminals in order of first appearance:
    /// `First(X) = {a,b}; …; Follow(X) = {a,b}; …`.
    pub fn first_follow_summary(&self) -> String {
        let nonterminals = self.nonterminals();
        let firsts = nonterminals
            .iter()
            .map(|&nt| format!("First({nt}) = {}", format_symbol_set(self.first(nt))));
        let follows = nonterminals
            .iter()
            .map(|&nt| format!("Follow({nt}) = {}", format_symbol_set(self.follow(nt))));
        firsts.chain(follows).collect::<Vec<_>>().join("; ")
    }
}
