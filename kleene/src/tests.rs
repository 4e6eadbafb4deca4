use crate::automaton::Automaton;
use crate::grammar::Grammar;
use crate::parser;
use ::regex::Regex as LibRegex;
use proptest::prelude::*;

fn automaton_value(input: &str) -> Automaton {
    parser::automaton(input).unwrap().try_into().unwrap()
}

fn grammar_value(input: &str) -> Grammar {
    parser::grammar(input).unwrap().try_into().unwrap()
}

#[test]
fn determinization_of_the_epsilon_nfa_sample() {
    let nfa = automaton_value("3;A;{C};{a,b};A,&,B;B,a,B;B,b,C");
    let dfa = nfa.determinize();
    assert_eq!(dfa.encode(), "3;AB;{C};{a,b};AB,a,B;AB,b,C;B,a,B;B,b,C");
}

#[test]
fn minimization_merges_equivalent_finals() {
    let dfa = automaton_value("3;A;{B,C};{a,b};A,a,B;A,b,C");
    assert_eq!(dfa.minimize().encode(), "2;A;{B};{a,b};A,a,B;A,b,B");
}

#[test]
fn the_full_first_follow_exercise() {
    let grammar = grammar_value("P=KVC;K=cK;K=&;V=vV;V=F;F=fPiF;F=&;C=bVCe;C=miC;C=&");
    assert_eq!(
        grammar.first_follow_summary(),
        "First(P) = {b,c,f,m,v,&}; First(K) = {c,&}; First(V) = {f,v,&}; \
         First(F) = {f,&}; First(C) = {b,m,&}; \
         Follow(P) = {i,$}; Follow(K) = {b,f,i,m,v,$}; Follow(V) = {b,e,i,m,$}; \
         Follow(F) = {b,e,i,m,$}; Follow(C) = {e,i,$}"
    );
}

#[test]
fn another_first_follow_exercise() {
    let grammar = grammar_value("P=KL;P=bKLe;K=cK;K=TV;T=tT;T=&;V=vV;V=&;L=mL;L=&");
    assert_eq!(
        grammar.first_follow_summary(),
        "First(P) = {b,c,m,t,v,&}; First(K) = {c,t,v,&}; First(T) = {t,&}; \
         First(V) = {v,&}; First(L) = {m,&}; \
         Follow(P) = {$}; Follow(K) = {e,m,$}; Follow(T) = {e,m,v,$}; \
         Follow(V) = {e,m,$}; Follow(L) = {e,$}"
    );
}

#[test]
fn regex_compilation_composes_with_minimization() {
    let dfa = parser::regex("(a|b)*abb").to_dfa();
    let minimized = dfa.minimize();
    assert_eq!(minimized.states().count(), 4);
    for word in ["abb", "aabb", "babb", "ab", "", "abba"] {
        assert_eq!(dfa.accepts(word), minimized.accepts(word), "word {word:?}");
    }
}

prop_compose! {
    fn automata(max_states: usize, alphabet: &'static str)
        (num_states in 1..max_states)
        (
            transitions in prop::collection::vec(
                // A symbol index one past the alphabet is an ε-move
                (0..num_states, 0..=alphabet.len(), 0..num_states),
                0..=num_states * 4,
            ),
            finals in prop::collection::vec(any::<bool>(), num_states..=num_states),
        )
        -> Automaton {
        let symbols: Vec<String> = alphabet.chars().map(|c| c.to_string()).collect();
        let name = |index: usize| format!("s{index}");
        let triples: Vec<(String, String, String)> = transitions
            .into_iter()
            .map(|(src, sym, dst)| {
                let symbol = symbols
                    .get(sym)
                    .cloned()
                    .unwrap_or_else(|| "&".to_string());
                (name(src), symbol, name(dst))
            })
            .collect();
        let finals: Vec<String> = finals
            .into_iter()
            .enumerate()
            .filter_map(|(index, accepting)| accepting.then(|| name(index)))
            .collect();
        Automaton::new(name(0), finals, symbols, triples)
    }
}

fn patterns() -> impl Strategy<Value = String> {
    "[a-c]".prop_recursive(6, 48, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{a}{b}")),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({a}|{b})")),
            inner.prop_map(|a| format!("({a})*")),
        ]
    })
}

proptest! {
    /// Determinization never changes the language, only the shape
    #[test]
    fn determinization_preserves_the_language(
        nfa in automata(6, "abc"),
        words in prop::collection::vec("[a-c]{0,7}", 25),
    ) {
        let dfa = nfa.determinize();
        for word in &words {
            prop_assert_eq!(nfa.accepts(word), dfa.accepts(word), "word {:?}", word);
        }
    }

    /// Minimization never changes the language either
    #[test]
    fn minimization_preserves_the_language(
        nfa in automata(6, "abc"),
        words in prop::collection::vec("[a-c]{0,7}", 25),
    ) {
        let minimized = nfa.minimize();
        for word in &words {
            prop_assert_eq!(nfa.accepts(word), minimized.accepts(word), "word {:?}", word);
        }
    }

    /// A minimal automaton has nothing left to merge, so minimizing again reproduces the
    /// exact same encoding
    #[test]
    fn minimization_is_idempotent(nfa in automata(6, "ab")) {
        let once = nfa.minimize();
        let twice = once.minimize();
        prop_assert_eq!(once.encode(), twice.encode());
    }

    /// The sorted-concatenation naming makes the subset construction canonical:
    /// determinizing a determinized automaton is the identity on encodings
    #[test]
    fn determinization_is_canonical(nfa in automata(6, "ab")) {
        let once = nfa.determinize();
        let twice = once.determinize();
        prop_assert_eq!(once.encode(), twice.encode());
    }

    /// serialize ∘ parse ∘ serialize = serialize, and parsing loses nothing
    #[test]
    fn encoding_round_trips(value in automata(6, "abc")) {
        let line = value.encode();
        let reparsed: Automaton = parser::automaton(&line).unwrap().try_into().unwrap();
        prop_assert_eq!(&reparsed, &value);
        prop_assert_eq!(reparsed.encode(), line);
    }

    /// The annotation compiler agrees with a regex library on every word
    #[test]
    fn compiled_regexes_agree_with_the_library(
        pattern in patterns(),
        words in prop::collection::vec("[a-c]{0,6}", 16),
    ) {
        let dfa = parser::regex(&pattern).to_dfa();
        let oracle = LibRegex::new(&format!("^(?:{pattern})$")).unwrap();
        for word in &words {
            prop_assert_eq!(
                dfa.accepts(word),
                oracle.is_match(word),
                "pattern {:?} word {:?}",
                pattern,
                word
            );
        }
    }
}
