use crate::automaton::Automaton;
use crate::parser::ParsedAutomaton;
use crate::symbol::EPSILON_STR;
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AutomatonParseError {
    #[error("transition from '{0}' uses the symbol '{1}' which is not in the alphabet")]
    SymbolNotInAlphabet(String, String),
}

impl TryFrom<ParsedAutomaton> for Automaton {
    type Error = AutomatonParseError;

    fn try_from(value: ParsedAutomaton) -> Result<Self, Self::Error> {
        let ParsedAutomaton {
            state_count: _,
            initial,
            finals,
            alphabet,
            transitions,
        } = value;

        {
            let alphabet: BTreeSet<&str> = alphabet.iter().map(|s| s.as_str()).collect();
            for (src, sym, _) in &transitions {
                if sym != EPSILON_STR && !alphabet.contains(sym.as_str()) {
                    return Err(AutomatonParseError::SymbolNotInAlphabet(
                        src.clone(),
                        sym.clone(),
                    ));
                }
            }
        }

        Ok(Automaton::new(initial, finals, alphabet, transitions))
    }
}
