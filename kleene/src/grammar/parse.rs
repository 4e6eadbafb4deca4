use crate::grammar::{Grammar, Production};
use crate::parser::{ParsedGrammar, ParsedRule};
use crate::symbol::{is_terminal, EPSILON};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GrammarParseError {
    #[error("the grammar has no rules")]
    Empty,
    #[error("rule head '{0}' is not a nonterminal symbol")]
    HeadNotNonterminal(char),
}

impl TryFrom<ParsedGrammar> for Grammar {
    type Error = GrammarParseError;

    fn try_from(value: ParsedGrammar) -> Result<Self, Self::Error> {
        use GrammarParseError::*;
        let ParsedGrammar { rules } = value;

        let mut productions: Vec<Production> = Vec::new();
        for ParsedRule { head, body } in rules {
            if is_terminal(head) {
                return Err(HeadNotNonterminal(head));
            }
            // An empty body segment reads as the ε-body
            let body = if body.is_empty() { vec![EPSILON] } else { body };

            let index = match productions.iter().position(|p| p.head == head) {
                Some(index) => index,
                None => {
                    productions.push(Production {
                        head,
                        bodies: Vec::new(),
                    });
                    productions.len() - 1
                }
            };
            let production = &mut productions[index];
            if !production.bodies.contains(&body) {
                production.bodies.push(body);
            }
        }

        let initial = productions.first().map(|p| p.head).ok_or(Empty)?;
        Ok(Grammar {
            initial,
            productions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    #[test]
    fn duplicate_bodies_are_dropped() {
        let grammar: Grammar = parser::grammar("S=a;S=b;S=a").unwrap().try_into().unwrap();
        assert_eq!(grammar.bodies('S'), &[vec!['a'], vec!['b']]);
    }

    #[test]
    fn rules_of_one_head_are_gathered() {
        let grammar: Grammar = parser::grammar("S=aS;B=b;S=&").unwrap().try_into().unwrap();
        assert_eq!(grammar.bodies('S'), &[vec!['a', 'S'], vec!['&']]);
        assert_eq!(grammar.bodies('B'), &[vec!['b']]);
        // Heads keep first-appearance order even when their rules are interleaved
        assert_eq!(grammar.nonterminals(), vec!['S', 'B']);
    }

    #[test]
    fn empty_bodies_become_epsilon() {
        let grammar: Grammar = parser::grammar("S=").unwrap().try_into().unwrap();
        assert_eq!(grammar.bodies('S'), &[vec!['&']]);
    }

    #[test]
    fn empty_input_is_rejected() {
        let parsed = parser::grammar("").unwrap();
        let result: Result<Grammar, _> = parsed.try_into();
        assert_eq!(result.unwrap_err(), GrammarParseError::Empty);
    }

    #[test]
    fn terminal_heads_are_rejected() {
        let parsed = parser::grammar("s=a").unwrap();
        let result: Result<Grammar, _> = parsed.try_into();
        assert_eq!(result.unwrap_err(), GrammarParseError::HeadNotNonterminal('s'));
    }
}
