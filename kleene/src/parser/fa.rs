use crate::parser::ParsedAutomaton;
use nom::bytes::complete::take_till1;
use nom::character::complete::{char, digit1};
use nom::combinator::{map, map_res, opt};
use nom::multi::separated_list0;
use nom::sequence::{delimited, preceded, terminated, tuple};
use nom::IResult;

pub(crate) fn full_automaton(input: &str) -> IResult<&str, ParsedAutomaton> {
    map(
        tuple((
            terminated(state_count, semicolon),
            terminated(label, semicolon),
            terminated(symbol_set, semicolon),
            symbol_set,
            opt(preceded(semicolon, separated_list0(semicolon, transition))),
            opt(semicolon),
        )),
        |(state_count, initial, finals, alphabet, transitions, _)| ParsedAutomaton {
            state_count,
            initial: initial.to_string(),
            finals,
            alphabet,
            transitions: transitions.unwrap_or_default(),
        },
    )(input)
}

fn state_count(input: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse)(input)
}

// A label is a state name or an alphabet symbol. The delimiters of the encoding are the only
// characters a label may not contain.
fn label(input: &str) -> IResult<&str, &str> {
    take_till1(|c| ";,{}".contains(c))(input)
}

fn symbol_set(input: &str) -> IResult<&str, Vec<String>> {
    delimited(
        char('{'),
        map(separated_list0(char(','), label), |labels| {
            labels.into_iter().map(str::to_string).collect()
        }),
        char('}'),
    )(input)
}

fn transition(input: &str) -> IResult<&str, (String, String, String)> {
    map(
        tuple((label, char(','), label, char(','), label)),
        |(src, _, sym, _, dst)| (src.to_string(), sym.to_string(), dst.to_string()),
    )(input)
}

fn semicolon(input: &str) -> IResult<&str, char> {
    char(';')(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_encoding() {
        let (rest, parsed) = full_automaton("3;A;{C};{a,b};A,&,B;B,a,B;B,b,C").unwrap();
        assert_eq!(rest, "");
        assert_eq!(parsed.state_count, 3);
        assert_eq!(parsed.initial, "A");
        assert_eq!(parsed.finals, vec!["C"]);
        assert_eq!(parsed.alphabet, vec!["a", "b"]);
        assert_eq!(parsed.transitions.len(), 3);
        assert_eq!(
            parsed.transitions[0],
            ("A".to_string(), "&".to_string(), "B".to_string())
        );
    }

    #[test]
    fn empty_sets_and_missing_transitions() {
        let (rest, parsed) = full_automaton("1;q0;{q0};{};").unwrap();
        assert_eq!(rest, "");
        assert_eq!(parsed.finals, vec!["q0"]);
        assert!(parsed.alphabet.is_empty());
        assert!(parsed.transitions.is_empty());

        let (rest, parsed) = full_automaton("1;q0;{};{a}").unwrap();
        assert_eq!(rest, "");
        assert!(parsed.finals.is_empty());
        assert!(parsed.transitions.is_empty());
    }

    #[test]
    fn multi_character_state_names() {
        let (_, parsed) = full_automaton("2;AB;{C};{a};AB,a,C").unwrap();
        assert_eq!(parsed.initial, "AB");
        assert_eq!(
            parsed.transitions[0],
            ("AB".to_string(), "a".to_string(), "C".to_string())
        );
    }

    #[test]
    fn malformed_transitions_do_not_parse_to_the_end() {
        // A two-field transition leaves input behind, which all_consuming rejects upstream
        let (rest, _) = full_automaton("2;A;{B};{a};A,a").unwrap();
        assert!(!rest.is_empty());
    }
}
