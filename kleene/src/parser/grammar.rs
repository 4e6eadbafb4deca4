use crate::parser::{ParsedGrammar, ParsedRule};
use nom::character::complete::{char, none_of};
use nom::combinator::{map, opt};
use nom::multi::{many0, separated_list0};
use nom::sequence::separated_pair;
use nom::IResult;

pub(crate) fn full_grammar(input: &str) -> IResult<&str, ParsedGrammar> {
    // Empty segments between semicolons (and trailing semicolons) are skipped
    map(separated_list0(char(';'), opt(rule)), |rules| {
        ParsedGrammar {
            rules: rules.into_iter().flatten().collect(),
        }
    })(input)
}

fn rule(input: &str) -> IResult<&str, ParsedRule> {
    map(
        separated_pair(symbol, char('='), many0(symbol)),
        |(head, body)| ParsedRule { head, body },
    )(input)
}

fn symbol(input: &str) -> IResult<&str, char> {
    none_of(";=")(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_split_on_semicolons() {
        let (rest, parsed) = full_grammar("S=AB;A=aA;A=&;B=b").unwrap();
        assert_eq!(rest, "");
        assert_eq!(parsed.rules.len(), 4);
        assert_eq!(parsed.rules[0].head, 'S');
        assert_eq!(parsed.rules[0].body, vec!['A', 'B']);
        assert_eq!(parsed.rules[2].body, vec!['&']);
    }

    #[test]
    fn empty_segments_are_ignored() {
        let (rest, parsed) = full_grammar("S=a;;B=b;").unwrap();
        assert_eq!(rest, "");
        assert_eq!(parsed.rules.len(), 2);
        assert_eq!(parsed.rules[1].head, 'B');
    }

    #[test]
    fn bodies_may_be_empty() {
        let (_, parsed) = full_grammar("S=").unwrap();
        assert_eq!(parsed.rules.len(), 1);
        assert!(parsed.rules[0].body.is_empty());
    }
}
