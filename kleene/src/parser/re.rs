use crate::regex::{Regex, RegexTree};
use nom::branch::alt;
use nom::character::complete::{char, none_of};
use nom::combinator::{map, opt};
use nom::multi::{many0, many0_count, separated_list1};
use nom::sequence::{delimited, pair};
use nom::IResult;

// The grammar of the regex dialect:
//
//   alternative → sequence ( '|' sequence )*
//   sequence    → term*
//   term        → factor '*'*
//   factor      → CHAR | '&' | '(' alternative ')'
//
// Every input denotes some expression: an empty sequence is ε, an unterminated group is
// closed at end of input, and whatever follows a stray ')' is left unconsumed and dropped.
pub(crate) fn full_regex(input: &str) -> Regex {
    match alternative(input) {
        Ok((_, tree)) => Regex { tree },
        // many0-based rules cannot fail, so this arm is never taken
        Err(_) => Regex {
            tree: RegexTree::epsilon(),
        },
    }
}

fn alternative(input: &str) -> IResult<&str, RegexTree> {
    map(separated_list1(char('|'), sequence), |branches| {
        branches
            .into_iter()
            .reduce(RegexTree::or)
            .expect("separated_list1 yields at least one branch")
    })(input)
}

fn sequence(input: &str) -> IResult<&str, RegexTree> {
    map(many0(term), |terms| {
        terms
            .into_iter()
            .reduce(RegexTree::cat)
            .unwrap_or_else(RegexTree::epsilon)
    })(input)
}

fn term(input: &str) -> IResult<&str, RegexTree> {
    map(pair(factor, many0_count(char('*'))), |(factor, stars)| {
        (0..stars).fold(factor, |tree, _| RegexTree::star(tree))
    })(input)
}

fn factor(input: &str) -> IResult<&str, RegexTree> {
    alt((
        delimited(char('('), alternative, opt(char(')'))),
        map(char('&'), |_| RegexTree::epsilon()),
        map(none_of("()|*&"), |c| RegexTree::Leaf(Some(c))),
    ))(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regex::RegexTree::{self, *};

    fn parse(input: &str) -> RegexTree {
        full_regex(input).tree
    }

    #[test]
    fn single_characters_and_epsilon() {
        assert_eq!(parse("a"), Leaf(Some('a')));
        assert_eq!(parse("&"), Leaf(None));
        assert_eq!(parse(""), Leaf(None));
    }

    #[test]
    fn concatenation_folds_to_the_left() {
        assert_eq!(
            parse("abc"),
            RegexTree::cat(
                RegexTree::cat(Leaf(Some('a')), Leaf(Some('b'))),
                Leaf(Some('c'))
            )
        );
    }

    #[test]
    fn alternation_binds_weaker_than_concatenation() {
        assert_eq!(
            parse("ab|c"),
            RegexTree::or(
                RegexTree::cat(Leaf(Some('a')), Leaf(Some('b'))),
                Leaf(Some('c'))
            )
        );
    }

    #[test]
    fn star_binds_tightest_and_stacks() {
        assert_eq!(parse("a*"), RegexTree::star(Leaf(Some('a'))));
        assert_eq!(
            parse("a**"),
            RegexTree::star(RegexTree::star(Leaf(Some('a'))))
        );
        assert_eq!(
            parse("ab*"),
            RegexTree::cat(Leaf(Some('a')), RegexTree::star(Leaf(Some('b'))))
        );
    }

    #[test]
    fn groups_override_precedence() {
        assert_eq!(
            parse("(ab)*"),
            RegexTree::star(RegexTree::cat(Leaf(Some('a')), Leaf(Some('b'))))
        );
        assert_eq!(
            parse("(a|b)c"),
            RegexTree::cat(
                RegexTree::or(Leaf(Some('a')), Leaf(Some('b'))),
                Leaf(Some('c'))
            )
        );
    }

    #[test]
    fn empty_alternation_branches_are_epsilon() {
        assert_eq!(parse("a|"), RegexTree::or(Leaf(Some('a')), Leaf(None)));
        assert_eq!(parse("|a"), RegexTree::or(Leaf(None), Leaf(Some('a'))));
    }

    #[test]
    fn parsing_is_tolerant_of_unbalanced_parentheses() {
        // Unclosed group: closed at end of input
        assert_eq!(
            parse("(ab"),
            RegexTree::cat(Leaf(Some('a')), Leaf(Some('b')))
        );
        // Stray closing parenthesis: the rest of the input is dropped
        assert_eq!(parse(")ab"), Leaf(None));
    }
}
