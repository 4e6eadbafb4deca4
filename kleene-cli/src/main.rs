use clap::{Parser, Subcommand};
use kleene::automaton::{Automaton, AutomatonParseError};
use kleene::grammar::{Grammar, GrammarParseError};
use kleene::parser;
use std::io::{self, BufRead};
use thiserror::Error;

/// Finite automata, regular expressions and grammar analysis over single-line encodings.
/// Every subcommand reads one encoded line from standard input and writes one line to
/// standard output; an empty input produces no output at all.
#[derive(Parser)]
#[command(name = "kleene", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse an NFA (possibly with ε-moves) and print its subset-construction DFA
    Determinize,
    /// Parse an automaton and print the equivalent minimal DFA
    Minimize,
    /// Parse a regular expression and print the DFA it compiles to
    RegexToDfa,
    /// Parse a grammar and print the FIRST and FOLLOW sets of its nonterminals
    FirstFollow,
    /// Parse a grammar and print its LL(1) parsing table, or the reason there is none
    Ll1Table,
}

#[derive(Debug, Error)]
enum InputError {
    #[error("could not parse automaton encoding: {0}")]
    AutomatonSyntax(nom::error::Error<String>),
    #[error("invalid automaton: {0}")]
    Automaton(#[from] AutomatonParseError),
    #[error("could not parse grammar encoding: {0}")]
    GrammarSyntax(nom::error::Error<String>),
    #[error("invalid grammar: {0}")]
    Grammar(#[from] GrammarParseError),
}

fn main() {
    let cli = Cli::parse();
    let Some(line) = read_line() else {
        // No input line means no output line
        return;
    };
    match run(&cli.command, &line) {
        // Diagnostics replace the normal output
        Ok(output) | Err(output) => println!("{output}"),
    }
}

fn read_line() -> Option<String> {
    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line).ok()?;
    if read == 0 {
        return None;
    }
    let line = line.trim().to_string();
    (!line.is_empty()).then_some(line)
}

fn run(command: &Command, line: &str) -> Result<String, String> {
    match command {
        Command::Determinize => Ok(parse_automaton(line)?.determinize().encode()),
        Command::Minimize => Ok(parse_automaton(line)?.minimize().encode()),
        Command::RegexToDfa => Ok(parser::regex(line).to_dfa().encode()),
        Command::FirstFollow => Ok(parse_grammar(line)?.first_follow_summary()),
        Command::Ll1Table => {
            let grammar = parse_grammar(line)?;
            match grammar.ll1_table() {
                Ok(table) => Ok(table.encode()),
                Err(error) => Err(error.to_string()),
            }
        }
    }
}

fn parse_automaton(line: &str) -> Result<Automaton, String> {
    let parsed = parser::automaton(line).map_err(|e| InputError::AutomatonSyntax(e).to_string())?;
    Automaton::try_from(parsed).map_err(|e| InputError::from(e).to_string())
}

fn parse_grammar(line: &str) -> Result<Grammar, String> {
    let parsed = parser::grammar(line).map_err(|e| InputError::GrammarSyntax(e).to_string())?;
    Grammar::try_from(parsed).map_err(|e| InputError::from(e).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn determinize_command() {
        let output = run(&Command::Determinize, "3;A;{C};{a,b};A,&,B;B,a,B;B,b,C").unwrap();
        assert_eq!(output, "3;AB;{C};{a,b};AB,a,B;AB,b,C;B,a,B;B,b,C");
    }

    #[test]
    fn minimize_command() {
        let output = run(&Command::Minimize, "3;A;{B,C};{a,b};A,a,B;A,b,C").unwrap();
        assert_eq!(output, "2;A;{B};{a,b};A,a,B;A,b,B");
    }

    #[test]
    fn regex_command() {
        let output = run(&Command::RegexToDfa, "&").unwrap();
        assert_eq!(output, "1;q0;{q0};{};");
    }

    #[test]
    fn first_follow_command() {
        let output = run(&Command::FirstFollow, "S=AB;A=aA;A=&;B=b").unwrap();
        assert_eq!(
            output,
            "First(S) = {a,b}; First(A) = {a,&}; First(B) = {b}; \
             Follow(S) = {$}; Follow(A) = {b}; Follow(B) = {$}"
        );
    }

    #[test]
    fn ll1_command_prints_tables() {
        let output = run(&Command::Ll1Table, "S=aAb;A=c;A=&").unwrap();
        assert_eq!(output, "{A,S};S;{a,b,c};[S,a,1][A,b,3][A,c,2]");
    }

    #[test]
    fn ll1_command_prints_diagnostics() {
        let output = run(&Command::Ll1Table, "E=E+T;E=T;T=i").unwrap_err();
        assert_eq!(output, "left-recursive grammar: E => E");
    }

    #[test]
    fn malformed_automata_produce_a_diagnostic() {
        let output = run(&Command::Determinize, "not an automaton");
        assert!(output.unwrap_err().starts_with("could not parse automaton encoding"));
    }
}
