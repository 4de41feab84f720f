//! Parser for `.metta` fact files.
//!
//! A dataset file is a sequence of s-expressions, one per fact:
//!
//! ```text
//! ; 14-3-3 epsilon
//! (transcribed_to (gene ENSG00000166913) (transcript ENST00000372839))
//! (translates_to (transcript ENST00000372839) (protein P31946))
//! ```
//!
//! The head symbol is the predicate; each argument is either a bare symbol
//! or a parenthesized group whose tokens are flattened to space-joined
//! literal text (`(gene ENSG00000166913)` becomes the literal
//! `gene ENSG00000166913`). Flattening happens here, at the boundary, so the
//! fact store never holds parenthesis artifacts.

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char as pchar, multispace0},
    combinator::map,
    multi::{many0, many1},
    sequence::preceded,
    IResult,
};
use thiserror::Error;

/// A parsed fact, still in plain-text form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFact {
    pub predicate: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MettaParseError {
    #[error("syntax error at line {line}")]
    Syntax { line: usize },

    #[error("fact `{predicate}` at line {line} has no arguments")]
    ZeroArity { predicate: String, line: usize },
}

/// Whitespace and `;` line comments.
fn sp(input: &str) -> IResult<&str, ()> {
    let mut rest = input;
    loop {
        let (r, _) = multispace0(rest)?;
        match r.strip_prefix(';') {
            Some(comment) => {
                let end = comment.find('\n').map_or(comment.len(), |i| i + 1);
                rest = &comment[end..];
            }
            None => return Ok((r, ())),
        }
    }
}

fn symbol(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace() && c != '(' && c != ')' && c != ';')(input)
}

/// Parenthesized argument group, flattened to space-joined literal text.
fn group(input: &str) -> IResult<&str, String> {
    let (rest, _) = pchar('(')(input)?;
    let (rest, parts) = many1(preceded(sp, alt((map(symbol, str::to_string), group))))(rest)?;
    let (rest, _) = sp(rest)?;
    let (rest, _) = pchar(')')(rest)?;
    Ok((rest, parts.join(" ")))
}

fn fact_expr(input: &str) -> IResult<&str, RawFact> {
    let (rest, _) = pchar('(')(input)?;
    let (rest, predicate) = preceded(sp, symbol)(rest)?;
    let (rest, args) = many0(preceded(sp, alt((map(symbol, str::to_string), group))))(rest)?;
    let (rest, _) = sp(rest)?;
    let (rest, _) = pchar(')')(rest)?;
    Ok((
        rest,
        RawFact {
            predicate: predicate.to_string(),
            args,
        },
    ))
}

/// 1-based line number of the first unconsumed byte.
fn line_at(full: &str, rest: &str) -> usize {
    let consumed = full.len() - rest.len();
    full[..consumed].bytes().filter(|&b| b == b'\n').count() + 1
}

/// Parse a whole `.metta` document into raw facts, in file order.
pub fn parse_document(input: &str) -> Result<Vec<RawFact>, MettaParseError> {
    let mut facts = Vec::new();
    let mut rest = input;
    loop {
        // `sp` cannot fail on complete input.
        if let Ok((r, ())) = sp(rest) {
            rest = r;
        }
        if rest.is_empty() {
            return Ok(facts);
        }
        match fact_expr(rest) {
            Ok((r, fact)) => {
                if fact.args.is_empty() {
                    return Err(MettaParseError::ZeroArity {
                        predicate: fact.predicate,
                        line: line_at(input, rest),
                    });
                }
                facts.push(fact);
                rest = r;
            }
            Err(_) => {
                return Err(MettaParseError::Syntax {
                    line: line_at(input, rest),
                })
            }
        }
    }
}
