//! Text form for query patterns.
//!
//! Syntax: `predicate(arg, arg, ...)`. Arguments are split on top-level
//! commas and trimmed; a `$`-prefixed argument is a variable, anything else
//! is literal text (which may contain spaces, e.g. `gene ENSG00000166913`).
//!
//! Example conjunction, one pattern per CLI argument:
//!
//! ```text
//! 'transcribed_to(gene ENSG00000166913, $t)' 'translates_to($t, $p)'
//! ```

use anyhow::{anyhow, Result};
use genegraph_factdb::{Pattern, Term};

pub fn parse_pattern(text: &str) -> Result<Pattern> {
    let text = text.trim();
    let open = text
        .find('(')
        .ok_or_else(|| anyhow!("expected `predicate(arg, ...)`, got `{text}`"))?;
    if !text.ends_with(')') {
        return Err(anyhow!("unterminated pattern `{text}`"));
    }

    let predicate = text[..open].trim();
    if predicate.is_empty() {
        return Err(anyhow!("missing predicate in `{text}`"));
    }

    let body = &text[open + 1..text.len() - 1];
    let args: Vec<Term> = body
        .split(',')
        .map(str::trim)
        .filter(|arg| !arg.is_empty())
        .map(|arg| match arg.strip_prefix('$') {
            Some(name) if !name.is_empty() => Ok(Term::var(name)),
            Some(_) => Err(anyhow!("empty variable name in `{text}`")),
            None => Ok(Term::lit(arg)),
        })
        .collect::<Result<_>>()?;

    if args.is_empty() {
        return Err(anyhow!("pattern `{text}` has no arguments"));
    }
    Ok(Pattern::new(predicate, args))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_literals_and_variables() {
        let p = parse_pattern("transcribed_to(gene ENSG00000166913, $t)").expect("parse");
        assert_eq!(p.predicate, "transcribed_to");
        assert_eq!(
            p.args,
            vec![Term::lit("gene ENSG00000166913"), Term::var("t")]
        );
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let p = parse_pattern("  translates_to( $t ,  $p ) ").expect("parse");
        assert_eq!(p.predicate, "translates_to");
        assert_eq!(p.args, vec![Term::var("t"), Term::var("p")]);
    }

    #[test]
    fn rejects_malformed_patterns() {
        assert!(parse_pattern("no_parens").is_err());
        assert!(parse_pattern("unclosed(a, b").is_err());
        assert!(parse_pattern("(a, b)").is_err());
        assert!(parse_pattern("empty()").is_err());
        assert!(parse_pattern("bad($, x)").is_err());
    }
}
