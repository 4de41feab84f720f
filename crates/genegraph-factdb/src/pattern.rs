//! Query patterns: positional templates of literals and variables.

/// A pattern term.
///
/// Literals must match the stored literal exactly; variables match any
/// literal, but occurrences of the same variable name anywhere in a
/// conjunction must bind to the same literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Literal(String),
    Variable(String),
}

impl Term {
    pub fn lit(value: impl Into<String>) -> Self {
        Term::Literal(value.into())
    }

    pub fn var(name: impl Into<String>) -> Self {
        Term::Variable(name.into())
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }
}

/// A query pattern: predicate name plus positional terms.
///
/// A query is an ordered slice of patterns, conjunctively combined. A pattern
/// with all-literal args degenerates to an existence check; a single-pattern
/// query degenerates to a filtered scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub predicate: String,
    pub args: Vec<Term>,
}

impl Pattern {
    pub fn new(predicate: impl Into<String>, args: Vec<Term>) -> Self {
        Self {
            predicate: predicate.into(),
            args,
        }
    }

    /// Names of the variables this pattern mentions, in positional order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.args.iter().filter_map(|t| match t {
            Term::Variable(name) => Some(name.as_str()),
            Term::Literal(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_constructors() {
        assert_eq!(Term::lit("gene X"), Term::Literal("gene X".to_string()));
        assert_eq!(Term::var("t"), Term::Variable("t".to_string()));
        assert!(Term::var("t").is_variable());
        assert!(!Term::lit("t").is_variable());
    }

    #[test]
    fn pattern_variables_in_positional_order() {
        let p = Pattern::new(
            "translates_to",
            vec![Term::var("transcript"), Term::lit("protein P31946"), Term::var("ctx")],
        );
        assert_eq!(p.variables().collect::<Vec<_>>(), vec!["transcript", "ctx"]);
    }
}
