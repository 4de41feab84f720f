//! Left-deep nested-loop evaluation of conjunctive pattern queries.
//!
//! Evaluation keeps a set of partial bindings and extends it one pattern at a
//! time: already-bound variables are substituted into the pattern to form
//! scan hints, every surviving candidate fact binds the remaining variable
//! positions, and inconsistent candidates are discarded. Cost is bounded by
//! the product of per-pattern candidate counts, which is fine for the small
//! fan-out joins this store serves (gene → transcript → protein chains).

use std::collections::BTreeMap;

use serde::Serialize;

use crate::pattern::{Pattern, Term};
use crate::{EngineError, Fact, FactId, FactStore, SymId};

/// Resolved variable assignments for one successful match.
pub type Binding = BTreeMap<String, String>;

/// One fully-resolved binding together with the facts that satisfied each
/// pattern, in pattern order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    pub binding: Binding,
    pub facts: Vec<Fact>,
}

/// In-flight binding state while a conjunction is being evaluated.
#[derive(Debug, Clone)]
struct PartialMatch {
    binding: BTreeMap<String, SymId>,
    facts: Vec<FactId>,
}

impl FactStore {
    /// Evaluate a conjunctive query and return all matches, in scan order.
    ///
    /// Fails with [`EngineError::UnknownPredicate`] when a pattern references
    /// a predicate never inserted, and with [`EngineError::ArityMismatch`]
    /// when a pattern's arg count disagrees with a stored fact of its
    /// predicate. An empty store matches nothing and is not an error, even
    /// for predicates it has never seen.
    pub fn run_query(&self, patterns: &[Pattern]) -> Result<Vec<Match>, EngineError> {
        if self.is_empty() || patterns.is_empty() {
            return Ok(Vec::new());
        }

        let mut states = vec![PartialMatch {
            binding: BTreeMap::new(),
            facts: Vec::new(),
        }];

        for pattern in patterns {
            let pred = self
                .interner
                .id_of(&pattern.predicate)
                .filter(|p| self.by_predicate.contains_key(p))
                .ok_or_else(|| EngineError::UnknownPredicate(pattern.predicate.clone()))?;

            // Arity is checked against every fact of the predicate up front,
            // so a malformed query or dataset surfaces even when scan hints
            // would have filtered the offending fact away.
            for &id in self.facts_for(pred) {
                let fact_arity = self.rows[id as usize].args.len();
                if fact_arity != pattern.args.len() {
                    return Err(EngineError::ArityMismatch {
                        predicate: pattern.predicate.clone(),
                        pattern: pattern.args.len(),
                        fact: fact_arity,
                    });
                }
            }

            let mut next = Vec::new();
            for state in &states {
                // A literal that was never interned cannot match any fact.
                let Some(hints) = self.pattern_hints(pattern, &state.binding) else {
                    continue;
                };

                'candidate: for id in self.scan_ids(pred, hints.clone()) {
                    let row = &self.rows[id as usize];
                    let mut binding = state.binding.clone();

                    // Hints already enforced literal and bound-variable
                    // positions; bind the rest, rejecting inconsistent
                    // repeats within this pattern.
                    for (term, &have) in pattern.args.iter().zip(&row.args) {
                        if let Term::Variable(name) = term {
                            match binding.get(name.as_str()) {
                                Some(&bound) if bound != have => continue 'candidate,
                                Some(_) => {}
                                None => {
                                    binding.insert(name.clone(), have);
                                }
                            }
                        }
                    }

                    let mut facts = state.facts.clone();
                    facts.push(id);
                    next.push(PartialMatch { binding, facts });
                }
            }

            states = next;
            if states.is_empty() {
                return Ok(Vec::new());
            }
        }

        Ok(states.into_iter().map(|s| self.materialize(s)).collect())
    }

    /// Substitute literals and already-bound variables into scan hints.
    /// Returns `None` when a pattern literal was never interned, i.e. the
    /// pattern cannot match anything in this store.
    fn pattern_hints(
        &self,
        pattern: &Pattern,
        binding: &BTreeMap<String, SymId>,
    ) -> Option<Vec<Option<SymId>>> {
        pattern
            .args
            .iter()
            .map(|term| match term {
                Term::Literal(lit) => self.interner.id_of(lit).map(Some),
                Term::Variable(name) => Some(binding.get(name.as_str()).copied()),
            })
            .collect()
    }

    fn materialize(&self, state: PartialMatch) -> Match {
        Match {
            binding: state
                .binding
                .into_iter()
                .map(|(name, id)| (name, self.resolve_sym(id)))
                .collect(),
            facts: state
                .facts
                .iter()
                .map(|&id| self.resolve(&self.rows[id as usize]))
                .collect(),
        }
    }
}
