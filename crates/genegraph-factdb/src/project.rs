//! Projection of matches into flat relation records.

use serde::{Deserialize, Serialize};

use crate::matcher::Match;
use crate::EngineError;

/// Flattened relation record for downstream serialization.
///
/// Serializes to `{"edge": ..., "source": ..., "target": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationRecord {
    pub edge: String,
    pub source: String,
    pub target: String,
}

/// Flatten matches into relation records, preserving match order.
///
/// Each match contributes one record, taken from its *terminal* fact (the
/// fact bound by the last pattern of the conjunction): `edge` is the
/// predicate, `source` and `target` the first two arguments. Earlier facts
/// in a join chain only constrained which terminal facts qualify; they are
/// not merged into the record.
pub fn project(matches: &[Match]) -> Result<Vec<RelationRecord>, EngineError> {
    matches
        .iter()
        .map(|m| {
            let fact = m.facts.last().ok_or_else(|| {
                EngineError::UnboundProjection("match contains no facts".to_string())
            })?;
            if fact.args.len() < 2 {
                return Err(EngineError::UnboundProjection(format!(
                    "terminal fact `{}` has {} argument(s); need source and target",
                    fact.predicate,
                    fact.args.len()
                )));
            }
            Ok(RelationRecord {
                edge: fact.predicate.clone(),
                source: fact.args[0].clone(),
                target: fact.args[1].clone(),
            })
        })
        .collect()
}
