//! genegraph-factdb: In-Memory Fact Store for Biological Relationship Queries
//!
//! Facts are relationship tuples such as `transcribed_to(gene X, transcript Y)`
//! or `translates_to(transcript Y, protein Z)`. The store is populated once at
//! load time and queried afterwards with conjunctive patterns whose shared
//! variables act as join conditions.
//!
//! Key design points:
//! 1. **Symbol Interning**: every predicate and literal is stored once and
//!    referenced by a u32 ID, so equality checks during matching are integer
//!    compares.
//! 2. **Predicate Index**: facts are indexed by predicate, avoiding a full
//!    scan per query over mixed-predicate datasets.
//! 3. **Insertion Order**: scans and matches are emitted in insertion order,
//!    so repeated runs over the same store produce identical output.
//! 4. **Load-then-query phases**: `insert` is the only mutating operation and
//!    the expected caller finishes loading before the first query. The store
//!    has no interior mutability, so sharing `&FactStore` across readers is
//!    safe by construction.
//!
//! ## Module Organization
//!
//! - `pattern`: query templates of literal and variable terms
//! - `matcher`: left-deep nested-loop evaluation of conjunctions
//! - `project`: flattening matches into `{edge, source, target}` records

pub mod matcher;
pub mod pattern;
pub mod project;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export key types
pub use matcher::{Binding, Match};
pub use pattern::{Pattern, Term};
pub use project::{project, RelationRecord};

// ============================================================================
// Errors
// ============================================================================

/// Logic errors surfaced by the store, matcher and projector.
///
/// All of these indicate a query-authoring or data bug rather than a
/// transient fault; retrying never helps.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Attempted to insert a fact without a predicate or without arguments.
    #[error("malformed fact: {0}")]
    MalformedFact(String),

    /// A query pattern references a predicate that was never inserted.
    #[error("unknown predicate `{0}`")]
    UnknownPredicate(String),

    /// A pattern's argument count disagrees with a stored fact of the same
    /// predicate.
    #[error("arity mismatch for `{predicate}`: pattern has {pattern} args, fact has {fact}")]
    ArityMismatch {
        predicate: String,
        pattern: usize,
        fact: usize,
    },

    /// A match's terminal fact cannot supply both a source and a target.
    #[error("unprojectable match: {0}")]
    UnboundProjection(String),
}

// ============================================================================
// Symbol Interning
// ============================================================================

/// Interned symbol ID (4 bytes instead of a heap string per occurrence).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct SymId(u32);

impl SymId {
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Symbol interner: maps predicate/literal text to compact IDs.
#[derive(Debug, Default)]
pub struct SymbolInterner {
    sym_to_id: AHashMap<String, SymId>,
    id_to_sym: Vec<String>,
}

impl SymbolInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a symbol, returning its ID.
    pub fn intern(&mut self, s: &str) -> SymId {
        if let Some(&id) = self.sym_to_id.get(s) {
            return id;
        }
        let id = SymId(self.id_to_sym.len() as u32);
        self.sym_to_id.insert(s.to_string(), id);
        self.id_to_sym.push(s.to_string());
        id
    }

    /// Look up an existing ID for a symbol without inserting.
    pub fn id_of(&self, s: &str) -> Option<SymId> {
        self.sym_to_id.get(s).copied()
    }

    /// Look up symbol text by ID.
    pub fn lookup(&self, id: SymId) -> Option<&str> {
        self.id_to_sym.get(id.0 as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.id_to_sym.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_sym.is_empty()
    }
}

// ============================================================================
// Fact Storage
// ============================================================================

/// Identifier of a stored fact: its insertion index.
pub type FactId = u32;

/// A resolved fact: predicate plus ordered literal arguments.
///
/// Literal values are plain identifier text (e.g. `gene ENSG00000166913`)
/// with no surrounding delimiters; the store never holds display artifacts,
/// so projected output needs no cleanup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    pub predicate: String,
    pub args: Vec<String>,
}

/// Interned fact row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FactRow {
    pub(crate) predicate: SymId,
    pub(crate) args: Vec<SymId>,
}

/// Append-only, insertion-ordered fact store with a predicate-keyed index.
#[derive(Debug, Default)]
pub struct FactStore {
    pub(crate) interner: SymbolInterner,
    /// All facts, in insertion order.
    pub(crate) rows: Vec<FactRow>,
    /// Predicate index: predicate -> fact IDs, each list in insertion order.
    pub(crate) by_predicate: AHashMap<SymId, Vec<FactId>>,
}

impl FactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of facts stored.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a fact. The only rejected inputs are an empty predicate or an
    /// empty argument list.
    pub fn insert(&mut self, predicate: &str, args: &[&str]) -> Result<FactId, EngineError> {
        if predicate.is_empty() {
            return Err(EngineError::MalformedFact("empty predicate".to_string()));
        }
        if args.is_empty() {
            return Err(EngineError::MalformedFact(format!(
                "`{predicate}` has no arguments"
            )));
        }

        let id = self.rows.len() as FactId;
        let predicate = self.interner.intern(predicate);
        let args = args.iter().map(|a| self.interner.intern(a)).collect();
        self.rows.push(FactRow { predicate, args });
        self.by_predicate.entry(predicate).or_default().push(id);
        Ok(id)
    }

    /// Resolve a stored fact back to plain text.
    pub fn fact(&self, id: FactId) -> Option<Fact> {
        self.rows.get(id as usize).map(|row| self.resolve(row))
    }

    /// All predicates seen so far, sorted for deterministic reporting.
    pub fn predicates(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .by_predicate
            .keys()
            .filter_map(|&p| self.interner.lookup(p))
            .collect();
        names.sort_unstable();
        names
    }

    /// Number of facts stored under `predicate`.
    pub fn count_for_predicate(&self, predicate: &str) -> usize {
        self.interner
            .id_of(predicate)
            .and_then(|p| self.by_predicate.get(&p))
            .map_or(0, Vec::len)
    }

    /// Lazy scan over facts of `predicate`, in insertion order.
    ///
    /// Each `Some` position of `partial` requires literal equality at that
    /// position; `None` positions are wildcards. Facts whose arity differs
    /// from `partial.len()` do not match. An unknown predicate or unknown
    /// literal scans empty; strict predicate checking belongs to
    /// [`FactStore::run_query`].
    pub fn scan<'s>(
        &'s self,
        predicate: &str,
        partial: &[Option<&str>],
    ) -> impl Iterator<Item = Fact> + 's {
        let pred = self.interner.id_of(predicate);
        // An unknown literal in any hint position cannot match anything.
        let hints: Option<Vec<Option<SymId>>> = partial
            .iter()
            .map(|slot| match slot {
                None => Some(None),
                Some(lit) => self.interner.id_of(lit).map(Some),
            })
            .collect();

        let ids: Box<dyn Iterator<Item = FactId> + 's> = match (pred, hints) {
            (Some(pred), Some(hints)) => Box::new(self.scan_ids(pred, hints)),
            _ => Box::new(std::iter::empty()),
        };
        ids.map(move |id| self.resolve(&self.rows[id as usize]))
    }

    /// Interned scan used by both `scan` and the matcher.
    pub(crate) fn scan_ids(
        &self,
        predicate: SymId,
        hints: Vec<Option<SymId>>,
    ) -> impl Iterator<Item = FactId> + '_ {
        self.facts_for(predicate)
            .iter()
            .copied()
            .filter(move |&id| {
                let row = &self.rows[id as usize];
                row.args.len() == hints.len()
                    && hints
                        .iter()
                        .zip(&row.args)
                        .all(|(want, &have)| want.map_or(true, |want| want == have))
            })
    }

    pub(crate) fn facts_for(&self, predicate: SymId) -> &[FactId] {
        self.by_predicate
            .get(&predicate)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub(crate) fn resolve(&self, row: &FactRow) -> Fact {
        Fact {
            predicate: self.resolve_sym(row.predicate),
            args: row.args.iter().map(|&a| self.resolve_sym(a)).collect(),
        }
    }

    // IDs handed out by our own interner always resolve; the fallback only
    // defends against a foreign SymId.
    pub(crate) fn resolve_sym(&self, id: SymId) -> String {
        self.interner.lookup(id).unwrap_or_default().to_string()
    }
}
