//! `.metta` dataset ingestion for genegraph (boundary adapter).
//!
//! This crate sits at the ingestion boundary:
//!
//! - It discovers `**/*.metta` files under a dataset directory.
//! - It parses each file into plain-text facts ([`parser::RawFact`]).
//! - It feeds them to the fact store through `FactStore::insert`, the core's
//!   only ingestion entry point.
//!
//! A malformed or unreadable file is skipped with a warning and the load
//! continues with the remaining files; that policy lives here, not in the
//! core. Missing dataset directories and directories with no `.metta` files
//! are hard errors, matching what a misconfigured deployment looks like.

pub mod parser;

use std::path::{Path, PathBuf};

use genegraph_factdb::FactStore;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("dataset path `{0}` does not exist")]
    MissingRoot(PathBuf),

    #[error("no .metta files found under `{0}`")]
    NoDatasetFiles(PathBuf),

    #[error(transparent)]
    Store(#[from] genegraph_factdb::EngineError),
}

/// Outcome of a dataset load.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadStats {
    pub files_loaded: usize,
    pub files_skipped: usize,
    pub facts_loaded: usize,
}

/// Find every `.metta` file under `root`, sorted by path so insertion order
/// is reproducible across platforms and filesystems.
pub fn discover_dataset_files(root: &Path) -> Result<Vec<PathBuf>, IngestError> {
    if !root.exists() {
        return Err(IngestError::MissingRoot(root.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| path.extension().map_or(false, |ext| ext == "metta"))
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(IngestError::NoDatasetFiles(root.to_path_buf()));
    }
    Ok(files)
}

/// Load every `.metta` file under `root` into `store`.
///
/// Files that fail to read or parse are skipped with a warning; the parser
/// rejects zero-arity expressions before they reach the store.
pub fn load_dataset(store: &mut FactStore, root: &Path) -> Result<LoadStats, IngestError> {
    let files = discover_dataset_files(root)?;
    let mut stats = LoadStats::default();

    for path in files {
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read dataset file; skipping"
                );
                stats.files_skipped += 1;
                continue;
            }
        };

        let facts = match parser::parse_document(&text) {
            Ok(facts) => facts,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to parse dataset file; skipping"
                );
                stats.files_skipped += 1;
                continue;
            }
        };

        for fact in &facts {
            let args: Vec<&str> = fact.args.iter().map(String::as_str).collect();
            store.insert(&fact.predicate, &args)?;
        }
        stats.files_loaded += 1;
        stats.facts_loaded += facts.len();
        tracing::info!(path = %path.display(), facts = facts.len(), "loaded dataset file");
    }

    Ok(stats)
}
