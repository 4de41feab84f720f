use std::fs;
use std::path::Path;

use genegraph_factdb::{FactStore, Pattern, Term};
use genegraph_ingest_metta::{discover_dataset_files, load_dataset, IngestError, LoadStats};

fn write_file(path: &Path, text: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create dirs");
    }
    fs::write(path, text).expect("write file");
}

#[test]
fn loads_nested_dataset_directories() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_file(
        &dir.path().join("gencode/transcripts.metta"),
        "(transcribed_to (gene G1) (transcript T1))\n\
         (transcribed_to (gene G1) (transcript T2))\n",
    );
    write_file(
        &dir.path().join("uniprot/proteins.metta"),
        "; transcript to protein\n(translates_to (transcript T1) (protein P1))\n",
    );
    // Non-.metta files are ignored.
    write_file(&dir.path().join("README.txt"), "not a dataset");

    let mut store = FactStore::new();
    let stats = load_dataset(&mut store, dir.path()).expect("load");

    assert_eq!(
        stats,
        LoadStats {
            files_loaded: 2,
            files_skipped: 0,
            facts_loaded: 3,
        }
    );
    assert_eq!(store.len(), 3);
    assert_eq!(store.count_for_predicate("transcribed_to"), 2);
    assert_eq!(store.count_for_predicate("translates_to"), 1);
}

#[test]
fn load_order_follows_sorted_paths() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_file(&dir.path().join("b.metta"), "(rel (gene G) (transcript B))\n");
    write_file(&dir.path().join("a.metta"), "(rel (gene G) (transcript A))\n");

    let files = discover_dataset_files(dir.path()).expect("discover");
    assert_eq!(files.len(), 2);
    assert!(files[0].ends_with("a.metta"));

    let mut store = FactStore::new();
    load_dataset(&mut store, dir.path()).expect("load");
    let targets: Vec<String> = store
        .scan("rel", &[None, None])
        .map(|f| f.args[1].clone())
        .collect();
    assert_eq!(targets, vec!["transcript A", "transcript B"]);
}

#[test]
fn malformed_files_are_skipped_and_the_rest_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_file(
        &dir.path().join("good.metta"),
        "(translates_to (transcript T1) (protein P1))\n",
    );
    write_file(&dir.path().join("mangled.metta"), "(((\n");

    let mut store = FactStore::new();
    let stats = load_dataset(&mut store, dir.path()).expect("load");

    assert_eq!(stats.files_loaded, 1);
    assert_eq!(stats.files_skipped, 1);
    assert_eq!(stats.facts_loaded, 1);

    let query = [Pattern::new(
        "translates_to",
        vec![Term::var("t"), Term::var("p")],
    )];
    assert_eq!(store.run_query(&query).expect("query").len(), 1);
}

#[test]
fn missing_dataset_root_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("does-not-exist");

    let mut store = FactStore::new();
    let err = load_dataset(&mut store, &missing).expect_err("must fail");
    assert!(matches!(err, IngestError::MissingRoot(path) if path == missing));
}

#[test]
fn dataset_without_metta_files_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_file(&dir.path().join("notes.txt"), "nothing to load");

    let mut store = FactStore::new();
    let err = load_dataset(&mut store, dir.path()).expect_err("must fail");
    assert!(matches!(err, IngestError::NoDatasetFiles(_)));
    assert!(store.is_empty());
}
