use genegraph_factdb::{project, EngineError, FactStore, Pattern, RelationRecord, Term};

fn loaded_store() -> FactStore {
    let mut store = FactStore::new();
    store
        .insert(
            "transcribed_to",
            &["gene ENSG00000166913", "transcript ENST00000372839"],
        )
        .expect("insert");
    store
        .insert(
            "transcribed_to",
            &["gene ENSG00000166913", "transcript ENST00000353703"],
        )
        .expect("insert");
    store
        .insert(
            "translates_to",
            &["transcript ENST00000372839", "protein P31946"],
        )
        .expect("insert");
    store
        .insert(
            "translates_to",
            &["transcript ENST00000353703", "protein P31946"],
        )
        .expect("insert");
    store
}

#[test]
fn single_pattern_matches_project_to_their_own_fact() {
    let store = loaded_store();
    let query = [Pattern::new(
        "transcribed_to",
        vec![Term::lit("gene ENSG00000166913"), Term::var("transcript")],
    )];

    let records = project(&store.run_query(&query).expect("query")).expect("project");
    assert_eq!(records.len(), 2);
    assert_eq!(
        records[0],
        RelationRecord {
            edge: "transcribed_to".to_string(),
            source: "gene ENSG00000166913".to_string(),
            target: "transcript ENST00000372839".to_string(),
        }
    );
    assert_eq!(records[1].target, "transcript ENST00000353703");
}

#[test]
fn join_chains_project_the_terminal_fact_only() {
    let store = loaded_store();
    let query = [
        Pattern::new(
            "transcribed_to",
            vec![Term::lit("gene ENSG00000166913"), Term::var("t")],
        ),
        Pattern::new("translates_to", vec![Term::var("t"), Term::var("p")]),
    ];

    let records = project(&store.run_query(&query).expect("query")).expect("project");
    assert_eq!(records.len(), 2);
    for record in &records {
        assert_eq!(record.edge, "translates_to");
        assert!(record.source.starts_with("transcript "));
        assert_eq!(record.target, "protein P31946");
    }
}

#[test]
fn projected_values_carry_no_delimiter_artifacts() {
    let store = loaded_store();
    let query = [Pattern::new(
        "transcribed_to",
        vec![Term::var("g"), Term::var("t")],
    )];

    let records = project(&store.run_query(&query).expect("query")).expect("project");
    for record in records {
        for value in [&record.edge, &record.source, &record.target] {
            assert!(!value.contains('('), "unexpected delimiter in `{value}`");
            assert!(!value.contains(')'), "unexpected delimiter in `{value}`");
        }
    }
}

#[test]
fn projection_fails_when_terminal_fact_lacks_source_and_target() {
    let mut store = FactStore::new();
    store.insert("is_annotated", &["gene_A"]).expect("insert");

    let query = [Pattern::new("is_annotated", vec![Term::var("g")])];
    let matches = store.run_query(&query).expect("query");
    assert_eq!(matches.len(), 1);

    let err = project(&matches).expect_err("must fail");
    assert!(matches!(err, EngineError::UnboundProjection(_)));
}

#[test]
fn records_serialize_with_edge_source_target_fields() {
    let record = RelationRecord {
        edge: "transcribed_to".to_string(),
        source: "gene ENSG00000175793".to_string(),
        target: "transcript ENST00000339276".to_string(),
    };

    let json = serde_json::to_value(&record).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!({
            "edge": "transcribed_to",
            "source": "gene ENSG00000175793",
            "target": "transcript ENST00000339276",
        })
    );
}

#[test]
fn projecting_no_matches_yields_no_records() {
    let records = project(&[]).expect("project");
    assert!(records.is_empty());
}
