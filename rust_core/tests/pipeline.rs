//! End-to-end pipeline tests over the public API.

use chrono::{DateTime, Utc};
use matchday_rust_core::normalize::suppliers::{
    EmbedPairAdapter, FlatListingAdapter, NestedEventAdapter,
};
use matchday_rust_core::{AdapterRegistry, ReconciliationPipeline, SupplierBatch};
use serde_json::json;

const TS: i64 = 1_760_000_000;

fn fixed_now() -> DateTime<Utc> {
    DateTime::from_timestamp(TS, 0).unwrap()
}

fn pipeline() -> ReconciliationPipeline {
    let mut registry = AdapterRegistry::new();
    registry.register(Box::new(EmbedPairAdapter::new(
        "alpha",
        "https://alpha.example/embed/{source}/{id}",
    )));
    registry.register(Box::new(FlatListingAdapter::new("beta")));
    registry.register(Box::new(NestedEventAdapter::new("gamma")));
    ReconciliationPipeline::new(registry)
}

fn flat_record(title: &str, sport: &str, ts: i64, url: &str) -> serde_json::Value {
    json!({
        "title": title,
        "sport": sport,
        "timestamp": ts,
        "streams": [url]
    })
}

fn nested_record(title: &str, sport: &str, start: serde_json::Value, url: &str) -> serde_json::Value {
    json!({
        "event": {"title": title, "discipline": sport, "start": start},
        "links": [{"url": url}]
    })
}

#[test]
fn test_abbreviated_tennis_names_merge_across_suppliers() {
    let batches = vec![
        SupplierBatch::new(
            "beta",
            vec![flat_record(
                "Roger Federer vs Rafael Nadal",
                "tennis",
                TS,
                "https://beta/fed-nadal",
            )],
        ),
        SupplierBatch::new(
            "gamma",
            // 15 minutes later, abbreviated names, dash separator,
            // millisecond timestamp.
            vec![nested_record(
                "R. Federer - R. Nadal",
                "tennis",
                json!(1_760_000_900_000i64),
                "https://gamma/fn",
            )],
        ),
    ];

    let catalog = pipeline().run_at(&batches, fixed_now()).unwrap();
    assert_eq!(catalog.matches.len(), 1);

    let m = &catalog.matches[0];
    assert!(m.merged);
    assert_eq!(m.merged_count, 2);
    assert_eq!(m.sport, "Tennis");
    assert_eq!(m.confidence, 0.95);
    assert_eq!(m.contributing_sources, vec!["beta", "gamma"]);
    // Base record is the first-seen of the quality tie.
    assert_eq!(m.match_title, "Roger Federer vs Rafael Nadal");
    assert_eq!(m.unix_timestamp, TS);
    assert_eq!(m.stream_count(), 2);
    assert_eq!(catalog.summary.merged_count, 1);
    assert_eq!(catalog.summary.individual_count, 0);
}

#[test]
fn test_three_hours_apart_stays_separate() {
    let batches = vec![
        SupplierBatch::new(
            "beta",
            vec![flat_record(
                "Roger Federer vs Rafael Nadal",
                "tennis",
                TS,
                "https://beta/1",
            )],
        ),
        SupplierBatch::new(
            "gamma",
            vec![nested_record(
                "R. Federer vs R. Nadal",
                "tennis",
                json!(TS + 3 * 3600),
                "https://gamma/1",
            )],
        ),
    ];

    let catalog = pipeline().run_at(&batches, fixed_now()).unwrap();
    // Same UTC date, same bucket, but outside the tennis time window.
    assert_eq!(catalog.matches.len(), 2);
    assert!(catalog.matches.iter().all(|m| !m.merged));
    assert_eq!(catalog.summary.individual_count, 2);
}

#[test]
fn test_college_football_reclassified_and_merged() {
    let batches = vec![
        SupplierBatch::new(
            "beta",
            vec![flat_record(
                "Alabama Crimson Tide vs Georgia Bulldogs",
                "football",
                TS,
                "https://beta/cfb",
            )],
        ),
        SupplierBatch::new(
            "gamma",
            vec![nested_record(
                "Alabama Crimson Tide - Georgia Bulldogs",
                "football",
                json!(TS + 600),
                "https://gamma/cfb",
            )],
        ),
    ];

    let catalog = pipeline().run_at(&batches, fixed_now()).unwrap();
    assert_eq!(catalog.matches.len(), 1);
    let m = &catalog.matches[0];
    // The generic "football" label is overridden by the team-name tables.
    assert_eq!(m.sport, "American Football");
    assert!(m.merged);
}

#[test]
fn test_millisecond_and_second_epochs_reconcile() {
    let start = 1_700_000_000i64;
    let batches = vec![
        SupplierBatch::new(
            "beta",
            vec![flat_record("Arsenal vs Chelsea", "epl", start, "https://beta/ars")],
        ),
        SupplierBatch::new(
            "gamma",
            vec![nested_record(
                "Arsenal vs Chelsea",
                "epl",
                json!(1_700_000_000_000i64),
                "https://gamma/ars",
            )],
        ),
    ];

    let catalog = pipeline().run_at(&batches, fixed_now()).unwrap();
    assert_eq!(catalog.matches.len(), 1);
    assert_eq!(catalog.matches[0].unix_timestamp, start);
    assert!(catalog.matches[0].merged);
}

#[test]
fn test_empty_input_produces_empty_catalog() {
    let catalog = pipeline().run_at(&[], fixed_now()).unwrap();
    assert!(catalog.matches.is_empty());
    assert_eq!(catalog.summary.total_matches, 0);
    assert_eq!(catalog.summary.merged_count, 0);
    assert_eq!(catalog.summary.individual_count, 0);

    let empty_batch = vec![SupplierBatch::new("beta", Vec::new())];
    let catalog = pipeline().run_at(&empty_batch, fixed_now()).unwrap();
    assert!(catalog.matches.is_empty());
}

#[test]
fn test_rerun_is_byte_identical() {
    let batches = vec![
        SupplierBatch::new(
            "beta",
            vec![
                flat_record("Roger Federer vs Rafael Nadal", "tennis", TS, "https://beta/1"),
                flat_record("Celtics vs Lakers", "nba", TS + 7200, "https://beta/2"),
            ],
        ),
        SupplierBatch::new(
            "gamma",
            vec![nested_record(
                "R. Federer vs R. Nadal",
                "tennis",
                json!(TS + 600),
                "https://gamma/1",
            )],
        ),
    ];

    let p = pipeline();
    let now = fixed_now();
    let first = serde_json::to_string(&p.run_at(&batches, now).unwrap()).unwrap();
    let second = serde_json::to_string(&p.run_at(&batches, now).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_stream_urls_are_conserved_through_merging() {
    let batches = vec![
        SupplierBatch::new(
            "beta",
            vec![json!({
                "title": "Arsenal vs Chelsea",
                "sport": "epl",
                "timestamp": TS,
                "streams": ["https://beta/1", "https://beta/2"]
            })],
        ),
        SupplierBatch::new(
            "gamma",
            vec![json!({
                "event": {"title": "Arsenal vs Chelsea", "discipline": "epl", "start": TS + 60},
                // Same URL as beta's; it lives under a different supplier
                // key so both copies survive.
                "links": [{"url": "https://beta/1"}, {"url": "https://gamma/1"}]
            })],
        ),
    ];

    let catalog = pipeline().run_at(&batches, fixed_now()).unwrap();
    assert_eq!(catalog.matches.len(), 1);
    let m = &catalog.matches[0];
    assert_eq!(m.stream_count(), 4);
    assert_eq!(
        m.streams_by_source["beta"],
        vec!["https://beta/1".to_string(), "https://beta/2".to_string()]
    );
    assert_eq!(
        m.streams_by_source["gamma"],
        vec!["https://beta/1".to_string(), "https://gamma/1".to_string()]
    );
}

#[test]
fn test_same_supplier_records_never_merge() {
    let batches = vec![SupplierBatch::new(
        "beta",
        vec![
            flat_record("Arsenal vs Chelsea", "epl", TS, "https://beta/1"),
            flat_record("Arsenal vs Chelsea", "epl", TS, "https://beta/2"),
        ],
    )];

    let catalog = pipeline().run_at(&batches, fixed_now()).unwrap();
    assert_eq!(catalog.matches.len(), 2);
    assert!(catalog.matches.iter().all(|m| !m.merged));
}

#[test]
fn test_score_exactly_at_threshold_merges() {
    // Unlabeled "Cornhole" maps to the default policy: inclusive 0.30
    // threshold with single-letter tokens dropped. Ten tokens against
    // four with three in common lands exactly on the threshold.
    let batches = vec![
        SupplierBatch::new(
            "beta",
            vec![flat_record(
                "Alpha Beta Gamma Delta Kappa vs Eta Theta Iota Mu Omega",
                "cornhole",
                TS,
                "https://beta/1",
            )],
        ),
        SupplierBatch::new(
            "gamma",
            vec![nested_record(
                "Nu Kappa vs Mu Omega",
                "cornhole",
                json!(TS + 60),
                "https://gamma/1",
            )],
        ),
    ];

    let catalog = pipeline().run_at(&batches, fixed_now()).unwrap();
    assert_eq!(catalog.matches.len(), 1);
    assert!(catalog.matches[0].merged);
    assert_eq!(catalog.matches[0].sport, "Cornhole");
}

#[test]
fn test_unlabeled_record_without_signals_falls_back_to_other() {
    let batches = vec![SupplierBatch::new(
        "beta",
        vec![json!({
            "title": "Mystery Cup Final",
            "timestamp": TS,
            "streams": ["https://beta/1"]
        })],
    )];

    let catalog = pipeline().run_at(&batches, fixed_now()).unwrap();
    assert_eq!(catalog.matches.len(), 1);
    assert_eq!(catalog.matches[0].sport, "Other");
}

#[test]
fn test_malformed_record_skipped_without_dropping_batch() {
    let batches = vec![SupplierBatch::new(
        "beta",
        vec![
            flat_record("Arsenal vs Chelsea", "epl", TS, "https://beta/1"),
            json!("not an object"),
            flat_record("Celtics vs Lakers", "nba", TS, "https://beta/2"),
        ],
    )];

    let catalog = pipeline().run_at(&batches, fixed_now()).unwrap();
    assert_eq!(catalog.matches.len(), 2);
}

#[test]
fn test_catalog_sorted_by_kickoff() {
    let batches = vec![SupplierBatch::new(
        "beta",
        vec![
            flat_record("Later vs Game", "darts", TS + 7200, "https://beta/2"),
            flat_record("Earlier vs Game", "darts", TS, "https://beta/1"),
        ],
    )];

    let catalog = pipeline().run_at(&batches, fixed_now()).unwrap();
    assert_eq!(catalog.matches[0].match_title, "Earlier vs Game");
    assert_eq!(catalog.matches[1].match_title, "Later vs Game");
}

#[test]
fn test_embed_template_urls_flow_to_catalog() {
    let batches = vec![SupplierBatch::new(
        "alpha",
        vec![json!({
            "teams": {"home": {"name": "Arsenal"}, "away": {"name": "Chelsea"}},
            "category": "soccer",
            "date": (TS as u64) * 1000,
            "sources": [{"source": "main", "id": "77"}]
        })],
    )];

    let catalog = pipeline().run_at(&batches, fixed_now()).unwrap();
    assert_eq!(catalog.matches.len(), 1);
    let m = &catalog.matches[0];
    assert_eq!(m.match_title, "Arsenal vs Chelsea");
    assert_eq!(m.sport, "Football");
    assert_eq!(
        m.streams_by_source["alpha"],
        vec!["https://alpha.example/embed/main/77".to_string()]
    );
}
