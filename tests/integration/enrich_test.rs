//! End-to-end enrichment tests.
//!
//! These run NDJSON records through the enricher, the HTTP client, and the
//! normalizer against [`FakeStairwell`].

use crate::common::{client, source, Canned, FakeStairwell, SharedBuffer};
use futures::StreamExt;
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use sw_enricher::{Enricher, IdentifierFields};
use sw_error::SwError;
use sw_types::Record;

const API: &str = "/labs/appapi/enrichment/v1";

fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[tokio::test]
async fn test_hostname_record_enriched_end_to_end() {
    let server = FakeStairwell::new().script(
        "deadbeef",
        vec![Canned::json(
            200,
            json!({
                "lookupARecords": [{ "address": "10.0.0.1", "time": "2020-01-01T00:00:00Z" }]
            }),
        )],
    );
    let base = server.start().await;

    let fields = IdentifierFields::new().with_hostname("h");
    let enricher = Enricher::from_fields(client(&base, 2), &fields).unwrap();
    let output = SharedBuffer::default();

    let stats = enricher
        .run(&mut source(&[json!({ "h": "deadbeef" })]), &mut output.destination())
        .await
        .unwrap();

    let records = output.records();
    assert_eq!(records.len(), 1);
    let rec = &records[0];
    assert_eq!(rec["h"], "deadbeef");
    assert_eq!(rec["stairwell_resource_type"], "hostname");
    assert_eq!(rec["stairwell_event_type"], "hostname");
    assert_eq!(rec["stairwell_resource_id"], "deadbeef");
    assert_eq!(rec["stairwell_hostname"], "deadbeef");
    assert_eq!(
        rec["stairwell_hostname_a_records"],
        json!([{ "address": "10.0.0.1", "lookupTime": "2020-01-01T00:00:00Z" }])
    );

    assert_eq!(server.paths(), vec![format!("{API}/hostname_event/deadbeef")]);
    assert_eq!(stats.records_enriched, 1);
}

#[tokio::test]
async fn test_not_found_yields_error_fields_only() {
    let server = FakeStairwell::new().script(
        "0000",
        vec![Canned::json(404, json!({ "details": ["object not found"] }))],
    );
    let base = server.start().await;

    let fields = IdentifierFields::new().with_object("sha256");
    let enricher = Enricher::from_fields(client(&base, 2), &fields).unwrap();
    let output = SharedBuffer::default();

    enricher
        .run(&mut source(&[json!({ "sha256": "0000" })]), &mut output.destination())
        .await
        .unwrap();

    let rec = &output.records()[0];
    assert_eq!(rec["stairwell_status"], "404");
    assert!(rec["stairwell_error"]
        .as_str()
        .unwrap()
        .contains("object not found"));
    assert!(rec.get("stairwell_resource_type").is_none());
    assert!(rec.get("stairwell_resource_id").is_none());

    // 404 is terminal
    assert_eq!(server.hits(), 1);
}

#[tokio::test]
async fn test_rate_limited_lookup_backs_off_then_succeeds() {
    let server = FakeStairwell::new().script(
        "1.1.1.1",
        vec![
            Canned::rate_limited("1"),
            Canned::rate_limited("1"),
            Canned::json(200, json!({ "uninterestingAddr": true })),
        ],
    );
    let base = server.start().await;

    let fields = IdentifierFields::new().with_ip("ip");
    let enricher = Enricher::from_fields(client(&base, 3), &fields).unwrap();
    let output = SharedBuffer::default();

    let started = Instant::now();
    enricher
        .run(&mut source(&[json!({ "ip": "1.1.1.1" })]), &mut output.destination())
        .await
        .unwrap();

    assert!(started.elapsed() >= Duration::from_secs(2));
    assert_eq!(server.hits(), 3);
    assert_eq!(output.records()[0]["stairwell_uninteresting_addr"], true);
}

#[tokio::test]
async fn test_two_identifier_fields_fail_before_any_request() {
    let server = FakeStairwell::new();
    let base = server.start().await;

    let fields = IdentifierFields::new().with_ip("ip").with_object("sha256");
    let result = Enricher::from_fields(client(&base, 2), &fields);

    assert!(matches!(result, Err(SwError::Config(_))));
    assert_eq!(server.hits(), 0);
}

#[tokio::test]
async fn test_failures_do_not_stop_the_run() {
    let server = FakeStairwell::new()
        .script("broken.example", vec![Canned::json(500, json!({}))])
        .script("forbidden.example", vec![Canned::json(
            403,
            json!({ "code": 7, "message": "permission denied" }),
        )]);
    let base = server.start().await;

    let fields = IdentifierFields::new().with_hostname("host");
    let enricher = Enricher::from_fields(client(&base, 1), &fields).unwrap();
    let output = SharedBuffer::default();

    let input = [
        json!({ "n": 0, "host": "broken.example" }),
        json!({ "n": 1, "host": "" }),
        json!({ "n": 2, "host": "forbidden.example" }),
        json!({ "n": 3, "host": "fine.example" }),
    ];
    let stats = enricher
        .run(&mut source(&input), &mut output.destination())
        .await
        .unwrap();

    let records = output.records();
    assert_eq!(records.len(), 4);
    for (i, rec) in records.iter().enumerate() {
        assert_eq!(rec["n"], json!(i));
    }

    assert_eq!(records[0]["stairwell_status"], "500");
    assert_eq!(records[1], input[1]);
    assert_eq!(records[2]["stairwell_status"], "403");
    assert!(records[2]["stairwell_error"]
        .as_str()
        .unwrap()
        .contains("permission denied"));
    assert_eq!(records[3]["stairwell_hostname"], "fine.example");

    // One retry for the 500, none for the 403, nothing for the empty record
    assert_eq!(server.hits(), 4);

    assert_eq!(stats.records_seen, 4);
    assert_eq!(stats.records_enriched, 1);
    assert_eq!(stats.records_failed, 2);
    assert_eq!(stats.records_skipped, 1);
    assert_eq!(stats.transient_errors, 1);
    assert_eq!(stats.permanent_errors, 1);
}

#[tokio::test]
async fn test_stream_stops_when_consumer_stops() {
    let server = FakeStairwell::new();
    let base = server.start().await;

    let fields = IdentifierFields::new().with_object("sha256");
    let enricher = Enricher::from_fields(client(&base, 0), &fields).unwrap();

    let input = (0..5).map(|i| record(json!({ "sha256": format!("hash{i}") })));
    let first: Vec<Record> = enricher
        .enrich_stream(futures::stream::iter(input))
        .take(2)
        .collect()
        .await;

    assert_eq!(first.len(), 2);
    assert_eq!(first[1]["stairwell_resource_id"], "hash1");
    assert_eq!(
        server.paths(),
        vec![
            format!("{API}/object_event/hash0"),
            format!("{API}/object_event/hash1"),
        ]
    );
}
