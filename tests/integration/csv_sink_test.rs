// Copyright (c) 2025 CredSift Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashSet;

use credsift::domain::models::probe::LoginFormType;
use credsift::domain::models::record::EnrichedRecord;
use credsift::infrastructure::sink::csv_sink::CsvSink;
use credsift::infrastructure::sink::RecordSink;
use credsift::pipeline::tagging::{assign_tags, TagInputs};

fn sample_record() -> EnrichedRecord {
    let tags = assign_tags(
        TagInputs {
            domain: "example.com",
            ip: Some("93.184.216.34"),
            scheme: "https",
            resolved: true,
            accessible: true,
            parked: false,
            has_login_form: true,
        },
        &HashSet::new(),
    );

    EnrichedRecord {
        uri: "https://example.com/wp-admin".to_string(),
        username: "admin".to_string(),
        password: "pass123".to_string(),
        domain: "example.com".to_string(),
        ip_address: Some("93.184.216.34".to_string()),
        port: Some(443),
        path: "/wp-admin".to_string(),
        tags,
        title: Some("Dashboard".to_string()),
        is_resolved: true,
        is_accessible: true,
        has_login_form: true,
        login_form_type: Some(LoginFormType::Basic),
        web_application: Some("WordPress".to_string()),
        is_parked: false,
    }
}

#[tokio::test]
async fn test_csv_sink_writes_fixed_column_order() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let mut sink = CsvSink::new(file.path()).unwrap();

    sink.write_batch(&[sample_record()]).await.unwrap();
    sink.finalize().await.unwrap();

    let mut reader = csv::Reader::from_path(file.path()).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec![
            "uri",
            "username",
            "password",
            "domain",
            "ip_address",
            "port",
            "path",
            "tags",
            "title",
            "is_resolved",
            "is_accessible",
            "has_login_form",
            "login_form_type",
            "web_application",
            "is_parked",
        ]
    );

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(&row[0], "https://example.com/wp-admin");
    assert_eq!(&row[3], "example.com");
    assert_eq!(&row[5], "443");
    assert_eq!(&row[9], "true");
    assert_eq!(&row[12], "basic");
    assert_eq!(&row[13], "WordPress");

    // The tags column is a JSON object
    let tags: serde_json::Value = serde_json::from_str(&row[7]).unwrap();
    assert_eq!(tags["protocol"], "https");
    assert_eq!(tags["priority"], "critical");
    assert_eq!(tags["scope"], "public");
}

#[tokio::test]
async fn test_csv_sink_writes_empty_fields_for_degraded_records() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let mut sink = CsvSink::new(file.path()).unwrap();

    let tags = assign_tags(
        TagInputs {
            domain: "dead.example",
            ip: None,
            scheme: "http",
            resolved: false,
            accessible: false,
            parked: false,
            has_login_form: false,
        },
        &HashSet::new(),
    );
    let record = EnrichedRecord {
        uri: "http://dead.example/".to_string(),
        username: "u".to_string(),
        password: "p".to_string(),
        domain: "dead.example".to_string(),
        ip_address: None,
        port: Some(80),
        path: "/".to_string(),
        tags,
        title: None,
        is_resolved: false,
        is_accessible: false,
        has_login_form: false,
        login_form_type: None,
        web_application: None,
        is_parked: false,
    };

    sink.write_batch(&[record]).await.unwrap();
    sink.finalize().await.unwrap();

    let mut reader = csv::Reader::from_path(file.path()).unwrap();
    let row = reader.records().next().unwrap().unwrap();
    assert_eq!(&row[4], ""); // ip_address
    assert_eq!(&row[8], ""); // title
    assert_eq!(&row[12], ""); // login_form_type
    assert_eq!(&row[13], ""); // web_application

    let tags: serde_json::Value = serde_json::from_str(&row[7]).unwrap();
    assert!(tags.get("ip_type").is_none());
    assert_eq!(tags["resolution_status"], "unresolved");
    assert_eq!(tags["priority"], "low");
}
