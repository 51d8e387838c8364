// Copyright (c) 2025 CredSift Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashSet;

use credsift::domain::models::probe::LoginFormType;
use credsift::domain::models::tags::Priority;
use credsift::workers::manager::PipelineManager;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::helpers::{test_settings, FailingSink, MemorySink};

/// 生成不触发网络探测的行：mqtt协议 + 点分IP主机
fn offline_lines(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            format!(
                "mqtt://10.{}.{}.{}/device:user{}:pw{}",
                i / 65536,
                (i / 256) % 256,
                i % 256,
                i,
                i
            )
        })
        .collect()
}

#[tokio::test]
async fn test_every_line_yields_exactly_one_outcome() {
    let lines = offline_lines(1000);
    let manager = PipelineManager::new(test_settings(100, 4), HashSet::new(), Vec::new());
    let mut sink = MemorySink::default();

    let report = manager.run(lines, &mut sink).await.unwrap();

    assert_eq!(report.lines_in, 1000);
    assert_eq!(report.records_out + report.skipped, 1000);
    assert_eq!(sink.records.len(), report.records_out);

    // No duplicate and no missing line, regardless of batch-to-worker
    // assignment order
    let usernames: HashSet<&str> = sink.records.iter().map(|r| r.username.as_str()).collect();
    assert_eq!(usernames.len(), sink.records.len());
}

#[tokio::test]
async fn test_batches_are_written_as_units() {
    let lines = offline_lines(250);
    let manager = PipelineManager::new(test_settings(100, 2), HashSet::new(), Vec::new());
    let mut sink = MemorySink::default();

    manager.run(lines, &mut sink).await.unwrap();

    // 250 lines at batch size 100 -> 3 batches
    assert_eq!(sink.batches, 3);
}

#[tokio::test]
async fn test_malformed_lines_are_skipped_not_fatal() {
    let mut lines = offline_lines(10);
    lines.push("no separators at all".to_string());
    lines.push("only:one".to_string());
    lines.push("mqtt://10.9.9.9/x:****:masked".to_string());

    let manager = PipelineManager::new(test_settings(5, 2), HashSet::new(), Vec::new());
    let mut sink = MemorySink::default();

    let report = manager.run(lines, &mut sink).await.unwrap();

    assert_eq!(report.lines_in, 13);
    assert_eq!(report.records_out, 10);
    assert_eq!(report.skipped, 3);
}

#[tokio::test]
async fn test_sink_failure_surfaces_to_caller() {
    let lines = offline_lines(10);
    let manager = PipelineManager::new(test_settings(5, 2), HashSet::new(), Vec::new());

    let result = manager.run(lines, &mut FailingSink).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_breach_status_is_stamped_from_shared_set() {
    let mut breached = HashSet::new();
    breached.insert("10.0.0.1".to_string());

    let lines = vec![
        "mqtt://10.0.0.1/a:user1:pw1".to_string(),
        "mqtt://10.0.0.2/b:user2:pw2".to_string(),
    ];
    let manager = PipelineManager::new(test_settings(10, 1), breached, Vec::new());
    let mut sink = MemorySink::default();

    manager.run(lines, &mut sink).await.unwrap();

    let hit = sink.records.iter().find(|r| r.domain == "10.0.0.1").unwrap();
    let miss = sink.records.iter().find(|r| r.domain == "10.0.0.2").unwrap();
    assert_eq!(hit.tags.breach_status.as_deref(), Some("breached"));
    assert!(miss.tags.breach_status.is_none());
}

#[tokio::test]
async fn test_unresolvable_domain_still_yields_complete_record() {
    let lines = vec!["http://definitely-not-a-real-host.invalid/login:admin:pw".to_string()];
    let manager = PipelineManager::new(test_settings(10, 1), HashSet::new(), Vec::new());
    let mut sink = MemorySink::default();

    let report = manager.run(lines, &mut sink).await.unwrap();

    assert_eq!(report.records_out, 1);
    let record = &sink.records[0];
    assert!(!record.is_resolved);
    assert!(record.ip_address.is_none());
    assert!(!record.is_accessible);
    // Degraded values, not missing keys
    assert_eq!(record.tags.resolution_status, "unresolved");
    assert_eq!(record.tags.status, "inactive");
    assert_eq!(record.tags.env, "dev");
    assert_eq!(record.tags.priority, Priority::Low);
}

#[tokio::test]
async fn test_wp_admin_scenario_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wp-admin"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<html><title>Dashboard</title><form><input type=\"password\"></form></html>",
        ))
        .mount(&server)
        .await;

    let line = format!("{}/wp-admin:admin:pass123", server.uri());
    let patterns = vec![("/wp-admin".to_string(), "WordPress".to_string())];
    let manager = PipelineManager::new(test_settings(10, 1), HashSet::new(), patterns);
    let mut sink = MemorySink::default();

    let report = manager.run(vec![line], &mut sink).await.unwrap();
    assert_eq!(report.records_out, 1);

    let record = &sink.records[0];
    assert_eq!(record.username, "admin");
    assert_eq!(record.password, "pass123");
    assert_eq!(record.domain, "127.0.0.1");
    assert_eq!(record.path, "/wp-admin");
    assert_eq!(record.web_application.as_deref(), Some("WordPress"));
    assert!(record.is_resolved);
    assert!(record.is_accessible);
    assert!(record.has_login_form);
    assert_eq!(record.login_form_type, Some(LoginFormType::Basic));
    assert_eq!(record.title.as_deref(), Some("Dashboard"));
    // 3 + 4 + 2 = 9 -> critical
    assert_eq!(record.tags.priority, Priority::Critical);
}
