use std::collections::HashSet;

use ipintel_common::record::LookupRecord;
use ipintel_core::output::{self, RunSummary};
use tempfile::TempDir;
use wiremock::MockServer;

use crate::util::{body, config_for, dispatch, mount_answer, mount_status};

fn read_array(path: &std::path::Path) -> Vec<LookupRecord> {
    serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap()
}

#[tokio::test]
async fn one_failure_one_success_writes_one_record() {
    let server = MockServer::start().await;
    mount_answer(&server, "8.8.8.8", body("8.8.8.8", &[53], &[], &[]), 0).await;
    mount_status(&server, "10.0.0.1", 502).await;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("results.json");
    let summary = output::export_json(dispatch(&config_for(&server), &["8.8.8.8", "10.0.0.1"]), &path)
        .await
        .unwrap();

    assert_eq!(summary, RunSummary { received: 2, reported: 1 });
    let records = read_array(&path);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].address, "8.8.8.8");
}

#[tokio::test]
async fn export_round_trips_regardless_of_arrival_order() {
    let server = MockServer::start().await;
    let expected = vec![
        LookupRecord {
            address: "10.0.0.1".into(),
            open_ports: vec![443, 22],
            hostnames: vec!["b.example".into(), "a.example".into()],
            tags: vec!["cloud".into()],
            ..LookupRecord::default()
        },
        LookupRecord {
            address: "10.0.0.2".into(),
            open_ports: vec![80],
            cpes: vec!["cpe:/a:nginx:nginx".into()],
            vulnerabilities: vec!["CVE-2021-23017".into()],
            ..LookupRecord::default()
        },
    ];
    mount_answer(&server, "10.0.0.1", serde_json::to_value(&expected[0]).unwrap(), 120).await;
    mount_answer(&server, "10.0.0.2", serde_json::to_value(&expected[1]).unwrap(), 0).await;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("results.json");
    output::export_json(dispatch(&config_for(&server), &["10.0.0.1", "10.0.0.2"]), &path)
        .await
        .unwrap();

    let written = read_array(&path);
    assert_eq!(written.len(), expected.len());
    for record in &expected {
        assert!(written.contains(record), "{} missing", record.address);
    }
}

#[tokio::test]
async fn hide_flags_do_not_touch_json() {
    let server = MockServer::start().await;
    mount_answer(
        &server,
        "8.8.8.8",
        body("8.8.8.8", &[53], &["dns.google"], &["cdn"]),
        0,
    )
    .await;

    let mut cfg = config_for(&server);
    cfg.hide_hostnames = true;
    cfg.hide_tags = true;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("results.json");
    output::export_json(dispatch(&cfg, &["8.8.8.8"]), &path).await.unwrap();

    let records = read_array(&path);
    assert_eq!(records[0].hostnames, vec!["dns.google"]);
    assert_eq!(records[0].tags, vec!["cdn"]);
}

#[tokio::test]
async fn no_data_means_no_file() {
    let server = MockServer::start().await;
    mount_status(&server, "10.0.0.0", 404).await;
    mount_status(&server, "10.0.0.1", 404).await;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("results.json");
    let summary = output::export_json(dispatch(&config_for(&server), &["10.0.0.0/31"]), &path)
        .await
        .unwrap();

    assert_eq!(summary, RunSummary { received: 2, reported: 0 });
    assert!(!path.exists());
}

#[tokio::test]
async fn cidr_export_contains_each_address_once() {
    let server = MockServer::start().await;
    for i in 0..4 {
        let ip = format!("192.168.7.{i}");
        mount_answer(&server, &ip, body(&ip, &[8080], &[], &[]), (4 - i) * 10).await;
    }

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("results.json");
    output::export_json(dispatch(&config_for(&server), &["192.168.7.0/30"]), &path)
        .await
        .unwrap();

    let addresses: HashSet<String> = read_array(&path).into_iter().map(|r| r.address).collect();
    assert_eq!(addresses.len(), 4);
    assert!(addresses.contains("192.168.7.3"));
}
