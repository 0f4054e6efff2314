use ipintel_core::output::{self, PlainPainter, RunSummary, StreamFormatter};
use wiremock::MockServer;

use crate::util::{body, config_for, dispatch, mount_answer, mount_status};

async fn stream(cfg: &ipintel_common::config::Config, inputs: &[&str]) -> (RunSummary, String) {
    let formatter = StreamFormatter::from_config(cfg, Box::new(PlainPainter));
    let mut sink: Vec<u8> = Vec::new();
    let summary = output::stream_results(dispatch(cfg, inputs), &formatter, &mut sink)
        .await
        .unwrap();
    (summary, String::from_utf8(sink).unwrap())
}

#[tokio::test]
async fn single_address_renders_ports_and_tags() {
    let server = MockServer::start().await;
    mount_answer(&server, "8.8.8.8", body("8.8.8.8", &[53, 443], &[], &["cdn"]), 0).await;

    let (summary, out) = stream(&config_for(&server), &["8.8.8.8"]).await;

    assert_eq!(summary, RunSummary { received: 1, reported: 1 });
    assert_eq!(out, "8.8.8.8\nPorts: 53, 443\nTags: cdn\n\n");
    assert!(!out.contains("CPEs"));
    assert!(!out.contains("Vulnerabilities"));
    assert!(!out.contains("Hostnames"));
}

#[tokio::test]
async fn cidr_block_queries_every_address() {
    let server = MockServer::start().await;
    for ip in ["10.0.0.0", "10.0.0.1", "10.0.0.2", "10.0.0.3"] {
        mount_answer(&server, ip, body(ip, &[22], &[], &[]), 0).await;
    }

    let (summary, out) = stream(&config_for(&server), &["10.0.0.0/30"]).await;

    assert_eq!(summary, RunSummary { received: 4, reported: 4 });
    for ip in ["10.0.0.0", "10.0.0.1", "10.0.0.2", "10.0.0.3"] {
        assert!(out.contains(&format!("{ip}\nPorts: 22\n")), "{ip} missing from output");
    }
    assert_eq!(server.received_requests().await.unwrap().len(), 4);
}

#[tokio::test]
async fn failed_lookups_are_left_out() {
    let server = MockServer::start().await;
    mount_answer(&server, "1.1.1.1", body("1.1.1.1", &[443], &[], &[]), 0).await;
    mount_status(&server, "2.2.2.2", 500).await;
    mount_status(&server, "3.3.3.3", 404).await;

    let (summary, out) = stream(&config_for(&server), &["1.1.1.1", "2.2.2.2", "3.3.3.3"]).await;

    assert_eq!(summary, RunSummary { received: 3, reported: 1 });
    assert_eq!(out, "1.1.1.1\nPorts: 443\n\n");
}

#[tokio::test]
async fn timeout_counts_as_a_failed_lookup() {
    let server = MockServer::start().await;
    mount_answer(&server, "1.1.1.1", body("1.1.1.1", &[80], &[], &[]), 0).await;
    mount_answer(&server, "9.9.9.9", body("9.9.9.9", &[80], &[], &[]), 2_000).await;

    let (summary, out) = stream(&config_for(&server), &["1.1.1.1", "9.9.9.9"]).await;

    assert_eq!(summary.received, 2);
    assert_eq!(summary.reported, 1);
    assert!(!out.contains("9.9.9.9"));
}

#[tokio::test]
async fn hidden_hostnames_stay_out_of_the_stream() {
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
    let (_, out) = stream(&cfg, &["8.8.8.8"]).await;

    assert!(!out.contains("Hostnames"));
    assert!(!out.contains("dns.google"));
    assert!(out.contains("Tags: cdn"));
}

#[tokio::test]
async fn ordered_mode_prints_in_input_order() {
    let server = MockServer::start().await;
    mount_answer(&server, "10.0.0.1", body("10.0.0.1", &[1], &[], &[]), 150).await;
    mount_answer(&server, "10.0.0.2", body("10.0.0.2", &[2], &[], &[]), 75).await;
    mount_answer(&server, "10.0.0.3", body("10.0.0.3", &[3], &[], &[]), 0).await;

    let mut cfg = config_for(&server);
    cfg.ordered = true;
    let (_, out) = stream(&cfg, &["10.0.0.1", "10.0.0.2", "10.0.0.3"]).await;

    assert_eq!(
        out,
        "10.0.0.1\nPorts: 1\n\n10.0.0.2\nPorts: 2\n\n10.0.0.3\nPorts: 3\n\n"
    );
}

#[tokio::test]
async fn concurrency_limit_still_answers_every_target() {
    let server = MockServer::start().await;
    for i in 0..8 {
        let ip = format!("10.1.0.{i}");
        mount_answer(&server, &ip, body(&ip, &[80], &[], &[]), 20).await;
    }

    let mut cfg = config_for(&server);
    cfg.concurrency = Some(2);
    let (summary, _) = stream(&cfg, &["10.1.0.0/29"]).await;

    assert_eq!(summary, RunSummary { received: 8, reported: 8 });
}
