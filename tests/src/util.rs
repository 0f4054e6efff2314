use std::sync::Arc;
use std::time::Duration;

use ipintel_common::config::Config;
use ipintel_common::network::target::{self, Target};
use ipintel_core::dispatch::{Aggregation, Dispatcher};
use ipintel_core::lookup::InternetDbClient;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn config_for(server: &MockServer) -> Config {
    Config {
        endpoint: server.uri(),
        timeout: Duration::from_millis(500),
        no_color: true,
        ..Config::default()
    }
}

pub fn body(ip: &str, ports: &[u16], hostnames: &[&str], tags: &[&str]) -> Value {
    json!({
        "cpes": [],
        "hostnames": hostnames,
        "ip": ip,
        "ports": ports,
        "tags": tags,
        "vulns": []
    })
}

/// Answers `GET /<ip>` with `body` after `delay_ms`.
pub async fn mount_answer(server: &MockServer, ip: &str, body: Value, delay_ms: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/{ip}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(body)
                .set_delay(Duration::from_millis(delay_ms)),
        )
        .mount(server)
        .await;
}

pub async fn mount_status(server: &MockServer, ip: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/{ip}")))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

pub fn targets(inputs: &[&str]) -> Vec<Target> {
    target::resolve(inputs.iter().copied()).unwrap()
}

pub fn dispatch(cfg: &Config, inputs: &[&str]) -> Aggregation {
    let client = InternetDbClient::new(cfg).unwrap();
    Dispatcher::from_config(Arc::new(client), cfg).dispatch(targets(inputs))
}
