//! Shared fixtures for integration tests: a wiremock stand-in for the CRM API.
#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use trackflow_crm::models::config::{BuildMode, ServerConfig};
use trackflow_crm::repository::{CrmRepository, HttpRepository};

pub fn jane_doe() -> Value {
    json!({
        "id": 42,
        "name": "Jane Doe",
        "company": "Acme",
        "contact": "jane@x.com",
        "product_interest": "Widget",
        "stage": "New",
        "follow_up_date": "2024-06-01",
        "notes": null,
        "created_at": "2024-05-20T09:30:00.000Z"
    })
}

pub fn dashboard() -> Value {
    json!({
        "leads": {
            "total_leads": "1",
            "new_leads": "1",
            "qualified_leads": "0",
            "won_leads": "0",
            "overdue_followups": "1"
        },
        "orders": {
            "total_orders": "0",
            "received_orders": "0",
            "in_development": "0",
            "ready_to_dispatch": "0",
            "dispatched_orders": "0"
        }
    })
}

/// Serves the three read endpoints with fixed payloads.
pub async fn mount_reads(server: &MockServer, leads: Value, orders: Value, dashboard: Value) {
    Mock::given(method("GET"))
        .and(path("/api/leads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(leads))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(orders))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dashboard))
        .mount(server)
        .await;
}

pub fn repository(server: &MockServer) -> web::Data<dyn CrmRepository> {
    let repo = HttpRepository::new(server.uri()).unwrap();
    let repo: Arc<dyn CrmRepository> = Arc::new(repo);
    web::Data::from(repo)
}

pub fn server_config(server: &MockServer) -> ServerConfig {
    ServerConfig {
        address: "127.0.0.1".to_string(),
        port: 8080,
        templates_dir: "templates/**/*".to_string(),
        secret: "a".repeat(64),
        api_origin: server.uri(),
        public_origin: None,
        build_mode: Some(BuildMode::Development),
        date_format: "%-m/%-d/%Y".to_string(),
    }
}
