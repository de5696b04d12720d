use actix_web::cookie::Key;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use actix_web_flash_messages::storage::CookieMessageStore;
use actix_web_flash_messages::{FlashMessagesFramework, Level};
use serde_json::json;
use tera::Tera;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use trackflow_crm::domain::lead::LeadStage;
use trackflow_crm::routes::alert_level_to_str;
use trackflow_crm::services::sync;
use trackflow_crm::state::{CrmStore, Tab};

mod common;

macro_rules! test_app {
    ($server:expr, $store:expr) => {{
        let message_store = CookieMessageStore::builder(Key::generate()).build();
        let tera = Tera::new("templates/**/*").unwrap();
        test::init_service(
            App::new()
                .wrap(FlashMessagesFramework::builder(message_store).build())
                .configure(trackflow_crm::configure)
                .app_data($store.clone())
                .app_data(common::repository($server))
                .app_data(web::Data::new(tera))
                .app_data(web::Data::new(common::server_config($server))),
        )
        .await
    }};
}

async fn loaded_store(server: &MockServer) -> web::Data<CrmStore> {
    let store = web::Data::new(CrmStore::default());
    let repo = common::repository(server);
    sync::load_all(repo.get_ref(), &store).await.unwrap();
    store
}

#[::core::prelude::v1::test]
fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

#[actix_web::test]
async fn index_renders_dashboard_by_default() {
    let server = MockServer::start().await;
    common::mount_reads(&server, json!([common::jane_doe()]), json!([]), common::dashboard()).await;
    let store = loaded_store(&server).await;
    let app = test_app!(&server, store);

    let req = test::TestRequest::get().uri("/").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let body = String::from_utf8(body.to_vec()).unwrap();

    assert!(body.contains("TrackFlow CRM"));
    assert!(body.contains("Overdue Follow-ups: 1"));
    assert!(!body.contains("Lead Management"));
}

#[actix_web::test]
async fn tab_selection_redirects_without_backend_calls() {
    let server = MockServer::start().await;
    let store = web::Data::new(CrmStore::default());
    let app = test_app!(&server, store);

    let req = test::TestRequest::post().uri("/tab/leads").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");
    assert_eq!(store.read(|state| state.active_tab), Tab::Leads);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[actix_web::test]
async fn unknown_tab_leaves_view_unchanged() {
    let server = MockServer::start().await;
    let store = web::Data::new(CrmStore::default());
    let app = test_app!(&server, store);

    let req = test::TestRequest::post().uri("/tab/reports").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(store.read(|state| state.active_tab), Tab::Dashboard);
}

#[actix_web::test]
async fn leads_tab_shows_kanban_with_local_date() {
    let server = MockServer::start().await;
    common::mount_reads(&server, json!([common::jane_doe()]), json!([]), common::dashboard()).await;
    let store = loaded_store(&server).await;
    store.update(|state| state.select_tab(Tab::Leads));
    let app = test_app!(&server, store);

    let req = test::TestRequest::get().uri("/").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let body = String::from_utf8(body.to_vec()).unwrap();

    assert!(body.contains("Lead Management"));
    assert!(body.contains("Jane Doe"));
    assert!(body.contains("Follow-up: 6/1/2024"));
    assert!(body.contains("action=\"/leads/42/stage\""));
}

#[actix_web::test]
async fn adding_a_lead_posts_draft_and_reloads() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/leads"))
        .and(body_partial_json(json!({
            "name": "Jane Doe",
            "company": "Acme",
            "stage": "New",
            "follow_up_date": "2024-06-01",
            "notes": null
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(common::jane_doe()))
        .expect(1)
        .mount(&server)
        .await;
    common::mount_reads(&server, json!([common::jane_doe()]), json!([]), common::dashboard()).await;
    let store = web::Data::new(CrmStore::default());
    let app = test_app!(&server, store);

    let req = test::TestRequest::post()
        .uri("/leads/add")
        .set_form([
            ("name", "Jane Doe"),
            ("contact", "jane@x.com"),
            ("company", "Acme"),
            ("product_interest", "Widget"),
            ("stage", "New"),
            ("follow_up_date", "2024-06-01"),
            ("notes", ""),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let (leads, draft_name) =
        store.read(|state| (state.leads.clone(), state.lead_draft.name.clone()));
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].id.get(), 42);
    assert!(draft_name.is_empty());
}

#[actix_web::test]
async fn rejected_lead_keeps_the_draft() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/leads"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    let store = web::Data::new(CrmStore::default());
    let app = test_app!(&server, store);

    let req = test::TestRequest::post()
        .uri("/leads/add")
        .set_form([("name", "Jane Doe"), ("company", "Acme")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(store.read(|state| state.lead_draft.name.clone()), "Jane Doe");
    assert_eq!(store.read(|state| state.lead_draft.company.clone()), "Acme");
}

#[actix_web::test]
async fn save_draft_does_not_contact_backend() {
    let server = MockServer::start().await;
    let store = web::Data::new(CrmStore::default());
    let app = test_app!(&server, store);

    let req = test::TestRequest::post()
        .uri("/orders/draft")
        .set_form([("courier", "DHL")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(store.read(|state| state.order_draft.courier.clone()), "DHL");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[actix_web::test]
async fn stage_change_puts_full_record() {
    let server = MockServer::start().await;
    common::mount_reads(&server, json!([common::jane_doe()]), json!([]), common::dashboard()).await;
    let store = loaded_store(&server).await;

    let mut won = common::jane_doe();
    won["stage"] = json!("Won");
    Mock::given(method("PUT"))
        .and(path("/api/leads/42"))
        .and(body_partial_json(json!({
            "id": 42,
            "stage": "Won",
            "contact": "jane@x.com",
            "created_at": "2024-05-20T09:30:00.000Z"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(won))
        .expect(1)
        .mount(&server)
        .await;
    let app = test_app!(&server, store);

    let req = test::TestRequest::post()
        .uri("/leads/42/stage")
        .set_form([("stage", "Won")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
}

#[actix_web::test]
async fn stage_change_for_unknown_lead_sends_nothing() {
    let server = MockServer::start().await;
    common::mount_reads(&server, json!([common::jane_doe()]), json!([]), common::dashboard()).await;
    let store = loaded_store(&server).await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let app = test_app!(&server, store);

    let req = test::TestRequest::post()
        .uri("/leads/99/stage")
        .set_form([("stage", "Won")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let stage = store.read(|state| state.leads[0].stage);
    assert_eq!(stage, LeadStage::New);
}

#[actix_web::test]
async fn refresh_keeps_stale_data_when_dashboard_fails() {
    let server = MockServer::start().await;
    common::mount_reads(&server, json!([common::jane_doe()]), json!([]), common::dashboard()).await;
    let store = loaded_store(&server).await;
    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/api/leads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let app = test_app!(&server, store);

    let req = test::TestRequest::post().uri("/refresh").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let (leads, loading) = store.read(|state| (state.leads.len(), state.loading));
    assert_eq!(leads, 1);
    assert!(!loading);
}
