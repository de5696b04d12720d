use std::sync::Arc;

use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use tera::Tera;

use crate::models::config::ServerConfig;
use crate::repository::{CrmRepository, HttpRepository};
use crate::routes::leads::{add_lead, change_lead_stage, save_lead_draft};
use crate::routes::main::{refresh, select_tab, show_index};
use crate::routes::orders::{add_order, change_order_status, save_order_draft};
use crate::services::sync;
use crate::state::CrmStore;

pub mod domain;
pub mod dto;
pub mod forms;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;

/// Registers every UI route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(show_index)
        .service(select_tab)
        .service(refresh)
        .service(save_lead_draft)
        .service(add_lead)
        .service(change_lead_stage)
        .service(save_order_draft)
        .service(add_order)
        .service(change_order_status);
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let repo = server_config
        .api_base_url()
        .and_then(HttpRepository::new)
        .map_err(|e| std::io::Error::other(format!("Failed to set up backend client: {e}")))?;
    log::info!("Using CRM backend at {}", repo.base_url());

    let repo: Arc<dyn CrmRepository> = Arc::new(repo);
    let repo = web::Data::from(repo);

    let store = web::Data::new(CrmStore::default());

    // Load failures are logged; the page renders empty until a refresh succeeds.
    let _ = sync::load_all(repo.get_ref(), &store).await;

    let secret_key = Key::try_from(server_config.secret.as_bytes())
        .map_err(|e| std::io::Error::other(format!("Invalid secret: {e}")))?;
    let message_store = CookieMessageStore::builder(secret_key).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .configure(configure)
            .app_data(store.clone())
            .app_data(repo.clone())
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
