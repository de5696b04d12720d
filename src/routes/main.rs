use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::models::config::ServerConfig;
use crate::repository::CrmRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::main as main_service;
use crate::state::CrmStore;

#[get("/")]
pub async fn show_index(
    store: web::Data<CrmStore>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let page = main_service::load_index_page(&store, &server_config.date_format);

    let mut context = base_context(&flash_messages, page.active_tab.as_str());
    context.insert("page", &page);

    render_template(&tera, "main/index.html", &context)
}

#[post("/tab/{tab}")]
pub async fn select_tab(tab: web::Path<String>, store: web::Data<CrmStore>) -> impl Responder {
    if main_service::select_tab(&store, &tab).is_err() {
        FlashMessage::error(format!("Unknown view: {tab}")).send();
    }
    redirect("/")
}

/// Reload failures are only logged.
#[post("/refresh")]
pub async fn refresh(
    store: web::Data<CrmStore>,
    repo: web::Data<dyn CrmRepository>,
) -> impl Responder {
    let _ = main_service::refresh(repo.get_ref(), &store).await;
    redirect("/")
}
