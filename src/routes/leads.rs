use actix_web::{Responder, post, web};
use actix_web_flash_messages::FlashMessage;

use crate::forms::lead::{LeadDraftForm, LeadStageForm};
use crate::repository::CrmRepository;
use crate::routes::redirect;
use crate::services::{ServiceError, leads as leads_service};
use crate::state::CrmStore;

#[post("/leads/draft")]
pub async fn save_lead_draft(
    store: web::Data<CrmStore>,
    web::Form(form): web::Form<LeadDraftForm>,
) -> impl Responder {
    if let Err(err) = leads_service::save_lead_draft(&store, form) {
        FlashMessage::error(format!("Invalid lead form: {err}")).send();
    }
    redirect("/")
}

#[post("/leads/add")]
pub async fn add_lead(
    store: web::Data<CrmStore>,
    repo: web::Data<dyn CrmRepository>,
    web::Form(form): web::Form<LeadDraftForm>,
) -> impl Responder {
    match leads_service::submit_lead(repo.get_ref(), &store, form).await {
        Ok(_) => {
            FlashMessage::success("Lead added successfully!").send();
        }
        Err(ServiceError::Form(err)) => {
            FlashMessage::error(format!("Error adding lead: {err}")).send();
        }
        Err(_) => {
            FlashMessage::error("Error adding lead").send();
        }
    }
    redirect("/")
}

#[post("/leads/{lead_id}/stage")]
pub async fn change_lead_stage(
    lead_id: web::Path<i32>,
    store: web::Data<CrmStore>,
    repo: web::Data<dyn CrmRepository>,
    web::Form(form): web::Form<LeadStageForm>,
) -> impl Responder {
    let lead_id = lead_id.into_inner();
    match leads_service::change_lead_stage(repo.get_ref(), &store, lead_id, form).await {
        // Unknown ids are logged by the sync layer and never reach the backend.
        Ok(_) | Err(ServiceError::NotFound) => {}
        Err(err) => {
            log::error!("Failed to update lead {lead_id}: {err}");
            FlashMessage::error("Error updating lead").send();
        }
    }
    redirect("/")
}
