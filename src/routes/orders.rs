use actix_web::{Responder, post, web};
use actix_web_flash_messages::FlashMessage;

use crate::forms::order::{OrderDraftForm, OrderStatusForm};
use crate::repository::CrmRepository;
use crate::routes::redirect;
use crate::services::{ServiceError, orders as orders_service};
use crate::state::CrmStore;

#[post("/orders/draft")]
pub async fn save_order_draft(
    store: web::Data<CrmStore>,
    web::Form(form): web::Form<OrderDraftForm>,
) -> impl Responder {
    if let Err(err) = orders_service::save_order_draft(&store, form) {
        FlashMessage::error(format!("Invalid order form: {err}")).send();
    }
    redirect("/")
}

#[post("/orders/add")]
pub async fn add_order(
    store: web::Data<CrmStore>,
    repo: web::Data<dyn CrmRepository>,
    web::Form(form): web::Form<OrderDraftForm>,
) -> impl Responder {
    match orders_service::submit_order(repo.get_ref(), &store, form).await {
        Ok(_) => {
            FlashMessage::success("Order created successfully!").send();
        }
        Err(ServiceError::Form(err)) => {
            FlashMessage::error(format!("Error creating order: {err}")).send();
        }
        Err(_) => {
            FlashMessage::error("Error creating order").send();
        }
    }
    redirect("/")
}

#[post("/orders/{order_id}/status")]
pub async fn change_order_status(
    order_id: web::Path<i32>,
    store: web::Data<CrmStore>,
    repo: web::Data<dyn CrmRepository>,
    web::Form(form): web::Form<OrderStatusForm>,
) -> impl Responder {
    let order_id = order_id.into_inner();
    match orders_service::change_order_status(repo.get_ref(), &store, order_id, form).await {
        Ok(_) | Err(ServiceError::NotFound) => {}
        Err(err) => {
            log::error!("Failed to update order {order_id}: {err}");
            FlashMessage::error("Error updating order").send();
        }
    }
    redirect("/")
}
