//! Order form and order card operations.

use crate::domain::order::{Order, OrderStatus};
use crate::domain::types::OrderId;
use crate::forms::FormError;
use crate::forms::order::{OrderDraftForm, OrderStatusForm};
use crate::repository::CrmRepository;
use crate::services::{ServiceResult, sync};
use crate::state::CrmStore;

/// Stores the posted fields in the order draft without submitting it.
pub fn save_order_draft(store: &CrmStore, form: OrderDraftForm) -> ServiceResult<()> {
    store.update(|state| state.edit_order_draft(form)).map_err(|err| {
        log::error!("Failed to update order draft: {err}");
        err.into()
    })
}

/// Stores the posted fields in the order draft and submits it.
pub async fn submit_order<R>(
    repo: &R,
    store: &CrmStore,
    form: OrderDraftForm,
) -> ServiceResult<Order>
where
    R: CrmRepository + ?Sized,
{
    save_order_draft(store, form)?;
    sync::create_order(repo, store).await
}

/// Handles the inline status selector of order `order_id`.
pub async fn change_order_status<R>(
    repo: &R,
    store: &CrmStore,
    order_id: i32,
    form: OrderStatusForm,
) -> ServiceResult<Order>
where
    R: CrmRepository + ?Sized,
{
    let id = OrderId::new(order_id).map_err(FormError::from)?;
    let status: OrderStatus = form.status.parse().map_err(FormError::from)?;
    sync::update_order_status(repo, store, id, status).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test::TestRepository;
    use crate::services::ServiceError;

    #[actix_web::test]
    async fn submission_without_lead_is_rejected_locally() {
        let repo = TestRepository::new();
        let store = CrmStore::default();

        let result = submit_order(
            &repo,
            &store,
            OrderDraftForm {
                courier: Some("DHL".to_string()),
                ..Default::default()
            },
        )
        .await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
        assert_eq!(repo.write_count(), 0);
        assert_eq!(store.snapshot().order_draft.courier, "DHL");
    }

    #[actix_web::test]
    async fn status_change_of_unloaded_order_is_aborted() {
        let repo = TestRepository::new();
        let store = CrmStore::default();

        let result = change_order_status(
            &repo,
            &store,
            7,
            OrderStatusForm {
                status: "Dispatched".to_string(),
            },
        )
        .await;

        assert!(matches!(result, Err(ServiceError::NotFound)));
        assert_eq!(repo.write_count(), 0);
    }

    #[actix_web::test]
    async fn non_positive_order_id_is_a_form_error() {
        let repo = TestRepository::new();
        let store = CrmStore::default();

        let result = change_order_status(
            &repo,
            &store,
            0,
            OrderStatusForm {
                status: "Dispatched".to_string(),
            },
        )
        .await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
