//! Write-then-invalidate synchronization with the backend.
//!
//! Every successful write is followed by a full [`load_all`]; local copies are
//! never patched with the records the backend echoes back.

use crate::domain::lead::{Lead, LeadStage, NewLead};
use crate::domain::order::{NewOrder, Order, OrderStatus};
use crate::domain::types::{LeadId, OrderId};
use crate::repository::{CrmRepository, DashboardReader, LeadReader, OrderReader};
use crate::services::{ServiceError, ServiceResult};
use crate::state::{CrmState, CrmStore};

/// Fetches leads, orders and the dashboard concurrently and installs them
/// together.
///
/// The three requests fail as a unit: if any of them fails nothing is
/// replaced and the previously loaded data stays visible. When loads overlap,
/// a slower older load never replaces data installed by a newer one.
pub async fn load_all<R>(repo: &R, store: &CrmStore) -> ServiceResult<()>
where
    R: LeadReader + OrderReader + DashboardReader + ?Sized,
{
    let ticket = store.update(CrmState::begin_loading);

    let fetched = futures::try_join!(repo.list_leads(), repo.list_orders(), repo.get_dashboard());

    match fetched {
        Ok((leads, orders, dashboard)) => {
            log::debug!("Loaded {} leads and {} orders", leads.len(), orders.len());
            let installed =
                store.update(|state| state.complete_load(ticket, leads, orders, dashboard));
            if !installed {
                log::debug!("Discarded results of a load overtaken by a newer one");
            }
            Ok(())
        }
        Err(err) => {
            log::error!("Error fetching data: {err}");
            store.update(|state| state.finish_loading(ticket));
            Err(err.into())
        }
    }
}

/// Reloads after a write that already succeeded; a failure here only leaves
/// the view stale.
async fn reload_after_write<R>(repo: &R, store: &CrmStore)
where
    R: CrmRepository + ?Sized,
{
    if load_all(repo, store).await.is_err() {
        log::warn!("Write succeeded but the reload failed; showing stale data");
    }
}

/// Submits the current lead draft.
///
/// On success the draft is reset and everything is reloaded. On failure the
/// draft is left exactly as the user typed it.
pub async fn create_lead<R>(repo: &R, store: &CrmStore) -> ServiceResult<Lead>
where
    R: CrmRepository + ?Sized,
{
    let draft = store.read(|state| state.lead_draft.clone());

    let new_lead = NewLead::try_from(&draft).map_err(|err| {
        log::error!("Failed to validate lead form: {err}");
        err
    })?;

    let created = repo.create_lead(&new_lead).await.map_err(|err| {
        log::error!("Error adding lead: {err}");
        err
    })?;
    log::info!("Created lead {}", created.id);

    store.update(CrmState::reset_lead_draft);
    reload_after_write(repo, store).await;

    Ok(created)
}

/// Submits the current order draft. Same contract as [`create_lead`].
pub async fn create_order<R>(repo: &R, store: &CrmStore) -> ServiceResult<Order>
where
    R: CrmRepository + ?Sized,
{
    let draft = store.read(|state| state.order_draft.clone());

    let new_order = NewOrder::try_from(&draft).map_err(|err| {
        log::error!("Failed to validate order form: {err}");
        err
    })?;

    let created = repo.create_order(&new_order).await.map_err(|err| {
        log::error!("Error creating order: {err}");
        err
    })?;
    log::info!("Created order {} for lead {}", created.id, created.lead_id);

    store.update(CrmState::reset_order_draft);
    reload_after_write(repo, store).await;

    Ok(created)
}

/// Sends the full loaded record of lead `id` with `stage` replaced.
///
/// A lead that is not in the loaded collection is never sent.
pub async fn update_lead_stage<R>(
    repo: &R,
    store: &CrmStore,
    id: LeadId,
    stage: LeadStage,
) -> ServiceResult<Lead>
where
    R: CrmRepository + ?Sized,
{
    let Some(lead) = store.read(|state| state.find_lead(id).cloned()) else {
        log::error!("Lead {id} is not loaded; stage update aborted");
        return Err(ServiceError::NotFound);
    };

    let updated = repo
        .update_lead(&lead.with_stage(stage))
        .await
        .map_err(|err| {
            log::error!("Error updating lead: {err}");
            err
        })?;

    reload_after_write(repo, store).await;

    Ok(updated)
}

/// Sends the full loaded record of order `id` with `status` replaced.
pub async fn update_order_status<R>(
    repo: &R,
    store: &CrmStore,
    id: OrderId,
    status: OrderStatus,
) -> ServiceResult<Order>
where
    R: CrmRepository + ?Sized,
{
    let Some(order) = store.read(|state| state.find_order(id).cloned()) else {
        log::error!("Order {id} is not loaded; status update aborted");
        return Err(ServiceError::NotFound);
    };

    let updated = repo
        .update_order(&order.with_status(status))
        .await
        .map_err(|err| {
            log::error!("Error updating order: {err}");
            err
        })?;

    reload_after_write(repo, store).await;

    Ok(updated)
}
