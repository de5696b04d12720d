//! Lead form and lead card operations.

use crate::domain::lead::{Lead, LeadStage};
use crate::domain::types::LeadId;
use crate::forms::FormError;
use crate::forms::lead::{LeadDraftForm, LeadStageForm};
use crate::repository::CrmRepository;
use crate::services::{ServiceResult, sync};
use crate::state::CrmStore;

/// Stores the posted fields in the lead draft without submitting it.
pub fn save_lead_draft(store: &CrmStore, form: LeadDraftForm) -> ServiceResult<()> {
    store.update(|state| state.edit_lead_draft(form)).map_err(|err| {
        log::error!("Failed to update lead draft: {err}");
        err.into()
    })
}

/// Stores the posted fields in the lead draft and submits it.
pub async fn submit_lead<R>(repo: &R, store: &CrmStore, form: LeadDraftForm) -> ServiceResult<Lead>
where
    R: CrmRepository + ?Sized,
{
    save_lead_draft(store, form)?;
    sync::create_lead(repo, store).await
}

/// Handles the inline stage selector of lead `lead_id`.
pub async fn change_lead_stage<R>(
    repo: &R,
    store: &CrmStore,
    lead_id: i32,
    form: LeadStageForm,
) -> ServiceResult<Lead>
where
    R: CrmRepository + ?Sized,
{
    let id = LeadId::new(lead_id).map_err(FormError::from)?;
    let stage: LeadStage = form.stage.parse().map_err(FormError::from)?;
    sync::update_lead_stage(repo, store, id, stage).await
}
