use crate::dto::main::PageView;
use crate::forms::FormError;
use crate::repository::CrmRepository;
use crate::services::{ServiceResult, sync};
use crate::state::{CrmStore, Tab};

/// Projects the current state into the index page render model.
pub fn load_index_page(store: &CrmStore, date_format: &str) -> PageView {
    store.read(|state| PageView::build(state, date_format))
}

/// Switches the visible view. Purely local: the backend is not contacted.
pub fn select_tab(store: &CrmStore, tab: &str) -> ServiceResult<Tab> {
    let tab: Tab = tab.parse().map_err(|err| {
        log::error!("Failed to select tab: {err}");
        FormError::from(err)
    })?;
    store.update(|state| state.select_tab(tab));
    Ok(tab)
}

/// Reloads every collection on user request.
pub async fn refresh<R>(repo: &R, store: &CrmStore) -> ServiceResult<()>
where
    R: CrmRepository + ?Sized,
{
    sync::load_all(repo, store).await
}
