//! Client-side application state and its named transitions.
//!
//! [`CrmState`] holds everything the page is rendered from. The server stays
//! the source of truth: collections are only ever replaced wholesale by
//! [`CrmState::complete_load`] or [`CrmState::replace_collections`], never
//! patched in place.

use std::fmt::Display;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::domain::dashboard::DashboardData;
use crate::domain::lead::Lead;
use crate::domain::order::Order;
use crate::domain::types::{LeadId, OrderId, TypeConstraintError};
use crate::forms::FormError;
use crate::forms::lead::{LeadDraft, LeadDraftForm};
use crate::forms::order::{OrderDraft, OrderDraftForm};

pub mod kanban;

/// Top-level view selected in the navigation bar.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Dashboard,
    Leads,
    Orders,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Dashboard, Tab::Leads, Tab::Orders];

    pub const fn as_str(self) -> &'static str {
        match self {
            Tab::Dashboard => "dashboard",
            Tab::Leads => "leads",
            Tab::Orders => "orders",
        }
    }
}

impl Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.as_str() == s)
            .ok_or_else(|| TypeConstraintError::UnknownTab(s.to_string()))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CrmState {
    pub active_tab: Tab,
    pub leads: Vec<Lead>,
    pub orders: Vec<Order>,
    pub dashboard: DashboardData,
    pub loading: bool,
    pub lead_draft: LeadDraft,
    pub order_draft: OrderDraft,
    /// Ticket of the most recently started load.
    started_load: u64,
    /// Ticket of the load whose data is currently installed.
    applied_load: u64,
}

/// Identifies one `load_all` run, in start order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

impl CrmState {
    pub fn select_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    pub fn begin_loading(&mut self) -> LoadTicket {
        self.started_load += 1;
        self.loading = true;
        LoadTicket(self.started_load)
    }

    /// Ends load `ticket` and keeps whatever data was there before.
    ///
    /// The loading flag stays set while a newer load is still running.
    pub fn finish_loading(&mut self, ticket: LoadTicket) {
        if ticket.0 == self.started_load {
            self.loading = false;
        }
    }

    /// Installs the result of load `ticket` unless data from a newer load is
    /// already in place. Returns whether the snapshot was installed.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        leads: Vec<Lead>,
        orders: Vec<Order>,
        dashboard: DashboardData,
    ) -> bool {
        let fresher = ticket.0 > self.applied_load;
        if fresher {
            self.leads = leads;
            self.orders = orders;
            self.dashboard = dashboard;
            self.applied_load = ticket.0;
        }
        self.finish_loading(ticket);
        fresher
    }

    /// Installs a complete, freshly fetched snapshot of all collections.
    pub fn replace_collections(
        &mut self,
        leads: Vec<Lead>,
        orders: Vec<Order>,
        dashboard: DashboardData,
    ) {
        self.leads = leads;
        self.orders = orders;
        self.dashboard = dashboard;
        self.loading = false;
    }

    pub fn find_lead(&self, id: LeadId) -> Option<&Lead> {
        self.leads.iter().find(|lead| lead.id == id)
    }

    pub fn find_order(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == id)
    }

    /// Applies posted lead fields to the draft; on error the draft is unchanged.
    pub fn edit_lead_draft(&mut self, form: LeadDraftForm) -> Result<(), FormError> {
        self.lead_draft = form.apply(self.lead_draft.clone())?;
        Ok(())
    }

    /// Applies posted order fields to the draft; on error the draft is unchanged.
    pub fn edit_order_draft(&mut self, form: OrderDraftForm) -> Result<(), FormError> {
        self.order_draft = form.apply(self.order_draft.clone())?;
        Ok(())
    }

    pub fn reset_lead_draft(&mut self) {
        self.lead_draft = LeadDraft::default();
    }

    pub fn reset_order_draft(&mut self) {
        self.order_draft = OrderDraft::default();
    }
}

/// Shared, lock-protected [`CrmState`].
///
/// The lock is only ever held for synchronous transitions, never across a
/// backend call.
#[derive(Debug, Default)]
pub struct CrmStore {
    inner: Mutex<CrmState>,
}

impl CrmStore {
    pub fn new(state: CrmState) -> Self {
        Self {
            inner: Mutex::new(state),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CrmState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs a read-only projection over the current state.
    pub fn read<R>(&self, f: impl FnOnce(&CrmState) -> R) -> R {
        f(&self.lock())
    }

    /// Runs a transition against the current state.
    pub fn update<R>(&self, f: impl FnOnce(&mut CrmState) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn snapshot(&self) -> CrmState {
        self.lock().clone()
    }
}
