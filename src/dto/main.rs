//! Render model of the single CRM page.
//!
//! [`PageView::build`] is a pure projection of [`CrmState`]; templates only
//! ever see the structures defined here.

use std::fmt::Write;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::dashboard::DashboardData;
use crate::domain::lead::{Lead, LeadStage};
use crate::domain::order::{Order, OrderStatus};
use crate::forms::lead::LeadDraft;
use crate::forms::order::OrderDraft;
use crate::state::kanban::{Column, lead_columns, order_columns, selectable_leads};
use crate::state::{CrmState, Tab};

#[derive(Debug, Serialize)]
pub struct TabLink {
    pub name: &'static str,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct ColumnView<T> {
    pub title: &'static str,
    pub cards: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct LeadCard {
    pub id: i32,
    pub name: String,
    pub company: Option<String>,
    pub contact: Option<String>,
    pub product_interest: Option<String>,
    /// Follow-up date in display format.
    pub follow_up: Option<String>,
    pub stage: &'static str,
}

#[derive(Debug, Serialize)]
pub struct OrderCard {
    pub id: i32,
    pub title: String,
    pub lead_name: Option<String>,
    pub company: Option<String>,
    pub created: Option<String>,
    pub dispatch_date: Option<String>,
    pub courier: Option<String>,
    pub tracking_number: Option<String>,
    pub status: &'static str,
}

/// Entry of the order form's lead selector.
#[derive(Debug, Serialize, PartialEq)]
pub struct LeadOption {
    pub id: i32,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct LeadsView {
    pub draft: LeadDraft,
    pub stages: Vec<&'static str>,
    pub columns: Vec<ColumnView<LeadCard>>,
}

#[derive(Debug, Serialize)]
pub struct OrdersView {
    pub draft: OrderDraft,
    pub statuses: Vec<&'static str>,
    pub lead_options: Vec<LeadOption>,
    pub sections: Vec<ColumnView<OrderCard>>,
}

/// Everything the index template renders.
#[derive(Debug, Serialize)]
pub struct PageView {
    pub active_tab: Tab,
    pub tabs: Vec<TabLink>,
    pub loading: bool,
    pub dashboard: DashboardData,
    pub leads: LeadsView,
    pub orders: OrdersView,
}

fn format_date(date: NaiveDate, date_format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(date_format)).is_err() {
        return date.to_string();
    }
    out
}

fn tab_label(tab: Tab) -> &'static str {
    match tab {
        Tab::Dashboard => "Dashboard",
        Tab::Leads => "Leads",
        Tab::Orders => "Orders",
    }
}

fn lead_card(lead: &Lead, date_format: &str) -> LeadCard {
    LeadCard {
        id: lead.id.get(),
        name: lead.name.clone(),
        company: lead.company.clone(),
        contact: lead.contact.clone(),
        product_interest: lead.product_interest.clone(),
        follow_up: lead.follow_up_date.map(|d| format_date(d, date_format)),
        stage: lead.stage.as_str(),
    }
}

fn order_card(order: &Order, date_format: &str) -> OrderCard {
    OrderCard {
        id: order.id.get(),
        title: format!("Order #{}", order.id),
        lead_name: order.lead_name.clone(),
        company: order.company.clone(),
        created: order
            .created_at
            .map(|ts: NaiveDateTime| format_date(ts.date(), date_format)),
        dispatch_date: order.dispatch_date.map(|d| format_date(d, date_format)),
        courier: order.courier.clone(),
        tracking_number: order.tracking_number.clone(),
        status: order.status.as_str(),
    }
}

fn lead_option(lead: &Lead) -> LeadOption {
    let label = match &lead.company {
        Some(company) => format!("{} - {company}", lead.name),
        None => lead.name.clone(),
    };
    LeadOption {
        id: lead.id.get(),
        label,
    }
}

fn column_views<K, T, C>(
    columns: Vec<Column<'_, K, T>>,
    title: impl Fn(K) -> &'static str,
    card: impl Fn(&T) -> C,
) -> Vec<ColumnView<C>> {
    columns
        .into_iter()
        .map(|column| ColumnView {
            title: title(column.key),
            cards: column.items.into_iter().map(&card).collect(),
        })
        .collect()
}

impl PageView {
    pub fn build(state: &CrmState, date_format: &str) -> Self {
        let tabs = Tab::ALL
            .into_iter()
            .map(|tab| TabLink {
                name: tab.as_str(),
                label: tab_label(tab),
                active: tab == state.active_tab,
            })
            .collect();

        let leads = LeadsView {
            draft: state.lead_draft.clone(),
            stages: LeadStage::ALL.iter().map(|s| s.as_str()).collect(),
            columns: column_views(lead_columns(&state.leads), LeadStage::as_str, |lead| {
                lead_card(lead, date_format)
            }),
        };

        let orders = OrdersView {
            draft: state.order_draft.clone(),
            statuses: OrderStatus::ALL.iter().map(|s| s.as_str()).collect(),
            lead_options: selectable_leads(&state.leads)
                .into_iter()
                .map(lead_option)
                .collect(),
            sections: column_views(order_columns(&state.orders), OrderStatus::as_str, |order| {
                order_card(order, date_format)
            }),
        };

        Self {
            active_tab: state.active_tab,
            tabs,
            loading: state.loading,
            dashboard: state.dashboard.clone(),
            leads,
            orders,
        }
    }
}
