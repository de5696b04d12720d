//! Kanban grouping of records into fixed, ordered columns.

use crate::domain::lead::{Lead, LeadStage};
use crate::domain::order::{Order, OrderStatus};

/// One column: a key and the records carrying it, in collection order.
#[derive(Debug, PartialEq)]
pub struct Column<'a, K, T> {
    pub key: K,
    pub items: Vec<&'a T>,
}

/// Partitions `items` into one column per key of `keys`, in key order.
///
/// Records whose key is not listed are left out; with an exhaustive `keys`
/// the columns together hold every record exactly once.
pub fn group_by<'a, K, T, F>(items: &'a [T], keys: &[K], key_of: F) -> Vec<Column<'a, K, T>>
where
    K: Copy + PartialEq,
    F: Fn(&T) -> K,
{
    keys.iter()
        .map(|&key| Column {
            key,
            items: items.iter().filter(|item| key_of(*item) == key).collect(),
        })
        .collect()
}

pub fn lead_columns(leads: &[Lead]) -> Vec<Column<'_, LeadStage, Lead>> {
    group_by(leads, &LeadStage::ALL, |lead| lead.stage)
}

pub fn order_columns(orders: &[Order]) -> Vec<Column<'_, OrderStatus, Order>> {
    group_by(orders, &OrderStatus::ALL, |order| order.status)
}

/// Leads that may be picked in the order form.
pub fn selectable_leads(leads: &[Lead]) -> Vec<&Lead> {
    leads
        .iter()
        .filter(|lead| lead.stage == LeadStage::Won)
        .collect()
}
