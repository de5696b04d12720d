use serde::{Deserialize, Serialize};

use crate::domain::wire::lenient_count;

/// Lead counters computed by the backend.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeadStats {
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_leads: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub new_leads: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub qualified_leads: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub won_leads: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub overdue_followups: u64,
}

/// Order counters computed by the backend.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderStats {
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_orders: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub received_orders: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub in_development: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub ready_to_dispatch: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub dispatched_orders: u64,
}

/// Read-only aggregate snapshot shown on the dashboard tab.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardData {
    #[serde(default)]
    pub leads: LeadStats,
    #[serde(default)]
    pub orders: OrderStats,
}
