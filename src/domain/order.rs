use std::fmt::Display;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::types::{LeadId, OrderId, TypeConstraintError};
use crate::domain::wire::{optional_date, optional_text, optional_timestamp};

/// Position of an order in the fulfillment pipeline.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "Order Received")]
    OrderReceived,
    #[serde(rename = "In Development")]
    InDevelopment,
    #[serde(rename = "Ready to Dispatch")]
    ReadyToDispatch,
    Dispatched,
}

impl OrderStatus {
    /// Every status in fulfillment order.
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::OrderReceived,
        OrderStatus::InDevelopment,
        OrderStatus::ReadyToDispatch,
        OrderStatus::Dispatched,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            OrderStatus::OrderReceived => "Order Received",
            OrderStatus::InDevelopment => "In Development",
            OrderStatus::ReadyToDispatch => "Ready to Dispatch",
            OrderStatus::Dispatched => "Dispatched",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| TypeConstraintError::UnknownStatus(s.to_string()))
    }
}

/// Order record as served by the backend, denormalized with lead details.
///
/// Serializes back to the record as received with only `status` replaced.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Order {
    pub id: OrderId,
    pub lead_id: LeadId,
    pub status: OrderStatus,
    pub dispatch_date: Option<NaiveDate>,
    pub courier: Option<String>,
    pub tracking_number: Option<String>,
    pub lead_name: Option<String>,
    pub company: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    raw: Map<String, Value>,
}

#[derive(Deserialize)]
struct OrderFields {
    id: OrderId,
    lead_id: LeadId,
    status: OrderStatus,
    #[serde(default, deserialize_with = "optional_date::deserialize")]
    dispatch_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "optional_text::deserialize")]
    courier: Option<String>,
    #[serde(default, deserialize_with = "optional_text::deserialize")]
    tracking_number: Option<String>,
    #[serde(default, deserialize_with = "optional_text::deserialize")]
    lead_name: Option<String>,
    #[serde(default, deserialize_with = "optional_text::deserialize")]
    company: Option<String>,
    #[serde(default, deserialize_with = "optional_timestamp::deserialize")]
    created_at: Option<NaiveDateTime>,
}

impl TryFrom<Map<String, Value>> for Order {
    type Error = serde_json::Error;

    fn try_from(raw: Map<String, Value>) -> Result<Self, Self::Error> {
        let fields: OrderFields = serde_json::from_value(Value::Object(raw.clone()))?;
        Ok(Self {
            id: fields.id,
            lead_id: fields.lead_id,
            status: fields.status,
            dispatch_date: fields.dispatch_date,
            courier: fields.courier,
            tracking_number: fields.tracking_number,
            lead_name: fields.lead_name,
            company: fields.company,
            created_at: fields.created_at,
            raw,
        })
    }
}

impl From<Order> for Map<String, Value> {
    fn from(order: Order) -> Self {
        let mut raw = order.raw;
        raw.insert("status".to_string(), Value::from(order.status.as_str()));
        raw
    }
}

impl Order {
    /// Returns a copy of the full record with `status` replaced.
    #[must_use]
    pub fn with_status(&self, status: OrderStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

/// Payload for creating an order from a won lead.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewOrder {
    pub lead_id: LeadId,
    pub status: OrderStatus,
    #[serde(serialize_with = "optional_date::serialize")]
    pub dispatch_date: Option<NaiveDate>,
    pub courier: Option<String>,
    pub tracking_number: Option<String>,
}
