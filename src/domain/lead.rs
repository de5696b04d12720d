use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::types::{LeadId, TypeConstraintError};
use crate::domain::wire::{optional_date, optional_text};

/// Position of a lead in the sales pipeline.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum LeadStage {
    #[default]
    New,
    Contacted,
    Qualified,
    #[serde(rename = "Proposal Sent")]
    ProposalSent,
    Won,
    Lost,
}

impl LeadStage {
    /// Every stage in pipeline order.
    pub const ALL: [LeadStage; 6] = [
        LeadStage::New,
        LeadStage::Contacted,
        LeadStage::Qualified,
        LeadStage::ProposalSent,
        LeadStage::Won,
        LeadStage::Lost,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            LeadStage::New => "New",
            LeadStage::Contacted => "Contacted",
            LeadStage::Qualified => "Qualified",
            LeadStage::ProposalSent => "Proposal Sent",
            LeadStage::Won => "Won",
            LeadStage::Lost => "Lost",
        }
    }
}

impl Display for LeadStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStage {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeadStage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s.trim())
            .ok_or_else(|| TypeConstraintError::UnknownStage(s.to_string()))
    }
}

/// Lead record as served by the backend.
///
/// The typed fields are read from the record; serializing writes back the
/// record exactly as received, with only `stage` replaced. Full-record
/// updates therefore echo every backend value, including the ones the client
/// does not model.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Lead {
    pub id: LeadId,
    pub name: String,
    pub contact: Option<String>,
    pub company: Option<String>,
    pub product_interest: Option<String>,
    pub stage: LeadStage,
    pub follow_up_date: Option<NaiveDate>,
    pub notes: Option<String>,
    raw: Map<String, Value>,
}

#[derive(Deserialize)]
struct LeadFields {
    id: LeadId,
    name: String,
    #[serde(default, deserialize_with = "optional_text::deserialize")]
    contact: Option<String>,
    #[serde(default, deserialize_with = "optional_text::deserialize")]
    company: Option<String>,
    #[serde(default, deserialize_with = "optional_text::deserialize")]
    product_interest: Option<String>,
    stage: LeadStage,
    #[serde(default, deserialize_with = "optional_date::deserialize")]
    follow_up_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "optional_text::deserialize")]
    notes: Option<String>,
}

impl TryFrom<Map<String, Value>> for Lead {
    type Error = serde_json::Error;

    fn try_from(raw: Map<String, Value>) -> Result<Self, Self::Error> {
        let fields: LeadFields = serde_json::from_value(Value::Object(raw.clone()))?;
        Ok(Self {
            id: fields.id,
            name: fields.name,
            contact: fields.contact,
            company: fields.company,
            product_interest: fields.product_interest,
            stage: fields.stage,
            follow_up_date: fields.follow_up_date,
            notes: fields.notes,
            raw,
        })
    }
}

impl From<Lead> for Map<String, Value> {
    fn from(lead: Lead) -> Self {
        let mut raw = lead.raw;
        raw.insert("stage".to_string(), Value::from(lead.stage.as_str()));
        raw
    }
}

impl Lead {
    /// Returns a copy of the full record with `stage` replaced.
    #[must_use]
    pub fn with_stage(&self, stage: LeadStage) -> Self {
        Self {
            stage,
            ..self.clone()
        }
    }
}

/// Payload for creating a lead; the id is assigned by the backend.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewLead {
    pub name: String,
    pub contact: Option<String>,
    pub company: Option<String>,
    pub product_interest: Option<String>,
    pub stage: LeadStage,
    #[serde(serialize_with = "optional_date::serialize")]
    pub follow_up_date: Option<NaiveDate>,
    pub notes: Option<String>,
}
