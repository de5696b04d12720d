use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::lead::{LeadStage, NewLead};
use crate::domain::wire::parse_date;
use crate::forms::{FormError, clean_text, non_blank, required};

/// In-progress input of the "Add New Lead" form.
///
/// Mirrors the input controls one-to-one, so text fields stay raw strings
/// until the draft is submitted.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Validate)]
pub struct LeadDraft {
    #[validate(custom(function = "non_blank"))]
    pub name: String,
    pub contact: String,
    pub company: String,
    pub product_interest: String,
    pub stage: LeadStage,
    pub follow_up_date: String,
    pub notes: String,
}

/// Input control of the lead form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeadField {
    Name,
    Contact,
    Company,
    ProductInterest,
    Stage,
    FollowUpDate,
    Notes,
}

impl FromStr for LeadField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(LeadField::Name),
            "contact" => Ok(LeadField::Contact),
            "company" => Ok(LeadField::Company),
            "product_interest" => Ok(LeadField::ProductInterest),
            "stage" => Ok(LeadField::Stage),
            "follow_up_date" => Ok(LeadField::FollowUpDate),
            "notes" => Ok(LeadField::Notes),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }
}

impl LeadDraft {
    /// Returns the draft with one field replaced and every other field kept.
    pub fn with_field(self, field: LeadField, value: &str) -> Result<Self, FormError> {
        let value = value.to_string();
        Ok(match field {
            LeadField::Name => Self { name: value, ..self },
            LeadField::Contact => Self {
                contact: value,
                ..self
            },
            LeadField::Company => Self {
                company: value,
                ..self
            },
            LeadField::ProductInterest => Self {
                product_interest: value,
                ..self
            },
            LeadField::Stage => Self {
                stage: value.parse()?,
                ..self
            },
            LeadField::FollowUpDate => Self {
                follow_up_date: value,
                ..self
            },
            LeadField::Notes => Self {
                notes: value,
                ..self
            },
        })
    }
}

impl TryFrom<&LeadDraft> for NewLead {
    type Error = FormError;

    fn try_from(draft: &LeadDraft) -> Result<Self, Self::Error> {
        draft.validate()?;
        let name = clean_text(&draft.name).ok_or_else(|| required("name"))?;

        let follow_up_date = match draft.follow_up_date.trim() {
            "" => None,
            raw => Some(parse_date(raw).ok_or_else(|| FormError::InvalidDate(raw.to_string()))?),
        };

        Ok(NewLead {
            name,
            contact: clean_text(&draft.contact),
            company: clean_text(&draft.company),
            product_interest: clean_text(&draft.product_interest),
            stage: draft.stage,
            follow_up_date,
            notes: clean_text(&draft.notes),
        })
    }
}

/// Posted lead form; absent fields leave the draft untouched.
#[derive(Debug, Default, Deserialize)]
pub struct LeadDraftForm {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub company: Option<String>,
    pub product_interest: Option<String>,
    pub stage: Option<String>,
    pub follow_up_date: Option<String>,
    pub notes: Option<String>,
}

impl LeadDraftForm {
    /// Applies every posted field to `draft`, one `with_field` at a time.
    pub fn apply(self, draft: LeadDraft) -> Result<LeadDraft, FormError> {
        [
            (LeadField::Name, self.name),
            (LeadField::Contact, self.contact),
            (LeadField::Company, self.company),
            (LeadField::ProductInterest, self.product_interest),
            (LeadField::Stage, self.stage),
            (LeadField::FollowUpDate, self.follow_up_date),
            (LeadField::Notes, self.notes),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|value| (field, value)))
        .try_fold(draft, |draft, (field, value)| draft.with_field(field, &value))
    }
}

/// Inline stage selector on a lead card.
#[derive(Debug, Deserialize)]
pub struct LeadStageForm {
    pub stage: String,
}
