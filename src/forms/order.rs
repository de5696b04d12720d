use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::order::{NewOrder, OrderStatus};
use crate::domain::types::LeadId;
use crate::domain::wire::parse_date;
use crate::forms::{FormError, clean_text, non_blank};

/// In-progress input of the "Create New Order" form.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Validate)]
pub struct OrderDraft {
    /// Selected lead id as submitted by the selector, empty when unselected.
    #[validate(custom(function = "non_blank"))]
    pub lead_id: String,
    pub status: OrderStatus,
    pub dispatch_date: String,
    pub courier: String,
    pub tracking_number: String,
}

/// Input control of the order form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderField {
    LeadId,
    Status,
    DispatchDate,
    Courier,
    TrackingNumber,
}

impl FromStr for OrderField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lead_id" => Ok(OrderField::LeadId),
            "status" => Ok(OrderField::Status),
            "dispatch_date" => Ok(OrderField::DispatchDate),
            "courier" => Ok(OrderField::Courier),
            "tracking_number" => Ok(OrderField::TrackingNumber),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }
}

impl OrderDraft {
    /// Returns the draft with one field replaced and every other field kept.
    pub fn with_field(self, field: OrderField, value: &str) -> Result<Self, FormError> {
        let value = value.to_string();
        Ok(match field {
            OrderField::LeadId => Self {
                lead_id: value,
                ..self
            },
            OrderField::Status => Self {
                status: value.parse()?,
                ..self
            },
            OrderField::DispatchDate => Self {
                dispatch_date: value,
                ..self
            },
            OrderField::Courier => Self {
                courier: value,
                ..self
            },
            OrderField::TrackingNumber => Self {
                tracking_number: value,
                ..self
            },
        })
    }
}

impl TryFrom<&OrderDraft> for NewOrder {
    type Error = FormError;

    fn try_from(draft: &OrderDraft) -> Result<Self, Self::Error> {
        draft.validate()?;

        let raw_id = draft.lead_id.trim();
        let lead_id = raw_id
            .parse::<i32>()
            .ok()
            .and_then(|id| LeadId::new(id).ok())
            .ok_or_else(|| FormError::InvalidLeadId(raw_id.to_string()))?;

        let dispatch_date = match draft.dispatch_date.trim() {
            "" => None,
            raw => Some(parse_date(raw).ok_or_else(|| FormError::InvalidDate(raw.to_string()))?),
        };

        Ok(NewOrder {
            lead_id,
            status: draft.status,
            dispatch_date,
            courier: clean_text(&draft.courier),
            tracking_number: clean_text(&draft.tracking_number),
        })
    }
}

/// Posted order form; absent fields leave the draft untouched.
#[derive(Debug, Default, Deserialize)]
pub struct OrderDraftForm {
    pub lead_id: Option<String>,
    pub status: Option<String>,
    pub dispatch_date: Option<String>,
    pub courier: Option<String>,
    pub tracking_number: Option<String>,
}

impl OrderDraftForm {
    /// Applies every posted field to `draft`, one `with_field` at a time.
    pub fn apply(self, draft: OrderDraft) -> Result<OrderDraft, FormError> {
        [
            (OrderField::LeadId, self.lead_id),
            (OrderField::Status, self.status),
            (OrderField::DispatchDate, self.dispatch_date),
            (OrderField::Courier, self.courier),
            (OrderField::TrackingNumber, self.tracking_number),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|value| (field, value)))
        .try_fold(draft, |draft, (field, value)| draft.with_field(field, &value))
    }
}

/// Inline status selector on an order card.
#[derive(Debug, Deserialize)]
pub struct OrderStatusForm {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_draft_matches_empty_form() {
        let draft = OrderDraft::default();
        assert_eq!(draft.lead_id, "");
        assert_eq!(draft.status, OrderStatus::OrderReceived);
        assert_eq!(draft.courier, "");
    }

    #[test]
    fn with_field_replaces_only_the_named_field() {
        let draft = OrderDraft::default()
            .with_field(OrderField::LeadId, "42")
            .unwrap()
            .with_field(OrderField::Courier, "DHL")
            .unwrap();

        assert_eq!(draft.lead_id, "42");
        assert_eq!(draft.courier, "DHL");
        assert_eq!(draft.status, OrderStatus::OrderReceived);
        assert_eq!(draft.tracking_number, "");
    }

    #[test]
    fn missing_lead_selection_is_rejected() {
        let result = NewOrder::try_from(&OrderDraft::default());
        assert!(matches!(result, Err(FormError::Validation(_))));
    }

    #[test]
    fn non_numeric_lead_id_is_rejected() {
        let draft = OrderDraft {
            lead_id: "abc".to_string(),
            ..OrderDraft::default()
        };
        assert!(matches!(
            NewOrder::try_from(&draft),
            Err(FormError::InvalidLeadId(_))
        ));
    }

    #[test]
    fn form_apply_then_convert() {
        let form = OrderDraftForm {
            lead_id: Some("42".to_string()),
            status: Some("In Development".to_string()),
            ..Default::default()
        };

        let draft = form.apply(OrderDraft::default()).unwrap();
        let new_order = NewOrder::try_from(&draft).unwrap();

        assert_eq!(new_order.lead_id.get(), 42);
        assert_eq!(new_order.status, OrderStatus::InDevelopment);
        assert_eq!(new_order.dispatch_date, None);
        assert_eq!(new_order.courier, None);
    }
}
