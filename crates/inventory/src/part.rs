use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Entity, PartId};

/// A spare-parts catalog entry.
///
/// `current_qty` is the authoritative stock level. It only moves through an
/// audited adjustment, or through an explicit administrative edit of the whole
/// record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub id: PartId,
    pub part_number: String,
    pub description: String,
    pub machine_type: String,
    pub supplier: String,
    pub min_qty: i64,
    pub current_qty: i64,
    pub location: String,
}

impl Part {
    /// Build a stored part from a validated draft and its assigned id.
    pub fn from_draft(id: PartId, draft: PartDraft) -> Self {
        Self {
            id,
            part_number: draft.part_number,
            description: draft.description,
            machine_type: draft.machine_type,
            supplier: draft.supplier,
            min_qty: draft.min_qty,
            current_qty: draft.current_qty,
            location: draft.location,
        }
    }

    /// Stock on hand is below the configured minimum.
    pub fn is_low_stock(&self) -> bool {
        self.current_qty < self.min_qty
    }
}

impl Entity for Part {
    type Id = PartId;

    fn id(&self) -> PartId {
        self.id
    }

    fn business_key(&self) -> &str {
        &self.part_number
    }
}

/// Every user-editable attribute of a part, used for both insert and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartDraft {
    pub part_number: String,
    pub description: String,
    pub machine_type: String,
    pub supplier: String,
    pub min_qty: i64,
    pub current_qty: i64,
    pub location: String,
}

impl PartDraft {
    pub fn new(part_number: impl Into<String>) -> Self {
        Self {
            part_number: part_number.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_machine_type(mut self, machine_type: impl Into<String>) -> Self {
        self.machine_type = machine_type.into();
        self
    }

    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = supplier.into();
        self
    }

    pub fn with_quantities(mut self, min_qty: i64, current_qty: i64) -> Self {
        self.min_qty = min_qty;
        self.current_qty = current_qty;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Trim text fields and check the catalog constraints.
    pub fn validate(self) -> DomainResult<Self> {
        let part_number = self.part_number.trim().to_string();
        if part_number.is_empty() {
            return Err(DomainError::validation("part_number", "cannot be empty"));
        }
        if self.min_qty < 0 {
            return Err(DomainError::validation("min_qty", "cannot be negative"));
        }
        if self.current_qty < 0 {
            return Err(DomainError::validation("current_qty", "cannot be negative"));
        }

        Ok(Self {
            part_number,
            description: self.description.trim().to_string(),
            machine_type: self.machine_type.trim().to_string(),
            supplier: self.supplier.trim().to_string(),
            min_qty: self.min_qty,
            current_qty: self.current_qty,
            location: self.location.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_trims_text_fields() {
        let draft = PartDraft::new("  BRG-6204 ")
            .with_description(" Ball bearing ")
            .with_location(" Rack A / Shelf 2 ")
            .validate()
            .unwrap();

        assert_eq!(draft.part_number, "BRG-6204");
        assert_eq!(draft.description, "Ball bearing");
        assert_eq!(draft.location, "Rack A / Shelf 2");
    }

    #[test]
    fn blank_part_number_is_rejected() {
        let err = PartDraft::new("   ").validate().unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "part_number", .. }));
    }

    #[test]
    fn negative_quantities_are_rejected() {
        let err = PartDraft::new("X").with_quantities(-1, 0).validate().unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "min_qty", .. }));

        let err = PartDraft::new("X").with_quantities(0, -5).validate().unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "current_qty", .. }));
    }

    #[test]
    fn missing_draft_fields_default_to_empty() {
        let draft: PartDraft = serde_json::from_str(r#"{"part_number":"P1"}"#).unwrap();
        assert_eq!(draft.min_qty, 0);
        assert_eq!(draft.current_qty, 0);
        assert_eq!(draft.supplier, "");
    }

    #[test]
    fn low_stock_is_strictly_below_minimum() {
        let mut part = Part::from_draft(PartId::new(1), PartDraft::new("P1").with_quantities(5, 5));
        assert!(!part.is_low_stock());
        part.current_qty = 4;
        assert!(part.is_low_stock());
        assert_eq!(part.business_key(), "P1");
    }
}
