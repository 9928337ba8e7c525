use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_inventory::PartDraft;

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /parts` and `PUT /parts/:id`. Omitted fields take their
/// empty/zero defaults.
#[derive(Debug, Deserialize)]
pub struct PartRequest {
    pub part_number: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub machine_type: String,
    #[serde(default)]
    pub supplier: String,
    #[serde(default)]
    pub min_qty: i64,
    #[serde(default)]
    pub current_qty: i64,
    #[serde(default)]
    pub location: String,
}

impl From<PartRequest> for PartDraft {
    fn from(req: PartRequest) -> Self {
        PartDraft::new(req.part_number)
            .with_description(req.description)
            .with_machine_type(req.machine_type)
            .with_supplier(req.supplier)
            .with_quantities(req.min_qty, req.current_qty)
            .with_location(req.location)
    }
}

#[derive(Debug, Deserialize)]
pub struct AdjustStockRequest {
    /// `"IN"` or `"OUT"`.
    pub action: String,
    pub quantity: i64,
    #[serde(default)]
    pub remarks: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: String,
}

impl SearchQuery {
    /// The search text with surrounding whitespace removed, as typed into a
    /// search box.
    pub fn term(&self) -> &str {
        self.search.trim()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub search: String,
    pub limit: Option<u32>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct WhoAmIResponse {
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_request_fills_defaults() {
        let req: PartRequest = serde_json::from_str(r#"{"part_number":"BRG-6204"}"#).unwrap();
        let draft = PartDraft::from(req);
        assert_eq!(draft, PartDraft::new("BRG-6204"));
    }

    #[test]
    fn search_term_ignores_surrounding_whitespace() {
        let q = SearchQuery {
            search: "  BRG ".to_string(),
        };
        assert_eq!(q.term(), "BRG");
        assert_eq!(SearchQuery::default().term(), "");
    }

    #[test]
    fn adjust_request_remarks_are_optional() {
        let req: AdjustStockRequest =
            serde_json::from_str(r#"{"action":"OUT","quantity":3}"#).unwrap();
        assert_eq!(req.action, "OUT");
        assert_eq!(req.quantity, 3);
        assert!(req.remarks.is_none());
    }
}
