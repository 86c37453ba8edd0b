use crate::domain::common::{flex, Entity, EntityId, FieldSpec};
use crate::enums::VerifactuStatus;
use serde::{Deserialize, Serialize};

/// Sales invoice, registered with AEAT through Verifactu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Invoice {
    pub id: EntityId,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub series: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_int")]
    pub id_order: Option<EntityId>,
    #[serde(default, deserialize_with = "flex::opt_int")]
    pub id_customer: Option<EntityId>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub issue_date: Option<String>,
    #[serde(default, deserialize_with = "flex::decimal")]
    pub subtotal: f64,
    #[serde(default, deserialize_with = "flex::decimal")]
    pub tax_total: f64,
    #[serde(default, deserialize_with = "flex::decimal")]
    pub total: f64,
    /// "draft" | "issued" | "cancelled"
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub verifactu_status: Option<VerifactuStatus>,
    /// Secure verification code returned by AEAT
    #[serde(default)]
    pub verifactu_csv: Option<String>,
    #[serde(default)]
    pub verifactu_sent_at: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Invoice {
    pub fn full_number(&self) -> String {
        match &self.series {
            Some(series) if !series.is_empty() => format!("{}-{}", series, self.number),
            _ => self.number.clone(),
        }
    }

    pub fn aeat_status(&self) -> VerifactuStatus {
        self.verifactu_status.unwrap_or_default()
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == "cancelled" || self.aeat_status() == VerifactuStatus::Cancelled
    }
}

/// Answer of `GET /invoices/:id/verifactu/status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AeatStatus {
    #[serde(default)]
    pub status: Option<VerifactuStatus>,
    #[serde(default)]
    pub csv: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub checked_at: Option<String>,
}

pub const INVOICE_PAYLOAD: &[FieldSpec] = &[
    FieldSpec::text("series"),
    FieldSpec::text("number"),
    FieldSpec::id("id_order"),
    FieldSpec::id("id_customer"),
    FieldSpec::text("issue_date"),
    FieldSpec::text("notes"),
];

impl Entity for Invoice {
    fn id(&self) -> EntityId {
        self.id
    }

    fn display_name(&self) -> String {
        self.full_number()
    }

    fn aggregate_index() -> &'static str {
        "a011"
    }

    fn collection_name() -> &'static str {
        "invoices"
    }

    fn element_name() -> &'static str {
        "Invoice"
    }

    fn list_name() -> &'static str {
        "Invoices"
    }

    fn payload_schema() -> &'static [FieldSpec] {
        INVOICE_PAYLOAD
    }

    fn default_sort() -> &'static str {
        "issue_date"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_number_and_status() {
        let invoice: Invoice = serde_json::from_value(json!({
            "id": 5, "number": "000123", "series": "F24", "status": "issued",
            "verifactu_status": "accepted"
        }))
        .unwrap();

        assert_eq!(invoice.full_number(), "F24-000123");
        assert!(invoice.aeat_status().can_cancel());
        assert!(!invoice.is_cancelled());
    }

    #[test]
    fn test_missing_verifactu_status_means_not_sent() {
        let invoice: Invoice = serde_json::from_value(json!({"id": 1, "number": "1"})).unwrap();
        assert_eq!(invoice.aeat_status(), VerifactuStatus::NotSent);
    }
}
