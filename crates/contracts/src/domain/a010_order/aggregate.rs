use crate::domain::common::{flex, Entity, EntityId, FieldSpec};
use crate::enums::OrderStatus;
use serde::{Deserialize, Serialize};

// ============================================================================
// Aggregate Root
// ============================================================================

/// Customer order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Order {
    pub id: EntityId,
    #[serde(default)]
    pub reference: String,
    #[serde(default, deserialize_with = "flex::opt_int")]
    pub id_customer: Option<EntityId>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_int")]
    pub id_store: Option<EntityId>,
    /// Raw status code; see [`OrderStatus`]
    #[serde(default)]
    pub status: String,
    #[serde(default, deserialize_with = "flex::decimal")]
    pub total: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_currency() -> String {
    "EUR".to_string()
}

impl Order {
    pub fn status(&self) -> Option<OrderStatus> {
        OrderStatus::from_code(&self.status)
    }
}

pub const ORDER_PAYLOAD: &[FieldSpec] = &[
    FieldSpec::id("id_customer"),
    FieldSpec::id("id_store"),
    FieldSpec::required("status"),
    FieldSpec::text("payment_method"),
    FieldSpec::text("notes"),
];

impl Entity for Order {
    fn id(&self) -> EntityId {
        self.id
    }

    fn display_name(&self) -> String {
        if self.reference.is_empty() {
            format!("#{}", self.id)
        } else {
            self.reference.clone()
        }
    }

    fn aggregate_index() -> &'static str {
        "a010"
    }

    fn collection_name() -> &'static str {
        "orders"
    }

    fn element_name() -> &'static str {
        "Order"
    }

    fn list_name() -> &'static str {
        "Orders"
    }

    fn payload_schema() -> &'static [FieldSpec] {
        ORDER_PAYLOAD
    }

    fn default_sort() -> &'static str {
        "created_at"
    }
}

// ============================================================================
// Sub-resources
// ============================================================================

/// Line of an order (`/orders/:id/products`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OrderLine {
    pub id: EntityId,
    #[serde(default, deserialize_with = "flex::opt_int")]
    pub id_product: Option<EntityId>,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default, deserialize_with = "flex::int")]
    pub quantity: i64,
    #[serde(default, deserialize_with = "flex::decimal")]
    pub unit_price: f64,
    #[serde(default, deserialize_with = "flex::decimal")]
    pub total: f64,
}

/// Billing or shipping address of an order (`/orders/:id/addresses`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OrderAddress {
    pub id: EntityId,
    /// "billing" | "shipping"
    #[serde(default)]
    pub address_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_defaults() {
        let order: Order = serde_json::from_value(json!({"id": 5, "status": "shipped", "total": "99.90"})).unwrap();
        assert_eq!(order.currency, "EUR");
        assert_eq!(order.status(), Some(OrderStatus::Shipped));
        assert_eq!(order.total, 99.9);
        assert_eq!(order.display_name(), "#5");
    }
}
