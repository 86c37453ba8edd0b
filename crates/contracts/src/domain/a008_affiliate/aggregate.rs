use crate::domain::common::{flex, Entity, EntityId, FieldSpec};
use serde::{Deserialize, Serialize};

// ============================================================================
// Aggregate Root
// ============================================================================

/// Affiliate (commission-based reseller)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Affiliate {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Percentage, e.g. 7.5
    #[serde(default, deserialize_with = "flex::opt_decimal")]
    pub commission_rate: Option<f64>,
    #[serde(default, deserialize_with = "flex::flag")]
    pub active: bool,
}

pub const AFFILIATE_PAYLOAD: &[FieldSpec] = &[
    FieldSpec::required("name"),
    FieldSpec::text("tax_id"),
    FieldSpec::text("email"),
    FieldSpec::text("phone"),
    FieldSpec::decimal("commission_rate"),
    FieldSpec::flag("active", true),
];

impl Entity for Affiliate {
    fn id(&self) -> EntityId {
        self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn aggregate_index() -> &'static str {
        "a008"
    }

    fn collection_name() -> &'static str {
        "affiliates"
    }

    fn element_name() -> &'static str {
        "Affiliate"
    }

    fn list_name() -> &'static str {
        "Affiliates"
    }

    fn payload_schema() -> &'static [FieldSpec] {
        AFFILIATE_PAYLOAD
    }

    fn default_sort() -> &'static str {
        "name"
    }
}

// ============================================================================
// Sub-resources
// ============================================================================

/// Contact person of an affiliate (`/affiliates/:id/contacts`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AffiliateContact {
    pub id: EntityId,
    #[serde(default, deserialize_with = "flex::opt_int")]
    pub id_affiliate: Option<EntityId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

pub const AFFILIATE_CONTACT_PAYLOAD: &[FieldSpec] = &[
    FieldSpec::required("name"),
    FieldSpec::text("email"),
    FieldSpec::text("phone"),
    FieldSpec::text("position"),
];

/// Territory an affiliate covers (`/affiliates/:id/zones`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AffiliateZone {
    pub id: EntityId,
    #[serde(default, deserialize_with = "flex::opt_int")]
    pub id_affiliate: Option<EntityId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

pub const AFFILIATE_ZONE_PAYLOAD: &[FieldSpec] = &[
    FieldSpec::required("name"),
    FieldSpec::text("postal_code"),
    FieldSpec::text("province"),
    FieldSpec::text("country"),
];
