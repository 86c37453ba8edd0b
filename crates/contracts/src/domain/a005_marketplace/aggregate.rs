use crate::domain::common::{flex, Entity, EntityId, FieldSpec};
use serde::{Deserialize, Serialize};

/// Marketplace (sales channel such as Amazon or eBay)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Marketplace {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "flex::flag")]
    pub visible: bool,
    #[serde(default, deserialize_with = "flex::flag")]
    pub active: bool,
}

pub const MARKETPLACE_PAYLOAD: &[FieldSpec] = &[
    FieldSpec::required("name"),
    FieldSpec::required("code"),
    FieldSpec::text("url"),
    FieldSpec::text("description"),
    FieldSpec::flag("visible", true),
    FieldSpec::flag("active", true),
];

impl Entity for Marketplace {
    fn id(&self) -> EntityId {
        self.id
    }

    fn display_name(&self) -> String {
        format!("{} [{}]", self.name, self.code)
    }

    fn aggregate_index() -> &'static str {
        "a005"
    }

    fn collection_name() -> &'static str {
        "marketplaces"
    }

    fn element_name() -> &'static str {
        "Marketplace"
    }

    fn list_name() -> &'static str {
        "Marketplaces"
    }

    fn payload_schema() -> &'static [FieldSpec] {
        MARKETPLACE_PAYLOAD
    }

    fn default_sort() -> &'static str {
        "code"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::transform_for_api;
    use serde_json::json;

    #[test]
    fn test_create_payload_fills_optional_fields() {
        let payload = transform_for_api(MARKETPLACE_PAYLOAD, &json!({"name": "Amazon", "code": "AMZ"}));

        assert_eq!(
            payload,
            json!({
                "name": "Amazon",
                "code": "AMZ",
                "url": null,
                "description": null,
                "visible": true,
                "active": true,
            })
        );
    }

    #[test]
    fn test_read_back_is_stable() {
        let record: Marketplace = serde_json::from_value(json!({
            "id": 3, "name": "eBay", "code": "EBY", "url": "https://ebay.es",
            "description": null, "visible": 1, "active": "0"
        }))
        .unwrap();

        let once = transform_for_api(MARKETPLACE_PAYLOAD, &record.to_form());
        let twice = transform_for_api(MARKETPLACE_PAYLOAD, &once);

        assert_eq!(once, twice);
        assert_eq!(once["active"], json!(false));
    }
}
