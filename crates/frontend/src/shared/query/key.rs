use crate::shared::api::ListFilters;
use contracts::domain::common::EntityId;
use std::fmt;

pub const LIST: &str = "list";
pub const DETAIL: &str = "detail";

/// Hierarchical cache key.
///
/// The first segment is always the entity collection name:
/// `[products]`, `[products, list, <query>]`, `[products, detail, 7]`,
/// `[categories, byParent, 3]`. Invalidation works by prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    /// Root of everything cached for `entity`
    pub fn entity(entity: &str) -> Self {
        Self(vec![entity.to_string()])
    }

    pub fn list(entity: &str, filters: &ListFilters) -> Self {
        Self::entity(entity).with(LIST).with(filters.to_query_string())
    }

    pub fn detail(entity: &str, id: EntityId) -> Self {
        Self::entity(entity).with(DETAIL).with(id)
    }

    /// Relation-scoped key such as `[categories, active]`
    pub fn relation(entity: &str, name: &str) -> Self {
        Self::entity(entity).with(name)
    }

    pub fn with(mut self, segment: impl ToString) -> Self {
        self.0.push(segment.to_string());
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn entity_name(&self) -> &str {
        self.0.first().map(String::as_str).unwrap_or_default()
    }

    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.len() >= prefix.0.len() && self.0[..prefix.0.len()] == prefix.0[..]
    }

    fn kind(&self) -> Option<&str> {
        self.0.get(1).map(String::as_str)
    }

    pub fn is_list(&self) -> bool {
        self.kind() == Some(LIST)
    }

    pub fn is_detail(&self) -> bool {
        self.kind() == Some(DETAIL)
    }

    /// Anything below the entity root that is neither a list nor a detail
    pub fn is_relation(&self) -> bool {
        matches!(self.kind(), Some(k) if k != LIST && k != DETAIL)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_matching() {
        let root = QueryKey::entity("products");
        let detail = QueryKey::detail("products", 7);
        let list = QueryKey::list("products", &ListFilters::new().page(1, 20));

        assert!(detail.starts_with(&root));
        assert!(list.starts_with(&root));
        assert!(!root.starts_with(&detail));
        assert!(!QueryKey::entity("productsx").starts_with(&root));
    }

    #[test]
    fn test_kinds() {
        assert!(QueryKey::list("orders", &ListFilters::new()).is_list());
        assert!(QueryKey::detail("orders", 1).is_detail());
        assert!(QueryKey::relation("categories", "byParent").with(3).is_relation());
        assert!(!QueryKey::entity("orders").is_relation());
    }

    #[test]
    fn test_display() {
        assert_eq!(QueryKey::detail("invoices", 5).to_string(), "[invoices, detail, 5]");
    }
}
