//! Page category constants (`data-page-category` of [`super::page_frame::PageFrame`]).

/// Table of records with search and pagination
pub const PAGE_CAT_LIST: &str = "list";

/// Single record with its edit drawer
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Login, not found and other system pages
pub const PAGE_CAT_SYSTEM: &str = "system";

/// `{resource}--{category}`
pub fn page_id(resource: &str, category: &str) -> String {
    format!("{}--{}", resource, category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id() {
        assert_eq!(page_id("products", PAGE_CAT_LIST), "products--list");
    }
}
