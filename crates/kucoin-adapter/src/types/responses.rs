/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Generic response containers shared by list operations
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

/// One page of a list operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub current_page: u32,
    pub page_size: u32,
    pub total_num: u64,
    pub total_page: u32,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_paginated_decodes() {
        let page: Paginated<String> = serde_json::from_value(json!({
            "currentPage": 1,
            "pageSize": 2,
            "totalNum": 3,
            "totalPage": 2,
            "items": ["a", "b"]
        }))
        .unwrap();

        assert_eq!(page.items, vec!["a", "b"]);
        assert!(page.has_next_page());
    }

    #[test]
    fn test_missing_items_is_empty_page() {
        let page: Paginated<String> = serde_json::from_value(json!({
            "currentPage": 1,
            "pageSize": 50,
            "totalNum": 0,
            "totalPage": 0
        }))
        .unwrap();

        assert!(page.items.is_empty());
        assert!(!page.has_next_page());
    }
}
