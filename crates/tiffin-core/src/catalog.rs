//! # Catalog Module
//!
//! Filtering and grouping of the latest menu snapshot.
//!
//! ## Tree Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CatalogPayload.items (flat)                                           │
//! │       │                                                                 │
//! │       ▼  filter_items(search, only_out_of_stock)                        │
//! │       │                                                                 │
//! │       ▼  group_items(names)                                             │
//! │                                                                         │
//! │  Beverages                       (category, sorted by name)            │
//! │  ├── Hot Drinks                  (subcategory, sorted by name)         │
//! │  │   ├── Masala Chai             (display_order, then name)            │
//! │  │   └── Filter Coffee                                                 │
//! │  └── Lassi                       (no subcategory → uncategorized_items)│
//! │  Uncategorized                   (no category → __NO_CATEGORY__)       │
//! │  └── Papad                                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::types::{CatalogItem, CatalogPayload};
use crate::NO_CATEGORY_ID;

/// Display name of the synthetic group holding items without a category.
pub const NO_CATEGORY_NAME: &str = "Uncategorized";

// =============================================================================
// Name Lookup
// =============================================================================

/// Id → display name maps for categories and subcategories.
#[derive(Debug, Clone, Default)]
pub struct CatalogNames {
    categories: HashMap<String, String>,
    subcategories: HashMap<String, String>,
}

impl CatalogNames {
    /// Builds the maps from the snapshot's `categories` array.
    ///
    /// Entries without an id are skipped; entries without a name map to
    /// their id.
    pub fn from_payload(payload: &CatalogPayload) -> Self {
        let mut names = CatalogNames::default();

        for cat in &payload.categories {
            if let Some(id) = cat.category_id.as_deref().filter(|s| !s.is_empty()) {
                names
                    .categories
                    .insert(id.to_string(), non_empty_or(cat.name.as_deref(), id));
            }
            for sub in &cat.sub_categories {
                if let Some(id) = sub.sub_category_id.as_deref().filter(|s| !s.is_empty()) {
                    names
                        .subcategories
                        .insert(id.to_string(), non_empty_or(sub.name.as_deref(), id));
                }
            }
        }

        names
    }

    pub fn category(&self, id: &str) -> Option<&str> {
        self.categories.get(id).map(String::as_str)
    }

    pub fn subcategory(&self, id: &str) -> Option<&str> {
        self.subcategories.get(id).map(String::as_str)
    }
}

fn non_empty_or(name: Option<&str>, fallback: &str) -> String {
    name.filter(|n| !n.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

/// `"Category / Subcategory"` for an item, or `"—"` when it has neither.
pub fn category_label(item: &CatalogItem, names: &CatalogNames) -> String {
    let cat_id = item.category_id.as_deref().unwrap_or("");
    let category = names
        .category(cat_id)
        .or(Some(cat_id).filter(|s| !s.is_empty()))
        .unwrap_or("—");

    match item.sub_category_id.as_deref().filter(|s| !s.is_empty()) {
        Some(sub_id) => {
            let sub = names.subcategory(sub_id).unwrap_or(sub_id);
            format!("{} / {}", category, sub)
        }
        None => category.to_string(),
    }
}

// =============================================================================
// Filtering
// =============================================================================

/// Search box plus the "only out of stock" toggle.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    pub search: String,
    pub only_out_of_stock: bool,
}

impl CatalogFilter {
    /// Whether one item passes the filter.
    pub fn matches(&self, item: &CatalogItem) -> bool {
        let query = self.search.trim().to_lowercase();

        let text_ok = query.is_empty() || {
            let fields = [
                Some(item.item_name.as_str()),
                Some(item.item_id.as_str()),
                item.description.as_deref(),
                item.category_id.as_deref(),
                item.sub_category_id.as_deref(),
            ];
            fields
                .iter()
                .flatten()
                .any(|f| f.to_lowercase().contains(&query))
        };

        text_ok && !(self.only_out_of_stock && item.is_in_stock())
    }
}

/// Items that pass `filter`, in snapshot order.
pub fn filter_items<'a>(items: &'a [CatalogItem], filter: &CatalogFilter) -> Vec<&'a CatalogItem> {
    items.iter().filter(|it| filter.matches(it)).collect()
}

/// "Showing N of M" counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogSummary {
    pub total: usize,
    pub showing: usize,
}

impl CatalogSummary {
    pub fn new(payload: &CatalogPayload, filtered: &[&CatalogItem]) -> Self {
        CatalogSummary {
            total: payload.items.len(),
            showing: filtered.len(),
        }
    }
}

// =============================================================================
// Grouping
// =============================================================================

#[derive(Debug, Clone)]
pub struct SubcategoryGroup<'a> {
    pub id: String,
    pub name: String,
    pub items: Vec<&'a CatalogItem>,
}

#[derive(Debug, Clone)]
pub struct CategoryGroup<'a> {
    pub id: String,
    pub name: String,
    pub subcategories: Vec<SubcategoryGroup<'a>>,
    /// Items in this category without a subcategory.
    pub uncategorized_items: Vec<&'a CatalogItem>,
}

impl CategoryGroup<'_> {
    pub fn item_count(&self) -> usize {
        self.uncategorized_items.len()
            + self
                .subcategories
                .iter()
                .map(|s| s.items.len())
                .sum::<usize>()
    }
}

/// Builds the category → subcategory → item tree.
///
/// ## Example
/// ```rust
/// use tiffin_core::catalog::{group_items, CatalogNames};
/// use tiffin_core::types::{CatalogItem, CatalogPayload};
///
/// let payload = CatalogPayload {
///     items: vec![CatalogItem {
///         item_id: "p1".into(),
///         item_name: "Papad".into(),
///         ..Default::default()
///     }],
///     ..Default::default()
/// };
/// let names = CatalogNames::from_payload(&payload);
/// let items: Vec<_> = payload.items.iter().collect();
///
/// let groups = group_items(&items, &names);
/// assert_eq!(groups[0].name, "Uncategorized");
/// assert_eq!(groups[0].item_count(), 1);
/// ```
pub fn group_items<'a>(items: &[&'a CatalogItem], names: &CatalogNames) -> Vec<CategoryGroup<'a>> {
    let mut groups: Vec<CategoryGroup<'a>> = Vec::new();

    for &item in items {
        let cat_id = item
            .category_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(NO_CATEGORY_ID);

        let idx = match groups.iter().position(|g| g.id == cat_id) {
            Some(idx) => idx,
            None => {
                let name = if cat_id == NO_CATEGORY_ID {
                    NO_CATEGORY_NAME.to_string()
                } else {
                    names.category(cat_id).unwrap_or(cat_id).to_string()
                };
                groups.push(CategoryGroup {
                    id: cat_id.to_string(),
                    name,
                    subcategories: Vec::new(),
                    uncategorized_items: Vec::new(),
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[idx];

        match item.sub_category_id.as_deref().filter(|s| !s.is_empty()) {
            None => group.uncategorized_items.push(item),
            Some(sub_id) => match group.subcategories.iter_mut().find(|s| s.id == sub_id) {
                Some(sub) => sub.items.push(item),
                None => group.subcategories.push(SubcategoryGroup {
                    id: sub_id.to_string(),
                    name: names.subcategory(sub_id).unwrap_or(sub_id).to_string(),
                    items: vec![item],
                }),
            },
        }
    }

    groups.sort_by(|a, b| compare_names(&a.name, &b.name));
    for group in &mut groups {
        group.subcategories.sort_by(|a, b| compare_names(&a.name, &b.name));
        group.uncategorized_items.sort_by(|a, b| compare_items(a, b));
        for sub in &mut group.subcategories {
            sub.items.sort_by(|a, b| compare_items(a, b));
        }
    }

    groups
}

/// Case-insensitive first, so "apple" sorts next to "Apple".
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn compare_items(a: &CatalogItem, b: &CatalogItem) -> Ordering {
    a.display_order
        .unwrap_or(0)
        .cmp(&b.display_order.unwrap_or(0))
        .then_with(|| compare_names(&a.item_name, &b.item_name))
}

// =============================================================================
// In-place Edits
// =============================================================================

impl CatalogPayload {
    pub fn find_item(&self, item_id: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|it| it.item_id == item_id)
    }

    /// Sets the stock flag and returns the previous one.
    ///
    /// `None` when the item is not in the snapshot. The previous value lets a
    /// caller put the flag back if the server rejects the change.
    pub fn set_in_stock(&mut self, item_id: &str, in_stock: bool) -> Option<Option<bool>> {
        let item = self.items.iter_mut().find(|it| it.item_id == item_id)?;
        Some(item.in_stock.replace(in_stock))
    }

    /// Restores a flag captured by [`CatalogPayload::set_in_stock`].
    pub fn restore_in_stock(&mut self, item_id: &str, previous: Option<bool>) {
        if let Some(item) = self.items.iter_mut().find(|it| it.item_id == item_id) {
            item.in_stock = previous;
        }
    }

    /// Sets the image URL; returns false when the item is unknown.
    pub fn set_image(&mut self, item_id: &str, url: &str) -> bool {
        match self.items.iter_mut().find(|it| it.item_id == item_id) {
            Some(item) => {
                item.image = Some(url.to_string());
                true
            }
            None => false,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot() -> CatalogPayload {
        serde_json::from_value(json!({
            "items": [
                { "itemId": "i1", "itemName": "Masala Chai", "categoryId": "c-bev", "subCategoryId": "s-hot", "displayOrder": 2, "inStock": true },
                { "itemId": "i2", "itemName": "Filter Coffee", "categoryId": "c-bev", "subCategoryId": "s-hot", "displayOrder": 1, "inStock": false },
                { "itemId": "i3", "itemName": "Lassi", "categoryId": "c-bev", "description": "Sweet yoghurt drink" },
                { "itemId": "i4", "itemName": "Papad" },
                { "itemId": "i5", "itemName": "Aloo Paratha", "categoryId": "c-main", "inStock": true },
                { "itemId": "i6", "itemName": "Mystery", "categoryId": "c-unknown", "subCategoryId": "s-unknown", "inStock": true }
            ],
            "categories": [
                { "categoryId": "c-bev", "name": "Beverages", "subCategories": [
                    { "subCategoryId": "s-hot", "name": "Hot Drinks" }
                ]},
                { "categoryId": "c-main", "name": "" }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_names_fall_back_to_ids() {
        let names = CatalogNames::from_payload(&snapshot());
        assert_eq!(names.category("c-bev"), Some("Beverages"));
        assert_eq!(names.category("c-main"), Some("c-main"));
        assert_eq!(names.subcategory("s-hot"), Some("Hot Drinks"));
        assert_eq!(names.category("nope"), None);
    }

    #[test]
    fn test_filter_search_fields() {
        let payload = snapshot();
        let by_desc = CatalogFilter {
            search: "  YOGHURT ".into(),
            only_out_of_stock: false,
        };
        let hits = filter_items(&payload.items, &by_desc);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].item_id, "i3");

        let by_category = CatalogFilter {
            search: "c-bev".into(),
            only_out_of_stock: false,
        };
        assert_eq!(filter_items(&payload.items, &by_category).len(), 3);
    }

    #[test]
    fn test_filter_out_of_stock_includes_missing_flag() {
        let payload = snapshot();
        let filter = CatalogFilter {
            search: String::new(),
            only_out_of_stock: true,
        };
        let ids: Vec<&str> = filter_items(&payload.items, &filter)
            .iter()
            .map(|it| it.item_id.as_str())
            .collect();
        assert_eq!(ids, vec!["i2", "i3", "i4"]);

        let summary = CatalogSummary::new(&payload, &filter_items(&payload.items, &filter));
        assert_eq!(summary, CatalogSummary { total: 6, showing: 3 });
    }

    #[test]
    fn test_group_tree_and_ordering() {
        let payload = snapshot();
        let names = CatalogNames::from_payload(&payload);
        let items: Vec<&CatalogItem> = payload.items.iter().collect();
        let groups = group_items(&items, &names);

        let group_names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(group_names, vec!["Beverages", "c-main", "c-unknown", "Uncategorized"]);

        let bev = &groups[0];
        assert_eq!(bev.item_count(), 3);
        assert_eq!(bev.subcategories[0].name, "Hot Drinks");
        let hot: Vec<&str> = bev.subcategories[0]
            .items
            .iter()
            .map(|it| it.item_name.as_str())
            .collect();
        assert_eq!(hot, vec!["Filter Coffee", "Masala Chai"]);
        assert_eq!(bev.uncategorized_items[0].item_name, "Lassi");

        assert_eq!(groups[2].subcategories[0].name, "s-unknown");
        assert_eq!(groups[3].id, NO_CATEGORY_ID);
    }

    #[test]
    fn test_category_label() {
        let payload = snapshot();
        let names = CatalogNames::from_payload(&payload);
        assert_eq!(category_label(&payload.items[0], &names), "Beverages / Hot Drinks");
        assert_eq!(category_label(&payload.items[2], &names), "Beverages");
        assert_eq!(category_label(&payload.items[3], &names), "—");
        assert_eq!(category_label(&payload.items[5], &names), "c-unknown / s-unknown");
    }

    #[test]
    fn test_set_in_stock_and_restore() {
        let mut payload = snapshot();
        let previous = payload.set_in_stock("i3", true).unwrap();
        assert_eq!(previous, None);
        assert!(payload.find_item("i3").unwrap().is_in_stock());

        payload.restore_in_stock("i3", previous);
        assert_eq!(payload.find_item("i3").unwrap().in_stock, None);

        assert!(payload.set_in_stock("missing", true).is_none());
    }

    #[test]
    fn test_set_image() {
        let mut payload = snapshot();
        assert!(payload.set_image("i4", "https://cdn.example.com/papad.jpg"));
        assert_eq!(
            payload.find_item("i4").unwrap().image_url(),
            Some("https://cdn.example.com/papad.jpg")
        );
        assert!(!payload.set_image("missing", "x"));
    }
}
