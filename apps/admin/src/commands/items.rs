//! # Items Screen
//!
//! The latest menu snapshot as a category tree, plus the two per-item edits
//! the console makes: stock flag and image URL.
//!
//! ## Stock Update
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET /menu/latest                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  menu.set_in_stock(id, next)      ◄── local copy changes first          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PATCH /menu/item/{id} {inStock}                                        │
//! │       ├── ok    ──► print the new state                                 │
//! │       └── error ──► menu.restore_in_stock(id, previous)                 │
//! │                     "Failed to update stock."                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::future::Future;

use serde::Serialize;
use serde_json::Value;
use tiffin_api::ApiResult;
use tiffin_core::catalog::{
    category_label, filter_items, group_items, CatalogFilter, CatalogNames, CatalogSummary, CategoryGroup,
};
use tiffin_core::validation::looks_like_http_url;
use tiffin_core::{CatalogItem, CatalogPayload, CoreError, ItemEdit};
use tracing::{info, warn};

use super::Ctx;
use crate::cli::ItemsCommand;
use crate::error::{AppError, AppResult};

pub async fn run(ctx: &Ctx, cmd: ItemsCommand) -> AppResult<()> {
    match cmd {
        ItemsCommand::List { search, out_of_stock } => {
            let menu = ctx.client.latest_menu().await?;
            let filter = CatalogFilter {
                search,
                only_out_of_stock: out_of_stock,
            };
            list(ctx, &menu, &filter)
        }
        ItemsCommand::Sync => {
            ctx.out
                .confirm("Fetch latest menu from provider and save a new snapshot?")?;
            let result = ctx.client.sync_menu().await.map_err(|e| {
                warn!(error = %e, "Menu sync failed");
                e
            })?;
            info!("Menu synced");
            let menu = ctx.client.latest_menu().await?;
            if ctx.out.json {
                return ctx.out.json(&serde_json::json!({ "sync": result, "items": menu.items.len() }));
            }
            println!("Menu synced: {} items.", menu.items.len());
            Ok(())
        }
        ItemsCommand::Stock { item_id, change } => {
            let mut menu = ctx.client.latest_menu().await?;
            let current = menu
                .find_item(&item_id)
                .ok_or_else(|| CoreError::ItemNotFound(item_id.clone()))?
                .is_in_stock();
            let next = change.resolve(current);

            let id = item_id.as_str();
            update_stock(&mut menu, id, next, move |edit| async move {
                ctx.client.edit_menu_item(id, &edit).await
            })
            .await?;

            let item = menu.find_item(&item_id);
            ctx.out.emit(&item, || {
                println!("{} is now {}.", item_id, if next { "in stock" } else { "out of stock" })
            })
        }
        ItemsCommand::Image { item_id, url } => {
            let url = url.trim().to_string();
            if !url.is_empty() && !looks_like_http_url(&url) {
                ctx.out
                    .confirm("URL does not look like an http(s) URL. Save anyway?")?;
            }

            let mut menu = ctx.client.latest_menu().await?;
            if menu.find_item(&item_id).is_none() {
                return Err(CoreError::ItemNotFound(item_id).into());
            }
            let edit = ItemEdit {
                in_stock: None,
                image: Some(url.clone()),
            };
            ctx.client.edit_menu_item(&item_id, &edit).await.map_err(|e| {
                warn!(item = %item_id, error = %e, "Failed to update image");
                e
            })?;
            menu.set_image(&item_id, &url);

            let item = menu.find_item(&item_id);
            ctx.out.emit(&item, || println!("Image updated for {}.", item_id))
        }
    }
}

/// Flips the local stock flag, sends the edit, and puts the flag back if the
/// server call fails.
pub async fn update_stock<F, Fut>(menu: &mut CatalogPayload, item_id: &str, next: bool, send: F) -> AppResult<()>
where
    F: FnOnce(ItemEdit) -> Fut,
    Fut: Future<Output = ApiResult<Value>>,
{
    let previous = menu
        .set_in_stock(item_id, next)
        .ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()))?;

    let edit = ItemEdit {
        in_stock: Some(next),
        image: None,
    };
    match send(edit).await {
        Ok(_) => {
            info!(item = %item_id, in_stock = next, "Stock updated");
            Ok(())
        }
        Err(e) => {
            menu.restore_in_stock(item_id, previous);
            warn!(item = %item_id, error = %e, "Failed to update stock, reverted");
            Err(AppError::Api(e))
        }
    }
}

// =============================================================================
// List View
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ItemView<'a> {
    item_id: &'a str,
    item_name: &'a str,
    price: Option<String>,
    in_stock: bool,
    image: Option<&'a str>,
    category: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubcategoryView<'a> {
    id: &'a str,
    name: &'a str,
    items: Vec<ItemView<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CategoryView<'a> {
    id: &'a str,
    name: &'a str,
    item_count: usize,
    subcategories: Vec<SubcategoryView<'a>>,
    uncategorized_items: Vec<ItemView<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListView<'a> {
    total: usize,
    showing: usize,
    categories: Vec<CategoryView<'a>>,
}

fn item_view<'a>(item: &'a CatalogItem, names: &CatalogNames) -> ItemView<'a> {
    ItemView {
        item_id: &item.item_id,
        item_name: &item.item_name,
        price: item.price.map(|p| p.to_string()),
        in_stock: item.is_in_stock(),
        image: item.image_url(),
        category: category_label(item, names),
    }
}

fn category_view<'a>(group: &'a CategoryGroup<'a>, names: &CatalogNames) -> CategoryView<'a> {
    CategoryView {
        id: &group.id,
        name: &group.name,
        item_count: group.item_count(),
        subcategories: group
            .subcategories
            .iter()
            .map(|s| SubcategoryView {
                id: &s.id,
                name: &s.name,
                items: s.items.iter().map(|it| item_view(it, names)).collect(),
            })
            .collect(),
        uncategorized_items: group
            .uncategorized_items
            .iter()
            .map(|it| item_view(it, names))
            .collect(),
    }
}

fn list(ctx: &Ctx, menu: &CatalogPayload, filter: &CatalogFilter) -> AppResult<()> {
    let names = CatalogNames::from_payload(menu);
    let filtered = filter_items(&menu.items, filter);
    let summary = CatalogSummary::new(menu, &filtered);
    let groups = group_items(&filtered, &names);

    if ctx.out.json {
        let view = ListView {
            total: summary.total,
            showing: summary.showing,
            categories: groups.iter().map(|g| category_view(g, &names)).collect(),
        };
        return ctx.out.json(&view);
    }

    print!("{}", render_tree(&summary, &groups));
    Ok(())
}

fn item_line(item: &CatalogItem) -> String {
    let stock = if item.is_in_stock() { "in " } else { "out" };
    let price = item.price.map(|p| format!("  {}", p)).unwrap_or_default();
    let image = if item.image_url().is_some() { "" } else { "  (no image)" };
    format!("[{}] {}  {}{}{}", stock, item.item_id, item.item_name, price, image)
}

fn render_tree(summary: &CatalogSummary, groups: &[CategoryGroup<'_>]) -> String {
    let mut out = format!("Showing {} of {} items\n", summary.showing, summary.total);
    if groups.is_empty() {
        out.push_str("No items match.\n");
        return out;
    }
    for group in groups {
        out.push_str(&format!("\n{} ({})\n", group.name, group.item_count()));
        for sub in &group.subcategories {
            out.push_str(&format!("  {} ({})\n", sub.name, sub.items.len()));
            for item in &sub.items {
                out.push_str(&format!("    {}\n", item_line(item)));
            }
        }
        if !group.uncategorized_items.is_empty() {
            out.push_str(&format!("  (no subcategory) ({})\n", group.uncategorized_items.len()));
            for item in &group.uncategorized_items {
                out.push_str(&format!("    {}\n", item_line(item)));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiffin_api::ApiError;
    use tiffin_core::{Category, Money, SubCategory};

    fn menu() -> CatalogPayload {
        CatalogPayload {
            items: vec![
                CatalogItem {
                    item_id: "VT-1".into(),
                    item_name: "Veg Thali".into(),
                    category_id: Some("c1".into()),
                    sub_category_id: Some("s1".into()),
                    price: Some(Money::from_paise(14950)),
                    in_stock: Some(true),
                    image: Some("https://cdn/vt.png".into()),
                    ..Default::default()
                },
                CatalogItem {
                    item_id: "CH-1".into(),
                    item_name: "Chai".into(),
                    in_stock: None,
                    ..Default::default()
                },
            ],
            categories: vec![Category {
                category_id: Some("c1".into()),
                name: Some("Mains".into()),
                sub_categories: vec![SubCategory {
                    sub_category_id: Some("s1".into()),
                    name: Some("Thalis".into()),
                }],
            }],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_stock_update_keeps_new_value_on_success() {
        let mut menu = menu();
        update_stock(&mut menu, "VT-1", false, |edit| async move {
            assert_eq!(edit.in_stock, Some(false));
            Ok(Value::Null)
        })
        .await
        .unwrap();
        assert_eq!(menu.find_item("VT-1").unwrap().in_stock, Some(false));
    }

    #[tokio::test]
    async fn test_stock_update_reverts_on_failure() {
        let mut menu = menu();
        let err = update_stock(&mut menu, "CH-1", true, |_| async {
            Err(ApiError::Status {
                status: 500,
                body: "boom".into(),
            })
        })
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Api(_)));
        assert_eq!(menu.find_item("CH-1").unwrap().in_stock, None);
    }

    #[tokio::test]
    async fn test_stock_update_unknown_item() {
        let mut menu = menu();
        let err = update_stock(&mut menu, "nope", true, |_| async { Ok(Value::Null) })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Core(CoreError::ItemNotFound(_))));
    }

    #[test]
    fn test_render_tree() {
        let menu = menu();
        let names = CatalogNames::from_payload(&menu);
        let filtered = filter_items(&menu.items, &CatalogFilter::default());
        let summary = CatalogSummary::new(&menu, &filtered);
        let groups = group_items(&filtered, &names);

        let text = render_tree(&summary, &groups);
        assert!(text.starts_with("Showing 2 of 2 items\n"));
        assert!(text.contains("Mains (1)\n  Thalis (1)\n    [in ] VT-1  Veg Thali  ₹ 149.50\n"));
        assert!(text.contains("Uncategorized (1)\n  (no subcategory) (1)\n    [out] CH-1  Chai  (no image)\n"));
    }

    #[test]
    fn test_out_of_stock_filter() {
        let menu = menu();
        let filter = CatalogFilter {
            search: String::new(),
            only_out_of_stock: true,
        };
        let filtered = filter_items(&menu.items, &filter);
        let summary = CatalogSummary::new(&menu, &filtered);
        let text = render_tree(&summary, &group_items(&filtered, &CatalogNames::from_payload(&menu)));
        assert!(text.starts_with("Showing 1 of 2 items"));
        assert!(!text.contains("VT-1"));
    }
}
