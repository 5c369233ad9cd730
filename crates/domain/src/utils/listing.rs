//! Client-side search and pagination for recipe listings

use crate::types::Recipe;

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually served (after clamping)
    pub page: usize,
    pub total_pages: usize,
}

/// Keep recipes whose name contains `query`, ignoring case.
///
/// An empty or whitespace-only query keeps everything.
///
/// # Examples
///
/// ```
/// use recipebox_domain::{filter_by_name, Recipe};
///
/// let recipes: Vec<Recipe> = serde_json::from_str(
///     r#"[{"_id":"1","name":"Banana Bread"},{"_id":"2","name":"Tomato Soup"}]"#,
/// ).unwrap();
/// let hits = filter_by_name(&recipes, "bread");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id, "1");
/// ```
#[must_use]
pub fn filter_by_name(recipes: &[Recipe], query: &str) -> Vec<Recipe> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return recipes.to_vec();
    }
    recipes.iter().filter(|r| r.name.to_lowercase().contains(&needle)).cloned().collect()
}

/// Slice `items` into the requested 1-based page.
///
/// Page numbers below 1 are treated as 1 and numbers past the end as the
/// last page. An empty input yields a single empty page.
#[must_use]
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_pages = items.len().div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * per_page;
    let end = (start + per_page).min(items.len());
    let items = items.get(start..end).map(<[T]>::to_vec).unwrap_or_default();

    Page { items, page, total_pages }
}
