use std::collections::HashMap;

use crate::{db::CatalogStore, error::AppResult, models::ProductId};

/// Ranks categories by occurrence count, highest first, keeping at most `top_n`
///
/// Equal counts keep the order in which the categories were first seen.
pub fn rank_categories<I>(categories: I, top_n: usize) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for category in categories {
        match positions.get(&category) {
            Some(&index) => counts[index].1 += 1,
            None => {
                positions.insert(category.clone(), counts.len());
                counts.push((category, 1));
            }
        }
    }

    // sort_by is stable, which preserves first-seen order on ties
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(top_n)
        .map(|(category, _)| category)
        .collect()
}

/// Infers the user's preferred categories from the products they touched
///
/// One batched lookup resolves the categories; an empty result means the
/// referenced products no longer exist and nothing can be inferred.
pub async fn infer_preferences(
    store: &dyn CatalogStore,
    product_ids: &[ProductId],
    top_n: usize,
) -> AppResult<Vec<String>> {
    if product_ids.is_empty() {
        return Ok(Vec::new());
    }

    let categories = store.categories_for(product_ids).await?;
    let preferred = rank_categories(categories, top_n);

    tracing::debug!(
        products = product_ids.len(),
        categories = ?preferred,
        "Preferences inferred"
    );

    Ok(preferred)
}
