use crate::{
    db::CatalogStore,
    error::AppResult,
    models::{Product, ProductId},
};

/// Requested recommendation count, or `default` when absent or not positive,
/// never above `max`
pub fn resolve_count(requested: Option<i64>, default: i64, max: i64) -> i64 {
    let count = match requested {
        Some(k) if k > 0 => k,
        _ => default,
    };
    count.min(max)
}

/// Draws up to `count` unseen products from the preferred categories
///
/// The order is a uniform random sample; two calls with the same inputs may
/// differ. An empty result means nothing new is eligible.
pub async fn select_candidates(
    store: &dyn CatalogStore,
    preferred: &[String],
    excluded: &[ProductId],
    count: i64,
) -> AppResult<Vec<Product>> {
    if preferred.is_empty() || count <= 0 {
        return Ok(Vec::new());
    }

    let candidates = store.sample_products(preferred, excluded, count).await?;

    tracing::debug!(
        categories = ?preferred,
        excluded = excluded.len(),
        requested = count,
        selected = candidates.len(),
        "Candidates selected"
    );

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MockCatalogStore;

    #[test]
    fn test_resolve_count() {
        assert_eq!(resolve_count(None, 5, 20), 5);
        assert_eq!(resolve_count(Some(0), 5, 20), 5);
        assert_eq!(resolve_count(Some(-3), 5, 20), 5);
        assert_eq!(resolve_count(Some(1), 5, 20), 1);
        assert_eq!(resolve_count(Some(20), 5, 20), 20);
    }

    #[test]
    fn test_resolve_count_is_capped() {
        assert_eq!(resolve_count(Some(10_000), 5, 20), 20);
        assert_eq!(resolve_count(Some(i64::MAX), 5, 20), 20);
        assert_eq!(resolve_count(None, 5, 3), 3);
    }

    #[tokio::test]
    async fn test_select_passes_filters_to_store() {
        let mut store = MockCatalogStore::new();
        store
            .expect_sample_products()
            .withf(|categories, excluded, limit| {
                categories == ["Books".to_string()] && excluded == [1, 2] && *limit == 3
            })
            .times(1)
            .returning(|_, _, _| Ok(Vec::new()));

        let selected = select_candidates(&store, &["Books".to_string()], &[1, 2], 3)
            .await
            .unwrap();
        assert!(selected.is_empty());
    }

    #[tokio::test]
    async fn test_select_without_preferences_skips_store() {
        let mut store = MockCatalogStore::new();
        store.expect_sample_products().times(0);

        assert!(select_candidates(&store, &[], &[1], 5).await.unwrap().is_empty());
    }
}
