use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use rand::seq::SliceRandom;

use crate::{
    db::CatalogStore,
    error::{AppError, AppResult},
    models::{Interaction, Product, ProductId, UserId},
};

#[derive(Default)]
struct Catalog {
    products: Vec<Product>,
    interactions: HashMap<UserId, Vec<Interaction>>,
}

/// Catalog store kept in process memory
///
/// Used for local runs and tests. There is no native random ordering here,
/// so sampling filters the eligible rows and shuffles them explicitly before
/// truncating to the requested size.
#[derive(Clone, Default)]
pub struct InMemoryCatalogStore {
    inner: Arc<RwLock<Catalog>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_product(&self, product: Product) -> AppResult<()> {
        let mut catalog = self.write()?;
        catalog.products.retain(|existing| existing.id != product.id);
        catalog.products.push(product);
        Ok(())
    }

    pub fn record_interaction(&self, user_id: UserId, interaction: Interaction) -> AppResult<()> {
        let mut catalog = self.write()?;
        catalog
            .interactions
            .entry(user_id)
            .or_default()
            .push(interaction);
        Ok(())
    }

    fn read(&self) -> AppResult<std::sync::RwLockReadGuard<'_, Catalog>> {
        self.inner
            .read()
            .map_err(|_| AppError::Internal("catalog lock poisoned".to_string()))
    }

    fn write(&self) -> AppResult<std::sync::RwLockWriteGuard<'_, Catalog>> {
        self.inner
            .write()
            .map_err(|_| AppError::Internal("catalog lock poisoned".to_string()))
    }
}

#[async_trait::async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn recent_interactions(
        &self,
        user_id: UserId,
        limit: i64,
    ) -> AppResult<Vec<Interaction>> {
        let catalog = self.read()?;
        let mut history = catalog
            .interactions
            .get(&user_id)
            .cloned()
            .unwrap_or_default();

        history.sort_by(|a, b| b.event_ts.cmp(&a.event_ts));
        history.truncate(limit.max(0) as usize);
        Ok(history)
    }

    async fn categories_for(&self, product_ids: &[ProductId]) -> AppResult<Vec<String>> {
        let catalog = self.read()?;
        let mut seen = HashSet::new();

        Ok(product_ids
            .iter()
            .filter(|id| seen.insert(**id))
            .filter_map(|id| catalog.products.iter().find(|p| p.id == *id))
            .map(|p| p.category.clone())
            .collect())
    }

    async fn sample_products(
        &self,
        categories: &[String],
        excluded: &[ProductId],
        limit: i64,
    ) -> AppResult<Vec<Product>> {
        let catalog = self.read()?;
        let mut eligible: Vec<Product> = catalog
            .products
            .iter()
            .filter(|p| categories.contains(&p.category) && !excluded.contains(&p.id))
            .cloned()
            .collect();

        eligible.shuffle(&mut rand::thread_rng());
        eligible.truncate(limit.max(0) as usize);
        Ok(eligible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventType;
    use bigdecimal::BigDecimal;
    use chrono::{Duration, Utc};

    fn product(id: ProductId, category: &str) -> Product {
        Product {
            id,
            title: format!("Product {}", id),
            description: String::new(),
            price: BigDecimal::from(10),
            category: category.to_string(),
        }
    }

    fn store_with_history() -> InMemoryCatalogStore {
        let store = InMemoryCatalogStore::new();
        for (id, category) in [(1, "Books"), (2, "Books"), (3, "Electronics"), (4, "Books"), (5, "Toys")] {
            store.add_product(product(id, category)).unwrap();
        }

        let now = Utc::now();
        for (product_id, minutes_ago) in [(1, 5), (3, 1), (2, 3)] {
            store
                .record_interaction(
                    UserId(9),
                    Interaction {
                        product_id,
                        event_type: EventType::View,
                        event_ts: now - Duration::minutes(minutes_ago),
                    },
                )
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_recent_interactions_newest_first_and_bounded() {
        let store = store_with_history();

        let history = store.recent_interactions(UserId(9), 2).await.unwrap();
        let ids: Vec<ProductId> = history.iter().map(|i| i.product_id).collect();
        assert_eq!(ids, vec![3, 2]);

        assert!(store.recent_interactions(UserId(10), 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_categories_follow_supplied_order_and_skip_missing() {
        let store = store_with_history();

        let categories = store.categories_for(&[3, 99, 1, 3]).await.unwrap();
        assert_eq!(categories, vec!["Electronics", "Books"]);
    }

    #[tokio::test]
    async fn test_sample_respects_filters_and_limit() {
        let store = store_with_history();
        let categories = vec!["Books".to_string(), "Electronics".to_string()];

        let sample = store.sample_products(&categories, &[1, 2, 3], 10).await.unwrap();
        assert_eq!(sample.len(), 1);
        assert_eq!(sample[0].id, 4);

        let sample = store.sample_products(&categories, &[], 2).await.unwrap();
        assert_eq!(sample.len(), 2);
        assert!(sample.iter().all(|p| p.category != "Toys"));
    }
}
