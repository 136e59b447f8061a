use crate::{
    error::AppResult,
    models::{Interaction, Product, ProductId, UserId},
};

/// Read-only access to the interaction and product catalog
///
/// Implementations borrow a connection per call and release it before
/// returning, so callers never hold database resources across awaits on
/// other services.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    /// Most recent `limit` interactions of the user, newest first
    async fn recent_interactions(&self, user_id: UserId, limit: i64)
        -> AppResult<Vec<Interaction>>;

    /// One category per existing product in `product_ids`
    ///
    /// Rows come back in the order the ids were supplied; ids with no
    /// matching product are skipped.
    async fn categories_for(&self, product_ids: &[ProductId]) -> AppResult<Vec<String>>;

    /// Up to `limit` products in `categories` whose id is not in `excluded`,
    /// in uniformly random order
    async fn sample_products(
        &self,
        categories: &[String],
        excluded: &[ProductId],
        limit: i64,
    ) -> AppResult<Vec<Product>>;
}
