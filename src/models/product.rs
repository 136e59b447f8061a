use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use super::ProductId;

/// Catalog product as stored in the `products` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: BigDecimal,
    pub category: String,
}
