use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use super::{Product, ProductId};

/// Explanation used when the explanation service fails for a candidate
pub const FALLBACK_EXPLANATION: &str = "No explanation available.";

pub const NO_INTERACTIONS_MESSAGE: &str = "No interactions found for this user.";
pub const NO_PREFERENCES_MESSAGE: &str = "Could not determine user preferences.";
pub const NO_CANDIDATES_MESSAGE: &str = "No new recommendations found in preferred categories.";

/// A recommended product with its justification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub product_id: ProductId,
    pub title: String,
    pub price: BigDecimal,
    pub category: String,
    pub explanation: String,
}

impl Recommendation {
    pub fn new(product: Product, explanation: String) -> Self {
        Self {
            product_id: product.id,
            title: product.title,
            price: product.price,
            category: product.category,
            explanation,
        }
    }
}

/// Result of one recommendation request
///
/// `message` is only set when `recommendations` is empty and explains why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<Recommendation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RecommendationResponse {
    pub fn empty(message: &str) -> Self {
        Self {
            recommendations: Vec::new(),
            message: Some(message.to_string()),
        }
    }

    pub fn populated(recommendations: Vec<Recommendation>) -> Self {
        Self {
            recommendations,
            message: None,
        }
    }
}
