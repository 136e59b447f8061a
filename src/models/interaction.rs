use chrono::{DateTime, Utc};
use std::fmt::Display;

use super::ProductId;

/// Kind of action a user performed on a product
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventType {
    View,
    Click,
    AddToCart,
    Purchase,
    /// Any event label the catalog records that we do not distinguish
    Other(String),
}

impl From<&str> for EventType {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "view" => EventType::View,
            "click" => EventType::Click,
            "add_to_cart" | "cart" => EventType::AddToCart,
            "purchase" => EventType::Purchase,
            _ => EventType::Other(value.to_string()),
        }
    }
}

impl From<String> for EventType {
    fn from(value: String) -> Self {
        EventType::from(value.as_str())
    }
}

impl Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventType::View => write!(f, "view"),
            EventType::Click => write!(f, "click"),
            EventType::AddToCart => write!(f, "add_to_cart"),
            EventType::Purchase => write!(f, "purchase"),
            EventType::Other(label) => write!(f, "{}", label),
        }
    }
}

/// A recorded user action on a product
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    pub product_id: ProductId,
    pub event_type: EventType,
    pub event_ts: DateTime<Utc>,
}

/// Distinct product ids of a history, keeping the first (most recent) occurrence order
pub fn distinct_product_ids(history: &[Interaction]) -> Vec<ProductId> {
    let mut seen = std::collections::HashSet::new();
    history
        .iter()
        .map(|interaction| interaction.product_id)
        .filter(|id| seen.insert(*id))
        .collect()
}
