use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;

use crate::error::{AppError, AppResult};

pub mod interaction;
pub mod product;
pub mod recommendation;

pub use interaction::{distinct_product_ids, EventType, Interaction};
pub use product::Product;
pub use recommendation::{
    Recommendation, RecommendationResponse, FALLBACK_EXPLANATION, NO_CANDIDATES_MESSAGE,
    NO_INTERACTIONS_MESSAGE, NO_PREFERENCES_MESSAGE,
};

/// Catalog product identifier (`products.id`)
pub type ProductId = i32;

/// Identifier of the user whose history drives the recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&Value> for UserId {
    type Error = AppError;

    /// Accepts a positive JSON integer or a string holding one
    fn try_from(value: &Value) -> AppResult<Self> {
        let parsed = match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };

        match parsed {
            Some(id) if id > 0 => Ok(UserId(id)),
            _ => Err(AppError::InvalidInput(
                "user_id must be a positive integer".to_string(),
            )),
        }
    }
}

/// Body of `POST /api/recommend`
///
/// Fields are kept loose so that malformed values surface as validation
/// errors (for `user_id`) or fall back to defaults (for `k`) instead of a
/// generic deserialization rejection.
#[derive(Debug, Default, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub k: Option<Value>,
}

impl RecommendationRequest {
    /// Validates the user id; `k` is passed through as a requested count if it is an integer
    pub fn into_parts(self) -> AppResult<(UserId, Option<i64>)> {
        let user_id = match self.user_id.as_ref() {
            None | Some(Value::Null) => {
                return Err(AppError::InvalidInput("user_id is required".to_string()))
            }
            Some(Value::String(s)) if s.trim().is_empty() => {
                return Err(AppError::InvalidInput("user_id is required".to_string()))
            }
            Some(value) => UserId::try_from(value)?,
        };

        let k = self.k.as_ref().and_then(|value| match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        });

        Ok((user_id, k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: Value) -> AppResult<(UserId, Option<i64>)> {
        serde_json::from_value::<RecommendationRequest>(body)
            .unwrap()
            .into_parts()
    }

    #[test]
    fn test_numeric_and_string_user_ids() {
        assert_eq!(parse(json!({ "user_id": 42 })).unwrap(), (UserId(42), None));
        assert_eq!(
            parse(json!({ "user_id": " 17 ", "k": 3 })).unwrap(),
            (UserId(17), Some(3))
        );
    }

    #[test]
    fn test_missing_or_invalid_user_id_is_rejected() {
        for body in [
            json!({}),
            json!({ "user_id": null }),
            json!({ "user_id": "  " }),
            json!({ "user_id": "abc" }),
            json!({ "user_id": -4 }),
            json!({ "user_id": 0 }),
            json!({ "user_id": 1.5 }),
            json!({ "user_id": [1] }),
        ] {
            assert!(
                matches!(parse(body.clone()), Err(AppError::InvalidInput(_))),
                "expected rejection for {}",
                body
            );
        }
    }

    #[test]
    fn test_unparseable_k_is_dropped() {
        assert_eq!(parse(json!({ "user_id": 1, "k": "many" })).unwrap().1, None);
        assert_eq!(parse(json!({ "user_id": 1, "k": 2.5 })).unwrap().1, None);
        assert_eq!(parse(json!({ "user_id": 1, "k": "4" })).unwrap().1, Some(4));
        assert_eq!(parse(json!({ "user_id": 1, "k": -2 })).unwrap().1, Some(-2));
    }
}
