use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::instrument;

use crate::{
    db::CatalogStore,
    error::AppResult,
    models::{
        distinct_product_ids, Product, Recommendation, RecommendationResponse, UserId,
        NO_CANDIDATES_MESSAGE, NO_INTERACTIONS_MESSAGE, NO_PREFERENCES_MESSAGE,
    },
    services::{
        candidates::{resolve_count, select_candidates},
        explanations::enrich,
        history::read_history,
        preferences::infer_preferences,
        providers::ExplanationProvider,
    },
};

/// Tunables for the recommendation pipeline
#[derive(Debug, Clone)]
pub struct RecommenderSettings {
    /// Size of the recent-interaction window
    pub history_limit: i64,
    /// Number of preferred categories kept
    pub top_categories: usize,
    /// Count used when the caller gives no usable `k`
    pub default_k: i64,
    /// Upper bound on candidates, and so on concurrent explanation calls
    pub max_k: i64,
    /// Per-candidate explanation timeout
    pub explanation_timeout: Duration,
}

impl Default for RecommenderSettings {
    fn default() -> Self {
        Self {
            history_limit: 10,
            top_categories: 2,
            default_k: 5,
            max_k: 20,
            explanation_timeout: Duration::from_secs(10),
        }
    }
}

/// Generates personalized recommendations
///
/// Runs history → preferences → candidates sequentially against the store,
/// then fans out explanation requests and assembles the result. Each of the
/// first three stages can end the request early with an empty, explained
/// response; only store failures surface as errors.
pub struct Recommender {
    store: Arc<dyn CatalogStore>,
    explainer: Arc<dyn ExplanationProvider>,
    settings: RecommenderSettings,
}

impl Recommender {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        explainer: Arc<dyn ExplanationProvider>,
        settings: RecommenderSettings,
    ) -> Self {
        Self {
            store,
            explainer,
            settings,
        }
    }

    #[instrument(skip_all, fields(user_id = %user_id, requested = ?k))]
    pub async fn generate_recommendations(
        &self,
        user_id: UserId,
        k: Option<i64>,
    ) -> AppResult<RecommendationResponse> {
        let start = Instant::now();
        let count = resolve_count(k, self.settings.default_k, self.settings.max_k);

        // 1. Recent history
        let history = read_history(self.store.as_ref(), user_id, self.settings.history_limit).await?;
        if history.is_empty() {
            tracing::info!("No interactions recorded");
            return Ok(RecommendationResponse::empty(NO_INTERACTIONS_MESSAGE));
        }
        let seen = distinct_product_ids(&history);

        // 2. Preferred categories
        let preferred =
            infer_preferences(self.store.as_ref(), &seen, self.settings.top_categories).await?;
        if preferred.is_empty() {
            tracing::info!(seen = seen.len(), "No categories resolved from history");
            return Ok(RecommendationResponse::empty(NO_PREFERENCES_MESSAGE));
        }

        // 3. Unseen products in those categories
        let candidates = select_candidates(self.store.as_ref(), &preferred, &seen, count).await?;
        if candidates.is_empty() {
            tracing::info!(categories = ?preferred, "No eligible candidates");
            return Ok(RecommendationResponse::empty(NO_CANDIDATES_MESSAGE));
        }

        // 4. Explanations, one concurrent request per candidate
        let explanations = enrich(
            self.explainer.clone(),
            &preferred,
            &candidates,
            self.settings.explanation_timeout,
        )
        .await;

        // 5. Assembly
        let recommendations = assemble(candidates, explanations);

        tracing::info!(
            categories = ?preferred,
            requested = count,
            returned = recommendations.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Recommendations generated"
        );

        Ok(RecommendationResponse::populated(recommendations))
    }
}

/// Pairs each candidate with the explanation at the same position
pub fn assemble(candidates: Vec<Product>, explanations: Vec<String>) -> Vec<Recommendation> {
    candidates
        .into_iter()
        .zip(explanations)
        .map(|(product, explanation)| Recommendation::new(product, explanation))
        .collect()
}
