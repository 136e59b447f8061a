use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;

use crate::{
    models::{Product, FALLBACK_EXPLANATION},
    services::providers::ExplanationProvider,
};

/// System instruction shared by every explanation request
pub const EXPLANATION_PERSONA: &str = "You are a recommendation system analyst. Your task is to write a concise, data-driven explanation for a product recommendation. The explanation must be factual, impersonal, and specific to the product being recommended. Do not address the user directly.";

/// Builds the per-product prompt grounded in the user's preferred categories
pub fn build_prompt(preferred: &[String], product: &Product) -> String {
    format!(
        "Context:\n\
         - User's top interested categories from recent activity: {categories}.\n\
         - Recommended product title: \"{title}\".\n\
         - Recommended product category: \"{category}\".\n\
         - Recommended product description: \"{description}\".\n\
         \n\
         Task:\n\
         Write a brief, impersonal, and factual explanation for this recommendation in a single sentence. \
         Connect the user's interest in the '{category}' category with a specific feature or aspect of this \
         particular product from its title or description.\n",
        categories = preferred.join(", "),
        title = product.title,
        category = product.category,
        description = product.description,
    )
}

/// Requests one explanation per candidate concurrently
///
/// Every request runs in its own task with its own timeout. Results are
/// written back by candidate index, so the returned explanations line up with
/// `candidates` whatever order the calls finish in. A failed, timed-out or
/// panicked request yields [`FALLBACK_EXPLANATION`] for that item only.
pub async fn enrich(
    provider: Arc<dyn ExplanationProvider>,
    preferred: &[String],
    candidates: &[Product],
    timeout: Duration,
) -> Vec<String> {
    let mut tasks = JoinSet::new();

    for (index, product) in candidates.iter().enumerate() {
        let provider = provider.clone();
        let prompt = build_prompt(preferred, product);
        let product_id = product.id;

        tasks.spawn(async move {
            let outcome =
                tokio::time::timeout(timeout, provider.generate(EXPLANATION_PERSONA, &prompt)).await;

            let explanation = match outcome {
                Ok(Ok(text)) => Some(text),
                Ok(Err(e)) => {
                    tracing::warn!(
                        product_id,
                        provider = provider.name(),
                        error = %e,
                        "Explanation request failed, using fallback"
                    );
                    None
                }
                Err(_) => {
                    tracing::warn!(
                        product_id,
                        provider = provider.name(),
                        timeout_ms = timeout.as_millis() as u64,
                        "Explanation request timed out, using fallback"
                    );
                    None
                }
            };

            (index, explanation)
        });
    }

    let mut slots: Vec<Option<String>> = vec![None; candidates.len()];
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, explanation)) => slots[index] = explanation,
            Err(e) => tracing::error!(error = %e, "Explanation task join error"),
        }
    }

    let fallbacks = slots.iter().filter(|slot| slot.is_none()).count();
    if fallbacks > 0 {
        tracing::warn!(
            total = candidates.len(),
            fallbacks,
            "Partial explanation failure"
        );
    }

    slots
        .into_iter()
        .map(|slot| slot.unwrap_or_else(|| FALLBACK_EXPLANATION.to_string()))
        .collect()
}
