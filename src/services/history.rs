use crate::{
    db::CatalogStore,
    error::AppResult,
    models::{Interaction, UserId},
};

/// Fetches the user's most recent interactions, newest first
///
/// Storage failures are returned as-is; there is no retry.
pub async fn read_history(
    store: &dyn CatalogStore,
    user_id: UserId,
    limit: i64,
) -> AppResult<Vec<Interaction>> {
    let history = store.recent_interactions(user_id, limit).await?;

    tracing::debug!(
        user_id = %user_id,
        limit,
        interactions = history.len(),
        "History loaded"
    );

    Ok(history)
}
