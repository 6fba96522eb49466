//! Fairness recorder — turns a scored session into a persisted result row.
//!
//! File access is blocking, so it runs on tokio's blocking pool.

use anyhow::anyhow;

use crate::errors::AppError;
use crate::fairness::store::{ResultRecord, ResultStore};
use crate::models::candidate::CandidateProfile;

/// Appends the candidate's row and returns it together with the updated table.
pub async fn record(
    store: &ResultStore,
    profile: &CandidateProfile,
    score: i64,
) -> Result<(ResultRecord, Vec<ResultRecord>), AppError> {
    let row = ResultRecord::new(profile, score);
    let store = store.clone();
    let appended = row.clone();

    let table = tokio::task::spawn_blocking(move || store.append(appended))
        .await
        .map_err(|e| AppError::Internal(anyhow!("result store task failed: {e}")))??;

    Ok((row, table))
}

/// Reads the whole results file.
pub async fn load_all(store: &ResultStore) -> Result<Vec<ResultRecord>, AppError> {
    let store = store.clone();
    let records = tokio::task::spawn_blocking(move || store.load())
        .await
        .map_err(|e| AppError::Internal(anyhow!("result store task failed: {e}")))??;
    Ok(records)
}
