use actix_web::{web, HttpResponse};
use serde::Deserialize;

use sweddy::core::{block_size_of, format_stat_label, stats_for_league};
use sweddy::error::AppError;
use sweddy::models::{League, StatEntry, StatsResponse};

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub league: Option<String>,
}

/// Stat catalog for one league
pub async fn list_stats(query: web::Query<StatsQuery>) -> Result<HttpResponse, AppError> {
    let league: League = query
        .league
        .as_deref()
        .ok_or_else(|| AppError::ValidationError("league is required".to_string()))?
        .parse()
        .map_err(AppError::ValidationError)?;

    let stats = stats_for_league(league)
        .into_iter()
        .map(|key| StatEntry {
            key: key.to_string(),
            label: format_stat_label(key),
            block_size: block_size_of(key),
        })
        .collect();

    Ok(HttpResponse::Ok().json(StatsResponse { league, stats }))
}
