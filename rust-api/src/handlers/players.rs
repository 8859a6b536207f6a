use actix_web::{web, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;

use crate::AppState;
use sweddy::cache::DEFAULT_SEARCH_LIMIT;
use sweddy::error::AppError;
use sweddy::models::{League, SearchPlayersResponse};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub league: Option<String>,
    pub limit: Option<usize>,
}

/// Search cached players by name
pub async fn search_players(
    state: web::Data<Arc<AppState>>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    let league = query
        .league
        .as_deref()
        .filter(|l| !l.trim().is_empty())
        .map(str::parse::<League>)
        .transpose()
        .map_err(AppError::ValidationError)?;

    let players = state.cache.search(
        &query.q,
        league,
        query.limit.unwrap_or(DEFAULT_SEARCH_LIMIT),
    );
    let total = players.len();

    Ok(HttpResponse::Ok().json(SearchPlayersResponse { players, total }))
}
