use actix_web::{web, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;

use super::now_ms;
use crate::AppState;
use sweddy::core::{to_views, SortMode};
use sweddy::enrich::{enrich_bet, enrich_bets};
use sweddy::error::{validate_bet_request, AppError};
use sweddy::models::{Bet, BetRequest, BetView, DeleteResponse};

#[derive(Debug, Deserialize)]
pub struct BetsQuery {
    pub sort: Option<String>,
}

fn view_of(state: &AppState, bet: &Bet) -> Option<BetView> {
    to_views(vec![enrich_bet(bet, state.cache.as_ref())]).pop()
}

/// Room bets with live values, in the requested order
pub async fn list_bets(
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
    query: web::Query<BetsQuery>,
) -> Result<HttpResponse, AppError> {
    let mode = match query.sort.as_deref() {
        Some(raw) if !raw.trim().is_empty() => {
            raw.parse::<SortMode>().map_err(AppError::ValidationError)?
        }
        _ => SortMode::default(),
    };

    let room = path.into_inner();
    let store_state = state.clone();
    let bets = web::block(move || store_state.store.bets(&room)).await??;
    let enriched = enrich_bets(&bets, state.cache.as_ref());
    Ok(HttpResponse::Ok().json(to_views(mode.apply(enriched))))
}

pub async fn create_bet(
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
    req: web::Json<BetRequest>,
) -> Result<HttpResponse, AppError> {
    validate_bet_request(&req.legs, req.bet_amount, req.payout_amount)?;

    let room = path.into_inner();
    let req = req.into_inner();
    let store_state = state.clone();
    let bet = web::block(move || store_state.store.create_bet(&room, req, now_ms())).await??;
    Ok(HttpResponse::Created().json(view_of(&state, &bet)))
}

/// Replace a bet's legs and amounts, keeping its id
pub async fn update_bet(
    state: web::Data<Arc<AppState>>,
    path: web::Path<(String, String)>,
    req: web::Json<BetRequest>,
) -> Result<HttpResponse, AppError> {
    validate_bet_request(&req.legs, req.bet_amount, req.payout_amount)?;

    let (room, id) = path.into_inner();
    let req = req.into_inner();
    let store_state = state.clone();
    let bet = web::block(move || store_state.store.update_bet(&room, &id, req)).await??;
    Ok(HttpResponse::Ok().json(view_of(&state, &bet)))
}

pub async fn delete_bet(
    state: web::Data<Arc<AppState>>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (room, id) = path.into_inner();
    let message = format!("Deleted {}", id);
    web::block(move || state.store.delete_bet(&room, &id)).await??;
    Ok(HttpResponse::Ok().json(DeleteResponse {
        success: true,
        message,
    }))
}

pub async fn delete_leg(
    state: web::Data<Arc<AppState>>,
    path: web::Path<(String, String, usize)>,
) -> Result<HttpResponse, AppError> {
    let (room, id, index) = path.into_inner();
    let store_state = state.clone();
    let bet = web::block(move || store_state.store.delete_leg(&room, &id, index)).await??;
    Ok(HttpResponse::Ok().json(view_of(&state, &bet)))
}
