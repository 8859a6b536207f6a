use actix_web::web;

pub mod bets;
pub mod health;
pub mod players;
pub mod rooms;
pub mod stats;

/// Current time as unix millis
pub(crate) fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Register all routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check)).service(
        web::scope("/api")
            .route("/rooms", web::get().to(rooms::list_rooms))
            .route("/rooms/{room}/visit", web::post().to(rooms::visit_room))
            .route("/rooms/{room}", web::delete().to(rooms::remove_room))
            .route("/rooms/{room}/bets", web::get().to(bets::list_bets))
            .route("/rooms/{room}/bets", web::post().to(bets::create_bet))
            .route("/rooms/{room}/bets/{id}", web::put().to(bets::update_bet))
            .route("/rooms/{room}/bets/{id}", web::delete().to(bets::delete_bet))
            .route(
                "/rooms/{room}/bets/{id}/legs/{index}",
                web::delete().to(bets::delete_leg),
            )
            .route("/players/search", web::get().to(players::search_players))
            .route("/stats", web::get().to(stats::list_stats)),
    );
}
