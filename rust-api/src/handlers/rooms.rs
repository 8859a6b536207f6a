use actix_web::{web, HttpResponse};
use std::sync::Arc;

use super::now_ms;
use crate::AppState;
use sweddy::error::AppError;

// Registry calls run on the blocking pool

/// Recently visited rooms, most recent first
pub async fn list_rooms(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let rooms = web::block(move || state.registry.list(now_ms())).await??;
    Ok(HttpResponse::Ok().json(rooms))
}

pub async fn visit_room(
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let room = path.into_inner();
    let rooms = web::block(move || state.registry.record_visit(&room, now_ms())).await??;
    Ok(HttpResponse::Ok().json(rooms))
}

/// Forget a room; its bets stay on disk
pub async fn remove_room(
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let room = path.into_inner();
    let rooms = web::block(move || state.registry.remove(&room)).await??;
    Ok(HttpResponse::Ok().json(rooms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::configure;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::Value;
    use sweddy::cache::PlayerCache;
    use sweddy::store::{BetStore, RoomRegistry};
    use tempfile::TempDir;

    #[actix_web::test]
    async fn test_visit_list_and_remove_rooms() {
        let dir = TempDir::new().unwrap();
        let state = Arc::new(AppState {
            store: BetStore::open(dir.path()).unwrap(),
            registry: RoomRegistry::open(dir.path()).unwrap(),
            cache: Arc::new(PlayerCache::new()),
        });
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;

        for room in ["alpha", "beta"] {
            let req = test::TestRequest::post()
                .uri(&format!("/api/rooms/{}/visit", room))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        }

        let req = test::TestRequest::get().uri("/api/rooms").to_request();
        let rooms: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(rooms.as_array().map(|r| r.len()), Some(2));

        let req = test::TestRequest::delete().uri("/api/rooms/alpha").to_request();
        let rooms: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(rooms.as_array().map(|r| r.len()), Some(1));
        assert_eq!(rooms[0]["id"], "beta");

        let req = test::TestRequest::post()
            .uri("/api/rooms/bad%20room/visit")
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }
}
