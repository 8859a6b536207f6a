use actix_web::{middleware, web, App, HttpServer};
use std::io;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

mod handlers;

use sweddy::cache::PlayerCache;
use sweddy::config::ServerConfig;
use sweddy::feed::{EspnClient, FeedConfig, Poller};
use sweddy::store::{BetStore, RoomRegistry};

/// Application state shared across handlers
pub struct AppState {
    pub store: BetStore,
    pub registry: RoomRegistry,
    pub cache: Arc<PlayerCache>,
}

fn io_error(err: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err.to_string())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    let config = ServerConfig::from_env().map_err(io_error)?;

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber).map_err(io_error)?;

    let addr = config.bind_addr();

    info!("Opening data directory {:?}", config.data_dir);
    let cache = Arc::new(PlayerCache::new());
    let app_state = Arc::new(AppState {
        store: BetStore::open(&config.data_dir).map_err(io_error)?,
        registry: RoomRegistry::open(&config.data_dir).map_err(io_error)?,
        cache: cache.clone(),
    });

    let client = EspnClient::new(FeedConfig::default()).map_err(io_error)?;
    let poller = Arc::new(Poller::new(
        client,
        cache,
        config.poll_interval,
        config.poll_date.clone(),
    ));
    for league in config.leagues.iter().copied() {
        info!("Starting {} poller every {:?}", league, config.poll_interval);
        actix_web::rt::spawn(poller.clone().run(league));
    }

    info!("Starting Sweddy API server at http://{}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(middleware::Logger::default())
            .configure(handlers::configure)
    })
    .bind(&addr)?
    .run()
    .await
}
