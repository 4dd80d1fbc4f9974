//! # Wall Server
//!
//! The main entry point for the Actix-web HTTP server.

use std::io;
use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use wall_core::ports::RateLimiter;

mod background;
mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

use config::AppConfig;
use middleware::rate_limit::RateLimitMiddleware;
use observability::RequestIdMiddleware;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting wall server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(config.database.as_ref(), &config.wall).await;

    #[cfg(feature = "rate-limit")]
    let keyed_limiter = Arc::new(
        wall_infra::KeyedRateLimiter::new(&config.rate_limit).map_err(io::Error::other)?,
    );
    #[cfg(feature = "rate-limit")]
    let write_limiter: Option<Arc<dyn RateLimiter>> = Some(keyed_limiter.clone());
    #[cfg(not(feature = "rate-limit"))]
    let write_limiter: Option<Arc<dyn RateLimiter>> = None;

    #[cfg(feature = "scheduler")]
    let mut scheduler = {
        let scheduler = background::Scheduler::new(config.scheduler.clone())
            .await
            .map_err(io::Error::other)?;

        let filler: Arc<dyn wall_core::ports::FillerSource> =
            if config.wall.filler_phrases.is_empty() {
                Arc::new(wall_infra::RotatingFillerSource::default())
            } else {
                Arc::new(wall_infra::RotatingFillerSource::new(
                    config.wall.filler_phrases.clone(),
                ))
            };
        background::jobs::register(&scheduler, &config.scheduler, state.wall.clone(), filler)
            .await
            .map_err(io::Error::other)?;

        #[cfg(feature = "rate-limit")]
        {
            let limiter = keyed_limiter.clone();
            scheduler
                .add_cron(&config.scheduler.sweep_cron, move || {
                    let limiter = limiter.clone();
                    async move { limiter.prune() }
                })
                .await
                .map_err(io::Error::other)?;
        }

        scheduler.start().await.map_err(io::Error::other)?;
        scheduler
    };

    let server = HttpServer::new(move || {
        App::new()
            .wrap(RateLimitMiddleware::new(write_limiter.clone()))
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await;

    #[cfg(feature = "scheduler")]
    if let Err(e) = scheduler.shutdown().await {
        tracing::warn!(error = %e, "Scheduler did not shut down cleanly");
    }

    server
}
