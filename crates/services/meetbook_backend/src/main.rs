// File: services/meetbook_backend/src/main.rs
use axum::{routing::get, Router};
use meetbook_api::{routes, ApiState};
use meetbook_common::logging;
use meetbook_config::load_config;
use std::error::Error;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    logging::init();

    let config = Arc::new(logging::log_result(
        load_config(),
        "Configuration loaded",
        "Failed to load configuration",
    )?);
    let state = Arc::new(ApiState::from_config(config.clone())?);
    info!(
        "Booking API ready: {} token(s), time zone {}",
        config.api.valid_tokens.len(),
        config.calendar.time_zone
    );

    let booking_router = routes(state);
    #[allow(unused_mut)] // only mutated with the openapi feature
    let mut app = Router::new()
        .route("/", get(|| async { "Welcome to the Meetbook booking API!" }))
        .merge(booking_router.clone())
        .nest("/api", booking_router);

    #[cfg(feature = "openapi")]
    {
        use meetbook_api::doc::BookingApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        info!("Adding Swagger UI at /api/docs");
        let swagger_ui =
            SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", BookingApiDoc::openapi());
        app = app.merge(swagger_ui);
    }

    let app = app
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
