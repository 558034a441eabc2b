use crate::{routes, AppConfig};
use axum::{Extension, Router};
use http::{header, Method};
use sea_orm::DatabaseConnection;
use sentry_tower::NewSentryLayer;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

pub fn create_app(app_config: AppConfig, origins: Vec<String>, conn: DatabaseConnection) -> anyhow::Result<Router> {
    // CORS for login routes - users don't have credentials yet during authentication
    let login_cors = CorsLayer::new()
        .allow_origin(
            origins
                .iter()
                .map(|origin| origin.parse())
                .collect::<Result<Vec<_>, _>>()?,
        )
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE, header::ORIGIN])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .max_age(Duration::from_secs(3600));

    // CORS for API routes - users have credentials for authenticated endpoints
    let api_cors = CorsLayer::new()
        .allow_origin(
            origins
                .iter()
                .map(|origin| origin.parse())
                .collect::<Result<Vec<_>, _>>()?,
        )
        .allow_headers([
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ORIGIN,
        ])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .max_age(Duration::from_secs(3600));

    let app = Router::new()
        .merge(routes::swagger::create_router())
        .merge(routes::login::create_router().layer(login_cors))
        .nest(
            "/api/v0",
            Router::new()
                .nest("/status", routes::api::v0::status::create_router())
                .nest("/user", routes::api::v0::user::create_router())
                .nest("/uploads", routes::api::v0::uploads::create_router())
                .nest("/summaries", routes::api::v0::summaries::create_router())
                .nest("/flashcards", routes::api::v0::flashcards::create_router())
                .nest("/quizzes", routes::api::v0::quizzes::create_router())
                .nest("/artifacts", routes::api::v0::artifacts::create_router())
                .nest("/process", routes::api::v0::process::create_router())
                .layer(api_cors),
        )
        .layer(
            // Router layers are called bottom to top
            // ServiceBuilder layers are called top to bottom
            ServiceBuilder::new()
                .layer(NewSentryLayer::new_from_top())
                .layer(sentry_tower::SentryHttpLayer::with_transaction())
                .layer(Extension(app_config))
                .layer(Extension(conn)),
        )
        .with_state(());
    Ok(app)
}
