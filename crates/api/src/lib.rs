//! `api` crate — HTTP REST API layer.
//!
//! Exposes:
//!   GET    /api/products
//!   GET    /api/products/:id
//!   POST   /api/products
//!   PUT    /api/products/:id
//!   DELETE /api/products/:id
//!
//! and the same five routes under `/api/categories` and `/api/tags`.

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use db::DbPool;

pub mod error;
pub mod extract;
pub mod handlers;

pub use error::ApiError;

use handlers::{categories, products, tags};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
}

/// Build the application router over the given pool.
pub fn router(pool: DbPool) -> Router {
    let api = Router::new()
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/:id",
            get(products::get).put(products::update).delete(products::delete),
        )
        .route("/categories", get(categories::list).post(categories::create))
        .route(
            "/categories/:id",
            get(categories::get).put(categories::update).delete(categories::delete),
        )
        .route("/tags", get(tags::list).post(tags::create))
        .route(
            "/tags/:id",
            get(tags::get).put(tags::update).delete(tags::delete),
        );

    Router::new()
        .nest("/api", api)
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState { pool })
}

/// Bind `bind` and serve the API until Ctrl-C.
pub async fn serve(bind: &str, pool: DbPool) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("App listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(pool))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server exited");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown requested");
    }
}
