mod handlers;
mod routes;


use axum::Router;
use chrono::NaiveDate;
use std::sync::Arc;
use tower_cookies::Key;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::store::PostStore;

pub use routes::create_routes;

#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostStore>,
    pub cookie_key: Key,
    /// Source of the date stamped on created and edited posts.
    pub today: fn() -> NaiveDate,
}

impl AppState {
    pub fn new(posts: Arc<dyn PostStore>, cookie_key: Key) -> Arc<Self> {
        Self::with_clock(posts, cookie_key, local_today)
    }

    pub fn with_clock(
        posts: Arc<dyn PostStore>,
        cookie_key: Key,
        today: fn() -> NaiveDate,
    ) -> Arc<Self> {
        Arc::new(Self {
            posts,
            cookie_key,
            today,
        })
    }
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub async fn serve(addr: String, state: Arc<AppState>) -> crate::Result<()> {
    let app = Router::new()
        .merge(routes::create_routes())
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| crate::Error::Internal(e.to_string()))?;

    tracing::info!("Web server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::warn!("Ctrl+C received, shutting down"),
        _ = terminate => tracing::warn!("SIGTERM received, shutting down"),
    }
}
