use iron_blog::{csrf, db, store::SqlitePostStore, web, Config, Result};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "iron_blog=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let cookie_key = csrf::signing_key(&config.secret_key)?;

    tracing::info!("Starting iron-blog");
    tracing::info!("Web server will listen on: {}", config.web_addr());

    let db_pool = db::create_pool(&config.database_url).await?;
    db::migrate(&db_pool).await?;

    let store = Arc::new(SqlitePostStore::new(db_pool));
    let app_state = web::AppState::new(store, cookie_key);

    web::serve(config.web_addr(), app_state).await
}
