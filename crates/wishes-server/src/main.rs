use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use wishes_api::pipeline::WishConfig;
use wishes_api::routes::{self, AppState};
use wishes_store::DocumentStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wishes=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let host = std::env::var("WISHES_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("WISHES_PORT")
        .unwrap_or_else(|_| "8000".into())
        .parse()?;
    let db_path = std::env::var("WISHES_DB_PATH").unwrap_or_else(|_| "wishes.db".into());

    let mut config = WishConfig::default();
    if let Ok(limit) = std::env::var("WISHES_DEFAULT_LIMIT") {
        config.default_limit = limit.parse()?;
    }
    if let Ok(placeholder) = std::env::var("WISHES_NAME_PLACEHOLDER") {
        config.name_placeholder = placeholder;
    }

    // Init storage
    let store = DocumentStore::open(&PathBuf::from(&db_path))?;

    let state = AppState {
        store: Arc::new(store),
        config: Arc::new(config),
    };

    // CORS is wide open on purpose: the wish wall is a public form.
    let app = routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Birthday wishes server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
