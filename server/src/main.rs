use emotion::{Lexicon, SentimentClassifier};
use server::config::Config;
use server::media::LocalMediaStore;
use server::{AppState, create_router};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env prima del logging, così anche RUST_LOG può venire da lì
    dotenv::dotenv().ok();

    // Init logging prima della configurazione: i suoi warning devono arrivare al subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=debug,emotion=debug,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    config.print_info();

    // Database: il file viene creato se non esiste, poi si applicano le migrations
    let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database ready");

    // Classificatore autorevole: lessico incorporato o file configurato
    let lexicon = match &config.sentiment_lexicon {
        Some(path) => Lexicon::load(path)?,
        None => Lexicon::builtin(),
    };
    info!("Sentiment lexicon loaded with {} words", lexicon.len());
    let classifier = SentimentClassifier::new(lexicon);

    tokio::fs::create_dir_all(&config.media_dir).await?;
    let media = LocalMediaStore::new(
        config.media_dir.clone(),
        config.media_base_url.clone(),
        config.max_image_bytes,
    );

    let state = Arc::new(AppState::new(
        pool,
        config.jwt_secret.clone(),
        classifier,
        media,
    ));

    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port).parse()?;
    info!("Server listening on http://{}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
