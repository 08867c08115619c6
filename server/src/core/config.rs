use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

const DEFAULT_JWT_SECRET: &str = "un segreto meno bello";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_host: String,
    pub server_port: u16,
    pub max_connections: u32,
    pub media_dir: PathBuf,
    pub media_base_url: String,
    pub max_image_bytes: usize,
    /// File `parola peso` che sostituisce il lessico incorporato
    pub sentiment_lexicon: Option<PathBuf>,
    pub app_env: String,
}

impl Config {
    /// Carica la configurazione dalle variabili d'ambiente
    /// Chiama dotenv() automaticamente
    pub fn from_env() -> Result<Self, String> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Costruisce la configurazione da una funzione di lookup generica (env, mappa nei test)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://chat.db".to_string());

        let jwt_secret = lookup("JWT_SECRET").unwrap_or_else(|| {
            warn!("JWT_SECRET not set, using default (not secure for production!)");
            DEFAULT_JWT_SECRET.to_string()
        });

        let server_host = lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let server_port = lookup("SERVER_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| "Invalid SERVER_PORT: must be a number between 0-65535".to_string())?;

        let max_connections = lookup("MAX_DB_CONNECTIONS")
            .unwrap_or_else(|| "10".to_string())
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| "Invalid MAX_DB_CONNECTIONS: must be a positive number".to_string())?;

        let media_dir = PathBuf::from(lookup("MEDIA_DIR").unwrap_or_else(|| "./media".to_string()));

        let media_base_url = lookup("MEDIA_BASE_URL")
            .unwrap_or_else(|| "/media".to_string())
            .trim_end_matches('/')
            .to_string();

        let max_image_bytes = lookup("MAX_IMAGE_BYTES")
            .unwrap_or_else(|| (5 * 1024 * 1024).to_string())
            .parse::<usize>()
            .map_err(|_| "Invalid MAX_IMAGE_BYTES: must be a positive number".to_string())?;

        let sentiment_lexicon = lookup("SENTIMENT_LEXICON")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let app_env = lookup("APP_ENV").unwrap_or_else(|| "development".to_string());

        Ok(Config {
            database_url,
            jwt_secret,
            server_host,
            server_port,
            max_connections,
            media_dir,
            media_base_url,
            max_image_bytes,
            sentiment_lexicon,
            app_env,
        })
    }

    /// Logga la configurazione (nascondendo i segreti)
    pub fn print_info(&self) {
        info!("Server Configuration:");
        info!("   Environment: {}", self.app_env);
        info!("   Server Address: {}:{}", self.server_host, self.server_port);
        info!("   Database: {}", Self::mask_url(&self.database_url));
        info!("   Max DB Connections: {}", self.max_connections);
        info!("   Media: {} -> {}", self.media_dir.display(), self.media_base_url);
        info!("   Max image size: {} bytes", self.max_image_bytes);
        match &self.sentiment_lexicon {
            Some(path) => info!("   Sentiment lexicon: {}", path.display()),
            None => info!("   Sentiment lexicon: built-in"),
        }
        if self.jwt_secret == DEFAULT_JWT_SECRET {
            warn!("   JWT Secret: USING DEFAULT (INSECURE!)");
        } else {
            info!("   JWT Secret: custom secret configured");
        }
    }

    /// Maschera le credenziali nell'URL del database per il logging
    fn mask_url(url: &str) -> String {
        if let Some(at_pos) = url.find('@') {
            if let Some(scheme_end) = url.find("://") {
                let scheme = &url[..scheme_end + 3];
                let after_at = &url[at_pos..];
                return format!("{}***{}", scheme, after_at);
            }
            return "***".to_string();
        }
        // nessuna credenziale (es. file sqlite)
        url.to_string()
    }
}
