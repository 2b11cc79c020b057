use std::path::PathBuf;

use brandpanel_core::stations::{BrandBitMap, DEFAULT_BRAND_BITS};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, issuer, audience, expiry).
    pub jwt: JwtConfig,
    pub media: MediaConfig,
    pub station_feed: StationFeedConfig,
    pub seed: SeedConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    ///
    /// Nested sections read their own variables; see [`JwtConfig::from_env`],
    /// [`MediaConfig::from_env`], [`StationFeedConfig::from_env`] and
    /// [`SeedConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            media: MediaConfig::from_env(),
            station_feed: StationFeedConfig::from_env(),
            seed: SeedConfig::from_env(),
        }
    }
}

// ---------------------------------------------------------------------------
// Media storage
// ---------------------------------------------------------------------------

/// Local storage for uploaded media files.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Directory uploaded files are written to.
    pub root: PathBuf,
    /// URL prefix under which stored files are served. When it starts with
    /// `/` the server itself serves `root` there.
    pub base_url: String,
    /// Largest accepted upload in bytes.
    pub max_upload_bytes: usize,
}

impl MediaConfig {
    /// | Env Var                  | Default        |
    /// |--------------------------|----------------|
    /// | `MEDIA_ROOT`             | `./media`      |
    /// | `MEDIA_BASE_URL`         | `/media-files` |
    /// | `MEDIA_MAX_UPLOAD_BYTES` | `20971520`     |
    pub fn from_env() -> Self {
        let root = std::env::var("MEDIA_ROOT").unwrap_or_else(|_| "./media".into());
        let base_url = std::env::var("MEDIA_BASE_URL").unwrap_or_else(|_| "/media-files".into());
        let max_upload_bytes: usize = std::env::var("MEDIA_MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| "20971520".into())
            .parse()
            .expect("MEDIA_MAX_UPLOAD_BYTES must be a valid usize");

        Self {
            root: PathBuf::from(root),
            base_url: base_url.trim_end_matches('/').to_string(),
            max_upload_bytes,
        }
    }

    /// Public URL of a stored object.
    pub fn public_url(&self, storage_key: &str) -> String {
        format!("{}/{storage_key}", self.base_url)
    }
}

// ---------------------------------------------------------------------------
// Station feed
// ---------------------------------------------------------------------------

/// Settings for the station-count poller.
#[derive(Debug, Clone)]
pub struct StationFeedConfig {
    /// Feed endpoint. `None` disables the poller.
    pub feed_url: Option<String>,
    pub poll_interval_secs: u64,
    pub timeout_secs: u64,
    /// Which `Filter` bit counts toward which brand slug.
    pub brand_bits: BrandBitMap,
}

impl StationFeedConfig {
    /// | Env Var                      | Default               |
    /// |------------------------------|-----------------------|
    /// | `STATION_FEED_URL`           | unset (disabled)      |
    /// | `STATION_POLL_INTERVAL_SECS` | `1800`                |
    /// | `STATION_FEED_TIMEOUT_SECS`  | `30`                  |
    /// | `STATION_FEED_BRANDS`        | `0:ovolt,1:sharz-net` |
    ///
    /// # Panics
    ///
    /// Panics if the interval is zero or the brand mapping does not parse.
    pub fn from_env() -> Self {
        let feed_url = std::env::var("STATION_FEED_URL")
            .ok()
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());

        let poll_interval_secs: u64 = std::env::var("STATION_POLL_INTERVAL_SECS")
            .unwrap_or_else(|_| "1800".into())
            .parse()
            .expect("STATION_POLL_INTERVAL_SECS must be a valid u64");
        assert!(
            poll_interval_secs > 0,
            "STATION_POLL_INTERVAL_SECS must be greater than zero"
        );

        let timeout_secs: u64 = std::env::var("STATION_FEED_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("STATION_FEED_TIMEOUT_SECS must be a valid u64");

        let brand_bits: BrandBitMap = std::env::var("STATION_FEED_BRANDS")
            .unwrap_or_else(|_| DEFAULT_BRAND_BITS.into())
            .parse()
            .unwrap_or_else(|e| panic!("Invalid STATION_FEED_BRANDS: {e}"));

        Self {
            feed_url,
            poll_interval_secs,
            timeout_secs,
            brand_bits,
        }
    }
}

// ---------------------------------------------------------------------------
// First-run seeding
// ---------------------------------------------------------------------------

/// Credentials for the super admin created on first start.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    pub admin_name: String,
}

impl SeedConfig {
    /// | Env Var               | Default       |
    /// |-----------------------|---------------|
    /// | `SEED_ADMIN_EMAIL`    | unset         |
    /// | `SEED_ADMIN_PASSWORD` | unset         |
    /// | `SEED_ADMIN_NAME`     | `Super Admin` |
    pub fn from_env() -> Self {
        let non_empty = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        Self {
            admin_email: non_empty("SEED_ADMIN_EMAIL"),
            admin_password: non_empty("SEED_ADMIN_PASSWORD"),
            admin_name: non_empty("SEED_ADMIN_NAME").unwrap_or_else(|| "Super Admin".into()),
        }
    }
}
