use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: IpAddr,
    pub server_port: u16,
    pub environment: Environment,
    pub log_level: String,
    pub jwt_secret: String,
    pub session_ttl_secs: u64,
    pub frontend_url: String,
    pub image_store: ImageStoreConfig,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

/// Deployment environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Where player photos are uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageStoreConfig {
    /// Unsigned uploads to a Cloudinary upload preset.
    Cloudinary {
        cloud_name: String,
        upload_preset: String,
    },
    /// Files written under `upload_dir` and served from `/uploads`.
    Local {
        upload_dir: PathBuf,
        public_base_url: String,
    },
}

/// Credentials for the first admin, created only when no staff account exists.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
}

const DEV_JWT_SECRET: &str = "dev-only-secret-change-me-in-production";
const DEFAULT_SESSION_TTL_SECS: u64 = 7 * 24 * 60 * 60;

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required: `DATABASE_URL`, and `JWT_SECRET` in production.
    /// Optional with defaults: `SERVER_HOST`, `SERVER_PORT`, `ENVIRONMENT`, `LOG_LEVEL`,
    /// `SESSION_TTL_SECS`, `FRONTEND_URL`, `IMAGE_STORE`, `UPLOAD_DIR`, `PUBLIC_BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value cannot be parsed.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

        let environment = match std::env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string())
            .as_str()
        {
            "production" => Environment::Production,
            "staging" => Environment::Staging,
            _ => Environment::Development,
        };

        // PaaS hosts provide PORT; fall back to SERVER_PORT, then 3000
        let server_port = std::env::var("PORT")
            .or_else(|_| std::env::var("SERVER_PORT"))
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| anyhow::anyhow!("SERVER_PORT / PORT must be a valid u16"))?;

        let default_host = if environment == Environment::Production {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        };

        let server_host = std::env::var("SERVER_HOST")
            .unwrap_or_else(|_| default_host.to_string())
            .parse::<IpAddr>()
            .map_err(|_| anyhow::anyhow!("SERVER_HOST must be a valid IP address"))?;

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ if environment == Environment::Production => {
                return Err(anyhow::anyhow!("JWT_SECRET must be set in production"));
            }
            _ => DEV_JWT_SECRET.to_string(),
        };

        let session_ttl_secs = std::env::var("SESSION_TTL_SECS")
            .map_or(Ok(DEFAULT_SESSION_TTL_SECS), |v| v.parse::<u64>())
            .map_err(|_| anyhow::anyhow!("SESSION_TTL_SECS must be a whole number of seconds"))?;

        let frontend_url =
            std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3001".to_string());

        let image_store = image_store_from_env(server_host, server_port)?;

        let bootstrap_admin = match (
            std::env::var("BOOTSTRAP_ADMIN_EMAIL"),
            std::env::var("BOOTSTRAP_ADMIN_PASSWORD"),
        ) {
            (Ok(email), Ok(password)) if !email.is_empty() && !password.is_empty() => {
                Some(BootstrapAdmin { email, password })
            }
            _ => None,
        };

        Ok(Self {
            database_url,
            server_host,
            server_port,
            environment,
            log_level,
            jwt_secret,
            session_ttl_secs,
            frontend_url,
            image_store,
            bootstrap_admin,
        })
    }

    /// Build the socket address for the server to bind to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server_host, self.server_port)
    }

    /// Session cookies are only marked `Secure` in production.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.environment == Environment::Production
    }
}

fn image_store_from_env(host: IpAddr, port: u16) -> anyhow::Result<ImageStoreConfig> {
    let kind = std::env::var("IMAGE_STORE").unwrap_or_else(|_| "local".to_string());

    match kind.as_str() {
        "cloudinary" => {
            let cloud_name = std::env::var("CLOUDINARY_CLOUD_NAME")
                .map_err(|_| anyhow::anyhow!("CLOUDINARY_CLOUD_NAME must be set"))?;
            let upload_preset = std::env::var("CLOUDINARY_UPLOAD_PRESET")
                .map_err(|_| anyhow::anyhow!("CLOUDINARY_UPLOAD_PRESET must be set"))?;
            Ok(ImageStoreConfig::Cloudinary {
                cloud_name,
                upload_preset,
            })
        }
        "local" => {
            let upload_dir =
                PathBuf::from(std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()));
            let public_base_url = std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| format!("http://{host}:{port}"));
            Ok(ImageStoreConfig::Local {
                upload_dir,
                public_base_url,
            })
        }
        other => Err(anyhow::anyhow!(
            "IMAGE_STORE must be `cloudinary` or `local`, got `{other}`"
        )),
    }
}
