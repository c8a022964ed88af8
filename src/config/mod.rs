use once_cell::sync::Lazy;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub geocoding: GeocodingConfig,
    pub uploads: UploadConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// HS256 signing secret for bearer tokens. Empty means token issuing
    /// and verification fail closed.
    pub jwt_secret: String,
    pub jwt_expiry_secs: u64,
}

#[derive(Debug, Clone)]
pub struct GeocodingConfig {
    pub endpoint: String,
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Directory that stored image references resolve against.
    pub dir: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECT_TIMEOUT") {
            self.database.connect_timeout_secs = v.parse().unwrap_or(self.database.connect_timeout_secs);
        }
        if let Ok(v) = env::var("JWT_KEY") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("JWT_EXPIRY_SECS") {
            self.security.jwt_expiry_secs = v.parse().unwrap_or(self.security.jwt_expiry_secs);
        }
        if let Ok(v) = env::var("GEOCODER_ENDPOINT") {
            self.geocoding.endpoint = v;
        }
        if let Ok(v) = env::var("GOOGLE_API_KEY") {
            self.geocoding.api_key = v;
        }
        if let Ok(v) = env::var("UPLOAD_DIR") {
            self.uploads.dir = v;
        }
        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig { max_connections: 10, connect_timeout_secs: 30 },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_secs: 3600, // 1 hour
            },
            geocoding: GeocodingConfig {
                endpoint: "https://maps.googleapis.com/maps/api/geocode/json".to_string(),
                api_key: String::new(),
            },
            uploads: UploadConfig { dir: "uploads".to_string() },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig { max_connections: 25, connect_timeout_secs: 5 },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_secs: 3600,
            },
            geocoding: GeocodingConfig {
                endpoint: "https://maps.googleapis.com/maps/api/geocode/json".to_string(),
                api_key: String::new(),
            },
            uploads: UploadConfig { dir: "uploads".to_string() },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
