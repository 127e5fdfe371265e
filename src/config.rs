use crate::error::{env_error, SiteResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;

/// Default locale for public pages
pub const DEFAULT_LOCALE: &str = "ko";

/// Default timezone used for the church calendar
pub const DEFAULT_TIMEZONE: &str = "Asia/Seoul";

/// Main configuration structure for the site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Port the HTTP server listens on
    pub port: u16,
    /// Redis connection URL (the document store)
    pub redis_url: String,
    /// Timezone used to resolve "today" on the calendar
    pub timezone: String,
    /// Default UI locale ("ko" or "en")
    pub site_locale: String,
    /// Admin panel username
    pub admin_username: String,
    /// Admin panel password
    pub admin_password: String,
    /// Secret used to sign admin session tokens
    pub jwt_secret: String,
    /// Directory where uploaded media files are stored
    pub upload_dir: String,
    /// Map of component names to their enabled status
    pub components: HashMap<String, bool>,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> SiteResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        // Required environment variables
        let admin_username = env::var("ADMIN_USERNAME").map_err(|_| env_error("ADMIN_USERNAME"))?;
        let admin_password = env::var("ADMIN_PASSWORD").map_err(|_| env_error("ADMIN_PASSWORD"))?;

        // Optional with defaults
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let redis_url =
            env::var("REDIS_URL").unwrap_or_else(|_| String::from("redis://127.0.0.1:6379"));
        let timezone = env::var("TIMEZONE").unwrap_or_else(|_| String::from(DEFAULT_TIMEZONE));
        let site_locale = env::var("SITE_LOCALE").unwrap_or_else(|_| String::from(DEFAULT_LOCALE));
        let jwt_secret =
            env::var("JWT_SECRET").unwrap_or_else(|_| String::from("hanbit_dev_secret"));
        let upload_dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| String::from("./uploads"));

        // Initialize default components
        let mut components = HashMap::new();
        components.insert("site_content".to_string(), true);

        // Load components configuration from file if it exists
        if let Ok(content) = fs::read_to_string("config/components.toml") {
            if let Ok(file_components) = toml::from_str::<HashMap<String, bool>>(&content) {
                // Merge with defaults
                for (key, value) in file_components {
                    components.insert(key, value);
                }
            }
        }

        Ok(Config {
            port,
            redis_url,
            timezone,
            site_locale,
            admin_username,
            admin_password,
            jwt_secret,
            upload_dir,
            components,
        })
    }

    /// Check if a component is enabled
    pub fn is_component_enabled(&self, name: &str) -> bool {
        *self.components.get(name).unwrap_or(&false)
    }
}
