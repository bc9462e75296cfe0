use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::model::IdAssignment;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub catalog: CatalogConfig,
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub products_path: String,
    pub cart_path: String,
    /// Start with an empty collection when its file does not exist yet
    pub create_missing: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub id_assignment: IdAssignment,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedConfig {
    pub load_demo_data: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            products_path: "products.json".to_string(),
            cart_path: "cart.json".to_string(),
            create_missing: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, an optional `config` file and
    /// `SHOP_`-prefixed environment variables, in increasing precedence.
    ///
    /// Nested keys use a double underscore, e.g. `SHOP_SERVER__PORT`.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Add default configuration
        config = config.add_source(config::Config::try_from(&AppConfig::default())?);

        // Add config file if it exists
        config = config.add_source(config::File::with_name("config").required(false));

        config = config.add_source(
            config::Environment::with_prefix("SHOP")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = config.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        // Plain PORT is what most hosting platforms set
        if std::env::var("SHOP_SERVER__PORT").is_err() {
            if let Ok(port) = std::env::var("PORT") {
                app_config.server.port = port
                    .parse()
                    .with_context(|| format!("PORT is not a valid port number: {port}"))?;
            }
        }

        if std::env::var("LOAD_SEED_DATA").unwrap_or_default() == "true" {
            app_config.seed.load_demo_data = true;
        }

        Ok(app_config)
    }

    /// Get the server bind address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
