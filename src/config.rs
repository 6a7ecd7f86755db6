// receipt-generation-service/src/config.rs

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub google: GoogleConfig,
    pub directory: DirectoryConfig,
    pub templates: TemplateConfig,
    pub drive: DriveConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub log_level: String,
}

/// Google API access. Token acquisition is out of scope: the tool consumes
/// a pre-acquired OAuth bearer token (e.g. `gcloud auth print-access-token`).
#[derive(Clone, Deserialize)]
pub struct GoogleConfig {
    pub access_token: String,
    pub sheets_base_url: String,
    pub drive_base_url: String,
    pub docs_base_url: String,
}

impl std::fmt::Debug for GoogleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleConfig")
            .field("access_token", &"[REDACTED]")
            .field("sheets_base_url", &self.sheets_base_url)
            .field("drive_base_url", &self.drive_base_url)
            .field("docs_base_url", &self.docs_base_url)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
    pub spreadsheet_id: String,
    pub sheet_name: String,
}

/// Template document ids, one per contribution kind.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateConfig {
    pub received_id: String,
    pub paid_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DriveConfig {
    pub folder_id: String,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            // Start with default values
            .set_default("service.name", "receipt-generation-service")?
            .set_default("service.log_level", "info")?
            .set_default("google.sheets_base_url", "https://sheets.googleapis.com")?
            .set_default("google.drive_base_url", "https://www.googleapis.com")?
            .set_default("google.docs_base_url", "https://docs.googleapis.com")?
            .set_default("directory.sheet_name", "Foglio1")?
            // Load from config file if it exists
            .add_source(File::with_name("config").required(false))
            // Override with environment variables (e.g., RECEIPT__GOOGLE__ACCESS_TOKEN)
            .add_source(Environment::with_prefix("RECEIPT").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
